pub mod profiles;
pub mod projects;
pub mod skills;

/// `ILIKE` pattern matching `query` anywhere, with wildcards in `query` taken literally.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Py"), "%Py%");
        assert_eq!(contains_pattern("100%_c\\"), "%100\\%\\_c\\\\%");
    }
}
