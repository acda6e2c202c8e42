use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub cors: CorsOrigins,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    Disabled,
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            CorsOrigins::Disabled
        } else if origins.iter().any(|o| o == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("ME_API_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ME_API_HOST: {e}"))?;

        let port: u16 = env_or("ME_API_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid ME_API_PORT: {e}"))?;

        let max_body_size: usize = env_or("ME_API_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid ME_API_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("ME_API_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid ME_API_DB_MAX_CONNECTIONS: {e}"))?;
        if db_max_connections == 0 {
            return Err("Invalid ME_API_DB_MAX_CONNECTIONS: must be at least 1".to_string());
        }

        let cors = CorsOrigins::parse(&env_or("ME_API_CORS_ORIGINS", ""));

        let log_level = env_or("ME_API_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            db_max_connections,
            cors,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_origins_parse() {
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Disabled);
        assert_eq!(CorsOrigins::parse(" , "), CorsOrigins::Disabled);
        assert_eq!(CorsOrigins::parse("https://a.dev, *"), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse("https://a.dev, https://b.dev"),
            CorsOrigins::List(vec!["https://a.dev".to_string(), "https://b.dev".to_string()])
        );
    }
}
