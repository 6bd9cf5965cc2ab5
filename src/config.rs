use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL
    pub postgres_url: String,
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

fn default_token_ttl_hours() -> i64 {
    24
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
log_level: "info"
log_dir: "./logs"
log_file: "storegate.log"
use_json: false
rotation: "daily"
gateway:
  host: "127.0.0.1"
  port: 9090
postgres_url: "postgresql://u:p@localhost/db"
jwt_secret: "secret"
"#;
        let cfg: AppConfig = serde_yaml::from_str(yaml).expect("should parse");
        assert_eq!(cfg.gateway.port, 9090);
        assert_eq!(cfg.token_ttl_hours, 24, "TTL defaults to 24h");
    }
}
