use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Optional path to a base64-encoded prompt card list; the built-in
    /// deck is used when unset.
    pub cards_path: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("Invalid PORT"),
            cards_path: env::var("CARDS_PATH").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
