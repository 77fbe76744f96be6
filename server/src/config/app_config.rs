//! Runtime application configuration loaded from the environment.

/// Hard upper bound on labels per generated sheet.
pub const SHEET_HARD_CAP: usize = 2000;

/// Runtime configuration populated from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Public origin encoded into QR destinations, e.g. `https://tags.example.com`.
    pub public_base_url: String,
    /// Default and maximum label count per sheet request.
    pub max_labels_per_sheet: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            public_base_url: "http://localhost:8080".into(),
            max_labels_per_sheet: SHEET_HARD_CAP,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_u16(&env_var("SERVER_PORT"), defaults.server_port),
            public_base_url: {
                let v = env_var("PUBLIC_BASE_URL");
                let v = if v.is_empty() {
                    defaults.public_base_url
                } else {
                    v
                };
                v.trim_end_matches('/').to_string()
            },
            max_labels_per_sheet: parse_usize(
                &env_var("MAX_LABELS_PER_SHEET"),
                defaults.max_labels_per_sheet,
            ),
        }
    }
}

fn env_var(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

fn parse_u16(value: &str, default: u16) -> u16 {
    value.parse().unwrap_or(default)
}

fn parse_usize(value: &str, default: usize) -> usize {
    value.parse().unwrap_or(default)
}
