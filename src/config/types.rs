use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulated "typing" latency before a reply is appended.
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_crisis_hotline")]
    pub crisis_hotline: String,
    #[serde(default = "default_crisis_text_line")]
    pub crisis_text_line: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            greeting: default_greeting(),
            crisis_hotline: default_crisis_hotline(),
            crisis_text_line: default_crisis_text_line(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_response_delay_ms() -> u64 {
    1500
}

fn default_greeting() -> String {
    "Hello! I'm here to provide emotional support and coping strategies. How are you feeling today?"
        .to_string()
}

fn default_crisis_hotline() -> String {
    "1800-XXX-XXXX".to_string()
}

fn default_crisis_text_line() -> String {
    "988".to_string()
}
