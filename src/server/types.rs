use crate::session::{Message, RiskLevel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SubmitMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "text".to_string()
}

#[derive(Debug, Serialize)]
pub struct SubmitMessageResponse {
    pub session_id: Uuid,
    pub user_message: Message,
    pub reply: Message,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_banner: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
