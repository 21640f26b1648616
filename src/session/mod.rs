pub mod export;
pub mod manager;
mod types;

pub use export::{ExportFormat, export_conversation};
pub use manager::SessionManager;
pub use types::{Conversation, ConversationSummary, Message, RiskLevel, Sender, Sentiment};
