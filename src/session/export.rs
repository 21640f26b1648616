use super::{Conversation, Sender};
use crate::{Error, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::UnknownExportFormat(other.to_string())),
        }
    }
}

/// Serializes a conversation for download. Pure transform, conversation
/// state is untouched.
///
/// The text format is a human-readable transcript: a metadata header, a
/// separator rule, then one timestamped block per turn. The JSON format is
/// the full conversation structure with RFC 3339 timestamps.
pub fn export_conversation(conversation: &Conversation, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(conversation)?),
        ExportFormat::Text => Ok(export_text(conversation)),
    }
}

fn export_text(conversation: &Conversation) -> String {
    let mut out = String::new();
    out.push_str("MindCare Connect - Chat Session\n");
    out.push_str(&format!("Session: {}\n", conversation.title));
    out.push_str(&format!(
        "Date: {}\n",
        conversation.created_at.format("%Y-%m-%d")
    ));
    out.push_str(&format!("Risk Level: {}\n", conversation.risk_level));
    out.push_str(&format!("\n{}\n\n", "=".repeat(50)));

    for message in &conversation.messages {
        let sender = match message.sender {
            Sender::User => "You",
            Sender::Assistant => "AI Support",
        };
        out.push_str(&format!(
            "[{}] {}:\n{}\n\n",
            message.timestamp.format("%H:%M:%S"),
            sender,
            message.content
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Message, RiskLevel, Sentiment};
    use pretty_assertions::assert_eq;

    fn sample_conversation() -> Conversation {
        let mut conversation =
            Conversation::new("Chat 1".to_string(), "How are you feeling today?".to_string());
        conversation.messages.push(Message::user(
            "worried about my exam".to_string(),
            Sentiment::Negative,
            0.7,
        ));
        conversation
            .messages
            .push(Message::assistant("Let's talk about it.".to_string()));
        conversation.risk_level = RiskLevel::Medium;
        conversation
    }

    #[test]
    fn format_parsing_accepts_known_names() {
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "csv".parse::<ExportFormat>(),
            Err(Error::UnknownExportFormat(_))
        ));
    }

    #[test]
    fn json_export_round_trips() {
        let conversation = sample_conversation();
        let json = export_conversation(&conversation, ExportFormat::Json).unwrap();
        let parsed: Conversation = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, conversation.id);
        assert_eq!(parsed.risk_level, conversation.risk_level);
        assert_eq!(parsed.messages.len(), conversation.messages.len());
        for (left, right) in parsed.messages.iter().zip(&conversation.messages) {
            assert_eq!(left.id, right.id);
            assert_eq!(left.content, right.content);
            assert_eq!(left.sender, right.sender);
        }
    }

    #[test]
    fn text_export_has_header_and_turns() {
        let conversation = sample_conversation();
        let text = export_conversation(&conversation, ExportFormat::Text).unwrap();

        assert!(text.starts_with("MindCare Connect - Chat Session\n"));
        assert!(text.contains("Session: Chat 1\n"));
        assert!(text.contains("Risk Level: medium\n"));
        assert!(text.contains(&"=".repeat(50)));
        assert!(text.contains("You:\nworried about my exam\n"));
        assert!(text.contains("AI Support:\nLet's talk about it.\n"));
        assert!(text.contains("AI Support:\nHow are you feeling today?\n"));
    }
}
