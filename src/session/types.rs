use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Sentiment tag attached to a single message after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Critical,
}

/// Urgency of the most recent exchange in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Crisis,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Crisis => "crisis",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub sentiment: Option<Sentiment>,
    pub confidence: Option<f32>,
}

impl Message {
    pub fn new(sender: Sender, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            sender,
            timestamp: Utc::now(),
            sentiment: None,
            confidence: None,
        }
    }

    /// User message with its classification already attached.
    pub fn user(content: String, sentiment: Sentiment, confidence: f32) -> Self {
        let mut msg = Self::new(Sender::User, content);
        msg.sentiment = Some(sentiment);
        msg.confidence = Some(confidence);
        msg
    }

    /// Generated reply. The sentiment here is a fixed placeholder, replies
    /// are never re-classified.
    pub fn assistant(content: String) -> Self {
        let mut msg = Self::new(Sender::Assistant, content);
        msg.sentiment = Some(Sentiment::Neutral);
        msg.confidence = Some(0.9);
        msg
    }

    /// Opening greeting seeded into every new conversation.
    pub fn greeting(content: String) -> Self {
        let mut msg = Self::new(Sender::Assistant, content);
        msg.sentiment = Some(Sentiment::Positive);
        msg.confidence = Some(0.9);
        msg
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub title: String,
    pub messages: Vec<Message>,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    #[serde(default)]
    pub awaiting_response: bool,
}

impl Conversation {
    pub fn new(title: String, greeting: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            messages: vec![Message::greeting(greeting)],
            risk_level: RiskLevel::Low,
            created_at: now,
            last_active: now,
            awaiting_response: false,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

/// Compact view for conversation list rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub title: String,
    pub risk_level: RiskLevel,
    pub last_active: DateTime<Utc>,
    pub message_count: usize,
    pub awaiting_response: bool,
}

impl From<&Conversation> for ConversationSummary {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id,
            title: conversation.title.clone(),
            risk_level: conversation.risk_level,
            last_active: conversation.last_active,
            message_count: conversation.messages.len(),
            awaiting_response: conversation.awaiting_response,
        }
    }
}
