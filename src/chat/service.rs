use super::{Responder, classify};
use crate::config::ChatConfig;
use crate::session::{
    Conversation, ConversationSummary, ExportFormat, Message, RiskLevel, SessionManager,
    export_conversation,
};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One completed submit cycle: the classified user message, the appended
/// reply, and the conversation's new risk level.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user_message: Message,
    pub reply: Message,
    pub risk_level: RiskLevel,
}

/// Orchestration boundary between the UI-facing API and the chat core.
///
/// Holds the session store and the responder behind locks; the lock is
/// never held across the simulated latency, so a pending reply in one
/// conversation leaves every other conversation fully interactive.
#[derive(Clone)]
pub struct ChatService {
    manager: Arc<Mutex<SessionManager>>,
    responder: Arc<Mutex<Responder>>,
    delay: Duration,
    crisis_banner: String,
}

impl ChatService {
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_responder(config, Responder::new(&config.crisis_hotline))
    }

    /// Deterministic variant for tests: pinned RNG seed.
    pub fn seeded(config: &ChatConfig, seed: u64) -> Self {
        Self::with_responder(config, Responder::seeded(&config.crisis_hotline, seed))
    }

    fn with_responder(config: &ChatConfig, responder: Responder) -> Self {
        Self {
            manager: Arc::new(Mutex::new(SessionManager::new(config.greeting.clone()))),
            responder: Arc::new(Mutex::new(responder)),
            delay: Duration::from_millis(config.response_delay_ms),
            crisis_banner: format!(
                "Crisis Support: Call {} immediately or text {}",
                config.crisis_hotline, config.crisis_text_line
            ),
        }
    }

    /// Banner text surfaced alongside crisis-tier replies.
    pub fn crisis_banner(&self) -> &str {
        &self.crisis_banner
    }

    /// Submits user text to a conversation and returns the full exchange
    /// once the simulated latency has elapsed and the reply is appended.
    ///
    /// Rejections (empty text, unknown id, reply already pending) leave the
    /// conversation untouched. Once the reply is scheduled it always
    /// completes; there is no cancellation path.
    pub async fn submit_user_message(&self, id: Uuid, text: &str) -> Result<Exchange> {
        if text.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }

        let classification = classify(text);
        debug!(
            "Classified message for {}: {:?} ({:.2})",
            id, classification.sentiment, classification.confidence
        );

        let (user_message, recent) = {
            let mut manager = self.manager.lock().await;
            let conversation = manager.conversation_mut(id)?;
            if conversation.awaiting_response {
                return Err(Error::ResponsePending {
                    session_id: id.to_string(),
                });
            }

            // The selector sees the conversation as it stood before this
            // message was appended.
            let recent: Vec<Message> = conversation
                .messages
                .iter()
                .rev()
                .take(3)
                .rev()
                .cloned()
                .collect();

            let user_message = Message::user(
                text.to_string(),
                classification.sentiment,
                classification.confidence,
            );
            conversation.messages.push(user_message.clone());
            conversation.awaiting_response = true;
            conversation.touch();
            (user_message, recent)
        };

        // The scheduled reply runs on a detached task: dropping this future
        // (a disconnected client, an aborted request) must not leave the
        // conversation stuck awaiting a reply that never lands.
        let completion = {
            let manager = Arc::clone(&self.manager);
            let responder = Arc::clone(&self.responder);
            let delay = self.delay;
            let text = text.to_string();
            let user_message = user_message.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;

                let reply = {
                    let mut responder = responder.lock().await;
                    responder.select(&text, classification, &recent)
                };

                let mut manager = manager.lock().await;
                let conversation = match manager.conversation_mut(id) {
                    Ok(conversation) => conversation,
                    Err(e) => {
                        warn!("Conversation {} deleted while reply was pending", id);
                        return Err(e);
                    }
                };

                let reply_message = Message::assistant(reply.content);
                conversation.messages.push(reply_message.clone());
                conversation.risk_level = reply.risk_level;
                conversation.awaiting_response = false;
                conversation.touch();

                if reply.risk_level == RiskLevel::Crisis {
                    info!("Crisis escalation in conversation {}", id);
                }

                Ok(Exchange {
                    user_message,
                    reply: reply_message,
                    risk_level: reply.risk_level,
                })
            })
        };

        completion
            .await
            .map_err(|e| Error::internal(format!("Reply task failed: {e}")))?
    }

    pub async fn create_conversation(&self) -> Conversation {
        self.manager.lock().await.create_conversation()
    }

    pub async fn delete_conversation(&self, id: Uuid) -> Result<()> {
        self.manager.lock().await.delete_conversation(id)
    }

    pub async fn set_active_conversation(&self, id: Uuid) -> Result<()> {
        self.manager.lock().await.set_active(id)
    }

    pub async fn active_conversation(&self) -> Result<Conversation> {
        let manager = self.manager.lock().await;
        manager.active().cloned()
    }

    pub async fn conversation(&self, id: Uuid) -> Result<Conversation> {
        let manager = self.manager.lock().await;
        manager.conversation(id).cloned()
    }

    pub async fn list_conversations(&self) -> Vec<ConversationSummary> {
        self.manager.lock().await.list()
    }

    pub async fn export_conversation(&self, id: Uuid, format: ExportFormat) -> Result<String> {
        let manager = self.manager.lock().await;
        let conversation = manager.conversation(id)?;
        export_conversation(conversation, format)
    }
}
