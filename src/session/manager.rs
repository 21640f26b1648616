use super::{Conversation, ConversationSummary};
use crate::{Error, Result};
use tracing::{debug, info};
use uuid::Uuid;

const FIRST_CONVERSATION_TITLE: &str = "General Support Chat";

/// In-memory store of open conversations.
///
/// Always holds at least one conversation: construction seeds the first and
/// `delete_conversation` refuses to remove the last remaining one.
pub struct SessionManager {
    conversations: Vec<Conversation>,
    active_id: Uuid,
    greeting: String,
}

impl SessionManager {
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let first = Conversation::new(FIRST_CONVERSATION_TITLE.to_string(), greeting.clone());
        let active_id = first.id;
        info!("Session store initialized with conversation {}", active_id);
        Self {
            conversations: vec![first],
            active_id,
            greeting,
        }
    }

    /// Creates a conversation seeded with the greeting and makes it active.
    pub fn create_conversation(&mut self) -> Conversation {
        let title = format!("Chat {}", self.conversations.len() + 1);
        let conversation = Conversation::new(title, self.greeting.clone());
        self.active_id = conversation.id;
        info!("Created conversation {}", conversation.id);
        self.conversations.push(conversation.clone());
        conversation
    }

    /// Removes a conversation. Rejected for the last remaining one; if the
    /// active conversation is removed, the first remaining becomes active.
    pub fn delete_conversation(&mut self, id: Uuid) -> Result<()> {
        let index = self.index_of(id)?;
        if self.conversations.len() == 1 {
            return Err(Error::LastSessionDelete {
                session_id: id.to_string(),
            });
        }

        self.conversations.remove(index);
        if self.active_id == id {
            self.active_id = self.conversations[0].id;
            debug!("Active conversation fell back to {}", self.active_id);
        }
        info!("Deleted conversation {}", id);
        Ok(())
    }

    pub fn set_active(&mut self, id: Uuid) -> Result<()> {
        self.index_of(id)?;
        self.active_id = id;
        Ok(())
    }

    pub fn active_id(&self) -> Uuid {
        self.active_id
    }

    pub fn active(&self) -> Result<&Conversation> {
        self.conversation(self.active_id)
    }

    pub fn conversation(&self, id: Uuid) -> Result<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::session_not_found(id.to_string()))
    }

    pub fn conversation_mut(&mut self, id: Uuid) -> Result<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::session_not_found(id.to_string()))
    }

    /// Summaries in creation order, for list rendering.
    pub fn list(&self) -> Vec<ConversationSummary> {
        self.conversations
            .iter()
            .map(ConversationSummary::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn index_of(&self, id: Uuid) -> Result<usize> {
        self.conversations
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::session_not_found(id.to_string()))
    }
}
