use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::documents::{DocumentKind, ExtractedDocument};
use crate::llm_client::ChatMessage;

pub const GREETING: &str = "Hi! I'm your personal resume reviewer. Upload your resume and job \
description, and I'll provide insights to help you land your dream job. You can select from the \
following options to get started or provide your own prompt.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn to_message(&self) -> ChatMessage {
        match self.role {
            Role::User => ChatMessage::user(&self.content),
            Role::Assistant => ChatMessage::assistant(&self.content),
        }
    }
}

/// One browser session: an append-only turn log plus the uploaded documents.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    pub id: Uuid,
    turns: Vec<ChatTurn>,
    #[serde(skip)]
    resume: Option<ExtractedDocument>,
    #[serde(skip)]
    job_description: Option<ExtractedDocument>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    last_active: Instant,
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            turns: Vec::new(),
            resume: None,
            job_description: None,
            created_at: Utc::now(),
            last_active: Instant::now(),
        };
        session.append(Role::Assistant, GREETING);
        session
    }

    /// The only way turns change. Nothing is ever edited or removed.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &ChatTurn {
        self.last_active = Instant::now();
        self.turns.push(ChatTurn {
            role,
            content: content.into(),
            created_at: Utc::now(),
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn set_document(&mut self, document: ExtractedDocument) {
        self.last_active = Instant::now();
        match document.kind() {
            DocumentKind::Resume => self.resume = Some(document),
            DocumentKind::JobDescription => self.job_description = Some(document),
        }
    }

    /// Drops a document, e.g. after a replacement upload could not be read.
    pub fn clear_document(&mut self, kind: DocumentKind) {
        self.last_active = Instant::now();
        match kind {
            DocumentKind::Resume => self.resume = None,
            DocumentKind::JobDescription => self.job_description = None,
        }
    }

    pub fn last_active(&self) -> Instant {
        self.last_active
    }

    pub fn resume_text(&self) -> Option<&str> {
        self.resume.as_ref().map(ExtractedDocument::text)
    }

    pub fn job_description_text(&self) -> Option<&str> {
        self.job_description.as_ref().map(ExtractedDocument::text)
    }

    /// Conversation history for the LLM, without the greeting.
    pub fn chat_history(&self) -> Vec<ChatMessage> {
        self.turns.iter().skip(1).map(ChatTurn::to_message).collect()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
