use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==============================================================================
// CHAT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAuthor {
    Patient,
    Assistant,
    System,
}

/// Message kind drives rendering: plain text, a booking status line, or a
/// booking confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    Status,
    Confirmation,
}

/// One entry of the append-only conversation. Patient messages get a local id
/// the moment they are appended; assistant replies append after them, never
/// replacing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub author: ChatAuthor,
    pub text: String,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// One outbound user action: free text or a pre-authored quick reply, never
/// both.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutbound {
    Text(String),
    QuickReply(String),
}

impl ChatOutbound {
    pub fn text(&self) -> &str {
        match self {
            ChatOutbound::Text(text) => text,
            ChatOutbound::QuickReply(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_reply: Option<String>,
}

impl ChatRequest {
    pub fn new(session_id: &str, outbound: &ChatOutbound) -> Self {
        match outbound {
            ChatOutbound::Text(text) => Self {
                session_id: session_id.to_string(),
                text: Some(text.clone()),
                quick_reply: None,
            },
            ChatOutbound::QuickReply(reply) => Self {
                session_id: session_id.to_string(),
                text: None,
                quick_reply: Some(reply.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub status: String,
    pub details: String,
    pub confirmation_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub booking_update: Option<BookingUpdate>,
}

/// Pre-authored prompts shown next to the input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickReply {
    pub id: &'static str,
    pub label: &'static str,
    pub text: &'static str,
}

pub const QUICK_REPLIES: [QuickReply; 4] = [
    QuickReply {
        id: "hours",
        label: "What are your hours?",
        text: "What are your hours?",
    },
    QuickReply {
        id: "insurance",
        label: "Insurance options",
        text: "Do you accept Delta Dental and other major insurance?",
    },
    QuickReply {
        id: "services",
        label: "Service list",
        text: "Which services are available this week?",
    },
    QuickReply {
        id: "book",
        label: "Book for me",
        text: "Can you book for me?",
    },
];

pub const GREETING: &str =
    "Hi! I'm the AI receptionist. Ask a question or pick quick replies to get started.";
