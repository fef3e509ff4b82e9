use chrono::Utc;
use uuid::Uuid;

use shared_models::ApiError;

use crate::models::{
    BookingUpdate, ChatAuthor, ChatMessage, ChatOutbound, ChatResponse, MessageKind, GREETING,
};

/// Conversation state. The message list is append-only; interleaved writers
/// only ever push, so ordering is the arrival order at the controller.
#[derive(Debug, Clone)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub sending: bool,
    pub error: Option<String>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: "greeting".to_string(),
                author: ChatAuthor::Assistant,
                text: GREETING.to_string(),
                kind: MessageKind::Text,
                timestamp: None,
            }],
            sending: false,
            error: None,
        }
    }
}

// ==============================================================================
// REDUCERS
// ==============================================================================

/// Appends the patient's message and marks the session busy. Returns false
/// when a request is already outstanding; at most one is in flight.
pub fn begin_send(state: &mut ChatState, outbound: &ChatOutbound) -> bool {
    if state.sending {
        return false;
    }
    let prefix = match outbound {
        ChatOutbound::Text(_) => "local",
        ChatOutbound::QuickReply(_) => "quick",
    };
    state.error = None;
    state.sending = true;
    state.messages.push(ChatMessage {
        id: format!("{}-{}", prefix, Uuid::new_v4()),
        author: ChatAuthor::Patient,
        text: outbound.text().to_string(),
        kind: MessageKind::Text,
        timestamp: Some(Utc::now()),
    });
    true
}

/// Appends the server's reply messages verbatim, in order, then the optional
/// synthesized booking-status message. The already-appended patient message is
/// never rolled back, success or failure.
pub fn apply_response(state: &mut ChatState, result: Result<ChatResponse, ApiError>) {
    state.sending = false;
    match result {
        Ok(response) => {
            for mut message in response.messages {
                if message.id.is_empty() {
                    message.id = format!("reply-{}", Uuid::new_v4());
                }
                state.messages.push(message);
            }
            if let Some(update) = response.booking_update {
                state.messages.push(booking_update_message(&update));
            }
        }
        Err(error) => {
            state.error = Some(error.user_message());
        }
    }
}

pub fn dismiss_error(state: &mut ChatState) {
    state.error = None;
}

/// One system message combining status, details, and confirmation number.
fn booking_update_message(update: &BookingUpdate) -> ChatMessage {
    let text = match &update.confirmation_number {
        Some(number) => format!("{} Confirmation: {}", update.details, number),
        None => update.details.clone(),
    };
    let kind = if update.status == "confirmed" {
        MessageKind::Confirmation
    } else {
        MessageKind::Status
    };
    ChatMessage {
        id: format!("booking-{}", Uuid::new_v4()),
        author: ChatAuthor::System,
        text,
        kind,
        timestamp: Some(Utc::now()),
    }
}
