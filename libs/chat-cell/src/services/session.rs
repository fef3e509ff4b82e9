use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use shared_api::{ApiClient, CancellationToken};
use shared_models::ApiError;

use crate::models::{ChatOutbound, ChatRequest, ChatResponse};
use crate::state::{self, ChatState};

/// Support-chat controller. Each user action appends the patient message
/// synchronously, then issues exactly one request; at most one request is
/// outstanding at a time. Failures surface as a dismissible error and never
/// roll back the appended message.
#[derive(Clone)]
pub struct ChatSession {
    api: Arc<ApiClient>,
    session_id: String,
    state: Arc<RwLock<ChatState>>,
    lifetime: CancellationToken,
}

impl ChatSession {
    pub fn new(api: Arc<ApiClient>, session_id: impl Into<String>) -> Self {
        Self {
            api,
            session_id: session_id.into(),
            state: Arc::new(RwLock::new(ChatState::default())),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> ChatState {
        self.state.read().clone()
    }

    pub fn dismiss_error(&self) {
        state::dismiss_error(&mut self.state.write());
    }

    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }

    /// Returns false when the text is blank or a request is already in
    /// flight; nothing is appended or sent in either case.
    pub async fn send_text(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.send(ChatOutbound::Text(text.to_string())).await
    }

    pub async fn send_quick_reply(&self, reply: &str) -> bool {
        self.send(ChatOutbound::QuickReply(reply.to_string())).await
    }

    async fn send(&self, outbound: ChatOutbound) -> bool {
        {
            let mut state = self.state.write();
            if !state::begin_send(&mut state, &outbound) {
                debug!("chat send rejected, request already outstanding");
                return false;
            }
        }

        let request = ChatRequest::new(&self.session_id, &outbound);
        let token = self.lifetime.child_token();
        let result = self
            .api
            .post::<ChatResponse, _>("/chat/messages", &request, &token)
            .await;

        let mut state = self.state.write();
        if matches!(result, Err(ApiError::Cancelled)) {
            state.sending = false;
            return true;
        }
        state::apply_response(&mut state, result);
        true
    }
}
