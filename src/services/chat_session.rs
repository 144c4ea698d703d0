use crate::models::applicant::Applicant;
use crate::models::chat::{ChatMessage, ChatResponse};

/// Opening assistant message shown before any user turn.
pub const GREETING: &str = "Olá! Eu sou seu assistente de recrutamento. \
Como posso ajudá-lo a encontrar os melhores candidatos para esta vaga?";

/// Appended instead of an assistant reply when a chat call fails; the turn
/// is never silently dropped.
pub const SEND_FAILURE_MESSAGE: &str =
    "Desculpe, ocorreu um erro ao processar sua mensagem. Tente novamente.";

/// Append-only transcript for one workbook-viewing session, plus the opaque
/// session identifier the backend assigns so it can keep conversational
/// context across turns. Held only in memory.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    session_id: Option<String>,
    pending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            session_id: None,
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// One chat call in flight at a time; input is disabled while pending.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Synchronous half of a send: the user message is appended before the
    /// network call is awaited.
    pub fn begin_turn(&mut self, message: &str) {
        self.messages.push(ChatMessage::user(message));
        self.pending = true;
    }

    /// Record a successful response. The first response carrying a
    /// session id pins it for the rest of this viewing session. Returns
    /// the filtered candidates, if the backend sent a non-empty list, for
    /// the reconciler to take as a wholesale replacement.
    pub fn complete_turn(&mut self, response: ChatResponse) -> Option<Vec<Applicant>> {
        if self.session_id.is_none() {
            if let Some(id) = &response.session_id {
                self.session_id = Some(id.clone());
            }
        }

        let mut reply = ChatMessage::assistant(response.response);
        reply.filtered_candidates = response.filtered_candidates.clone();
        reply.total_candidates = response.total_candidates;
        self.messages.push(reply);
        self.pending = false;

        response
            .filtered_candidates
            .filter(|candidates| !candidates.is_empty())
    }

    /// Degrade a failed send to the fixed apology message.
    pub fn fail_turn(&mut self) {
        self.messages.push(ChatMessage::assistant(SEND_FAILURE_MESSAGE));
        self.pending = false;
    }
}
