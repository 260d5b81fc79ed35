//! Chat assistant: a running conversation and the completion client it talks to.
//!
//! The full history goes out on every send and the single reply is appended.
//! Failures never surface to the caller as errors; the conversation gets a
//! fixed apology instead, and the cause is logged.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

pub const GREETING: &str =
    "Olá! Sou o assistente virtual da Estação Tech. Como posso ajudar você hoje?";
pub const APOLOGY: &str = "Desculpe, houve um erro ao processar sua solicitação.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a message is already being processed")]
    Busy,
    #[error("chat endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("chat endpoint reply had no message")]
    EmptyReply,
}

/// Sends an ordered conversation and returns the model's single reply.
pub trait ChatClient {
    fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, AssistantError>;
}

#[derive(Debug, Clone)]
pub struct HttpChatConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<ChatMessage>,
}

/// OpenAI-style `chat/completions` over blocking HTTP.
pub struct HttpChatClient {
    client: Client,
    config: HttpChatConfig,
}

impl HttpChatClient {
    pub fn new(config: HttpChatConfig) -> Result<Self, AssistantError> {
        let mut builder = Client::builder();
        if let Some(t) = config.timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

impl ChatClient for HttpChatClient {
    fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, AssistantError> {
        let mut req = self.client.post(&self.config.endpoint).json(&CompletionRequest {
            model: &self.config.model,
            messages,
        });
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: CompletionResponse = resp.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .ok_or(AssistantError::EmptyReply)
    }
}

#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    messages: Vec<ChatMessage>,
    in_flight: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![ChatMessage::assistant(GREETING)],
            in_flight: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Back to the greeting under a fresh id.
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::info!(conversation_id = %self.id, "assistant conversation reset");
    }

    /// Appends the user message and marks the conversation busy. Returns the
    /// history to send. Must be paired with [`Conversation::finish`].
    ///
    /// The stdin loop serializes requests, so `Busy` only fires for callers
    /// that split `begin` and `finish` across their own scheduling.
    pub fn begin(&mut self, content: &str) -> Result<Vec<ChatMessage>, AssistantError> {
        if self.in_flight {
            return Err(AssistantError::Busy);
        }
        if content.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        self.messages.push(ChatMessage::user(content));
        self.in_flight = true;
        Ok(self.messages.clone())
    }

    /// Appends the reply, or the apology when the round trip failed.
    pub fn finish(&mut self, outcome: Result<ChatMessage, AssistantError>) -> &ChatMessage {
        self.in_flight = false;
        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(conversation_id = %self.id, error = %e, "assistant request failed");
                ChatMessage::assistant(APOLOGY)
            }
        };
        self.messages.push(reply);
        &self.messages[self.messages.len() - 1]
    }

    pub fn send(&mut self, client: &dyn ChatClient, content: &str) -> Result<&ChatMessage, AssistantError> {
        let outgoing = self.begin(content)?;
        tracing::debug!(conversation_id = %self.id, messages = outgoing.len(), "assistant request");
        let outcome = client.complete(&outgoing);
        Ok(self.finish(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Echo {
        seen: RefCell<Vec<usize>>,
    }

    impl ChatClient for Echo {
        fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, AssistantError> {
            self.seen.borrow_mut().push(messages.len());
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(ChatMessage::assistant(format!("eco: {last}")))
        }
    }

    struct Down;

    impl ChatClient for Down {
        fn complete(&self, _: &[ChatMessage]) -> Result<ChatMessage, AssistantError> {
            Err(AssistantError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[test]
    fn starts_with_greeting() {
        let c = Conversation::new();
        assert_eq!(c.messages(), &[ChatMessage::assistant(GREETING)]);
        assert!(!c.is_busy());
    }

    #[test]
    fn send_carries_full_history_and_appends_reply() {
        let client = Echo {
            seen: RefCell::new(Vec::new()),
        };
        let mut c = Conversation::new();
        let reply = c.send(&client, "oi").expect("send").clone();
        assert_eq!(reply, ChatMessage::assistant("eco: oi"));
        c.send(&client, "tudo bem?").expect("send");
        assert_eq!(*client.seen.borrow(), vec![2, 4]);
        assert_eq!(c.messages().len(), 5);
        assert!(!c.is_busy());
    }

    #[test]
    fn failure_appends_apology() {
        let mut c = Conversation::new();
        let reply = c.send(&Down, "oi").expect("send").clone();
        assert_eq!(reply, ChatMessage::assistant(APOLOGY));
        assert_eq!(c.messages()[1], ChatMessage::user("oi"));
        assert!(!c.is_busy());
    }

    #[test]
    fn blank_message_leaves_history_alone() {
        let mut c = Conversation::new();
        assert!(matches!(c.send(&Down, "   "), Err(AssistantError::EmptyMessage)));
        assert_eq!(c.messages().len(), 1);
    }

    #[test]
    fn second_send_while_in_flight_is_busy() {
        let mut c = Conversation::new();
        c.begin("primeira").expect("begin");
        assert!(matches!(c.begin("segunda"), Err(AssistantError::Busy)));
        c.finish(Ok(ChatMessage::assistant("ok")));
        assert!(c.begin("terceira").is_ok());
    }

    #[test]
    fn reset_restores_greeting_with_new_id() {
        let mut c = Conversation::new();
        let before = c.id();
        c.send(&Down, "oi").expect("send");
        c.reset();
        assert_ne!(c.id(), before);
        assert_eq!(c.messages().len(), 1);
    }

    #[test]
    fn request_body_is_openai_shaped() {
        let msgs = vec![ChatMessage::assistant(GREETING), ChatMessage::user("oi")];
        let body = serde_json::to_value(CompletionRequest {
            model: "gpt-3.5-turbo",
            messages: &msgs,
        })
        .expect("json");
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][0]["content"], GREETING);
    }
}
