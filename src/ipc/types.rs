use crate::assistant::{ChatClient, Conversation};
use crate::session::Session;
use crate::store::EntityStore;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: EntityStore,
    pub session: Session,
    pub conversation: Conversation,
    pub chat: Box<dyn ChatClient>,
    pub seed: u64,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(store: EntityStore, chat: Box<dyn ChatClient>, seed: u64, today: NaiveDate) -> Self {
        Self {
            store,
            session: Session::new(),
            conversation: Conversation::new(),
            chat,
            seed,
            today,
        }
    }
}
