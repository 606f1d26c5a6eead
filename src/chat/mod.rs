// src/chat/mod.rs
// Core chat types shared by the store, the exchange service, and the API.

pub mod service;
pub mod store;

pub use service::{ChatService, Exchange};
pub use store::{ChatStore, SqliteChatStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who authored a message within an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(anyhow::anyhow!("Unknown message role: {}", s)),
        }
    }
}

/// One persisted conversational turn. Messages are append-only: they are
/// created inside an exchange and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub model_tag: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Immutable catalog entry. The tag is the routing key callers use to select
/// a generation backend; insertion order defines display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub tag: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
