// src/chat/store.rs

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use super::{Message, Model, Role};

/// Persistence boundary for the chat pipeline.
///
/// Messages are insert-only and reads are filter-and-order selects; no
/// update or delete operations exist on this surface. The trait seam lets
/// the exchange service run against a fake store in tests.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Persist a new message and return the stored record.
    async fn insert_message(
        &self,
        user_id: &str,
        model_tag: &str,
        role: Role,
        content: &str,
    ) -> Result<Message>;

    /// All messages for a user, oldest first, optionally filtered to one
    /// model tag.
    async fn list_messages(&self, user_id: &str, model_tag: Option<&str>) -> Result<Vec<Message>>;

    /// The model catalog in display order (ascending creation time).
    async fn list_models(&self) -> Result<Vec<Model>>;
}

pub struct SqliteChatStore {
    pub pool: SqlitePool,
}

impl SqliteChatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_message(&self, row: SqliteRow) -> Result<Message> {
        let role: String = row.get("role");
        let created_at: NaiveDateTime = row.get("created_at");

        Ok(Message {
            id: row.get("id"),
            user_id: row.get("user_id"),
            model_tag: row.get("model_tag"),
            role: Role::from_str(&role)?,
            content: row.get("content"),
            created_at: Utc.from_utc_datetime(&created_at),
        })
    }

    fn row_to_model(&self, row: SqliteRow) -> Result<Model> {
        let created_at: NaiveDateTime = row.get("created_at");

        Ok(Model {
            id: row.get("id"),
            tag: row.get("tag"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: Utc.from_utc_datetime(&created_at),
        })
    }
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    async fn insert_message(
        &self,
        user_id: &str,
        model_tag: &str,
        role: Role,
        content: &str,
    ) -> Result<Message> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO messages (id, user_id, model_tag, role, content, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(model_tag)
        .bind(role.as_str())
        .bind(content)
        .bind(now.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(Message {
            id,
            user_id: user_id.to_string(),
            model_tag: model_tag.to_string(),
            role,
            content: content.to_string(),
            created_at: now,
        })
    }

    async fn list_messages(&self, user_id: &str, model_tag: Option<&str>) -> Result<Vec<Message>> {
        let rows = match model_tag {
            Some(tag) => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, model_tag, role, content, created_at
                    FROM messages
                    WHERE user_id = ? AND model_tag = ?
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(user_id)
                .bind(tag)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, model_tag, role, content, created_at
                    FROM messages
                    WHERE user_id = ?
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter()
            .map(|row| self.row_to_message(row))
            .collect()
    }

    async fn list_models(&self) -> Result<Vec<Model>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tag, name, description, created_at
            FROM models
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_model(row)).collect()
    }
}
