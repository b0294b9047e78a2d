use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    chat::{
        entities::ChatExchange,
        value_objects::{ChatReply, Language},
    },
    common::entities::app_errors::CoreError,
};

/// Repository trait for chat history persistence
#[cfg_attr(test, mockall::automock)]
pub trait ChatRepository: Send + Sync {
    fn create_exchange(
        &self,
        exchange: ChatExchange,
    ) -> impl Future<Output = Result<ChatExchange, CoreError>> + Send;

    /// Most recent exchanges, newest first.
    fn get_recent(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<ChatExchange>, CoreError>> + Send;

    fn clear(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for the nutrition chat assistant
#[cfg_attr(test, mockall::automock)]
pub trait ChatService: Send + Sync {
    /// Always produces some response; provider failures fall back to the
    /// keyword rule table.
    fn process_message(
        &self,
        user_id: Uuid,
        message: String,
        language: Language,
    ) -> impl Future<Output = Result<ChatReply, CoreError>> + Send;

    /// Chronological (oldest first) history, bounded by `limit`.
    fn get_history(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<Vec<ChatExchange>, CoreError>> + Send;

    fn clear_history(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
