use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        chat::{entities::ChatExchange, ports::ChatRepository},
        common::entities::app_errors::CoreError,
    },
    entity::chat_messages::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresChatRepository {
    pub db: DatabaseConnection,
}

impl PostgresChatRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ChatRepository for PostgresChatRepository {
    async fn create_exchange(&self, exchange: ChatExchange) -> Result<ChatExchange, CoreError> {
        let model = ActiveModel {
            id: Set(exchange.id),
            user_id: Set(exchange.user_id),
            user_message: Set(exchange.user_message.clone()),
            ai_response: Set(exchange.ai_response.clone()),
            created_at: Set(exchange.created_at.fixed_offset()),
        };

        let created = Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to save chat message: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(ChatExchange::from(created))
    }

    async fn get_recent(&self, user_id: Uuid, limit: u32) -> Result<Vec<ChatExchange>, CoreError> {
        let models = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get chat history: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.iter().map(ChatExchange::from).collect())
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to clear chat history: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
