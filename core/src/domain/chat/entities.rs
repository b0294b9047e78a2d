use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// One user-message/assistant-response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatExchange {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_message: String,
    pub ai_response: String,
    pub created_at: DateTime<Utc>,
}

impl ChatExchange {
    pub fn new(user_id: Uuid, user_message: String, ai_response: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            user_message,
            ai_response,
            created_at: now,
        }
    }
}
