use crate::{domain::chat::entities::ChatExchange, entity::chat_messages};

impl From<&chat_messages::Model> for ChatExchange {
    fn from(model: &chat_messages::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            user_message: model.user_message.clone(),
            ai_response: model.ai_response.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<chat_messages::Model> for ChatExchange {
    fn from(model: chat_messages::Model) -> Self {
        Self::from(&model)
    }
}
