use crate::domain::{
    chat::ports::ChatRepository, common::ports::LlmClient, menu::ports::MenuRepository,
    profile::ports::ProfileRepository,
};

/// Aggregate service holding one implementation of each port. Domain service
/// traits (`MenuService`, `ChatService`) are implemented for this struct.
#[derive(Debug, Clone)]
pub struct Service<M, C, P, L>
where
    M: MenuRepository,
    C: ChatRepository,
    P: ProfileRepository,
    L: LlmClient,
{
    pub(crate) menu_repository: M,
    pub(crate) chat_repository: C,
    pub(crate) profile_repository: P,
    pub(crate) llm_client: L,
}

impl<M, C, P, L> Service<M, C, P, L>
where
    M: MenuRepository,
    C: ChatRepository,
    P: ProfileRepository,
    L: LlmClient,
{
    pub fn new(menu_repository: M, chat_repository: C, profile_repository: P, llm_client: L) -> Self {
        Self {
            menu_repository,
            chat_repository,
            profile_repository,
            llm_client,
        }
    }
}
