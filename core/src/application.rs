use crate::{
    domain::common::{NutriplanConfig, services::Service},
    infrastructure::{
        chat::PostgresChatRepository,
        db::postgres::{Postgres, PostgresConfig},
        llm::OpenAiLlmClient,
        menu::PostgresMenuRepository,
        profile::PostgresProfileRepository,
    },
};

pub type NutriplanService = Service<
    PostgresMenuRepository,
    PostgresChatRepository,
    PostgresProfileRepository,
    OpenAiLlmClient,
>;

/// Wires the domain services to their Postgres and LLM adapters.
pub async fn create_service(config: NutriplanConfig) -> Result<NutriplanService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.connection_url(),
    })
    .await?;
    let db = postgres.get_db();

    Ok(Service::new(
        PostgresMenuRepository::new(db.clone()),
        PostgresChatRepository::new(db.clone()),
        PostgresProfileRepository::new(db),
        OpenAiLlmClient::new(config.llm),
    ))
}
