use clap::Parser;
use nutriplan_core::domain::common::{AuthConfig, DatabaseConfig, LlmConfig, NutriplanConfig};

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value = "3333")]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "/api")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct DatabaseArgs {
    #[arg(long = "db-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "db-port", env = "DATABASE_PORT", default_value = "5432")]
    pub port: u16,

    #[arg(long = "db-user", env = "DATABASE_USER", default_value = "postgres")]
    pub username: String,

    #[arg(long = "db-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "db-name", env = "DATABASE_NAME", default_value = "nutriplan")]
    pub name: String,
}

#[derive(Debug, Clone, Parser)]
pub struct LlmArgs {
    /// Without a key the API still serves menus from storage and the chat
    /// falls back to rule-based answers.
    #[arg(long = "llm-api-key", env = "OPENAI_API_KEY")]
    pub api_key: Option<String>,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    #[arg(
        long = "llm-base-url",
        env = "LLM_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub base_url: String,
}

#[derive(Debug, Clone, Parser)]
pub struct AuthArgs {
    #[arg(long = "jwt-secret", env = "JWT_SECRET")]
    pub jwt_secret: String,
}

impl From<Args> for NutriplanConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.username,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LlmConfig {
                api_key: args.llm.api_key,
                model: args.llm.model,
                base_url: args.llm.base_url,
            },
            auth: AuthConfig {
                jwt_secret: args.auth.jwt_secret,
            },
        }
    }
}
