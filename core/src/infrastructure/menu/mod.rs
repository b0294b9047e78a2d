pub mod mappers;
pub mod repositories;

pub use repositories::menu_repository::PostgresMenuRepository;
