pub mod menu_repository;
