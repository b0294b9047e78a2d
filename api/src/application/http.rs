pub mod chat;
pub mod health;
pub mod inflight;
pub mod menu;
pub mod server;
