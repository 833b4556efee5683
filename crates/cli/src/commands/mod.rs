pub mod chat;
pub mod config_cmd;
pub mod feedback;
pub mod followups;
pub mod models;
pub mod repeat;
pub mod tool;
