pub mod chat;
pub mod profile;
