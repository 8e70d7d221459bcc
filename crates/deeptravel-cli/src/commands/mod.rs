pub mod chat;
pub mod config;
pub mod journey;
pub mod launch;
pub mod settings;
