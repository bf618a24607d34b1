pub mod auth;
pub mod data;
pub mod health;
pub mod stats;
pub mod vocabulary;
pub mod wordlists;
