pub mod auth;
pub mod gemini;
pub mod progress;
pub mod stats;
pub mod user_data;
pub mod vocabulary;
pub mod word_lists;
