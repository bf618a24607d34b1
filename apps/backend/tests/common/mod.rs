//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory store
//! - A canned vocabulary generator
//! - Authentication helpers

#![allow(dead_code)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use vocab_backend::db::{MemoryStore, Store};
use vocab_backend::models::UserData;
use vocab_backend::services::gemini::{GenerateError, VocabularyGenerator};
use vocab_backend::{build_router, AppState};

/// Generator that always answers with the same text and records prompts.
pub struct StubGenerator {
    reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl VocabularyGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

/// Test context holding the store and the router built on it.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub generator: Option<Arc<StubGenerator>>,
    app: Router,
}

impl TestContext {
    /// Context without a generator, like a server with no API key.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Context whose generator answers every prompt with `reply`.
    pub fn with_generator(reply: &str) -> Self {
        Self::build(Some(Arc::new(StubGenerator::new(reply))))
    }

    fn build(generator: Option<Arc<StubGenerator>>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            store.clone(),
            generator
                .clone()
                .map(|g| g as Arc<dyn VocabularyGenerator>),
        );
        let app = build_router(state, &[]);

        Self {
            store,
            generator,
            app,
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Register a user and return `(user json, token)`.
    pub async fn register(server: &TestServer, username: &str) -> (Value, String) {
        let response = server
            .post("/api/auth/register")
            .json(&fixtures::registration(username))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        let token = body["token"].as_str().unwrap().to_string();
        (body["user"].clone(), token)
    }

    /// Authorization header pair for a token.
    pub fn auth(token: &str) -> (HeaderName, HeaderValue) {
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
    }

    /// Read a stored blob straight from the store.
    pub async fn store_data(&self, user_id: &str, data_type: &str) -> UserData {
        self.store
            .get_user_data(user_id, data_type)
            .await
            .unwrap()
            .expect("blob should exist")
    }

    /// Create a list with the given words and return its json.
    pub async fn create_list(server: &TestServer, token: &str, words: &[(&str, &str)]) -> Value {
        let (name, value) = Self::auth(token);
        let response = server
            .post("/api/wordlists")
            .add_header(name, value)
            .json(&fixtures::word_list_request("Daily life", words))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }
}
