// tests/common/mod.rs — Scripted gateway shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use wellness_companion::core::turn::{Companion, CompanionSettings};
use wellness_companion::infra::errors::CompanionError;
use wellness_companion::provider::*;

/// How the mock answers one kind of call.
#[derive(Clone)]
pub enum Outcome {
    Text(String),
    /// Answer with the text after sleeping for the given time.
    Slow(Duration, String),
    Fail,
}

impl Outcome {
    pub fn text(s: &str) -> Self {
        Outcome::Text(s.to_string())
    }
}

/// Routes requests by shape: a leading system message is a reply call,
/// anything else is a classification call. Records every request.
pub struct MockProvider {
    reply: Mutex<Outcome>,
    label: Mutex<Outcome>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    pub fn new(reply: Outcome, label: Outcome) -> Self {
        Self {
            reply: Mutex::new(reply),
            label: Mutex::new(label),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Outcome) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn reply_requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| is_reply_call(r))
            .cloned()
            .collect()
    }

    pub fn label_requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !is_reply_call(r))
            .cloned()
            .collect()
    }
}

fn is_reply_call(request: &ChatRequest) -> bool {
    request
        .messages
        .first()
        .is_some_and(|m| m.role == Role::System)
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Gateway"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, CompanionError> {
        let outcome = if is_reply_call(&request) {
            self.reply.lock().unwrap().clone()
        } else {
            self.label.lock().unwrap().clone()
        };
        self.requests.lock().unwrap().push(request);

        if let Outcome::Slow(delay, _) = &outcome {
            tokio::time::sleep(*delay).await;
        }

        match outcome {
            Outcome::Text(content) | Outcome::Slow(_, content) => Ok(ChatResponse {
                content,
                usage: TokenUsage {
                    input_tokens: 20,
                    output_tokens: 5,
                },
            }),
            Outcome::Fail => Err(CompanionError::Upstream {
                provider: "mock".into(),
                message: "scripted failure".into(),
            }),
        }
    }
}

pub fn companion_with(reply: Outcome, label: Outcome) -> (Companion, Arc<MockProvider>) {
    let mock = Arc::new(MockProvider::new(reply, label));
    let provider: Arc<dyn ModelProvider> = mock.clone();
    (Companion::new(provider, CompanionSettings::default()), mock)
}
