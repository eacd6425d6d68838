// src/core/turn.rs — Conversation turn and mood classification handlers
//
// The reply path surfaces gateway errors to the caller. The classification
// path absorbs them and yields `None`, so mood tracking can never break a turn.

use std::sync::Arc;

use crate::core::conversation::ConversationStore;
use crate::core::mood::{MoodLabel, MoodLedger, MoodLevel, MoodSample};
use crate::core::system_prompt::{build_classifier_prompt, build_system_prompt};
use crate::infra::config::Config;
use crate::infra::errors::CompanionError;
use crate::provider::{ChatRequest, Message, ModelProvider};

/// Per-process knobs for the two gateway calls.
#[derive(Debug, Clone)]
pub struct CompanionSettings {
    pub model: String,
    pub system_prompt: String,
    pub context_window: usize,
    pub reply_max_tokens: u32,
    pub label_max_tokens: u32,
    pub default_level: MoodLevel,
}

impl CompanionSettings {
    pub fn from_config(config: &Config) -> Result<Self, CompanionError> {
        let default_level = MoodLevel::new(config.mood.default_level).ok_or_else(|| {
            CompanionError::Config(format!(
                "mood.default_level must be between 1 and 5, got {}",
                config.mood.default_level
            ))
        })?;

        Ok(Self {
            model: config.gateway.model.clone(),
            system_prompt: build_system_prompt(config.conversation.persona.as_deref()),
            context_window: config.conversation.context_window.max(1),
            reply_max_tokens: config.gateway.reply_max_tokens,
            label_max_tokens: config.gateway.label_max_tokens,
            default_level,
        })
    }
}

impl Default for CompanionSettings {
    fn default() -> Self {
        let config = Config::default();
        Self {
            model: config.gateway.model,
            system_prompt: build_system_prompt(None),
            context_window: config.conversation.context_window,
            reply_max_tokens: config.gateway.reply_max_tokens,
            label_max_tokens: config.gateway.label_max_tokens,
            default_level: MoodLabel::Neutral.level(),
        }
    }
}

/// Handles turns for any number of sessions; session state is passed in.
#[derive(Clone)]
pub struct Companion {
    provider: Arc<dyn ModelProvider>,
    settings: Arc<CompanionSettings>,
}

impl Companion {
    pub fn new(provider: Arc<dyn ModelProvider>, settings: CompanionSettings) -> Self {
        Self {
            provider,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &CompanionSettings {
        &self.settings
    }

    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// System prompt followed by the trailing window of the transcript.
    pub fn build_context(&self, conversation: &ConversationStore) -> Vec<Message> {
        let window = conversation.window(self.settings.context_window);
        let mut messages = Vec::with_capacity(window.len() + 1);
        messages.push(Message::system(self.settings.system_prompt.clone()));
        messages.extend_from_slice(window);
        messages
    }

    /// Validate `text`, record it as the user's message, and build the reply request.
    pub fn prepare_turn(
        &self,
        conversation: &mut ConversationStore,
        text: &str,
    ) -> Result<ChatRequest, CompanionError> {
        if text.trim().is_empty() {
            return Err(CompanionError::Validation("Message cannot be empty".into()));
        }

        conversation.push_user(text);

        Ok(ChatRequest {
            model: self.settings.model.clone(),
            messages: self.build_context(conversation),
            max_tokens: Some(self.settings.reply_max_tokens),
        })
    }

    /// Send a prepared reply request. Gateway errors are returned as-is.
    pub async fn request_reply(&self, request: ChatRequest) -> Result<String, CompanionError> {
        match self.provider.chat(request).await {
            Ok(response) => {
                tracing::debug!(tokens = response.usage.total(), "Reply received");
                Ok(response.content)
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.id(), "Reply failed: {}", e);
                Err(e)
            }
        }
    }

    /// Record the user's message, ask the gateway for a reply, and record the reply.
    ///
    /// The user message is kept even when the gateway call fails; the assistant
    /// message is only appended on success.
    pub async fn submit(
        &self,
        conversation: &mut ConversationStore,
        text: &str,
    ) -> Result<String, CompanionError> {
        let request = self.prepare_turn(conversation, text)?;
        let reply = self.request_reply(request).await?;
        conversation.push_assistant(reply.clone());
        Ok(reply)
    }

    /// Ask the gateway for a single mood label. Any failure yields `None`.
    pub async fn classify(&self, text: &str) -> Option<MoodLevel> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![Message::user(build_classifier_prompt(text))],
            max_tokens: Some(self.settings.label_max_tokens),
        };

        match self.provider.chat(request).await {
            Ok(response) => Some(MoodLevel::from_label(
                &response.content,
                self.settings.default_level,
            )),
            Err(e) => {
                tracing::warn!(provider = self.provider.id(), "Mood classification skipped: {}", e);
                None
            }
        }
    }

    /// Classify `text` and append the result to `ledger`. Nothing is appended on failure.
    pub async fn record_mood(&self, ledger: &mut MoodLedger, text: &str) -> Option<MoodSample> {
        let level = self.classify(text).await?;
        Some(ledger.record(level).clone())
    }
}
