//! View state: who is logged in, which mode is active, and the transcript.
//!
//! The transcript lives only in memory. It is dropped on mode switch,
//! reset and logout.

use crate::error::CoreError;
use crate::gateway::Gateway;
use crate::model::{AppMode, Message, User};
use crate::prompts;

/// Shown in place of a reply when the model call fails.
pub const CHAT_ERROR_REPLY: &str =
    "I encountered an error connecting to the Geography Mentor service.";

#[derive(Debug, Clone)]
pub struct Session {
    user: Option<User>,
    mode: AppMode,
    messages: Vec<Message>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            mode: AppMode::SyllabusDecoder,
            messages: Vec::new(),
            loading: false,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a chat turn is waiting on the model.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Admins land on the dashboard, students on the syllabus decoder.
    pub fn login(&mut self, user: User) {
        let landing = if user.is_admin() {
            AppMode::AdminDashboard
        } else {
            AppMode::SyllabusDecoder
        };
        tracing::info!(username = %user.username, role = %user.role, "session started");
        self.user = Some(user);
        self.enter(landing);
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(username = %user.username, "session ended");
        }
        self.messages.clear();
        self.mode = AppMode::SyllabusDecoder;
    }

    /// Switch to another mode, starting a fresh transcript.
    ///
    /// Selecting the current mode does nothing.
    pub fn switch_mode(&mut self, mode: AppMode) -> Result<(), CoreError> {
        if mode == self.mode {
            return Ok(());
        }
        let user = self.user.as_ref().ok_or(CoreError::NotLoggedIn)?;
        if mode == AppMode::AdminDashboard && !user.is_admin() {
            return Err(CoreError::Forbidden(
                "the admin dashboard requires the admin passcode".into(),
            ));
        }
        self.enter(mode);
        Ok(())
    }

    /// Clear the transcript without changing mode.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Send a chat turn and append the reply (or the error fallback).
    ///
    /// Returns the model message that was appended.
    pub async fn send_message(
        &mut self,
        gateway: &Gateway,
        text: &str,
    ) -> Result<&Message, CoreError> {
        let profile = self
            .user
            .as_ref()
            .ok_or(CoreError::NotLoggedIn)?
            .profile_type;
        if !self.mode.is_chat() {
            return Err(CoreError::NotAChatMode(self.mode.title().to_string()));
        }

        // History excludes the message being sent.
        let history_len = self.messages.len();
        self.messages.push(Message::user(text));
        self.loading = true;

        let reply = match gateway
            .send_chat(&self.messages[..history_len], text, self.mode, profile)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(mode = %self.mode, error = %format!("{e:#}"), "chat request failed");
                CHAT_ERROR_REPLY.to_string()
            }
        };

        self.loading = false;
        self.messages.push(Message::model(reply));
        Ok(&self.messages[self.messages.len() - 1])
    }

    fn enter(&mut self, mode: AppMode) {
        self.mode = mode;
        self.messages.clear();
        let profile = self.user.as_ref().map(|u| u.profile_type).unwrap_or_default();
        if let Some(welcome) = prompts::welcome_message(mode, profile) {
            self.messages.push(Message::model(welcome));
        }
    }
}
