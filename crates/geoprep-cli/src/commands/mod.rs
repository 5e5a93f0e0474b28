//! Subcommand implementations and the setup they share.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use geoprep_core::auth::{self, AuthOutcome, LoginRequest};
use geoprep_core::gateway::Gateway;
use geoprep_core::model::User;
use geoprep_core::storage::{FileStore, LogBook, UserDirectory};
use geoprep_providers::config::load_config_from;
use geoprep_providers::{create_provider, GeoprepConfig};

pub mod ask;
pub mod chat;
pub mod clear_logs;
pub mod dashboard;
pub mod evaluate;
pub mod history;
pub mod init;
pub mod list_models;
pub mod signup;
pub mod topics;

/// Global path options.
pub struct Paths {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Loaded configuration plus the store it points at.
pub struct AppContext {
    pub config: GeoprepConfig,
    pub store: FileStore,
}

impl AppContext {
    pub fn load(paths: &Paths) -> Result<Self> {
        let config = load_config_from(paths.config.as_deref())?;
        let data_dir = paths
            .data_dir
            .clone()
            .unwrap_or_else(|| config.data_dir.clone());
        tracing::debug!(data_dir = %data_dir.display(), "using data directory");
        Ok(Self {
            config,
            store: FileStore::new(data_dir),
        })
    }

    pub fn directory(&self) -> UserDirectory<'_> {
        UserDirectory::new(&self.store)
    }

    pub fn logbook(&self) -> LogBook<'_> {
        LogBook::new(&self.store)
    }

    /// Build the gateway over the default provider.
    pub fn gateway(&self) -> Result<Gateway> {
        let (name, provider_config) = self.config.provider(None)?;
        let provider = create_provider(name, provider_config)
            .with_context(|| format!("failed to create provider '{name}'"))?;
        Ok(Gateway::new(Arc::from(provider), self.config.gateway_config()))
    }

    /// Log a student in with username and password.
    pub fn login_student(&self, username: String, password: String) -> Result<User> {
        match auth::login(
            &self.directory(),
            LoginRequest::Login { username, password },
            &self.config.admin_passcode,
        )? {
            AuthOutcome::LoggedIn(user) => Ok(user),
            AuthOutcome::Registered { .. } => anyhow::bail!("unexpected signup outcome"),
        }
    }

    /// Check the admin passcode.
    pub fn require_admin(&self, passcode: String) -> Result<User> {
        match auth::login(
            &self.directory(),
            LoginRequest::Admin { passcode },
            &self.config.admin_passcode,
        )? {
            AuthOutcome::LoggedIn(user) => Ok(user),
            AuthOutcome::Registered { .. } => anyhow::bail!("unexpected signup outcome"),
        }
    }
}
