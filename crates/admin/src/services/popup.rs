//! Popup campaign service.
//!
//! The builder UI edits a working copy client-side; this service is the
//! commit point. `publish` validates and commits the working copy as the
//! new published config, `load` returns the last-committed config (which
//! is also what "Reset" re-fetches to discard a working copy).

use sqlx::PgPool;

use fernway_core::popup::{PopupConfig, PopupConfigError};

use crate::db::settings::{self, SettingsError};

/// Settings key the published popup config is stored under.
pub const POPUP_SETTINGS_KEY: &str = "popup";

/// Errors from publishing a popup config.
#[derive(Debug, thiserror::Error)]
pub enum PopupPublishError {
    /// The working copy failed validation.
    #[error("invalid popup config: {0}")]
    Invalid(#[from] PopupConfigError),
    /// The settings store rejected the commit.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Popup campaign service.
pub struct PopupService<'a> {
    pool: &'a PgPool,
}

impl<'a> PopupService<'a> {
    /// Create a new popup service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The last-committed popup config.
    ///
    /// An absent or malformed stored config is treated as the default
    /// (disabled) config, never an error - the builder always has
    /// something to load.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store is unreachable.
    pub async fn load(&self) -> Result<PopupConfig, SettingsError> {
        let stored = settings::get_setting(self.pool, POPUP_SETTINGS_KEY).await?;

        Ok(stored
            .map(|value| {
                serde_json::from_value(value).unwrap_or_else(|e| {
                    tracing::warn!("stored popup config is malformed, loading defaults: {e}");
                    PopupConfig::default()
                })
            })
            .unwrap_or_default())
    }

    /// Validate and commit a working copy as the published config.
    ///
    /// # Errors
    ///
    /// Returns `PopupPublishError::Invalid` if the working copy fails
    /// validation, or `PopupPublishError::Settings` if the commit fails.
    /// Nothing is written on a validation failure.
    pub async fn publish(&self, config: &PopupConfig) -> Result<(), PopupPublishError> {
        config.validate()?;

        let value = serde_json::to_value(config).map_err(SettingsError::from)?;
        settings::set_setting(self.pool, POPUP_SETTINGS_KEY, &value).await?;

        tracing::info!(enabled = config.enabled, "popup config published");
        Ok(())
    }
}
