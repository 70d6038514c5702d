//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use fernway_core::popup::PopupConfig;

use crate::config::StorefrontConfig;
use crate::db;
use crate::db::customer_state::CustomerStateRepository;

/// How long a published popup config may be served from cache before the
/// settings store is consulted again.
const POPUP_CONFIG_TTL: Duration = Duration::from_secs(30);

const POPUP_CONFIG_KEY: &str = "popup";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    customer_state: CustomerStateRepository,
    popup_config: Cache<&'static str, PopupConfig>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let customer_state = CustomerStateRepository::new(pool.clone());
        let popup_config = Cache::builder()
            .max_capacity(1)
            .time_to_live(POPUP_CONFIG_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                customer_state,
                popup_config,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the customer state repository.
    #[must_use]
    pub fn customer_state(&self) -> &CustomerStateRepository {
        &self.inner.customer_state
    }

    /// The currently published popup config.
    ///
    /// Served from a short-TTL cache over the `shop.settings` store. A
    /// missing, malformed, or unreadable stored config degrades to the
    /// default (disabled) config rather than erroring - the popup is an
    /// enhancement, never a page-breaking dependency.
    pub async fn popup_config(&self) -> PopupConfig {
        if let Some(config) = self.inner.popup_config.get(POPUP_CONFIG_KEY).await {
            return config;
        }

        let config = match db::settings::get_setting(self.pool(), POPUP_CONFIG_KEY).await {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("stored popup config is malformed, treating as absent: {e}");
                PopupConfig::default()
            }),
            Ok(None) => PopupConfig::default(),
            Err(e) => {
                tracing::warn!("failed to read popup config, serving disabled config: {e}");
                PopupConfig::default()
            }
        };

        self.inner
            .popup_config
            .insert(POPUP_CONFIG_KEY, config.clone())
            .await;
        config
    }
}
