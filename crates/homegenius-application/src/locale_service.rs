//! Active locale management.
//!
//! Resolution order is persisted choice, runtime language, language match,
//! then the registry default (see [`resolve_locale`]). Changing the locale
//! persists it and notifies subscribers instead of restarting anything.

use homegenius_core::Result;
use homegenius_core::locale::{Label, LocaleConfig, Placeholder, Registry, resolve_locale};
use homegenius_core::state::StateRepository;
use std::sync::Arc;
use tokio::sync::watch;

pub struct LocaleService {
    registry: &'static Registry,
    state_repository: Arc<dyn StateRepository>,
    runtime_language: Option<String>,
    active: watch::Sender<&'static str>,
}

impl LocaleService {
    /// `runtime_language` overrides the OS language when set (config file or
    /// `HOMEGENIUS_LANGUAGE`).
    pub fn new(state_repository: Arc<dyn StateRepository>, runtime_language: Option<String>) -> Self {
        Self::with_registry(Registry::builtin(), state_repository, runtime_language)
    }

    pub fn with_registry(
        registry: &'static Registry,
        state_repository: Arc<dyn StateRepository>,
        runtime_language: Option<String>,
    ) -> Self {
        let (active, _) = watch::channel(registry.default_id());
        Self {
            registry,
            state_repository,
            runtime_language,
            active,
        }
    }

    /// Language reported by the operating system, e.g. `sv-SE`.
    pub fn system_language() -> Option<String> {
        sys_locale::get_locale()
    }

    fn runtime_language(&self) -> Option<String> {
        self.runtime_language
            .clone()
            .or_else(Self::system_language)
    }

    /// Determines and activates the locale for this run.
    pub async fn resolve(&self) -> &'static str {
        let persisted = self.state_repository.get_locale().await;
        let runtime = self.runtime_language();
        let id = resolve_locale(self.registry, persisted.as_deref(), runtime.as_deref());
        tracing::debug!(
            "[LocaleService] Resolved {} (persisted={:?}, runtime={:?})",
            id,
            persisted,
            runtime
        );
        self.active.send_replace(id);
        id
    }

    /// Persists and activates `locale_id`. Identifiers outside the registry
    /// are ignored without error.
    pub async fn set_active(&self, locale_id: &str) -> Result<()> {
        let Some(config) = self.registry.get(locale_id) else {
            tracing::debug!("[LocaleService] Ignoring unknown locale {}", locale_id);
            return Ok(());
        };

        self.state_repository.set_locale(config.id.to_string()).await?;
        if self.active.send_replace(config.id) != config.id {
            tracing::info!("[LocaleService] Active locale is now {}", config.id);
        }
        Ok(())
    }

    pub fn active(&self) -> &'static str {
        *self.active.borrow()
    }

    pub fn active_config(&self) -> &'static LocaleConfig {
        self.registry.config_or_default(self.active())
    }

    pub fn available_locales(&self) -> Vec<&'static str> {
        self.registry.ids().collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<&'static str> {
        self.active.subscribe()
    }

    pub fn format_price(&self, amount: f64) -> String {
        self.active_config().format_price(amount)
    }

    pub fn format_area(&self, area: f64) -> String {
        self.active_config().format_area(area)
    }

    pub fn label(&self, key: Label) -> &'static str {
        self.registry.label(key, self.active())
    }

    pub fn placeholder(&self, key: Placeholder) -> &'static str {
        self.registry.placeholder(key, self.active())
    }
}
