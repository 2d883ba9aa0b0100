//! Translation service with lazily loaded backends.
//!
//! The model handle moves through `Uninitialized → Loading → Ready | Failed`.
//! Loading happens at most once at a time: concurrent callers wait on the
//! same initialization and share its result. A failed load is retried by the
//! next request.

pub mod hosted;

use crate::config::{BackendKind, ServerConfig};
use crate::error::{Error, Result};
use crate::translate::{RuleBasedTranslator, RuleTable};
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub use hosted::{HostedConfig, HostedLoader, HostedTranslator, PromptStyle};

/// Something that turns formal text into slang.
#[async_trait]
pub trait Translator: fmt::Debug + Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn translate(&self, formal_text: &str) -> Result<String>;
}

/// Produces a ready [`Translator`].
#[async_trait]
pub trait TranslatorLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Translator>>;
}

#[async_trait]
impl Translator for RuleBasedTranslator {
    fn name(&self) -> &str {
        "rules"
    }

    async fn translate(&self, formal_text: &str) -> Result<String> {
        Ok(self.rules().translate(formal_text))
    }
}

/// Loader for the rule-based translator. Never fails.
#[derive(Debug, Clone)]
pub struct RuleLoader {
    rules: Arc<RuleTable>,
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self {
            rules: RuleTable::builtin(),
        }
    }
}

impl RuleLoader {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl TranslatorLoader for RuleLoader {
    async fn load(&self) -> Result<Arc<dyn Translator>> {
        Ok(Arc::new(RuleBasedTranslator::new(Arc::clone(&self.rules))))
    }
}

/// Lifecycle of the model handle.
#[derive(Clone)]
pub enum ModelState {
    Uninitialized,
    Loading,
    Ready(Arc<dyn Translator>),
    Failed(String),
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Uninitialized => write!(f, "Uninitialized"),
            ModelState::Loading => write!(f, "Loading"),
            ModelState::Ready(t) => write!(f, "Ready({})", t.name()),
            ModelState::Failed(reason) => write!(f, "Failed({reason})"),
        }
    }
}

/// State summary without the translator itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

/// Lazily initialized translator.
pub struct ModelHandle {
    loader: Arc<dyn TranslatorLoader>,
    state: RwLock<ModelState>,
    init: Mutex<()>,
    load_attempts: AtomicUsize,
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("state", &self.state())
            .field("load_attempts", &self.load_attempts())
            .finish()
    }
}

impl ModelHandle {
    pub fn new(loader: Arc<dyn TranslatorLoader>) -> Self {
        Self {
            loader,
            state: RwLock::new(ModelState::Uninitialized),
            init: Mutex::new(()),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ModelState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn status(&self) -> ModelStatus {
        match *self.state.read().unwrap_or_else(|e| e.into_inner()) {
            ModelState::Uninitialized => ModelStatus::Uninitialized,
            ModelState::Loading => ModelStatus::Loading,
            ModelState::Ready(_) => ModelStatus::Ready,
            ModelState::Failed(_) => ModelStatus::Failed,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.status() == ModelStatus::Ready
    }

    /// Number of times the loader has been invoked.
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }

    fn set_state(&self, state: ModelState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
    }

    fn ready(&self) -> Option<Arc<dyn Translator>> {
        match &*self.state.read().unwrap_or_else(|e| e.into_inner()) {
            ModelState::Ready(translator) => Some(Arc::clone(translator)),
            _ => None,
        }
    }

    /// Returns the loaded translator, loading it first if needed.
    pub async fn get_or_load(&self) -> Result<Arc<dyn Translator>> {
        if let Some(translator) = self.ready() {
            return Ok(translator);
        }

        let _guard = self.init.lock().await;

        // Another task may have finished loading while we waited
        if let Some(translator) = self.ready() {
            return Ok(translator);
        }

        self.set_state(ModelState::Loading);
        self.load_attempts.fetch_add(1, Ordering::SeqCst);

        let mut loading = LoadingGuard {
            handle: self,
            finished: false,
        };
        let loaded = self.loader.load().await;
        loading.finished = true;

        match loaded {
            Ok(translator) => {
                info!("Translator '{}' ready", translator.name());
                self.set_state(ModelState::Ready(Arc::clone(&translator)));
                Ok(translator)
            }
            Err(e) => {
                error!("Failed to load model: {e}");
                self.set_state(ModelState::Failed(e.to_string()));
                Err(match e {
                    Error::ModelUnavailable(_) => e,
                    other => Error::ModelUnavailable(other.to_string()),
                })
            }
        }
    }
}

/// Puts a `Loading` handle back to `Uninitialized` if the load future is
/// dropped before the loader returns.
struct LoadingGuard<'a> {
    handle: &'a ModelHandle,
    finished: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Model load was cancelled");
            self.handle.set_state(ModelState::Uninitialized);
        }
    }
}

/// Result of a service translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub formal: String,
    pub informal: String,
    /// Name of the translator that answered.
    pub backend: String,
    /// True if the rule-based fallback answered because the model failed to load.
    pub degraded: bool,
}

/// Request-facing translation service.
#[derive(Debug)]
pub struct TranslationService {
    model: ModelHandle,
    fallback: Option<RuleBasedTranslator>,
}

impl TranslationService {
    pub fn new(loader: Arc<dyn TranslatorLoader>) -> Self {
        Self {
            model: ModelHandle::new(loader),
            fallback: None,
        }
    }

    /// Service backed only by the built-in rule table.
    pub fn rules_only() -> Self {
        Self::new(Arc::new(RuleLoader::default()))
    }

    /// Builds the service described by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        let service = match config.backend {
            BackendKind::Rules => Self::rules_only(),
            BackendKind::Hosted => Self::new(Arc::new(HostedLoader::new(config.hosted.clone()))),
        };

        if config.fallback_to_rules && config.backend != BackendKind::Rules {
            service.with_rule_fallback(RuleBasedTranslator::default())
        } else {
            service
        }
    }

    /// Answers with `translator` when the model cannot be loaded.
    pub fn with_rule_fallback(mut self, translator: RuleBasedTranslator) -> Self {
        self.fallback = Some(translator);
        self
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    /// Translates `text`, loading the model on first use.
    pub async fn translate(&self, text: &str) -> Result<TranslationOutcome> {
        let formal = text.trim();
        if formal.is_empty() {
            return Err(Error::EmptyInput);
        }

        let translator = match self.model.get_or_load().await {
            Ok(translator) => translator,
            Err(e) => {
                let Some(rules) = &self.fallback else {
                    return Err(e);
                };
                warn!("Model unavailable, using rule-based fallback: {e}");
                return Ok(TranslationOutcome {
                    formal: formal.to_string(),
                    informal: rules.translate(formal),
                    backend: "rules".to_string(),
                    degraded: true,
                });
            }
        };

        let informal = translator.translate(formal).await?;
        Ok(TranslationOutcome {
            formal: formal.to_string(),
            informal,
            backend: translator.name().to_string(),
            degraded: false,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Duration;

    /// Loader that fails a fixed number of times before succeeding.
    pub(crate) struct FlakyLoader {
        failures_left: AtomicUsize,
        delay: Duration,
    }

    impl FlakyLoader {
        pub(crate) fn new(failures: usize) -> Self {
            Self {
                failures_left: AtomicUsize::new(failures),
                delay: Duration::from_millis(0),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl TranslatorLoader for FlakyLoader {
        async fn load(&self) -> Result<Arc<dyn Translator>> {
            tokio::time::sleep(self.delay).await;
            let remaining = self.failures_left.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures_left.store(remaining - 1, Ordering::SeqCst);
                return Err(Error::ModelUnavailable("out of memory".into()));
            }
            Ok(Arc::new(RuleBasedTranslator::default()))
        }
    }

    #[tokio::test]
    async fn test_lazy_load_on_first_use() {
        let handle = ModelHandle::new(Arc::new(RuleLoader::default()));
        assert_eq!(handle.status(), ModelStatus::Uninitialized);
        assert!(!handle.is_loaded());

        let translator = handle.get_or_load().await.unwrap();
        assert_eq!(translator.name(), "rules");
        assert!(handle.is_loaded());

        handle.get_or_load().await.unwrap();
        assert_eq!(handle.load_attempts(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let handle = ModelHandle::new(Arc::new(FlakyLoader::new(1)));

        let err = handle.get_or_load().await.unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
        assert_eq!(handle.status(), ModelStatus::Failed);
        assert!(matches!(handle.state(), ModelState::Failed(ref r) if r.contains("out of memory")));

        handle.get_or_load().await.unwrap();
        assert_eq!(handle.status(), ModelStatus::Ready);
        assert_eq!(handle.load_attempts(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_requests_load_once() {
        let loader = FlakyLoader::new(0).with_delay(Duration::from_millis(50));
        let handle = Arc::new(ModelHandle::new(Arc::new(loader)));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let handle = Arc::clone(&handle);
                tokio::spawn(async move { handle.get_or_load().await.map(|_| ()) })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(handle.load_attempts(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_load_resets_state() {
        let loader = FlakyLoader::new(0).with_delay(Duration::from_secs(30));
        let handle = Arc::new(ModelHandle::new(Arc::new(loader)));

        let task = {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.get_or_load().await.map(|_| ()) })
        };
        while handle.status() != ModelStatus::Loading {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert_eq!(handle.status(), ModelStatus::Uninitialized);
        assert_eq!(handle.load_attempts(), 1);
    }

    #[tokio::test]
    async fn test_service_rejects_empty_text() {
        let service = TranslationService::rules_only();
        let err = service.translate("   ").await.unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
        assert!(!service.is_model_loaded());
    }

    #[tokio::test]
    async fn test_service_rules_backend() {
        let service = TranslationService::rules_only();
        let outcome = service.translate(" please wait a moment ").await.unwrap();
        assert_eq!(outcome.formal, "please wait a moment");
        assert_eq!(outcome.informal, "hang on a sec");
        assert_eq!(outcome.backend, "rules");
        assert!(!outcome.degraded);
        assert!(service.is_model_loaded());
    }

    #[tokio::test]
    async fn test_service_degrades_to_rules() {
        let service = TranslationService::new(Arc::new(FlakyLoader::new(usize::MAX)))
            .with_rule_fallback(RuleBasedTranslator::default());

        let outcome = service.translate("thank you").await.unwrap();
        assert_eq!(outcome.informal, "thanks");
        assert!(outcome.degraded);
        assert!(!service.is_model_loaded());
    }

    #[tokio::test]
    async fn test_service_without_fallback_reports_unavailable() {
        let service = TranslationService::new(Arc::new(FlakyLoader::new(usize::MAX)));
        let err = service.translate("thank you").await.unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn test_from_config_selects_backend() {
        let rules = TranslationService::from_config(&ServerConfig::default());
        assert!(rules.fallback.is_none());

        let hosted =
            TranslationService::from_config(&ServerConfig::default().with_backend(BackendKind::Hosted));
        assert!(hosted.fallback.is_some());
    }
}
