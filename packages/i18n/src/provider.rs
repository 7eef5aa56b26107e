//! The language provider: owns the translation cache, the current language,
//! the helper bundle and the error slot, and sequences locale switches.
//!
//! A switch runs `ready = false` → load (once per code) → helpers →
//! `ready = true` → commit the language → dispatch pending errors. Every state
//! change is published on a [`watch`] channel so consumers can re-render.

use crate::error::I18nError;
use crate::helpers::HelperBundle;
use crate::source::{ErrorHandler, HelperFactory, Loader};
use crate::tree::TranslationTree;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Snapshot handed to readers after every update.
#[derive(Debug, Clone)]
pub struct ProviderState {
    pub lang: String,
    pub ready: bool,
    pub helpers: Option<Arc<HelperBundle>>,
}

/// Helper bundles compare by identity: each switch publishes a fresh one.
impl PartialEq for ProviderState {
    fn eq(&self, other: &Self) -> bool {
        self.lang == other.lang
            && self.ready == other.ready
            && match (&self.helpers, &other.helpers) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// Result of [`I18nContext::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// No load attempt has finished yet; nothing was looked up.
    NotReady,
    /// The path resolved to nothing. A lookup error has been reported.
    Missing,
    Found(TranslationTree),
}

impl Lookup {
    pub fn found(self) -> Option<TranslationTree> {
        match self {
            Lookup::Found(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TranslationTree> {
        match self {
            Lookup::Found(tree) => Some(tree),
            _ => None,
        }
    }

    /// The text at the path, or `""` for anything that is not text.
    pub fn text(&self) -> &str {
        self.as_tree()
            .and_then(TranslationTree::as_text)
            .unwrap_or_default()
    }

    pub fn is_ready(&self) -> bool {
        !matches!(self, Lookup::NotReady)
    }
}

#[derive(Default)]
struct ErrorSlot {
    pending: Option<I18nError>,
    dispatching: bool,
}

struct Inner {
    default_language: String,
    loader: Arc<dyn Loader>,
    helper_factory: Option<Arc<dyn HelperFactory>>,
    error_handler: Option<Arc<dyn ErrorHandler>>,
    languages: RwLock<HashMap<String, Arc<TranslationTree>>>,
    errors: Mutex<ErrorSlot>,
    state: watch::Sender<ProviderState>,
    activated: AtomicBool,
    /// Bumped by `dispose`; switches started under an older value are dropped.
    generation: AtomicU64,
}

impl Inner {
    fn errors(&self) -> MutexGuard<'_, ErrorSlot> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn has_language(&self, lang: &str) -> bool {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(lang)
    }

    fn insert_language(&self, lang: &str, tree: TranslationTree) {
        self.languages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(lang.to_string())
            .or_insert_with(|| Arc::new(tree));
    }

    fn language(&self, lang: &str) -> Option<Arc<TranslationTree>> {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(lang)
            .cloned()
    }

    fn update(&self, f: impl FnOnce(&mut ProviderState) -> bool) {
        self.state.send_if_modified(f);
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn report_error(&self, error: I18nError) {
        let mut slot = self.errors();
        if slot.pending.as_ref() == Some(&error) {
            return;
        }
        warn!("i18n.report_error: {error}");
        slot.pending = Some(error);
    }

    async fn load(&self, lang: &str, generation: u64) -> Result<(), I18nError> {
        if !self.has_language(lang) {
            debug!("i18n.load: lang={lang}");
            let tree = self.loader.load(lang).await.map_err(|err| {
                I18nError::normalize(err, || format!("Failed to load language for \"{lang}\""))
            })?;
            if self.generation() != generation {
                return Ok(());
            }
            self.insert_language(lang, tree);
        }

        if let Some(factory) = &self.helper_factory {
            let bundle = factory.helpers(lang).await.map_err(|err| {
                I18nError::normalize(err, || format!("Failed to load helpers for \"{lang}\""))
            })?;
            if self.generation() != generation {
                return Ok(());
            }
            let bundle = Arc::new(bundle);
            self.update(|state| {
                state.helpers = Some(bundle);
                true
            });
        }
        Ok(())
    }

    async fn set_locale(&self, lang: &str) {
        let generation = self.generation();
        self.update(|state| std::mem::replace(&mut state.ready, false));

        let loaded = self.load(lang, generation).await;
        if self.generation() != generation {
            debug!("i18n.set_locale: lang={lang} dropped after dispose");
            return;
        }
        if let Err(err) = loaded {
            self.report_error(err);
        }

        self.update(|state| !std::mem::replace(&mut state.ready, true));
        self.update(|state| {
            if state.lang == lang {
                return false;
            }
            state.lang = lang.to_string();
            true
        });
        debug!("i18n.set_locale: lang={lang} ready");

        self.on_update().await;
    }

    async fn on_update(&self) {
        let Some(handler) = &self.error_handler else {
            return;
        };
        if !self.state.borrow().ready {
            return;
        }

        let error = {
            let mut slot = self.errors();
            if slot.dispatching {
                return;
            }
            let Some(error) = slot.pending.clone() else {
                return;
            };
            slot.dispatching = true;
            error
        };

        debug!("i18n.on_update: dispatching {}", error.kind());
        handler.handle(error.clone()).await;

        let mut slot = self.errors();
        slot.dispatching = false;
        if slot.pending.as_ref() == Some(&error) {
            slot.pending = None;
        }
    }
}

/// The read channel handed to consumers.
///
/// Cheap to clone; every clone talks to the same provider.
#[derive(Clone)]
pub struct I18nContext {
    inner: Arc<Inner>,
}

impl I18nContext {
    /// Current language code.
    pub fn lang(&self) -> String {
        self.inner.state.borrow().lang.clone()
    }

    /// Whether the last load attempt has finished (successfully or not).
    pub fn ready(&self) -> bool {
        self.inner.state.borrow().ready
    }

    pub fn helpers(&self) -> Option<Arc<HelperBundle>> {
        self.inner.state.borrow().helpers.clone()
    }

    pub fn state(&self) -> ProviderState {
        self.inner.state.borrow().clone()
    }

    /// Switch language. Completes once the switch has been committed;
    /// failures are reported to the error slot, never returned.
    pub async fn set_locale(&self, lang: &str) {
        self.inner.set_locale(lang).await
    }

    pub fn get(&self, path: &str) -> Lookup {
        let lang = {
            let state = self.inner.state.borrow();
            if !state.ready {
                return Lookup::NotReady;
            }
            state.lang.clone()
        };

        let found = self
            .inner
            .language(&lang)
            .and_then(|tree| tree.lookup(path).filter(|v| v.is_truthy()).cloned());
        match found {
            Some(tree) => Lookup::Found(tree),
            None => {
                self.report_error(I18nError::lookup(format!(
                    "Could not find path \"{path}\" in \"{lang}\""
                )));
                Lookup::Missing
            }
        }
    }

    /// Text at `path`, or `""` when not ready or missing.
    pub fn text(&self, path: &str) -> String {
        self.get(path).text().to_string()
    }

    /// Record an error unless it equals the one already pending.
    /// Does not notify; the handler runs on the provider's next update.
    pub fn report_error(&self, error: I18nError) {
        self.inner.report_error(error)
    }

    pub fn clear_last_error(&self) {
        self.inner.errors().pending = None;
    }

    pub fn last_error(&self) -> Option<I18nError> {
        self.inner.errors().pending.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.inner.state.subscribe()
    }
}

impl fmt::Debug for I18nContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18nContext")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Two contexts are equal when they belong to the same provider.
impl PartialEq for I18nContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Owner of the provider state and its lifecycle (`init`, `on_update`,
/// `dispose`). Hand [`I18nProvider::context`] to consumers.
#[derive(Clone, PartialEq)]
pub struct I18nProvider {
    context: I18nContext,
}

impl I18nProvider {
    pub fn builder(
        default_language: impl Into<String>,
        loader: impl Loader + 'static,
    ) -> ProviderBuilder {
        ProviderBuilder::new(default_language, loader)
    }

    pub fn context(&self) -> I18nContext {
        self.context.clone()
    }

    pub fn default_language(&self) -> &str {
        &self.context.inner.default_language
    }

    /// Load the default language. Only the first call after construction or
    /// after [`dispose`](Self::dispose) does anything.
    pub async fn init(&self) {
        let inner = &self.context.inner;
        if inner.activated.swap(true, Ordering::SeqCst) {
            return;
        }
        inner.set_locale(&inner.default_language).await;
    }

    /// Hand the pending error to the error handler, once per distinct error,
    /// when the provider is ready. The slot is cleared afterwards unless a
    /// different error arrived meanwhile.
    pub async fn on_update(&self) {
        self.context.inner.on_update().await
    }

    /// Drop cached languages, helpers and the pending error, and go back to
    /// not ready. Switches still in flight are discarded; the next
    /// [`init`](Self::init) loads the default language again.
    pub fn dispose(&self) {
        let inner = &self.context.inner;
        inner.generation.fetch_add(1, Ordering::SeqCst);
        inner
            .languages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        inner.errors().pending = None;
        inner.update(|state| {
            let changed = state.ready || state.helpers.is_some();
            state.ready = false;
            state.helpers = None;
            changed
        });
        inner.activated.store(false, Ordering::SeqCst);
        debug!("i18n.dispose");
    }

    /// Recovery boundary for errors raised while rendering consumers.
    /// i18n errors are reported; anything else is handed back to the caller.
    pub fn catch(&self, error: anyhow::Error) -> anyhow::Result<()> {
        match error.downcast::<I18nError>() {
            Ok(recognized) => {
                self.context.report_error(recognized);
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Language codes loaded so far.
    pub fn languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .context
            .inner
            .languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        codes.sort();
        codes
    }
}

impl fmt::Debug for I18nProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18nProvider")
            .field("default_language", &self.default_language())
            .field("languages", &self.languages())
            .finish_non_exhaustive()
    }
}

pub struct ProviderBuilder {
    default_language: String,
    loader: Arc<dyn Loader>,
    helper_factory: Option<Arc<dyn HelperFactory>>,
    error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl ProviderBuilder {
    pub fn new(default_language: impl Into<String>, loader: impl Loader + 'static) -> Self {
        Self {
            default_language: default_language.into(),
            loader: Arc::new(loader),
            helper_factory: None,
            error_handler: None,
        }
    }

    pub fn helpers(mut self, factory: impl HelperFactory + 'static) -> Self {
        self.helper_factory = Some(Arc::new(factory));
        self
    }

    pub fn error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> I18nProvider {
        let (state, _) = watch::channel(ProviderState {
            lang: self.default_language.clone(),
            ready: false,
            helpers: None,
        });
        I18nProvider {
            context: I18nContext {
                inner: Arc::new(Inner {
                    default_language: self.default_language,
                    loader: self.loader,
                    helper_factory: self.helper_factory,
                    error_handler: self.error_handler,
                    languages: RwLock::new(HashMap::new()),
                    errors: Mutex::new(ErrorSlot::default()),
                    state,
                    activated: AtomicBool::new(false),
                    generation: AtomicU64::new(0),
                }),
            },
        }
    }
}
