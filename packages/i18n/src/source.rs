//! Where languages, helpers and error reports come from.
//!
//! The provider only talks to the three traits below. Closures plug in through
//! [`SyncFn`] (plain values) and [`AsyncFn`] (futures).

use crate::error::I18nError;
use crate::helpers::HelperBundle;
use crate::tree::TranslationTree;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;

/// Produces the translation tree for a language code.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, lang: &str) -> Result<TranslationTree>;
}

/// Produces the helper bundle for a language code.
#[async_trait]
pub trait HelperFactory: Send + Sync {
    async fn helpers(&self, lang: &str) -> Result<HelperBundle>;
}

/// Receives each distinct reported error once the provider is ready.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn handle(&self, error: I18nError);
}

/// Adapter for synchronous closures.
pub struct SyncFn<F>(pub F);

/// Adapter for closures returning a future.
pub struct AsyncFn<F>(pub F);

#[async_trait]
impl<F> Loader for SyncFn<F>
where
    F: Fn(&str) -> Result<TranslationTree> + Send + Sync,
{
    async fn load(&self, lang: &str) -> Result<TranslationTree> {
        (self.0)(lang)
    }
}

#[async_trait]
impl<F, Fut> Loader for AsyncFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TranslationTree>> + Send + 'static,
{
    async fn load(&self, lang: &str) -> Result<TranslationTree> {
        (self.0)(lang.to_string()).await
    }
}

#[async_trait]
impl<F> HelperFactory for SyncFn<F>
where
    F: Fn(&str) -> Result<HelperBundle> + Send + Sync,
{
    async fn helpers(&self, lang: &str) -> Result<HelperBundle> {
        (self.0)(lang)
    }
}

#[async_trait]
impl<F, Fut> HelperFactory for AsyncFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HelperBundle>> + Send + 'static,
{
    async fn helpers(&self, lang: &str) -> Result<HelperBundle> {
        (self.0)(lang.to_string()).await
    }
}

#[async_trait]
impl<F> ErrorHandler for SyncFn<F>
where
    F: Fn(&I18nError) + Send + Sync,
{
    async fn handle(&self, error: I18nError) {
        (self.0)(&error)
    }
}

#[async_trait]
impl<F, Fut> ErrorHandler for AsyncFn<F>
where
    F: Fn(I18nError) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn handle(&self, error: I18nError) {
        (self.0)(error).await
    }
}

/// Serves trees that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    languages: HashMap<String, TranslationTree>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: impl Into<String>, tree: TranslationTree) -> Self {
        self.languages.insert(lang.into(), tree);
        self
    }
}

#[async_trait]
impl Loader for StaticLoader {
    async fn load(&self, lang: &str) -> Result<TranslationTree> {
        self.languages
            .get(lang)
            .cloned()
            .ok_or_else(|| anyhow!("Not found \"{lang}\""))
    }
}

/// Reads `<dir>/<lang>.json`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonDirLoader {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonDirLoader {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, lang: &str) -> Result<std::path::PathBuf> {
        // Codes become file names; keep them from walking out of `dir`.
        if lang.is_empty() || lang.contains(['/', '\\']) || lang.starts_with('.') {
            return Err(anyhow!("invalid language code \"{lang}\""));
        }
        Ok(self.dir.join(format!("{lang}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl Loader for JsonDirLoader {
    async fn load(&self, lang: &str) -> Result<TranslationTree> {
        use anyhow::Context;

        let path = self.path_for(lang)?;
        tracing::debug!("i18n.json_dir.load: path={}", path.display());
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Not found \"{}\"", path.display()))?;
        let tree = TranslationTree::from_json(&raw)
            .with_context(|| format!("Invalid translation file \"{}\"", path.display()))?;
        Ok(tree)
    }
}
