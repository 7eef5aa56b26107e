//! Localization provider for component trees.
//!
//! An [`I18nProvider`] owns a cache of translation trees, the current language,
//! a bundle of localized helpers and a single-slot error store. Consumers get an
//! [`I18nContext`] and read through the accessors in [`accessors`].

pub mod accessors;
pub mod config;
pub mod error;
pub mod helpers;
pub mod provider;
pub mod source;
pub mod tree;

pub use accessors::{helper, helper_with, inline, render, with_i18n, WithI18n};
pub use config::I18nSettings;
pub use error::{I18nError, I18nErrorKind};
pub use helpers::{Helper, HelperBundle};
pub use provider::{I18nContext, I18nProvider, Lookup, ProviderBuilder, ProviderState};
#[cfg(not(target_arch = "wasm32"))]
pub use source::JsonDirLoader;
pub use source::{AsyncFn, ErrorHandler, HelperFactory, Loader, StaticLoader, SyncFn};
pub use tree::TranslationTree;
