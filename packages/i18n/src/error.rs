use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Shared, clonable handle to the error that caused an [`I18nError`].
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I18nErrorKind {
    /// Root kind; anything raised by the library or a caller on purpose.
    Base,
    /// A loader or helper factory failed.
    Provider,
    /// A path or helper name did not resolve.
    Lookup,
}

impl fmt::Display for I18nErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            I18nErrorKind::Base => "I18nBaseError",
            I18nErrorKind::Provider => "I18nProviderError",
            I18nErrorKind::Lookup => "I18nLookupError",
        })
    }
}

/// Every error this crate reports. All kinds are "recognized" i18n errors:
/// they pass through the provider's normalization untouched.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct I18nError {
    kind: I18nErrorKind,
    message: String,
    #[source]
    original: Option<Cause>,
}

impl I18nError {
    pub fn new(kind: I18nErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            original: None,
        }
    }

    pub fn base(message: impl Into<String>) -> Self {
        Self::new(I18nErrorKind::Base, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(I18nErrorKind::Provider, message)
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::new(I18nErrorKind::Lookup, message)
    }

    pub fn with_original(mut self, original: impl Into<Cause>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// Pass recognized i18n errors through and wrap anything else into a
    /// provider failure that keeps the original as its source.
    pub fn normalize(error: anyhow::Error, message: impl FnOnce() -> String) -> Self {
        match error.downcast::<I18nError>() {
            Ok(recognized) => recognized,
            Err(other) => {
                let boxed: Box<dyn StdError + Send + Sync + 'static> = other.into();
                Self::provider(message()).with_original(Cause::from(boxed))
            }
        }
    }

    pub fn kind(&self) -> I18nErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn original(&self) -> Option<&Cause> {
        self.original.as_ref()
    }

    pub fn is_provider(&self) -> bool {
        self.kind == I18nErrorKind::Provider
    }

    pub fn is_lookup(&self) -> bool {
        self.kind == I18nErrorKind::Lookup
    }
}

/// Two errors are the same report when kind, message and cause text agree.
/// Re-rendering the same missing path therefore does not count as a new error.
impl PartialEq for I18nError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.original.as_ref().map(ToString::to_string)
                == other.original.as_ref().map(ToString::to_string)
    }
}

impl Eq for I18nError {}
