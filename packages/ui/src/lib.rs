//! Dioxus components that bind an `i18n` provider into the component tree.

mod accessors;
pub use accessors::{I18nHelper, I18nInline, I18nRender};

mod provider;
pub use provider::{use_i18n, I18n, I18nConsumer, I18nProvider};

mod toast;
pub use toast::{error_feed, ErrorFeed, ErrorToasts, Toast};

#[cfg(test)]
mod test_support;
