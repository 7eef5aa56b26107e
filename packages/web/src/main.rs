use dioxus::prelude::*;
use i18n::{I18nProvider, I18nSettings, SyncFn};

mod source;
mod views;

use views::Home;

fn main() {
    install_panic_hook();
    #[cfg(not(target_arch = "wasm32"))]
    init_tracing();
    dioxus::launch(App);
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {info}");
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,i18n=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_provider() -> (I18nProvider, ui::ErrorFeed) {
    let settings = I18nSettings::from_env();
    tracing::info!("startup: default language {}", settings.default_language);

    let (handler, feed) = ui::error_feed();
    let provider = I18nProvider::builder(settings.default_language, SyncFn(source::load_language))
        .helpers(SyncFn(source::helpers))
        .error_handler(handler)
        .build();
    (provider, feed)
}

#[component]
fn App() -> Element {
    let (provider, feed) = use_hook(build_provider);

    rsx! {
        ui::I18nProvider { provider,
            ui::ErrorToasts { feed }
            Home {}
        }
    }
}
