use dioxus::core::{consume_context_from_scope, current_scope_id};
use dioxus::prelude::*;
use i18n::{
    Helper, I18nContext, I18nError, Lookup, ProviderState, StaticLoader, TranslationTree,
};
use serde_json::Value;

/// What descendants of [`I18nProvider`] get from context: the provider plus a
/// reactive copy of its state, so reading through it re-renders on switches.
#[derive(Clone)]
pub struct I18n {
    provider: i18n::I18nProvider,
    state: Signal<ProviderState>,
    attached: bool,
}

impl I18n {
    /// Stand-in used outside any provider: never ready, `lang` is empty and
    /// switching does nothing, so every accessor renders nothing.
    fn detached(state: Signal<ProviderState>) -> Self {
        Self {
            provider: i18n::I18nProvider::builder("", StaticLoader::new()).build(),
            state,
            attached: false,
        }
    }

    pub fn context(&self) -> I18nContext {
        self.provider.context()
    }

    pub fn lang(&self) -> String {
        self.state.read().lang.clone()
    }

    pub fn ready(&self) -> bool {
        self.state.read().ready
    }

    /// Switch language in the background.
    pub fn set_locale(&self, lang: impl Into<String>) {
        let i18n = self.clone();
        let lang = lang.into();
        spawn(async move {
            i18n.switch_locale(&lang).await;
        });
    }

    /// Switch language and wait until the switch has been committed.
    pub async fn switch_locale(&self, lang: &str) {
        if !self.attached {
            return;
        }
        self.context().set_locale(lang).await;
    }

    pub fn get(&self, path: &str) -> Lookup {
        self.read_through(|ctx| ctx.get(path))
    }

    pub fn inline(&self, path: &str) -> Option<String> {
        self.read_through(|ctx| i18n::inline(ctx, path))
    }

    pub fn render<R>(&self, path: &str, transform: impl FnOnce(&TranslationTree) -> R) -> Option<R> {
        self.read_through(|ctx| i18n::render(ctx, path, transform))
    }

    pub fn helper(&self, name: &str, value: Option<&Value>) -> Option<String> {
        self.read_through(|ctx| i18n::helper(ctx, name, value))
    }

    pub fn helper_with<R>(
        &self,
        name: &str,
        value: Option<&Value>,
        transform: impl FnOnce(&Helper, Option<&Value>) -> R,
    ) -> Option<R> {
        self.read_through(|ctx| i18n::helper_with(ctx, name, value, transform))
    }

    /// Subscribe the calling component to provider updates, run `f`, and hand
    /// any error it reported to the provider's update cycle.
    fn read_through<R>(&self, f: impl FnOnce(&I18nContext) -> R) -> R {
        let _subscribe = self.state.read();
        let context = self.context();
        let out = f(&context);
        if context.last_error().is_some() {
            self.dispatch_errors();
        }
        out
    }

    fn dispatch_errors(&self) {
        let provider = self.provider.clone();
        spawn(async move {
            provider.on_update().await;
        });
    }
}

/// The nearest provider's [`I18n`], or a detached one that never becomes ready.
pub fn use_i18n() -> I18n {
    if let Some(i18n) = try_use_context::<I18n>() {
        return i18n;
    }

    let state = use_signal(|| ProviderState {
        lang: String::new(),
        ready: false,
        helpers: None,
    });
    use_hook(|| {
        tracing::warn!("i18n.use_i18n: no I18nProvider above this component");
        I18n::detached(state)
    })
}

/// Makes `provider` available to every descendant. Loads the default language
/// on mount and drops the cache when unmounted.
///
/// i18n errors raised while rendering descendants are reported to the
/// provider and the failing subtree is retried on the next state change.
/// Other errors go on to the enclosing error boundary.
#[component]
pub fn I18nProvider(provider: i18n::I18nProvider, children: Element) -> Element {
    let mut state = use_signal({
        let context = provider.context();
        move || context.state()
    });
    let i18n = use_context_provider({
        let provider = provider.clone();
        move || I18n {
            provider,
            state,
            attached: true,
        }
    });

    let watched = provider.clone();
    use_future(move || {
        let provider = watched.clone();
        async move {
            let mut updates = provider.context().subscribe();
            loop {
                let next = updates.borrow_and_update().clone();
                state.set(next);
                provider.on_update().await;
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let mounted = provider.clone();
    use_hook(move || {
        spawn(async move {
            mounted.init().await;
        });
    });

    let disposed = provider.clone();
    use_drop(move || disposed.dispose());

    let outer = current_scope_id();
    rsx! {
        ErrorBoundary {
            handle_error: move |errors: ErrorContext| recover(&i18n, outer, errors),
            {children}
        }
    }
}

/// Route a captured render error. i18n errors are reported and the subtree is
/// retried once the provider state moves on. Anything else is rethrown from
/// `outer` so the next boundary up sees it.
fn recover(i18n: &I18n, outer: ScopeId, errors: ErrorContext) -> Element {
    let Some(captured) = errors.error() else {
        return rsx! {};
    };

    match captured.downcast_ref::<I18nError>() {
        Some(error) => {
            i18n.context().report_error(error.clone());
            i18n.dispatch_errors();

            let mut updates = i18n.context().subscribe();
            spawn(async move {
                if updates.changed().await.is_ok() {
                    errors.clear_errors();
                }
            });
        }
        None => {
            match consume_context_from_scope::<ErrorContext>(outer) {
                Some(boundary) => boundary.insert_error(captured),
                None => tracing::error!("i18n.recover: unhandled render error: {}", *captured),
            }
        }
    }
    rsx! {}
}

/// Gives `render` direct access to the provider, e.g. for a language picker.
#[component]
pub fn I18nConsumer(render: Callback<I18n, Element>) -> Element {
    let i18n = use_i18n();
    render.call(i18n)
}
