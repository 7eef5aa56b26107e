use crate::provider::use_i18n;
use dioxus::prelude::*;
use i18n::{Helper, TranslationTree};
use serde_json::Value;

/// The text at `path`; nothing while loading or when the path is missing.
#[component]
pub fn I18nInline(path: String) -> Element {
    let i18n = use_i18n();
    match i18n.inline(&path) {
        Some(text) => rsx! { "{text}" },
        None => rsx! {},
    }
}

/// Hands whatever lives at `path` (text, list or map) to `render`.
#[component]
pub fn I18nRender(path: String, render: Callback<TranslationTree, Element>) -> Element {
    let i18n = use_i18n();
    match i18n.render(&path, TranslationTree::clone) {
        Some(tree) => render.call(tree),
        None => rsx! {},
    }
}

/// Renders the helper `name`. With `render`, the helper and `value` are passed
/// to it; without, the helper is called with `value` and its output shown.
#[component]
pub fn I18nHelper(
    name: String,
    value: Option<Value>,
    render: Option<Callback<(Helper, Option<Value>), Element>>,
) -> Element {
    let i18n = use_i18n();
    let Some(render) = render else {
        return match i18n.helper(&name, value.as_ref()) {
            Some(text) => rsx! { "{text}" },
            None => rsx! {},
        };
    };

    match i18n.helper_with(&name, value.as_ref(), |helper, value| {
        (helper.clone(), value.cloned())
    }) {
        Some(args) => render.call(args),
        None => rsx! {},
    }
}
