use crate::views::{LanguageSelect, MilkCounter};
use dioxus::prelude::*;
use i18n::Helper;
use serde_json::Value;
use ui::{I18nHelper, I18nInline};

#[component]
pub fn Home() -> Element {
    let now = chrono::Utc::now().to_rfc3339();

    rsx! {
        div {
            LanguageSelect {}
            hr {}
            h1 {
                I18nInline { path: "hello" }
                " "
                I18nInline { path: "world" }
            }
            // Missing on purpose: ends up in the error toasts.
            h1 { I18nInline { path: "fail" } }
            h1 {
                I18nInline { path: "today" }
                " "
                I18nHelper {
                    name: "date",
                    value: Value::String(now),
                    render: move |(helper, value): (Helper, Option<Value>)| {
                        let text = helper.call(value.as_ref()).unwrap_or_default();
                        rsx! { "{text}" }
                    },
                }
            }
            hr {}
            p { I18nInline { path: "complex" } }
            MilkCounter {}
        }
    }
}
