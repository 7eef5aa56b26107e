use dioxus::prelude::*;
use i18n::TranslationTree;
use ui::{I18nInline, I18nRender};

#[component]
pub fn MilkCounter() -> Element {
    let mut count = use_signal(|| 0_usize);

    rsx! {
        div {
            I18nRender {
                path: "have-milk",
                render: move |milk: TranslationTree| {
                    let line = milk_line(&milk, count());
                    rsx! { div { "{line}" } }
                },
            }
            div {
                button { onclick: move |_| count += 1, I18nInline { path: "increment" } }
                " ("
                I18nInline { path: "have-milk.count.0" }
                ")"
            }
        }
    }
}

fn milk_line(milk: &TranslationTree, count: usize) -> String {
    let text = |path: &str| {
        milk.lookup(path)
            .and_then(TranslationTree::as_text)
            .unwrap_or_default()
    };
    let unit = if count == 1 { "count.1" } else { "count.0" };

    let line = format!("{} {count} {} {}", text("have"), text(unit), text("milk"));
    if count > 2 {
        format!("{line} {}", text("alot"))
    } else {
        line
    }
}
