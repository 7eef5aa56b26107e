use dioxus::prelude::*;
use ui::use_i18n;

// "de" has no translation file on purpose.
const LANGUAGES: [(&str, &str); 4] = [
    ("pt", "Português"),
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
];

#[component]
pub fn LanguageSelect() -> Element {
    let i18n = use_i18n();
    let current = i18n.lang();

    rsx! {
        ul { class: "language_select",
            for (code, name) in LANGUAGES {
                li { key: "{code}",
                    a {
                        class: if current == code { "language active" } else { "language" },
                        onclick: {
                            let i18n = i18n.clone();
                            move |_| {
                                let i18n = i18n.clone();
                                async move {
                                    i18n.switch_locale(code).await;
                                    tracing::debug!("language_select.switch: lang={code} committed");
                                }
                            }
                        },
                        "{name}"
                    }
                }
            }
        }
    }
}
