use anyhow::{bail, Result};
use chrono::{DateTime, FixedOffset};
use i18n::{HelperBundle, TranslationTree};
use serde_json::Value;

/// Bundled translations. Anything else fails, which the demo relies on for "de".
pub fn load_language(lang: &str) -> Result<TranslationTree> {
    let raw = match lang {
        "en" => include_str!("../locales/en.json"),
        "pt" => include_str!("../locales/pt.json"),
        "fr" => include_str!("../locales/fr.json"),
        _ => bail!("Not found \"{lang}.json\""),
    };
    Ok(TranslationTree::from_json(raw)?)
}

pub fn helpers(lang: &str) -> Result<HelperBundle> {
    let lang = lang.to_string();
    Ok(HelperBundle::new().with_fn("date", move |value| {
        value
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|date| format_date(&lang, &date))
            .unwrap_or_default()
    }))
}

fn format_date(lang: &str, date: &DateTime<FixedOffset>) -> String {
    let pattern = match lang {
        "en" => "%m/%d/%Y %I:%M %p",
        "de" => "%d.%m.%Y %H:%M",
        _ => "%d/%m/%Y %H:%M",
    };
    date.format(pattern).to_string()
}
