/// Environment-driven defaults for building a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nSettings {
    pub default_language: String,
    pub locales_dir: Option<String>,
}

pub const DEFAULT_LANGUAGE: &str = "en";

impl I18nSettings {
    /// Reads `I18N_DEFAULT_LANG` (falls back to `en`) and `I18N_LOCALES_DIR`.
    pub fn from_env() -> Self {
        let default_language = std::env::var("I18N_DEFAULT_LANG")
            .ok()
            .map(|lang| lang.trim().to_lowercase())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let locales_dir = std::env::var("I18N_LOCALES_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty());

        Self {
            default_language,
            locales_dir,
        }
    }

    /// Provider builder reading `<locales_dir>/<code>.json`, if a directory is set.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn json_provider(&self) -> Option<crate::ProviderBuilder> {
        let dir = self.locales_dir.as_ref()?;
        Some(crate::I18nProvider::builder(
            self.default_language.clone(),
            crate::JsonDirLoader::new(dir),
        ))
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            locales_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the process environment so the cases cannot race.
    #[test]
    fn test_settings_from_env() {
        std::env::remove_var("I18N_DEFAULT_LANG");
        std::env::remove_var("I18N_LOCALES_DIR");
        assert_eq!(I18nSettings::from_env(), I18nSettings::default());

        std::env::set_var("I18N_DEFAULT_LANG", " PT ");
        std::env::set_var("I18N_LOCALES_DIR", "locales");
        let settings = I18nSettings::from_env();
        assert_eq!(settings.default_language, "pt");
        assert_eq!(settings.locales_dir.as_deref(), Some("locales"));
        assert!(settings.json_provider().is_some());

        std::env::set_var("I18N_DEFAULT_LANG", "");
        std::env::set_var("I18N_LOCALES_DIR", "  ");
        let settings = I18nSettings::from_env();
        assert_eq!(settings.default_language, DEFAULT_LANGUAGE);
        assert!(settings.json_provider().is_none());

        std::env::remove_var("I18N_DEFAULT_LANG");
        std::env::remove_var("I18N_LOCALES_DIR");
    }
}
