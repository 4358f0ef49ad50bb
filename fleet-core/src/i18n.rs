//! src/i18n.rs
//! ============================================================================
//! # Localization
//!
//! Bundled TOML catalogs (one per language) flattened to dotted keys, with
//! `{{name}}` interpolation and an English-then-key fallback chain.
//!
//! The active language lives in a `tokio::sync::watch` channel. Anything that
//! caches translated labels (dropdown options, chart labels) holds a
//! [`LanguageSubscription`] and rebuilds when it reports a change; dropping
//! the subscription unsubscribes.

use std::{collections::HashMap, fmt, str::FromStr};

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    De,
    Fr,
}

impl Language {
    pub const ALL: [Self; 4] = [Self::En, Self::Ru, Self::De, Self::Fr];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::De => "de",
            Self::Fr => "fr",
        }
    }

    /// Name of the language in that language.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ru => "Русский",
            Self::De => "Deutsch",
            Self::Fr => "Français",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::En => Self::Ru,
            Self::Ru => Self::De,
            Self::De => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    const fn catalog_source(self) -> &'static str {
        match self {
            Self::En => include_str!("../assets/i18n/en.toml"),
            Self::Ru => include_str!("../assets/i18n/ru.toml"),
            Self::De => include_str!("../assets/i18n/de.toml"),
            Self::Fr => include_str!("../assets/i18n/fr.toml"),
        }
    }

    /// Parse a saved code, falling back to English.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!(marker = "CONFIG_FALLBACK", value, "Unknown language, using en");
            Self::default()
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::invalid_input("language", format!("unknown language '{s}'")))
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

type Catalog = HashMap<String, String>;

fn flatten_into(prefix: &str, table: &toml::Table, out: &mut Catalog) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            toml::Value::Table(nested) => flatten_into(&full_key, nested, out),
            toml::Value::String(text) => {
                out.insert(full_key, text.clone());
            }
            other => {
                out.insert(full_key, other.to_string());
            }
        }
    }
}

fn parse_catalog(language: Language) -> Result<Catalog, AppError> {
    let table: toml::Table = toml::from_str(language.catalog_source())
        .map_err(|e| AppError::catalog(language.code(), e.to_string()))?;

    let mut catalog = Catalog::new();
    flatten_into("", &table, &mut catalog);
    Ok(catalog)
}

/// Replace `{{name}}` placeholders. Unknown names are left in place.
#[must_use]
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = after_open[..close].trim();
        match params.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Translation service shared by every label-producing component.
#[derive(Debug)]
pub struct Translator {
    catalogs: EnumMap<Language, Catalog>,
    current: watch::Sender<Language>,
}

impl Translator {
    pub fn new(initial: Language) -> Result<Self, AppError> {
        let mut catalogs: EnumMap<Language, Catalog> = EnumMap::default();
        for language in Language::ALL {
            catalogs[language] = parse_catalog(language)?;
        }

        debug!(
            marker = "I18N_LOADED",
            operation_type = "i18n_init",
            keys = catalogs[Language::En].len(),
            language = %initial,
            "Catalogs loaded"
        );

        let (current, _) = watch::channel(initial);
        Ok(Self { catalogs, current })
    }

    #[must_use]
    pub fn current(&self) -> Language {
        *self.current.borrow()
    }

    /// Switch language. Returns `false` when it was already active.
    pub fn use_language(&self, language: Language) -> bool {
        let changed = self.current.send_if_modified(|current| {
            if *current == language {
                false
            } else {
                *current = language;
                true
            }
        });

        if changed {
            info!(
                marker = "LANGUAGE_CHANGED",
                operation_type = "i18n",
                language = %language,
                subscribers = self.current.receiver_count(),
                "Language switched"
            );
        }
        changed
    }

    #[must_use]
    pub fn subscribe(&self) -> LanguageSubscription {
        LanguageSubscription {
            rx: self.current.subscribe(),
        }
    }

    #[must_use]
    pub fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.catalogs[language].get(key).map(String::as_str)
    }

    /// Text for `key` in the active language.
    #[must_use]
    pub fn instant(&self, key: &str) -> String {
        self.instant_with(key, &[])
    }

    /// Text for `key` with `{{name}}` placeholders filled from `params`.
    #[must_use]
    pub fn instant_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = self
            .lookup(self.current(), key)
            .or_else(|| self.lookup(Language::En, key))
            .unwrap_or(key);

        interpolate(template, params)
    }
}

/// Receiver side of the language channel.
#[derive(Debug, Clone)]
pub struct LanguageSubscription {
    rx: watch::Receiver<Language>,
}

impl LanguageSubscription {
    /// The new language, if it changed since the last call.
    pub fn changed(&mut self) -> Option<Language> {
        if self.rx.has_changed().unwrap_or(false) {
            Some(*self.rx.borrow_and_update())
        } else {
            None
        }
    }

    #[must_use]
    pub fn current(&self) -> Language {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        Translator::new(Language::En).expect("catalogs parse")
    }

    #[test]
    fn test_nested_tables_flatten_to_dotted_keys() {
        let t = translator();
        assert_eq!(t.instant("SERVER.STATUS.RUNNING"), "Running");
        assert_eq!(t.instant("COMMON.OFFLINE"), "Offline");
    }

    #[test]
    fn test_interpolation() {
        let t = translator();
        assert_eq!(
            t.instant_with(
                "COMMON.VALIDATION.MIN_LENGTH",
                &[("field", "Hostname"), ("length", "3")]
            ),
            "Hostname must be at least 3 characters"
        );
        assert_eq!(interpolate("{{ a }}-{{b}}-{{c", &[("a", "1"), ("b", "2")]), "1-2-{{c");
        assert_eq!(interpolate("{{missing}}", &[]), "{{missing}}");
    }

    #[test]
    fn test_fallback_to_english_then_key() {
        let mut t = translator();
        t.catalogs[Language::De].remove("COMMON.SAVE");
        t.use_language(Language::De);

        assert_eq!(t.instant("COMMON.SAVE"), "Save");
        assert_eq!(t.instant("COMMON.CANCEL"), "Abbrechen");
        assert_eq!(t.instant("NO.SUCH.KEY"), "NO.SUCH.KEY");
    }

    #[test]
    fn test_every_catalog_covers_english_keys() {
        let t = translator();
        for language in Language::ALL {
            for key in t.catalogs[Language::En].keys() {
                assert!(
                    t.lookup(language, key).is_some(),
                    "{language} catalog is missing {key}"
                );
            }
        }
    }

    #[test]
    fn test_subscription_sees_changes_once() {
        let t = translator();
        let mut sub = t.subscribe();
        assert_eq!(sub.changed(), None);

        assert!(t.use_language(Language::Fr));
        assert_eq!(sub.changed(), Some(Language::Fr));
        assert_eq!(sub.changed(), None);

        assert!(!t.use_language(Language::Fr));
        assert_eq!(sub.changed(), None);
        assert_eq!(t.current(), Language::Fr);
    }

    #[test]
    fn test_language_parse_fallback() {
        assert_eq!(Language::parse_or_default("RU"), Language::Ru);
        assert_eq!(Language::parse_or_default("xx"), Language::En);
        assert_eq!(Language::Fr.next(), Language::En);
    }
}
