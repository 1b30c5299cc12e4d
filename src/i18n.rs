//! Language selection and the key→string catalog for user-facing text.
//!
//! The catalog content is supplied by the host (a JSON object keyed by
//! language code). The widget only ships fallback strings for the handful of
//! keys it renders itself.

use crate::domain::ValidationError;
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const RATE_LIMITED_MESSAGE: &str = "rateLimitedMessage";
pub const TIMEOUT_ERROR: &str = "timeoutError";
pub const LOOKUP_ERROR: &str = "lookupError";
pub const ADDRESS_FOUND: &str = "addressFound";
pub const MANUAL_ENTRY_SUCCESS: &str = "manualEntrySuccess";

/// Supported widget languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    No,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::No => "no",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no" => Ok(Language::No),
            "en" => Ok(Language::En),
            other => Err(ValidationError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn builtin(language: Language, key: &str) -> Option<&'static str> {
    let text = match (language, key) {
        (Language::No, RATE_LIMITED_MESSAGE) => {
            "Tjenesten er midlertidig opptatt. Vennligst fyll inn adressen manuelt."
        }
        (Language::No, TIMEOUT_ERROR) => {
            "Oppslaget tok for lang tid. Vennligst fyll inn adressen manuelt."
        }
        (Language::No, LOOKUP_ERROR) => {
            "Vi fant ikke adressen. Vennligst fyll inn adressen manuelt."
        }
        (Language::No, ADDRESS_FOUND) => "Adresse funnet!",
        (Language::No, MANUAL_ENTRY_SUCCESS) => "Takk! Adressen er registrert.",
        (Language::En, RATE_LIMITED_MESSAGE) => {
            "The service is temporarily busy. Please enter your address manually."
        }
        (Language::En, TIMEOUT_ERROR) => {
            "The lookup took too long. Please enter your address manually."
        }
        (Language::En, LOOKUP_ERROR) => {
            "We could not find your address. Please enter it manually."
        }
        (Language::En, ADDRESS_FOUND) => "Address found!",
        (Language::En, MANUAL_ENTRY_SUCCESS) => "Thank you! Your address has been saved.",
        _ => return None,
    };
    Some(text)
}

/// Translation table for one active language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: Language,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Catalog with only the built-in strings.
    pub fn builtin(language: Language) -> Self {
        Self {
            language,
            entries: HashMap::new(),
        }
    }

    /// Build from a JSON object of the form `{ "no": { key: text }, "en": {...} }`.
    ///
    /// Languages other than the active one are ignored.
    pub fn from_json_str(language: Language, json: &str) -> ConfigResult<Self> {
        let mut all: HashMap<String, HashMap<String, String>> =
            serde_json::from_str(json).map_err(|e| ConfigError::Catalog(e.to_string()))?;

        let entries = all.remove(language.code()).unwrap_or_default();
        tracing::debug!(
            "Loaded {} translation entries for '{}'",
            entries.len(),
            language
        );

        Ok(Self { language, entries })
    }

    pub fn from_json_file(language: Language, path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Catalog(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(language, &json)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Look up `key`: supplied entries first, then built-ins, then the key itself.
    pub fn get(&self, key: &str) -> String {
        if let Some(text) = self.entries.get(key) {
            return text.clone();
        }
        builtin(self.language, key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}
