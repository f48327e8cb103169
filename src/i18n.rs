//! Language selection and the portal's user-visible notifications.
//!
//! The portal speaks English and Hindi. Every label shown to a passenger
//! comes in both languages; the caller picks one per request.

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// A display language supported by the portal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Get the language code as a string.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Pick between the English and Hindi rendition of a string.
    pub fn pick(&self, en: &'static str, hi: &'static str) -> &'static str {
        match self {
            Language::En => en,
            Language::Hi => hi,
        }
    }

    /// Parse an `Accept-Language` header value.
    ///
    /// Tags are scanned in the order given (quality weights are ignored) and
    /// the first one whose primary subtag is supported wins.
    pub fn from_accept_language(value: &str) -> Option<Self> {
        value
            .split(',')
            .filter_map(|part| part.split(';').next())
            .filter_map(|tag| tag.trim().split('-').next())
            .find_map(|primary| primary.parse().ok())
    }

    /// Resolve the language for a request.
    ///
    /// Priority: explicit `lang` query parameter, then the `X-Language`
    /// header, then `Accept-Language`, then `fallback`.
    pub fn detect(query: Option<&str>, headers: &HeaderMap, fallback: Language) -> Self {
        if let Some(lang) = query.and_then(|q| q.parse().ok()) {
            return lang;
        }

        if let Some(lang) = headers
            .get("X-Language")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
        {
            return lang;
        }

        headers
            .get(axum::http::header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(Language::from_accept_language)
            .unwrap_or(fallback)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            other => Err(ParseEnumError::new("language", other)),
        }
    }
}

/// Notifications shown to the passenger after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The report reached the document store.
    Submitted,
    /// The document store rejected the write. Carries the best detail we have.
    SubmitFailed(Option<String>),
    /// Required form fields are missing.
    Incomplete,
    /// The dashboard filter matched nothing.
    NoReportsFound,
}

impl Notice {
    /// Render the notification in the given language.
    pub fn render(&self, language: Language) -> String {
        match self {
            Notice::Submitted => language
                .pick(
                    "✅ Report submitted successfully! You will receive a confirmation shortly.",
                    "✅ रिपोर्ट सफलतापूर्वक सबमिट की गई! आपको जल्द ही पुष्टि मिलेगी।",
                )
                .to_string(),
            Notice::SubmitFailed(detail) => {
                let prefix = language.pick(
                    "❌ Failed to submit report: ",
                    "❌ रिपोर्ट सबमिट नहीं हो सकी: ",
                );
                let detail = detail
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or("Unknown error");
                format!("{prefix}{detail}")
            }
            Notice::Incomplete => language
                .pick(
                    "Please fill in all required fields.",
                    "कृपया सभी आवश्यक फ़ील्ड भरें।",
                )
                .to_string(),
            Notice::NoReportsFound => language
                .pick("No reports found", "कोई रिपोर्ट नहीं मिली")
                .to_string(),
        }
    }
}
