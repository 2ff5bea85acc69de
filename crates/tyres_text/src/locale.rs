use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use thiserror::Error;

use crate::{CaseRules, EnglishInflector, Inflector};

// -----------------------------------------------------------------------------
// Error

/// Error returned by [`Locale::parse`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LocaleError {
    #[error("invalid language subtag `{0}`, expected 2 to 8 ASCII letters")]
    InvalidLanguage(String),

    #[error("invalid subtag `{subtag}` in locale `{tag}`")]
    InvalidSubtag { tag: String, subtag: String },
}

// -----------------------------------------------------------------------------
// Locale

/// A locale under which textual name variants are generated and compared.
///
/// A locale is always an explicit input: nothing here reads process-wide
/// settings, so the same inputs resolve the same way on every machine.
///
/// A locale carries:
///
/// - a normalized tag (`en-US`, `tr`, or empty for the invariant locale),
/// - the [`CaseRules`] of its language,
/// - an optional [`Inflector`] providing singular/plural transforms.
///
/// # Examples
///
/// ```
/// use tyres_text::{CaseRules, Locale};
///
/// let en = Locale::parse("en_us").unwrap();
/// assert_eq!(en.tag(), "en-US");
/// assert_eq!(en.language(), "en");
/// assert!(en.inflector().is_some());
///
/// let tr = Locale::parse("tr-TR").unwrap();
/// assert_eq!(tr.case_rules(), CaseRules::Turkic);
/// assert!(tr.inflector().is_none());
///
/// assert!(Locale::parse("").unwrap().is_invariant());
/// ```
#[derive(Clone)]
pub struct Locale {
    tag: String,
    language_len: usize,
    case_rules: CaseRules,
    inflector: Option<Arc<dyn Inflector>>,
}

impl Locale {
    /// The invariant locale: default casing, no inflection.
    pub const fn invariant() -> Self {
        Self {
            tag: String::new(),
            language_len: 0,
            case_rules: CaseRules::Default,
            inflector: None,
        }
    }

    /// Parses a locale tag such as `en-US`, `en_GB`, `tr` or `zh-Hant-TW`.
    ///
    /// Subtags may be separated by `-` or `_`. The language is lower-cased,
    /// a four letter script is title-cased and a two letter region is
    /// upper-cased. An empty tag or `invariant` yields [`Locale::invariant`].
    ///
    /// English locales get an [`EnglishInflector`]; use
    /// [`with_inflector`](Self::with_inflector) to attach one to other
    /// languages.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("invariant") {
            return Ok(Self::invariant());
        }

        let mut parts = trimmed.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        if !(2..=8).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(LocaleError::InvalidLanguage(language.into()));
        }

        let mut normalized = language.to_ascii_lowercase();
        let language_len = normalized.len();

        for subtag in parts {
            if subtag.is_empty()
                || subtag.len() > 8
                || !subtag.bytes().all(|b| b.is_ascii_alphanumeric())
            {
                return Err(LocaleError::InvalidSubtag {
                    tag: tag.into(),
                    subtag: subtag.into(),
                });
            }
            normalized.push('-');
            let is_alpha = subtag.bytes().all(|b| b.is_ascii_alphabetic());
            match subtag.len() {
                2 if is_alpha => normalized.push_str(&subtag.to_ascii_uppercase()),
                4 if is_alpha => {
                    let (head, tail) = subtag.split_at(1);
                    normalized.push_str(&head.to_ascii_uppercase());
                    normalized.push_str(&tail.to_ascii_lowercase());
                }
                _ => normalized.push_str(&subtag.to_ascii_lowercase()),
            }
        }

        let language = &normalized[..language_len];
        let case_rules = CaseRules::for_language(language);
        let inflector: Option<Arc<dyn Inflector>> = match language {
            "en" => Some(Arc::new(EnglishInflector)),
            _ => None,
        };

        Ok(Self {
            tag: normalized,
            language_len,
            case_rules,
            inflector,
        })
    }

    /// Replaces the inflector of this locale.
    #[inline]
    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.inflector = Some(inflector);
        self
    }

    /// Removes the inflector, disabling singular/plural variants.
    #[inline]
    pub fn without_inflector(mut self) -> Self {
        self.inflector = None;
        self
    }

    /// Returns the normalized tag, empty for the invariant locale.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the primary language subtag, empty for the invariant locale.
    #[inline]
    pub fn language(&self) -> &str {
        &self.tag[..self.language_len]
    }

    /// Returns `true` for the invariant locale.
    #[inline]
    pub fn is_invariant(&self) -> bool {
        self.tag.is_empty()
    }

    #[inline]
    pub fn case_rules(&self) -> CaseRules {
        self.case_rules
    }

    /// Returns the registered singular/plural transforms, if any.
    #[inline]
    pub fn inflector(&self) -> Option<&dyn Inflector> {
        self.inflector.as_deref()
    }

    /// Locale-aware upper-case form of `s`.
    #[inline]
    pub fn to_upper(&self, s: &str) -> String {
        self.case_rules.to_upper(s)
    }

    /// Locale-aware lower-case form of `s`.
    #[inline]
    pub fn to_lower(&self, s: &str) -> String {
        self.case_rules.to_lower(s)
    }

    /// Locale-aware case-insensitive equality.
    #[inline]
    pub fn eq_ignore_case(&self, a: &str, b: &str) -> bool {
        self.case_rules.eq_ignore_case(a, b)
    }
}

impl Default for Locale {
    /// See [`Locale::invariant`].
    #[inline]
    fn default() -> Self {
        Self::invariant()
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locale")
            .field("tag", &self.tag)
            .field("case_rules", &self.case_rules)
            .field("inflector", &self.inflector.is_some())
            .finish()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.pad("invariant")
        } else {
            f.pad(&self.tag)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
