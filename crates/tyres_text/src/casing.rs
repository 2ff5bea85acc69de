use alloc::string::String;
use core::char::{ToLowercase, ToUppercase};
use core::fmt;

// -----------------------------------------------------------------------------
// CaseRules

/// Locale-specific case mapping rules.
///
/// Almost every locale uses the Unicode default mapping. Turkic languages
/// (`tr`, `az`) distinguish dotted and dotless `i`:
///
/// | char | upper | lower |
/// |------|-------|-------|
/// | `i`  | `İ`   | `i`   |
/// | `ı`  | `I`   | `ı`   |
/// | `I`  | `I`   | `ı`   |
/// | `İ`  | `İ`   | `i`   |
///
/// # Examples
///
/// ```
/// use tyres_text::CaseRules;
///
/// assert_eq!(CaseRules::Default.to_upper("idle"), "IDLE");
/// assert_eq!(CaseRules::Turkic.to_upper("idle"), "İDLE");
/// assert_eq!(CaseRules::Turkic.to_lower("IDLE"), "ıdle");
///
/// assert!(CaseRules::Default.eq_ignore_case("Idle", "iDLE"));
/// assert!(!CaseRules::Turkic.eq_ignore_case("Idle", "iDLE"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseRules {
    #[default]
    Default,
    Turkic,
}

impl fmt::Display for CaseRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.pad("Default"),
            Self::Turkic => f.pad("Turkic"),
        }
    }
}

impl CaseRules {
    /// Selects the rules for a lower-case primary language subtag.
    pub fn for_language(language: &str) -> Self {
        match language {
            "tr" | "az" => Self::Turkic,
            _ => Self::Default,
        }
    }

    /// Maps one char to its upper-case form.
    #[inline]
    pub fn upper_char(self, c: char) -> CaseMapping {
        match (self, c) {
            (Self::Turkic, 'i') => CaseMapping::Single(Some('İ')),
            (Self::Turkic, 'ı') => CaseMapping::Single(Some('I')),
            _ => CaseMapping::Upper(c.to_uppercase()),
        }
    }

    /// Maps one char to its lower-case form.
    #[inline]
    pub fn lower_char(self, c: char) -> CaseMapping {
        match (self, c) {
            (Self::Turkic, 'I') => CaseMapping::Single(Some('ı')),
            (Self::Turkic, 'İ') => CaseMapping::Single(Some('i')),
            _ => CaseMapping::Lower(c.to_lowercase()),
        }
    }

    /// Returns the upper-case form of `s`.
    pub fn to_upper(self, s: &str) -> String {
        match self {
            Self::Default => s.to_uppercase(),
            Self::Turkic => s.chars().flat_map(|c| self.upper_char(c)).collect(),
        }
    }

    /// Returns the lower-case form of `s`.
    ///
    /// The default rules go through [`str::to_lowercase`], which also handles
    /// the word-final sigma.
    pub fn to_lower(self, s: &str) -> String {
        match self {
            Self::Default => s.to_lowercase(),
            Self::Turkic => s.chars().flat_map(|c| self.lower_char(c)).collect(),
        }
    }

    /// Case-insensitive equality under these rules.
    ///
    /// Both sides are folded char by char without allocating.
    pub fn eq_ignore_case(self, a: &str, b: &str) -> bool {
        if a.is_ascii() && b.is_ascii() && self == Self::Default {
            return a.eq_ignore_ascii_case(b);
        }
        self.fold(a).eq(self.fold(b))
    }

    fn fold(self, s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars()
            .flat_map(move |c| self.lower_char(c))
            // final and medial sigma compare equal
            .map(|c| if c == 'ς' { 'σ' } else { c })
    }
}

// -----------------------------------------------------------------------------
// CaseMapping

/// Iterator over the chars produced by mapping a single char.
///
/// Returned by [`CaseRules::upper_char`] and [`CaseRules::lower_char`].
#[derive(Debug, Clone)]
pub enum CaseMapping {
    Upper(ToUppercase),
    Lower(ToLowercase),
    Single(Option<char>),
}

impl Iterator for CaseMapping {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        match self {
            Self::Upper(iter) => iter.next(),
            Self::Lower(iter) => iter.next(),
            Self::Single(c) => c.take(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
