use alloc::borrow::Cow;
use alloc::string::String;

use super::Inflector;

// -----------------------------------------------------------------------------
// Tables

/// Words with no distinct plural form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "metadata",
    "feedback",
    "software",
    "hardware",
];

/// `(singular, plural)` pairs, matched on a word boundary at the end of the
/// input. Longer words sharing a suffix must come first (`woman` before `man`).
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("woman", "women"),
    ("man", "men"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("life", "lives"),
    ("wolf", "wolves"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("leaf", "leaves"),
    ("thief", "thieves"),
    ("movie", "movies"),
    ("criterion", "criteria"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("axis", "axes"),
    ("quiz", "quizzes"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("datum", "data"),
];

/// Plurals ending in `-ses` whose singular keeps the `s`.
const KEEP_S_PLURALS: &[&str] = &["statuses", "aliases", "buses", "viruses", "campuses"];

// -----------------------------------------------------------------------------
// EnglishInflector

/// Rule-based English singular/plural transforms.
///
/// Handles irregular nouns, uncountable nouns and the usual suffix rules.
/// Irregular forms are only matched at a word boundary, which covers
/// identifiers in `PascalCase`, `snake_case` and single words:
/// `SalesPerson` becomes `SalesPeople`, `Human` stays a regular noun.
///
/// The casing style of the input is kept: an all upper-case word gets an
/// upper-case suffix.
///
/// # Examples
///
/// ```
/// use tyres_text::{EnglishInflector, Inflector};
///
/// let en = EnglishInflector;
/// assert_eq!(en.pluralize("Active"), "Actives");
/// assert_eq!(en.pluralize("ACTIVE"), "ACTIVES");
/// assert_eq!(en.pluralize("Category"), "Categories");
/// assert_eq!(en.pluralize("SalesPerson"), "SalesPeople");
///
/// assert_eq!(en.singularize("Statuses"), "Status");
/// assert_eq!(en.singularize("Boxes"), "Box");
/// assert_eq!(en.singularize("sheep"), "sheep");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn pluralize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if word.is_empty() || is_uncountable(word) {
            return Cow::Borrowed(word);
        }
        let shouting = is_shouting(word);

        for &(singular, plural) in IRREGULAR {
            if let Some(start) = boundary_suffix(word, singular) {
                return Cow::Owned(replace_tail(word, start, plural, shouting));
            }
            if boundary_suffix(word, plural).is_some() {
                return Cow::Borrowed(word);
            }
        }

        let lower = word.to_ascii_lowercase();
        let (cut, suffix) = if lower.ends_with("sis") {
            (2, "es")
        } else if ends_with_consonant_y(&lower) {
            (1, "ies")
        } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
            (0, "es")
        } else {
            (0, "s")
        };

        Cow::Owned(append(&word[..word.len() - cut], suffix, shouting))
    }

    fn singularize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if word.is_empty() || is_uncountable(word) {
            return Cow::Borrowed(word);
        }
        let shouting = is_shouting(word);

        for &(singular, plural) in IRREGULAR {
            if let Some(start) = boundary_suffix(word, plural) {
                return Cow::Owned(replace_tail(word, start, singular, shouting));
            }
            if boundary_suffix(word, singular).is_some() {
                return Cow::Borrowed(word);
            }
        }

        let lower = word.to_ascii_lowercase();
        let (cut, suffix) = if lower.len() > 3 && lower.ends_with("ies") {
            (3, "y")
        } else if KEEP_S_PLURALS.iter().any(|s| lower.ends_with(s))
            || ["xes", "ches", "shes", "sses", "zzes"].iter().any(|s| lower.ends_with(s))
        {
            (2, "")
        } else if ["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) || !lower.ends_with('s') {
            return Cow::Borrowed(word);
        } else {
            (1, "")
        };

        Cow::Owned(append(&word[..word.len() - cut], suffix, shouting))
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn is_uncountable(word: &str) -> bool {
    UNCOUNTABLE
        .iter()
        .any(|u| boundary_suffix(word, u).is_some())
}

/// All letters upper-case, with at least two letters.
fn is_shouting(word: &str) -> bool {
    let mut letters = 0;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_alphabetic() {
            letters += 1;
        }
    }
    letters > 1
}

fn ends_with_consonant_y(lower: &str) -> bool {
    let bytes = lower.as_bytes();
    match bytes {
        [.., prev, b'y'] => prev.is_ascii_alphabetic() && !b"aeiou".contains(prev),
        _ => false,
    }
}

/// Returns the start of `suffix` in `word` if `word` ends with it (ASCII
/// case-insensitive) and the match begins a word.
fn boundary_suffix(word: &str, suffix: &str) -> Option<usize> {
    let start = word.len().checked_sub(suffix.len())?;
    if !word.is_char_boundary(start) || !word[start..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    if start == 0 {
        return Some(0);
    }
    let bytes = word.as_bytes();
    let prev = bytes[start - 1];
    let first = bytes[start];
    if !prev.is_ascii_alphabetic() || (first.is_ascii_uppercase() && prev.is_ascii_lowercase()) {
        Some(start)
    } else {
        None
    }
}

fn replace_tail(word: &str, start: usize, replacement: &str, shouting: bool) -> String {
    let mut out = String::with_capacity(start + replacement.len());
    out.push_str(&word[..start]);
    if shouting {
        out.push_str(&replacement.to_ascii_uppercase());
    } else if word[start..].starts_with(|c: char| c.is_ascii_uppercase()) {
        let (head, tail) = replacement.split_at(1);
        out.push_str(&head.to_ascii_uppercase());
        out.push_str(tail);
    } else {
        out.push_str(replacement);
    }
    out
}

fn append(stem: &str, suffix: &str, shouting: bool) -> String {
    let mut out = String::with_capacity(stem.len() + suffix.len());
    out.push_str(stem);
    if shouting {
        out.push_str(&suffix.to_ascii_uppercase());
    } else {
        out.push_str(suffix);
    }
    out
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::EnglishInflector;
    use crate::Inflector;

    #[test]
    fn regular_plurals() {
        let en = EnglishInflector;
        assert_eq!(en.pluralize("Order"), "Orders");
        assert_eq!(en.pluralize("Status"), "Statuses");
        assert_eq!(en.pluralize("Box"), "Boxes");
        assert_eq!(en.pluralize("Match"), "Matches");
        assert_eq!(en.pluralize("Day"), "Days");
        assert_eq!(en.pluralize("Priority"), "Priorities");
        assert_eq!(en.pluralize("Diagnosis"), "Diagnoses");
    }

    #[test]
    fn regular_singulars() {
        let en = EnglishInflector;
        assert_eq!(en.singularize("Orders"), "Order");
        assert_eq!(en.singularize("Priorities"), "Priority");
        assert_eq!(en.singularize("Classes"), "Class");
        assert_eq!(en.singularize("Responses"), "Response");
        assert_eq!(en.singularize("OrderStatuses"), "OrderStatus");
        assert_eq!(en.singularize("Status"), "Status");
        assert_eq!(en.singularize("Active"), "Active");
    }

    #[test]
    fn irregular_on_word_boundary() {
        let en = EnglishInflector;
        assert_eq!(en.pluralize("Child"), "Children");
        assert_eq!(en.pluralize("sales_person"), "sales_people");
        assert_eq!(en.pluralize("Woman"), "Women");
        assert_eq!(en.pluralize("Human"), "Humans");
        assert_eq!(en.singularize("Humans"), "Human");
        assert_eq!(en.singularize("Mice"), "Mouse");
        assert_eq!(en.singularize("Taxes"), "Tax");
        assert_eq!(en.pluralize("People"), "People");
        assert_eq!(en.singularize("Person"), "Person");
    }

    #[test]
    fn casing_is_preserved() {
        let en = EnglishInflector;
        assert_eq!(en.pluralize("ACTIVE"), "ACTIVES");
        assert_eq!(en.pluralize("PRIORITY"), "PRIORITIES");
        assert_eq!(en.pluralize("PERSON"), "PEOPLE");
        assert_eq!(en.singularize("ACTIVES"), "ACTIVE");
        assert_eq!(en.pluralize("active"), "actives");
    }

    #[test]
    fn uncountable_words() {
        let en = EnglishInflector;
        assert_eq!(en.pluralize("Sheep"), "Sheep");
        assert_eq!(en.pluralize("ProductInformation"), "ProductInformation");
        assert_eq!(en.singularize("series"), "series");
        assert_eq!(en.pluralize(""), "");
    }
}
