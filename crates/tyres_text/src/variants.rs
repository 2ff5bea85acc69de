use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::Locale;

// -----------------------------------------------------------------------------
// NameVariants

/// The bounded set of textual forms derived from one name under a locale.
///
/// In order:
///
/// 1. the name itself,
/// 2. its locale upper-case form,
/// 3. its locale lower-case form,
/// 4. if the locale has an [`Inflector`](crate::Inflector), the singular and
///    plural forms of each of the above.
///
/// Exact duplicates are dropped, keeping the first occurrence, so the set
/// holds at most nine forms.
///
/// # Examples
///
/// ```
/// use tyres_text::{Locale, NameVariants};
///
/// let en = Locale::parse("en").unwrap();
/// let variants = NameVariants::generate("Active", &en);
/// let forms: Vec<&str> = variants.iter().collect();
/// assert_eq!(forms, ["Active", "ACTIVE", "active", "Actives", "ACTIVES", "actives"]);
///
/// let invariant = Locale::invariant();
/// let variants = NameVariants::generate("Active", &invariant);
/// assert_eq!(variants.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NameVariants<'a> {
    locale: &'a Locale,
    forms: Vec<Cow<'a, str>>,
}

impl<'a> NameVariants<'a> {
    /// Generates the variants of `seed` under `locale`.
    pub fn generate(seed: &'a str, locale: &'a Locale) -> Self {
        let mut forms: Vec<Cow<'a, str>> = Vec::with_capacity(9);
        forms.push(Cow::Borrowed(seed));
        push_unique(&mut forms, Cow::Owned(locale.to_upper(seed)));
        push_unique(&mut forms, Cow::Owned(locale.to_lower(seed)));

        if let Some(inflector) = locale.inflector() {
            let cased = forms.len();
            for index in 0..cased {
                let singular = inflector.singularize(&forms[index]).into_owned();
                let plural = inflector.pluralize(&forms[index]).into_owned();
                push_unique(&mut forms, Cow::Owned(singular));
                push_unique(&mut forms, Cow::Owned(plural));
            }
        }

        Self { locale, forms }
    }

    /// Returns `true` if `token` equals any variant, ignoring case under the
    /// locale the variants were generated with.
    pub fn matches(&self, token: &str) -> bool {
        self.forms
            .iter()
            .any(|form| self.locale.eq_ignore_case(form, token))
    }

    /// Returns an iterator over the forms in generation order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.forms.iter().map(|form| &**form)
    }

    /// Returns the number of distinct forms.
    #[inline]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns the locale the variants were generated with.
    #[inline]
    pub fn locale(&self) -> &'a Locale {
        self.locale
    }
}

fn push_unique<'a>(forms: &mut Vec<Cow<'a, str>>, form: Cow<'a, str>) {
    if !forms.iter().any(|f| *f == form) {
        forms.push(form);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::NameVariants;
    use crate::Locale;

    #[test]
    fn casing_only_without_inflector() {
        let locale = Locale::parse("de-DE").unwrap();
        let variants = NameVariants::generate("Aktiv", &locale);
        let forms: Vec<&str> = variants.iter().collect();
        assert_eq!(forms, ["Aktiv", "AKTIV", "aktiv"]);
        assert!(variants.matches("aKtIv"));
        assert!(!variants.matches("Aktivs"));
    }

    #[test]
    fn inflected_forms() {
        let locale = Locale::parse("en-US").unwrap();
        let variants = NameVariants::generate("Statuses", &locale);
        assert!(variants.matches("status"));
        assert!(variants.matches("STATUSES"));
        assert!(!variants.matches("state"));
    }

    #[test]
    fn duplicates_are_dropped() {
        let locale = Locale::parse("en").unwrap();
        let variants = NameVariants::generate("ok", &locale);
        let forms: Vec<&str> = variants.iter().collect();
        assert_eq!(forms, ["ok", "OK", "oks", "OKS"]);
    }

    #[test]
    fn turkic_variants() {
        let locale = Locale::parse("tr-TR").unwrap();
        let variants = NameVariants::generate("Inactive", &locale);
        let forms: Vec<&str> = variants.iter().collect();
        assert_eq!(forms, ["Inactive", "INACTİVE", "ınactive"]);
        assert!(variants.matches("INACTİVE"));
        assert!(variants.matches("ınactİve"));
        assert!(!variants.matches("INACTIVE"));
    }
}
