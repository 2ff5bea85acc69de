use alloc::format;
use alloc::string::{String, ToString};

use tyres_text::{Locale, NameVariants};

use crate::MetaError;
use crate::info::{EnumConstant, EnumInfo, TypeHandle};
use crate::probe::TypeProbe;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// Options

/// How a token that matches no constant name is read as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumericFallback {
    /// Accept any literal the integral parser accepts, after trimming
    /// surrounding whitespace: `" 7"`, `"+7"` and `"007"` all read as `7`.
    #[default]
    Lenient,
    /// Accept only the plain decimal rendering of a value, such as `"7"` or `"-7"`.
    Canonical,
    /// Never read tokens as numbers.
    Disabled,
}

/// Runtime options of an [`EnumValueResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResolverOptions {
    pub numeric_fallback: NumericFallback,
}

impl ResolverOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            numeric_fallback: NumericFallback::Lenient,
        }
    }

    #[inline]
    pub const fn with_numeric_fallback(mut self, numeric_fallback: NumericFallback) -> Self {
        self.numeric_fallback = numeric_fallback;
        self
    }
}

// -----------------------------------------------------------------------------
// EnumValue

/// One resolved enum constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue<'a> {
    enum_type: TypeHandle,
    index: usize,
    name: &'a str,
    value: i128,
}

impl<'a> EnumValue<'a> {
    #[inline]
    fn new(enum_type: TypeHandle, index: usize, constant: &'a EnumConstant) -> Self {
        Self {
            enum_type,
            index,
            name: constant.name(),
            value: constant.value(),
        }
    }

    #[inline]
    pub fn enum_type(&self) -> TypeHandle {
        self.enum_type
    }

    /// Returns the declaration index of the constant.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the declared name of the constant.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn value(&self) -> i128 {
        self.value
    }
}

// -----------------------------------------------------------------------------
// EnumValueResolver

/// Maps external tokens onto enum constants.
///
/// A token is resolved in this order, the first success winning:
///
/// 1. Each constant, in declaration order, is expanded into its
///    [`NameVariants`] under the given locale: the name, its upper and lower
///    case forms, and their singular and plural forms when the locale has an
///    inflector. The first constant with a variant equal to the token, ignoring
///    case by the locale's rules, wins.
/// 2. The token is read as a literal of the underlying integral type, as
///    allowed by [`NumericFallback`]. A declared value resolves to the first
///    constant holding it.
///
/// Otherwise the call fails with [`MetaError::NoMatchingEnumValue`].
///
/// # Examples
///
/// ```
/// use tyres_meta::registry::{EnumBuilder, IntegralKind, TypeRegistry};
/// use tyres_meta::resolve::EnumValueResolver;
/// use tyres_meta::text::Locale;
///
/// let mut registry = TypeRegistry::new();
/// let status = registry
///     .register_enum(
///         EnumBuilder::new("Status", IntegralKind::I32)
///             .constant("Active", 0)
///             .constant("Inactive", 1),
///     )
///     .unwrap();
///
/// let en = Locale::parse("en").unwrap();
/// let resolver = EnumValueResolver::new(&registry);
///
/// let active = resolver.resolve(status, "actives", &en).unwrap();
/// assert_eq!((active.name(), active.value()), ("Active", 0));
/// assert_eq!(resolver.resolve(status, "1", &en).unwrap().name(), "Inactive");
/// assert_eq!(resolver.resolve_value(status, 1).unwrap().index(), 1);
/// ```
pub struct EnumValueResolver<'p, P: ?Sized = TypeRegistry> {
    probe: &'p P,
    options: ResolverOptions,
}

impl<P: ?Sized> Clone for EnumValueResolver<'_, P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for EnumValueResolver<'_, P> {}

impl<'p, P: TypeProbe + ?Sized> EnumValueResolver<'p, P> {
    /// Creates a resolver with the default options.
    #[inline]
    pub const fn new(probe: &'p P) -> Self {
        Self::with_options(probe, ResolverOptions::new())
    }

    #[inline]
    pub const fn with_options(probe: &'p P, options: ResolverOptions) -> Self {
        Self { probe, options }
    }

    #[inline]
    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    fn enum_info(&self, enum_type: TypeHandle) -> Result<&'p EnumInfo, MetaError> {
        match self.probe.enum_info(enum_type)? {
            Some(info) => Ok(info),
            None => Err(MetaError::NotAnEnum(self.probe.path(enum_type)?.into())),
        }
    }

    fn no_match(&self, enum_type: TypeHandle, token: String) -> MetaError {
        match self.probe.path(enum_type) {
            Ok(path) => MetaError::NoMatchingEnumValue {
                enum_type: path.into(),
                token,
            },
            Err(err) => err,
        }
    }

    /// Resolves `token` to a constant of `enum_type`.
    pub fn resolve(
        &self,
        enum_type: TypeHandle,
        token: &str,
        locale: &Locale,
    ) -> Result<EnumValue<'p>, MetaError> {
        let info = self.enum_info(enum_type)?;

        for (index, constant) in info.iter().enumerate() {
            if NameVariants::generate(constant.name(), locale).matches(token) {
                return Ok(EnumValue::new(enum_type, index, constant));
            }
        }

        if let Some(value) = self.parse_numeric(info, token)
            && let Some(index) = info.index_of_value(value)
            && let Some(constant) = info.constant_at(index)
        {
            log::trace!("enum token `{token}` resolved through its numeric value {value}");
            return Ok(EnumValue::new(enum_type, index, constant));
        }

        Err(self.no_match(enum_type, token.into()))
    }

    /// Resolves a numeric payload to the first constant holding `value`.
    pub fn resolve_value(
        &self,
        enum_type: TypeHandle,
        value: i128,
    ) -> Result<EnumValue<'p>, MetaError> {
        let info = self.enum_info(enum_type)?;
        info.index_of_value(value)
            .and_then(|index| Some(EnumValue::new(enum_type, index, info.constant_at(index)?)))
            .ok_or_else(|| self.no_match(enum_type, value.to_string()))
    }

    fn parse_numeric(&self, info: &EnumInfo, token: &str) -> Option<i128> {
        let underlying = info.underlying();
        match self.options.numeric_fallback {
            NumericFallback::Lenient => underlying.parse(token.trim()),
            NumericFallback::Canonical => underlying
                .parse(token)
                .filter(|value| format!("{value}") == token),
            NumericFallback::Disabled => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use tyres_text::{Inflector, Locale};

    use super::{EnumValueResolver, NumericFallback, ResolverOptions};
    use crate::MetaError;
    use crate::info::TypeHandle;
    use crate::registry::{EnumBuilder, IntegralKind, TypeBuilder, TypeRegistry};

    fn status(registry: &mut TypeRegistry) -> TypeHandle {
        registry
            .register_enum(
                EnumBuilder::new("Status", IntegralKind::I32)
                    .path("app.Status")
                    .constant("Active", 0)
                    .constant("Inactive", 1),
            )
            .unwrap()
    }

    fn en() -> Locale {
        Locale::parse("en-US").unwrap()
    }

    #[test]
    fn plural_and_numeric_tokens() {
        let mut registry = TypeRegistry::new();
        let status = status(&mut registry);
        let resolver = EnumValueResolver::new(&registry);
        let en = en();

        assert_eq!(resolver.resolve(status, "ACTIVES", &en).unwrap().name(), "Active");
        assert_eq!(resolver.resolve(status, "inactive", &en).unwrap().name(), "Inactive");
        assert_eq!(resolver.resolve(status, "1", &en).unwrap().name(), "Inactive");

        let err = resolver.resolve(status, "Gone", &en).unwrap_err();
        assert!(matches!(
            err,
            MetaError::NoMatchingEnumValue { ref enum_type, ref token }
                if enum_type == "app.Status" && token == "Gone"
        ));
    }

    #[test]
    fn undeclared_values_do_not_match() {
        let mut registry = TypeRegistry::new();
        let status = status(&mut registry);
        let resolver = EnumValueResolver::new(&registry);

        assert!(resolver.resolve(status, "2", &en()).is_err());
        assert!(resolver.resolve_value(status, -1).is_err());
    }

    #[test]
    fn first_declared_alias_wins() {
        let mut registry = TypeRegistry::new();
        let level = registry
            .register_enum(
                EnumBuilder::new("Level", IntegralKind::U8)
                    .constant("Low", 1)
                    .constant("Minimum", 1)
                    .constant("High", 9),
            )
            .unwrap();
        let resolver = EnumValueResolver::new(&registry);

        let by_number = resolver.resolve(level, "1", &en()).unwrap();
        assert_eq!((by_number.name(), by_number.index()), ("Low", 0));
        assert_eq!(resolver.resolve(level, "minimum", &en()).unwrap().index(), 1);
        assert_eq!(resolver.resolve_value(level, 9).unwrap().name(), "High");
    }

    #[test]
    fn inflection_needs_an_inflector() {
        let mut registry = TypeRegistry::new();
        let odd = registry
            .register_enum(
                EnumBuilder::new("Odd", IntegralKind::I32)
                    .constant("Zero", 0)
                    .constant("Seven", 7),
            )
            .unwrap();
        let resolver = EnumValueResolver::new(&registry);

        assert_eq!(resolver.resolve(odd, "SEVENS", &en()).unwrap().value(), 7);
        assert_eq!(resolver.resolve(odd, "SEVEN", &Locale::invariant()).unwrap().value(), 7);
        // No inflector on the invariant locale.
        assert!(resolver.resolve(odd, "sevens", &Locale::invariant()).is_err());
    }

    #[test]
    fn numeric_fallback_policies() {
        let mut registry = TypeRegistry::new();
        let status = status(&mut registry);
        let en = en();

        let lenient = EnumValueResolver::new(&registry);
        assert_eq!(lenient.resolve(status, "001", &en).unwrap().value(), 1);
        assert_eq!(lenient.resolve(status, " +1 ", &en).unwrap().value(), 1);

        let canonical = EnumValueResolver::with_options(
            &registry,
            ResolverOptions::new().with_numeric_fallback(NumericFallback::Canonical),
        );
        assert_eq!(canonical.resolve(status, "1", &en).unwrap().value(), 1);
        assert!(canonical.resolve(status, "001", &en).is_err());
        assert!(canonical.resolve(status, "+1", &en).is_err());

        let disabled = EnumValueResolver::with_options(
            &registry,
            ResolverOptions::new().with_numeric_fallback(NumericFallback::Disabled),
        );
        assert!(disabled.resolve(status, "1", &en).is_err());
        assert_eq!(disabled.resolve(status, "Active", &en).unwrap().value(), 0);
    }

    #[test]
    fn out_of_range_literals_fail() {
        let mut registry = TypeRegistry::new();
        let flag = registry
            .register_enum(EnumBuilder::new("Flag", IntegralKind::U8).constant("On", 1))
            .unwrap();
        let resolver = EnumValueResolver::new(&registry);

        assert!(resolver.resolve(flag, "257", &en()).is_err());
        assert!(resolver.resolve(flag, "-1", &en()).is_err());
    }

    #[test]
    fn turkic_casing() {
        let mut registry = TypeRegistry::new();
        let status = status(&mut registry);
        let resolver = EnumValueResolver::new(&registry);
        let tr = Locale::parse("tr-TR").unwrap();

        // `I` folds to dotless `ı` and `İ` to `i`.
        assert_eq!(resolver.resolve(status, "INACTİVE", &tr).unwrap().name(), "Inactive");
        assert_eq!(resolver.resolve(status, "ınactive", &tr).unwrap().name(), "Inactive");
        assert!(resolver.resolve(status, "İNACTİVE", &tr).is_err());
        assert!(resolver.resolve(status, "INACTIVE", &tr).is_err());
        assert_eq!(resolver.resolve(status, "INACTIVE", &en()).unwrap().name(), "Inactive");
    }

    #[test]
    fn custom_inflector() {
        struct Suffix;

        impl Inflector for Suffix {
            fn pluralize<'a>(&self, word: &'a str) -> Cow<'a, str> {
                Cow::Owned(alloc::format!("{word}en"))
            }

            fn singularize<'a>(&self, word: &'a str) -> Cow<'a, str> {
                Cow::Borrowed(word.strip_suffix("en").unwrap_or(word))
            }
        }

        let mut registry = TypeRegistry::new();
        let status = status(&mut registry);
        let resolver = EnumValueResolver::new(&registry);
        let locale = Locale::parse("de").unwrap().with_inflector(Arc::new(Suffix));

        assert_eq!(resolver.resolve(status, "activeen", &locale).unwrap().name(), "Active");
    }

    #[test]
    fn rejects_non_enums() {
        let mut registry = TypeRegistry::new();
        let point = registry.register(TypeBuilder::new("Point")).unwrap();
        let resolver = EnumValueResolver::new(&registry);

        assert!(matches!(
            resolver.resolve(point, "X", &en()),
            Err(MetaError::NotAnEnum(path)) if path == "Point"
        ));
        assert!(matches!(
            resolver.resolve(TypeHandle::default(), "X", &en()),
            Err(MetaError::InvalidDescriptor(_))
        ));
    }

    #[cfg(feature = "std")]
    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}

        let mut registry = TypeRegistry::new();
        let status = status(&mut registry);
        let resolver = EnumValueResolver::new(&registry);
        let locale = en();
        let en = &locale;
        assert_send_sync(&resolver);
        assert_send_sync(en);

        let tokens = ["ACTIVES", "inactive", "1", "0"];
        let names: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = tokens
                .iter()
                .map(|&token| s.spawn(move || resolver.resolve(status, token, en).unwrap().name()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(names, ["Active", "Inactive", "Inactive", "Active"]);
    }
}
