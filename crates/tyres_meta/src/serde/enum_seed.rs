use core::fmt::{self, Formatter};

use serde_core::Deserializer;
use serde_core::de::{DeserializeSeed, Error, Visitor};

use tyres_text::Locale;

use crate::info::TypeHandle;
use crate::probe::TypeProbe;
use crate::registry::TypeRegistry;
use crate::resolve::{EnumValue, EnumValueResolver};

// -----------------------------------------------------------------------------
// EnumSeed

/// A [`DeserializeSeed`] producing the [`EnumValue`] of one enum type.
///
/// Strings go through [`EnumValueResolver::resolve`] under the seed's locale.
/// Integers go through [`EnumValueResolver::resolve_value`] and are not
/// affected by the numeric fallback policy.
///
/// # Examples
///
/// ```
/// use serde_core::de::DeserializeSeed;
/// use tyres_meta::registry::{EnumBuilder, IntegralKind, TypeRegistry};
/// use tyres_meta::resolve::EnumValueResolver;
/// use tyres_meta::serde::EnumSeed;
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
/// let locale = Locale::parse("en").unwrap();
/// let resolver = EnumValueResolver::new(&registry);
///
/// let mut de = serde_json::Deserializer::from_str(r#""ACTIVES""#);
/// let value = EnumSeed::new(resolver, status, &locale).deserialize(&mut de).unwrap();
/// assert_eq!(value.name(), "Active");
/// ```
pub struct EnumSeed<'p, 'l, P: ?Sized = TypeRegistry> {
    resolver: EnumValueResolver<'p, P>,
    enum_type: TypeHandle,
    locale: &'l Locale,
}

impl<P: ?Sized> Clone for EnumSeed<'_, '_, P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for EnumSeed<'_, '_, P> {}

impl<'p, 'l, P: TypeProbe + ?Sized> EnumSeed<'p, 'l, P> {
    #[inline]
    pub const fn new(
        resolver: EnumValueResolver<'p, P>,
        enum_type: TypeHandle,
        locale: &'l Locale,
    ) -> Self {
        Self {
            resolver,
            enum_type,
            locale,
        }
    }
}

impl<'de, 'p, P: TypeProbe + ?Sized> DeserializeSeed<'de> for EnumSeed<'p, '_, P> {
    type Value = EnumValue<'p>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'p, P: TypeProbe + ?Sized> Visitor<'de> for EnumSeed<'p, '_, P> {
    type Value = EnumValue<'p>;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("an enum constant name or integer value")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        self.resolver
            .resolve(self.enum_type, v, self.locale)
            .map_err(E::custom)
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        self.visit_i128(i128::from(v))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        self.visit_i128(i128::from(v))
    }

    fn visit_i128<E: Error>(self, v: i128) -> Result<Self::Value, E> {
        self.resolver
            .resolve_value(self.enum_type, v)
            .map_err(E::custom)
    }
}

// -----------------------------------------------------------------------------
// Tests
