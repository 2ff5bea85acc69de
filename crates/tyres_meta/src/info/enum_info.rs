use alloc::boxed::Box;
use core::fmt;

use crate::hash::HashMap;

// -----------------------------------------------------------------------------
// IntegralKind

/// The underlying integral type of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegralKind {
    I8,
    U8,
    I16,
    U16,
    #[default]
    I32,
    U32,
    I64,
    U64,
}

impl fmt::Display for IntegralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8 => f.pad("i8"),
            Self::U8 => f.pad("u8"),
            Self::I16 => f.pad("i16"),
            Self::U16 => f.pad("u16"),
            Self::I32 => f.pad("i32"),
            Self::U32 => f.pad("u32"),
            Self::I64 => f.pad("i64"),
            Self::U64 => f.pad("u64"),
        }
    }
}

impl IntegralKind {
    /// Smallest representable value.
    pub const fn min(self) -> i128 {
        match self {
            Self::I8 => i8::MIN as i128,
            Self::I16 => i16::MIN as i128,
            Self::I32 => i32::MIN as i128,
            Self::I64 => i64::MIN as i128,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => 0,
        }
    }

    /// Largest representable value.
    pub const fn max(self) -> i128 {
        match self {
            Self::I8 => i8::MAX as i128,
            Self::U8 => u8::MAX as i128,
            Self::I16 => i16::MAX as i128,
            Self::U16 => u16::MAX as i128,
            Self::I32 => i32::MAX as i128,
            Self::U32 => u32::MAX as i128,
            Self::I64 => i64::MAX as i128,
            Self::U64 => u64::MAX as i128,
        }
    }

    /// Returns `true` if `value` is representable.
    #[inline]
    pub const fn contains(self, value: i128) -> bool {
        self.min() <= value && value <= self.max()
    }

    /// Parses `literal` as a decimal literal of this type.
    ///
    /// Accepts what the standard integer parsers accept: an optional sign and
    /// any number of leading zeros. Out-of-range literals are rejected.
    ///
    /// ```
    /// use tyres_meta::info::IntegralKind;
    ///
    /// assert_eq!(IntegralKind::U8.parse("255"), Some(255));
    /// assert_eq!(IntegralKind::U8.parse("256"), None);
    /// assert_eq!(IntegralKind::I32.parse("-007"), Some(-7));
    /// assert_eq!(IntegralKind::U32.parse("-1"), None);
    /// ```
    pub fn parse(self, literal: &str) -> Option<i128> {
        match self {
            Self::I8 => literal.parse::<i8>().ok().map(i128::from),
            Self::U8 => literal.parse::<u8>().ok().map(i128::from),
            Self::I16 => literal.parse::<i16>().ok().map(i128::from),
            Self::U16 => literal.parse::<u16>().ok().map(i128::from),
            Self::I32 => literal.parse::<i32>().ok().map(i128::from),
            Self::U32 => literal.parse::<u32>().ok().map(i128::from),
            Self::I64 => literal.parse::<i64>().ok().map(i128::from),
            Self::U64 => literal.parse::<u64>().ok().map(i128::from),
        }
    }
}

// -----------------------------------------------------------------------------
// EnumConstant

/// One named constant of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    name: Box<str>,
    value: i128,
}

impl EnumConstant {
    #[inline]
    pub(crate) fn new(name: Box<str>, value: i128) -> Self {
        Self { name, value }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> i128 {
        self.value
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// The closed name to value mapping of an enum, in declaration order.
///
/// Names are unique; values may repeat, in which case the constants are
/// aliases and lookups by value return the first declared one.
///
/// Built by [`EnumBuilder`](crate::registry::EnumBuilder), which validates
/// names and ranges.
#[derive(Debug, Clone)]
pub struct EnumInfo {
    underlying: IntegralKind,
    constants: Box<[EnumConstant]>,
    indices: HashMap<Box<str>, usize>,
}

impl EnumInfo {
    /// The caller guarantees unique names and in-range values.
    pub(crate) fn new(underlying: IntegralKind, constants: Box<[EnumConstant]>) -> Self {
        let indices = constants
            .iter()
            .enumerate()
            .map(|(index, constant)| (constant.name.clone(), index))
            .collect();
        Self {
            underlying,
            constants,
            indices,
        }
    }

    /// Returns the underlying integral type.
    #[inline]
    pub fn underlying(&self) -> IntegralKind {
        self.underlying
    }

    /// Returns the constant with exactly this name.
    pub fn constant(&self, name: &str) -> Option<&EnumConstant> {
        self.indices.get(name).map(|&index| &self.constants[index])
    }

    /// Returns the constant at the given declaration index.
    #[inline]
    pub fn constant_at(&self, index: usize) -> Option<&EnumConstant> {
        self.constants.get(index)
    }

    /// Returns the declaration index of the constant with this name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns the index of the first declared constant with this value.
    pub fn index_of_value(&self, value: i128) -> Option<usize> {
        self.constants.iter().position(|c| c.value == value)
    }

    /// Returns `true` if some constant has this value.
    #[inline]
    pub fn is_defined(&self, value: i128) -> bool {
        self.index_of_value(value).is_some()
    }

    /// Returns the constants in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &EnumConstant> {
        self.constants.iter()
    }

    /// Returns the number of constants.
    #[inline]
    pub fn len(&self) -> usize {
        self.constants.len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{EnumConstant, EnumInfo, IntegralKind};

    fn info() -> EnumInfo {
        let constants = vec![
            EnumConstant::new("Low".into(), 1),
            EnumConstant::new("Minimum".into(), 1),
            EnumConstant::new("High".into(), 9),
        ];
        EnumInfo::new(IntegralKind::U8, constants.into_boxed_slice())
    }

    #[test]
    fn aliases_resolve_to_first_declared() {
        let info = info();
        assert_eq!(info.index_of_value(1), Some(0));
        assert_eq!(info.index_of_value(9), Some(2));
        assert_eq!(info.index_of_value(2), None);
        assert!(info.is_defined(1));
    }

    #[test]
    fn lookup_by_name() {
        let info = info();
        assert_eq!(info.constant("Minimum").map(EnumConstant::value), Some(1));
        assert_eq!(info.index_of("High"), Some(2));
        assert_eq!(info.constant("high"), None);
        let names: vec::Vec<_> = info.iter().map(EnumConstant::name).collect();
        assert_eq!(names, ["Low", "Minimum", "High"]);
    }

    #[test]
    fn integral_ranges() {
        assert!(IntegralKind::I8.contains(-128));
        assert!(!IntegralKind::I8.contains(128));
        assert!(IntegralKind::U64.contains(u64::MAX as i128));
        assert!(!IntegralKind::U64.contains(-1));
        assert_eq!(IntegralKind::I64.parse("+42"), Some(42));
        assert_eq!(IntegralKind::I16.parse("4 2"), None);
    }
}
