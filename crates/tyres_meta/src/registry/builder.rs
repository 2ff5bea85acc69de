use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{Attachment, AttachmentBag, IntegralKind, MemberDescriptor, TypeFlags, TypeHandle};

/// Flags set by the registry from the shape of a type, never by hand.
const STRUCTURAL_FLAGS: TypeFlags = TypeFlags::ENUM
    .union(TypeFlags::GENERIC)
    .union(TypeFlags::GENERIC_DEFINITION)
    .union(TypeFlags::INTERFACE);

// -----------------------------------------------------------------------------
// BaseSpec

#[derive(Debug, Clone, Copy)]
pub(crate) enum BaseSpec {
    Root,
    Type(TypeHandle),
    Detached,
}

// -----------------------------------------------------------------------------
// TypeBuilder

/// Describes a type before it is registered.
///
/// Types are public and derive from the registry root unless told otherwise.
///
/// # Examples
///
/// ```
/// use tyres_meta::info::{MemberDescriptor, TypeFlags};
/// use tyres_meta::registry::{TypeBuilder, TypeRegistry};
///
/// #[derive(Debug)]
/// struct XmlRoot(&'static str);
///
/// let mut registry = TypeRegistry::new();
/// let int = registry.get_with_type_path("i32").unwrap();
///
/// let point = registry
///     .register(
///         TypeBuilder::new("Point")
///             .path("geometry.Point")
///             .value_type()
///             .attach(XmlRoot("point"))
///             .member(MemberDescriptor::field("X").with_type(int))
///             .member(MemberDescriptor::field("Y").with_type(int)),
///     )
///     .unwrap();
///
/// let descriptor = registry.get(point).unwrap();
/// assert_eq!(descriptor.path(), "geometry.Point");
/// assert!(descriptor.flags().contains(TypeFlags::VALUE_TYPE | TypeFlags::PUBLIC));
/// assert_eq!(descriptor.base(), Some(registry.root()));
/// assert_eq!(descriptor.members().len(), 2);
/// ```
#[derive(Debug)]
pub struct TypeBuilder {
    pub(crate) name: Box<str>,
    pub(crate) path: Option<Box<str>>,
    pub(crate) flags: TypeFlags,
    pub(crate) base: BaseSpec,
    pub(crate) generic_params: Vec<Box<str>>,
    pub(crate) attachments: AttachmentBag,
    pub(crate) members: Vec<MemberDescriptor>,
}

impl TypeBuilder {
    /// Starts a public type deriving from the root.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            path: None,
            flags: TypeFlags::PUBLIC,
            base: BaseSpec::Root,
            generic_params: Vec::new(),
            attachments: AttachmentBag::new(),
            members: Vec::new(),
        }
    }

    /// Sets the unique path; defaults to the name.
    ///
    /// Generic definitions get `<>` appended, e.g. `Dictionary<,>`.
    #[inline]
    pub fn path(mut self, path: impl Into<Box<str>>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds flags such as `VALUE_TYPE` or `PRIMITIVE`.
    ///
    /// `ENUM`, `GENERIC`, `GENERIC_DEFINITION` and `INTERFACE` are ignored:
    /// they follow from [`EnumBuilder`], [`generic_params`](Self::generic_params)
    /// and [`interface`](Self::interface).
    #[inline]
    pub fn flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags.difference(STRUCTURAL_FLAGS);
        self
    }

    #[inline]
    pub fn value_type(self) -> Self {
        self.flags(TypeFlags::VALUE_TYPE)
    }

    #[inline]
    pub fn primitive(self) -> Self {
        self.flags(TypeFlags::PRIMITIVE | TypeFlags::VALUE_TYPE)
    }

    #[inline]
    pub fn nested_public(self) -> Self {
        self.flags(TypeFlags::NESTED_PUBLIC)
    }

    /// Clears the `PUBLIC` flag.
    #[inline]
    pub fn private(mut self) -> Self {
        self.flags.remove(TypeFlags::PUBLIC);
        self
    }

    /// Derives from `base` instead of the root.
    #[inline]
    pub fn base(mut self, base: TypeHandle) -> Self {
        self.base = BaseSpec::Type(base);
        self
    }

    /// Makes an interface-like type without any ancestry.
    #[inline]
    pub fn interface(mut self) -> Self {
        self.base = BaseSpec::Detached;
        self.flags.insert(TypeFlags::INTERFACE);
        self
    }

    /// Makes a generic definition with the given parameter names.
    pub fn generic_params(mut self, params: &[&str]) -> Self {
        self.generic_params = params.iter().map(|&param| param.into()).collect();
        self
    }

    /// Adds an attachment inherited by derived types.
    #[inline]
    pub fn attach<T: Attachment>(mut self, value: T) -> Self {
        self.attachments.push(value, true);
        self
    }

    /// Adds an attachment only visible on this type.
    #[inline]
    pub fn attach_sealed<T: Attachment>(mut self, value: T) -> Self {
        self.attachments.push(value, false);
        self
    }

    /// Declares a member; declaration order is kept.
    #[inline]
    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }
}

// -----------------------------------------------------------------------------
// EnumBuilder

/// Describes an enum before it is registered.
///
/// Constants keep their declaration order, which decides ties when several
/// constants could match one token.
///
/// # Examples
///
/// ```
/// use tyres_meta::registry::{EnumBuilder, IntegralKind, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// let level = registry
///     .register_enum(
///         EnumBuilder::new("Level", IntegralKind::U8)
///             .constant("Low", 0)
///             .constant("High", 255),
///     )
///     .unwrap();
///
/// let info = registry.get(level).unwrap().enum_info().unwrap();
/// assert_eq!(info.len(), 2);
///
/// // 256 does not fit in `u8`
/// let overflow = EnumBuilder::new("Overflow", IntegralKind::U8).constant("Big", 256);
/// assert!(registry.register_enum(overflow).is_err());
/// ```
#[derive(Debug)]
pub struct EnumBuilder {
    pub(crate) name: Box<str>,
    pub(crate) path: Option<Box<str>>,
    pub(crate) flags: TypeFlags,
    pub(crate) underlying: IntegralKind,
    pub(crate) constants: Vec<(Box<str>, i128)>,
    pub(crate) attachments: AttachmentBag,
}

impl EnumBuilder {
    /// Starts a public enum with the given underlying integral type.
    pub fn new(name: impl Into<Box<str>>, underlying: IntegralKind) -> Self {
        Self {
            name: name.into(),
            path: None,
            flags: TypeFlags::PUBLIC,
            underlying,
            constants: Vec::new(),
            attachments: AttachmentBag::new(),
        }
    }

    /// Sets the unique path; defaults to the name.
    #[inline]
    pub fn path(mut self, path: impl Into<Box<str>>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Declares the next constant.
    #[inline]
    pub fn constant(mut self, name: impl Into<Box<str>>, value: i128) -> Self {
        self.constants.push((name.into(), value));
        self
    }

    #[inline]
    pub fn nested_public(mut self) -> Self {
        self.flags |= TypeFlags::NESTED_PUBLIC;
        self
    }

    /// Clears the `PUBLIC` flag.
    #[inline]
    pub fn private(mut self) -> Self {
        self.flags.remove(TypeFlags::PUBLIC);
        self
    }

    #[inline]
    pub fn attach<T: Attachment>(mut self, value: T) -> Self {
        self.attachments.push(value, true);
        self
    }

    #[inline]
    pub fn attach_sealed<T: Attachment>(mut self, value: T) -> Self {
        self.attachments.push(value, false);
        self
    }
}
