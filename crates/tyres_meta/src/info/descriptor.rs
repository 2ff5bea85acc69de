use alloc::boxed::Box;

use crate::info::{AttachmentBag, EnumInfo, MemberDescriptor, TypeFlags, TypeHandle};

/// Everything a registry knows about one type.
///
/// Descriptors are created by [`TypeRegistry`](crate::registry::TypeRegistry)
/// and never change afterwards.
///
/// For a constructed generic type such as `List<Foo>`, attachments and
/// members live on the generic definition; the descriptor itself only holds
/// the definition link and the generic arguments. Query them through
/// [`TypeProbe`](crate::probe::TypeProbe), which follows that link.
#[derive(Debug)]
pub struct TypeDescriptor {
    pub(crate) name: Box<str>,
    pub(crate) path: Box<str>,
    pub(crate) flags: TypeFlags,
    pub(crate) base: Option<TypeHandle>,
    pub(crate) generic_definition: Option<TypeHandle>,
    pub(crate) generic_params: Box<[Box<str>]>,
    pub(crate) generic_args: Box<[TypeHandle]>,
    pub(crate) attachments: AttachmentBag,
    pub(crate) members: Box<[MemberDescriptor]>,
    pub(crate) enum_info: Option<EnumInfo>,
}

impl TypeDescriptor {
    /// Returns the short name, e.g. `List<Foo>`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique path, e.g. `System.Collections.Generic.List<Foo>`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// Returns the immediate base type; `None` for the root and for
    /// interface-like types.
    #[inline]
    pub fn base(&self) -> Option<TypeHandle> {
        self.base
    }

    /// Returns the generic definition of a constructed generic type.
    #[inline]
    pub fn generic_definition(&self) -> Option<TypeHandle> {
        self.generic_definition
    }

    /// Returns the parameter names of a generic definition.
    #[inline]
    pub fn generic_params(&self) -> &[Box<str>] {
        &self.generic_params
    }

    /// Returns the arguments of a constructed generic type.
    #[inline]
    pub fn generic_args(&self) -> &[TypeHandle] {
        &self.generic_args
    }

    /// Returns the attachments declared on this descriptor.
    #[inline]
    pub fn attachments(&self) -> &AttachmentBag {
        &self.attachments
    }

    /// Returns the members declared on this descriptor.
    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    #[inline]
    pub fn enum_info(&self) -> Option<&EnumInfo> {
        self.enum_info.as_ref()
    }
}
