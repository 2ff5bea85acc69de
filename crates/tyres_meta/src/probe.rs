//! Uniform capability queries over a host type system.
//!
//! [`TypeProbe`] is the only seam between the resolvers and the host. The
//! built-in [`TypeRegistry`] implements it; an adapter over another source of
//! type information implements it once and gets every resolver for free.

use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::MetaError;
use crate::info::{AttachmentBag, EnumInfo, MemberDescriptor, MemberHandle, Target};
use crate::info::{TypeFlags, TypeHandle};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// TypeProbe

/// Structural questions about the types of a host.
///
/// Every query fails with [`MetaError::InvalidDescriptor`] when the handle
/// does not name a type of this host. Hosts that can refuse a request for
/// other reasons report [`MetaError::Host`].
///
/// The trait is dyn-compatible, so resolvers can work over
/// `&dyn TypeProbe` as well as over a concrete host.
///
/// # Examples
///
/// ```
/// use tyres_meta::probe::TypeProbe;
/// use tyres_meta::registry::{TypeBuilder, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// let list = registry
///     .register(TypeBuilder::new("List").generic_params(&["T"]))
///     .unwrap();
/// let int = registry.get_with_type_path("i32").unwrap();
/// let list_int = registry.instantiate(list, &[int]).unwrap();
///
/// assert!(registry.is_primitive(int).unwrap());
/// assert!(registry.is_generic(list_int).unwrap());
/// assert_eq!(registry.generic_definition(list_int).unwrap(), Some(list));
/// assert_eq!(registry.generic_definition(list).unwrap(), Some(list));
/// assert_eq!(registry.generic_definition(int).unwrap(), None);
/// ```
pub trait TypeProbe {
    /// Returns the universal root type, where ancestry walks stop.
    fn root(&self) -> TypeHandle;

    /// Returns the short name of a type.
    fn name(&self, ty: TypeHandle) -> Result<&str, MetaError>;

    /// Returns the unique path of a type.
    fn path(&self, ty: TypeHandle) -> Result<&str, MetaError>;

    fn flags(&self, ty: TypeHandle) -> Result<TypeFlags, MetaError>;

    /// Returns the immediate base type, if any.
    fn base_type(&self, ty: TypeHandle) -> Result<Option<TypeHandle>, MetaError>;

    /// Returns the generic definition of a generic type.
    ///
    /// A definition reports itself, a constructed type reports its
    /// definition, and non-generic types report `None`.
    fn generic_definition(&self, ty: TypeHandle) -> Result<Option<TypeHandle>, MetaError>;

    /// Returns the arguments of a constructed generic type; empty otherwise.
    fn generic_arguments(&self, ty: TypeHandle) -> Result<&[TypeHandle], MetaError>;

    /// Returns the attachments declared directly on a type or member.
    fn attachments(&self, target: Target) -> Result<&AttachmentBag, MetaError>;

    /// Returns the members declared on a type.
    fn members(&self, ty: TypeHandle) -> Result<&[MemberDescriptor], MetaError>;

    /// Returns the member of `ty` named `name`.
    fn member(&self, ty: TypeHandle, name: &str) -> Result<Option<MemberHandle>, MetaError>;

    fn member_name(&self, member: MemberHandle) -> Result<&str, MetaError>;

    /// Returns the enum info of an enum type; `None` for other types.
    fn enum_info(&self, ty: TypeHandle) -> Result<Option<&EnumInfo>, MetaError>;

    #[inline]
    fn is_primitive(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::PRIMITIVE))
    }

    #[inline]
    fn is_enum(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::ENUM))
    }

    #[inline]
    fn is_value_type(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::VALUE_TYPE))
    }

    #[inline]
    fn is_public(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::PUBLIC))
    }

    #[inline]
    fn is_nested_public(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::NESTED_PUBLIC))
    }

    /// Returns `true` for generic definitions and constructed generic types.
    #[inline]
    fn is_generic(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::GENERIC))
    }

    #[inline]
    fn is_generic_definition(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::GENERIC_DEFINITION))
    }

    #[inline]
    fn is_interface(&self, ty: TypeHandle) -> Result<bool, MetaError> {
        Ok(self.flags(ty)?.contains(TypeFlags::INTERFACE))
    }

    /// Returns `true` if `ty` is the universal root.
    ///
    /// An invalid handle is never the root.
    #[inline]
    fn is_root(&self, ty: TypeHandle) -> bool {
        ty == self.root()
    }
}

// -----------------------------------------------------------------------------
// Forwarding impls

macro_rules! impl_forward {
    ($($ptr:ty),*) => {$(
        impl<P: TypeProbe + ?Sized> TypeProbe for $ptr {
            #[inline]
            fn root(&self) -> TypeHandle {
                (**self).root()
            }
            #[inline]
            fn name(&self, ty: TypeHandle) -> Result<&str, MetaError> {
                (**self).name(ty)
            }
            #[inline]
            fn path(&self, ty: TypeHandle) -> Result<&str, MetaError> {
                (**self).path(ty)
            }
            #[inline]
            fn flags(&self, ty: TypeHandle) -> Result<TypeFlags, MetaError> {
                (**self).flags(ty)
            }
            #[inline]
            fn base_type(&self, ty: TypeHandle) -> Result<Option<TypeHandle>, MetaError> {
                (**self).base_type(ty)
            }
            #[inline]
            fn generic_definition(&self, ty: TypeHandle) -> Result<Option<TypeHandle>, MetaError> {
                (**self).generic_definition(ty)
            }
            #[inline]
            fn generic_arguments(&self, ty: TypeHandle) -> Result<&[TypeHandle], MetaError> {
                (**self).generic_arguments(ty)
            }
            #[inline]
            fn attachments(&self, target: Target) -> Result<&AttachmentBag, MetaError> {
                (**self).attachments(target)
            }
            #[inline]
            fn members(&self, ty: TypeHandle) -> Result<&[MemberDescriptor], MetaError> {
                (**self).members(ty)
            }
            #[inline]
            fn member(&self, ty: TypeHandle, name: &str) -> Result<Option<MemberHandle>, MetaError> {
                (**self).member(ty, name)
            }
            #[inline]
            fn member_name(&self, member: MemberHandle) -> Result<&str, MetaError> {
                (**self).member_name(member)
            }
            #[inline]
            fn enum_info(&self, ty: TypeHandle) -> Result<Option<&EnumInfo>, MetaError> {
                (**self).enum_info(ty)
            }
        }
    )*};
}

impl_forward!(&P, Box<P>, Arc<P>);

// -----------------------------------------------------------------------------
// TypeRegistry

impl TypeRegistry {
    #[inline]
    fn descriptor(&self, ty: TypeHandle) -> Result<&crate::info::TypeDescriptor, MetaError> {
        self.get(ty).ok_or_else(|| MetaError::invalid(ty))
    }
}

impl TypeProbe for TypeRegistry {
    #[inline]
    fn root(&self) -> TypeHandle {
        TypeRegistry::root(self)
    }

    fn name(&self, ty: TypeHandle) -> Result<&str, MetaError> {
        Ok(self.descriptor(ty)?.name())
    }

    fn path(&self, ty: TypeHandle) -> Result<&str, MetaError> {
        Ok(self.descriptor(ty)?.path())
    }

    fn flags(&self, ty: TypeHandle) -> Result<TypeFlags, MetaError> {
        Ok(self.descriptor(ty)?.flags())
    }

    fn base_type(&self, ty: TypeHandle) -> Result<Option<TypeHandle>, MetaError> {
        Ok(self.descriptor(ty)?.base())
    }

    fn generic_definition(&self, ty: TypeHandle) -> Result<Option<TypeHandle>, MetaError> {
        let descriptor = self.descriptor(ty)?;
        if descriptor.flags().contains(TypeFlags::GENERIC_DEFINITION) {
            Ok(Some(ty))
        } else {
            Ok(descriptor.generic_definition())
        }
    }

    fn generic_arguments(&self, ty: TypeHandle) -> Result<&[TypeHandle], MetaError> {
        Ok(self.descriptor(ty)?.generic_args())
    }

    fn attachments(&self, target: Target) -> Result<&AttachmentBag, MetaError> {
        match target {
            Target::Type(ty) => self
                .shape(ty)
                .map(|shape| shape.attachments())
                .ok_or_else(|| MetaError::invalid(ty)),
            Target::Member(member) => self
                .get_member(member)
                .map(MemberDescriptor::attachments)
                .ok_or_else(|| MetaError::invalid(member)),
        }
    }

    fn members(&self, ty: TypeHandle) -> Result<&[MemberDescriptor], MetaError> {
        self.shape(ty)
            .map(|shape| shape.members())
            .ok_or_else(|| MetaError::invalid(ty))
    }

    fn member(&self, ty: TypeHandle, name: &str) -> Result<Option<MemberHandle>, MetaError> {
        self.descriptor(ty)?;
        Ok(self.member_handle(ty, name))
    }

    fn member_name(&self, member: MemberHandle) -> Result<&str, MetaError> {
        self.get_member(member)
            .map(MemberDescriptor::name)
            .ok_or_else(|| MetaError::invalid(member))
    }

    fn enum_info(&self, ty: TypeHandle) -> Result<Option<&EnumInfo>, MetaError> {
        Ok(self.descriptor(ty)?.enum_info())
    }
}

// -----------------------------------------------------------------------------
// Tests
