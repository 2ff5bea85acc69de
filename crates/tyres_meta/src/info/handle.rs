slotmap::new_key_type! {
    /// Handle to a type registered in a [`TypeRegistry`](crate::registry::TypeRegistry).
    ///
    /// Handles are cheap to copy and compare. `TypeHandle::default()` is the
    /// null handle: it never names a registered type, and every query on it
    /// fails with [`MetaError::InvalidDescriptor`](crate::MetaError::InvalidDescriptor).
    pub struct TypeHandle;
}

// -----------------------------------------------------------------------------
// MemberHandle

/// Handle to one member of a registered type.
///
/// Obtained from [`TypeProbe::member`](crate::probe::TypeProbe::member)
/// or [`TypeRegistry::member_handle`](crate::registry::TypeRegistry::member_handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberHandle {
    owner: TypeHandle,
    index: u32,
}

impl MemberHandle {
    #[inline]
    pub const fn new(owner: TypeHandle, index: u32) -> Self {
        Self { owner, index }
    }

    /// Returns the type declaring this member.
    #[inline]
    pub const fn owner(&self) -> TypeHandle {
        self.owner
    }

    /// Returns the declaration index of this member in its owner.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index as usize
    }
}

// -----------------------------------------------------------------------------
// Target

/// The subject of an attachment query: a type or one of its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Type(TypeHandle),
    Member(MemberHandle),
}

impl From<TypeHandle> for Target {
    #[inline(always)]
    fn from(value: TypeHandle) -> Self {
        Self::Type(value)
    }
}

impl From<MemberHandle> for Target {
    #[inline(always)]
    fn from(value: MemberHandle) -> Self {
        Self::Member(value)
    }
}
