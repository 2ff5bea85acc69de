use alloc::boxed::Box;
use core::fmt;

use crate::info::{Attachment, AttachmentBag, TypeHandle};

// -----------------------------------------------------------------------------
// MemberKind

/// The form of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.pad("Field"),
            Self::Property => f.pad("Property"),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// A named field or property of a type, with its own attachments.
///
/// # Examples
///
/// ```
/// use tyres_meta::info::{MemberDescriptor, MemberKind};
///
/// #[derive(Debug)]
/// struct Required;
///
/// let member = MemberDescriptor::property("Status").with_attachment(Required);
/// assert_eq!(member.name(), "Status");
/// assert_eq!(member.kind(), MemberKind::Property);
/// assert!(member.attachments().contains::<Required>());
/// ```
#[derive(Debug)]
pub struct MemberDescriptor {
    name: Box<str>,
    kind: MemberKind,
    ty: Option<TypeHandle>,
    attachments: AttachmentBag,
}

impl MemberDescriptor {
    /// Creates a member of the given kind, without a declared type.
    pub fn new(name: impl Into<Box<str>>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ty: None,
            attachments: AttachmentBag::new(),
        }
    }

    #[inline]
    pub fn field(name: impl Into<Box<str>>) -> Self {
        Self::new(name, MemberKind::Field)
    }

    #[inline]
    pub fn property(name: impl Into<Box<str>>) -> Self {
        Self::new(name, MemberKind::Property)
    }

    /// Sets the declared type of the member.
    #[inline]
    pub fn with_type(mut self, ty: TypeHandle) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Adds an inheritable attachment.
    #[inline]
    pub fn with_attachment<T: Attachment>(mut self, value: T) -> Self {
        self.attachments.push(value, true);
        self
    }

    /// Adds an attachment that overriding members in derived types do not see.
    #[inline]
    pub fn with_sealed_attachment<T: Attachment>(mut self, value: T) -> Self {
        self.attachments.push(value, false);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Returns the declared type, if any.
    #[inline]
    pub fn ty(&self) -> Option<TypeHandle> {
        self.ty
    }

    #[inline]
    pub fn attachments(&self) -> &AttachmentBag {
        &self.attachments
    }
}
