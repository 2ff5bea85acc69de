//! Descriptors of the host type system.
//!
//! ## Menu
//!
//! - [`TypeHandle`]: a copyable key naming one registered type.
//! - [`MemberHandle`]: a type handle plus the index of one of its members.
//! - [`Target`]: either of the two, the subject of attachment queries.
//! - [`TypeFlags`]: structural flags such as `PRIMITIVE`, `ENUM` or `GENERIC`.
//! - [`Attachment`]: any `'static + Send + Sync + Debug` value attached to a type or member.
//! - [`AttachmentBag`]: the ordered attachments of one type or member.
//! - [`MemberDescriptor`]: a named field or property.
//! - [`EnumInfo`]: the closed, ordered name to value mapping of an enum.
//! - [`TypeDescriptor`]: everything known about one type.

// -----------------------------------------------------------------------------
// Modules

mod attachments;
mod descriptor;
mod enum_info;
mod flags;
mod handle;
mod member;

// -----------------------------------------------------------------------------
// Exports

pub use attachments::{Attachment, AttachmentBag};
pub use descriptor::TypeDescriptor;
pub use enum_info::{EnumConstant, EnumInfo, IntegralKind};
pub use flags::TypeFlags;
pub use handle::{MemberHandle, Target, TypeHandle};
pub use member::{MemberDescriptor, MemberKind};
