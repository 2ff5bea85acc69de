use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Attachment

/// A declarative fact attached to a type or member, similar to a C# attribute.
///
/// The *kind* of an attachment is its Rust type. Any `'static` value that is
/// `Send + Sync + Debug` qualifies.
pub trait Attachment: Any + Send + Sync + fmt::Debug {}

impl<T: Any + Send + Sync + fmt::Debug> Attachment for T {}

// -----------------------------------------------------------------------------
// AttachmentBag

struct Entry {
    id: TypeId,
    inheritable: bool,
    value: Box<dyn Attachment>,
}

/// The attachments declared on one type or member, in declaration order.
///
/// Unlike a map keyed by kind, a bag may hold several attachments of the same
/// kind. Each attachment records whether it is visible from derived types;
/// see [`with_sealed`](Self::with_sealed).
///
/// # Examples
///
/// ```
/// use tyres_meta::info::AttachmentBag;
///
/// #[derive(Debug, PartialEq)]
/// struct Alias(&'static str);
///
/// let bag = AttachmentBag::new()
///     .with(Alias("a"))
///     .with(7u32)
///     .with(Alias("b"));
///
/// assert_eq!(bag.first::<Alias>(), Some(&Alias("a")));
/// assert_eq!(bag.iter_of::<Alias>().count(), 2);
/// assert!(bag.contains::<u32>());
/// assert!(!bag.contains::<i32>());
/// ```
#[derive(Default)]
pub struct AttachmentBag {
    entries: Vec<Entry>,
}

impl AttachmentBag {
    /// A static reference to an empty bag.
    pub const EMPTY: &'static Self = &Self::new();

    /// Creates an empty bag.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an attachment that derived types inherit.
    #[inline]
    pub fn with<T: Attachment>(mut self, value: T) -> Self {
        self.push(value, true);
        self
    }

    /// Adds an attachment that is only visible on the declaring type or member.
    #[inline]
    pub fn with_sealed<T: Attachment>(mut self, value: T) -> Self {
        self.push(value, false);
        self
    }

    /// Appends an attachment.
    pub fn push<T: Attachment>(&mut self, value: T, inheritable: bool) {
        self.entries.push(Entry {
            id: TypeId::of::<T>(),
            inheritable,
            value: Box::new(value),
        });
    }

    /// Returns the first attachment of kind `T`, if present.
    pub fn first<T: Any>(&self) -> Option<&T> {
        self.find_from::<T>(0, false).map(|(_, value)| value)
    }

    /// Returns every attachment of kind `T` in declaration order.
    pub fn iter_of<T: Any>(&self) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter(|entry| entry.id == TypeId::of::<T>())
            .filter_map(|entry| (&*entry.value as &dyn Any).downcast_ref())
    }

    /// Returns `true` if an attachment of kind `T` is present.
    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.contains_by_id(TypeId::of::<T>())
    }

    /// Returns `true` if an attachment with the given kind id is present.
    #[inline]
    pub fn contains_by_id(&self, id: TypeId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Returns an iterator over `(kind, attachment)` pairs in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (TypeId, &dyn Attachment)> {
        self.entries.iter().map(|entry| (entry.id, &*entry.value))
    }

    /// Returns the number of attachments.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bag holds no attachment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the next attachment of kind `T` at or after `start`.
    ///
    /// With `inheritable_only`, sealed attachments are skipped.
    pub(crate) fn find_from<T: Any>(
        &self,
        start: usize,
        inheritable_only: bool,
    ) -> Option<(usize, &T)> {
        let id = TypeId::of::<T>();
        self.entries
            .iter()
            .enumerate()
            .skip(start)
            .filter(|(_, entry)| entry.id == id && (entry.inheritable || !inheritable_only))
            .find_map(|(index, entry)| {
                (&*entry.value as &dyn Any)
                    .downcast_ref()
                    .map(|value| (index, value))
            })
    }
}

impl fmt::Debug for AttachmentBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.value))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::AttachmentBag;

    #[derive(Debug, PartialEq)]
    struct Rename(&'static str);

    #[test]
    fn keeps_declaration_order() {
        let bag = AttachmentBag::new()
            .with(Rename("first"))
            .with(1u8)
            .with_sealed(Rename("second"))
            .with(Rename("third"));

        let names: Vec<_> = bag.iter_of::<Rename>().map(|r| r.0).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(bag.len(), 4);
    }

    #[test]
    fn find_from_skips_sealed() {
        let bag = AttachmentBag::new()
            .with_sealed(Rename("sealed"))
            .with(Rename("open"));

        assert_eq!(bag.find_from::<Rename>(0, false), Some((0, &Rename("sealed"))));
        assert_eq!(bag.find_from::<Rename>(0, true), Some((1, &Rename("open"))));
        assert_eq!(bag.find_from::<Rename>(2, false), None);
    }

    #[test]
    fn empty_bag() {
        let bag = AttachmentBag::EMPTY;
        assert!(bag.is_empty());
        assert_eq!(bag.first::<Rename>(), None);
        assert_eq!(alloc::format!("{bag:?}"), "[]");
    }
}
