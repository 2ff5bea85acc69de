use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::marker::PhantomData;

use crate::MetaError;
use crate::info::{AttachmentBag, Target, TypeHandle};
use crate::probe::TypeProbe;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// AttributeResolver

/// Finds the attachments of a kind on a type or member.
///
/// The kind of an attachment is its Rust type. Lookups without inheritance
/// only see what is declared on the target itself; with inheritance they
/// continue on every ancestor reached through
/// [`base_type`](TypeProbe::base_type), most derived first.
///
/// Ancestors only contribute inheritable attachments, see
/// [`AttachmentBag::with_sealed`]. For a member target the ancestors are the
/// members with the same name on the ancestors of the owning type.
///
/// # Examples
///
/// ```
/// use tyres_meta::registry::{TypeBuilder, TypeRegistry};
/// use tyres_meta::resolve::AttributeResolver;
///
/// #[derive(Debug, PartialEq)]
/// struct Rename(&'static str);
///
/// let mut registry = TypeRegistry::new();
/// let base = registry
///     .register(TypeBuilder::new("Base").attach(Rename("base")))
///     .unwrap();
/// let derived = registry
///     .register(TypeBuilder::new("Derived").base(base).attach(Rename("derived")))
///     .unwrap();
///
/// let resolver = AttributeResolver::new(&registry);
/// let own: Vec<_> = resolver.get_all::<Rename>(derived, false).unwrap().collect();
/// let all: Vec<_> = resolver.get_all::<Rename>(derived, true).unwrap().collect();
///
/// assert_eq!(own, [&Rename("derived")]);
/// assert_eq!(all, [&Rename("derived"), &Rename("base")]);
/// ```
pub struct AttributeResolver<'p, P: ?Sized = TypeRegistry> {
    probe: &'p P,
}

impl<P: ?Sized> Clone for AttributeResolver<'_, P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for AttributeResolver<'_, P> {}

impl<'p, P: TypeProbe + ?Sized> AttributeResolver<'p, P> {
    #[inline]
    pub const fn new(probe: &'p P) -> Self {
        Self { probe }
    }

    /// Returns the first attachment of kind `K` declared directly on `target`.
    pub fn get_one<K: Any>(&self, target: impl Into<Target>) -> Result<Option<&'p K>, MetaError> {
        Ok(self.probe.attachments(target.into())?.first::<K>())
    }

    /// Returns every attachment of kind `K` on `target`, optionally followed
    /// by the inheritable ones of its ancestors.
    ///
    /// The ancestry is walked when this is called, so an invalid target fails
    /// here rather than while iterating.
    pub fn get_all<K: Any>(
        &self,
        target: impl Into<Target>,
        include_inherited: bool,
    ) -> Result<Attachments<'p, K>, MetaError> {
        let target = target.into();
        let mut levels = Vec::new();
        levels.push(self.probe.attachments(target)?);

        if include_inherited {
            match target {
                Target::Type(ty) => {
                    for ancestor in Ancestors::new(self.probe, ty)? {
                        levels.push(self.probe.attachments(ancestor?.into())?);
                    }
                }
                Target::Member(member) => {
                    let name = self.probe.member_name(member)?;
                    for ancestor in Ancestors::new(self.probe, member.owner())? {
                        if let Some(inherited) = self.probe.member(ancestor?, name)? {
                            levels.push(self.probe.attachments(inherited.into())?);
                        }
                    }
                }
            }
        }

        Ok(Attachments::new(levels))
    }

    /// Returns `true` if `target` has an attachment of kind `K`.
    pub fn has<K: Any>(
        &self,
        target: impl Into<Target>,
        include_inherited: bool,
    ) -> Result<bool, MetaError> {
        Ok(self.get_all::<K>(target, include_inherited)?.next().is_some())
    }
}

// -----------------------------------------------------------------------------
// Ancestors

/// Strict ancestors of a type, nearest first.
struct Ancestors<'p, P: ?Sized> {
    probe: &'p P,
    next: Option<TypeHandle>,
}

impl<'p, P: TypeProbe + ?Sized> Ancestors<'p, P> {
    fn new(probe: &'p P, ty: TypeHandle) -> Result<Self, MetaError> {
        let next = probe.base_type(ty)?;
        Ok(Self { probe, next })
    }
}

impl<P: TypeProbe + ?Sized> Iterator for Ancestors<'_, P> {
    type Item = Result<TypeHandle, MetaError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        match self.probe.base_type(current) {
            Ok(base) => {
                self.next = base;
                Some(Ok(current))
            }
            Err(err) => {
                self.next = None;
                Some(Err(err))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Attachments

/// Iterator over attachments of kind `K`, returned by
/// [`AttributeResolver::get_all`].
///
/// A clone continues from the same position. Calling `get_all` again starts
/// over and yields the same sequence.
pub struct Attachments<'p, K> {
    levels: Vec<&'p AttachmentBag>,
    level: usize,
    index: usize,
    _marker: PhantomData<fn() -> K>,
}

impl<'p, K: Any> Attachments<'p, K> {
    #[inline]
    fn new(levels: Vec<&'p AttachmentBag>) -> Self {
        Self {
            levels,
            level: 0,
            index: 0,
            _marker: PhantomData,
        }
    }
}

impl<K> Clone for Attachments<'_, K> {
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
            level: self.level,
            index: self.index,
            _marker: PhantomData,
        }
    }
}

impl<K> fmt::Debug for Attachments<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachments")
            .field("levels", &self.levels.len())
            .field("level", &self.level)
            .field("index", &self.index)
            .finish()
    }
}

impl<'p, K: Any> Iterator for Attachments<'p, K> {
    type Item = &'p K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bag = *self.levels.get(self.level)?;
            // Level 0 is the target itself; sealed attachments stay there.
            match bag.find_from::<K>(self.index, self.level > 0) {
                Some((index, value)) => {
                    self.index = index + 1;
                    return Some(value);
                }
                None => {
                    self.level += 1;
                    self.index = 0;
                }
            }
        }
    }
}

impl<K: Any> core::iter::FusedIterator for Attachments<'_, K> {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::AttributeResolver;
    use crate::MetaError;
    use crate::info::{MemberDescriptor, MemberHandle, TypeHandle};
    use crate::registry::{TypeBuilder, TypeRegistry};

    #[derive(Debug, PartialEq)]
    struct Rename(&'static str);

    #[derive(Debug, PartialEq)]
    struct Required;

    #[derive(Debug, PartialEq)]
    struct Table(&'static str);

    struct Fixture {
        registry: TypeRegistry,
        base: TypeHandle,
        middle: TypeHandle,
        leaf: TypeHandle,
    }

    fn fixture() -> Fixture {
        let mut registry = TypeRegistry::new();
        let base = registry
            .register(
                TypeBuilder::new("Base")
                    .attach(Rename("base-1"))
                    .attach_sealed(Rename("base-sealed"))
                    .attach(Rename("base-2"))
                    .member(
                        MemberDescriptor::property("Id")
                            .with_attachment(Required)
                            .with_sealed_attachment(Rename("id-base")),
                    ),
            )
            .unwrap();
        let middle = registry
            .register(TypeBuilder::new("Middle").base(base).attach(Table("middle")))
            .unwrap();
        let leaf = registry
            .register(
                TypeBuilder::new("Leaf")
                    .base(middle)
                    .attach(Rename("leaf"))
                    .member(MemberDescriptor::property("Id").with_attachment(Rename("id-leaf"))),
            )
            .unwrap();
        Fixture {
            registry,
            base,
            middle,
            leaf,
        }
    }

    #[test]
    fn get_one_ignores_ancestors() {
        let f = fixture();
        let resolver = AttributeResolver::new(&f.registry);

        assert_eq!(resolver.get_one::<Rename>(f.leaf).unwrap(), Some(&Rename("leaf")));
        assert_eq!(resolver.get_one::<Rename>(f.middle).unwrap(), None);
        assert_eq!(resolver.get_one::<Rename>(f.base).unwrap(), Some(&Rename("base-1")));
    }

    #[test]
    fn inherited_is_ordered_superset() {
        let f = fixture();
        let resolver = AttributeResolver::new(&f.registry);

        let own: Vec<_> = resolver.get_all::<Rename>(f.base, false).unwrap().collect();
        assert_eq!(
            own,
            [&Rename("base-1"), &Rename("base-sealed"), &Rename("base-2")]
        );

        let all: Vec<_> = resolver.get_all::<Rename>(f.leaf, true).unwrap().collect();
        assert_eq!(all, [&Rename("leaf"), &Rename("base-1"), &Rename("base-2")]);

        let own: Vec<_> = resolver.get_all::<Rename>(f.leaf, false).unwrap().collect();
        assert_eq!(all[..own.len()], own[..]);
    }

    #[test]
    fn iterator_is_restartable() {
        let f = fixture();
        let resolver = AttributeResolver::new(&f.registry);

        let mut iter = resolver.get_all::<Rename>(f.leaf, true).unwrap();
        let fresh = iter.clone();
        assert_eq!(iter.next(), Some(&Rename("leaf")));
        assert_eq!(iter.clone().count(), 2);
        assert_eq!(fresh.count(), 3);
        let again: Vec<_> = resolver.get_all::<Rename>(f.leaf, true).unwrap().collect();
        assert_eq!(again.len(), 3);
    }

    #[test]
    fn member_inheritance() {
        let f = fixture();
        let resolver = AttributeResolver::new(&f.registry);
        let id = f.registry.member_handle(f.leaf, "Id").unwrap();

        assert!(!resolver.has::<Required>(id, false).unwrap());
        assert!(resolver.has::<Required>(id, true).unwrap());

        let names: Vec<_> = resolver.get_all::<Rename>(id, true).unwrap().collect();
        assert_eq!(names, [&Rename("id-leaf")]);
    }

    #[test]
    fn has_on_types() {
        let f = fixture();
        let resolver = AttributeResolver::new(&f.registry);

        assert!(resolver.has::<Table>(f.leaf, true).unwrap());
        assert!(!resolver.has::<Table>(f.leaf, false).unwrap());
        assert!(!resolver.has::<Table>(f.base, true).unwrap());
    }

    #[test]
    fn invalid_targets_fail_eagerly() {
        let f = fixture();
        let resolver = AttributeResolver::new(&f.registry);
        let stale = TypeHandle::default();

        assert!(matches!(
            resolver.get_all::<Rename>(stale, true),
            Err(MetaError::InvalidDescriptor(_))
        ));
        assert!(resolver.get_one::<Rename>(stale).is_err());
        assert!(resolver.has::<Rename>(MemberHandle::new(f.leaf, 9), false).is_err());
    }

    #[test]
    fn constructed_generics_see_definition_attachments() {
        let mut registry = TypeRegistry::new();
        let foo = registry.register(TypeBuilder::new("Foo")).unwrap();
        let list = registry
            .register(TypeBuilder::new("List").generic_params(&["T"]).attach(Table("list")))
            .unwrap();
        let list_foo = registry.instantiate(list, &[foo]).unwrap();
        let my_list = registry
            .register(TypeBuilder::new("MyList").base(list_foo).attach(Table("my_list")))
            .unwrap();

        let resolver = AttributeResolver::new(&registry);
        let tables: Vec<_> = resolver.get_all::<Table>(my_list, true).unwrap().collect();
        assert_eq!(tables, [&Table("my_list"), &Table("list")]);
    }
}
