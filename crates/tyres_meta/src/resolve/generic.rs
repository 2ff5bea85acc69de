use crate::MetaError;
use crate::info::TypeHandle;
use crate::probe::TypeProbe;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// GenericHierarchyMatcher

/// Answers "is this type some `List<T>`?".
///
/// A type matches a generic definition when the type itself, or one of its
/// ancestors, is that definition or a construction of it. The walk stops at
/// the universal root, which never matches.
///
/// Nothing is cached; each query walks the ancestry again.
///
/// # Examples
///
/// ```
/// use tyres_meta::registry::{TypeBuilder, TypeRegistry};
/// use tyres_meta::resolve::GenericHierarchyMatcher;
///
/// let mut registry = TypeRegistry::new();
/// let foo = registry.register(TypeBuilder::new("Foo")).unwrap();
/// let list = registry
///     .register(TypeBuilder::new("List").generic_params(&["T"]))
///     .unwrap();
/// let list_foo = registry.instantiate(list, &[foo]).unwrap();
/// let my_list = registry
///     .register(TypeBuilder::new("MyList").base(list_foo))
///     .unwrap();
///
/// let matcher = GenericHierarchyMatcher::new(&registry);
/// assert!(matcher.derives_from_raw_generic(my_list, list).unwrap());
/// assert!(!matcher.derives_from_raw_generic(foo, list).unwrap());
///
/// // The matching ancestor carries the generic arguments.
/// assert_eq!(matcher.find_raw_generic_ancestor(my_list, list).unwrap(), Some(list_foo));
/// ```
pub struct GenericHierarchyMatcher<'p, P: ?Sized = TypeRegistry> {
    probe: &'p P,
}

impl<P: ?Sized> Clone for GenericHierarchyMatcher<'_, P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for GenericHierarchyMatcher<'_, P> {}

impl<'p, P: TypeProbe + ?Sized> GenericHierarchyMatcher<'p, P> {
    #[inline]
    pub const fn new(probe: &'p P) -> Self {
        Self { probe }
    }

    /// Returns `true` if `candidate` is, or derives from, a construction of
    /// `generic_definition`.
    #[inline]
    pub fn derives_from_raw_generic(
        &self,
        candidate: TypeHandle,
        generic_definition: TypeHandle,
    ) -> Result<bool, MetaError> {
        Ok(self
            .find_raw_generic_ancestor(candidate, generic_definition)?
            .is_some())
    }

    /// Returns the first type in the ancestry of `candidate`, itself
    /// included, whose generic definition is `generic_definition`.
    pub fn find_raw_generic_ancestor(
        &self,
        candidate: TypeHandle,
        generic_definition: TypeHandle,
    ) -> Result<Option<TypeHandle>, MetaError> {
        self.probe.flags(generic_definition)?;

        let root = self.probe.root();
        let mut current = candidate;
        loop {
            if current == root {
                return Ok(None);
            }
            let comparable = if self.probe.is_generic(current)? {
                self.probe.generic_definition(current)?
            } else {
                Some(current)
            };
            if comparable == Some(generic_definition) {
                return Ok(Some(current));
            }
            match self.probe.base_type(current)? {
                Some(base) => current = base,
                None => return Ok(None),
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::GenericHierarchyMatcher;
    use crate::MetaError;
    use crate::info::TypeHandle;
    use crate::probe::TypeProbe;
    use crate::registry::{TypeBuilder, TypeRegistry};

    struct Fixture {
        registry: TypeRegistry,
        foo: TypeHandle,
        list: TypeHandle,
        dict: TypeHandle,
        list_foo: TypeHandle,
        my_list: TypeHandle,
    }

    fn fixture() -> Fixture {
        let mut registry = TypeRegistry::new();
        let foo = registry.register(TypeBuilder::new("Foo")).unwrap();
        let list = registry
            .register(TypeBuilder::new("List").generic_params(&["T"]))
            .unwrap();
        let dict = registry
            .register(TypeBuilder::new("Dictionary").generic_params(&["K", "V"]))
            .unwrap();
        let list_foo = registry.instantiate(list, &[foo]).unwrap();
        let my_list = registry
            .register(TypeBuilder::new("MyList").base(list_foo))
            .unwrap();
        Fixture {
            registry,
            foo,
            list,
            dict,
            list_foo,
            my_list,
        }
    }

    #[test]
    fn derived_list_matches_list_only() {
        let f = fixture();
        let matcher = GenericHierarchyMatcher::new(&f.registry);

        assert!(matcher.derives_from_raw_generic(f.my_list, f.list).unwrap());
        assert!(!matcher.derives_from_raw_generic(f.my_list, f.dict).unwrap());
        assert!(matcher.derives_from_raw_generic(f.list_foo, f.list).unwrap());
        assert!(matcher.derives_from_raw_generic(f.list, f.list).unwrap());
    }

    #[test]
    fn ancestor_exposes_arguments() {
        let f = fixture();
        let matcher = GenericHierarchyMatcher::new(&f.registry);

        let ancestor = matcher.find_raw_generic_ancestor(f.my_list, f.list).unwrap();
        assert_eq!(ancestor, Some(f.list_foo));
        assert_eq!(f.registry.generic_arguments(f.list_foo).unwrap(), [f.foo]);
    }

    #[test]
    fn root_and_interfaces_never_match() {
        let mut f = fixture();
        let shape = f
            .registry
            .register(TypeBuilder::new("IShape").interface())
            .unwrap();
        let matcher = GenericHierarchyMatcher::new(&f.registry);

        assert!(!matcher.derives_from_raw_generic(f.registry.root(), f.list).unwrap());
        assert!(!matcher.derives_from_raw_generic(shape, f.list).unwrap());
        assert!(!matcher.derives_from_raw_generic(f.foo, f.list).unwrap());
    }

    #[test]
    fn invalid_handles_fail() {
        let f = fixture();
        let matcher = GenericHierarchyMatcher::new(&f.registry);
        let stale = TypeHandle::default();

        assert!(matches!(
            matcher.derives_from_raw_generic(stale, f.list),
            Err(MetaError::InvalidDescriptor(_))
        ));
        assert!(matcher.derives_from_raw_generic(f.my_list, stale).is_err());
    }
}
