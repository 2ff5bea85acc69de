use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use slotmap::SlotMap;

use crate::RegisterError;
use crate::hash::{HashMap, HashSet};
use crate::info::{AttachmentBag, EnumConstant, EnumInfo, IntegralKind, MemberDescriptor};
use crate::info::{MemberHandle, TypeDescriptor, TypeFlags, TypeHandle};
use crate::registry::builder::{BaseSpec, EnumBuilder, TypeBuilder};

/// Path and name of the universal root type.
const ROOT_NAME: &str = "object";

/// `(name, flags)` of the types registered by [`TypeRegistry::new`].
const BUILTIN_TYPES: &[(&str, TypeFlags)] = &[
    ("bool", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("char", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("i8", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("u8", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("i16", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("u16", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("i32", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("u32", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("i64", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("u64", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("f32", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("f64", TypeFlags::PRIMITIVE.union(TypeFlags::VALUE_TYPE)),
    ("string", TypeFlags::empty()),
];

// -----------------------------------------------------------------------------
// TypeRegistry

/// The host type system: a store of [`TypeDescriptor`]s.
///
/// Types are registered once, usually at startup, and then queried through
/// [`TypeProbe`](crate::probe::TypeProbe) and the resolvers. Registration
/// needs `&mut self`; queries only need `&self`, so a built registry can be
/// shared between threads without locking.
///
/// Every registry holds a universal root type named `object`. Types derive
/// from it unless they name another base or are interface-like. A base must
/// be registered before the types deriving from it, so ancestry chains are
/// finite and acyclic.
///
/// # Example
///
/// ```
/// use tyres_meta::registry::{TypeBuilder, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// let animal = registry.register(TypeBuilder::new("Animal")).unwrap();
/// let dog = registry.register(TypeBuilder::new("Dog").base(animal)).unwrap();
///
/// assert_eq!(registry.get(dog).unwrap().base(), Some(animal));
/// assert_eq!(registry.get(animal).unwrap().base(), Some(registry.root()));
/// assert_eq!(registry.get_with_type_name("Dog"), Some(dog));
/// ```
pub struct TypeRegistry {
    types: SlotMap<TypeHandle, TypeDescriptor>,
    path_to_handle: HashMap<Box<str>, TypeHandle>,
    name_to_handle: HashMap<Box<str>, TypeHandle>,
    ambiguous_names: HashSet<Box<str>>,
    instantiations: HashMap<(TypeHandle, Box<[TypeHandle]>), TypeHandle>,
    root: TypeHandle,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry holding only the root type.
    pub fn empty() -> Self {
        let mut types = SlotMap::with_key();
        let root = types.insert(TypeDescriptor {
            name: ROOT_NAME.into(),
            path: ROOT_NAME.into(),
            flags: TypeFlags::PUBLIC,
            base: None,
            generic_definition: None,
            generic_params: Box::new([]),
            generic_args: Box::new([]),
            attachments: AttachmentBag::new(),
            members: Box::new([]),
            enum_info: None,
        });

        let mut registry = Self {
            types,
            path_to_handle: HashMap::default(),
            name_to_handle: HashMap::default(),
            ambiguous_names: HashSet::default(),
            instantiations: HashMap::default(),
            root,
        };
        registry.add_indices(root);
        registry
    }

    /// Creates a registry with the root and the built-in types:
    ///
    /// - `bool` `char`
    /// - `i8 - i64` `u8 - u64`
    /// - `f32` `f64`
    /// - `string`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for &(name, flags) in BUILTIN_TYPES {
            let builder = TypeBuilder::new(name).flags(flags);
            // Built-in paths are distinct and the base is the root.
            if let Err(err) = registry.register(builder) {
                unreachable!("built-in type `{name}` failed to register: {err}");
            }
        }
        registry
    }

    /// Returns the universal root type.
    #[inline]
    pub fn root(&self) -> TypeHandle {
        self.root
    }

    // # Validity
    // The handle must exist and its path must not be indexed yet.
    fn add_indices(&mut self, handle: TypeHandle) {
        let descriptor = &self.types[handle];
        let name = &descriptor.name;

        if !self.ambiguous_names.contains(name) {
            if self.name_to_handle.remove(name).is_some() {
                self.ambiguous_names.insert(name.clone());
            } else {
                self.name_to_handle.insert(name.clone(), handle);
            }
        }

        self.path_to_handle.insert(descriptor.path.clone(), handle);
    }

    fn insert(&mut self, descriptor: TypeDescriptor) -> Result<TypeHandle, RegisterError> {
        if self.path_to_handle.contains_key(&descriptor.path) {
            return Err(RegisterError::DuplicatePath(descriptor.path.into()));
        }
        let handle = self.types.insert(descriptor);
        self.add_indices(handle);
        log::debug!("registered type `{}`", self.types[handle].path);
        Ok(handle)
    }

    fn check(&self, handle: TypeHandle) -> Result<&TypeDescriptor, RegisterError> {
        self.types
            .get(handle)
            .ok_or(RegisterError::InvalidDescriptor(handle))
    }

    /// Registers a type.
    ///
    /// Fails if the path is taken, or if the base or a member type is not
    /// registered.
    pub fn register(&mut self, builder: TypeBuilder) -> Result<TypeHandle, RegisterError> {
        let TypeBuilder {
            name,
            path,
            mut flags,
            base,
            generic_params,
            attachments,
            members,
        } = builder;

        let base = match base {
            BaseSpec::Root => Some(self.root),
            BaseSpec::Type(base) => Some(self.check(base).map(|_| base)?),
            BaseSpec::Detached => None,
        };
        for ty in members.iter().filter_map(MemberDescriptor::ty) {
            self.check(ty)?;
        }

        let mut path = path.unwrap_or_else(|| name.clone());
        if !generic_params.is_empty() {
            flags |= TypeFlags::GENERIC | TypeFlags::GENERIC_DEFINITION;
            let commas = ",".repeat(generic_params.len() - 1);
            path = format!("{path}<{commas}>").into();
        }

        self.insert(TypeDescriptor {
            name,
            path,
            flags,
            base,
            generic_definition: None,
            generic_params: generic_params.into_boxed_slice(),
            generic_args: Box::new([]),
            attachments,
            members: members.into_boxed_slice(),
            enum_info: None,
        })
    }

    /// Registers an enum deriving from the root.
    ///
    /// Fails if the path is taken, a constant name repeats, or a value does
    /// not fit the underlying type.
    pub fn register_enum(&mut self, builder: EnumBuilder) -> Result<TypeHandle, RegisterError> {
        let EnumBuilder {
            name,
            path,
            flags,
            underlying,
            constants,
            attachments,
        } = builder;
        let path = path.unwrap_or_else(|| name.clone());

        check_constants(&path, underlying, &constants)?;

        let constants = constants
            .into_iter()
            .map(|(name, value)| EnumConstant::new(name, value))
            .collect();

        self.insert(TypeDescriptor {
            name,
            path,
            flags: flags | TypeFlags::ENUM | TypeFlags::VALUE_TYPE,
            base: Some(self.root),
            generic_definition: None,
            generic_params: Box::new([]),
            generic_args: Box::new([]),
            attachments,
            members: Box::new([]),
            enum_info: Some(EnumInfo::new(underlying, constants)),
        })
    }

    /// Returns the constructed type `definition<args..>`, registering it on
    /// first use.
    ///
    /// The constructed type shares the definition's base, attachments and
    /// members. Repeated calls with the same arguments return the same handle.
    ///
    /// # Example
    ///
    /// ```
    /// use tyres_meta::registry::{TypeBuilder, TypeRegistry};
    ///
    /// let mut registry = TypeRegistry::new();
    /// let int = registry.get_with_type_path("i32").unwrap();
    /// let text = registry.get_with_type_path("string").unwrap();
    /// let dict = registry
    ///     .register(TypeBuilder::new("Dictionary").generic_params(&["K", "V"]))
    ///     .unwrap();
    ///
    /// let dict_int = registry.instantiate(dict, &[text, int]).unwrap();
    /// assert_eq!(registry.get(dict).unwrap().path(), "Dictionary<,>");
    /// assert_eq!(registry.get(dict_int).unwrap().path(), "Dictionary<string, i32>");
    /// assert_eq!(registry.instantiate(dict, &[text, int]).unwrap(), dict_int);
    /// assert!(registry.instantiate(dict, &[int]).is_err());
    /// ```
    pub fn instantiate(
        &mut self,
        definition: TypeHandle,
        args: &[TypeHandle],
    ) -> Result<TypeHandle, RegisterError> {
        let def = self.check(definition)?;
        if !def.flags.contains(TypeFlags::GENERIC_DEFINITION) {
            return Err(RegisterError::NotAGenericDefinition(String::from(&*def.path)));
        }
        if def.generic_params.len() != args.len() {
            return Err(RegisterError::ArityMismatch {
                path: String::from(&*def.path),
                expected: def.generic_params.len(),
                found: args.len(),
            });
        }

        let key = (definition, Box::<[TypeHandle]>::from(args));
        if let Some(&handle) = self.instantiations.get(&key) {
            return Ok(handle);
        }

        let mut arg_names = Vec::with_capacity(args.len());
        let mut arg_paths = Vec::with_capacity(args.len());
        for &arg in args {
            let arg = self.check(arg)?;
            arg_names.push(&*arg.name);
            arg_paths.push(&*arg.path);
        }
        let prefix = def.path.split('<').next().unwrap_or_default();
        let name: String = format!("{}<{}>", def.name, arg_names.join(", "));
        let path: String = format!("{prefix}<{}>", arg_paths.join(", "));
        let flags = def.flags.difference(TypeFlags::GENERIC_DEFINITION);
        let base = def.base;

        let handle = self.insert(TypeDescriptor {
            name: name.into(),
            path: path.into(),
            flags,
            base,
            generic_definition: Some(definition),
            generic_params: Box::new([]),
            generic_args: key.1.clone(),
            attachments: AttachmentBag::new(),
            members: Box::new([]),
            enum_info: None,
        })?;
        self.instantiations.insert(key, handle);
        Ok(handle)
    }

    /// Returns `true` if the handle names a registered type.
    #[inline]
    pub fn contains(&self, handle: TypeHandle) -> bool {
        self.types.contains_key(handle)
    }

    /// Returns the descriptor of a registered type.
    #[inline]
    pub fn get(&self, handle: TypeHandle) -> Option<&TypeDescriptor> {
        self.types.get(handle)
    }

    /// Returns the descriptor holding the attachments and members of a type:
    /// the generic definition for constructed types, the type itself otherwise.
    pub(crate) fn shape(&self, handle: TypeHandle) -> Option<&TypeDescriptor> {
        let descriptor = self.types.get(handle)?;
        match descriptor.generic_definition {
            Some(definition) => self.types.get(definition),
            None => Some(descriptor),
        }
    }

    /// Returns the type with the given unique path.
    pub fn get_with_type_path(&self, path: &str) -> Option<TypeHandle> {
        self.path_to_handle.get(path).copied()
    }

    /// Returns the type with the given short name.
    ///
    /// Returns `None` if no type, or more than one type, has this name.
    pub fn get_with_type_name(&self, name: &str) -> Option<TypeHandle> {
        self.name_to_handle.get(name).copied()
    }

    /// Returns `true` if several registered types share this short name.
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous_names.contains(name)
    }

    /// Returns the handle of the member `name` of `ty`.
    ///
    /// Constructed generic types expose the members of their definition.
    pub fn member_handle(&self, ty: TypeHandle, name: &str) -> Option<MemberHandle> {
        let index = self
            .shape(ty)?
            .members
            .iter()
            .position(|member| member.name() == name)?;
        Some(MemberHandle::new(ty, index as u32))
    }

    /// Returns the descriptor of a member.
    pub fn get_member(&self, handle: MemberHandle) -> Option<&MemberDescriptor> {
        self.shape(handle.owner())?.members.get(handle.index())
    }

    /// Returns the number of registered types, the root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns an iterator over the registered types.
    pub fn iter(&self) -> impl Iterator<Item = (TypeHandle, &TypeDescriptor)> {
        self.types.iter()
    }
}

/// Rejects repeated constant names and values outside `underlying`.
fn check_constants(
    path: &str,
    underlying: IntegralKind,
    constants: &[(Box<str>, i128)],
) -> Result<(), RegisterError> {
    let mut seen = HashSet::default();
    for (constant, value) in constants {
        if !seen.insert(&**constant) {
            return Err(RegisterError::DuplicateConstant {
                path: String::from(path),
                name: String::from(&**constant),
            });
        }
        if !underlying.contains(*value) {
            return Err(RegisterError::ValueOutOfRange {
                path: String::from(path),
                name: String::from(&**constant),
                value: *value,
                underlying,
            });
        }
    }
    Ok(())
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.path_to_handle.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::TypeRegistry;
    use crate::RegisterError;
    use crate::info::{MemberDescriptor, TypeFlags, TypeHandle};
    use crate::registry::{EnumBuilder, IntegralKind, TypeBuilder};

    #[test]
    fn builtin_types() {
        let registry = TypeRegistry::new();
        let int = registry.get_with_type_path("i32").unwrap();
        let text = registry.get_with_type_path("string").unwrap();

        let flags = registry.get(int).unwrap().flags();
        assert!(flags.contains(TypeFlags::PRIMITIVE | TypeFlags::VALUE_TYPE | TypeFlags::PUBLIC));
        assert!(!registry.get(text).unwrap().flags().contains(TypeFlags::PRIMITIVE));
        assert_eq!(registry.get(registry.root()).unwrap().base(), None);
        assert_eq!(registry.len(), 14);
        assert_eq!(TypeRegistry::empty().len(), 1);
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeBuilder::new("Foo")).unwrap();
        assert_eq!(
            registry.register(TypeBuilder::new("Foo")),
            Err(RegisterError::DuplicatePath("Foo".into()))
        );
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = TypeRegistry::new();
        let a = registry.register(TypeBuilder::new("Item").path("a.Item")).unwrap();
        assert_eq!(registry.get_with_type_name("Item"), Some(a));

        let b = registry.register(TypeBuilder::new("Item").path("b.Item")).unwrap();
        assert!(registry.is_ambiguous("Item"));
        assert_eq!(registry.get_with_type_name("Item"), None);
        assert_eq!(registry.get_with_type_path("b.Item"), Some(b));

        registry.register(TypeBuilder::new("Item").path("c.Item")).unwrap();
        assert_eq!(registry.get_with_type_name("Item"), None);
    }

    #[test]
    fn unknown_base_is_rejected() {
        let mut registry = TypeRegistry::new();
        let stale = TypeHandle::default();
        assert_eq!(
            registry.register(TypeBuilder::new("Orphan").base(stale)),
            Err(RegisterError::InvalidDescriptor(stale))
        );
        assert_eq!(
            registry.register(
                TypeBuilder::new("Holder").member(MemberDescriptor::field("x").with_type(stale))
            ),
            Err(RegisterError::InvalidDescriptor(stale))
        );
    }

    #[test]
    fn interface_has_no_base() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register(TypeBuilder::new("IShape").interface()).unwrap();
        let descriptor = registry.get(shape).unwrap();
        assert_eq!(descriptor.base(), None);
        assert!(descriptor.flags().contains(TypeFlags::INTERFACE));
    }

    #[test]
    fn enum_validation() {
        let mut registry = TypeRegistry::new();
        let duplicate = EnumBuilder::new("Dup", IntegralKind::I32)
            .constant("A", 0)
            .constant("A", 1);
        assert_eq!(
            registry.register_enum(duplicate),
            Err(RegisterError::DuplicateConstant {
                path: "Dup".into(),
                name: "A".into()
            })
        );

        let negative = EnumBuilder::new("Neg", IntegralKind::U16).constant("Minus", -1);
        assert!(matches!(
            registry.register_enum(negative),
            Err(RegisterError::ValueOutOfRange { value: -1, .. })
        ));

        let status = registry
            .register_enum(
                EnumBuilder::new("Status", IntegralKind::I32)
                    .constant("Active", 0)
                    .constant("Enabled", 0),
            )
            .unwrap();
        let descriptor = registry.get(status).unwrap();
        assert!(descriptor.flags().contains(TypeFlags::ENUM | TypeFlags::VALUE_TYPE));
        assert_eq!(descriptor.enum_info().unwrap().len(), 2);
    }

    #[test]
    fn enum_constants_keep_declaration_order() {
        let mut registry = TypeRegistry::new();
        let level = registry
            .register_enum(
                EnumBuilder::new("Level", IntegralKind::I8)
                    .constant("High", 9)
                    .constant("Low", -9)
                    .constant("Mid", 0),
            )
            .unwrap();

        let info = registry.get(level).unwrap().enum_info().unwrap();
        let names: Vec<_> = info.iter().map(|c| (c.name(), c.value())).collect();
        assert_eq!(names, [("High", 9), ("Low", -9), ("Mid", 0)]);
        assert_eq!(info.underlying(), IntegralKind::I8);
    }

    #[test]
    fn structural_flags_follow_the_shape() {
        let mut registry = TypeRegistry::new();
        let forged = registry
            .register(TypeBuilder::new("Forged").flags(
                TypeFlags::ENUM
                    | TypeFlags::GENERIC
                    | TypeFlags::GENERIC_DEFINITION
                    | TypeFlags::INTERFACE
                    | TypeFlags::VALUE_TYPE,
            ))
            .unwrap();

        let descriptor = registry.get(forged).unwrap();
        assert_eq!(descriptor.flags(), TypeFlags::PUBLIC | TypeFlags::VALUE_TYPE);
        assert_eq!(descriptor.base(), Some(registry.root()));

        let list = registry
            .register(TypeBuilder::new("List").generic_params(&["T"]))
            .unwrap();
        assert!(registry.get(list).unwrap().flags().contains(TypeFlags::GENERIC_DEFINITION));
    }

    #[test]
    fn instantiation() {
        let mut registry = TypeRegistry::new();
        let foo = registry.register(TypeBuilder::new("Foo").path("app.Foo")).unwrap();
        let list = registry
            .register(
                TypeBuilder::new("List")
                    .path("collections.List")
                    .generic_params(&["T"])
                    .member(MemberDescriptor::property("Count")),
            )
            .unwrap();

        let list_foo = registry.instantiate(list, &[foo]).unwrap();
        let descriptor = registry.get(list_foo).unwrap();
        assert_eq!(descriptor.name(), "List<Foo>");
        assert_eq!(descriptor.path(), "collections.List<app.Foo>");
        assert_eq!(descriptor.generic_definition(), Some(list));
        assert_eq!(descriptor.generic_args(), [foo]);
        assert!(descriptor.flags().contains(TypeFlags::GENERIC));
        assert!(!descriptor.flags().contains(TypeFlags::GENERIC_DEFINITION));

        let count = registry.member_handle(list_foo, "Count").unwrap();
        assert_eq!(count.owner(), list_foo);
        assert_eq!(registry.get_member(count).unwrap().name(), "Count");

        assert_eq!(
            registry.instantiate(foo, &[foo]),
            Err(RegisterError::NotAGenericDefinition("app.Foo".into()))
        );
        assert!(matches!(
            registry.instantiate(list, &[]),
            Err(RegisterError::ArityMismatch { expected: 1, found: 0, .. })
        ));
    }
}
