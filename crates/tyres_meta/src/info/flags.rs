use bitflags::bitflags;

bitflags! {
    /// Structural flags of a type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        /// Built-in scalar such as `i32` or `bool`.
        const PRIMITIVE          = 1 << 0;
        const ENUM               = 1 << 1;
        /// Copied by value rather than referenced.
        const VALUE_TYPE         = 1 << 2;
        const PUBLIC             = 1 << 3;
        /// Public type nested in another type.
        const NESTED_PUBLIC      = 1 << 4;
        /// Generic definition or constructed generic type.
        const GENERIC            = 1 << 5;
        /// Unbound generic definition, such as `List<>`.
        const GENERIC_DEFINITION = 1 << 6;
        /// Type without ancestry.
        const INTERFACE          = 1 << 7;
    }
}
