//! Hash containers with a fixed seed, based on *hashbrown* and *foldhash*.

use foldhash::fast::FixedState;

/// A fixed hash seed, so iteration order only depends on the inserted keys.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Fixed hash state shared by every map of this crate.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl core::hash::BuildHasher for FixedHashState {
    type Hasher = foldhash::fast::FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;
pub(crate) type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;
