use crate::SyntaxKind;

const SIZE: usize = 2;

/// A `const`-constructible set of [`SyntaxKind`]s backed by a bitset.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn from_kind(kind: SyntaxKind) -> Self {
        let kind = kind as u16;

        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;

        debug_assert!(
            slot_index < Self::EMPTY.bits.len(),
            "Index out of bounds. Increase the size of the bitset array."
        );

        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        let mut bits = Self::EMPTY.bits;
        bits[slot_index] = mask;

        Self { bits }
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.union(&Self::from_kind(kinds[i]));
            i += 1;
        }

        set
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        self.bits[slot_index] & mask != 0
    }

    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < self.bits.len() {
            if self.bits[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Iterates the members in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        let total = (SIZE as u16) * Self::BITS_PER_SLOT;
        (0..total)
            .filter_map(SyntaxKind::from_raw)
            .filter(|&kind| self.contains(kind))
    }
}

impl std::fmt::Debug for SyntaxSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
