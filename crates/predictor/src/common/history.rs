//! Branch history shift register.
//!
//! Each engine owns one [`HistoryRegister`]. Outcomes are shifted in at bit 0
//! and old outcomes fall off the top of the 64-bit word; readers only ever
//! look at the low bits through [`low_mask`].

/// Returns a mask selecting the low `bits` bits of a `u64`.
///
/// Defined for every width in `0..=64`; widths of 64 and above select the
/// whole word instead of overflowing the shift.
#[inline(always)]
pub const fn low_mask(bits: usize) -> u64 {
    if bits >= u64::BITS as usize {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// A global history register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryRegister {
    bits: u64,
}

impl HistoryRegister {
    /// Creates an empty (all not-taken) history.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Shifts one outcome into the register (1 = taken).
    #[inline(always)]
    pub const fn push(&mut self, taken: bool) {
        self.bits = (self.bits << 1) | (taken as u64);
    }

    /// Returns the low `bits` bits of the register.
    #[inline(always)]
    pub const fn low(&self, bits: usize) -> u64 {
        self.bits & low_mask(bits)
    }

    /// Returns the full register contents.
    pub const fn value(&self) -> u64 {
        self.bits
    }

    /// XOR-folds the low `length` bits of history into `width`-bit chunks.
    ///
    /// This is the compressed history used to index the tagged TAGE tables.
    #[inline(always)]
    pub const fn fold(&self, length: usize, width: usize) -> u64 {
        let mut remaining = self.low(length);
        let mut folded = 0;
        if width == 0 {
            return 0;
        }
        while remaining != 0 {
            folded ^= remaining & low_mask(width);
            remaining = if width >= u64::BITS as usize {
                0
            } else {
                remaining >> width
            };
        }
        folded
    }
}
