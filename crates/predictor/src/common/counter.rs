//! Two-bit saturating counter.
//!
//! The counter is the building block of every table in the predictor core.
//! All transition logic lives in [`SaturatingCounter::update`]; table code only
//! ever calls [`SaturatingCounter::train`] and [`SaturatingCounter::is_taken`].

use tracing::warn;

use super::error::CounterError;

/// A 2-bit saturating counter.
///
/// States 0 and 1 predict not-taken, states 2 and 3 predict taken. The
/// enum has exactly four variants, so a counter held in a table can never
/// leave the 2-bit domain.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SaturatingCounter {
    /// Strongly not-taken (0).
    StronglyNotTaken = 0,
    /// Weakly not-taken (1). Tables are initialized to this state.
    #[default]
    WeaklyNotTaken = 1,
    /// Weakly taken (2).
    WeaklyTaken = 2,
    /// Strongly taken (3).
    StronglyTaken = 3,
}

impl SaturatingCounter {
    /// Returns the state reached after observing one branch outcome.
    ///
    /// A taken outcome moves one step toward [`Self::StronglyTaken`], a
    /// not-taken outcome one step toward [`Self::StronglyNotTaken`]. Both ends
    /// saturate.
    #[inline(always)]
    pub const fn update(self, taken: bool) -> Self {
        match (self, taken) {
            (Self::StronglyNotTaken | Self::WeaklyNotTaken, false) => Self::StronglyNotTaken,
            (Self::StronglyNotTaken, true) | (Self::WeaklyTaken, false) => Self::WeaklyNotTaken,
            (Self::WeaklyNotTaken, true) | (Self::StronglyTaken, false) => Self::WeaklyTaken,
            (Self::WeaklyTaken | Self::StronglyTaken, true) => Self::StronglyTaken,
        }
    }

    /// Applies [`Self::update`] in place.
    #[inline(always)]
    pub const fn train(&mut self, taken: bool) {
        *self = self.update(taken);
    }

    /// Returns the predicted direction for this state.
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        matches!(self, Self::WeaklyTaken | Self::StronglyTaken)
    }

    /// Returns the raw 2-bit encoding.
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Decodes a raw counter value into a predicted direction.
    ///
    /// A value outside `0..=3` is reported through a `warn` diagnostic and
    /// predicts not-taken.
    pub fn direction_of_raw(raw: u8) -> bool {
        match Self::try_from(raw) {
            Ok(state) => state.is_taken(),
            Err(err) => {
                warn!(raw, %err, "undefined saturating counter state, predicting not-taken");
                false
            }
        }
    }
}

impl TryFrom<u8> for SaturatingCounter {
    type Error = CounterError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::StronglyNotTaken),
            1 => Ok(Self::WeaklyNotTaken),
            2 => Ok(Self::WeaklyTaken),
            3 => Ok(Self::StronglyTaken),
            other => Err(CounterError::OutOfRange(other)),
        }
    }
}

impl From<SaturatingCounter> for u8 {
    fn from(ctr: SaturatingCounter) -> Self {
        ctr.value()
    }
}
