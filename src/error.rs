//! Error handling primitives for the MAG3110 driver.

use crate::decode::DecodeError;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The underlying bus transaction failed while accessing `register`.
    Bus {
        /// Register address that was being read or written.
        register: u8,
        /// Error reported by the bus implementation, unchanged.
        error: E,
    },
    /// A signed conversion was requested with invalid parameters.
    Decode(DecodeError),
    /// `WHO_AM_I` returned something other than the MAG3110 identity code.
    DeviceIdMismatch(u8),
    /// `SYSMOD` reported the reserved mode encoding.
    UnknownSystemMode(u8),
}

impl<E> Error<E> {
    /// Wraps a bus error with the register address it occurred on.
    pub const fn bus(register: u8, error: E) -> Self {
        Self::Bus { register, error }
    }

    /// Returns the register address for bus failures.
    pub fn register(&self) -> Option<u8> {
        match self {
            Self::Bus { register, .. } => Some(*register),
            _ => None,
        }
    }
}

impl<E> From<DecodeError> for Error<E> {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}
