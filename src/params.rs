//! Strongly typed parameter enumerations for the MAG3110 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the control-register bitfields. Prefer
//! these types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use mag3110::params::{DataRate, OperatingMode, OverSampling};
//!
//! let rate = DataRate::Dr010;
//! let os = OverSampling::Os64;
//! let mode = OperatingMode::Active;
//! assert_eq!(rate.output_data_rate_mhz(os), 5_000);
//! let _ = mode;
//! ```

use modular_bitfield::prelude::Specifier;

/// ADC data rate selection (`CTRL_REG1.DR`, bits 7:5).
///
/// Each step halves the output data rate; the listed rates assume the
/// default 16x oversampling ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum DataRate {
    /// 80 Hz output at 16x oversampling.
    Dr000 = 0b000,
    /// 40 Hz output at 16x oversampling.
    Dr001 = 0b001,
    /// 20 Hz output at 16x oversampling.
    Dr010 = 0b010,
    /// 10 Hz output at 16x oversampling.
    Dr011 = 0b011,
    /// 5 Hz output at 16x oversampling.
    Dr100 = 0b100,
    /// 2.5 Hz output at 16x oversampling.
    Dr101 = 0b101,
    /// 1.25 Hz output at 16x oversampling.
    Dr110 = 0b110,
    /// 0.63 Hz output at 16x oversampling.
    Dr111 = 0b111,
}

// Output data rate at DR = 000 / OS = 16, in milli-hertz.
const MAX_ODR_MHZ: u32 = 80_000;

impl DataRate {
    /// Returns the output data rate in milli-hertz for the given oversampling ratio.
    pub const fn output_data_rate_mhz(self, os: OverSampling) -> u32 {
        MAX_ODR_MHZ >> (self as u32 + os as u32)
    }
}

/// Oversampling ratio selection (`CTRL_REG1.OS`, bits 4:3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum OverSampling {
    /// 16 samples per measurement.
    Os16 = 0b00,
    /// 32 samples per measurement.
    Os32 = 0b01,
    /// 64 samples per measurement.
    Os64 = 0b10,
    /// 128 samples per measurement.
    Os128 = 0b11,
}

impl OverSampling {
    /// Returns the number of ADC samples averaged per output.
    pub const fn ratio(self) -> u16 {
        16 << (self as u16)
    }
}

/// Operating mode selection (`CTRL_REG1.AC`, bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum OperatingMode {
    /// Standby; measurements only via trigger.
    Standby = 0,
    /// Continuous measurements at the selected data rate.
    Active = 1,
}

/// Current system mode reported by `SYSMOD` bits 1:0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemMode {
    /// Standby mode.
    Standby,
    /// Active mode, RAW (uncorrected) data.
    ActiveRaw,
    /// Active mode, user offset corrected data.
    ActiveNonRaw,
}

impl SystemMode {
    /// Decodes the two low bits of a raw `SYSMOD` value.
    ///
    /// Returns `None` for the reserved `0b11` encoding.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw & 0b11 {
            0b00 => Some(Self::Standby),
            0b01 => Some(Self::ActiveRaw),
            0b10 => Some(Self::ActiveNonRaw),
            _ => None,
        }
    }

    /// Returns `true` when the device is measuring.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Standby)
    }
}
