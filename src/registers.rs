//! Register map definitions for the MAG3110 magnetometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{DataRate, OperatingMode, OverSampling, SystemMode};

/// Fixed 7-bit I²C address of the MAG3110.
pub const DEVICE_ADDRESS: u8 = 0x0E;

/// Register address of `DR_STATUS`.
pub const REG_DR_STATUS: u8 = 0x00;
/// Register address of `OUT_X_MSB`.
pub const REG_OUT_X_MSB: u8 = 0x01;
/// Register address of `OUT_X_LSB`.
pub const REG_OUT_X_LSB: u8 = 0x02;
/// Register address of `OUT_Y_MSB`.
pub const REG_OUT_Y_MSB: u8 = 0x03;
/// Register address of `OUT_Y_LSB`.
pub const REG_OUT_Y_LSB: u8 = 0x04;
/// Register address of `OUT_Z_MSB`.
pub const REG_OUT_Z_MSB: u8 = 0x05;
/// Register address of `OUT_Z_LSB`.
pub const REG_OUT_Z_LSB: u8 = 0x06;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x07;
/// Register address of `SYSMOD`.
pub const REG_SYSMOD: u8 = 0x08;
/// Register address of `OFF_X_MSB`.
pub const REG_OFF_X_MSB: u8 = 0x09;
/// Register address of `OFF_X_LSB`.
pub const REG_OFF_X_LSB: u8 = 0x0A;
/// Register address of `OFF_Y_MSB`.
pub const REG_OFF_Y_MSB: u8 = 0x0B;
/// Register address of `OFF_Y_LSB`.
pub const REG_OFF_Y_LSB: u8 = 0x0C;
/// Register address of `OFF_Z_MSB`.
pub const REG_OFF_Z_MSB: u8 = 0x0D;
/// Register address of `OFF_Z_LSB`.
pub const REG_OFF_Z_LSB: u8 = 0x0E;
/// Register address of `DIE_TEMP`.
pub const REG_DIE_TEMP: u8 = 0x0F;
/// Register address of `CTRL_REG1`.
pub const REG_CTRL_REG1: u8 = 0x10;
/// Register address of `CTRL_REG2`.
pub const REG_CTRL_REG2: u8 = 0x11;

/// Identity code returned by `WHO_AM_I`.
pub const EXPECTED_WHO_AM_I: u8 = 0xC4;

/// Measurement axis, used to address the per-axis register pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// Data output registers as `(MSB, LSB)`.
    pub const fn data_registers(self) -> (u8, u8) {
        match self {
            Self::X => (REG_OUT_X_MSB, REG_OUT_X_LSB),
            Self::Y => (REG_OUT_Y_MSB, REG_OUT_Y_LSB),
            Self::Z => (REG_OUT_Z_MSB, REG_OUT_Z_LSB),
        }
    }

    /// User offset correction registers as `(MSB, LSB)`.
    pub const fn offset_registers(self) -> (u8, u8) {
        match self {
            Self::X => (REG_OFF_X_MSB, REG_OFF_X_LSB),
            Self::Y => (REG_OFF_Y_MSB, REG_OFF_Y_LSB),
            Self::Z => (REG_OFF_Z_MSB, REG_OFF_Z_LSB),
        }
    }
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Reset/default value defined by the datasheet.
    const RESET_VALUE: u8;
}

/// Bitfield representation of the `DR_STATUS` register (address `0x00`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataReadyStatus {
    // New X-axis data available (bit 0).
    pub x_ready: bool,
    // New Y-axis data available (bit 1).
    pub y_ready: bool,
    // New Z-axis data available (bit 2).
    pub z_ready: bool,
    // New data set on all axes (bit 3).
    pub xyz_ready: bool,
    // X-axis data overwritten before being read (bit 4).
    pub x_overwrite: bool,
    // Y-axis data overwritten before being read (bit 5).
    pub y_overwrite: bool,
    // Z-axis data overwritten before being read (bit 6).
    pub z_overwrite: bool,
    // Data set overwritten on any axis (bit 7).
    pub xyz_overwrite: bool,
}

impl From<u8> for DataReadyStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<DataReadyStatus> for u8 {
    fn from(value: DataReadyStatus) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataReadyStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DataReadyStatus {{ ZYXOW: {}, ZOW: {}, YOW: {}, XOW: {}, ZYXDR: {}, ZDR: {}, YDR: {}, XDR: {} }}",
            self.xyz_overwrite(),
            self.z_overwrite(),
            self.y_overwrite(),
            self.x_overwrite(),
            self.xyz_ready(),
            self.z_ready(),
            self.y_ready(),
            self.x_ready()
        );
    }
}

/// Bitfield representation of the `CTRL_REG1` register (address `0x10`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg1 {
    // Operating mode (bit 0).
    pub mode: OperatingMode,
    // Trigger a single measurement (bit 1).
    pub trigger_measurement: bool,
    // Fast read: skip LSB registers in auto-increment (bit 2).
    pub fast_read: bool,
    // Oversampling ratio (bits 4:3).
    pub over_sampling: OverSampling,
    // Data rate (bits 7:5).
    pub data_rate: DataRate,
}

impl From<u8> for CtrlReg1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg1> for u8 {
    fn from(value: CtrlReg1) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CtrlReg1 {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "CtrlReg1 {{ DR: {}, OS: {}, FR: {}, TM: {}, AC: {} }}",
            self.data_rate(),
            self.over_sampling(),
            self.fast_read(),
            self.trigger_measurement(),
            self.mode()
        );
    }
}

/// Bitfield representation of the `CTRL_REG2` register (address `0x11`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg2 {
    #[skip]
    __: B4,
    // One-shot magnetic sensor reset (bit 4).
    pub mag_reset: bool,
    // Output raw data without user offset correction (bit 5).
    pub raw: bool,
    #[skip]
    __: B1,
    // Automatic magnetic sensor reset before each measurement (bit 7).
    pub auto_mrst_enable: bool,
}

impl From<u8> for CtrlReg2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg2> for u8 {
    fn from(value: CtrlReg2) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CtrlReg2 {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "CtrlReg2 {{ AUTO_MRST_EN: {}, RAW: {}, Mag_RST: {} }}",
            self.auto_mrst_enable(),
            self.raw(),
            self.mag_reset()
        );
    }
}

/// Bitfield representation of the `SYSMOD` register (address `0x08`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysMod {
    // Current system mode encoding (bits 1:0).
    pub mode_bits: B2,
    #[skip]
    __: B6,
}

impl SysMod {
    /// Decodes the mode bits, `None` for the reserved encoding.
    pub fn system_mode(self) -> Option<SystemMode> {
        SystemMode::from_raw(self.mode_bits())
    }
}

impl From<u8> for SysMod {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<SysMod> for u8 {
    fn from(value: SysMod) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SysMod {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SysMod {{ SYSMOD: {=u8:#b} }}", self.mode_bits());
    }
}

impl Register for DataReadyStatus {
    const ADDRESS: u8 = REG_DR_STATUS;
    const RESET_VALUE: u8 = 0x00;
}

impl Register for SysMod {
    const ADDRESS: u8 = REG_SYSMOD;
    const RESET_VALUE: u8 = 0x00;
}

impl Register for CtrlReg1 {
    const ADDRESS: u8 = REG_CTRL_REG1;
    const RESET_VALUE: u8 = 0x00;
}

impl Register for CtrlReg2 {
    const ADDRESS: u8 = REG_CTRL_REG2;
    const RESET_VALUE: u8 = 0x00;
}
