//! Configuration primitives for the MAG3110 driver.

use crate::params::{DataRate, OperatingMode, OverSampling};
use crate::registers::{CtrlReg1, CtrlReg2, Register};

/// User-facing configuration of the `CTRL_REG1` and `CTRL_REG2` registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// ADC data rate selection.
    pub data_rate: DataRate,
    /// Oversampling ratio selection.
    pub over_sampling: OverSampling,
    /// Fast read mode (8-bit auto-increment reads of MSBs only).
    pub fast_read: bool,
    /// Trigger an immediate single measurement.
    pub trigger_measurement: bool,
    /// Standby or active operation.
    pub mode: OperatingMode,
    /// Reset the magnetic sensor before every acquisition.
    pub auto_mrst_enable: bool,
    /// Output data without user offset correction.
    pub raw: bool,
    /// Issue a one-shot magnetic sensor reset.
    pub mag_reset: bool,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Rebuilds a configuration from control register contents.
    pub fn from_registers(reg1: CtrlReg1, reg2: CtrlReg2) -> Self {
        Self {
            data_rate: reg1.data_rate(),
            over_sampling: reg1.over_sampling(),
            fast_read: reg1.fast_read(),
            trigger_measurement: reg1.trigger_measurement(),
            mode: reg1.mode(),
            auto_mrst_enable: reg2.auto_mrst_enable(),
            raw: reg2.raw(),
            mag_reset: reg2.mag_reset(),
        }
    }

    /// Encodes the `CTRL_REG1` portion of this configuration.
    pub fn ctrl_reg1(&self) -> CtrlReg1 {
        CtrlReg1::new()
            .with_data_rate(self.data_rate)
            .with_over_sampling(self.over_sampling)
            .with_fast_read(self.fast_read)
            .with_trigger_measurement(self.trigger_measurement)
            .with_mode(self.mode)
    }

    /// Encodes the `CTRL_REG2` portion of this configuration.
    pub fn ctrl_reg2(&self) -> CtrlReg2 {
        CtrlReg2::new()
            .with_auto_mrst_enable(self.auto_mrst_enable)
            .with_raw(self.raw)
            .with_mag_reset(self.mag_reset)
    }

    /// Output data rate implied by this configuration, in milli-hertz.
    pub fn output_data_rate_mhz(&self) -> u32 {
        self.data_rate.output_data_rate_mhz(self.over_sampling)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the data rate.
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Overrides the oversampling ratio.
    pub fn over_sampling(mut self, over_sampling: OverSampling) -> Self {
        self.config.over_sampling = over_sampling;
        self
    }

    /// Enables or disables fast read mode.
    pub fn fast_read(mut self, enabled: bool) -> Self {
        self.config.fast_read = enabled;
        self
    }

    /// Requests a single triggered measurement.
    pub fn trigger_measurement(mut self, enabled: bool) -> Self {
        self.config.trigger_measurement = enabled;
        self
    }

    /// Selects standby or active operation.
    pub fn mode(mut self, mode: OperatingMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Enables automatic magnetic sensor resets.
    pub fn auto_mrst_enable(mut self, enabled: bool) -> Self {
        self.config.auto_mrst_enable = enabled;
        self
    }

    /// Selects raw (offset-uncorrected) output data.
    pub fn raw(mut self, enabled: bool) -> Self {
        self.config.raw = enabled;
        self
    }

    /// Requests a one-shot magnetic sensor reset.
    pub fn mag_reset(mut self, enabled: bool) -> Self {
        self.config.mag_reset = enabled;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    /// Power-on reset state of both control registers.
    fn default() -> Self {
        Self::from_registers(
            CtrlReg1::from(CtrlReg1::RESET_VALUE),
            CtrlReg2::from(CtrlReg2::RESET_VALUE),
        )
    }
}
