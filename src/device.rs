//! High-level MAG3110 device driver implementation.

use crate::config::Config;
use crate::decode::to_signed;
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::Mag3110Interface;
use crate::log::{log_debug, log_trace, log_warn};
use crate::params::SystemMode;
use crate::registers::{
    Axis,
    CtrlReg1,
    CtrlReg2,
    DataReadyStatus,
    Register,
    SysMod,
    DEVICE_ADDRESS,
    EXPECTED_WHO_AM_I,
    REG_CTRL_REG1,
    REG_CTRL_REG2,
    REG_DIE_TEMP,
    REG_DR_STATUS,
    REG_SYSMOD,
    REG_WHO_AM_I,
};
use embedded_hal::i2c::I2c;

/// High-level synchronous driver for the MAG3110 magnetometer.
///
/// The driver keeps no state besides the bus interface and the fixed device
/// address; every operation maps to an ordered sequence of single-register
/// transactions. Multi-register reads are not atomic: [`Mag3110::read_xyz_axis`]
/// may combine axes from different measurement cycles if the sensor updates
/// between reads. Gate on [`Mag3110::read_status`] when that matters.
pub struct Mag3110<IFACE> {
    interface: IFACE,
    address: u8,
}

impl<IFACE> Mag3110<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            address: DEVICE_ADDRESS,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the 7-bit bus address the driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }
}

impl<I2C> Mag3110<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I²C transports.
    pub fn new_i2c(i2c: I2C) -> Self {
        Self::new(I2cInterface::new(i2c))
    }

    /// Releases the driver, returning the I²C bus.
    pub fn release_i2c(self) -> I2C {
        self.release().release()
    }
}

impl<IFACE, CommE> Mag3110<IFACE>
where
    IFACE: Mag3110Interface<Error = CommE>,
{
    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads the raw `WHO_AM_I` identification code.
    pub fn who_am_i(&mut self) -> Result<u8, CommE> {
        self.read_register(REG_WHO_AM_I)
    }

    /// Verifies `WHO_AM_I` against the MAG3110 identity code.
    pub fn check_id(&mut self) -> Result<u8, CommE> {
        let id = self.who_am_i()?;
        if id != EXPECTED_WHO_AM_I {
            log_warn!("MAG3110 WHO_AM_I mismatch: {=u8:#x}", id);
            return Err(Error::DeviceIdMismatch(id));
        }

        Ok(id)
    }

    /// Reads the raw `SYSMOD` operating mode byte.
    pub fn system_mode(&mut self) -> Result<u8, CommE> {
        self.read_register(REG_SYSMOD)
    }

    /// Reads `SYSMOD` and decodes it into a [`SystemMode`].
    pub fn read_system_mode(&mut self) -> Result<SystemMode, CommE> {
        let sysmod = self.read_typed::<SysMod>()?;
        sysmod
            .system_mode()
            .ok_or(Error::UnknownSystemMode(u8::from(sysmod)))
    }

    /// Reads the raw `DR_STATUS` byte.
    pub fn data_ready_status(&mut self) -> Result<u8, CommE> {
        self.read_register(REG_DR_STATUS)
    }

    /// Reads `DR_STATUS` as a typed bitfield.
    pub fn read_status(&mut self) -> Result<DataReadyStatus, CommE> {
        self.read_typed::<DataReadyStatus>()
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the X-axis magnetic field sample.
    pub fn read_x_axis(&mut self) -> Result<i16, CommE> {
        self.read_axis(Axis::X)
    }

    /// Reads the Y-axis magnetic field sample.
    pub fn read_y_axis(&mut self) -> Result<i16, CommE> {
        self.read_axis(Axis::Y)
    }

    /// Reads the Z-axis magnetic field sample.
    pub fn read_z_axis(&mut self) -> Result<i16, CommE> {
        self.read_axis(Axis::Z)
    }

    /// Reads one axis sample from its `OUT_*_MSB`/`OUT_*_LSB` pair.
    pub fn read_axis(&mut self, axis: Axis) -> Result<i16, CommE> {
        let (msb, lsb) = axis.data_registers();
        self.read_axis_pair(msb, lsb)
    }

    /// Reads X, Y and Z in that order, one register pair at a time.
    pub fn read_xyz_axis(&mut self) -> Result<(i16, i16, i16), CommE> {
        let x = self.read_x_axis()?;
        let y = self.read_y_axis()?;
        let z = self.read_z_axis()?;
        log_trace!("MAG3110 xyz = ({=i16}, {=i16}, {=i16})", x, y, z);
        Ok((x, y, z))
    }

    /// Reads the die temperature in signed degrees (uncalibrated).
    pub fn read_die_temperature(&mut self) -> Result<i8, CommE> {
        let raw = self.read_register(REG_DIE_TEMP)?;
        let temp = to_signed(u32::from(raw), 8)?;
        Ok(temp as i8)
    }

    // ==================================================================
    // == Offset Registers ==============================================
    // ==================================================================
    /// Reads the raw user offset word of `axis` (MSB then LSB).
    ///
    /// The value is returned as stored; no scaling or sign handling is applied.
    pub fn read_offset(&mut self, axis: Axis) -> Result<u16, CommE> {
        let (msb, lsb) = axis.offset_registers();
        self.read_word(msb, lsb)
    }

    /// Writes a raw user offset word to `axis` (MSB then LSB).
    pub fn write_offset(&mut self, axis: Axis, value: u16) -> Result<(), CommE> {
        let (msb, lsb) = axis.offset_registers();
        let [hi, lo] = value.to_be_bytes();
        self.write_register(msb, hi)?;
        self.write_register(lsb, lo)
    }

    // ==================================================================
    // == Control Registers =============================================
    // ==================================================================
    /// Writes `data` to `CTRL_REG1`.
    pub fn set_ctrl_reg1(&mut self, data: u8) -> Result<(), CommE> {
        self.write_register(REG_CTRL_REG1, data)
    }

    /// Writes `data` to `CTRL_REG2`.
    pub fn set_ctrl_reg2(&mut self, data: u8) -> Result<(), CommE> {
        self.write_register(REG_CTRL_REG2, data)
    }

    /// Reads `CTRL_REG1` as a typed bitfield.
    pub fn read_ctrl_reg1(&mut self) -> Result<CtrlReg1, CommE> {
        self.read_typed::<CtrlReg1>()
    }

    /// Reads `CTRL_REG2` as a typed bitfield.
    pub fn read_ctrl_reg2(&mut self) -> Result<CtrlReg2, CommE> {
        self.read_typed::<CtrlReg2>()
    }

    /// Applies a configuration to both control registers.
    ///
    /// `CTRL_REG2` is written first so that reset and RAW settings are in
    /// place before `CTRL_REG1` can switch the device to active mode.
    pub fn configure(&mut self, config: &Config) -> Result<(), CommE> {
        log_debug!(
            "MAG3110 configure: odr = {=u32} mHz, mode = {}",
            config.output_data_rate_mhz(),
            config.mode
        );
        self.set_ctrl_reg2(u8::from(config.ctrl_reg2()))?;
        self.set_ctrl_reg1(u8::from(config.ctrl_reg1()))
    }

    // ==================================================================
    // == Raw Register Access ===========================================
    // ==================================================================
    /// Reads any register by address.
    pub fn read_register(&mut self, register: u8) -> Result<u8, CommE> {
        let value = self
            .interface
            .read_byte(self.address, register)
            .map_err(|err| Error::bus(register, err))?;
        log_trace!("MAG3110 read {=u8:#x} -> {=u8:#x}", register, value);
        Ok(value)
    }

    /// Writes any register by address.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        log_trace!("MAG3110 write {=u8:#x} <- {=u8:#x}", register, value);
        self.interface
            .write_byte(self.address, register, value)
            .map_err(|err| Error::bus(register, err))
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn read_word(&mut self, msb: u8, lsb: u8) -> Result<u16, CommE> {
        let hi = self.read_register(msb)?;
        let lo = self.read_register(lsb)?;
        Ok((u16::from(hi) << 8) | u16::from(lo))
    }

    fn read_axis_pair(&mut self, msb: u8, lsb: u8) -> Result<i16, CommE> {
        let word = self.read_word(msb, lsb)?;
        let value = to_signed(u32::from(word), 16)?;
        Ok(value as i16)
    }

    fn read_typed<R>(&mut self) -> Result<R, CommE>
    where
        R: Register + From<u8>,
    {
        self.read_register(R::ADDRESS).map(R::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DataRate, OperatingMode, OverSampling};
    use crate::registers::{
        REG_OFF_X_LSB, REG_OFF_X_MSB, REG_OFF_Y_LSB, REG_OFF_Y_MSB, REG_OUT_X_LSB, REG_OUT_X_MSB,
        REG_OUT_Y_LSB, REG_OUT_Y_MSB, REG_OUT_Z_LSB, REG_OUT_Z_MSB,
    };
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use std::vec;

    const ADDR: u8 = DEVICE_ADDRESS;

    fn read(register: u8, value: u8) -> Transaction {
        Transaction::write_read(ADDR, vec![register], vec![value])
    }

    fn write(register: u8, value: u8) -> Transaction {
        Transaction::write(ADDR, vec![register, value])
    }

    #[test]
    fn identification_and_status_reads_return_raw_bytes() {
        let expectations = [
            read(REG_WHO_AM_I, 0xC4),
            read(REG_SYSMOD, 0x01),
            read(REG_DR_STATUS, 0x0F),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.who_am_i(), Ok(0xC4));
        assert_eq!(mag.system_mode(), Ok(0x01));
        assert_eq!(mag.data_ready_status(), Ok(0x0F));

        i2c.done();
    }

    #[test]
    fn check_id_rejects_foreign_device() {
        let expectations = [read(REG_WHO_AM_I, 0xC4), read(REG_WHO_AM_I, 0x33)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.check_id(), Ok(0xC4));
        assert_eq!(mag.check_id(), Err(Error::DeviceIdMismatch(0x33)));

        i2c.done();
    }

    #[test]
    fn typed_status_and_system_mode() {
        let expectations = [
            read(REG_DR_STATUS, 0b0000_1000),
            read(REG_SYSMOD, 0x02),
            read(REG_SYSMOD, 0x03),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        let status = mag.read_status().unwrap();
        assert!(status.xyz_ready());
        assert!(!status.xyz_overwrite());
        assert_eq!(mag.read_system_mode(), Ok(SystemMode::ActiveNonRaw));
        assert_eq!(mag.read_system_mode(), Err(Error::UnknownSystemMode(0x03)));

        i2c.done();
    }

    #[test]
    fn x_axis_combines_msb_and_lsb() {
        let expectations = [read(REG_OUT_X_MSB, 0x01), read(REG_OUT_X_LSB, 0x02)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.read_x_axis(), Ok(258));

        i2c.done();
    }

    #[test]
    fn all_ones_decodes_to_minus_one() {
        let expectations = [read(REG_OUT_X_MSB, 0xFF), read(REG_OUT_X_LSB, 0xFF)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.read_x_axis(), Ok(-1));

        i2c.done();
    }

    #[test]
    fn y_and_z_axes_decode_extremes() {
        let expectations = [
            read(REG_OUT_Y_MSB, 0x80),
            read(REG_OUT_Y_LSB, 0x00),
            read(REG_OUT_Z_MSB, 0x7F),
            read(REG_OUT_Z_LSB, 0xFF),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.read_y_axis(), Ok(-32768));
        assert_eq!(mag.read_z_axis(), Ok(32767));

        i2c.done();
    }

    #[test]
    fn xyz_reads_six_registers_in_order() {
        let expectations = [
            read(REG_OUT_X_MSB, 0x01),
            read(REG_OUT_X_LSB, 0x02),
            read(REG_OUT_Y_MSB, 0xFF),
            read(REG_OUT_Y_LSB, 0xFE),
            read(REG_OUT_Z_MSB, 0x80),
            read(REG_OUT_Z_LSB, 0x01),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.read_xyz_axis(), Ok((258, -2, -32767)));

        i2c.done();
    }

    #[test]
    fn failed_lsb_read_aborts_axis_read() {
        let expectations = [
            read(REG_OUT_X_MSB, 0x01),
            Transaction::write_read(ADDR, vec![REG_OUT_X_LSB], vec![0x00])
                .with_error(ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(
            mag.read_x_axis(),
            Err(Error::Bus {
                register: REG_OUT_X_LSB,
                error: ErrorKind::Other,
            })
        );

        i2c.done();
    }

    #[test]
    fn failed_msb_read_skips_lsb() {
        let expectations = [Transaction::write_read(ADDR, vec![REG_OUT_X_MSB], vec![0x00])
            .with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(
            mag.read_x_axis(),
            Err(Error::Bus {
                register: REG_OUT_X_MSB,
                error: ErrorKind::Other,
            })
        );

        i2c.done();
    }

    #[test]
    fn z_axis_matches_big_endian_word_for_corner_bytes() {
        let corners = [0x00u8, 0x01, 0x7F, 0x80, 0xFE, 0xFF];
        for &msb in corners.iter() {
            for &lsb in corners.iter() {
                let expectations = [read(REG_OUT_Z_MSB, msb), read(REG_OUT_Z_LSB, lsb)];
                let mut i2c = I2cMock::new(&expectations);
                let mut mag = Mag3110::new_i2c(i2c.clone());

                assert_eq!(mag.read_z_axis(), Ok(i16::from_be_bytes([msb, lsb])));

                i2c.done();
            }
        }
    }

    #[test]
    fn failed_msb_read_skips_remaining_axes() {
        let expectations = [
            read(REG_OUT_X_MSB, 0x00),
            read(REG_OUT_X_LSB, 0x10),
            Transaction::write_read(ADDR, vec![REG_OUT_Y_MSB], vec![0x00])
                .with_error(ErrorKind::Bus),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        let err = mag.read_xyz_axis().unwrap_err();
        assert_eq!(err.register(), Some(REG_OUT_Y_MSB));

        i2c.done();
    }

    #[test]
    fn die_temperature_is_signed_byte() {
        let expectations = [read(REG_DIE_TEMP, 0x80), read(REG_DIE_TEMP, 0x7F), read(REG_DIE_TEMP, 0xF6)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.read_die_temperature(), Ok(-128));
        assert_eq!(mag.read_die_temperature(), Ok(127));
        assert_eq!(mag.read_die_temperature(), Ok(-10));

        i2c.done();
    }

    #[test]
    fn control_register_writes_are_single_transactions() {
        let expectations = [write(REG_CTRL_REG1, 0x19), write(REG_CTRL_REG2, 0x80)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.set_ctrl_reg1(0x19), Ok(()));
        assert_eq!(mag.set_ctrl_reg2(0x80), Ok(()));

        i2c.done();
    }

    #[test]
    fn failed_write_reports_register() {
        let expectations =
            [Transaction::write(ADDR, vec![REG_CTRL_REG2, 0x10]).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(
            mag.set_ctrl_reg2(0x10),
            Err(Error::Bus {
                register: REG_CTRL_REG2,
                error: ErrorKind::Other,
            })
        );

        i2c.done();
    }

    #[test]
    fn configure_writes_ctrl_reg2_before_ctrl_reg1() {
        let config = Config::new()
            .data_rate(DataRate::Dr000)
            .over_sampling(OverSampling::Os128)
            .mode(OperatingMode::Active)
            .auto_mrst_enable(true)
            .build();
        let expectations = [write(REG_CTRL_REG2, 0x80), write(REG_CTRL_REG1, 0x19)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        mag.configure(&config).unwrap();

        i2c.done();
    }

    #[test]
    fn control_registers_read_back_typed() {
        let expectations = [read(REG_CTRL_REG1, 0x19), read(REG_CTRL_REG2, 0xA0)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        let reg1 = mag.read_ctrl_reg1().unwrap();
        assert_eq!(reg1.mode(), OperatingMode::Active);
        assert_eq!(reg1.over_sampling(), OverSampling::Os128);
        let reg2 = mag.read_ctrl_reg2().unwrap();
        assert!(reg2.auto_mrst_enable());
        assert!(reg2.raw());

        i2c.done();
    }

    #[test]
    fn offsets_are_raw_words() {
        let expectations = [
            read(REG_OFF_Y_MSB, 0xFF),
            read(REG_OFF_Y_LSB, 0x38),
            write(REG_OFF_X_MSB, 0x01),
            write(REG_OFF_X_LSB, 0x2C),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        assert_eq!(mag.read_offset(Axis::Y), Ok(0xFF38));
        assert_eq!(mag.write_offset(Axis::X, 0x012C), Ok(()));

        i2c.done();
    }

    #[test]
    fn driver_works_over_borrowed_interface() {
        let expectations = [read(REG_WHO_AM_I, 0xC4)];
        let mut i2c = I2cMock::new(&expectations);
        let mut iface = I2cInterface::new(i2c.clone());

        {
            let mut mag = Mag3110::new(&mut iface);
            assert_eq!(mag.address(), 0x0E);
            assert_eq!(mag.who_am_i(), Ok(0xC4));
        }

        iface.release();
        i2c.done();
    }

    #[test]
    fn release_i2c_hands_back_bus() {
        let expectations = [write(REG_CTRL_REG1, 0x01)];
        let mut i2c = I2cMock::new(&expectations);
        let mut mag = Mag3110::new_i2c(i2c.clone());

        mag.interface_mut()
            .write_byte(ADDR, REG_CTRL_REG1, 0x01)
            .unwrap();
        let _bus = mag.release_i2c();

        i2c.done();
    }
}
