//! Bus interface abstraction for the MAG3110 driver.

pub mod i2c;

/// Abstraction over the low-level bus access required by the driver.
///
/// Every call is one complete, blocking bus transaction against a single
/// register of the device at `address`.
pub trait Mag3110Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Reads a single register.
    fn read_byte(&mut self, address: u8, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Writes a single register.
    fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> core::result::Result<(), Self::Error>;
}

impl<T> Mag3110Interface for &mut T
where
    T: Mag3110Interface + ?Sized,
{
    type Error = T::Error;

    fn read_byte(&mut self, address: u8, register: u8) -> core::result::Result<u8, Self::Error> {
        T::read_byte(self, address, register)
    }

    fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> core::result::Result<(), Self::Error> {
        T::write_byte(self, address, register, value)
    }
}
