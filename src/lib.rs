#![no_std]

#[cfg(test)]
extern crate std;

mod error;

pub mod config;
pub mod decode;
pub mod device;
pub mod interface;
mod log;
pub mod params;
pub mod registers;

pub use crate::decode::{to_signed, DecodeError};
pub use crate::device::Mag3110;
pub use crate::error::{Error, Result};
