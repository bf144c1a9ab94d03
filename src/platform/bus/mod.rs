//! Bus adapter seam between the register layer and the I2C hardware.

pub mod linux;
#[cfg(test)]
pub mod sim;

use embedded_hal::i2c::{ErrorKind, I2c, SevenBitAddress};
use std::{io, path::PathBuf};

use crate::platform::i2c_io_expander::registers::Register;

pub const DEFAULT_DEVICE: &str = "/dev/i2c-1";

/// Where the expander lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    pub device: PathBuf,
    pub address: SevenBitAddress,
}

/// Opens handles to an I2C adapter.
///
/// A handle is closed when the returned device is dropped, so a handle never
/// outlives the transaction that opened it.
pub trait Adapter {
    type Device: I2c;

    /// Opens the adapter node.
    fn open(&self) -> Result<Self::Device, BusError>;

    /// Binds the slave address on an open handle.
    fn bind(&self, dev: &mut Self::Device, address: SevenBitAddress) -> Result<(), BusError>;

    /// Human readable name of the adapter, used in diagnostics.
    fn name(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Failed to open {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to set slave address: {address:#04x}: {source}")]
    Bind {
        address: SevenBitAddress,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {register} register from slave: {kind:?}")]
    Read { register: Register, kind: ErrorKind },

    #[error("failed to write {value:#04x} to {register} register of slave: {kind:?}")]
    Write {
        register: Register,
        value: u8,
        kind: ErrorKind,
    },
}
