use std::{io, path::PathBuf};

use embedded_hal::i2c::SevenBitAddress;
use i2cdev::linux::LinuxI2CError;
use linux_embedded_hal::I2cdev;
use log::trace;

use crate::platform::bus::{Adapter, BusConfig, BusError};

/// i2c-dev character device, e.g. `/dev/i2c-1`.
pub struct LinuxAdapter {
    path: PathBuf,
}

impl LinuxAdapter {
    pub fn new(config: &BusConfig) -> Self {
        Self {
            path: config.device.clone(),
        }
    }
}

impl Adapter for LinuxAdapter {
    type Device = I2cdev;

    fn open(&self) -> Result<I2cdev, BusError> {
        trace!("opening {}", self.path.display());
        I2cdev::new(&self.path).map_err(|err: LinuxI2CError| BusError::Open {
            device: self.name(),
            source: io::Error::from(err),
        })
    }

    fn bind(&self, dev: &mut I2cdev, address: SevenBitAddress) -> Result<(), BusError> {
        // I2C_SLAVE ioctl; fails with EBUSY when a kernel driver owns the address
        dev.set_slave_address(u16::from(address))
            .map_err(|err| BusError::Bind {
                address,
                source: io::Error::from(err),
            })
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
