//! Register access for an 8-pin I2C GPIO expander.
//!
//! Every public operation is one self-contained bus transaction: open the
//! adapter, bind the slave address, run the register operation(s), close. The
//! handle is dropped on every exit path, so nothing is held between calls.

pub mod model;
pub mod models;
pub mod pin;
pub mod registers;

use core::marker::PhantomData;

use embedded_hal::i2c::{Error as _, I2c, SevenBitAddress};
use log::{debug, error, trace, warn};

use crate::platform::{
    bus::{Adapter, BusError},
    i2c_io_expander::{
        model::ExpanderModel,
        pin::{flag, Direction, Pin},
        registers::Register,
    },
    util::{bit, with_bit},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pin {0} out of range (0-{max})", max = Pin::MAX)]
    PinOutOfRange(u8),

    #[error("{what} value {value} out of range for a single pin (0-1)")]
    ValueOutOfRange { what: &'static str, value: u8 },

    #[error(transparent)]
    Bus(#[from] BusError),
}

pub struct Expander<A, MODEL>
where
    A: Adapter,
    MODEL: ExpanderModel,
{
    adapter: A,
    address: SevenBitAddress,
    _null0: PhantomData<MODEL>,
}

impl<A, MODEL> Expander<A, MODEL>
where
    A: Adapter,
    MODEL: ExpanderModel,
{
    pub fn new(adapter: A, address: SevenBitAddress) -> Self {
        debug!("{} at {:#04x} on {}", MODEL::NAME, address, adapter.name());
        Self {
            adapter,
            address,
            _null0: PhantomData,
        }
    }

    /// Writes `value` to CONFIG. A set bit makes the pin an input.
    pub fn configure_port(&self, value: u8) -> Result<(), Error> {
        self.transaction(|session| session.write(Register::Config, value))
    }

    /// Sets (`direction == 1`, input) or clears (`0`, output) one CONFIG bit.
    pub fn configure_pin(&self, pin: u8, direction: u8) -> Result<(), Error> {
        let pin = Pin::new(pin).inspect_err(|e| warn!("{e}"))?;
        let direction = flag("direction", direction)
            .map(Direction::from_bit)
            .inspect_err(|e| warn!("{e}"))?;

        debug!("pin {} -> {:?}", pin, direction);
        self.transaction(|session| {
            session
                .set_bit(Register::Config, pin, direction.bit())
                .map(drop)
        })
    }

    /// Replaces the whole OUTPUT register.
    pub fn write_port(&self, value: u8) -> Result<(), Error> {
        self.transaction(|session| session.write(Register::Output, value))
    }

    pub fn write_pin(&self, pin: u8, value: u8) -> Result<(), Error> {
        let pin = Pin::new(pin).inspect_err(|e| warn!("{e}"))?;
        let value = flag("write", value).inspect_err(|e| warn!("{e}"))?;

        self.transaction(|session| session.set_bit(Register::Output, pin, value).map(drop))
    }

    pub fn read_register(&self, register: Register) -> Result<u8, Error> {
        self.transaction(|session| session.read(register))
    }

    pub fn read_register_bit(&self, register: Register, pin: u8) -> Result<bool, Error> {
        let pin = Pin::new(pin).inspect_err(|e| warn!("{e}"))?;

        self.transaction(|session| Ok(bit(session.read(register)?, pin.index())))
    }

    fn transaction<T>(
        &self,
        op: impl FnOnce(&mut Session<A::Device, MODEL>) -> Result<T, BusError>,
    ) -> Result<T, Error> {
        let result = self.adapter.open().and_then(|mut dev| {
            self.adapter.bind(&mut dev, self.address)?;
            let mut session = Session {
                dev,
                address: self.address,
                _model: PhantomData,
            };
            op(&mut session)
            // session (and the handle) dropped here
        });

        result.map_err(|e| {
            error!("{e}");
            Error::Bus(e)
        })
    }
}

/// An open, bound handle for the duration of one transaction.
struct Session<D: I2c, MODEL: ExpanderModel> {
    dev: D,
    address: SevenBitAddress,
    _model: PhantomData<MODEL>,
}

impl<D: I2c, MODEL: ExpanderModel> Session<D, MODEL> {
    fn read(&mut self, register: Register) -> Result<u8, BusError> {
        let reg = [MODEL::offset(register)];
        let mut data = [0x00];

        self.dev
            .write_read(self.address, &reg, &mut data)
            .map_err(|e| BusError::Read {
                register,
                kind: e.kind(),
            })?;

        trace!("read {} = {:#04x}", register, data[0]);
        Ok(data[0])
    }

    fn write(&mut self, register: Register, value: u8) -> Result<(), BusError> {
        let buf = [MODEL::offset(register), value];

        self.dev
            .write(self.address, &buf)
            .map_err(|e| BusError::Write {
                register,
                value,
                kind: e.kind(),
            })?;

        trace!("wrote {} = {:#04x}", register, value);
        Ok(())
    }

    /// Read-modify-write of a single bit. Returns the byte written.
    fn set_bit(&mut self, register: Register, pin: Pin, value: bool) -> Result<u8, BusError> {
        // read
        let old = self.read(register)?;

        // modify
        let new = with_bit(old, pin.index(), value);

        // update
        self.write(register, new)?;
        Ok(new)
    }
}

impl<D: I2c, MODEL: ExpanderModel> Drop for Session<D, MODEL> {
    fn drop(&mut self) {
        trace!("closing handle for {:#04x}", self.address);
    }
}
