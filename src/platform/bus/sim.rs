//! In-memory expander behind a fake adapter, for tests.

use std::{cell::RefCell, io, rc::Rc};

use embedded_hal::i2c::{
    ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress,
};

use crate::platform::bus::{Adapter, BusError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Open,
    Bind(SevenBitAddress),
    Read(u8),
    Write(u8, u8),
    Close,
}

#[derive(Debug, Default)]
pub struct SimState {
    pub registers: [u8; 4],
    pub address: SevenBitAddress,
    pub events: Vec<Event>,
    pub fail_open: bool,
    pub fail_bind: bool,
    pub fail_read: Option<u8>,
    pub fail_write: Option<u8>,
    pointer: u8,
}

#[derive(Clone)]
pub struct SimAdapter {
    state: Rc<RefCell<SimState>>,
}

impl SimAdapter {
    pub fn new(address: SevenBitAddress) -> Self {
        let state = SimState {
            address,
            // power-on: all outputs high, all pins inputs
            registers: [0x00, 0xff, 0x00, 0xff],
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn state(&self) -> std::cell::RefMut<'_, SimState> {
        self.state.borrow_mut()
    }

    pub fn register(&self, offset: u8) -> u8 {
        self.state.borrow().registers[offset as usize]
    }

    pub fn set_register(&self, offset: u8, value: u8) {
        self.state.borrow_mut().registers[offset as usize] = value;
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Write(reg, value) => Some((reg, value)),
                _ => None,
            })
            .collect()
    }

    /// Number of opened handles that have not been closed.
    pub fn open_handles(&self) -> isize {
        self.events().iter().fold(0, |acc, e| match e {
            Event::Open => acc + 1,
            Event::Close => acc - 1,
            _ => acc,
        })
    }
}

impl Adapter for SimAdapter {
    type Device = SimDevice;

    fn open(&self) -> Result<SimDevice, BusError> {
        let mut state = self.state.borrow_mut();
        if state.fail_open {
            return Err(BusError::Open {
                device: self.name(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        state.events.push(Event::Open);
        Ok(SimDevice {
            state: self.state.clone(),
            bound: None,
        })
    }

    fn bind(&self, dev: &mut SimDevice, address: SevenBitAddress) -> Result<(), BusError> {
        let mut state = self.state.borrow_mut();
        if state.fail_bind {
            return Err(BusError::Bind {
                address,
                source: io::Error::from(io::ErrorKind::ResourceBusy),
            });
        }
        state.events.push(Event::Bind(address));
        dev.bound = Some(address);
        Ok(())
    }

    fn name(&self) -> String {
        "sim".into()
    }
}

pub struct SimDevice {
    state: Rc<RefCell<SimState>>,
    bound: Option<SevenBitAddress>,
}

impl Drop for SimDevice {
    fn drop(&mut self) {
        self.state.borrow_mut().events.push(Event::Close);
    }
}

impl ErrorType for SimDevice {
    type Error = ErrorKind;
}

impl I2c for SimDevice {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if self.bound != Some(address) || state.address != address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((&reg, rest)) = bytes.split_first() else {
                        continue;
                    };
                    state.pointer = reg;
                    if let Some(&value) = rest.first() {
                        if state.fail_write == Some(reg) {
                            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
                        }
                        state.events.push(Event::Write(reg, value));
                        // INPUT is read-only
                        if reg != 0x00 {
                            state.registers[(reg & 0x03) as usize] = value;
                        }
                    }
                }
                Operation::Read(buf) => {
                    let reg = state.pointer;
                    if state.fail_read == Some(reg) {
                        return Err(ErrorKind::Bus);
                    }
                    state.events.push(Event::Read(reg));
                    for byte in buf.iter_mut() {
                        *byte = state.registers[(reg & 0x03) as usize];
                    }
                }
            }
        }
        Ok(())
    }
}
