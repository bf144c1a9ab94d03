use embedded_hal::i2c::SevenBitAddress;

use crate::platform::i2c_io_expander::registers::Register;

/// Register map of a particular expander part.
pub trait ExpanderModel {
    const NAME: &'static str;
    const DEFAULT_ADDRESS: SevenBitAddress;

    fn offset(register: Register) -> u8;
}
