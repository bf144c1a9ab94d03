use embedded_hal::i2c::SevenBitAddress;

use crate::platform::i2c_io_expander::{model::ExpanderModel, registers::Register};

/// 8-bit quasi-standard register map shared by the PCA9554/PCA9534/TCA9554
/// family.
pub struct PCA9554 {}

impl PCA9554 {
    const INPUT_ADDR: u8 = 0x00;
    const OUTPUT_ADDR: u8 = 0x01;
    const INVERT_ADDR: u8 = 0x02;
    const DIRECTION_ADDR: u8 = 0x03;
}

impl ExpanderModel for PCA9554 {
    const NAME: &'static str = "PCA9554";
    const DEFAULT_ADDRESS: SevenBitAddress = 0x3e;

    fn offset(register: Register) -> u8 {
        match register {
            Register::Input => Self::INPUT_ADDR,
            Register::Output => Self::OUTPUT_ADDR,
            Register::Invert => Self::INVERT_ADDR,
            // 1 = input, 0 = output
            Register::Config => Self::DIRECTION_ADDR,
        }
    }
}
