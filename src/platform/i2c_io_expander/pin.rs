use core::fmt;

use crate::platform::i2c_io_expander::Error;

/// A bit position within an expander register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin(u8);

impl Pin {
    pub const MAX: u8 = 7;

    pub fn new(index: u8) -> Result<Self, Error> {
        if index > Self::MAX {
            return Err(Error::PinOutOfRange(index));
        }
        Ok(Pin(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pin direction as stored in CONFIG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Output,
    Input,
}

impl Direction {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Direction::Input
        } else {
            Direction::Output
        }
    }

    pub fn bit(self) -> bool {
        self == Direction::Input
    }
}

/// Converts a single-pin flag (direction or output level) given as a number.
pub fn flag(what: &'static str, value: u8) -> Result<bool, Error> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(Error::ValueOutOfRange { what, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_bounds() {
        assert_eq!(Pin::new(0).unwrap().index(), 0);
        assert_eq!(Pin::new(7).unwrap().index(), 7);
        assert!(matches!(Pin::new(8), Err(Error::PinOutOfRange(8))));
        assert!(matches!(Pin::new(255), Err(Error::PinOutOfRange(255))));
    }

    #[test]
    fn flag_accepts_only_zero_and_one() {
        assert!(!flag("write", 0).unwrap());
        assert!(flag("write", 1).unwrap());
        assert!(matches!(
            flag("direction", 2),
            Err(Error::ValueOutOfRange {
                what: "direction",
                value: 2
            })
        ));
    }

    #[test]
    fn config_bit_convention() {
        assert_eq!(Direction::from_bit(true), Direction::Input);
        assert_eq!(Direction::from_bit(false), Direction::Output);
        assert!(Direction::Input.bit());
        assert!(!Direction::Output.bit());
    }
}
