/// Sets or clears `bit` in `byte`, leaving the other bits untouched.
pub fn with_bit(byte: u8, bit: u8, value: bool) -> u8 {
    if value {
        byte | (1 << bit)
    } else {
        byte & !(1 << bit)
    }
}

pub fn bit(byte: u8, bit: u8) -> bool {
    (byte >> bit) & 0x01 != 0
}

// # with_bit(0b0101, 1, true) => 0b0111
