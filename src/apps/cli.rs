//! Command line surface and its translation into an [`Intent`].

use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};
use embedded_hal::i2c::SevenBitAddress;

use crate::platform::{
    bus::{BusConfig, DEFAULT_DEVICE},
    i2c_io_expander::{model::ExpanderModel, pin::Pin},
};

const EXAMPLES: &str = "\
Examples:
  Set pin 0 high:
    gpio-expander -p 0 -w 1

  Configure pin 0 as output:
    gpio-expander -p 0 -d 0

  Set GPIO port:
    gpio-expander -w 0xff

  Read the input register:
    gpio-expander -r
";

#[derive(Debug, Parser)]
#[command(
    name = "gpio-expander",
    version,
    about = "Configure and operate an 8-pin I2C GPIO expander",
    disable_help_flag = true,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Set the direction of the port (0x00-0xff) or of the pin given with -p (0/1). 1 = input
    #[arg(short = 'd', value_name = "DIRECTION", value_parser = parse_number)]
    pub direction: Option<u32>,

    /// Write value to the port (0x00-0xff) or to the pin given with -p (0/1)
    #[arg(short = 'w', value_name = "VALUE", value_parser = parse_number)]
    pub write: Option<u32>,

    /// Read the input register (or the bit of the pin given with -p)
    #[arg(short = 'r')]
    pub read: bool,

    /// Pin to operate on, 0-7. Without it the whole port is used
    #[arg(short = 'p', value_name = "PIN", value_parser = parse_number)]
    pub pin: Option<u32>,

    /// I2C adapter device node
    #[arg(short = 'D', long, env = "GPIO_EXPANDER_DEVICE", default_value = DEFAULT_DEVICE)]
    pub device: PathBuf,

    /// 7-bit slave address of the expander [default: 0x3e]
    #[arg(short = 'a', long, env = "GPIO_EXPANDER_ADDRESS", value_parser = parse_address)]
    pub address: Option<SevenBitAddress>,

    /// More log output, repeat for more
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print usage
    #[arg(short = '?', long, action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Cli {
    pub fn bus_config<MODEL: ExpanderModel>(&self) -> BusConfig {
        BusConfig {
            device: self.device.clone(),
            address: self.address.unwrap_or(MODEL::DEFAULT_ADDRESS),
        }
    }
}

/// Usage text, as printed to stderr.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Parses a number the way `strtoul(s, NULL, 0)` reads it: `0x` hex, leading
/// `0` octal, decimal otherwise.
pub fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    u32::from_str_radix(digits, radix).map_err(|e| format!("`{s}` is not a number: {e}"))
}

fn parse_address(s: &str) -> Result<SevenBitAddress, String> {
    let address = parse_number(s)?;
    match SevenBitAddress::try_from(address) {
        Ok(address) if address <= 0x7f => Ok(address),
        _ => Err(format!("{address:#x} is not a 7-bit address")),
    }
}

/// Outcome of range-checking one numeric option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting<T> {
    Absent,
    Valid(T),
    OutOfRange(u32),
}

impl Setting<u8> {
    pub fn check(value: Option<u32>, max: u8) -> Self {
        match value {
            None => Setting::Absent,
            Some(v) if v <= u32::from(max) => Setting::Valid(v as u8),
            Some(v) => Setting::OutOfRange(v),
        }
    }

    fn into_option(self, option: char, max: u8) -> Result<Option<u8>, CliError> {
        match self {
            Setting::Absent => Ok(None),
            Setting::Valid(v) => Ok(Some(v)),
            Setting::OutOfRange(value) => Err(CliError::OutOfRange { option, value, max }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Port,
    Pin(u8),
}

/// What one invocation asks for. Executed as write, direction, read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub target: Target,
    pub write: Option<u8>,
    pub direction: Option<u8>,
    pub read: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CliError {
    #[error("nothing to do: give at least one of -d, -w or -r")]
    NothingRequested,

    #[error("-{option} {value} out of range (max {max})")]
    OutOfRange { option: char, value: u32, max: u8 },
}

impl TryFrom<&Cli> for Intent {
    type Error = CliError;

    fn try_from(cli: &Cli) -> Result<Self, CliError> {
        let target = match Setting::check(cli.pin, Pin::MAX).into_option('p', Pin::MAX)? {
            Some(pin) => Target::Pin(pin),
            None => Target::Port,
        };

        let max = match target {
            Target::Port => u8::MAX,
            Target::Pin(_) => 1,
        };
        let write = Setting::check(cli.write, max).into_option('w', max)?;
        let direction = Setting::check(cli.direction, max).into_option('d', max)?;

        if write.is_none() && direction.is_none() && !cli.read {
            return Err(CliError::NothingRequested);
        }

        Ok(Intent {
            target,
            write,
            direction,
            read: cli.read,
        })
    }
}
