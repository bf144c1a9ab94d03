use std::io::{self, Write};

use log::info;

use crate::{
    apps::cli::{Intent, Target},
    platform::{
        bus::Adapter,
        i2c_io_expander::{self, model::ExpanderModel, registers::Register, Expander},
    },
};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Expander(#[from] i2c_io_expander::Error),

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Executes an intent: write, then direction, then read. Each step is its own
/// bus transaction. Stops at the first failure.
pub fn run<A, MODEL, W>(
    intent: &Intent,
    expander: &Expander<A, MODEL>,
    out: &mut W,
) -> Result<(), RunError>
where
    A: Adapter,
    MODEL: ExpanderModel,
    W: Write,
{
    // First set the output if requested.
    if let Some(value) = intent.write {
        match intent.target {
            Target::Pin(pin) => {
                info!("writing {} to pin {}", value, pin);
                expander.write_pin(pin, value)?
            }
            Target::Port => {
                info!("writing {:#04x} to port", value);
                expander.write_port(value)?
            }
        }
        let r = expander.read_register(Register::Output)?;
        writeln!(out, "Output Register = 0x{:02x}", r)?;
    }

    // Configure direction if requested.
    if let Some(direction) = intent.direction {
        match intent.target {
            Target::Pin(pin) => {
                info!("configuring pin {} direction {}", pin, direction);
                expander.configure_pin(pin, direction)?
            }
            Target::Port => {
                info!("configuring port direction {:#04x}", direction);
                expander.configure_port(direction)?
            }
        }
        let r = expander.read_register(Register::Config)?;
        writeln!(out, "Config Register = 0x{:02x}", r)?;
    }

    // Read the input register if requested.
    if intent.read {
        match intent.target {
            Target::Pin(pin) => {
                let r = expander.read_register_bit(Register::Input, pin)?;
                writeln!(out, "Input on pin {} = {}", pin, u8::from(r))?;
            }
            Target::Port => {
                let r = expander.read_register(Register::Input)?;
                writeln!(out, "Input Register = 0x{:02x}", r)?;
            }
        }
    }

    Ok(())
}
