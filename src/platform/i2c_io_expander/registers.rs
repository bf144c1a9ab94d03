use core::fmt;

/// The four single-byte registers of the expander. Bit n is pin n.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Input,
    Output,
    /// Polarity inversion of INPUT. Never written by this tool.
    #[allow(dead_code)]
    Invert,
    /// 1 = input, 0 = output.
    Config,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register::Input => "INPUT",
            Register::Output => "OUTPUT",
            Register::Invert => "INVERT",
            Register::Config => "CONFIG",
        };
        f.write_str(name)
    }
}
