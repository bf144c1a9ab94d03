mod apps;
mod platform;

use std::{ffi::OsString, io, io::Write, process::ExitCode};

use clap::{error::ErrorKind, Parser};
use log::{debug, error};

use crate::{
    apps::{
        cli::{self, Cli, Intent},
        gpio_cli::{self, RunError},
        logging,
    },
    platform::{
        bus::{linux::LinuxAdapter, Adapter, BusConfig},
        i2c_io_expander::{models::pca9554::PCA9554, Expander},
    },
};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let code = run_app(
        std::env::args_os(),
        LinuxAdapter::new,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    ExitCode::from(code)
}

/// Parses `args`, runs the request against the adapter built by
/// `make_adapter` and returns the process exit status.
fn run_app<I, T, A, F, O, E>(args: I, make_adapter: F, out: &mut O, err: &mut E) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    A: Adapter,
    F: FnOnce(&BusConfig) -> A,
    O: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", e.render());
            return EXIT_SUCCESS;
        }
        Err(e) => {
            let _ = write!(err, "{}", e.render());
            let _ = write!(err, "\n{}", cli::usage());
            return EXIT_USAGE;
        }
    };

    logging::init(cli.verbose);

    if cli.help {
        let _ = write!(err, "{}", cli::usage());
        return EXIT_SUCCESS;
    }

    let intent = match Intent::try_from(&cli) {
        Ok(intent) => intent,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            let _ = write!(err, "{}", cli::usage());
            return EXIT_USAGE;
        }
    };
    debug!("{:?}", intent);

    let config = cli.bus_config::<PCA9554>();
    let expander: Expander<_, PCA9554> = Expander::new(make_adapter(&config), config.address);

    match gpio_cli::run(&intent, &expander, out) {
        Ok(()) => EXIT_SUCCESS,
        Err(RunError::Expander(e)) => {
            // already logged by the register layer
            debug!("aborted: {e}");
            EXIT_FAILURE
        }
        Err(e) => {
            error!("{e}");
            EXIT_FAILURE
        }
    }
}
