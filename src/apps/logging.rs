use std::{io::Write, time::Instant};

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the stderr logger. `RUST_LOG` wins over `-v`.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    builder.filter_level(level);
    builder.parse_env(Env::default());

    if verbose >= 2 {
        let start = Instant::now();
        builder.format(move |buf, record| {
            writeln!(buf, "{} {:<5} {}", uptime(start), record.level(), record.args())
        });
    } else {
        // plain diagnostics, like a classic command line tool
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    let _ = builder.try_init();
}

/// `secs.micros` since `start`.
fn uptime(start: Instant) -> String {
    let now = start.elapsed().as_micros();
    format!("{}.{:06}", now / 1_000_000, now % 1_000_000)
}
