pub mod cli;
pub mod gpio_cli;
pub mod logging;
