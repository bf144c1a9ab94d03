pub mod bus;
pub mod i2c_io_expander;
pub mod util;
