//! The reactivity driver and signal container (C8). Decides when the
//! render root reruns, then owns reconciliation, command application, and
//! the error-recovery policy of spec §7 end to end.

mod active;
mod driver;
mod mode;
mod signal;

pub use active::{driver_installed, install_driver, uninstall_driver, DriverHandle};
pub use driver::Driver;
pub use mode::ReactivityMode;
pub use signal::Signal;
