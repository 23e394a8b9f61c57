//! Error types for the SheetPilot protocol layer.

mod driver;
mod intake;

pub use driver::*;
pub use intake::*;
