pub mod dav;
pub mod error;

pub use error::{RfcError, RfcResult};
