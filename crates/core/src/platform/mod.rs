mod error;
mod pointer;

pub use error::{PlatformError, PlatformErrorKind};
pub use pointer::{PointerButton, PointerDevice, PointerSettings};
