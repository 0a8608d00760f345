mod pointer;
mod session;
#[cfg(any(test, feature = "mock-provider"))]
pub mod test_support;

pub use pointer::{PointerEngine, PointerError, Sleeper, thread_sleeper};
pub use session::Session;
