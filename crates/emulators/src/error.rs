use gallery_pilot_core::provider::ProviderError;
use gallery_pilot_runtime::PointerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Pointer(#[from] PointerError),
    #[error("{query} has no match at index {index} ({len} found)")]
    IndexOutOfRange { query: String, index: usize, len: usize },
}

pub type EmulatorResult<T> = Result<T, EmulatorError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct ParseRoleError(pub String);
