//! Core vocabulary shared by the gallery emulators, the runtime and the mock backends.
//!
//! UI trees and pointer devices are consumed through the [`provider::UiTree`] and
//! [`platform::PointerDevice`] traits; the only logic living here is query matching.

pub mod platform;
pub mod provider;
pub mod types;
pub mod ui;
