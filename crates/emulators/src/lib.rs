//! Emulators for gallery UI tests.
//!
//! [`ElementLocator`] turns logical [`Role`]s into elements of the live UI tree and
//! [`InteractionDriver`] performs pointer gestures on them. [`GalleryApp`] and
//! [`AlbumEditor`] bundle both into the vocabulary test suites use.

mod album_editor;
mod driver;
mod error;
mod gallery;
mod locator;
mod roles;
mod settings;
mod toolbar;

pub use album_editor::AlbumEditor;
pub use driver::{InteractionDriver, closing_point};
pub use error::{EmulatorError, EmulatorResult, ParseRoleError};
pub use gallery::GalleryApp;
pub use locator::ElementLocator;
pub use roles::{Lookup, Role};
pub use settings::{DEFAULT_RETRY_DELAY, EmulatorSettings};
pub use toolbar::{Toolbar, ToolbarLayout};

#[cfg(test)]
mod tests;
