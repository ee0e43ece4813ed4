//! # Domain Layer
//!
//! Core types shared by every layer of the shell cache:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and result alias |
//! | [`constants`] | Naming conventions shared with collaborators |
//! | [`value_objects`] | Shell descriptors, session parameters, session configuration |
//! | [`ports`] | Traits implemented by infrastructure and external collaborators |
//!
//! The domain layer holds no I/O. Everything that touches the filesystem,
//! the runtime or a storage engine lives behind a port.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
