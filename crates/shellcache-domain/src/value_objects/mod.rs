//! Value Objects
//!
//! Immutable descriptors exchanged between the holders and their collaborators.

/// Change notifications emitted by watchers
pub mod notification;
/// Session parameters and configuration metadata
pub mod session;
/// Tenant shell descriptors
pub mod shell;

pub use notification::ChangeNotification;
pub use session::{ClassMapping, PropertyMapping, SessionConfiguration, SessionFactoryParameters};
pub use shell::{RecordBlueprint, RecordProperty, ShellBlueprint, ShellSettings};
