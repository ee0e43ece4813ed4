//! Domain constants
//!
//! Naming conventions that collaborators and the infrastructure layer must agree on.

/// Entity namespace whose record references are proxied
pub const CONTENT_RECORDS_NAMESPACE: &str = "Orchard.ContentManagement.Records.";

/// Suffix of properties that reference another record
pub const RECORD_PROPERTY_SUFFIX: &str = "Record";

/// App-data folder holding one sub-folder per tenant shell
pub const SITES_FOLDER: &str = "Sites";

/// File extension of settings sources
pub const SETTINGS_FILE_EXTENSION: &str = "json";
