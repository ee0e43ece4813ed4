//! Tenant shell descriptors

use serde::{Deserialize, Serialize};

/// Settings of one tenant shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSettings {
    /// Tenant name, also the name of its app-data folder
    pub name: String,
    /// Data provider selected for the tenant
    pub data_provider: String,
    /// Provider connection string
    #[serde(default)]
    pub data_connection_string: Option<String>,
}

impl ShellSettings {
    /// Create shell settings without a connection string
    pub fn new<N: Into<String>, P: Into<String>>(name: N, data_provider: P) -> Self {
        Self {
            name: name.into(),
            data_provider: data_provider.into(),
            data_connection_string: None,
        }
    }

    /// Set the connection string
    pub fn with_connection_string<S: Into<String>>(mut self, connection_string: S) -> Self {
        self.data_connection_string = Some(connection_string.into());
        self
    }
}

/// Records known to the tenant's enabled features
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellBlueprint {
    /// Record descriptors
    #[serde(default)]
    pub records: Vec<RecordBlueprint>,
}

impl ShellBlueprint {
    /// Create a blueprint from record descriptors
    pub fn new(records: Vec<RecordBlueprint>) -> Self {
        Self { records }
    }
}

/// Descriptor of one persistent record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBlueprint {
    /// Fully qualified entity name
    pub entity_name: String,
    /// Table the record is stored in
    pub table_name: String,
    /// Feature declaring the record
    #[serde(default)]
    pub feature: Option<String>,
    /// Mapped properties
    #[serde(default)]
    pub properties: Vec<RecordProperty>,
}

impl RecordBlueprint {
    /// Create a record descriptor without properties
    pub fn new<E: Into<String>, T: Into<String>>(entity_name: E, table_name: T) -> Self {
        Self {
            entity_name: entity_name.into(),
            table_name: table_name.into(),
            feature: None,
            properties: Vec::new(),
        }
    }

    /// Set the declaring feature
    pub fn with_feature<S: Into<String>>(mut self, feature: S) -> Self {
        self.feature = Some(feature.into());
        self
    }

    /// Add a property
    pub fn with_property(mut self, property: RecordProperty) -> Self {
        self.properties.push(property);
        self
    }
}

/// Descriptor of one record property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProperty {
    /// Property name
    pub name: String,
    /// Whether the property is read and written through a plain accessor
    pub basic_accessor: bool,
}

impl RecordProperty {
    /// Plain value property
    pub fn basic<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            basic_accessor: true,
        }
    }

    /// Property resolved through a custom accessor (typically a record reference)
    pub fn reference<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            basic_accessor: false,
        }
    }
}
