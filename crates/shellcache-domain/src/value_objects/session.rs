//! Session parameters and configuration metadata

use crate::constants::{CONTENT_RECORDS_NAMESPACE, RECORD_PROPERTY_SUFFIX};
use crate::value_objects::shell::RecordBlueprint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything a data provider needs to build a tenant's session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFactoryParameters {
    /// Data provider name
    pub provider: String,
    /// Physical folder reserved for the tenant's data
    pub data_folder: PathBuf,
    /// Provider connection string
    pub connection_string: Option<String>,
    /// Records to map
    pub record_descriptors: Vec<RecordBlueprint>,
}

/// Session configuration artifact
///
/// Expensive to assemble and serializable, so configuration caches can
/// persist it between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfiguration {
    /// Provider that produced the configuration
    pub provider: String,
    /// Provider-specific connection properties
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Entity mappings
    #[serde(default)]
    pub class_mappings: Vec<ClassMapping>,
}

/// Mapping metadata of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMapping {
    /// Fully qualified entity name
    pub entity_name: String,
    /// Backing table
    pub table_name: String,
    /// Property mappings
    #[serde(default)]
    pub properties: Vec<PropertyMapping>,
}

/// Mapping metadata of one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMapping {
    /// Property name
    pub name: String,
    /// Whether a plain accessor is used
    pub basic_accessor: bool,
    /// Whether the property is loaded when its entity is selected
    pub selectable: bool,
}

impl SessionConfiguration {
    /// Find the mapping of an entity
    pub fn class_mapping(&self, entity_name: &str) -> Option<&ClassMapping> {
        self.class_mappings
            .iter()
            .find(|mapping| mapping.entity_name == entity_name)
    }

    /// Stop selecting proxied record references of content records
    ///
    /// Touches only metadata. Running it again changes nothing.
    /// Returns the number of properties switched off by this call.
    pub fn disable_proxy_record_selection(&mut self) -> usize {
        let mut disabled = 0;
        for mapping in self
            .class_mappings
            .iter_mut()
            .filter(|mapping| mapping.entity_name.starts_with(CONTENT_RECORDS_NAMESPACE))
        {
            for property in mapping.properties.iter_mut() {
                if property.selectable
                    && !property.basic_accessor
                    && property.name.ends_with(RECORD_PROPERTY_SUFFIX)
                {
                    property.selectable = false;
                    disabled += 1;
                }
            }
        }
        disabled
    }
}

impl ClassMapping {
    /// Find a property mapping by name
    pub fn property(&self, name: &str) -> Option<&PropertyMapping> {
        self.properties.iter().find(|property| property.name == name)
    }
}

impl From<&RecordBlueprint> for ClassMapping {
    fn from(record: &RecordBlueprint) -> Self {
        Self {
            entity_name: record.entity_name.clone(),
            table_name: record.table_name.clone(),
            properties: record
                .properties
                .iter()
                .map(|property| PropertyMapping {
                    name: property.name.clone(),
                    basic_accessor: property.basic_accessor,
                    selectable: true,
                })
                .collect(),
        }
    }
}
