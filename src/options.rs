/// Runtime options of a [`Batch`](crate::Batch).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    /// Only attributes whose name starts with this prefix are encoded. The prefix is
    /// stripped from the encoded name.
    pub attribute_prefix: String,
    /// Version string written as `fileversion`.
    pub file_version: String,
    /// Mesh sub-mesh groups are named `<group_prefix>_<i>`.
    pub group_prefix: String,
    /// Write the `sr_*` global attributes.
    pub spatial_reference: bool,
    pub metadata: Metadata,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            attribute_prefix: "attrib_".to_string(),
            file_version: "18.0".to_string(),
            group_prefix: "part".to_string(),
            spatial_reference: true,
            metadata: Metadata::default(),
        }
    }
}

/// Process metadata written to the document `info`. Supplied by the host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub software: String,
    pub artist: Option<String>,
    pub date: String,
    pub hostname: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            software: env!("CARGO_PKG_NAME").to_string(),
            artist: None,
            date: String::new(),
            hostname: String::new(),
        }
    }
}
