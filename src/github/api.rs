use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PackageVersion {
    pub id: u64,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    pub metadata: PackageVersionMetadata,
}

impl PackageVersion {
    /// A version with an empty tag set is an intermediate or superseded
    /// build artifact.
    pub fn is_untagged(&self) -> bool {
        self.metadata.container.tags.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PackageVersionMetadata {
    pub package_type: String,
    pub container: ContainerVersionMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ContainerVersionMetadata {
    pub tags: Vec<String>,
}
