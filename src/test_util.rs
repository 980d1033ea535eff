use crate::github::{ContainerVersionMetadata, PackageVersion, PackageVersionMetadata};

pub fn version(id: u64, tags: &[&str], updated_at: &str) -> PackageVersion {
    PackageVersion {
        id,
        name: format!("sha256:foobar{id}"),
        updated_at: updated_at.parse().unwrap(),
        metadata: PackageVersionMetadata {
            package_type: "container".to_string(),
            container: ContainerVersionMetadata {
                tags: tags.iter().map(|tag| tag.to_string()).collect(),
            },
        },
    }
}
