//! Artifact storage backends

mod local_disk;

pub use local_disk::LocalDiskArtifactStore;
