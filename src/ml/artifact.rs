//! Artifact persistence
//!
//! Models and the scaler are stored as bincode blobs, one file each. There is
//! no header or version; a file either decodes into the expected type and
//! passes `Artifact::validate`, or it is rejected.

use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension used for every artifact
pub const EXTENSION: &str = "bin";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to access artifact '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode artifact '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to encode artifact '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("artifact '{}' is invalid: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// A serializable object that can be loaded from disk at startup.
pub trait Artifact: Serialize + DeserializeOwned {
    /// Structural checks run after decoding
    fn validate(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn load<A: Artifact>(path: &Path) -> Result<A, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let artifact: A = bincode::deserialize(&bytes).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    artifact.validate().map_err(|e| ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(artifact)
}

/// Write an artifact, validating it first so unusable files never land on disk.
pub fn save<A: Artifact>(artifact: &A, path: &Path) -> Result<(), ArtifactError> {
    artifact.validate().map_err(|e| ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let bytes = bincode::serialize(artifact).map_err(|source| ArtifactError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, bytes).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Bounded {
        limit: u32,
    }

    impl Artifact for Bounded {
        fn validate(&self) -> anyhow::Result<()> {
            if self.limit > 10 {
                anyhow::bail!("limit {} exceeds 10", self.limit);
            }
            Ok(())
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bounded.bin");

        save(&Bounded { limit: 7 }, &path).unwrap();
        let loaded: Bounded = load(&path).unwrap();
        assert_eq!(loaded, Bounded { limit: 7 });
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        let err = load::<Bounded>(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(p) if p == path));
    }

    #[test]
    fn test_truncated_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.bin");
        std::fs::write(&path, [1u8, 2]).unwrap();

        let err = load::<Bounded>(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Decode { .. }));
    }

    #[test]
    fn test_validation_runs_on_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bounded.bin");

        std::fs::write(&path, bincode::serialize(&Bounded { limit: 42 }).unwrap()).unwrap();
        let err = load::<Bounded>(&path).unwrap_err();
        assert!(err.to_string().contains("limit 42 exceeds 10"));

        let err = save(&Bounded { limit: 11 }, &dir.path().join("other.bin")).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
        assert!(!dir.path().join("other.bin").exists());
    }
}
