use crate::types::ArtifactType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CuratorError>;

#[derive(Debug, Error)]
pub enum CuratorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot merge a {found} record into a {expected} record")]
    TypeMismatch {
        expected: ArtifactType,
        found: ArtifactType,
    },
}
