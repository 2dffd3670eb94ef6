use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("slave type {kind:?} requires field {field:?}")]
    MissingField { kind: String, field: &'static str },
    #[error("empty slave type")]
    EmptyKind,
}
