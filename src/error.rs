use thiserror::Error;

/// Rejection raised at the record boundary, before any normalization runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected a video record object, found {found}")]
    NotARecord { found: &'static str },
}
