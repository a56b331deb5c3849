use thiserror::Error;

/// Failure kinds surfaced by repository operations.
///
/// `NotFound` is the only client-meaningful failure; anything that goes wrong
/// inside a multi-step write aborts the enclosing transaction and surfaces as
/// `Storage`, never as a partially applied result.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
