use crate::types::InheritanceType;

/// Errors raised by a single gene calculation.
///
/// Both are fatal to the call that produced them; nothing is computed on
/// invalid input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneticsError {
    #[error("Unknown gene: {gene_id}")]
    UnknownGene { gene_id: String },

    #[error("Invalid state '{state}' for a {gene_type} gene")]
    InvalidState {
        gene_type: InheritanceType,
        state: String,
    },
}

pub type GeneticsResult<T> = std::result::Result<T, GeneticsError>;
