use crate::error::{GeneticsError, GeneticsResult};
use crate::types::Allele::{Dominant, Recessive};
use crate::types::{AllelePair, BiologicalState, InheritanceType};

/// Allele pair carried by an animal in `state` for a gene of `gene_type`.
///
/// A state legal for a different inheritance type (`super` on a recessive
/// gene, `het` on a dominant one) is rejected.
pub fn encode(gene_type: InheritanceType, state: BiologicalState) -> GeneticsResult<AllelePair> {
    let pair = match gene_type {
        InheritanceType::Recessive => match state {
            BiologicalState::Normal => Some(AllelePair(Dominant, Dominant)),
            BiologicalState::Het => Some(AllelePair(Dominant, Recessive)),
            BiologicalState::Visual => Some(AllelePair(Recessive, Recessive)),
            BiologicalState::Super => None,
        },
        InheritanceType::Codominant => match state {
            BiologicalState::Normal => Some(AllelePair(Dominant, Dominant)),
            BiologicalState::Het => Some(AllelePair(Dominant, Recessive)),
            BiologicalState::Super => Some(AllelePair(Recessive, Recessive)),
            BiologicalState::Visual => None,
        },
        InheritanceType::Dominant => match state {
            BiologicalState::Normal => Some(AllelePair(Dominant, Dominant)),
            BiologicalState::Visual => Some(AllelePair(Dominant, Recessive)),
            BiologicalState::Het | BiologicalState::Super => None,
        },
    };

    pair.ok_or_else(|| GeneticsError::InvalidState {
        gene_type,
        state: state.to_string(),
    })
}

/// Same as [`encode`], starting from a raw state tag.
pub fn encode_tag(gene_type: InheritanceType, tag: &str) -> GeneticsResult<AllelePair> {
    let state = BiologicalState::from_tag(tag).ok_or_else(|| GeneticsError::InvalidState {
        gene_type,
        state: tag.to_string(),
    })?;
    encode(gene_type, state)
}
