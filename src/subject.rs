//! # Subject Parser

use crate::types::{CompositeSubject, VerifiedClaims};

/// Separates the two identifiers in a composite `sub` claim
pub const SUBJECT_DELIMITER: char = '_';

/// Splits the `sub` claim into its two identifiers.
///
/// `None` when `sub` is absent, not a string, or does not split into exactly two non-empty
/// parts.
pub fn parse_subject(claims: &VerifiedClaims) -> Option<CompositeSubject> {
    parse_subject_str(claims.subject()?)
}

pub(crate) fn parse_subject_str(sub: &str) -> Option<CompositeSubject> {
    let mut parts = sub.split(SUBJECT_DELIMITER);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(primary), Some(secondary), None) if !primary.is_empty() && !secondary.is_empty() => {
            Some(CompositeSubject {
                primary_id: primary.to_string(),
                secondary_id: secondary.to_string(),
            })
        }
        _ => None,
    }
}
