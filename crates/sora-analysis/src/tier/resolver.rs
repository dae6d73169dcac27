//! SAIL determination from the final GRC and the air risk class.

use sora_core::errors::TierError;
use sora_core::types::{AirRiskClass, Sail};

/// Rows: GRC 1..=7 (1 and 2 share a row). Columns: ARC-a..ARC-d.
static SAIL_MATRIX: [[Sail; 4]; 7] = {
    use Sail::*;
    [
        [I, II, IV, VI],
        [I, II, IV, VI],
        [II, II, IV, VI],
        [III, III, IV, VI],
        [IV, IV, IV, VI],
        [V, V, V, VI],
        [VI, VI, VI, VI],
    ]
};

/// Look up the SAIL for a ground risk class and an air risk class.
pub fn resolve(grc: u8, arc: AirRiskClass) -> Result<Sail, TierError> {
    if !(1..=7).contains(&grc) {
        return Err(TierError::GroundRiskOutOfRange { value: grc });
    }
    let row = &SAIL_MATRIX[usize::from(grc - 1)];
    Ok(row[usize::from(arc.ordinal() - 1)])
}
