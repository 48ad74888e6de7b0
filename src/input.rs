//! Validation of user-supplied simulation input.
//!
//! The simulators trust their input; these helpers turn free-form text into
//! the validated request sequence and frame count they expect.

use crate::error::{SimulationError, SimulationResult};
use crate::paging::PageId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Longest reference string accepted from a user.
pub const DEFAULT_MAX_REFERENCE_LENGTH: usize = 2000;
pub const MIN_FRAMES: usize = 1;
pub const MAX_FRAMES: usize = 100;

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Check that a reference string of `length` entries is non-empty and at
/// most `max_length` long.
pub fn validate_reference_length(length: usize, max_length: usize) -> SimulationResult<usize> {
    if length == 0 {
        return Err(SimulationError::InvalidInput(
            "Reference string is empty. Enter page numbers separated by spaces or commas."
                .to_string(),
        ));
    }

    if length > max_length {
        return Err(SimulationError::InvalidInput(format!(
            "Reference string too long ({} entries). Maximum allowed is {}.",
            length, max_length
        )));
    }

    Ok(length)
}

/// Parse page numbers separated by spaces and/or commas.
///
/// Rejects empty input, anything that is not a non-negative integer, and
/// strings with more than `max_length` entries.
pub fn parse_reference_string(text: &str, max_length: usize) -> SimulationResult<Vec<PageId>> {
    let tokens: Vec<&str> = tokenize(text).collect();
    validate_reference_length(tokens.len(), max_length)?;

    tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            if !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SimulationError::InvalidInput(format!(
                    "Invalid token '{}' at position {}. Use only non-negative integers separated by spaces or commas.",
                    token,
                    idx + 1
                )));
            }
            token.parse::<u64>().map(PageId).map_err(|_| {
                SimulationError::InvalidInput(format!(
                    "Page number '{}' at position {} is out of range.",
                    token,
                    idx + 1
                ))
            })
        })
        .collect()
}

/// Check that a frame count lies in `[min, max]`.
pub fn validate_frames(frames: i64, min: usize, max: usize) -> SimulationResult<usize> {
    match usize::try_from(frames) {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(SimulationError::InvalidInput(format!(
            "Frames must be between {} and {}.",
            min, max
        ))),
    }
}

/// Reproducible random reference string with pages drawn from `0..=max_page`.
pub fn random_reference_string(length: usize, max_page: u64, seed: u64) -> Vec<PageId> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length)
        .map(|_| PageId(rng.gen_range(0..=max_page)))
        .collect()
}
