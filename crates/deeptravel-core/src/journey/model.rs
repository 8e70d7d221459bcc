//! Journey domain model.

use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A user-defined trip. Chat histories are partitioned per journey.
///
/// Journeys are immutable once created and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    /// Opaque unique identifier (`{millis}-{6 base36 chars}`)
    pub id: String,
    /// Display name, trimmed and never empty
    pub name: String,
    /// Country label, trimmed; may be empty
    #[serde(default)]
    pub country: String,
    /// Creation timestamp in epoch milliseconds
    pub created_at: i64,
}

impl Journey {
    /// Builds a journey from raw user input.
    ///
    /// Returns `None` when the trimmed name is empty.
    pub fn create(name: &str, country: &str, now_millis: i64) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            id: generate_journey_id(now_millis),
            name: name.to_string(),
            country: country.trim().to_string(),
            created_at: now_millis,
        })
    }

    /// Returns the country label if one was given.
    pub fn country(&self) -> Option<&str> {
        if self.country.is_empty() {
            None
        } else {
            Some(&self.country)
        }
    }
}

/// Generates a journey id from a millisecond timestamp and random bits.
///
/// Collisions need two ids in the same millisecond with the same 6-char
/// suffix (36^6 combinations).
pub fn generate_journey_id(now_millis: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", now_millis, suffix)
}
