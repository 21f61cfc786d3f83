//! Record identifiers
//!
//! Every stored document is keyed by a 12-byte `ObjectId`:
//!
//! ```text
//! +-----------------+------------------+-----------------+
//! | seconds (u32 BE)| process (5 bytes)| counter (u24 BE)|
//! +-----------------+------------------+-----------------+
//! ```
//!
//! At the HTTP boundary an id is always its 24-character hex form.
//! `ObjectId::parse` is the only place that form is validated.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length of an id in bytes.
pub const OBJECT_ID_LEN: usize = 12;

/// Length of the external hex representation.
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_LEN * 2;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// The counter is seeded below this bound, leaving at least 15M ids before
/// it wraps.
const COUNTER_SEED_BOUND: u32 = 1 << 20;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// The string form of an identifier did not match the id grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid identifier '{input}': expected {OBJECT_ID_HEX_LEN} hexadecimal characters")]
pub struct InvalidIdentifier {
    input: String,
}

impl InvalidIdentifier {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Store-assigned document identifier.
///
/// Ordering follows the byte layout, so ids sort by creation second first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generates a fresh id for the current second.
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, i64::from(u32::MAX)) as u32;
        Self::from_parts(seconds, *process_unique(), next_count())
    }

    /// Assembles an id from its three components. Only the low 24 bits of
    /// `counter` are kept.
    pub fn from_parts(seconds: u32, process: [u8; 5], counter: u32) -> Self {
        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&process);
        bytes[9..12].copy_from_slice(&(counter & COUNTER_MASK).to_be_bytes()[1..]);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; OBJECT_ID_LEN] {
        self.0
    }

    /// Decodes the external representation.
    ///
    /// Accepts exactly 24 hex digits in either case.
    pub fn parse(input: &str) -> Result<Self, InvalidIdentifier> {
        let invalid = || InvalidIdentifier {
            input: input.to_string(),
        };

        if input.len() != OBJECT_ID_HEX_LEN {
            return Err(invalid());
        }

        let mut bytes = [0u8; OBJECT_ID_LEN];
        hex::decode_to_slice(input, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }

    /// Encodes the external representation (lowercase hex).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Second at which the id was generated.
    pub fn timestamp(&self) -> DateTime<Utc> {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Utc.timestamp_opt(i64::from(seconds), 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

fn process_unique() -> &'static [u8; 5] {
    PROCESS_UNIQUE.get_or_init(rand::random)
}

fn next_count() -> u32 {
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..COUNTER_SEED_BOUND)))
        .fetch_add(1, Ordering::Relaxed)
        & COUNTER_MASK
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
