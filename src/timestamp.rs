use core::fmt::{self, Debug};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Block time in nanoseconds since the unix epoch.
///
/// Encodes to fixed-width big-endian bytes so that byte order matches chronological order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(u64);

pub const TIMESTAMP_LEN: usize = 8;

impl Timestamp {
    pub const MAX: Timestamp = Timestamp(u64::MAX);

    pub fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    pub fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000_000_000))
    }

    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Saturates at `Timestamp::MAX` rather than wrapping.
    pub fn saturating_add(self, period: Duration) -> Self {
        let nanos = u64::try_from(period.as_nanos()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(nanos))
    }

    pub fn to_be_bytes(self) -> [u8; TIMESTAMP_LEN] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; TIMESTAMP_LEN]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// The deterministic per-batch context handed to every state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub height: u64,
    pub time: Timestamp,
}

impl BlockHeader {
    pub fn new(height: u64, time: Timestamp) -> Self {
        Self { height, time }
    }
}
