use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The share percentage picked in the dashboard, which sets how many
/// segments the selected stops are split into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SharePercentage(u8);

impl SharePercentage {
    /// Values offered by the percentage dropdown.
    pub const OPTIONS: [SharePercentage; 4] = [Self(25), Self(50), Self(75), Self(100)];

    pub const DEFAULT: SharePercentage = Self(100);

    pub fn new(value: u32) -> Result<Self, Error> {
        if (1..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::InvalidPercentage(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `round(100 / P)`, never less than one.
    pub fn bucket_count(self) -> usize {
        ((100.0 / self.0 as f64).round() as usize).max(1)
    }

    /// Whether `P` splits the 0-100% range into whole buckets.
    pub fn partitions_evenly(self) -> bool {
        100 % self.0 == 0
    }

    /// Explains the rounding applied when `P` does not divide 100.
    pub fn notice(self) -> Option<String> {
        if self.partitions_evenly() {
            return None;
        }
        let buckets = self.bucket_count();
        Some(format!(
            "{self} does not divide 100% evenly; stops are split into {buckets} segment{} (100/{} = {:.2}, rounded)",
            if buckets == 1 { "" } else { "s" },
            self.0,
            100.0 / self.0 as f64,
        ))
    }
}

impl Default for SharePercentage {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SharePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u32> for SharePercentage {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SharePercentage> for u32 {
    fn from(value: SharePercentage) -> Self {
        value.0 as u32
    }
}
