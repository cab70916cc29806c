use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted identity of a slot: one doctor, one start instant.
///
/// Regenerating a day always produces the same keys, so a key maps to a
/// single reservation record regardless of the availability shown to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub doctor_id: Uuid,
    pub start: DateTime<Utc>,
}

impl SlotKey {
    pub fn new(doctor_id: Uuid, start: DateTime<Utc>) -> Self {
        Self { doctor_id, start }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.doctor_id, self.start.to_rfc3339())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTier {
    Standard,
    Premium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotKey,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_premium: bool,
    /// Advisory only; the reservation in the store is authoritative.
    pub is_available: bool,
}

impl TimeSlot {
    pub fn tier(&self) -> SlotTier {
        if self.is_premium {
            SlotTier::Premium
        } else {
            SlotTier::Standard
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

// Premium tagging is derived from identity, so it is left out of equality.
impl PartialEq for TimeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.start == other.start && self.is_available == other.is_available
    }
}

impl Eq for TimeSlot {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotResponse {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub tier: SlotTier,
    pub is_available: bool,
    pub fee: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlotsResponse {
    pub doctor_id: Uuid,
    pub date: chrono::NaiveDate,
    pub slots: Vec<TimeSlotResponse>,
}
