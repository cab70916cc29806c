//! # Slot Generation
//!
//! Turns a doctor's daily working window into the ordered list of bookable
//! slots for one date. Generation is pure: the same doctor and date always
//! produce the same slots, with the same keys and the same premium tags.
//!
//! ## Tiling
//!
//! Starting at the window start, a slot of exactly one consultation interval
//! is emitted and the cursor advances by that interval, for as long as a whole
//! slot still fits before the window end. A trailing remainder shorter than an
//! interval is dropped rather than emitted as a short slot.
//!
//! Malformed input (window end at or before start, a non-positive interval,
//! or a non-working weekday) yields an empty day instead of an error.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    doctor::Doctor,
    time_slot::{SlotKey, SlotTier, TimeSlot},
};

/// Rule deciding which slots of a day are sold as premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PremiumPolicy {
    /// Every slot is standard.
    Disabled,
    /// `percent` of the day's slots, spread evenly by index.
    Ratio { percent: u8 },
    /// Slots starting at or after `time` are premium.
    From { time: NaiveTime },
}

impl Default for PremiumPolicy {
    fn default() -> Self {
        PremiumPolicy::Ratio { percent: 25 }
    }
}

impl PremiumPolicy {
    /// Whether the slot at `index`, starting at `start`, is premium.
    ///
    /// For `Ratio`, slot `i` is premium when `floor((i + 1) * p / 100)` steps
    /// past `floor(i * p / 100)`, which yields `floor(n * p / 100)` premium
    /// slots for a day of `n` slots without knowing `n`.
    pub fn is_premium(&self, index: usize, start: NaiveTime) -> bool {
        match *self {
            PremiumPolicy::Disabled => false,
            PremiumPolicy::Ratio { percent } => {
                let percent = usize::from(percent.min(100));
                (index + 1) * percent / 100 > index * percent / 100
            }
            PremiumPolicy::From { time } => start >= time,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlotGenerator {
    policy: PremiumPolicy,
}

impl SlotGenerator {
    pub fn new(policy: PremiumPolicy) -> Self {
        Self { policy }
    }

    /// Generates the slots of `doctor` on `day`, ascending by start.
    ///
    /// Every returned slot is marked available; overlay the store's booked
    /// set with [`overlay`] before showing them.
    pub fn generate(&self, doctor: &Doctor, day: NaiveDate) -> Vec<TimeSlot> {
        let hours = &doctor.working_hours;
        if doctor.consultation_minutes <= 0 || !hours.works_on(day) {
            return Vec::new();
        }

        let window_start = day.and_time(hours.start).and_utc();
        let window_end = day.and_time(hours.end).and_utc();
        if window_end <= window_start {
            return Vec::new();
        }

        let Some(interval) = Duration::try_minutes(doctor.consultation_minutes) else {
            return Vec::new();
        };
        if interval > window_end - window_start {
            return Vec::new();
        }

        let mut slots = Vec::new();
        let mut cursor = window_start;

        while let Some(end) = cursor.checked_add_signed(interval).filter(|end| *end <= window_end) {
            let index = slots.len();
            slots.push(TimeSlot {
                id: SlotKey::new(doctor.id, cursor),
                start: cursor,
                end,
                is_premium: self.policy.is_premium(index, cursor.time()),
                is_available: true,
            });
            cursor = end;
        }

        slots
    }

    /// Looks up the generated slot of `doctor` on `day` starting at `start`.
    pub fn slot_at(
        &self,
        doctor: &Doctor,
        day: NaiveDate,
        start: DateTime<Utc>,
    ) -> Option<TimeSlot> {
        self.generate(doctor, day)
            .into_iter()
            .find(|slot| slot.start == start)
    }
}

/// Marks every slot whose key is in `booked` as unavailable.
///
/// Count and order of `slots` are preserved.
pub fn overlay(slots: Vec<TimeSlot>, booked: &HashSet<SlotKey>) -> Vec<TimeSlot> {
    slots
        .into_iter()
        .map(|mut slot| {
            slot.is_available = !booked.contains(&slot.id);
            slot
        })
        .collect()
}

/// Keeps only the slots of one tier, preserving order.
pub fn in_tier(slots: Vec<TimeSlot>, tier: SlotTier) -> Vec<TimeSlot> {
    slots.into_iter().filter(|slot| slot.tier() == tier).collect()
}
