use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::slots::PremiumPolicy;

/// Tunables of the scheduling engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub premium_policy: PremiumPolicy,
    /// Extra charge on premium slots, in percent of the doctor's fee.
    pub premium_surcharge_percent: u32,
    pub week_start: Weekday,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            premium_policy: PremiumPolicy::default(),
            premium_surcharge_percent: 50,
            week_start: Weekday::Mon,
        }
    }
}
