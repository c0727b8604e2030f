//! Fallback backup schedules
//!
//! Instances without a configured schedule get a daily backup at a random
//! time of day, so that many instances do not all start at once.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces random once-a-day cron expressions.
///
/// Each derivation pass owns its generator; nothing is shared between passes.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    rng: StdRng,
}

impl ScheduleGenerator {
    /// Seed from the current time.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(seed)
    }

    /// Seed explicitly, for reproducible schedules.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A six-field cron expression firing once a day:
    /// `<second> <minute> <hour> * * *`.
    pub fn daily(&mut self) -> String {
        let second = self.rng.gen_range(0..=59);
        let minute = self.rng.gen_range(0..=59);
        let hour = self.rng.gen_range(0..=23);
        format!("{second} {minute} {hour} * * *")
    }
}
