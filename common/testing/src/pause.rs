// Licensed under the Apache-2.0 license

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// When the master stalls its own side of the bus.
///
/// A paused master raises no new `valid` and holds `bready`/`rready` low.
/// A `valid` that is already high stays high until its handshake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PausePolicy {
    #[default]
    Never,
    /// Paused for three cycles, then free for one, repeating.
    Pattern,
    /// Paused on roughly `percent` of cycles, reproducible from `seed`.
    Random { percent: u8, seed: u64 },
}

pub(crate) struct Pauser {
    policy: PausePolicy,
    cycle: u64,
    rng: Option<StdRng>,
}

impl Pauser {
    pub(crate) fn new(policy: PausePolicy) -> Self {
        let rng = match policy {
            PausePolicy::Random { seed, .. } => Some(StdRng::seed_from_u64(seed)),
            _ => None,
        };
        Self {
            policy,
            cycle: 0,
            rng,
        }
    }

    /// Whether the master is paused for the coming cycle.
    pub(crate) fn next(&mut self) -> bool {
        let cycle = self.cycle;
        self.cycle += 1;
        match (self.policy, self.rng.as_mut()) {
            (PausePolicy::Never, _) => false,
            (PausePolicy::Pattern, _) => cycle % 4 != 3,
            (PausePolicy::Random { percent, .. }, Some(rng)) => rng.gen_range(0..100u8) < percent,
            (PausePolicy::Random { .. }, None) => false,
        }
    }
}
