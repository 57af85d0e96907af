//! Scheduler alternating between idle cooldowns and timed world events.

use std::time::Duration;

use monkey_tribe_core::{config::WorldEventTuning, WorldEventKind};
use rand::{seq::SliceRandom, Rng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SchedulerState {
    Idle {
        since_last: Duration,
    },
    Active {
        kind: WorldEventKind,
        elapsed: Duration,
    },
}

/// What the scheduler asks the world to do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SchedulerStep {
    /// Nothing is active.
    Idle,
    /// The cooldown elapsed and a new event began.
    Started(WorldEventKind),
    /// The event is still running and its per-tick effect applies.
    Active(WorldEventKind),
    /// The event ran its full duration and must be reverted.
    Ended(WorldEventKind),
}

/// Keeps at most one world event active at a time.
#[derive(Debug)]
pub(crate) struct WorldEventScheduler {
    state: SchedulerState,
}

impl WorldEventScheduler {
    pub(crate) fn new() -> Self {
        Self {
            state: SchedulerState::Idle {
                since_last: Duration::ZERO,
            },
        }
    }

    pub(crate) fn active(&self) -> Option<WorldEventKind> {
        match self.state {
            SchedulerState::Idle { .. } => None,
            SchedulerState::Active { kind, .. } => Some(kind),
        }
    }

    /// Advances the scheduler clock by `dt`.
    pub(crate) fn tick<R: Rng>(
        &mut self,
        dt: Duration,
        tuning: &WorldEventTuning,
        rng: &mut R,
    ) -> SchedulerStep {
        match self.state {
            SchedulerState::Idle { since_last } => {
                let since_last = since_last.saturating_add(dt);
                if since_last < tuning.cooldown() {
                    self.state = SchedulerState::Idle { since_last };
                    return SchedulerStep::Idle;
                }

                let kind = WorldEventKind::ALL
                    .choose(rng)
                    .copied()
                    .unwrap_or(WorldEventKind::MonkeyRaid);
                self.state = SchedulerState::Active {
                    kind,
                    elapsed: Duration::ZERO,
                };
                SchedulerStep::Started(kind)
            }
            SchedulerState::Active { kind, elapsed } => {
                let elapsed = elapsed.saturating_add(dt);
                if elapsed < tuning.duration(kind) {
                    self.state = SchedulerState::Active { kind, elapsed };
                    SchedulerStep::Active(kind)
                } else {
                    self.state = SchedulerState::Idle {
                        since_last: Duration::ZERO,
                    };
                    SchedulerStep::Ended(kind)
                }
            }
        }
    }
}
