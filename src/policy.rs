use crate::pool::{Outcome, Probe};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    /// Stop issuing identifiers and drain what is in flight.
    Drain,
}

/// Decides when the dispatcher has probed enough. Consulted once per completed
/// probe, in arrival order.
pub trait TerminationPolicy: Send {
    fn observe(&mut self, probe: &Probe) -> Verdict;
}

/// Drain once `expected` target teams have been accepted. Only terminates if
/// every target team exists at some identifier.
#[derive(Debug)]
pub struct CountPolicy {
    expected: usize,
    accepted: usize,
}

impl CountPolicy {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            accepted: 0,
        }
    }
}

impl TerminationPolicy for CountPolicy {
    fn observe(&mut self, probe: &Probe) -> Verdict {
        if let Outcome::Accepted { .. } = probe.outcome {
            self.accepted += 1;
        }
        if self.accepted >= self.expected {
            Verdict::Drain
        } else {
            Verdict::Continue
        }
    }
}

/// Drain once `capacity` results have come back, counting both accepted
/// teams and not-found probes. A proxy for "enough work submitted": it can
/// stop before every target is found, or keep probing past the last one.
#[derive(Debug)]
pub struct CapacityPolicy {
    capacity: usize,
    received: usize,
}

impl CapacityPolicy {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            received: 0,
        }
    }
}

impl TerminationPolicy for CapacityPolicy {
    fn observe(&mut self, probe: &Probe) -> Verdict {
        match probe.outcome {
            Outcome::Accepted { .. } | Outcome::NotFound => self.received += 1,
            Outcome::Rejected { .. } => {}
        }
        if self.received >= self.capacity {
            Verdict::Drain
        } else {
            Verdict::Continue
        }
    }
}

/// Drain after `limit` not-found probes in a row, by arrival order.
#[derive(Debug)]
pub struct MissStreakPolicy {
    limit: usize,
    streak: usize,
}

impl MissStreakPolicy {
    pub fn new(limit: usize) -> Self {
        Self { limit, streak: 0 }
    }
}

impl TerminationPolicy for MissStreakPolicy {
    fn observe(&mut self, probe: &Probe) -> Verdict {
        match probe.outcome {
            Outcome::NotFound => self.streak += 1,
            _ => self.streak = 0,
        }
        if self.streak >= self.limit {
            Verdict::Drain
        } else {
            Verdict::Continue
        }
    }
}

/// Drains as soon as any inner policy does. Every inner policy sees every
/// probe.
pub struct AnyOf(Vec<Box<dyn TerminationPolicy>>);

impl AnyOf {
    pub fn new(policies: Vec<Box<dyn TerminationPolicy>>) -> Self {
        Self(policies)
    }
}

impl TerminationPolicy for AnyOf {
    fn observe(&mut self, probe: &Probe) -> Verdict {
        self.0.iter_mut().fold(Verdict::Continue, |verdict, policy| {
            match policy.observe(probe) {
                Verdict::Drain => Verdict::Drain,
                Verdict::Continue => verdict,
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn accepted(id: u32) -> Probe {
        Probe {
            id,
            outcome: Outcome::Accepted {
                team: "Arsenal".into(),
                players: vec![],
            },
        }
    }

    fn rejected(id: u32) -> Probe {
        Probe {
            id,
            outcome: Outcome::Rejected {
                team: "Fulham".into(),
            },
        }
    }

    fn not_found(id: u32) -> Probe {
        Probe {
            id,
            outcome: Outcome::NotFound,
        }
    }

    #[test]
    fn test_count_policy_ignores_non_target_results() {
        let mut policy = CountPolicy::new(2);

        assert_eq!(policy.observe(&not_found(1)), Verdict::Continue);
        assert_eq!(policy.observe(&accepted(4)), Verdict::Continue);
        assert_eq!(policy.observe(&rejected(2)), Verdict::Continue);
        assert_eq!(policy.observe(&not_found(3)), Verdict::Continue);
        assert_eq!(policy.observe(&accepted(7)), Verdict::Drain);
    }

    #[test]
    fn test_capacity_policy_counts_not_found() {
        let mut policy = CapacityPolicy::new(3);

        assert_eq!(policy.observe(&not_found(1)), Verdict::Continue);
        assert_eq!(policy.observe(&rejected(2)), Verdict::Continue);
        assert_eq!(policy.observe(&accepted(3)), Verdict::Continue);
        assert_eq!(policy.observe(&not_found(4)), Verdict::Drain);
    }

    #[test]
    fn test_miss_streak_resets_on_a_team() {
        let mut policy = MissStreakPolicy::new(2);

        assert_eq!(policy.observe(&not_found(1)), Verdict::Continue);
        assert_eq!(policy.observe(&rejected(2)), Verdict::Continue);
        assert_eq!(policy.observe(&not_found(3)), Verdict::Continue);
        assert_eq!(policy.observe(&not_found(4)), Verdict::Drain);
    }

    #[test]
    fn test_any_of_feeds_every_policy() {
        let mut policy = AnyOf::new(vec![
            Box::new(MissStreakPolicy::new(2)),
            Box::new(CountPolicy::new(2)),
        ]);

        // the miss streak fires first, but the count policy must still see it
        assert_eq!(policy.observe(&accepted(1)), Verdict::Continue);
        assert_eq!(policy.observe(&not_found(2)), Verdict::Continue);
        assert_eq!(policy.observe(&not_found(3)), Verdict::Drain);
        assert_eq!(policy.observe(&accepted(4)), Verdict::Drain);
    }
}
