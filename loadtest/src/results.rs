use crate::outcome::AttemptOutcome;

/// Aggregate of every completed attempt. All mutation happens on the single
/// drain loop in `dispatch`, so plain owned fields are enough.
#[derive(Debug, Default)]
pub struct RunResults {
    success: usize,
    failed: usize,
    replica_hits: Vec<(String, usize)>,
}

impl RunResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: AttemptOutcome) {
        match outcome {
            AttemptOutcome::Success { replica } => {
                self.success += 1;
                if let Some(id) = replica {
                    match self.replica_hits.iter_mut().find(|(seen, _)| *seen == id) {
                        Some((_, count)) => *count += 1,
                        None => self.replica_hits.push((id, 1)),
                    }
                }
            }
            AttemptOutcome::Failure => self.failed += 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn completed(&self) -> usize {
        self.success + self.failed
    }

    #[must_use]
    pub fn success(&self) -> usize {
        self.success
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Hit counts per replica, in order of first observation.
    #[must_use]
    pub fn replica_hits(&self) -> &[(String, usize)] {
        &self.replica_hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(replica: &str) -> AttemptOutcome {
        AttemptOutcome::Success {
            replica: Some(replica.to_string()),
        }
    }

    #[test]
    fn completed_is_success_plus_failed() {
        let mut results = RunResults::new();
        results.record(success("r1"));
        results.record(AttemptOutcome::Failure);
        results.record(AttemptOutcome::Success { replica: None });
        assert_eq!(results.success(), 2);
        assert_eq!(results.failed(), 1);
        assert_eq!(results.completed(), 3);
    }

    #[test]
    fn unattributed_success_counts_but_leaves_no_hit() {
        let mut results = RunResults::new();
        results.record(AttemptOutcome::Success { replica: None });
        results.record(success("r1"));
        let hits: usize = results.replica_hits().iter().map(|(_, n)| n).sum();
        assert_eq!(results.success(), 2);
        assert_eq!(hits, 1);
    }

    #[test]
    fn hits_keep_first_observation_order() {
        let mut results = RunResults::new();
        results.record(success("r2"));
        results.record(success("r1"));
        results.record(success("r2"));
        results.record(success("r3"));
        let order: Vec<&str> = results
            .replica_hits()
            .iter()
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(order, ["r2", "r1", "r3"]);
        assert_eq!(results.replica_hits()[0].1, 2);
    }
}
