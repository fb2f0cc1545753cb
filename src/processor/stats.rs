use std::{fmt, ops::AddAssign};

/// Counters of one engine run. `finished_run` folds them into the
/// engine's global counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    /// clauses removed by the subsumption driver
    pub subsumed_by_sub: usize,
    /// clauses removed inside the strengthening driver
    pub subsumed_by_str: usize,
    /// literals removed by self-subsuming resolution
    pub lits_rem_strengthen: usize,
    /// clauses tried by the subsumption driver
    pub tried_subsume: usize,
    /// clauses tried by the strengthening driver
    pub tried_strengthen: usize,
    /// seconds spent in subsumption passes
    pub subsume_time: f64,
    /// seconds spent in strengthening passes
    pub strengthen_time: f64,
}

impl AddAssign<&RunStats> for RunStats {
    fn add_assign(&mut self, other: &RunStats) {
        self.subsumed_by_sub += other.subsumed_by_sub;
        self.subsumed_by_str += other.subsumed_by_str;
        self.lits_rem_strengthen += other.lits_rem_strengthen;
        self.tried_subsume += other.tried_subsume;
        self.tried_strengthen += other.tried_strengthen;
        self.subsume_time += other.subsume_time;
        self.strengthen_time += other.strengthen_time;
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "subsumed: {} + {}, strengthened lits: {}, tried: {} + {}, time: {:.3}s",
            self.subsumed_by_sub,
            self.subsumed_by_str,
            self.lits_rem_strengthen,
            self.tried_subsume,
            self.tried_strengthen,
            self.subsume_time + self.strengthen_time,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign() {
        let mut a = RunStats {
            subsumed_by_sub: 1,
            lits_rem_strengthen: 2,
            ..RunStats::default()
        };
        let b = RunStats {
            subsumed_by_sub: 3,
            tried_subsume: 4,
            ..RunStats::default()
        };
        a += &b;
        assert_eq!(a.subsumed_by_sub, 4);
        assert_eq!(a.lits_rem_strengthen, 2);
        assert_eq!(a.tried_subsume, 4);
    }
}
