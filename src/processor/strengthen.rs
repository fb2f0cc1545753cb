/// Self-subsuming resolution and the randomized driver loops.
use {
    super::{Sub1Result, SubsumeIF, Subsumer},
    crate::{
        assign::AssignIF,
        cdb::{ClauseDBIF, ClauseIF},
        types::*,
    },
    rand::Rng,
    std::time::Instant,
};

impl Subsumer {
    /// remove one literal from a clause. Emits the certificate pair,
    /// detaches the dropped occurrence, adjusts the literal counters and
    /// asks the clause database to re-normalize the shortened clause.
    ///
    /// # Errors
    ///
    /// if re-normalization derives a root level conflict.
    pub(super) fn strengthen(
        &mut self,
        asg: &mut impl AssignIF,
        cdb: &mut impl ClauseDBIF,
        credit: &mut i64,
        ci: ClauseIndex,
        l: Lit,
    ) -> MaybeInconsistent {
        debug_assert!(!cdb[ci].is_dead());
        debug_assert!(1 < cdb[ci].len());
        *credit -= 5;
        let orig = if cdb.certificate_is_active() {
            cdb[ci].iter().copied().collect::<Vec<_>>()
        } else {
            Vec::new()
        };
        cdb[ci].delete_literal(l);
        if cdb.certificate_is_active() {
            let shortened = cdb[ci].iter().copied().collect::<Vec<_>>();
            cdb.certificate_add(&shortened);
            cdb.certificate_delete(&orig);
        }
        self.run_stats.lits_rem_strengthen += 1;
        cdb.remove_watch_clause(l, ci);
        if cdb[ci].is(FlagClause::LEARNT) {
            cdb.bin_tri_mut().red_lits -= 1;
        } else {
            cdb.bin_tri_mut().irred_lits -= 1;
        }
        cdb.clean_clause(asg, ci)
    }
}

impl SubsumeIF for Subsumer {
    fn add_clause(
        &mut self,
        cdb: &mut impl ClauseDBIF,
        vec: &mut Vec<Lit>,
        learnt: bool,
    ) -> ClauseIndex {
        let ci = cdb.register_clause(vec, learnt);
        cdb.link_in_clause(ci);
        self.clauses.push(ci);
        ci
    }
    fn perform_subsumption(&mut self, cdb: &mut impl ClauseDBIF) {
        if self.clauses.is_empty() {
            return;
        }
        let start = Instant::now();
        let mut went_through: usize = 0;
        let mut subsumed: usize = 0;
        let mut credit = self.num_max_subsume0;
        while 0 < credit && (went_through as f64) < 1.5 * self.clauses.len() as f64 {
            credit -= 2;
            if 5 <= self.verbosity && went_through % 10_000 == 0 {
                println!("c [sub] credit: {credit}");
            }
            let num = self.rng.gen_range(0..self.clauses.len());
            let ci = self.clauses[num];
            if cdb[ci].is_dead() {
                continue;
            }
            went_through += 1;
            credit -= 20;
            subsumed += self.subsume0_impl(cdb, &mut credit, ci);
        }
        self.num_max_subsume0 = credit;
        let elapsed = start.elapsed().as_secs_f64();
        if 3 <= self.verbosity {
            println!("c [sub] subs: {subsumed} tried: {went_through} T: {elapsed:.3}");
        }
        self.run_stats.subsumed_by_sub += subsumed;
        self.run_stats.tried_subsume += went_through;
        self.run_stats.subsume_time += elapsed;
    }
    fn perform_strengthening(
        &mut self,
        asg: &mut impl AssignIF,
        cdb: &mut impl ClauseDBIF,
    ) -> bool {
        debug_assert!(asg.okay());
        if self.clauses.is_empty() {
            return asg.okay();
        }
        let start = Instant::now();
        let mut went_through: usize = 0;
        let mut ret = Sub1Result::default();
        let mut credit = self.num_max_subsume1;
        // strengthening works literal by literal, hence the doubled
        // step allowance compared with the subsumption pass
        while 0 < credit
            && (went_through as f64) < 1.5 * 2.0 * self.clauses.len() as f64
            && asg.okay()
        {
            credit -= 20;
            went_through += 1;
            if 5 <= self.verbosity && went_through % 10_000 == 0 {
                println!("c [str] credit: {credit}");
            }
            let num = self.rng.gen_range(0..self.clauses.len());
            let ci = self.clauses[num];
            if cdb[ci].is_dead() {
                continue;
            }
            ret += self.subsume1_impl(asg, cdb, &mut credit, ci);
        }
        self.num_max_subsume1 = credit;
        let elapsed = start.elapsed().as_secs_f64();
        if 3 <= self.verbosity {
            println!(
                "c [str] subs: {} str: {} tried: {went_through} T: {elapsed:.3}",
                ret.subsumed, ret.strengthened,
            );
        }
        self.run_stats.subsumed_by_str += ret.subsumed;
        self.run_stats.tried_strengthen += went_through;
        self.run_stats.strengthen_time += elapsed;
        asg.okay()
    }
    fn subsume0(&mut self, cdb: &mut impl ClauseDBIF, ci: ClauseIndex) -> usize {
        let mut credit = self.num_max_subsume0;
        let n = self.subsume0_impl(cdb, &mut credit, ci);
        self.num_max_subsume0 = credit;
        self.run_stats.subsumed_by_sub += n;
        n
    }
    fn subsume0_implicit(&mut self, cdb: &mut impl ClauseDBIF, pair: [Lit; 2]) -> usize {
        debug_assert!(pair[0] < pair[1]);
        let abst = crate::cdb::calc_abstraction(&pair);
        let mut credit = self.num_max_subsume0;
        // no arena clause backs the pair; an out-of-range offset keeps
        // the self-check from ever matching
        let ret = self.subsume0_and_unlink(cdb, &mut credit, ClauseIndex::MAX, &pair, abst, true);
        self.num_max_subsume0 = credit;
        self.run_stats.subsumed_by_sub += ret.num_subsumed;
        ret.num_subsumed
    }
    fn subsume1(
        &mut self,
        asg: &mut impl AssignIF,
        cdb: &mut impl ClauseDBIF,
        ci: ClauseIndex,
    ) -> Sub1Result {
        let mut credit = self.num_max_subsume1;
        let ret = self.subsume1_impl(asg, cdb, &mut credit, ci);
        self.num_max_subsume1 = credit;
        self.run_stats.subsumed_by_str += ret.subsumed;
        ret
    }
    fn mem_used(&self) -> usize {
        self.subs.capacity() * std::mem::size_of::<ClauseIndex>()
            + self.subs_lits.capacity() * std::mem::size_of::<Option<Lit>>()
            + self.clauses.capacity() * std::mem::size_of::<ClauseIndex>()
    }
    fn finished_run(&mut self) {
        let run = std::mem::take(&mut self.run_stats);
        if 3 <= self.verbosity {
            println!("c [processor] {run}");
        }
        self.global_stats += &run;
    }
    fn run_stats(&self) -> &super::RunStats {
        &self.run_stats
    }
    fn global_stats(&self) -> &super::RunStats {
        &self.global_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign::AssignStack, cdb::ClauseDB};

    fn lits(v: &[i32]) -> Vec<Lit> {
        v.iter().map(|i| Lit::from(*i)).collect::<Vec<_>>()
    }

    fn setup() -> (AssignStack, ClauseDB, Subsumer) {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 8,
            ..CNFDescription::default()
        };
        (
            AssignStack::instantiate(&config, &cnf),
            ClauseDB::instantiate(&config, &cnf),
            Subsumer::instantiate(&config, &cnf),
        )
    }

    #[test]
    fn test_strengthen_updates_occurrences_and_counters() {
        let (mut asg, mut cdb, mut sub) = setup();
        let ci = sub.add_clause(&mut cdb, &mut lits(&[1, -2, 3]), false);
        let mut credit = 1000;
        assert_eq!(
            sub.strengthen(&mut asg, &mut cdb, &mut credit, ci, Lit::from(-2i32)),
            Ok(())
        );
        assert_eq!(Vec::<i32>::from(&cdb[ci]), vec![1, 3]);
        assert_eq!(cdb.bin_tri().irred_lits, 2);
        assert!(cdb.watches(Lit::from(-2i32)).is_empty());
        assert!(credit < 1000);
        assert_eq!(sub.run_stats().lits_rem_strengthen, 1);
    }
    #[test]
    fn test_strengthen_to_unit_assigns() {
        let (mut asg, mut cdb, mut sub) = setup();
        let ci = sub.add_clause(&mut cdb, &mut lits(&[1, 2]), false);
        let mut credit = 1000;
        assert_eq!(
            sub.strengthen(&mut asg, &mut cdb, &mut credit, ci, Lit::from(2i32)),
            Ok(())
        );
        assert!(cdb[ci].is_dead());
        assert_eq!(asg.assigned(Lit::from(1i32)), Some(true));
        assert!(asg.okay());
    }
    #[test]
    fn test_finished_run_accumulates() {
        let (mut asg, mut cdb, mut sub) = setup();
        let ci = sub.add_clause(&mut cdb, &mut lits(&[1, -2, 3]), false);
        let mut credit = 1000;
        sub.strengthen(&mut asg, &mut cdb, &mut credit, ci, Lit::from(-2i32))
            .expect("consistent");
        sub.finished_run();
        assert_eq!(sub.run_stats().lits_rem_strengthen, 0);
        assert_eq!(sub.global_stats().lits_rem_strengthen, 1);
    }
}
