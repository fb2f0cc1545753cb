//!
//! * private module `subsume` provides backward subsumption
//! * private module `strengthen` provides self-subsuming resolution and the drivers
//!
//!# Example
//!
//!```
//! use subsat::{cdb::{ClauseDB, ClauseDBIF}, config::Config,
//!              processor::{Subsumer, SubsumeIF}, types::*};
//!
//! let config = Config::default();
//! let cnf = CNFDescription { num_of_variables: 3, ..CNFDescription::default() };
//! let mut cdb = ClauseDB::instantiate(&config, &cnf);
//! let mut sub = Subsumer::instantiate(&config, &cnf);
//! let c = sub.add_clause(&mut cdb, &mut vec![Lit::from(1i32), Lit::from(2i32)], false);
//! sub.add_clause(&mut cdb, &mut vec![Lit::from(1i32), Lit::from(2i32), Lit::from(3i32)], false);
//! assert_eq!(sub.subsume0(&mut cdb, c), 1);
//! assert_eq!(cdb.num_clause(), 1);
//!```

mod stats;
mod strengthen;
mod subsume;

pub use self::stats::RunStats;

use {
    crate::{assign::AssignIF, cdb::ClauseDBIF, types::*},
    rand::{rngs::SmallRng, SeedableRng},
    std::ops::AddAssign,
};

/// The engine aborts a victim loop when the shared work credit falls
/// below this floor; a guard against pathological runs.
pub(crate) const CREDIT_FLOOR: i64 = -20_000_000;

/// Outcome of subsuming with one clause, accumulated over its victims.
#[derive(Clone, Copy, Debug)]
pub struct Sub0Result {
    /// the number of removed clauses
    pub num_subsumed: usize,
    /// true if at least one victim was irredundant
    pub subsumed_irredundant: bool,
    /// merged provenance of all victims
    pub stats: crate::cdb::ClauseStats,
}

impl Default for Sub0Result {
    fn default() -> Sub0Result {
        Sub0Result {
            num_subsumed: 0,
            subsumed_irredundant: false,
            stats: crate::cdb::ClauseStats::unit(),
        }
    }
}

/// Outcome of a combined subsume and strengthen step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sub1Result {
    /// the number of removed clauses
    pub subsumed: usize,
    /// the number of literals removed by self-subsuming resolution
    pub strengthened: usize,
}

impl AddAssign for Sub1Result {
    fn add_assign(&mut self, other: Sub1Result) {
        self.subsumed += other.subsumed;
        self.strengthened += other.strengthened;
    }
}

/// API for the subsumption engine like `perform_subsumption`, `subsume1` and so on.
pub trait SubsumeIF: Instantiate {
    /// register a clause in the arena, link it into the occurrence lists
    /// and make it eligible for sampling. The caller's vector is drained.
    fn add_clause(
        &mut self,
        cdb: &mut impl ClauseDBIF,
        vec: &mut Vec<Lit>,
        learnt: bool,
    ) -> ClauseIndex;
    /// run one randomized backward subsumption pass within the
    /// `num_max_subsume0` budget.
    fn perform_subsumption(&mut self, cdb: &mut impl ClauseDBIF);
    /// run one randomized subsume and strengthen pass within the
    /// `num_max_subsume1` budget. Returns the solver's ok flag; false
    /// means a conflict surfaced and the formula is unsatisfiable.
    fn perform_strengthening(
        &mut self,
        asg: &mut impl AssignIF,
        cdb: &mut impl ClauseDBIF,
    ) -> bool;
    /// backward subsumption with one clause, with redundancy promotion.
    /// Returns the number of removed clauses.
    fn subsume0(&mut self, cdb: &mut impl ClauseDBIF, ci: ClauseIndex) -> usize;
    /// backward subsumption with an ad-hoc literal pair, rewriting
    /// implicit binary and ternary occurrences in place.
    fn subsume0_implicit(&mut self, cdb: &mut impl ClauseDBIF, pair: [Lit; 2]) -> usize;
    /// backward subsumption and self-subsuming resolution with one clause.
    fn subsume1(
        &mut self,
        asg: &mut impl AssignIF,
        cdb: &mut impl ClauseDBIF,
        ci: ClauseIndex,
    ) -> Sub1Result;
    /// bytes held by the engine's reusable buffers.
    fn mem_used(&self) -> usize;
    /// fold the per-run counters into the global ones.
    fn finished_run(&mut self);
    /// counters of the current run.
    fn run_stats(&self) -> &RunStats;
    /// counters accumulated over all finished runs.
    fn global_stats(&self) -> &RunStats;
}

/// Backward subsumption and self-subsuming resolution engine.
///
/// It owns the sampling index over the long clauses, the work budgets it
/// shares with the enclosing simplifier, and the scratch buffers reused
/// across steps. Everything else it works on, it borrows.
#[derive(Debug)]
pub struct Subsumer {
    /// sampling index over long clauses; may contain dead offsets,
    /// the drivers skip them.
    pub clauses: Vec<ClauseIndex>,
    /// work budget for subsumption passes
    pub num_max_subsume0: i64,
    /// work budget for strengthening passes
    pub num_max_subsume1: i64,
    /// permit rewriting implicit binary and ternary occurrences
    remove_implicit: bool,
    verbosity: usize,
    /// solver-owned generator; seeded so runs are reproducible
    rng: SmallRng,
    /// victim buffer
    subs: Vec<ClauseIndex>,
    /// how each victim is affected; `None` is plain subsumption,
    /// `Some(l)` removes `l` from it
    subs_lits: Vec<Option<Lit>>,
    run_stats: RunStats,
    global_stats: RunStats,
}

impl Instantiate for Subsumer {
    fn instantiate(config: &Config, _cnf: &CNFDescription) -> Subsumer {
        Subsumer {
            clauses: Vec::new(),
            num_max_subsume0: config.sub_lim,
            num_max_subsume1: config.str_lim,
            remove_implicit: config.sub_implicit,
            verbosity: config.verbosity,
            rng: SmallRng::seed_from_u64(config.rnd_seed),
            subs: Vec::new(),
            subs_lits: Vec::new(),
            run_stats: RunStats::default(),
            global_stats: RunStats::default(),
        }
    }
}
