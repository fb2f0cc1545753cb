/// Backward subsumption: the subset tests, the occurrence-list candidate
/// scan, and the subsume0/subsume1 entry points.
use {
    super::{Sub0Result, Sub1Result, Subsumer, CREDIT_FLOOR},
    crate::{
        assign::AssignIF,
        cdb::{ClauseDBIF, ClauseIF, Watched},
        types::*,
    },
};

/// Outcome of matching clause `a` against clause `b` allowing one
/// complemented literal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Subset1 {
    /// `a ⊆ b`; `b` is plainly subsumed.
    Subsumed,
    /// `a ⊆ b` modulo one complement; the literal can be removed from `b`.
    Strengthen(Lit),
    /// neither holds.
    Unmatched,
}

/// decide only from signatures whether clause `a` could be a subset of
/// clause `b`. False positives happen on hash collisions; false
/// negatives never: a bit set for `a` but not for `b` names a literal
/// `b` cannot contain.
#[inline]
pub fn subset_abst(a: u64, b: u64) -> bool {
    (a & !b) == 0
}

/// exact subset test on sorted literal sequences; `a ⊆ b`.
pub fn subset(credit: &mut i64, a: &[Lit], b: &[Lit]) -> bool {
    debug_assert!(!a.is_empty());
    let mut i = 0;
    let mut j = 0;
    let mut ret = false;
    while j < b.len() {
        debug_assert!(j == 0 || b[j - 1] < b[j], "unsorted clause in subset");
        if a[i] < b[j] {
            break;
        }
        if a[i] == b[j] {
            i += 1;
            if i == a.len() {
                ret = true;
                break;
            }
        }
        j += 1;
    }
    *credit -= 4 * (i as i64 + j as i64);
    ret
}

/// decide whether `a` subsumes `b`, or failing that, whether `a` can
/// strengthen `b` by self-subsuming resolution. At most one literal of
/// `a` may match a complement in `b`; that complement is the removable
/// literal.
pub fn subset1(credit: &mut i64, a: &[Lit], b: &[Lit]) -> Subset1 {
    debug_assert!(!a.is_empty());
    let mut removable: Option<Lit> = None;
    let mut matched = false;
    let mut i = 0;
    let mut j = 0;
    while j < b.len() {
        if a[i] == !b[j] && removable.is_none() {
            removable = Some(b[j]);
            i += 1;
            if i == a.len() {
                matched = true;
                break;
            }
            j += 1;
            continue;
        }
        if a[i] < b[j] {
            break;
        }
        if a[i] == b[j] {
            i += 1;
            if i == a.len() {
                matched = true;
                break;
            }
        }
        j += 1;
    }
    *credit -= 4 * (i as i64 + j as i64);
    if !matched {
        return Subset1::Unmatched;
    }
    match removable {
        None => Subset1::Subsumed,
        Some(l) => Subset1::Strengthen(l),
    }
}

/// promote a clause that absorbed irredundant content; its literals move
/// from the redundant to the irredundant bucket and it gets relinked if
/// it was not in the occurrence lists.
fn turn_irredundant(cdb: &mut impl ClauseDBIF, ci: ClauseIndex) {
    debug_assert!(cdb[ci].is(FlagClause::LEARNT));
    let n = cdb[ci].len();
    cdb[ci].turn_off(FlagClause::LEARNT);
    cdb.bin_tri_mut().red_lits -= n;
    cdb.bin_tri_mut().irred_lits += n;
    if !cdb[ci].is(FlagClause::OCCUR_LINKED) {
        cdb.link_in_clause(ci);
    }
}

impl Subsumer {
    /// backward subsumption using the given clause; promotes it to
    /// irredundant when it absorbed an irredundant victim.
    pub(super) fn subsume0_impl(
        &mut self,
        cdb: &mut impl ClauseDBIF,
        credit: &mut i64,
        ci: ClauseIndex,
    ) -> usize {
        debug_assert!(!cdb[ci].is_dead());
        let ps = cdb[ci].iter().copied().collect::<Vec<_>>();
        let abst = cdb[ci].abst;
        let remove_implicit = self.remove_implicit && ps.len() == 2;
        let ret = self.subsume0_and_unlink(cdb, credit, ci, &ps, abst, remove_implicit);
        if ret.subsumed_irredundant && cdb[ci].is(FlagClause::LEARNT) {
            turn_irredundant(cdb, ci);
        }
        cdb[ci].stats.absorb(&ret.stats);
        ret.num_subsumed
    }
    /// collect and unlink every clause the literal sequence subsumes.
    pub(super) fn subsume0_and_unlink(
        &mut self,
        cdb: &mut impl ClauseDBIF,
        credit: &mut i64,
        offset: ClauseIndex,
        ps: &[Lit],
        abst: u64,
        remove_implicit: bool,
    ) -> Sub0Result {
        let mut ret = Sub0Result::default();
        self.subs.clear();
        self.find_subsumed(cdb, credit, offset, ps, abst, remove_implicit);
        for i in 0..self.subs.len() {
            let ci = self.subs[i];
            debug_assert!(!cdb[ci].is_dead());
            ret.stats.absorb(&cdb[ci].stats);
            if !cdb[ci].is(FlagClause::LEARNT) {
                ret.subsumed_irredundant = true;
            }
            cdb.unlink_clause(ci);
            ret.num_subsumed += 1;
            if *credit < CREDIT_FLOOR {
                break;
            }
        }
        ret
    }
    /// backward subsumption and self-subsuming resolution using the
    /// given clause.
    pub(super) fn subsume1_impl(
        &mut self,
        asg: &mut impl AssignIF,
        cdb: &mut impl ClauseDBIF,
        credit: &mut i64,
        offset: ClauseIndex,
    ) -> Sub1Result {
        debug_assert!(!cdb[offset].is_dead());
        let mut ret = Sub1Result::default();
        self.subs.clear();
        self.subs_lits.clear();
        let ps = cdb[offset].iter().copied().collect::<Vec<_>>();
        let abst = cdb[offset].abst;
        if 6 <= self.verbosity {
            println!("c subsume1 with {}", cdb[offset]);
        }
        self.find_strengthened(cdb, credit, offset, &ps, abst);
        for j in 0..self.subs.len() {
            if !asg.okay() {
                break;
            }
            let victim = self.subs[j];
            debug_assert!(!cdb[victim].is_dead());
            match self.subs_lits[j] {
                None => {
                    if 6 <= self.verbosity {
                        println!("c  subsumed {}", cdb[victim]);
                    }
                    if cdb[offset].is(FlagClause::LEARNT) && !cdb[victim].is(FlagClause::LEARNT) {
                        turn_irredundant(cdb, offset);
                    }
                    let stats = cdb[victim].stats;
                    cdb[offset].stats.absorb(&stats);
                    cdb.unlink_clause(victim);
                    ret.subsumed += 1;
                }
                Some(l) => {
                    if 6 <= self.verbosity {
                        println!("c  strengthened {} dropping {}", cdb[victim], l);
                    }
                    let result = self.strengthen(asg, cdb, credit, victim, l);
                    ret.strengthened += 1;
                    if result.is_err() || !asg.okay() {
                        return ret;
                    }
                    if *credit < CREDIT_FLOOR {
                        break;
                    }
                }
            }
        }
        ret
    }
    /// find clauses that the literal sequence subsumes by walking the
    /// shortest relevant occurrence list. Under `remove_implicit`, pairs
    /// also absorb duplicate binary and covered ternary entries, and the
    /// walked list is compacted in place through a write cursor.
    fn find_subsumed(
        &mut self,
        cdb: &mut impl ClauseDBIF,
        credit: &mut i64,
        offset: ClauseIndex,
        ps: &[Lit],
        abst: u64,
        remove_implicit: bool,
    ) {
        debug_assert!(1 < ps.len());
        // every subsumed clause contains all of ps, so the shortest
        // occurrence list among them covers all candidates
        let mut min_i = 0;
        for i in 1..ps.len() {
            if cdb.watches(ps[i]).len() < cdb.watches(ps[min_i]).len() {
                min_i = i;
            }
        }
        *credit -= ps.len() as i64;

        let min_lit = ps[min_i];
        let mut occ = cdb.take_watches(min_lit);
        *credit -= occ.len() as i64 * 8 + 40;
        let mut kept = 0;
        let mut num_bin_found = 0;
        for i in 0..occ.len() {
            let w = occ[i];
            if remove_implicit {
                debug_assert_eq!(ps.len(), 2);
                let other = ps[1 - min_i];
                match w {
                    Watched::Binary { other: o, red: false } if o == other => {
                        num_bin_found += 1;
                        // the first occurrence is the subsuming pair itself;
                        // never remove a clause from underneath itself
                        if 1 < num_bin_found {
                            cdb.remove_bin(o, min_lit, false);
                            cdb.bin_tri_mut().irred_bins -= 1;
                            continue;
                        }
                    }
                    Watched::Ternary { lit2, lit3, red } if lit2 == other || lit3 == other => {
                        let mut tri = [min_lit, lit2, lit3];
                        tri.sort_unstable();
                        cdb.remove_tri_all_but_one(min_lit, &tri, red);
                        if red {
                            cdb.bin_tri_mut().red_tris -= 1;
                        } else {
                            cdb.bin_tri_mut().irred_tris -= 1;
                        }
                        continue;
                    }
                    _ => (),
                }
            }
            occ[kept] = w;
            kept += 1;

            let Watched::Clause { ci, abst: abst2 } = w else {
                continue;
            };
            *credit -= 15;
            if ci == offset || !subset_abst(abst, abst2) {
                continue;
            }
            if ps.len() > cdb[ci].len() {
                continue;
            }
            *credit -= 50;
            if subset(credit, ps, &cdb[ci][0..]) {
                self.subs.push(ci);
            }
        }
        occ.truncate(kept);
        cdb.put_watches(min_lit, occ);
    }
    /// find clauses the given clause subsumes or strengthens. A partner
    /// must share a variable of the clause in either polarity, so both
    /// occurrence lists of the variable with the fewest occurrences are
    /// scanned.
    fn find_strengthened(
        &mut self,
        cdb: &impl ClauseDBIF,
        credit: &mut i64,
        offset: ClauseIndex,
        ps: &[Lit],
        abst: u64,
    ) {
        debug_assert!(1 < ps.len());
        let mut min_var = 0;
        let mut best_size = usize::MAX;
        for l in ps.iter() {
            let size = cdb.watches(*l).len() + cdb.watches(!*l).len();
            if size < best_size {
                min_var = l.vi();
                best_size = size;
            }
        }
        debug_assert_ne!(min_var, 0);
        *credit -= ps.len() as i64;
        self.fill_subs(cdb, credit, offset, ps, abst, Lit::from((min_var, false)));
        self.fill_subs(cdb, credit, offset, ps, abst, Lit::from((min_var, true)));
    }
    /// scan one occurrence list for subsumed or strengthenable clauses.
    fn fill_subs(
        &mut self,
        cdb: &impl ClauseDBIF,
        credit: &mut i64,
        offset: ClauseIndex,
        ps: &[Lit],
        abst: u64,
        lit: Lit,
    ) {
        let cs = cdb.watches(lit);
        *credit -= cs.len() as i64 * 15 + 40;
        for w in cs.iter() {
            let Watched::Clause { ci, abst: abst2 } = *w else {
                continue;
            };
            if ci == offset || !subset_abst(abst, abst2) {
                continue;
            }
            if ps.len() > cdb[ci].len() {
                continue;
            }
            *credit -= (ps.len() + cdb[ci].len()) as i64;
            match subset1(credit, ps, &cdb[ci][0..]) {
                Subset1::Subsumed => {
                    self.subs.push(ci);
                    self.subs_lits.push(None);
                }
                Subset1::Strengthen(l) => {
                    self.subs.push(ci);
                    self.subs_lits.push(Some(l));
                }
                Subset1::Unmatched => (),
            }
        }
    }
}
