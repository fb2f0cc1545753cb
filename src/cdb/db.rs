use {
    super::{calc_abstraction, CertificateStore, Clause, ClauseDBIF, ClauseIF, Watched},
    crate::{assign::AssignIF, types::*},
    std::{
        ops::{Index, IndexMut},
        slice::Iter,
    },
};

/// Totals over all live clauses, partitioned by redundancy. Literal
/// counters cover long clauses; bin and tri counters cover the implicit
/// clauses living in the occurrence lists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BinTriStats {
    pub irred_lits: usize,
    pub red_lits: usize,
    pub irred_bins: usize,
    pub red_bins: usize,
    pub irred_tris: usize,
    pub red_tris: usize,
}

/// Clause arena together with the per-literal occurrence lists built over
/// it. Arena offsets are stable; removing a clause only unlinks it and
/// marks the slot dead.
#[derive(Debug, Default)]
pub struct ClauseDB {
    /// clause arena; index 0 is reserved
    clause: Vec<Clause>,
    /// occurrence lists indexed by literal code
    watch: Vec<Vec<Watched>>,
    /// aggregate counters
    bin_tri: BinTriStats,
    /// DRAT output
    certificate: CertificateStore,
    /// the number of live long clauses
    num_clause: usize,
}

impl Index<ClauseIndex> for ClauseDB {
    type Output = Clause;
    #[inline]
    fn index(&self, ci: ClauseIndex) -> &Clause {
        #[cfg(feature = "unsafe_access")]
        unsafe {
            self.clause.get_unchecked(ci)
        }
        #[cfg(not(feature = "unsafe_access"))]
        &self.clause[ci]
    }
}

impl IndexMut<ClauseIndex> for ClauseDB {
    #[inline]
    fn index_mut(&mut self, ci: ClauseIndex) -> &mut Clause {
        #[cfg(feature = "unsafe_access")]
        unsafe {
            self.clause.get_unchecked_mut(ci)
        }
        #[cfg(not(feature = "unsafe_access"))]
        &mut self.clause[ci]
    }
}

impl Instantiate for ClauseDB {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> ClauseDB {
        let nv = cnf.num_of_variables;
        ClauseDB {
            clause: vec![Clause::default()],
            watch: vec![Vec::new(); 2 * (nv + 1)],
            certificate: CertificateStore::instantiate(config, cnf),
            ..ClauseDB::default()
        }
    }
}

impl ClauseDBIF for ClauseDB {
    fn len(&self) -> usize {
        self.clause.len()
    }
    fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }
    fn iter(&self) -> Iter<'_, Clause> {
        self.clause.iter()
    }
    fn num_clause(&self) -> usize {
        self.num_clause
    }
    #[inline]
    fn watches(&self, l: Lit) -> &[Watched] {
        &self.watch[usize::from(l)]
    }
    fn take_watches(&mut self, l: Lit) -> Vec<Watched> {
        std::mem::take(&mut self.watch[usize::from(l)])
    }
    fn put_watches(&mut self, l: Lit, ws: Vec<Watched>) {
        debug_assert!(self.watch[usize::from(l)].is_empty());
        self.watch[usize::from(l)] = ws;
    }
    fn remove_watch_clause(&mut self, l: Lit, ci: ClauseIndex) {
        let ws = &mut self.watch[usize::from(l)];
        debug_assert_eq!(
            ws.iter().filter(|w| w.as_clause() == Some(ci)).count(),
            1,
            "occurrence list of {l} out of sync with clause {ci}"
        );
        ws.delete_unstable(|w| w.as_clause() == Some(ci));
    }
    fn remove_bin(&mut self, l: Lit, other: Lit, red: bool) {
        self.watch[usize::from(l)]
            .delete_unstable(|w| *w == Watched::Binary { other, red });
    }
    fn remove_tri_all_but_one(&mut self, except: Lit, tri: &[Lit; 3], red: bool) {
        debug_assert!(tri.windows(2).all(|w| w[0] < w[1]));
        for (l, a, b) in [
            (tri[0], tri[1], tri[2]),
            (tri[1], tri[0], tri[2]),
            (tri[2], tri[0], tri[1]),
        ] {
            if l == except {
                continue;
            }
            self.watch[usize::from(l)]
                .delete_unstable(|w| *w == Watched::Ternary { lit2: a, lit3: b, red });
        }
    }
    fn search_bin(&self, l0: Lit, l1: Lit) -> Option<bool> {
        for w in self.watch[usize::from(l0)].iter() {
            if let Watched::Binary { other, red } = w {
                if *other == l1 {
                    return Some(*red);
                }
            }
        }
        None
    }
    fn register_clause(&mut self, vec: &mut Vec<Lit>, learnt: bool) -> ClauseIndex {
        debug_assert!(1 < vec.len());
        vec.sort_unstable();
        debug_assert!(vec.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(vec.iter().all(|l| !vec.contains(&!*l)));
        if let Some(l) = vec.last() {
            self.ensure_var(l.vi());
        }
        let abst = calc_abstraction(vec);
        let n = vec.len();
        let ci = self.clause.len();
        self.clause.push(Clause {
            lits: std::mem::take(vec),
            abst,
            flags: if learnt {
                FlagClause::LEARNT
            } else {
                FlagClause::empty()
            },
            ..Clause::default()
        });
        if learnt {
            self.bin_tri.red_lits += n;
        } else {
            self.bin_tri.irred_lits += n;
        }
        self.num_clause += 1;
        ci
    }
    fn register_bin(&mut self, l0: Lit, l1: Lit, learnt: bool) {
        debug_assert_ne!(l0.vi(), l1.vi());
        self.ensure_var(l0.vi().max(l1.vi()));
        self.watch[usize::from(l0)].push(Watched::Binary {
            other: l1,
            red: learnt,
        });
        self.watch[usize::from(l1)].push(Watched::Binary {
            other: l0,
            red: learnt,
        });
        if learnt {
            self.bin_tri.red_bins += 1;
        } else {
            self.bin_tri.irred_bins += 1;
        }
    }
    fn register_tri(&mut self, l0: Lit, l1: Lit, l2: Lit, learnt: bool) {
        let mut tri = [l0, l1, l2];
        tri.sort_unstable();
        debug_assert!(tri[0] < tri[1] && tri[1] < tri[2]);
        self.ensure_var(tri[2].vi());
        for (l, a, b) in [
            (tri[0], tri[1], tri[2]),
            (tri[1], tri[0], tri[2]),
            (tri[2], tri[0], tri[1]),
        ] {
            self.watch[usize::from(l)].push(Watched::Ternary {
                lit2: a,
                lit3: b,
                red: learnt,
            });
        }
        if learnt {
            self.bin_tri.red_tris += 1;
        } else {
            self.bin_tri.irred_tris += 1;
        }
    }
    fn link_in_clause(&mut self, ci: ClauseIndex) {
        debug_assert!(!self[ci].is_dead());
        if self[ci].is(FlagClause::OCCUR_LINKED) {
            return;
        }
        let abst = self[ci].abst;
        let lits = self[ci].iter().copied().collect::<Vec<_>>();
        for l in lits {
            self.watch[usize::from(l)].push(Watched::Clause { ci, abst });
        }
        self[ci].turn_on(FlagClause::OCCUR_LINKED);
    }
    fn unlink_clause(&mut self, ci: ClauseIndex) {
        debug_assert!(!self[ci].is_dead());
        let lits = self[ci].iter().copied().collect::<Vec<_>>();
        if self[ci].is(FlagClause::OCCUR_LINKED) {
            for l in &lits {
                self.remove_watch_clause(*l, ci);
            }
            self[ci].turn_off(FlagClause::OCCUR_LINKED);
        }
        if self[ci].is(FlagClause::LEARNT) {
            self.bin_tri.red_lits -= lits.len();
        } else {
            self.bin_tri.irred_lits -= lits.len();
        }
        self.certificate.push_delete(&lits);
        self[ci].kill();
        self.num_clause -= 1;
    }
    fn clean_clause(&mut self, asg: &mut impl AssignIF, ci: ClauseIndex) -> MaybeInconsistent {
        if self[ci].is_dead() {
            return Ok(());
        }
        if self[ci].iter().any(|l| asg.assigned(*l) == Some(true)) {
            self.unlink_clause(ci);
            return Ok(());
        }
        let olds = self[ci].iter().copied().collect::<Vec<_>>();
        let falsified = olds
            .iter()
            .filter(|l| asg.assigned(**l) == Some(false))
            .copied()
            .collect::<Vec<_>>();
        if !falsified.is_empty() {
            let linked = self[ci].is(FlagClause::OCCUR_LINKED);
            let learnt = self[ci].is(FlagClause::LEARNT);
            for l in &falsified {
                if linked {
                    self.remove_watch_clause(*l, ci);
                }
                self[ci].delete_literal(*l);
                if learnt {
                    self.bin_tri.red_lits -= 1;
                } else {
                    self.bin_tri.irred_lits -= 1;
                }
            }
            if self.certificate.is_active() && !self[ci].is_empty() {
                let news = self[ci].iter().copied().collect::<Vec<_>>();
                self.certificate.push_add(&news);
                self.certificate.push_delete(&olds);
            }
        }
        match self[ci].len() {
            0 => {
                asg.found_empty_clause();
                Err(SolverError::EmptyClause)
            }
            1 => {
                let l0 = self[ci].lit0();
                self.certificate.push_add(&[l0]);
                self.unlink_clause(ci);
                asg.assign_at_root_level(l0)
            }
            2 => {
                // a clause shrunk to two literals may duplicate an implicit edge
                let l0 = self[ci].lit0();
                let l1 = self[ci].lit1();
                if let Some(red) = self.search_bin(l0, l1) {
                    if red && !self[ci].is(FlagClause::LEARNT) {
                        self.set_bin_irredundant(l0, l1);
                    }
                    self.unlink_clause(ci);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
    fn bin_tri(&self) -> &BinTriStats {
        &self.bin_tri
    }
    fn bin_tri_mut(&mut self) -> &mut BinTriStats {
        &mut self.bin_tri
    }
    fn certificate_add(&mut self, vec: &[Lit]) {
        self.certificate.push_add(vec);
    }
    fn certificate_delete(&mut self, vec: &[Lit]) {
        self.certificate.push_delete(vec);
    }
    fn certificate_is_active(&self) -> bool {
        self.certificate.is_active()
    }
    fn certificate_save(&mut self) {
        self.certificate.close();
    }
}

impl ClauseDB {
    /// grow the occurrence lists to cover a variable.
    fn ensure_var(&mut self, vi: VarId) {
        let want = 2 * (vi + 1);
        if self.watch.len() < want {
            self.watch.resize_with(want, Vec::new);
        }
    }
    /// turn an implicit binary irredundant; both entries and the
    /// counters move together.
    fn set_bin_irredundant(&mut self, l0: Lit, l1: Lit) {
        for (a, b) in [(l0, l1), (l1, l0)] {
            for w in self.watch[usize::from(a)].iter_mut() {
                if let Watched::Binary { other, red } = w {
                    if *other == b && *red {
                        *red = false;
                        break;
                    }
                }
            }
        }
        self.bin_tri.red_bins -= 1;
        self.bin_tri.irred_bins += 1;
    }
}

#[cfg(feature = "boundary_check")]
impl ClauseDB {
    /// verify that every live linked clause appears exactly once in the
    /// occurrence list of each of its literals.
    pub fn check_occurrences(&self) -> Result<(), String> {
        for (ci, c) in self.clause.iter().enumerate().skip(1) {
            if c.is_dead() || !c.is(FlagClause::OCCUR_LINKED) {
                continue;
            }
            for l in c.iter() {
                let n = self.watch[usize::from(*l)]
                    .iter()
                    .filter(|w| w.as_clause() == Some(ci))
                    .count();
                if n != 1 {
                    return Err(format!("clause {ci}:{c} appears {n} times in list of {l}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::AssignStack;

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    fn setup() -> (AssignStack, ClauseDB) {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 6,
            ..CNFDescription::default()
        };
        (
            AssignStack::instantiate(&config, &cnf),
            ClauseDB::instantiate(&config, &cnf),
        )
    }

    #[test]
    fn test_register_and_link() {
        let (_, mut cdb) = setup();
        let ci = cdb.register_clause(&mut vec![lit(3), lit(1), lit(-2)], false);
        assert_eq!(Vec::<i32>::from(&cdb[ci]), vec![1, -2, 3]);
        assert_eq!(cdb.bin_tri().irred_lits, 3);
        assert_eq!(cdb.num_clause(), 1);
        assert!(!cdb[ci].is(FlagClause::OCCUR_LINKED));
        cdb.link_in_clause(ci);
        assert!(cdb[ci].is(FlagClause::OCCUR_LINKED));
        for l in [lit(1), lit(-2), lit(3)] {
            assert_eq!(cdb.watches(l).len(), 1);
        }
    }
    #[test]
    fn test_unlink_clears_occurrences_and_counters() {
        let (_, mut cdb) = setup();
        let ci = cdb.register_clause(&mut vec![lit(1), lit(2)], true);
        cdb.link_in_clause(ci);
        assert_eq!(cdb.bin_tri().red_lits, 2);
        cdb.unlink_clause(ci);
        assert!(cdb[ci].is_dead());
        assert_eq!(cdb.bin_tri().red_lits, 0);
        assert_eq!(cdb.num_clause(), 0);
        assert!(cdb.watches(lit(1)).is_empty());
        assert!(cdb.watches(lit(2)).is_empty());
    }
    #[test]
    fn test_implicit_registration() {
        let (_, mut cdb) = setup();
        cdb.register_bin(lit(1), lit(2), false);
        cdb.register_tri(lit(3), lit(1), lit(2), true);
        assert_eq!(cdb.bin_tri().irred_bins, 1);
        assert_eq!(cdb.bin_tri().red_tris, 1);
        assert_eq!(cdb.search_bin(lit(1), lit(2)), Some(false));
        assert_eq!(cdb.search_bin(lit(2), lit(1)), Some(false));
        assert_eq!(cdb.search_bin(lit(1), lit(3)), None);
        // the ternary holds the other two literals in ascending order
        assert!(cdb
            .watches(lit(2))
            .iter()
            .any(|w| *w == Watched::Ternary { lit2: lit(1), lit3: lit(3), red: true }));
    }
    #[test]
    fn test_remove_tri_all_but_one() {
        let (_, mut cdb) = setup();
        cdb.register_tri(lit(1), lit(2), lit(3), false);
        let tri = [lit(1), lit(2), lit(3)];
        cdb.remove_tri_all_but_one(lit(1), &tri, false);
        assert_eq!(cdb.watches(lit(1)).len(), 1);
        assert!(cdb.watches(lit(2)).is_empty());
        assert!(cdb.watches(lit(3)).is_empty());
    }
    #[test]
    fn test_clean_clause_unit_propagates() {
        let (mut asg, mut cdb) = setup();
        let ci = cdb.register_clause(&mut vec![lit(1), lit(2)], false);
        cdb.link_in_clause(ci);
        asg.assign_at_root_level(lit(-2)).expect("no conflict");
        assert_eq!(cdb.clean_clause(&mut asg, ci), Ok(()));
        assert!(cdb[ci].is_dead());
        assert_eq!(asg.assigned(lit(1)), Some(true));
    }
    #[test]
    fn test_clean_clause_conflict() {
        let (mut asg, mut cdb) = setup();
        let ci = cdb.register_clause(&mut vec![lit(1), lit(2)], false);
        cdb.link_in_clause(ci);
        asg.assign_at_root_level(lit(-1)).expect("no conflict");
        asg.assign_at_root_level(lit(-2)).expect("no conflict");
        assert_eq!(
            cdb.clean_clause(&mut asg, ci),
            Err(SolverError::EmptyClause)
        );
        assert!(!asg.okay());
    }
    #[test]
    fn test_clean_clause_satisfied() {
        let (mut asg, mut cdb) = setup();
        let ci = cdb.register_clause(&mut vec![lit(1), lit(2), lit(3)], false);
        cdb.link_in_clause(ci);
        asg.assign_at_root_level(lit(2)).expect("no conflict");
        assert_eq!(cdb.clean_clause(&mut asg, ci), Ok(()));
        assert!(cdb[ci].is_dead());
        assert_eq!(cdb.bin_tri().irred_lits, 0);
    }
    #[test]
    fn test_clean_clause_merges_into_implicit_edge() {
        let (mut asg, mut cdb) = setup();
        cdb.register_bin(lit(1), lit(2), true);
        let ci = cdb.register_clause(&mut vec![lit(1), lit(2), lit(3)], false);
        cdb.link_in_clause(ci);
        asg.assign_at_root_level(lit(-3)).expect("no conflict");
        assert_eq!(cdb.clean_clause(&mut asg, ci), Ok(()));
        assert!(cdb[ci].is_dead());
        // the surviving edge inherits irredundancy
        assert_eq!(cdb.search_bin(lit(1), lit(2)), Some(false));
        assert_eq!(cdb.bin_tri().irred_bins, 1);
        assert_eq!(cdb.bin_tri().red_bins, 0);
    }
}
