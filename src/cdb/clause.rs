use {
    super::ClauseStats,
    crate::types::*,
    std::{
        fmt,
        ops::{Index, IndexMut, Range, RangeFrom},
        slice::Iter,
    },
};

/// compute the 64-bit signature of a literal sequence. Bit
/// `code(l) mod 64` is set for every literal, so a clause that is a
/// subset of another can never have a bit its superset lacks.
pub fn calc_abstraction(lits: &[Lit]) -> u64 {
    lits.iter()
        .fold(0u64, |abst, l| abst | (1u64 << (usize::from(*l) & 63)))
}

/// A representation of 'clause'
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    /// The literals in a clause, in ascending order.
    pub(super) lits: Vec<Lit>,
    /// The signature of `lits`; kept in sync with them.
    pub abst: u64,
    /// Provenance metadata, merged in when this clause absorbs another.
    pub stats: ClauseStats,
    /// Flags (8 bits)
    pub(crate) flags: FlagClause,
}

/// API for Clause, providing literal accessors.
pub trait ClauseIF {
    /// return true if it is unlinked and waiting for garbage collection.
    fn is_dead(&self) -> bool;
    /// return 1st literal
    fn lit0(&self) -> Lit;
    /// return 2nd literal
    fn lit1(&self) -> Lit;
    /// return `true` if the clause contains the literal
    fn contains(&self, lit: Lit) -> bool;
    /// return an iterator over its literals.
    fn iter(&self) -> Iter<'_, Lit>;
    /// return the number of literals.
    fn len(&self) -> usize;
    /// return true if it contains no literals.
    fn is_empty(&self) -> bool;
}

impl Default for Clause {
    fn default() -> Clause {
        Clause {
            lits: vec![],
            abst: 0,
            stats: ClauseStats::default(),
            flags: FlagClause::empty(),
        }
    }
}

impl Index<usize> for Clause {
    type Output = Lit;
    #[inline]
    fn index(&self, i: usize) -> &Lit {
        #[cfg(feature = "unsafe_access")]
        unsafe {
            self.lits.get_unchecked(i)
        }
        #[cfg(not(feature = "unsafe_access"))]
        &self.lits[i]
    }
}

impl IndexMut<usize> for Clause {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Lit {
        #[cfg(feature = "unsafe_access")]
        unsafe {
            self.lits.get_unchecked_mut(i)
        }
        #[cfg(not(feature = "unsafe_access"))]
        &mut self.lits[i]
    }
}

impl Index<Range<usize>> for Clause {
    type Output = [Lit];
    #[inline]
    fn index(&self, r: Range<usize>) -> &[Lit] {
        #[cfg(feature = "unsafe_access")]
        unsafe {
            self.lits.get_unchecked(r)
        }
        #[cfg(not(feature = "unsafe_access"))]
        &self.lits[r]
    }
}

impl Index<RangeFrom<usize>> for Clause {
    type Output = [Lit];
    #[inline]
    fn index(&self, r: RangeFrom<usize>) -> &[Lit] {
        #[cfg(feature = "unsafe_access")]
        unsafe {
            self.lits.get_unchecked(r)
        }
        #[cfg(not(feature = "unsafe_access"))]
        &self.lits[r]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;
    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl From<&Clause> for Vec<i32> {
    fn from(c: &Clause) -> Vec<i32> {
        c.lits.iter().map(|l| i32::from(*l)).collect::<Vec<i32>>()
    }
}

impl ClauseIF for Clause {
    fn is_dead(&self) -> bool {
        self.flags.contains(FlagClause::DEAD)
    }
    fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }
    #[inline]
    fn lit0(&self) -> Lit {
        self.lits[0]
    }
    #[inline]
    fn lit1(&self) -> Lit {
        self.lits[1]
    }
    fn contains(&self, lit: Lit) -> bool {
        self.lits.contains(&lit)
    }
    fn len(&self) -> usize {
        self.lits.len()
    }
    fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
}

impl FlagIF for Clause {
    type FlagType = FlagClause;
    #[inline]
    fn is(&self, flag: Self::FlagType) -> bool {
        self.flags.contains(flag)
    }
    #[inline]
    fn set(&mut self, f: Self::FlagType, b: bool) {
        self.flags.set(f, b);
    }
    #[inline]
    fn turn_off(&mut self, flag: Self::FlagType) {
        self.flags.remove(flag);
    }
    #[inline]
    fn turn_on(&mut self, flag: Self::FlagType) {
        self.flags.insert(flag);
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let st = |flag, mes| if self.is(flag) { mes } else { "" };
        write!(
            f,
            "{{{:?}{}{}}}",
            i32s(&self.lits),
            st(FlagClause::LEARNT, ", learnt"),
            st(FlagClause::DEAD, ", dead"),
        )
    }
}

impl Clause {
    /// remove a literal and refresh the signature.
    pub(crate) fn delete_literal(&mut self, l: Lit) {
        debug_assert!(self.lits.contains(&l));
        self.lits.retain(|x| *x != l);
        self.abst = calc_abstraction(&self.lits);
    }
    /// mark the clause unlinked; the slot stays until garbage collection.
    pub(crate) fn kill(&mut self) {
        self.turn_on(FlagClause::DEAD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    #[test]
    fn test_abstraction_is_order_independent() {
        let a = calc_abstraction(&[lit(1), lit(-2), lit(3)]);
        let b = calc_abstraction(&[lit(3), lit(1), lit(-2)]);
        assert_eq!(a, b);
        assert_ne!(a, calc_abstraction(&[lit(1), lit(2), lit(3)]));
    }
    #[test]
    fn test_delete_literal_keeps_order_and_signature() {
        let lits = vec![lit(1), lit(-2), lit(3)];
        let mut c = Clause {
            abst: calc_abstraction(&lits),
            lits,
            ..Clause::default()
        };
        c.delete_literal(lit(-2));
        assert_eq!(Vec::<i32>::from(&c), vec![1, 3]);
        assert_eq!(c.abst, calc_abstraction(&c.lits));
        assert!(c.lits.windows(2).all(|w| w[0] < w[1]));
    }
}
