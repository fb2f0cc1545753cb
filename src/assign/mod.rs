//! Module `assign` implements the root level assignment store the
//! processor consults while shrinking clauses. The search engine is
//! paused whenever the processor runs, so only level zero matters here.

use crate::types::*;

/// API for assignments like `assigned`, `assign_at_root_level`, and so on.
pub trait AssignIF: Instantiate {
    /// return the assigned value of a literal.
    /// - `None` if the underlying var is unassigned.
    /// - `Some(true)` if the literal is satisfied.
    /// - `Some(false)` if the literal is falsified.
    fn assigned(&self, l: Lit) -> Option<bool>;
    /// execute a root level assignment.
    ///
    /// # Errors
    ///
    /// if it conflicts with an existing assignment.
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent;
    /// return `false` if the formula is known to be unsatisfiable.
    fn okay(&self) -> bool;
    /// flip the state to 'not ok'; used when a clause shrank to nothing.
    fn found_empty_clause(&mut self);
    /// return the number of root level assignments.
    fn stack_len(&self) -> usize;
}

/// A root level assignment store.
#[derive(Clone, Debug)]
pub struct AssignStack {
    /// assignments indexed by `VarId`
    assign: Vec<Option<bool>>,
    /// record of assignment order
    trail: Vec<Lit>,
    ok: bool,
}

impl Default for AssignStack {
    fn default() -> AssignStack {
        AssignStack {
            assign: Vec::new(),
            trail: Vec::new(),
            ok: true,
        }
    }
}

impl Instantiate for AssignStack {
    fn instantiate(_config: &Config, cnf: &CNFDescription) -> AssignStack {
        AssignStack {
            assign: vec![None; cnf.num_of_variables + 1],
            ..AssignStack::default()
        }
    }
}

impl AssignIF for AssignStack {
    fn assigned(&self, l: Lit) -> Option<bool> {
        self.assign
            .get(l.vi())
            .copied()
            .flatten()
            .map(|a| if bool::from(l) { a } else { !a })
    }
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent {
        let vi = l.vi();
        if self.assign.len() <= vi {
            self.assign.resize(vi + 1, None);
        }
        match self.assigned(l) {
            Some(true) => Ok(()),
            Some(false) => {
                self.ok = false;
                Err(SolverError::RootLevelConflict(l))
            }
            None => {
                self.assign[vi] = Some(bool::from(l));
                self.trail.push(l);
                Ok(())
            }
        }
    }
    fn okay(&self) -> bool {
        self.ok
    }
    fn found_empty_clause(&mut self) {
        self.ok = false;
    }
    fn stack_len(&self) -> usize {
        self.trail.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    #[test]
    fn test_root_level_assignment() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 4,
            ..CNFDescription::default()
        };
        let mut asg = AssignStack::instantiate(&config, &cnf);
        assert!(asg.okay());
        assert_eq!(asg.assigned(lit(1)), None);
        assert_eq!(asg.assign_at_root_level(lit(1)), Ok(()));
        assert_eq!(asg.assigned(lit(1)), Some(true));
        assert_eq!(asg.assigned(lit(-1)), Some(false));
        assert_eq!(asg.stack_len(), 1);
        // reassigning the same value is a no-op
        assert_eq!(asg.assign_at_root_level(lit(1)), Ok(()));
        assert_eq!(asg.stack_len(), 1);
    }
    #[test]
    fn test_root_level_conflict() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 2,
            ..CNFDescription::default()
        };
        let mut asg = AssignStack::instantiate(&config, &cnf);
        assert_eq!(asg.assign_at_root_level(lit(-2)), Ok(()));
        assert_eq!(
            asg.assign_at_root_level(lit(2)),
            Err(SolverError::RootLevelConflict(lit(2)))
        );
        assert!(!asg.okay());
    }
}
