/// API for object properties.
pub trait FlagIF {
    type FlagType;
    /// return true if the flag in on.
    fn is(&self, flag: Self::FlagType) -> bool;
    /// set the flag.
    fn set(&mut self, f: Self::FlagType, b: bool);
    /// toggle the flag off.
    fn turn_off(&mut self, flag: Self::FlagType);
    /// toggle the flag on.
    fn turn_on(&mut self, flag: Self::FlagType);
}

bitflags! {
    /// Misc flags used by [`Clause`](`crate::cdb::Clause`).
    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagClause: u8 {
        /// a clause derived by the solver; it may be deleted for any reason.
        const LEARNT       = 0b0000_0001;
        /// a clause is unlinked from all occurrence lists; its arena slot
        /// stays valid until external garbage collection.
        const DEAD         = 0b0000_0010;
        /// a clause is registered in literals' occurrence lists.
        const OCCUR_LINKED = 0b0000_0100;
    }
}
