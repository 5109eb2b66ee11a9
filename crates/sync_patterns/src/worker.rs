//! Worker identities.
//!
//! Every worker in a run has a role and a 1-based identity within that role.  Log lines name workers by the
//! role's letter followed by the identity, e.g. `P1` or `R3`.
use std::fmt;

/// Identity of a worker within its role, starting at 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(u32);

impl WorkerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WorkerRole {
    Producer,
    Consumer,
    Reader,
    Writer,
}

impl WorkerRole {
    fn prefix(self) -> char {
        match self {
            WorkerRole::Producer => 'P',
            WorkerRole::Consumer => 'C',
            WorkerRole::Reader => 'R',
            WorkerRole::Writer => 'W',
        }
    }
}

/// A role and identity together, displayed as e.g. `C2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkerLabel {
    pub role: WorkerRole,
    pub id: WorkerId,
}

impl WorkerLabel {
    pub fn new(role: WorkerRole, id: WorkerId) -> Self {
        Self { role, id }
    }
}

impl fmt::Display for WorkerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.prefix(), self.id)
    }
}
