//! The merge-point table: §4.6. Forward branches deposit a register-file
//! snapshot at their target offset; when the driver's single forward
//! sweep reaches that offset, every snapshot waiting there is checked for
//! admissibility against the instruction found there — independently of
//! the live fall-through state, and independently of each other. Per the
//! design notes, this is deliberately stricter than a lattice join: no
//! state is merged or widened, each one simply has to stand on its own.

use crate::limits::MERGE_TABLE_INLINE_CAPACITY;
use crate::registers::RegisterFile;

/// Pending forward-branch targets, each carrying the register state that
/// was live at the branch.
#[derive(Debug, Default)]
pub struct MergeTable {
    entries: Vec<(u16, RegisterFile)>,
}

impl MergeTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MERGE_TABLE_INLINE_CAPACITY),
        }
    }

    /// Record that a branch at some earlier offset wants execution to
    /// resume at `target` with `regs` live.
    pub fn insert(&mut self, target: u16, regs: RegisterFile) {
        self.entries.push((target, regs));
    }

    /// Remove and return every snapshot waiting for `target`, in
    /// insertion order.
    pub fn take(&mut self, target: u16) -> Vec<RegisterFile> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].0 == target {
                taken.push(self.entries.remove(i).1);
            } else {
                i += 1;
            }
        }
        taken
    }

    /// Number of entries still waiting for a branch target the sweep has
    /// not yet reached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
