//! The abstract register file: a fixed-size shadow of the runtime
//! register set, carrying only a semantic type tag and a literal-origin
//! flag per register.

use crate::limits::{INVALID_REG, NR_REG};
use crate::types::SemanticType;

/// A single abstract register: a type tag plus whether the value currently
/// held was produced by a literal-load opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbstractRegister {
    /// Semantic type of the value currently held.
    pub ty: SemanticType,
    /// `true` iff the value was produced by a literal-load opcode.
    pub literal: bool,
}

impl Default for AbstractRegister {
    fn default() -> Self {
        Self {
            ty: SemanticType::Unknown,
            literal: false,
        }
    }
}

/// Fixed-size abstract register file.
///
/// Every register starts as `(Unknown, false)`. The file is created fresh
/// at the start of a `validate()` call and dropped at the end; nothing
/// survives across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [AbstractRegister; NR_REG],
}

impl RegisterFile {
    /// A freshly initialized file: every register `(Unknown, false)`.
    pub fn new() -> Self {
        Self {
            regs: [AbstractRegister::default(); NR_REG],
        }
    }

    /// Number of registers in this file.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// `true` if this file has no registers (never true for `NR_REG >= 2`,
    /// kept for the usual `len`/`is_empty` pairing).
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Read register `i`. Fails if `i` is not a valid index into this
    /// file (including the `INVALID_REG` wire sentinel).
    pub fn read(&self, i: u8) -> Option<AbstractRegister> {
        if i as usize >= self.regs.len() || i == INVALID_REG {
            None
        } else {
            Some(self.regs[i as usize])
        }
    }

    /// Overwrite register `i`. Panics if `i` is out of range; callers are
    /// expected to have validated the index with `read`/admissibility
    /// checks first — this is an internal invariant, not attacker-facing
    /// validation.
    pub fn set(&mut self, i: u8, ty: SemanticType, literal: bool) {
        self.regs[i as usize] = AbstractRegister { ty, literal };
    }

    /// An independent copy of the entire file, for insertion into the
    /// merge-point table.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown_and_non_literal() {
        let regs = RegisterFile::new();
        for i in 0..regs.len() as u8 {
            let r = regs.read(i).unwrap();
            assert_eq!(r.ty, SemanticType::Unknown);
            assert!(!r.literal);
        }
    }

    #[test]
    fn read_rejects_invalid_sentinel_and_out_of_range() {
        let regs = RegisterFile::new();
        assert!(regs.read(INVALID_REG).is_none());
        assert!(regs.read(NR_REG as u8).is_none());
    }

    #[test]
    fn set_then_read_round_trips() {
        let mut regs = RegisterFile::new();
        regs.set(0, SemanticType::S64, true);
        let r = regs.read(0).unwrap();
        assert_eq!(r.ty, SemanticType::S64);
        assert!(r.literal);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut regs = RegisterFile::new();
        let snap = regs.snapshot();
        regs.set(0, SemanticType::Double, false);
        assert_eq!(snap.read(0).unwrap().ty, SemanticType::Unknown);
        assert_eq!(regs.read(0).unwrap().ty, SemanticType::Double);
    }
}
