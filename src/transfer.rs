//! The transfer function: given an admissible instruction and the state
//! flowing into it, produce the state(s) flowing out. Mirrors §4.5 — this
//! is the one place register writes happen; `typecheck` only ever reads.

use crate::instruction::Instruction;
use crate::registers::RegisterFile;
use crate::types::SemanticType;

/// Where control flows after executing `inst` at `offset` with length
/// `inst_len`, together with the state that should flow along each edge.
pub enum Successors {
    /// Falls through to `offset + inst_len`, carrying `regs`.
    FallThrough { next: u32 },
    /// `Return`: the sweep stops here. Any merge targets still pending
    /// afterwards are reported as a residual-merge failure by the driver.
    Terminal,
    /// A conditional branch: falls through to `offset + inst_len`, and
    /// additionally deposits `regs` (snapshotted) into the merge-point
    /// table at `target`.
    Branch { next: u32, target: u16 },
}

/// Apply `inst`'s effect to `regs` in place and report where control goes
/// next. Caller has already run `typecheck::check` against the same
/// `(regs, offset, inst)` triple, so writes here never need to re-derive
/// admissibility.
pub fn apply(regs: &mut RegisterFile, offset: u32, inst_len: u32, inst: &Instruction) -> Successors {
    use Instruction::*;

    let next = offset + inst_len;

    match *inst {
        Return => Successors::Terminal,

        And { skip_offset } | Or { skip_offset } => {
            // R0 already verified S64 by typecheck; consumed, not redefined.
            Successors::Branch {
                next,
                target: skip_offset,
            }
        }

        CompareGeneric(_) | CompareString(_) | CompareDouble(_) | CompareS64(_) => {
            regs.set(crate::limits::R0, SemanticType::S64, false);
            Successors::FallThrough { next }
        }

        UnaryGeneric { .. } => {
            // R0's incoming type already satisfied `is_numeric()`; a
            // DOUBLE operand narrows to S64 here, so the destination
            // always becomes S64 regardless of which numeric type fed it.
            regs.set(crate::limits::R0, SemanticType::S64, false);
            Successors::FallThrough { next }
        }
        UnaryS64 { .. } | UnaryDouble { .. } => {
            // Specialized families are type-preserving: R0's incoming
            // type already satisfied the family's requirement, so no
            // write is needed beyond what typecheck already confirmed.
            Successors::FallThrough { next }
        }

        LoadFieldRefString { reg, .. } => {
            regs.set(reg, SemanticType::String, false);
            Successors::FallThrough { next }
        }
        LoadFieldRefSequence { reg, .. } => {
            regs.set(reg, SemanticType::String, false);
            Successors::FallThrough { next }
        }
        LoadFieldRefS64 { reg, .. } => {
            regs.set(reg, SemanticType::S64, false);
            Successors::FallThrough { next }
        }
        LoadFieldRefDouble { reg, .. } => {
            regs.set(reg, SemanticType::Double, false);
            Successors::FallThrough { next }
        }

        LoadString { reg, .. } => {
            regs.set(reg, SemanticType::String, true);
            Successors::FallThrough { next }
        }
        LoadS64 { reg, .. } => {
            regs.set(reg, SemanticType::S64, true);
            Successors::FallThrough { next }
        }
        LoadDouble { reg, .. } => {
            regs.set(reg, SemanticType::Double, true);
            Successors::FallThrough { next }
        }

        CastToS64 { reg } => {
            regs.set(reg, SemanticType::S64, false);
            Successors::FallThrough { next }
        }
        CastDoubleToS64 { reg } => {
            regs.set(reg, SemanticType::S64, false);
            Successors::FallThrough { next }
        }
        CastNop { .. } => Successors::FallThrough { next },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{R0, R1};

    #[test]
    fn compare_writes_s64_into_r0() {
        let mut regs = RegisterFile::new();
        let inst = Instruction::CompareGeneric(crate::instruction::CompareOp::Eq);
        let succ = apply(&mut regs, 0, 1, &inst);
        assert!(matches!(succ, Successors::FallThrough { next: 1 }));
        assert_eq!(regs.read(R0).unwrap().ty, SemanticType::S64);
    }

    #[test]
    fn load_s64_marks_literal() {
        let mut regs = RegisterFile::new();
        let inst = Instruction::LoadS64 { reg: R1, value: 9 };
        apply(&mut regs, 0, 10, &inst);
        let r = regs.read(R1).unwrap();
        assert_eq!(r.ty, SemanticType::S64);
        assert!(r.literal);
    }

    #[test]
    fn and_reports_branch_successor() {
        let mut regs = RegisterFile::new();
        regs.set(R0, SemanticType::S64, false);
        let inst = Instruction::And { skip_offset: 42 };
        let succ = apply(&mut regs, 10, 3, &inst);
        match succ {
            Successors::Branch { next, target } => {
                assert_eq!(next, 13);
                assert_eq!(target, 42);
            }
            _ => panic!("expected a branch successor"),
        }
    }

    #[test]
    fn return_stops_the_sweep() {
        let mut regs = RegisterFile::new();
        let succ = apply(&mut regs, 5, 1, &Instruction::Return);
        assert!(matches!(succ, Successors::Terminal));
    }

    #[test]
    fn load_field_ref_sequence_is_string_type() {
        let mut regs = RegisterFile::new();
        let inst = Instruction::LoadFieldRefSequence {
            reg: R0,
            field_offset: 3,
        };
        apply(&mut regs, 0, 4, &inst);
        assert_eq!(regs.read(R0).unwrap().ty, SemanticType::String);
    }

    #[test]
    fn unary_generic_on_a_double_operand_becomes_s64() {
        let mut regs = RegisterFile::new();
        regs.set(R0, SemanticType::Double, false);
        let inst = Instruction::UnaryGeneric {
            op: crate::instruction::UnaryOp::Not,
            reg: R0,
        };
        apply(&mut regs, 0, 2, &inst);
        assert_eq!(regs.read(R0).unwrap().ty, SemanticType::S64);
    }
}
