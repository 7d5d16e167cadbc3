//! The admissibility table: per-opcode predicates over the abstract
//! register file. See §4.4 of the design — this module is deliberately
//! the one place that table lives, rather than being spread across
//! decode/transfer.

use crate::error::ValidationError;
use crate::instruction::Instruction;
use crate::limits::{R0, R1};
use crate::opcode::Opcode;
use crate::registers::{AbstractRegister, RegisterFile};
use crate::types::SemanticType;

fn reg_at(regs: &RegisterFile, offset: u32, reg: u8) -> Result<AbstractRegister, ValidationError> {
    regs.read(reg).ok_or(ValidationError::RegIndex { offset, reg })
}

/// Destination of comparisons and unary ops is always `R0` in this wire
/// encoding. Rather than silently accept and ignore an arbitrary `reg`
/// byte, require it to literally name `R0`.
fn require_r0(offset: u32, reg: u8) -> Result<(), ValidationError> {
    if reg == R0 {
        Ok(())
    } else {
        Err(ValidationError::RegIndex { offset, reg })
    }
}

fn mismatch(offset: u32, opcode: Opcode, r0: SemanticType, r1: SemanticType) -> ValidationError {
    ValidationError::TypeMismatch { offset, opcode, r0, r1 }
}

/// Check that `inst`, occurring at `offset`, is admissible against `regs`
/// (the state flowing into it — either the fall-through state or a
/// drained merge-point snapshot).
pub fn check(regs: &RegisterFile, offset: u32, inst: &Instruction) -> Result<(), ValidationError> {
    use Instruction::*;

    match *inst {
        Return => Ok(()),

        And { skip_offset } | Or { skip_offset } => {
            let r0 = reg_at(regs, offset, R0)?;
            if r0.ty != SemanticType::S64 {
                let r1 = reg_at(regs, offset, R1)?;
                return Err(mismatch(offset, logical_opcode(inst), r0.ty, r1.ty));
            }
            if skip_offset as u32 <= offset {
                return Err(ValidationError::Loop { offset, skip_offset });
            }
            Ok(())
        }

        CompareGeneric(op) => {
            let r0 = reg_at(regs, offset, R0)?;
            let r1 = reg_at(regs, offset, R1)?;
            let ok = (r0.ty.is_numeric() && r1.ty.is_numeric())
                || (r0.ty == SemanticType::String && r1.ty == SemanticType::String);
            if ok {
                Ok(())
            } else {
                Err(mismatch(offset, compare_opcode_generic(op), r0.ty, r1.ty))
            }
        }

        CompareString(op) => {
            let r0 = reg_at(regs, offset, R0)?;
            let r1 = reg_at(regs, offset, R1)?;
            if r0.ty == SemanticType::String && r1.ty == SemanticType::String {
                Ok(())
            } else {
                Err(mismatch(offset, compare_opcode_string(op), r0.ty, r1.ty))
            }
        }

        CompareS64(op) => {
            let r0 = reg_at(regs, offset, R0)?;
            let r1 = reg_at(regs, offset, R1)?;
            if r0.ty == SemanticType::S64 && r1.ty == SemanticType::S64 {
                Ok(())
            } else {
                Err(mismatch(offset, compare_opcode_s64(op), r0.ty, r1.ty))
            }
        }

        CompareDouble(op) => {
            let r0 = reg_at(regs, offset, R0)?;
            let r1 = reg_at(regs, offset, R1)?;
            let both_numeric = r0.ty.is_numeric() && r1.ty.is_numeric();
            let at_least_one_double = r0.ty == SemanticType::Double || r1.ty == SemanticType::Double;
            if both_numeric && at_least_one_double {
                Ok(())
            } else {
                Err(mismatch(offset, compare_opcode_double(op), r0.ty, r1.ty))
            }
        }

        UnaryGeneric { reg, .. } => {
            require_r0(offset, reg)?;
            let r0 = reg_at(regs, offset, R0)?;
            if r0.ty.is_numeric() {
                Ok(())
            } else {
                Err(mismatch(offset, Opcode::UnaryPlus, r0.ty, r0.ty))
            }
        }
        UnaryS64 { reg, .. } => {
            require_r0(offset, reg)?;
            let r0 = reg_at(regs, offset, R0)?;
            if r0.ty == SemanticType::S64 {
                Ok(())
            } else {
                Err(mismatch(offset, Opcode::UnaryPlusS64, r0.ty, r0.ty))
            }
        }
        UnaryDouble { reg, .. } => {
            require_r0(offset, reg)?;
            let r0 = reg_at(regs, offset, R0)?;
            if r0.ty == SemanticType::Double {
                Ok(())
            } else {
                Err(mismatch(offset, Opcode::UnaryPlusDouble, r0.ty, r0.ty))
            }
        }

        LoadFieldRefString { reg, .. }
        | LoadFieldRefSequence { reg, .. }
        | LoadFieldRefS64 { reg, .. }
        | LoadFieldRefDouble { reg, .. } => {
            reg_at(regs, offset, reg)?;
            Ok(())
        }
        LoadString { reg, .. } | LoadS64 { reg, .. } | LoadDouble { reg, .. } => {
            reg_at(regs, offset, reg)?;
            Ok(())
        }

        CastToS64 { reg } => {
            let r = reg_at(regs, offset, reg)?;
            if r.ty.is_numeric() {
                Ok(())
            } else {
                Err(mismatch(offset, Opcode::CastToS64, r.ty, r.ty))
            }
        }
        CastDoubleToS64 { reg } => {
            let r = reg_at(regs, offset, reg)?;
            if r.ty == SemanticType::Double {
                Ok(())
            } else {
                Err(mismatch(offset, Opcode::CastDoubleToS64, r.ty, r.ty))
            }
        }
        CastNop { reg } => {
            reg_at(regs, offset, reg)?;
            Ok(())
        }
    }
}

fn logical_opcode(inst: &Instruction) -> Opcode {
    match inst {
        Instruction::And { .. } => Opcode::And,
        Instruction::Or { .. } => Opcode::Or,
        _ => unreachable!(),
    }
}

fn compare_opcode_generic(op: crate::instruction::CompareOp) -> Opcode {
    use crate::instruction::CompareOp::*;
    match op {
        Eq => Opcode::Eq,
        Ne => Opcode::Ne,
        Gt => Opcode::Gt,
        Lt => Opcode::Lt,
        Ge => Opcode::Ge,
        Le => Opcode::Le,
    }
}

fn compare_opcode_string(op: crate::instruction::CompareOp) -> Opcode {
    use crate::instruction::CompareOp::*;
    match op {
        Eq => Opcode::EqString,
        Ne => Opcode::NeString,
        Gt => Opcode::GtString,
        Lt => Opcode::LtString,
        Ge => Opcode::GeString,
        Le => Opcode::LeString,
    }
}

fn compare_opcode_s64(op: crate::instruction::CompareOp) -> Opcode {
    use crate::instruction::CompareOp::*;
    match op {
        Eq => Opcode::EqS64,
        Ne => Opcode::NeS64,
        Gt => Opcode::GtS64,
        Lt => Opcode::LtS64,
        Ge => Opcode::GeS64,
        Le => Opcode::LeS64,
    }
}

fn compare_opcode_double(op: crate::instruction::CompareOp) -> Opcode {
    use crate::instruction::CompareOp::*;
    match op {
        Eq => Opcode::EqDouble,
        Ne => Opcode::NeDouble,
        Gt => Opcode::GtDouble,
        Lt => Opcode::LtDouble,
        Ge => Opcode::GeDouble,
        Le => Opcode::LeDouble,
    }
}
