//! The driver: §4.7. A single forward sweep over the buffer, threading one
//! live register state plus the merge-point table through `decode` →
//! (merge-points lookup + type check) → `transfer::apply`.

use crate::error::ValidationError;
use crate::instruction::decode;
use crate::limits::Limits;
use crate::merge::MergeTable;
use crate::registers::RegisterFile;
use crate::transfer::{self, Successors};
use crate::typecheck;

/// Validate `buf` against the default [`Limits`].
#[tracing::instrument(level = "debug", skip(buf), fields(len = buf.len()))]
pub fn validate(buf: &[u8]) -> Result<(), ValidationError> {
    validate_with_limits(buf, &Limits::default())
}

/// Validate `buf`, overriding the default limits.
///
/// Proves three things about `buf` in one linear pass: every instruction
/// encoding stays within bounds, every operand register use is admissible
/// for its opcode, and every branch target is reachable without forming a
/// cycle.
#[tracing::instrument(level = "debug", skip(buf, limits), fields(len = buf.len()))]
pub fn validate_with_limits(buf: &[u8], limits: &Limits) -> Result<(), ValidationError> {
    if buf.len() > limits.max_bytecode_len {
        tracing::warn!(len = buf.len(), max = limits.max_bytecode_len, "buffer exceeds configured maximum");
        return Err(ValidationError::Bounds {
            offset: 0,
            needed: buf.len() as u32,
            available: limits.max_bytecode_len as u32,
        });
    }

    let mut regs = RegisterFile::new();
    let mut merges = MergeTable::new();
    let mut pc: usize = 0;

    while pc < buf.len() {
        let offset = pc as u32;
        let (inst, inst_len) = decode(buf, pc)?;
        tracing::trace!(pc, ?inst, "validating instruction");

        // Every snapshot waiting for this offset must independently be
        // admissible for the instruction found here — agreement with the
        // live fall-through state, or with each other, is never required.
        for snapshot in merges.take(offset as u16) {
            typecheck::check(&snapshot, offset, &inst)?;
            tracing::trace!(offset, "merge point resolved");
        }

        typecheck::check(&regs, offset, &inst)?;

        match transfer::apply(&mut regs, offset, inst_len, &inst) {
            Successors::FallThrough { next } => pc = next as usize,
            Successors::Branch { next, target } => {
                merges.insert(target, regs.clone());
                tracing::trace!(target, "merge point recorded");
                pc = next as usize;
            }
            Successors::Terminal => break,
        }
    }

    if !merges.is_empty() {
        let pending = merges.len() as u16;
        tracing::warn!(pending, "validation ended with unresolved merge targets");
        return Err(ValidationError::ResidualMerge { pending });
    }

    tracing::debug!(len = buf.len(), "bytecode accepted");
    Ok(())
}
