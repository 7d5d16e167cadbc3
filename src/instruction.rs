//! Decoding: turns the byte at a program counter into a tagged,
//! operand-bearing [`Instruction`], fusing the bounds check (`E_BOUNDS`)
//! into the same pass rather than decoding blind and checking afterwards.
//!
//! This is the "tagged-variant representation" the design notes recommend
//! in place of a raw opcode-byte switch cascade: the type checker and
//! transfer function both match on `Instruction`, never on a bare `u8`.

use crate::error::ValidationError;
use crate::opcode::Opcode;

/// A fully decoded instruction: opcode plus whatever operands its
/// encoding carries. Comparison families carry no operand — per the wire
/// format, binary ops operate on the implicit `R0`/`R1` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Terminator.
    Return,
    /// Short-circuit AND. Target is absolute.
    And { skip_offset: u16 },
    /// Short-circuit OR. Target is absolute.
    Or { skip_offset: u16 },

    /// Generic `EQ`/`NE`/`GT`/`LT`/`GE`/`LE`, typed at validation time.
    CompareGeneric(CompareOp),
    /// `*_STRING` specialized comparison.
    CompareString(CompareOp),
    /// `*_S64` specialized comparison.
    CompareS64(CompareOp),
    /// `*_DOUBLE` specialized comparison.
    CompareDouble(CompareOp),

    /// Generic `UNARY_PLUS`/`UNARY_MINUS`/`UNARY_NOT`. `reg` is the
    /// operand; the destination is implicitly `R0`.
    UnaryGeneric { op: UnaryOp, reg: u8 },
    /// `UNARY_*_S64`. `reg` is the operand; destination implicitly `R0`.
    UnaryS64 { op: UnaryOp, reg: u8 },
    /// `UNARY_*_DOUBLE`. `reg` is the operand; destination implicitly `R0`.
    UnaryDouble { op: UnaryOp, reg: u8 },

    /// `LOAD_FIELD_REF_STRING`.
    LoadFieldRefString { reg: u8, field_offset: u16 },
    /// `LOAD_FIELD_REF_SEQUENCE`.
    LoadFieldRefSequence { reg: u8, field_offset: u16 },
    /// `LOAD_FIELD_REF_S64`.
    LoadFieldRefS64 { reg: u8, field_offset: u16 },
    /// `LOAD_FIELD_REF_DOUBLE`.
    LoadFieldRefDouble { reg: u8, field_offset: u16 },

    /// `LOAD_STRING`. `len` is the byte length of the literal, excluding
    /// the terminating NUL.
    LoadString { reg: u8, len: u32 },
    /// `LOAD_S64`.
    LoadS64 { reg: u8, value: i64 },
    /// `LOAD_DOUBLE`.
    LoadDouble { reg: u8, value: f64 },

    /// `CAST_TO_S64`.
    CastToS64 { reg: u8 },
    /// `CAST_DOUBLE_TO_S64`.
    CastDoubleToS64 { reg: u8 },
    /// `CAST_NOP`.
    CastNop { reg: u8 },
}

/// The six comparison operators shared by the generic and type-specialized
/// comparison families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

/// The three unary operators shared by the generic and type-specialized
/// unary families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

fn need(offset: u32, buf_len: usize, from: usize, n: usize) -> Result<(), ValidationError> {
    let available = buf_len.saturating_sub(from);
    if n > available {
        Err(ValidationError::Bounds {
            offset,
            needed: n as u32,
            available: available as u32,
        })
    } else {
        Ok(())
    }
}

fn read_u16(buf: &[u8], pc: usize) -> u16 {
    u16::from_le_bytes([buf[pc], buf[pc + 1]])
}

fn read_i64(buf: &[u8], pc: usize) -> i64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[pc..pc + 8]);
    i64::from_le_bytes(bytes)
}

fn read_f64(buf: &[u8], pc: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[pc..pc + 8]);
    f64::from_le_bytes(bytes)
}

/// Decode the instruction at `pc`, returning it along with its total
/// encoded length in bytes. `pc` must be `< buf.len()`.
pub fn decode(buf: &[u8], pc: usize) -> Result<(Instruction, u32), ValidationError> {
    let offset = pc as u32;
    let byte = buf[pc];
    let opcode = Opcode::try_from(byte).map_err(|_| ValidationError::UnknownOpcode { offset, byte })?;

    if opcode.is_reserved() {
        return Err(ValidationError::UnsupportedOpcode { offset, opcode });
    }

    use Opcode::*;
    match opcode {
        Return => Ok((Instruction::Return, 1)),

        And | Or => {
            need(offset, buf.len(), pc + 1, 2)?;
            let skip_offset = read_u16(buf, pc + 1);
            let inst = if opcode == And {
                Instruction::And { skip_offset }
            } else {
                Instruction::Or { skip_offset }
            };
            Ok((inst, 3))
        }

        Eq | Ne | Gt | Lt | Ge | Le => Ok((Instruction::CompareGeneric(compare_op(opcode)), 1)),
        EqString | NeString | GtString | LtString | GeString | LeString => {
            Ok((Instruction::CompareString(compare_op(opcode)), 1))
        }
        EqS64 | NeS64 | GtS64 | LtS64 | GeS64 | LeS64 => Ok((Instruction::CompareS64(compare_op(opcode)), 1)),
        EqDouble | NeDouble | GtDouble | LtDouble | GeDouble | LeDouble => {
            Ok((Instruction::CompareDouble(compare_op(opcode)), 1))
        }

        UnaryPlus | UnaryMinus | UnaryNot => {
            need(offset, buf.len(), pc + 1, 1)?;
            let reg = buf[pc + 1];
            Ok((
                Instruction::UnaryGeneric {
                    op: unary_op(opcode),
                    reg,
                },
                2,
            ))
        }
        UnaryPlusS64 | UnaryMinusS64 | UnaryNotS64 => {
            need(offset, buf.len(), pc + 1, 1)?;
            let reg = buf[pc + 1];
            Ok((
                Instruction::UnaryS64 {
                    op: unary_op(opcode),
                    reg,
                },
                2,
            ))
        }
        UnaryPlusDouble | UnaryMinusDouble | UnaryNotDouble => {
            need(offset, buf.len(), pc + 1, 1)?;
            let reg = buf[pc + 1];
            Ok((
                Instruction::UnaryDouble {
                    op: unary_op(opcode),
                    reg,
                },
                2,
            ))
        }

        LoadFieldRefString | LoadFieldRefSequence | LoadFieldRefS64 | LoadFieldRefDouble => {
            need(offset, buf.len(), pc + 1, 3)?;
            let reg = buf[pc + 1];
            let field_offset = read_u16(buf, pc + 2);
            let inst = match opcode {
                LoadFieldRefString => Instruction::LoadFieldRefString { reg, field_offset },
                LoadFieldRefSequence => Instruction::LoadFieldRefSequence { reg, field_offset },
                LoadFieldRefS64 => Instruction::LoadFieldRefS64 { reg, field_offset },
                LoadFieldRefDouble => Instruction::LoadFieldRefDouble { reg, field_offset },
                _ => unreachable!(),
            };
            Ok((inst, 4))
        }

        LoadString => {
            need(offset, buf.len(), pc + 1, 1)?;
            let reg = buf[pc + 1];
            let payload_start = pc + 2;
            let nul = buf[payload_start..]
                .iter()
                .position(|&b| b == 0)
                .ok_or(ValidationError::Bounds {
                    offset,
                    needed: (buf.len() - payload_start + 1) as u32,
                    available: (buf.len() - payload_start) as u32,
                })?;
            Ok((Instruction::LoadString { reg, len: nul as u32 }, 2 + nul as u32 + 1))
        }

        LoadS64 => {
            need(offset, buf.len(), pc + 1, 9)?;
            let reg = buf[pc + 1];
            let value = read_i64(buf, pc + 2);
            Ok((Instruction::LoadS64 { reg, value }, 10))
        }
        LoadDouble => {
            need(offset, buf.len(), pc + 1, 9)?;
            let reg = buf[pc + 1];
            let value = read_f64(buf, pc + 2);
            Ok((Instruction::LoadDouble { reg, value }, 10))
        }

        CastToS64 => {
            need(offset, buf.len(), pc + 1, 1)?;
            Ok((Instruction::CastToS64 { reg: buf[pc + 1] }, 2))
        }
        CastDoubleToS64 => {
            need(offset, buf.len(), pc + 1, 1)?;
            Ok((Instruction::CastDoubleToS64 { reg: buf[pc + 1] }, 2))
        }
        CastNop => {
            need(offset, buf.len(), pc + 1, 1)?;
            Ok((Instruction::CastNop { reg: buf[pc + 1] }, 2))
        }

        // Reserved opcodes were rejected above; unreachable here.
        Mul | Div | Mod | Plus | Minus | Rshift | Lshift | BinAnd | BinOr | BinXor | LoadFieldRef => unreachable!(),
    }
}

fn compare_op(opcode: Opcode) -> CompareOp {
    use Opcode::*;
    match opcode {
        Eq | EqString | EqS64 | EqDouble => CompareOp::Eq,
        Ne | NeString | NeS64 | NeDouble => CompareOp::Ne,
        Gt | GtString | GtS64 | GtDouble => CompareOp::Gt,
        Lt | LtString | LtS64 | LtDouble => CompareOp::Lt,
        Ge | GeString | GeS64 | GeDouble => CompareOp::Ge,
        Le | LeString | LeS64 | LeDouble => CompareOp::Le,
        _ => unreachable!(),
    }
}

fn unary_op(opcode: Opcode) -> UnaryOp {
    use Opcode::*;
    match opcode {
        UnaryPlus | UnaryPlusS64 | UnaryPlusDouble => UnaryOp::Plus,
        UnaryMinus | UnaryMinusS64 | UnaryMinusDouble => UnaryOp::Minus,
        UnaryNot | UnaryNotS64 | UnaryNotDouble => UnaryOp::Not,
        _ => unreachable!(),
    }
}
