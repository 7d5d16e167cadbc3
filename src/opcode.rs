//! The closed set of wire opcode bytes.
//!
//! Mirrors the `OpcodeRepr`/`Opcode` split in `fuel-asm`: a plain
//! `#[repr(u8)]` enum over every byte value the format recognizes,
//! including the ones that must always be rejected (reserved arithmetic,
//! generic `LOAD_FIELD_REF`). Recognizing reserved opcodes explicitly is
//! what lets the decoder tell `E_UNSUPPORTED_OPCODE` apart from
//! `E_UNKNOWN_OPCODE`.

use core::convert::TryFrom;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod consts {
    //! Byte values for each opcode, grouped by family.

    // Control / logical branching.
    pub const OP_RETURN: u8 = 0x00;
    pub const OP_AND: u8 = 0x01;
    pub const OP_OR: u8 = 0x02;

    // Generic comparisons.
    pub const OP_EQ: u8 = 0x10;
    pub const OP_NE: u8 = 0x11;
    pub const OP_GT: u8 = 0x12;
    pub const OP_LT: u8 = 0x13;
    pub const OP_GE: u8 = 0x14;
    pub const OP_LE: u8 = 0x15;

    // String-specialized comparisons.
    pub const OP_EQ_STRING: u8 = 0x16;
    pub const OP_NE_STRING: u8 = 0x17;
    pub const OP_GT_STRING: u8 = 0x18;
    pub const OP_LT_STRING: u8 = 0x19;
    pub const OP_GE_STRING: u8 = 0x1a;
    pub const OP_LE_STRING: u8 = 0x1b;

    // S64-specialized comparisons.
    pub const OP_EQ_S64: u8 = 0x1c;
    pub const OP_NE_S64: u8 = 0x1d;
    pub const OP_GT_S64: u8 = 0x1e;
    pub const OP_LT_S64: u8 = 0x1f;
    pub const OP_GE_S64: u8 = 0x20;
    pub const OP_LE_S64: u8 = 0x21;

    // Double-specialized comparisons.
    pub const OP_EQ_DOUBLE: u8 = 0x22;
    pub const OP_NE_DOUBLE: u8 = 0x23;
    pub const OP_GT_DOUBLE: u8 = 0x24;
    pub const OP_LT_DOUBLE: u8 = 0x25;
    pub const OP_GE_DOUBLE: u8 = 0x26;
    pub const OP_LE_DOUBLE: u8 = 0x27;

    // Reserved arithmetic. Always unsupported.
    pub const OP_MUL: u8 = 0x30;
    pub const OP_DIV: u8 = 0x31;
    pub const OP_MOD: u8 = 0x32;
    pub const OP_PLUS: u8 = 0x33;
    pub const OP_MINUS: u8 = 0x34;
    pub const OP_RSHIFT: u8 = 0x35;
    pub const OP_LSHIFT: u8 = 0x36;
    pub const OP_BIN_AND: u8 = 0x37;
    pub const OP_BIN_OR: u8 = 0x38;
    pub const OP_BIN_XOR: u8 = 0x39;

    // Generic unary.
    pub const OP_UNARY_PLUS: u8 = 0x40;
    pub const OP_UNARY_MINUS: u8 = 0x41;
    pub const OP_UNARY_NOT: u8 = 0x42;

    // S64-specialized unary.
    pub const OP_UNARY_PLUS_S64: u8 = 0x43;
    pub const OP_UNARY_MINUS_S64: u8 = 0x44;
    pub const OP_UNARY_NOT_S64: u8 = 0x45;

    // Double-specialized unary.
    pub const OP_UNARY_PLUS_DOUBLE: u8 = 0x46;
    pub const OP_UNARY_MINUS_DOUBLE: u8 = 0x47;
    pub const OP_UNARY_NOT_DOUBLE: u8 = 0x48;

    // Loads.
    pub const OP_LOAD_FIELD_REF: u8 = 0x50;
    pub const OP_LOAD_FIELD_REF_STRING: u8 = 0x51;
    pub const OP_LOAD_FIELD_REF_SEQUENCE: u8 = 0x52;
    pub const OP_LOAD_FIELD_REF_S64: u8 = 0x53;
    pub const OP_LOAD_FIELD_REF_DOUBLE: u8 = 0x54;
    pub const OP_LOAD_STRING: u8 = 0x55;
    pub const OP_LOAD_S64: u8 = 0x56;
    pub const OP_LOAD_DOUBLE: u8 = 0x57;

    // Casts.
    pub const OP_CAST_TO_S64: u8 = 0x60;
    pub const OP_CAST_DOUBLE_TO_S64: u8 = 0x61;
    pub const OP_CAST_NOP: u8 = 0x62;
}

use consts::*;

/// A recognized wire opcode byte, including the reserved ones that must
/// always be rejected. Used as the `opcode` field of error variants, so it
/// stays `Copy` and carries no operand payload — see `crate::instruction`
/// for the decoded, operand-bearing representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "strum", derive(strum::EnumIter))]
#[repr(u8)]
#[non_exhaustive]
pub enum Opcode {
    Return = OP_RETURN,
    And = OP_AND,
    Or = OP_OR,

    Eq = OP_EQ,
    Ne = OP_NE,
    Gt = OP_GT,
    Lt = OP_LT,
    Ge = OP_GE,
    Le = OP_LE,

    EqString = OP_EQ_STRING,
    NeString = OP_NE_STRING,
    GtString = OP_GT_STRING,
    LtString = OP_LT_STRING,
    GeString = OP_GE_STRING,
    LeString = OP_LE_STRING,

    EqS64 = OP_EQ_S64,
    NeS64 = OP_NE_S64,
    GtS64 = OP_GT_S64,
    LtS64 = OP_LT_S64,
    GeS64 = OP_GE_S64,
    LeS64 = OP_LE_S64,

    EqDouble = OP_EQ_DOUBLE,
    NeDouble = OP_NE_DOUBLE,
    GtDouble = OP_GT_DOUBLE,
    LtDouble = OP_LT_DOUBLE,
    GeDouble = OP_GE_DOUBLE,
    LeDouble = OP_LE_DOUBLE,

    /// Reserved: unsupported, always rejected.
    Mul = OP_MUL,
    /// Reserved: unsupported, always rejected.
    Div = OP_DIV,
    /// Reserved: unsupported, always rejected.
    Mod = OP_MOD,
    /// Reserved: unsupported, always rejected.
    Plus = OP_PLUS,
    /// Reserved: unsupported, always rejected.
    Minus = OP_MINUS,
    /// Reserved: unsupported, always rejected.
    Rshift = OP_RSHIFT,
    /// Reserved: unsupported, always rejected.
    Lshift = OP_LSHIFT,
    /// Reserved: unsupported, always rejected.
    BinAnd = OP_BIN_AND,
    /// Reserved: unsupported, always rejected.
    BinOr = OP_BIN_OR,
    /// Reserved: unsupported, always rejected.
    BinXor = OP_BIN_XOR,

    UnaryPlus = OP_UNARY_PLUS,
    UnaryMinus = OP_UNARY_MINUS,
    UnaryNot = OP_UNARY_NOT,

    UnaryPlusS64 = OP_UNARY_PLUS_S64,
    UnaryMinusS64 = OP_UNARY_MINUS_S64,
    UnaryNotS64 = OP_UNARY_NOT_S64,

    UnaryPlusDouble = OP_UNARY_PLUS_DOUBLE,
    UnaryMinusDouble = OP_UNARY_MINUS_DOUBLE,
    UnaryNotDouble = OP_UNARY_NOT_DOUBLE,

    /// Reserved: unsupported, always rejected.
    LoadFieldRef = OP_LOAD_FIELD_REF,
    LoadFieldRefString = OP_LOAD_FIELD_REF_STRING,
    LoadFieldRefSequence = OP_LOAD_FIELD_REF_SEQUENCE,
    LoadFieldRefS64 = OP_LOAD_FIELD_REF_S64,
    LoadFieldRefDouble = OP_LOAD_FIELD_REF_DOUBLE,
    LoadString = OP_LOAD_STRING,
    LoadS64 = OP_LOAD_S64,
    LoadDouble = OP_LOAD_DOUBLE,

    CastToS64 = OP_CAST_TO_S64,
    CastDoubleToS64 = OP_CAST_DOUBLE_TO_S64,
    CastNop = OP_CAST_NOP,
}

impl Opcode {
    /// `true` for the opcodes the decoder must reject with
    /// `E_UNSUPPORTED_OPCODE` rather than interpret.
    pub const fn is_reserved(self) -> bool {
        matches!(
            self,
            Self::Mul
                | Self::Div
                | Self::Mod
                | Self::Plus
                | Self::Minus
                | Self::Rshift
                | Self::Lshift
                | Self::BinAnd
                | Self::BinOr
                | Self::BinXor
                | Self::LoadFieldRef
        )
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ();

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            OP_RETURN => Self::Return,
            OP_AND => Self::And,
            OP_OR => Self::Or,

            OP_EQ => Self::Eq,
            OP_NE => Self::Ne,
            OP_GT => Self::Gt,
            OP_LT => Self::Lt,
            OP_GE => Self::Ge,
            OP_LE => Self::Le,

            OP_EQ_STRING => Self::EqString,
            OP_NE_STRING => Self::NeString,
            OP_GT_STRING => Self::GtString,
            OP_LT_STRING => Self::LtString,
            OP_GE_STRING => Self::GeString,
            OP_LE_STRING => Self::LeString,

            OP_EQ_S64 => Self::EqS64,
            OP_NE_S64 => Self::NeS64,
            OP_GT_S64 => Self::GtS64,
            OP_LT_S64 => Self::LtS64,
            OP_GE_S64 => Self::GeS64,
            OP_LE_S64 => Self::LeS64,

            OP_EQ_DOUBLE => Self::EqDouble,
            OP_NE_DOUBLE => Self::NeDouble,
            OP_GT_DOUBLE => Self::GtDouble,
            OP_LT_DOUBLE => Self::LtDouble,
            OP_GE_DOUBLE => Self::GeDouble,
            OP_LE_DOUBLE => Self::LeDouble,

            OP_MUL => Self::Mul,
            OP_DIV => Self::Div,
            OP_MOD => Self::Mod,
            OP_PLUS => Self::Plus,
            OP_MINUS => Self::Minus,
            OP_RSHIFT => Self::Rshift,
            OP_LSHIFT => Self::Lshift,
            OP_BIN_AND => Self::BinAnd,
            OP_BIN_OR => Self::BinOr,
            OP_BIN_XOR => Self::BinXor,

            OP_UNARY_PLUS => Self::UnaryPlus,
            OP_UNARY_MINUS => Self::UnaryMinus,
            OP_UNARY_NOT => Self::UnaryNot,

            OP_UNARY_PLUS_S64 => Self::UnaryPlusS64,
            OP_UNARY_MINUS_S64 => Self::UnaryMinusS64,
            OP_UNARY_NOT_S64 => Self::UnaryNotS64,

            OP_UNARY_PLUS_DOUBLE => Self::UnaryPlusDouble,
            OP_UNARY_MINUS_DOUBLE => Self::UnaryMinusDouble,
            OP_UNARY_NOT_DOUBLE => Self::UnaryNotDouble,

            OP_LOAD_FIELD_REF => Self::LoadFieldRef,
            OP_LOAD_FIELD_REF_STRING => Self::LoadFieldRefString,
            OP_LOAD_FIELD_REF_SEQUENCE => Self::LoadFieldRefSequence,
            OP_LOAD_FIELD_REF_S64 => Self::LoadFieldRefS64,
            OP_LOAD_FIELD_REF_DOUBLE => Self::LoadFieldRefDouble,
            OP_LOAD_STRING => Self::LoadString,
            OP_LOAD_S64 => Self::LoadS64,
            OP_LOAD_DOUBLE => Self::LoadDouble,

            OP_CAST_TO_S64 => Self::CastToS64,
            OP_CAST_DOUBLE_TO_S64 => Self::CastDoubleToS64,
            OP_CAST_NOP => Self::CastNop,

            _ => return Err(()),
        })
    }
}
