//! Closed-set semantic types tracked by the abstract interpreter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The flat abstract-interpretation lattice of register types.
///
/// `Unknown` is the bottom element; `S64`, `Double` and `String` are
/// incomparable peaks. The validator never computes a least-upper-bound
/// across these peaks — see the merge-agreement design note in
/// `crate::merge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "strum", derive(strum::EnumIter))]
pub enum SemanticType {
    /// No constraint has been established for this register yet.
    Unknown,
    /// Signed 64-bit integer.
    S64,
    /// IEEE-754 binary64.
    Double,
    /// NUL-terminated byte sequence.
    String,
}

impl SemanticType {
    /// `true` for `S64` and `Double`.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::S64 | Self::Double)
    }
}

/// A register index as it appears on the wire: a raw byte.
///
/// `INVALID_REG` (see [`crate::limits`]) is reserved as an out-of-range
/// sentinel and is never a valid index into the register file.
pub type RawReg = u8;

/// Byte offset into the bytecode buffer, as carried by decoded instructions
/// and error variants.
pub type Offset = u32;
