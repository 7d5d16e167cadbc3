//! Validator-wide size and count limits.
//!
//! Grounded on `consts.rs` in this codebase: free-standing constants
//! consumed throughout, plus a small overridable bundle for callers (tests
//! included) that need a non-default register count or a tighter length
//! cap.

/// Number of named abstract registers. Per the data model, `R0` and `R1`
/// (indices 0 and 1) always exist and carry arithmetic/comparison operands.
pub const NR_REG: usize = 2;

/// Named index of `R0`.
pub const R0: u8 = 0;

/// Named index of `R1`.
pub const R1: u8 = 1;

/// Out-of-range sentinel for an 8-bit register-index field. This is a
/// property of the wire encoding (one reserved byte value), not of
/// `NR_REG`, so it does not move when `NR_REG` is reconfigured.
pub const INVALID_REG: u8 = 0xff;

/// Upper bound on bytecode length, implied by the 16-bit `skip_offset`
/// field: a branch cannot target an offset that doesn't fit in 16 bits.
/// Buffers longer than this are rejected up front, before a single
/// instruction is decoded.
pub const MAX_BYTECODE_LEN: usize = 1 << 16;

/// Suggested inline capacity for the merge-point table before an
/// implementation may fall back to a linear scan. Purely a performance
/// hint; correctness does not depend on it.
pub const MERGE_TABLE_INLINE_CAPACITY: usize = 128;

/// Overridable subset of the limits above.
///
/// `validate()` is `validate_with_limits(bytecode, &Limits::default())`;
/// embedders that need a different register count or a tighter length cap
/// call `validate_with_limits` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum accepted buffer length, in bytes.
    pub max_bytecode_len: usize,
    /// Number of named abstract registers.
    pub nr_reg: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_bytecode_len: MAX_BYTECODE_LEN,
            nr_reg: NR_REG,
        }
    }
}
