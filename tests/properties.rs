use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use tracebc::prelude::*;

/// An arbitrary byte buffer, deliberately unconstrained: most generated
/// buffers are expected to be rejected, which is exactly the population
/// the decoder and bounds checker need to be exercised against.
#[derive(Debug, Clone)]
struct RandomBytecode(Vec<u8>);

impl Arbitrary for RandomBytecode {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 256;
        RandomBytecode((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

/// Validation never panics and never loops forever on arbitrary input —
/// it always returns one of the two `Result` variants.
#[quickcheck]
fn never_panics_on_arbitrary_bytes(buf: RandomBytecode) -> bool {
    matches!(validate(&buf.0), Ok(()) | Err(_))
}

/// Validation is a pure function of its input: the same buffer always
/// gets the same verdict.
#[quickcheck]
fn is_idempotent(buf: RandomBytecode) -> bool {
    validate(&buf.0) == validate(&buf.0)
}

/// Injecting a reserved arithmetic opcode as the very first byte is
/// rejected with `E_UNSUPPORTED_OPCODE` regardless of what follows it —
/// the decoder checks reserved status before consuming anything else.
#[quickcheck]
fn leading_reserved_opcode_is_always_unsupported(tail: RandomBytecode) -> bool {
    let mut buf = vec![tracebc::opcode::consts::OP_MUL];
    buf.extend_from_slice(&tail.0);
    matches!(validate(&buf), Err(ValidationError::UnsupportedOpcode { .. }))
}

/// Every buffer longer than the configured maximum is rejected with
/// `E_BOUNDS`, before any byte of it is interpreted.
#[quickcheck]
fn oversized_buffers_are_always_rejected(buf: RandomBytecode) -> bool {
    let limits = Limits {
        max_bytecode_len: 16,
        ..Limits::default()
    };
    if buf.0.len() <= 16 {
        return true;
    }
    matches!(validate_with_limits(&buf.0, &limits), Err(ValidationError::Bounds { .. }))
}

/// An accepted program's `ValidationError` set, if any, is always a
/// single variant from the closed set the crate documents — this is
/// really a compile-time property, exercised here as a smoke check that
/// no arbitrary buffer produces a value the matcher doesn't know about.
#[quickcheck]
fn errors_are_always_from_the_closed_set(buf: RandomBytecode) -> bool {
    match validate(&buf.0) {
        Ok(()) => true,
        Err(
            ValidationError::UnknownOpcode { .. }
            | ValidationError::UnsupportedOpcode { .. }
            | ValidationError::Bounds { .. }
            | ValidationError::RegIndex { .. }
            | ValidationError::TypeMismatch { .. }
            | ValidationError::Loop { .. }
            | ValidationError::ResidualMerge { .. }
            | ValidationError::Oom,
        ) => true,
    }
}
