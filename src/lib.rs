//! Single-pass validation for untrusted tracing-event filter bytecode.
//!
//! [`validate`] proves three properties about a byte buffer before any
//! byte of it is interpreted: every instruction's encoding stays within
//! bounds, every operand register use is admissible for its opcode, and
//! the control-flow graph formed by its branches is an acyclic DAG with
//! only forward edges. Acceptance returns `Ok(())`; rejection returns the
//! first [`ValidationError`] encountered.

pub mod error;
pub mod instruction;
pub mod limits;
pub mod merge;
pub mod opcode;
pub mod registers;
pub mod transfer;
pub mod typecheck;
pub mod validate;

pub mod types;

pub mod prelude {
    pub use crate::error::ValidationError;
    pub use crate::limits::Limits;
    pub use crate::opcode::Opcode;
    pub use crate::types::SemanticType;
    pub use crate::validate::{validate, validate_with_limits};
}

pub use prelude::*;
