use rstest::rstest;
use tracebc::prelude::*;
use tracebc::opcode::consts::*;

fn load_s64(reg: u8, value: i64) -> Vec<u8> {
    let mut buf = vec![OP_LOAD_S64, reg];
    buf.extend_from_slice(&value.to_le_bytes());
    buf
}

fn load_string(reg: u8, s: &[u8]) -> Vec<u8> {
    let mut buf = vec![OP_LOAD_STRING, reg];
    buf.extend_from_slice(s);
    buf.push(0);
    buf
}

#[rstest]
#[case::empty_buffer(vec![])]
#[case::bare_return(vec![OP_RETURN])]
fn accepted_trivial_programs(#[case] buf: Vec<u8>) {
    assert!(validate(&buf).is_ok());
}

#[rstest]
fn generic_compare_accepts_two_literals_of_the_same_family() {
    let mut buf = load_s64(0, 1);
    buf.extend_from_slice(&load_s64(1, 2));
    buf.push(OP_EQ);
    buf.push(OP_RETURN);
    assert!(validate(&buf).is_ok());
}

#[rstest]
fn generic_compare_rejects_numeric_against_string() {
    let mut buf = load_s64(0, 1);
    buf.extend_from_slice(&load_string(1, b"hi"));
    buf.push(OP_EQ);
    buf.push(OP_RETURN);
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

#[rstest]
fn string_specialized_compare_rejects_non_string_operand() {
    let mut buf = load_string(0, b"a");
    buf.extend_from_slice(&load_s64(1, 1));
    buf.push(OP_EQ_STRING);
    buf.push(OP_RETURN);
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

#[rstest]
fn double_specialized_compare_rejects_two_s64_operands() {
    let mut buf = load_s64(0, 1);
    buf.extend_from_slice(&load_s64(1, 2));
    buf.push(OP_EQ_DOUBLE);
    buf.push(OP_RETURN);
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

#[rstest]
fn unary_on_a_register_other_than_r0_is_rejected() {
    let mut buf = load_s64(0, 1);
    buf.extend_from_slice(&load_s64(1, 2));
    buf.push(OP_UNARY_NOT);
    buf.push(1); // reg = R1, not R0
    buf.push(OP_RETURN);
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::RegIndex { .. }));
}

#[rstest]
fn cast_to_s64_accepts_double_operand() {
    let mut buf = vec![OP_LOAD_DOUBLE, 0];
    buf.extend_from_slice(&1.5f64.to_le_bytes());
    buf.push(OP_CAST_TO_S64);
    buf.push(0);
    buf.push(OP_RETURN);
    assert!(validate(&buf).is_ok());
}

#[rstest]
fn cast_double_to_s64_rejects_s64_operand() {
    let mut buf = load_s64(0, 1);
    buf.push(OP_CAST_DOUBLE_TO_S64);
    buf.push(0);
    buf.push(OP_RETURN);
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

#[rstest]
fn forward_branch_to_a_join_both_paths_agree_on_is_accepted() {
    // AND r0(S64) -> skip over a CAST_NOP else arm straight to the join
    // RETURN; both the branch snapshot and the fall-through state have
    // r0 = S64 by the time they reach it.
    let mut buf = load_s64(0, 1);
    let and_offset = buf.len() as u16;
    buf.push(OP_AND);
    let target = and_offset + 3 + 2; // else arm is CAST_NOP (2 bytes)
    buf.extend_from_slice(&target.to_le_bytes());
    buf.push(OP_CAST_NOP);
    buf.push(0);
    buf.push(OP_RETURN); // join point
    assert_eq!(buf.len(), target as usize + 1);
    assert!(validate(&buf).is_ok());
}

#[rstest]
fn branch_landing_after_the_first_return_is_never_visited() {
    // The driver stops at the first RETURN it reaches; a branch whose
    // target lies past it is therefore left unresolved.
    let mut buf = load_s64(0, 1);
    buf.push(OP_AND);
    let past_return = buf.len() as u16 + 2 + 1;
    buf.extend_from_slice(&past_return.to_le_bytes());
    buf.push(OP_RETURN);
    buf.push(OP_RETURN); // never reached
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::ResidualMerge { .. }));
}

#[rstest]
fn branch_target_never_reached_is_residual_merge() {
    let mut buf = load_s64(0, 1);
    buf.push(OP_AND);
    buf.extend_from_slice(&0xffffu16.to_le_bytes());
    buf.push(OP_RETURN);
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::ResidualMerge { .. }));
}

#[rstest]
fn unsupported_reserved_opcode_is_distinct_from_unknown_opcode() {
    let unsupported = validate(&[OP_MUL]).unwrap_err();
    let unknown = validate(&[0xaa]).unwrap_err();
    assert!(matches!(unsupported, ValidationError::UnsupportedOpcode { .. }));
    assert!(matches!(unknown, ValidationError::UnknownOpcode { .. }));
}

#[rstest]
fn truncated_load_string_without_terminator_is_a_bounds_error() {
    let mut buf = vec![OP_LOAD_STRING, 0];
    buf.extend_from_slice(b"no terminator");
    let err = validate(&buf).unwrap_err();
    assert!(matches!(err, ValidationError::Bounds { .. }));
}

#[rstest]
fn buffer_past_the_configured_maximum_is_rejected_before_decoding() {
    let limits = Limits {
        max_bytecode_len: 4,
        ..Limits::default()
    };
    let buf = vec![OP_RETURN; 5];
    let err = validate_with_limits(&buf, &limits).unwrap_err();
    assert!(matches!(err, ValidationError::Bounds { .. }));
}
