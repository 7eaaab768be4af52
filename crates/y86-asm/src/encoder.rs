//! Instruction byte encoders, one per argument-shape family.
//!
//! These are pure functions over already-resolved operands: the parser
//! resolves registers and labels, then the encoder lays down bytes. Byte
//! layout comes from the shared tables in [`y86_core::isa`], so the CPU
//! decoder reads back exactly what is emitted here.

use y86_core::isa::{pack_byte, Opcode, REG_NONE};

/// `halt`, `nop`, `ret`: `[op.f]`.
#[must_use]
pub fn nullary(opcode: Opcode, fcode: u8) -> Vec<u8> {
    vec![pack_byte(opcode.as_u4(), fcode)]
}

/// `rrmovq`, `opq`: `[op.f, rA.rB]`.
#[must_use]
pub fn register_pair(opcode: Opcode, fcode: u8, ra: u8, rb: u8) -> Vec<u8> {
    vec![pack_byte(opcode.as_u4(), fcode), pack_byte(ra, rb)]
}

/// `pushq`, `popq`: `[op.f, rA.F]`.
#[must_use]
pub fn single_register(opcode: Opcode, fcode: u8, ra: u8) -> Vec<u8> {
    register_pair(opcode, fcode, ra, REG_NONE)
}

/// `irmovq`: `[op.f, F.rB, imm0..imm7]`.
#[must_use]
pub fn irmovq(rb: u8, imm: i64) -> Vec<u8> {
    immediate_form(Opcode::Irmovq, 0, REG_NONE, rb, imm)
}

/// `rmmovq`/`mrmovq`: `[op.f, rA.rB, imm0..imm7]`.
#[must_use]
pub fn memory_form(opcode: Opcode, ra: u8, rb: u8, imm: i64) -> Vec<u8> {
    immediate_form(opcode, 0, ra, rb, imm)
}

/// `jxx`, `call`: `[op.f, dest0..dest7]`.
#[must_use]
pub fn jump(opcode: Opcode, fcode: u8, dest: i64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(9);
    bytes.push(pack_byte(opcode.as_u4(), fcode));
    bytes.extend_from_slice(&dest.to_le_bytes());
    bytes
}

fn immediate_form(opcode: Opcode, fcode: u8, ra: u8, rb: u8, imm: i64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(10);
    bytes.push(pack_byte(opcode.as_u4(), fcode));
    bytes.push(pack_byte(ra, rb));
    bytes.extend_from_slice(&imm.to_le_bytes());
    bytes
}
