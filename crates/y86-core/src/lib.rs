//! Core Y86 emulation crate.
//!
//! A pedagogical 12-opcode ISA modelled on x86-64: flat 64 KiB
//! byte-addressed memory, sixteen 64-bit registers, condition codes, and a
//! status register stepped by a five-stage sequential tick.

/// Shared ISA tables and binary-encoding helpers.
pub mod isa;
pub use isa::{AluFn, Cond, Opcode, MNEMONIC_TABLE, REG_NONE};

/// Flat byte-addressed memory with little-endian quadword access.
pub mod memory;
pub use memory::{Memory, OutOfRange, MEMORY_SIZE, QUAD_BYTES};

/// Architectural CPU state primitives.
pub mod state;
pub use state::{CondCodes, Register, RegisterFile, Status, REGISTER_COUNT};

/// Fetch-side instruction decoding.
pub mod decoder;
pub use decoder::{decode, instruction_len, DecodeError, InstKind, Instr};

/// The five-stage execution engine.
pub mod cpu;
pub use cpu::Cpu;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
