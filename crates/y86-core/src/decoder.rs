//! Fetch-side instruction decoding.
//!
//! The fetch stage reads the instruction window out of memory and hands it
//! here; decoding validates the opcode and function code and extracts the
//! register fields and `valC`. Validation failures map to CPU status `INS`.

use thiserror::Error;

use crate::isa::{self, AluFn, Cond, Opcode};
use crate::state::Register;

/// Fully decoded instruction, fused with its function code.
///
/// Fusing makes out-of-range function codes unrepresentable past decode:
/// every `opq` carries a valid [`AluFn`], every `jxx` a valid [`Cond`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstKind {
    /// Stop the CPU.
    Halt,
    /// No effect.
    Nop,
    /// `rB <- rA`.
    Rrmovq,
    /// `rB <- valC`.
    Irmovq,
    /// `M8[rB + valC] <- rA`.
    Rmmovq,
    /// `rA <- M8[rB + valC]`.
    Mrmovq,
    /// `rB <- rB op rA`; writes condition codes.
    Alu(AluFn),
    /// `pc <- valC` when the condition holds.
    Jump(Cond),
    /// Push the return address, `pc <- valC`.
    Call,
    /// Pop the return address into `pc`.
    Ret,
    /// `%rsp -= 8; M8[%rsp] <- rA`.
    Pushq,
    /// `rA <- M8[%rsp]; %rsp += 8`.
    Popq,
}

/// Output of the fetch stage: the decoded instruction descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    /// Opcode and function code, fused.
    pub kind: InstKind,
    /// `rA` field (register slot; `%r15` when the encoding carries none).
    pub ra: Register,
    /// `rB` field (register slot; `%r15` when the encoding carries none).
    pub rb: Register,
    /// Immediate constant, little-endian signed 64-bit.
    pub valc: i64,
    /// Encoded length in bytes.
    pub len: u16,
}

/// Rejected instruction encoding; maps to CPU status `INS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The opcode nibble is unassigned.
    #[error("unknown opcode {opcode:#x}")]
    UnknownOpcode {
        /// Offending opcode nibble.
        opcode: u8,
    },
    /// The function code is out of range for its opcode family.
    #[error("function code {fcode:#x} out of range for opcode {opcode:#x}")]
    FcodeOutOfRange {
        /// Opcode nibble of the instruction.
        opcode: u8,
        /// Offending function code nibble.
        fcode: u8,
    },
}

/// Returns the encoded length of the instruction whose first byte is
/// `first`, or `None` when the opcode nibble is unassigned.
#[must_use]
pub const fn instruction_len(first: u8) -> Option<u16> {
    match Opcode::from_u4(first >> 4) {
        Some(opcode) => Some(opcode.size()),
        None => None,
    }
}

/// Decodes one instruction window into its descriptor.
///
/// `bytes` must be exactly the window selected by [`instruction_len`] for
/// its first byte.
///
/// # Errors
///
/// Returns [`DecodeError`] for an unassigned opcode or an out-of-range
/// function code.
pub fn decode(bytes: &[u8]) -> Result<Instr, DecodeError> {
    let (op_bits, fcode) = isa::split_byte(bytes[0]);
    let opcode = Opcode::from_u4(op_bits).ok_or(DecodeError::UnknownOpcode { opcode: op_bits })?;
    debug_assert_eq!(bytes.len(), usize::from(opcode.size()));

    let bad_fcode = DecodeError::FcodeOutOfRange {
        opcode: op_bits,
        fcode,
    };
    let kind = match opcode {
        Opcode::Opq => InstKind::Alu(AluFn::from_u4(fcode).ok_or(bad_fcode)?),
        Opcode::Jxx => InstKind::Jump(Cond::from_u4(fcode).ok_or(bad_fcode)?),
        _ if fcode != 0 => return Err(bad_fcode),
        Opcode::Halt => InstKind::Halt,
        Opcode::Nop => InstKind::Nop,
        Opcode::Rrmovq => InstKind::Rrmovq,
        Opcode::Irmovq => InstKind::Irmovq,
        Opcode::Rmmovq => InstKind::Rmmovq,
        Opcode::Mrmovq => InstKind::Mrmovq,
        Opcode::Call => InstKind::Call,
        Opcode::Ret => InstKind::Ret,
        Opcode::Pushq => InstKind::Pushq,
        Opcode::Popq => InstKind::Popq,
    };

    let (ra_bits, rb_bits) = if opcode.has_register_byte() {
        isa::split_byte(bytes[1])
    } else {
        (isa::REG_NONE, isa::REG_NONE)
    };

    let valc = match opcode.immediate_offset() {
        Some(offset) => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[offset..offset + 8]);
            i64::from_le_bytes(buf)
        }
        None => 0,
    };

    Ok(Instr {
        kind,
        ra: Register::from_nibble(ra_bits),
        rb: Register::from_nibble(rb_bits),
        valc,
        len: opcode.size(),
    })
}
