//! Deterministic ISA tables shared by the CPU decoder and the assembler.
//!
//! The byte layout of every instruction is defined exactly once, here. Both
//! sides of the system (the encoder in `y86-asm` and the fetch stage in
//! [`crate::cpu`]) resolve against these tables, so the wire format cannot
//! drift between them.

/// Register-field value meaning "no register" (`irmovq`'s `rA`, the unused
/// `rB` of `pushq`/`popq`).
pub const REG_NONE: u8 = 0xF;

/// Primary opcode values (high nibble of instruction byte 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    Halt = 0x0,
    Nop = 0x1,
    Rrmovq = 0x2,
    Irmovq = 0x3,
    Rmmovq = 0x4,
    Mrmovq = 0x5,
    Opq = 0x6,
    Jxx = 0x7,
    Call = 0x8,
    Ret = 0x9,
    Pushq = 0xA,
    Popq = 0xB,
}

impl Opcode {
    /// Converts a 4-bit opcode value into an assigned opcode.
    ///
    /// `None` means the nibble is unassigned; fetching such a byte is an
    /// `INS` fault.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Halt),
            0x1 => Some(Self::Nop),
            0x2 => Some(Self::Rrmovq),
            0x3 => Some(Self::Irmovq),
            0x4 => Some(Self::Rmmovq),
            0x5 => Some(Self::Mrmovq),
            0x6 => Some(Self::Opq),
            0x7 => Some(Self::Jxx),
            0x8 => Some(Self::Call),
            0x9 => Some(Self::Ret),
            0xA => Some(Self::Pushq),
            0xB => Some(Self::Popq),
            _ => None,
        }
    }

    /// Returns the opcode as its encoded 4-bit value.
    #[must_use]
    pub const fn as_u4(self) -> u8 {
        self as u8
    }

    /// Encoded instruction length in bytes (1, 2, 9, or 10).
    #[must_use]
    pub const fn size(self) -> u16 {
        match self {
            Self::Halt | Self::Nop | Self::Ret => 1,
            Self::Rrmovq | Self::Opq | Self::Pushq | Self::Popq => 2,
            Self::Jxx | Self::Call => 9,
            Self::Irmovq | Self::Rmmovq | Self::Mrmovq => 10,
        }
    }

    /// Whether byte 1 of the encoding packs the `rA`/`rB` register fields.
    #[must_use]
    pub const fn has_register_byte(self) -> bool {
        matches!(
            self,
            Self::Rrmovq
                | Self::Irmovq
                | Self::Rmmovq
                | Self::Mrmovq
                | Self::Opq
                | Self::Pushq
                | Self::Popq
        )
    }

    /// Byte offset of the 8-byte little-endian `valC` field, if the
    /// instruction carries one.
    #[must_use]
    pub const fn immediate_offset(self) -> Option<usize> {
        match self {
            Self::Irmovq | Self::Rmmovq | Self::Mrmovq => Some(2),
            Self::Jxx | Self::Call => Some(1),
            _ => None,
        }
    }
}

/// ALU function selectors (`opq` fcodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum AluFn {
    Add = 0x0,
    Sub = 0x1,
    And = 0x2,
    Xor = 0x3,
    Mul = 0x4,
    Div = 0x5,
    Mod = 0x6,
}

impl AluFn {
    /// Converts an `opq` fcode nibble. `None` is an `INS` fault.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Add),
            0x1 => Some(Self::Sub),
            0x2 => Some(Self::And),
            0x3 => Some(Self::Xor),
            0x4 => Some(Self::Mul),
            0x5 => Some(Self::Div),
            0x6 => Some(Self::Mod),
            _ => None,
        }
    }
}

/// Jump condition selectors (`jxx` fcodes).
///
/// This is a dedicated enum: the numeric overlap with [`AluFn`] is an
/// encoding accident, not a semantic relationship, so the two are never
/// aliased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Cond {
    Always = 0x0,
    Le = 0x1,
    Lt = 0x2,
    Eq = 0x3,
    Ne = 0x4,
    Ge = 0x5,
    Gt = 0x6,
}

impl Cond {
    /// Converts a `jxx` fcode nibble. `None` is an `INS` fault.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Always),
            0x1 => Some(Self::Le),
            0x2 => Some(Self::Lt),
            0x3 => Some(Self::Eq),
            0x4 => Some(Self::Ne),
            0x5 => Some(Self::Ge),
            0x6 => Some(Self::Gt),
            _ => None,
        }
    }

    /// Evaluates the condition against the zero and sign flags.
    #[must_use]
    pub const fn holds(self, z: bool, s: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Le => z || s,
            Self::Lt => s,
            Self::Eq => z,
            Self::Ne => !z,
            Self::Ge => !s,
            Self::Gt => !z && !s,
        }
    }
}

/// Single source-of-truth mnemonic table: `(mnemonic, opcode, fcode)`.
///
/// Any mnemonic not present here is not an instruction.
pub const MNEMONIC_TABLE: &[(&str, Opcode, u8)] = &[
    ("halt", Opcode::Halt, 0x0),
    ("nop", Opcode::Nop, 0x0),
    ("rrmovq", Opcode::Rrmovq, 0x0),
    ("irmovq", Opcode::Irmovq, 0x0),
    ("rmmovq", Opcode::Rmmovq, 0x0),
    ("mrmovq", Opcode::Mrmovq, 0x0),
    ("addq", Opcode::Opq, AluFn::Add as u8),
    ("subq", Opcode::Opq, AluFn::Sub as u8),
    ("andq", Opcode::Opq, AluFn::And as u8),
    ("xorq", Opcode::Opq, AluFn::Xor as u8),
    ("mulq", Opcode::Opq, AluFn::Mul as u8),
    ("divq", Opcode::Opq, AluFn::Div as u8),
    ("modq", Opcode::Opq, AluFn::Mod as u8),
    ("jmp", Opcode::Jxx, Cond::Always as u8),
    ("jle", Opcode::Jxx, Cond::Le as u8),
    ("jl", Opcode::Jxx, Cond::Lt as u8),
    ("je", Opcode::Jxx, Cond::Eq as u8),
    ("jne", Opcode::Jxx, Cond::Ne as u8),
    ("jge", Opcode::Jxx, Cond::Ge as u8),
    ("jg", Opcode::Jxx, Cond::Gt as u8),
    ("call", Opcode::Call, 0x0),
    ("ret", Opcode::Ret, 0x0),
    ("pushq", Opcode::Pushq, 0x0),
    ("popq", Opcode::Popq, 0x0),
];

/// Resolves a mnemonic to its `(opcode, fcode)` pair.
#[must_use]
pub fn lookup_mnemonic(name: &str) -> Option<(Opcode, u8)> {
    MNEMONIC_TABLE
        .iter()
        .find_map(|(mnemonic, opcode, fcode)| (*mnemonic == name).then_some((*opcode, *fcode)))
}

/// Returns true if the lexeme names an instruction.
#[must_use]
pub fn is_mnemonic(name: &str) -> bool {
    lookup_mnemonic(name).is_some()
}

/// Packs two nibbles into one byte (`hi` in the high nibble).
#[must_use]
pub const fn pack_byte(hi: u8, lo: u8) -> u8 {
    (hi << 4) | (lo & 0x0F)
}

/// Splits a byte into its `(high, low)` nibbles.
#[must_use]
pub const fn split_byte(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & 0x0F)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::{
        is_mnemonic, lookup_mnemonic, pack_byte, split_byte, AluFn, Cond, Opcode, MNEMONIC_TABLE,
    };

    #[test]
    fn opcode_roundtrip_is_bijective_for_assigned_values() {
        for bits in 0x0u8..=0xB {
            let opcode = Opcode::from_u4(bits).expect("assigned opcode");
            assert_eq!(opcode.as_u4(), bits);
        }
        for bits in 0xCu8..=0xF {
            assert!(Opcode::from_u4(bits).is_none());
        }
    }

    #[rstest]
    #[case(Opcode::Halt, 1)]
    #[case(Opcode::Nop, 1)]
    #[case(Opcode::Rrmovq, 2)]
    #[case(Opcode::Irmovq, 10)]
    #[case(Opcode::Rmmovq, 10)]
    #[case(Opcode::Mrmovq, 10)]
    #[case(Opcode::Opq, 2)]
    #[case(Opcode::Jxx, 9)]
    #[case(Opcode::Call, 9)]
    #[case(Opcode::Ret, 1)]
    #[case(Opcode::Pushq, 2)]
    #[case(Opcode::Popq, 2)]
    fn size_table_matches_architecture(#[case] opcode: Opcode, #[case] size: u16) {
        assert_eq!(opcode.size(), size);
    }

    #[test]
    fn immediate_offset_is_consistent_with_register_byte() {
        for bits in 0x0u8..=0xB {
            let opcode = Opcode::from_u4(bits).expect("assigned opcode");
            if let Some(offset) = opcode.immediate_offset() {
                let expected = if opcode.has_register_byte() { 2 } else { 1 };
                assert_eq!(offset, expected);
                assert_eq!(usize::from(opcode.size()), offset + 8);
            }
        }
    }

    #[test]
    fn mnemonic_table_is_unique_and_self_consistent() {
        let names: HashSet<_> = MNEMONIC_TABLE.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(names.len(), MNEMONIC_TABLE.len());

        for (name, opcode, fcode) in MNEMONIC_TABLE {
            assert_eq!(lookup_mnemonic(name), Some((*opcode, *fcode)));
            match opcode {
                Opcode::Opq => assert!(AluFn::from_u4(*fcode).is_some()),
                Opcode::Jxx => assert!(Cond::from_u4(*fcode).is_some()),
                _ => assert_eq!(*fcode, 0),
            }
        }
    }

    #[test]
    fn unknown_mnemonics_are_rejected() {
        assert!(!is_mnemonic("movq"));
        assert!(!is_mnemonic("HALT"));
        assert!(!is_mnemonic(""));
    }

    #[rstest]
    #[case(Cond::Always, [true, true, true, true])]
    #[case(Cond::Le, [false, true, true, true])]
    #[case(Cond::Lt, [false, false, true, true])]
    #[case(Cond::Eq, [false, true, false, true])]
    #[case(Cond::Ne, [true, false, true, false])]
    #[case(Cond::Ge, [true, true, false, false])]
    #[case(Cond::Gt, [true, false, false, false])]
    fn condition_predicates_match_flag_table(#[case] cond: Cond, #[case] expected: [bool; 4]) {
        // (z, s) in the order (0,0), (1,0), (0,1), (1,1)
        let inputs = [(false, false), (true, false), (false, true), (true, true)];
        for ((z, s), want) in inputs.into_iter().zip(expected) {
            assert_eq!(cond.holds(z, s), want, "{cond:?} with z={z} s={s}");
        }
    }

    #[test]
    fn nibble_packing_roundtrips() {
        for hi in 0u8..16 {
            for lo in 0u8..16 {
                assert_eq!(split_byte(pack_byte(hi, lo)), (hi, lo));
            }
        }
    }
}
