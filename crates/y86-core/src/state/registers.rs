/// Number of architecturally visible general-purpose registers.
pub const REGISTER_COUNT: usize = 16;

/// Architecturally visible general-purpose register identifier.
///
/// `%rsp` sits at index 4. Index 15 names the `%r15` slot and doubles, in
/// instruction encodings only, as the "no register" marker (see
/// [`crate::isa::REG_NONE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    Rax = 0,
    Rcx = 1,
    Rdx = 2,
    Rbx = 3,
    Rsp = 4,
    Rbp = 5,
    Rsi = 6,
    Rdi = 7,
    R8 = 8,
    R9 = 9,
    R10 = 10,
    R11 = 11,
    R12 = 12,
    R13 = 13,
    R14 = 14,
    R15 = 15,
}

impl Register {
    /// Ordered list of all architectural registers.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::Rax,
        Self::Rcx,
        Self::Rdx,
        Self::Rbx,
        Self::Rsp,
        Self::Rbp,
        Self::Rsi,
        Self::Rdi,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
        Self::R15,
    ];

    /// Returns the array index for this register (`0..=15`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 4-bit register field into an architectural register.
    ///
    /// All sixteen field values name a slot, so the conversion is total;
    /// only the low nibble of `bits` is considered.
    #[must_use]
    pub const fn from_nibble(bits: u8) -> Self {
        match bits & 0x0F {
            0x0 => Self::Rax,
            0x1 => Self::Rcx,
            0x2 => Self::Rdx,
            0x3 => Self::Rbx,
            0x4 => Self::Rsp,
            0x5 => Self::Rbp,
            0x6 => Self::Rsi,
            0x7 => Self::Rdi,
            0x8 => Self::R8,
            0x9 => Self::R9,
            0xA => Self::R10,
            0xB => Self::R11,
            0xC => Self::R12,
            0xD => Self::R13,
            0xE => Self::R14,
            _ => Self::R15,
        }
    }

    /// Canonical assembly name, `%`-prefixed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rax => "%rax",
            Self::Rcx => "%rcx",
            Self::Rdx => "%rdx",
            Self::Rbx => "%rbx",
            Self::Rsp => "%rsp",
            Self::Rbp => "%rbp",
            Self::Rsi => "%rsi",
            Self::Rdi => "%rdi",
            Self::R8 => "%r8",
            Self::R9 => "%r9",
            Self::R10 => "%r10",
            Self::R11 => "%r11",
            Self::R12 => "%r12",
            Self::R13 => "%r13",
            Self::R14 => "%r14",
            Self::R15 => "%r15",
        }
    }

    /// Resolves a canonical `%`-prefixed name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|reg| reg.name() == name)
    }
}

/// The 16-slot signed 64-bit register file, zero-initialised.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    slots: [i64; REGISTER_COUNT],
}

impl RegisterFile {
    /// Reads a register.
    #[must_use]
    pub const fn get(&self, reg: Register) -> i64 {
        self.slots[reg.index()]
    }

    /// Writes a register.
    pub const fn set(&mut self, reg: Register, value: i64) {
        self.slots[reg.index()] = value;
    }
}
