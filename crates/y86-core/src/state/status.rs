use thiserror::Error;

/// CPU status register.
///
/// `Ok` is the only state in which the clock advances; every other value
/// terminates the driver loop. Faults never unwind: a bad fetch, decode,
/// or memory access maps to one of these codes and leaves the rest of the
/// architectural state untouched for that tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Status {
    /// Ready to execute the next instruction.
    #[default]
    #[error("still running")]
    Ok,
    /// Clean program halt.
    #[error("clean halt")]
    Hlt,
    /// Memory access with any byte of its window out of range.
    #[error("memory access out of range")]
    Adr,
    /// Unknown opcode or out-of-range function code.
    #[error("invalid instruction")]
    Ins,
    /// Integer divide or modulo by zero.
    #[error("divide by zero")]
    Dz,
}

impl Status {
    /// Short uppercase status name for state dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Hlt => "HLT",
            Self::Adr => "ADR",
            Self::Ins => "INS",
            Self::Dz => "DZ",
        }
    }

    /// True while the clock may keep ticking.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// True for the abnormal-termination codes (everything but `OK`/`HLT`).
    #[must_use]
    pub const fn is_fault(self) -> bool {
        matches!(self, Self::Adr | Self::Ins | Self::Dz)
    }
}

/// Condition codes, written only by the `opq` instruction family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CondCodes {
    /// Signed two's-complement overflow of the last ALU result.
    pub of: bool,
    /// Last ALU result was zero.
    pub z: bool,
    /// Last ALU result was negative.
    pub s: bool,
}
