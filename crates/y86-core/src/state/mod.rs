//! Architectural CPU state primitives.

/// Register identifiers and the 16-slot register file.
pub mod registers;
/// Status codes and condition codes.
pub mod status;

pub use registers::{Register, RegisterFile, REGISTER_COUNT};
pub use status::{CondCodes, Status};
