//! Places an assembled program into CPU memory.
//!
//! Loading happens once, before the first tick: the entry point goes into
//! `pc`, data quads are written first, then instruction groups in emission
//! order, so instruction bytes win where the two regions overlap. The
//! loader stops at the first out-of-range write.

use y86_core::cpu::Cpu;

use crate::errors::LoadError;
use crate::parser::Program;

/// Loads `program` into `cpu`.
///
/// # Errors
///
/// Returns a [`LoadError`] naming the first byte range that fell outside
/// memory; earlier writes remain in place.
pub fn load(program: &Program, cpu: &mut Cpu) -> Result<(), LoadError> {
    cpu.set_pc(program.entry);

    for (&addr, &value) in &program.data {
        cpu.mem_mut().write_quad(i64::from(addr), value)?;
    }

    for group in &program.instructions {
        cpu.mem_mut().write_bytes(group.address, &group.bytes)?;
    }

    Ok(())
}
