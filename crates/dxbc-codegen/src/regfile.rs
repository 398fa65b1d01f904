//! Temporary register file.

use crate::value::Pointer;

/// Append-only arena of register pointers.
///
/// The index of a register is its identity (`r0`, `r1`, ...). Registers are
/// never removed or reordered, so an index stays valid once declared.
#[derive(Debug, Clone, Default)]
pub struct RegisterFile {
    regs: Vec<Pointer>,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self { regs: Vec::new() }
    }

    /// Number of declared registers.
    pub fn len(&self) -> u32 {
        self.regs.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Grow the file to at least `n` registers.
    ///
    /// `declare` is called once for each missing index, in increasing
    /// order, and must return the pointer backing that register. Returns
    /// the number of registers added.
    pub fn ensure_len(&mut self, n: u32, mut declare: impl FnMut(u32) -> Pointer) -> u32 {
        let old_len = self.len();
        for index in old_len..n {
            self.regs.push(declare(index));
        }
        n.saturating_sub(old_len)
    }

    pub fn get(&self, index: u32) -> Option<Pointer> {
        self.regs.get(index as usize).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Pointer)> {
        self.regs
            .iter()
            .enumerate()
            .map(|(i, ptr)| (i as u32, ptr))
    }
}
