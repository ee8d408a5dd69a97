//! Relocation report of a compaction pass.

use alloc::vec::Vec;

use core::ptr::NonNull;

/// Mapping from old to new payload addresses established by a compaction pass.
///
/// The arena never rewrites caller-held pointers: a pointer whose block was relocated is
/// invalidated, and this report is the only authoritative way to learn its new address.
/// Fixing up references is the caller's responsibility.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompactionReport {
    before: Vec<NonNull<u8>>,
    after: Vec<NonNull<u8>>,
}

impl CompactionReport {
    /// Returns the number of blocks relocated.
    pub fn relocated(&self) -> usize { self.before.len() }

    /// Returns whether no block was relocated.
    pub fn is_empty(&self) -> bool { self.before.is_empty() }

    /// Returns the payload addresses prior to the pass; index-matched with `after`.
    pub fn before(&self) -> &[NonNull<u8>] { &self.before }

    /// Returns the payload addresses after the pass; index-matched with `before`.
    pub fn after(&self) -> &[NonNull<u8>] { &self.after }

    /// Returns the new address of a relocated payload, or None if it did not move.
    pub fn relocated_address(&self, before: NonNull<u8>) -> Option<NonNull<u8>> {
        self.before.iter().position(|&pointer| pointer == before).map(|index| self.after[index])
    }

    pub(crate) fn push(&mut self, before: NonNull<u8>, after: NonNull<u8>) {
        self.before.push(before);
        self.after.push(after);
    }
}

#[cfg(test)]
mod tests {

use super::*;

#[test]
fn relocated_address_matches_indices() {
    let mut report = CompactionReport::default();

    let before = NonNull::new(24 as *mut u8).unwrap();
    let after = NonNull::new(8 as *mut u8).unwrap();
    let elsewhere = NonNull::new(48 as *mut u8).unwrap();

    report.push(before, after);

    assert_eq!(1, report.relocated());
    assert_eq!(Some(after), report.relocated_address(before));
    assert_eq!(None, report.relocated_address(elsewhere));
}

}
