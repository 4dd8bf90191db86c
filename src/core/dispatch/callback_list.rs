//=========================================================================
// Callback List
//=========================================================================
//
// Ordered callback storage for a single phase.
//
// Order is subscription order and is the invocation order. Duplicate
// entries are allowed; removal takes the first matching occurrence only,
// matched by handle identity (the `Rc` allocation, not closure contents).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::Callback;

//=== Callback List =======================================================

/// Ordered sequence of callbacks for one phase.
///
/// The list is the single source of truth for what a phase invokes:
/// dispatch walks it front to back, so subscription order is invocation
/// order.
pub(crate) struct CallbackList {
    entries: Vec<Callback>,
}

impl CallbackList {
    /// Creates a new empty list.
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a callback at the end of the list.
    pub(crate) fn push(&mut self, callback: Callback) {
        self.entries.push(callback);
    }

    /// Removes the first entry that is the same handle as `callback`.
    ///
    /// Returns `true` if an entry was removed. Absent callbacks are a
    /// no-op and return `false`.
    pub(crate) fn remove_first(&mut self, callback: &Callback) -> bool {
        let position = self
            .entries
            .iter()
            .position(|entry| same_handle(entry, callback));

        match position {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns an iterator over the entries in invocation order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Callback> {
        self.entries.iter()
    }

    /// Returns a clone of the entries in invocation order.
    ///
    /// Entries are `Rc` handles, so this clones references, not closures.
    /// Used for snapshot dispatch: the pass walks the snapshot while the
    /// live list stays free to mutate.
    pub(crate) fn snapshot(&self) -> Vec<Callback> {
        self.entries.clone()
    }

    /// Returns the number of entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list holds no entries.
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries, preserving allocated capacity.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for CallbackList {
    fn default() -> Self {
        Self::new()
    }
}

//=== Handle Identity =====================================================

// Identity is the Rc allocation address. The metadata half of the fat
// pointer is ignored: two clones of one handle always match, two handles
// from separate `Rc::new` calls never do.
fn same_handle(a: &Callback, b: &Callback) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}

//=========================================================================
// Unit Tests
//=========================================================================
