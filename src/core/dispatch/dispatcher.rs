//=========================================================================
// Update Dispatcher
//=========================================================================
//
// Pausable per-phase callback registry, the core of the crate.
//
// Architecture:
//   subscribe(cb, phase) → lists[phase] (ordered, duplicates allowed)
//                              ↓
//   dispatch(phase) ──paused?──► invoke front to back
//                              ↓
//   clear_all() at teardown (idempotent, lists stay reusable)
//
// The per-phase list is the single source of truth: dispatch walks the
// list directly, so a registered callback is always reachable by its
// phase's dispatch path and nothing can drift out of sync with it.
//
//=========================================================================

//=== External Crates =====================================================

use log::error;

//=== Internal Dependencies ===============================================

use super::{Callback, CallbackList};
use crate::core::phase::UpdatePhase;

//=== UpdateDispatcher ====================================================

/// Pausable callback registry with one ordered list per [`UpdatePhase`].
///
/// Callbacks are zero-argument closures held as [`Callback`] handles.
/// Subscription order is invocation order, duplicates are permitted
/// (subscribing the same handle twice invokes it twice per dispatch),
/// and unsubscription removes one occurrence at a time.
///
/// The dispatcher is single-threaded by design: every operation runs to
/// completion on the calling thread. Drive it from one thread, or wrap
/// it in external mutual exclusion.
///
/// For the shared-handle form used across a whole session, see
/// [`UpdaterService`](crate::core::UpdaterService).
pub struct UpdateDispatcher {
    lists: [CallbackList; UpdatePhase::COUNT],
    paused: bool,
}

impl UpdateDispatcher {
    /// Creates a new dispatcher with empty phase lists, unpaused.
    pub fn new() -> Self {
        Self {
            lists: [CallbackList::new(), CallbackList::new(), CallbackList::new()],
            paused: false,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Appends `callback` to the end of `phase`'s list.
    ///
    /// Every subsequent dispatch of `phase` invokes the callback until it
    /// is unsubscribed or the dispatcher is cleared. Subscribing the same
    /// handle again adds a second occurrence.
    pub fn subscribe(&mut self, callback: Callback, phase: UpdatePhase) {
        self.lists[phase.index()].push(callback);
    }

    /// Removes the first occurrence of `callback` from `phase`'s list.
    ///
    /// Matching is by handle identity (clones of one handle match, equal
    /// closures behind distinct handles do not). Unsubscribing a callback
    /// that is not registered on `phase` is a no-op and leaves the other
    /// phases untouched.
    pub fn unsubscribe(&mut self, callback: &Callback, phase: UpdatePhase) {
        self.lists[phase.index()].remove_first(callback);
    }

    //--- Raw Boundary -----------------------------------------------------
    //
    // Entry points for callers that address phases by raw index (the
    // serialized form of UpdatePhase). Unknown indices are reported and
    // dropped; no list is ever mutated by a rejected call.
    //

    /// Subscribes via a raw phase index.
    ///
    /// An out-of-range index is reported through `log::error!` and the
    /// call is otherwise a no-op. Never fatal.
    pub fn subscribe_raw(&mut self, callback: Callback, phase_index: u8) {
        match UpdatePhase::try_from(phase_index) {
            Ok(phase) => self.subscribe(callback, phase),
            Err(err) => error!("Subscribe rejected: {}", err),
        }
    }

    /// Unsubscribes via a raw phase index.
    ///
    /// Handled identically to [`UpdateDispatcher::subscribe_raw`]: unknown
    /// indices are reported and ignored.
    pub fn unsubscribe_raw(&mut self, callback: &Callback, phase_index: u8) {
        match UpdatePhase::try_from(phase_index) {
            Ok(phase) => self.unsubscribe(callback, phase),
            Err(err) => error!("Unsubscribe rejected: {}", err),
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes every callback registered on `phase`, in subscription
    /// order, synchronously on the calling thread.
    ///
    /// Does nothing while paused. A panicking callback is not caught: the
    /// panic unwinds through this call and the remainder of the phase's
    /// pass is skipped for this tick.
    ///
    /// This walks the live list, so the borrow checker statically rules
    /// out subscription changes from inside a callback. Callers that need
    /// that (shared handles, listener self-removal) dispatch through
    /// [`UpdaterService::run_phase`](crate::core::UpdaterService::run_phase),
    /// which snapshots the list per pass.
    pub fn dispatch(&self, phase: UpdatePhase) {
        if self.paused {
            return;
        }

        for entry in self.lists[phase.index()].iter() {
            (**entry)();
        }
    }

    //--- Pause Control ----------------------------------------------------

    /// Sets the global pause flag.
    ///
    /// While paused, dispatch of every phase does nothing; the lists keep
    /// their entries. Takes effect from the next dispatch call onward.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Returns the current pause state.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    //--- Query API --------------------------------------------------------

    /// Returns the number of callbacks registered on `phase`.
    pub fn callback_count(&self, phase: UpdatePhase) -> usize {
        self.lists[phase.index()].len()
    }

    /// Returns true if any callback is registered on `phase`.
    pub fn has_callbacks(&self, phase: UpdatePhase) -> bool {
        !self.lists[phase.index()].is_empty()
    }

    /// Returns the number of callbacks registered across all phases.
    pub fn total_callbacks(&self) -> usize {
        self.lists.iter().map(CallbackList::len).sum()
    }

    /// Returns a clone of `phase`'s list in invocation order.
    ///
    /// Clones handles, not closures. The snapshot is what a dispatch pass
    /// started now would invoke (pause permitting).
    pub fn snapshot(&self, phase: UpdatePhase) -> Vec<Callback> {
        self.lists[phase.index()].snapshot()
    }

    //--- Teardown ---------------------------------------------------------

    /// Clears every phase list, equivalent to unsubscribing everything.
    ///
    /// Idempotent: clearing twice leaves the same empty state. There is
    /// no terminal "disposed" state: dispatch after clearing invokes
    /// nothing, and later subscribes simply repopulate the lists. The
    /// pause flag is left as-is.
    pub fn clear_all(&mut self) {
        for list in self.lists.iter_mut() {
            list.clear();
        }
    }
}

impl Default for UpdateDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::callback;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    type CallLog = Rc<RefCell<Vec<&'static str>>>;

    fn call_log() -> CallLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn recording(log: &CallLog, tag: &'static str) -> Callback {
        let log = Rc::clone(log);
        callback(move || log.borrow_mut().push(tag))
    }

    fn counting(count: &Rc<RefCell<usize>>) -> Callback {
        let count = Rc::clone(count);
        callback(move || *count.borrow_mut() += 1)
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn new_dispatcher_is_empty_and_unpaused() {
        let dispatcher = UpdateDispatcher::new();

        assert!(!dispatcher.is_paused());
        assert_eq!(dispatcher.total_callbacks(), 0);
        for phase in UpdatePhase::ALL {
            assert!(!dispatcher.has_callbacks(phase));
            assert_eq!(dispatcher.callback_count(phase), 0);
        }
    }

    #[test]
    fn dispatch_on_empty_lists_is_a_noop() {
        let dispatcher = UpdateDispatcher::new();
        for phase in UpdatePhase::ALL {
            dispatcher.dispatch(phase);
        }
    }

    //--- Subscription and Ordering ---------------------------------------

    #[test]
    fn dispatch_invokes_in_subscription_order() {
        let mut dispatcher = UpdateDispatcher::new();
        let log = call_log();

        dispatcher.subscribe(recording(&log, "a"), UpdatePhase::Update);
        dispatcher.subscribe(recording(&log, "b"), UpdatePhase::Update);
        dispatcher.subscribe(recording(&log, "c"), UpdatePhase::Update);

        dispatcher.dispatch(UpdatePhase::Update);

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn dispatch_invokes_each_callback_exactly_once_per_pass() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        dispatcher.subscribe(counting(&count), UpdatePhase::Fixed);

        dispatcher.dispatch(UpdatePhase::Fixed);
        assert_eq!(*count.borrow(), 1);

        dispatcher.dispatch(UpdatePhase::Fixed);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn phases_are_independent() {
        let mut dispatcher = UpdateDispatcher::new();
        let log = call_log();

        dispatcher.subscribe(recording(&log, "fixed"), UpdatePhase::Fixed);
        dispatcher.subscribe(recording(&log, "update"), UpdatePhase::Update);
        dispatcher.subscribe(recording(&log, "late"), UpdatePhase::Late);

        dispatcher.dispatch(UpdatePhase::Update);

        assert_eq!(*log.borrow(), vec!["update"]);
    }

    #[test]
    fn duplicate_subscription_invokes_twice_per_pass() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));
        let counter = counting(&count);

        dispatcher.subscribe(Rc::clone(&counter), UpdatePhase::Update);
        dispatcher.subscribe(Rc::clone(&counter), UpdatePhase::Update);

        dispatcher.dispatch(UpdatePhase::Update);
        assert_eq!(*count.borrow(), 2);
    }

    //--- Unsubscription ---------------------------------------------------

    #[test]
    fn unsubscribe_then_dispatch_skips_removed_callback() {
        let mut dispatcher = UpdateDispatcher::new();
        let log = call_log();
        let a = recording(&log, "a");

        dispatcher.subscribe(Rc::clone(&a), UpdatePhase::Update);
        dispatcher.subscribe(recording(&log, "b"), UpdatePhase::Update);

        dispatcher.dispatch(UpdatePhase::Update);
        assert_eq!(*log.borrow(), vec!["a", "b"]);

        dispatcher.unsubscribe(&a, UpdatePhase::Update);
        log.borrow_mut().clear();

        dispatcher.dispatch(UpdatePhase::Update);
        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn unsubscribe_removes_one_duplicate_occurrence() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));
        let counter = counting(&count);

        dispatcher.subscribe(Rc::clone(&counter), UpdatePhase::Late);
        dispatcher.subscribe(Rc::clone(&counter), UpdatePhase::Late);

        dispatcher.unsubscribe(&counter, UpdatePhase::Late);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Late), 1);

        dispatcher.dispatch(UpdatePhase::Late);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn unsubscribe_absent_callback_is_a_noop() {
        let mut dispatcher = UpdateDispatcher::new();
        let log = call_log();
        let registered = recording(&log, "registered");
        let stranger = recording(&log, "stranger");

        dispatcher.subscribe(Rc::clone(&registered), UpdatePhase::Fixed);

        dispatcher.unsubscribe(&stranger, UpdatePhase::Fixed);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Fixed), 1);
    }

    #[test]
    fn unsubscribe_targets_only_the_named_phase() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));
        let counter = counting(&count);

        dispatcher.subscribe(Rc::clone(&counter), UpdatePhase::Fixed);
        dispatcher.subscribe(Rc::clone(&counter), UpdatePhase::Update);

        // Removing from Late, where it was never registered, changes nothing.
        dispatcher.unsubscribe(&counter, UpdatePhase::Late);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Fixed), 1);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Update), 1);

        dispatcher.unsubscribe(&counter, UpdatePhase::Fixed);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Fixed), 0);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Update), 1);
    }

    //--- Pause ------------------------------------------------------------

    #[test]
    fn paused_dispatcher_invokes_nothing_on_any_phase() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        for phase in UpdatePhase::ALL {
            dispatcher.subscribe(counting(&count), phase);
        }

        dispatcher.set_paused(true);
        for phase in UpdatePhase::ALL {
            dispatcher.dispatch(phase);
        }

        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn pause_preserves_subscriptions() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        dispatcher.subscribe(counting(&count), UpdatePhase::Fixed);

        dispatcher.set_paused(true);
        dispatcher.dispatch(UpdatePhase::Fixed);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Fixed), 1);

        dispatcher.set_paused(false);
        dispatcher.dispatch(UpdatePhase::Fixed);
        assert_eq!(*count.borrow(), 1);
    }

    //--- Raw Boundary -----------------------------------------------------

    #[test]
    fn subscribe_raw_accepts_valid_indices() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        dispatcher.subscribe_raw(counting(&count), 0);
        dispatcher.subscribe_raw(counting(&count), 1);
        dispatcher.subscribe_raw(counting(&count), 2);

        assert_eq!(dispatcher.callback_count(UpdatePhase::Fixed), 1);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Update), 1);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Late), 1);
    }

    #[test]
    fn subscribe_raw_rejects_out_of_range_index() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        dispatcher.subscribe_raw(counting(&count), 7);

        // No list was mutated and the callback is never reachable.
        assert_eq!(dispatcher.total_callbacks(), 0);
        for phase in UpdatePhase::ALL {
            dispatcher.dispatch(phase);
        }
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn unsubscribe_raw_rejects_out_of_range_index() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));
        let counter = counting(&count);

        dispatcher.subscribe(Rc::clone(&counter), UpdatePhase::Update);

        dispatcher.unsubscribe_raw(&counter, 200);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Update), 1);

        dispatcher.unsubscribe_raw(&counter, 1);
        assert_eq!(dispatcher.callback_count(UpdatePhase::Update), 0);
    }

    //--- Teardown ---------------------------------------------------------

    #[test]
    fn clear_all_empties_every_phase() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        for phase in UpdatePhase::ALL {
            dispatcher.subscribe(counting(&count), phase);
            dispatcher.subscribe(counting(&count), phase);
        }
        assert_eq!(dispatcher.total_callbacks(), 6);

        dispatcher.clear_all();

        assert_eq!(dispatcher.total_callbacks(), 0);
        for phase in UpdatePhase::ALL {
            dispatcher.dispatch(phase);
        }
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let mut dispatcher = UpdateDispatcher::new();
        dispatcher.subscribe(callback(|| {}), UpdatePhase::Update);

        dispatcher.clear_all();
        dispatcher.clear_all();

        assert_eq!(dispatcher.total_callbacks(), 0);
    }

    #[test]
    fn subscribe_after_clear_repopulates() {
        let mut dispatcher = UpdateDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        dispatcher.subscribe(counting(&count), UpdatePhase::Update);
        dispatcher.clear_all();

        dispatcher.subscribe(counting(&count), UpdatePhase::Update);
        dispatcher.dispatch(UpdatePhase::Update);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn clear_all_leaves_pause_flag_alone() {
        let mut dispatcher = UpdateDispatcher::new();
        dispatcher.set_paused(true);

        dispatcher.clear_all();

        assert!(dispatcher.is_paused());
    }

    //--- Snapshot ---------------------------------------------------------

    #[test]
    fn snapshot_reflects_current_registrations() {
        let mut dispatcher = UpdateDispatcher::new();
        let a = callback(|| {});

        dispatcher.subscribe(Rc::clone(&a), UpdatePhase::Fixed);
        assert_eq!(dispatcher.snapshot(UpdatePhase::Fixed).len(), 1);

        dispatcher.unsubscribe(&a, UpdatePhase::Fixed);
        assert!(dispatcher.snapshot(UpdatePhase::Fixed).is_empty());
    }
}
