//=========================================================================
// Updater Service
//=========================================================================
//
// Shared handle over the update dispatcher.
//
// One registry serves a whole session. Instead of a global, the service
// is an explicit clonable handle: the composition root constructs it once
// and every listener, and the frame host, receives a clone referring to
// the same underlying dispatcher.
//
// Architecture:
//   UpdaterService ──Rc<RefCell<UpdateDispatcher>>──┐
//   UpdaterService (clone) ─────────────────────────┤ same registry
//   FrameHost ──────────────────────────────────────┘
//
// Dispatch through the handle snapshots the phase list per pass, so
// listeners may subscribe, unsubscribe, or toggle pause from inside a
// callback; effects land on the next pass.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::dispatch::{Callback, UpdateDispatcher};
use super::phase::UpdatePhase;

//=== UpdaterService ======================================================

/// Clonable handle to a session-wide [`UpdateDispatcher`].
///
/// Cloning is cheap and every clone refers to the same registry, which is
/// how the "one shared instance per session" contract is expressed:
/// construct the service once (normally via
/// [`RuntimeBuilder`](crate::RuntimeBuilder)) and hand out clones.
///
/// The handle is intentionally *not* `Send`: the registry is driven by a
/// single thread for its whole lifetime. Cross-thread control goes
/// through [`HostController`](crate::host::HostController) instead.
///
/// # Examples
///
/// A listener that registers itself for the phases it needs:
///
/// ```
/// use framepulse::core::{callback, UpdatePhase, UpdaterService};
///
/// struct Hero {
///     service: UpdaterService,
///     on_update: framepulse::core::Callback,
/// }
///
/// impl Hero {
///     fn new(service: UpdaterService) -> Self {
///         let on_update = callback(|| { /* per-frame logic */ });
///         service.subscribe(on_update.clone(), UpdatePhase::Update);
///         Self { service, on_update }
///     }
///
///     fn retire(&self) {
///         self.service.unsubscribe(&self.on_update, UpdatePhase::Update);
///     }
/// }
///
/// let service = UpdaterService::new();
/// let hero = Hero::new(service.clone());
/// service.update();
/// hero.retire();
/// ```
#[derive(Clone)]
pub struct UpdaterService {
    dispatcher: Rc<RefCell<UpdateDispatcher>>,
}

impl UpdaterService {
    /// Creates a service around a fresh, empty dispatcher.
    pub fn new() -> Self {
        Self {
            dispatcher: Rc::new(RefCell::new(UpdateDispatcher::new())),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Appends `callback` to `phase`'s list.
    ///
    /// See [`UpdateDispatcher::subscribe`].
    pub fn subscribe(&self, callback: Callback, phase: UpdatePhase) {
        self.dispatcher.borrow_mut().subscribe(callback, phase);
    }

    /// Removes the first occurrence of `callback` from `phase`'s list.
    ///
    /// See [`UpdateDispatcher::unsubscribe`].
    pub fn unsubscribe(&self, callback: &Callback, phase: UpdatePhase) {
        self.dispatcher.borrow_mut().unsubscribe(callback, phase);
    }

    /// Subscribes via a raw phase index; unknown indices are reported and
    /// dropped. See [`UpdateDispatcher::subscribe_raw`].
    pub fn subscribe_raw(&self, callback: Callback, phase_index: u8) {
        self.dispatcher.borrow_mut().subscribe_raw(callback, phase_index);
    }

    /// Unsubscribes via a raw phase index; unknown indices are reported
    /// and dropped. See [`UpdateDispatcher::unsubscribe_raw`].
    pub fn unsubscribe_raw(&self, callback: &Callback, phase_index: u8) {
        self.dispatcher.borrow_mut().unsubscribe_raw(callback, phase_index);
    }

    //--- Phase Entry Points -----------------------------------------------
    //
    // The host calls these once per frame, in order: fixed, update, late.
    //

    /// Runs the fixed (physics) phase. Equivalent to
    /// `run_phase(UpdatePhase::Fixed)`.
    pub fn fixed_update(&self) {
        self.run_phase(UpdatePhase::Fixed);
    }

    /// Runs the per-frame logic phase. Equivalent to
    /// `run_phase(UpdatePhase::Update)`.
    pub fn update(&self) {
        self.run_phase(UpdatePhase::Update);
    }

    /// Runs the post-logic phase. Equivalent to
    /// `run_phase(UpdatePhase::Late)`.
    pub fn late_update(&self) {
        self.run_phase(UpdatePhase::Late);
    }

    /// Invokes every callback registered on `phase`, in subscription
    /// order, synchronously on the calling thread. Does nothing while
    /// paused.
    ///
    /// The pass runs over a snapshot taken up front: callbacks may
    /// subscribe, unsubscribe, or change the pause flag through a clone
    /// of this handle, and those changes apply from the next pass
    /// onward. A pause flagged mid-pass never cuts the pass short, and a
    /// callback unsubscribed mid-pass still runs this pass.
    ///
    /// # Panics
    ///
    /// A panic raised by a callback is not caught; it unwinds through
    /// this call and aborts the remainder of the pass for this tick.
    /// Calling `run_phase` again from inside a callback is a usage error
    /// and panics on the registry borrow.
    pub fn run_phase(&self, phase: UpdatePhase) {
        let snapshot = {
            let dispatcher = self.dispatcher.borrow();
            if dispatcher.is_paused() {
                return;
            }
            dispatcher.snapshot(phase)
        };

        for entry in &snapshot {
            (**entry)();
        }
    }

    //--- Pause Control ----------------------------------------------------

    /// Sets the global pause flag; effective from the next pass onward.
    pub fn set_paused(&self, paused: bool) {
        self.dispatcher.borrow_mut().set_paused(paused);
    }

    /// Returns the current pause state.
    pub fn is_paused(&self) -> bool {
        self.dispatcher.borrow().is_paused()
    }

    //--- Query API --------------------------------------------------------

    /// Returns the number of callbacks registered on `phase`.
    pub fn callback_count(&self, phase: UpdatePhase) -> usize {
        self.dispatcher.borrow().callback_count(phase)
    }

    /// Returns true if any callback is registered on `phase`.
    pub fn has_callbacks(&self, phase: UpdatePhase) -> bool {
        self.dispatcher.borrow().has_callbacks(phase)
    }

    /// Returns the number of callbacks registered across all phases.
    pub fn total_callbacks(&self) -> usize {
        self.dispatcher.borrow().total_callbacks()
    }

    //--- Teardown ---------------------------------------------------------

    /// Clears every phase list. Idempotent; later subscribes repopulate.
    ///
    /// The host calls this exactly once when its run loop exits. See
    /// [`UpdateDispatcher::clear_all`].
    pub fn clear_all(&self) {
        self.dispatcher.borrow_mut().clear_all();
    }
}

impl Default for UpdaterService {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
