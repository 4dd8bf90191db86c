//=========================================================================
// Frame Host
//=========================================================================
//
// The lifecycle host: owns the paced frame loop and forwards each frame
// through the shared service's phases in a fixed order.
//
// Each frame:
//  1. Drains control commands (pause / resume / shutdown)
//  2. Forwards the phases: fixed → update → late
//  3. Sleeps to maintain the configured frame rate (TPS)
//  4. On exit, clears the service's subscriptions exactly once
//
// The host survives for the whole session and is the single driver of
// the registry; every phase runs on the loop's thread.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Dependencies ===============================================

use super::command_pump::CommandPump;
use super::control::{HostCommand, TickControl};
use crate::core::UpdaterService;

//=== FrameHost ===========================================================

/// Paced loop that forwards frames to the shared [`UpdaterService`].
pub(crate) struct FrameHost {
    service: UpdaterService,
    pump: CommandPump,
    frame_duration: Duration,
}

impl FrameHost {
    pub(crate) fn new(
        service: UpdaterService,
        receiver: Receiver<HostCommand>,
        tps: f64,
    ) -> Self {
        Self {
            service,
            pump: CommandPump::new(receiver),
            frame_duration: Duration::from_secs_f64(1.0 / tps),
        }
    }

    //--- tick() -----------------------------------------------------------
    //
    // Runs exactly one frame: commands first, then the three phases in
    // order. A shutdown seen during the command drain skips the frame's
    // phases entirely.
    //
    pub(crate) fn tick(&mut self) -> TickControl {
        if let TickControl::Exit = self.pump.pump(&self.service) {
            return TickControl::Exit;
        }

        self.service.fixed_update();
        self.service.update();
        self.service.late_update();

        TickControl::Continue
    }

    //--- run() ------------------------------------------------------------
    //
    // Blocks on the calling thread, ticking at the configured rate until
    // a shutdown command arrives or every controller is dropped. Clears
    // the service on the way out; this is the session's single teardown.
    //
    pub(crate) fn run(mut self) {
        info!(
            "Host loop started (frame: {:.2} ms)",
            self.frame_duration.as_secs_f64() * 1000.0
        );

        loop {
            let frame_start = Instant::now();

            if let TickControl::Exit = self.tick() {
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_duration {
                thread::sleep(self.frame_duration - elapsed);
            }
        }

        self.service.clear_all();
        info!("Host loop exited, subscriptions cleared");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{callback, Callback, UpdatePhase};
    use crossbeam_channel::unbounded;
    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<&'static str>>>;

    fn recording(log: &CallLog, tag: &'static str) -> Callback {
        let log = Rc::clone(log);
        callback(move || log.borrow_mut().push(tag))
    }

    fn test_host(service: UpdaterService) -> (FrameHost, crossbeam_channel::Sender<HostCommand>) {
        let (tx, rx) = unbounded();
        (FrameHost::new(service, rx, 60.0), tx)
    }

    #[test]
    fn tick_forwards_phases_in_fixed_order() {
        let service = UpdaterService::new();
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));

        service.subscribe(recording(&log, "late"), UpdatePhase::Late);
        service.subscribe(recording(&log, "fixed"), UpdatePhase::Fixed);
        service.subscribe(recording(&log, "update"), UpdatePhase::Update);

        let (mut host, _tx) = test_host(service);

        assert_eq!(host.tick(), TickControl::Continue);
        assert_eq!(*log.borrow(), vec!["fixed", "update", "late"]);
    }

    #[test]
    fn each_tick_runs_every_phase_once() {
        let service = UpdaterService::new();
        let count = Rc::new(RefCell::new(0));

        for phase in UpdatePhase::ALL {
            let count = Rc::clone(&count);
            service.subscribe(callback(move || *count.borrow_mut() += 1), phase);
        }

        let (mut host, _tx) = test_host(service);

        host.tick();
        assert_eq!(*count.borrow(), 3);
        host.tick();
        assert_eq!(*count.borrow(), 6);
    }

    #[test]
    fn shutdown_skips_the_frames_phases() {
        let service = UpdaterService::new();
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        service.subscribe(recording(&log, "fixed"), UpdatePhase::Fixed);

        let (mut host, tx) = test_host(service);
        tx.send(HostCommand::Shutdown).unwrap();

        assert_eq!(host.tick(), TickControl::Exit);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn pause_command_gates_the_same_tick() {
        let service = UpdaterService::new();
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        service.subscribe(recording(&log, "update"), UpdatePhase::Update);

        let (mut host, tx) = test_host(service.clone());

        tx.send(HostCommand::SetPaused(true)).unwrap();
        host.tick();
        assert!(log.borrow().is_empty());

        tx.send(HostCommand::SetPaused(false)).unwrap();
        host.tick();
        assert_eq!(*log.borrow(), vec!["update"]);
    }

    #[test]
    fn disconnected_controllers_stop_the_loop() {
        let service = UpdaterService::new();
        let (tx, rx) = unbounded::<HostCommand>();
        let mut host = FrameHost::new(service, rx, 60.0);

        drop(tx);

        assert_eq!(host.tick(), TickControl::Exit);
    }

    #[test]
    fn run_clears_the_service_on_exit() {
        let service = UpdaterService::new();
        service.subscribe(callback(|| {}), UpdatePhase::Update);
        service.subscribe(callback(|| {}), UpdatePhase::Late);

        let (tx, rx) = unbounded();
        let host = FrameHost::new(service.clone(), rx, 240.0);

        tx.send(HostCommand::Shutdown).unwrap();
        host.run();

        assert_eq!(service.total_callbacks(), 0);
    }
}
