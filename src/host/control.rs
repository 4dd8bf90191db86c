//=========================================================================
// Host Control Interface
//=========================================================================
//
// Control-side contract for the frame host (commands and errors).
//
// Controllers live on any thread; the host drains their commands between
// frames, never mid-pass. Dropping every controller disconnects the
// channel, which the host treats as a shutdown request.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::Sender;

//=== HostCommand =========================================================

/// Commands sent from controllers to the frame host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostCommand {
    /// Set the global pause flag on the shared service.
    SetPaused(bool),

    /// Stop the host loop; teardown runs once on exit.
    Shutdown,
}

//=== TickControl =========================================================

/// Host loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== HostController ======================================================

/// Cross-thread control handle for a running frame host.
///
/// Obtained from [`Runtime::controller`](crate::Runtime::controller)
/// before the blocking run starts. Cloneable and `Send`; commands are
/// applied by the host between frames.
///
/// The host shuts down when it receives [`shutdown`](Self::shutdown) or
/// when every controller has been dropped.
#[derive(Clone)]
pub struct HostController {
    sender: Sender<HostCommand>,
}

impl HostController {
    pub(crate) fn new(sender: Sender<HostCommand>) -> Self {
        Self { sender }
    }

    /// Pauses dispatch on all phases from the next frame onward.
    pub fn pause(&self) -> Result<(), ControlError> {
        self.send(HostCommand::SetPaused(true))
    }

    /// Resumes dispatch from the next frame onward.
    pub fn resume(&self) -> Result<(), ControlError> {
        self.send(HostCommand::SetPaused(false))
    }

    /// Sets the pause flag explicitly.
    pub fn set_paused(&self, paused: bool) -> Result<(), ControlError> {
        self.send(HostCommand::SetPaused(paused))
    }

    /// Asks the host to stop its loop and tear the service down.
    pub fn shutdown(&self) -> Result<(), ControlError> {
        self.send(HostCommand::Shutdown)
    }

    fn send(&self, command: HostCommand) -> Result<(), ControlError> {
        self.sender
            .send(command)
            .map_err(|_| ControlError::HostStopped)
    }
}

//=== ControlError ========================================================

/// Failure to deliver a command to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// The host loop has already exited; its command channel is gone.
    HostStopped,
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HostStopped => write!(f, "host loop has stopped; command not delivered"),
        }
    }
}

impl std::error::Error for ControlError {}

//=========================================================================
// Unit Tests
//=========================================================================
