//=========================================================================
// Command Pump
//=========================================================================
//
// Control-command drain with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostCommand> → pump() → apply to UpdaterService → TickControl
//
// Bounded polling keeps a flooded channel from starving the frame.
// Disconnect (every controller dropped) is a shutdown signal.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::control::{HostCommand, TickControl};
use crate::core::UpdaterService;

//=== CommandPump =========================================================

/// Drains pending host commands once per frame and applies them.
pub(crate) struct CommandPump {
    receiver: Receiver<HostCommand>,
}

impl CommandPump {
    pub(crate) fn new(receiver: Receiver<HostCommand>) -> Self {
        Self { receiver }
    }

    /// Applies all pending commands (bounded to prevent starvation).
    ///
    /// Commands apply in arrival order, so a pause followed by a resume
    /// within one frame nets out to the last writer. Returns `Exit` on a
    /// shutdown command or when the channel has disconnected.
    pub(crate) fn pump(&mut self, service: &UpdaterService) -> TickControl {
        const MAX_COMMANDS_PER_FRAME: usize = 32;

        let mut drained = 0;

        while drained < MAX_COMMANDS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(HostCommand::SetPaused(paused)) => {
                    service.set_paused(paused);
                    drained += 1;
                }
                Ok(HostCommand::Shutdown) => {
                    info!("Shutdown command received");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Disconnected) => {
                    info!("All controllers dropped, shutting down");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_COMMANDS_PER_FRAME {
            warn!("Command backlog: drained {} commands this frame", drained);
        }

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
