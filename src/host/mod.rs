//=========================================================================
// Host
//=========================================================================
//
// The lifecycle host and its control surface.
//
// Components:
// - `control`: command and error types, plus the cross-thread controller
// - `command_pump`: bounded per-frame command draining
// - `frame_host`: the paced loop that forwards frames to the service
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod command_pump;
pub(crate) mod frame_host;

mod control;

//=== Public API ==========================================================

pub use control::{ControlError, HostController};

//=== Internal API ========================================================

pub(crate) use control::HostCommand;
