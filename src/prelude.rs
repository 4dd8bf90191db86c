//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and functions.
//
// Usage:
//   use framepulse::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime composition root
pub use crate::runtime::{Runtime, RuntimeBuilder};

// Registry and shared handle
pub use crate::core::{callback, Callback, UpdateDispatcher, UpdaterService};

// Phases
pub use crate::core::{PhaseError, UpdatePhase};

// Host control
pub use crate::host::{ControlError, HostController};
