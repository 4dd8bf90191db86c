//=========================================================================
// Update Phases
//
// Defines the three lifecycle phases a callback can subscribe to.
// The host forwards each frame through the phases in a fixed order:
//
//   Fixed ──► Update ──► Late
//
// Responsibilities:
// - Identify one of the three dispatch channels (stateless tag)
// - Provide stable string labels for log output
// - Convert from untyped sources (raw indices, config strings) with
//   explicit rejection of unknown values
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::str::FromStr;

//=== UpdatePhase Enum ====================================================

/// One of the three lifecycle phases callbacks subscribe to.
///
/// - `Fixed`: the fixed-timestep step, intended for physics-style work
/// - `Update`: the per-frame logic step
/// - `Late`: the post-logic step, runs after `Update` each frame
///
/// The discriminants are stable and form the raw index form used by the
/// `TryFrom<u8>` conversion; out-of-range indices are rejected, never
/// truncated.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdatePhase {
    Fixed = 0,
    Update = 1,
    Late = 2,
}

impl UpdatePhase {
    /// Number of phases. Sizes the per-phase storage in the dispatcher.
    pub const COUNT: usize = 3;

    /// All phases in dispatch order.
    pub const ALL: [UpdatePhase; UpdatePhase::COUNT] =
        [UpdatePhase::Fixed, UpdatePhase::Update, UpdatePhase::Late];

    /// Stable lowercase label, used in logs and accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            UpdatePhase::Fixed => "fixed",
            UpdatePhase::Update => "update",
            UpdatePhase::Late => "late",
        }
    }

    /// Storage index for per-phase containers.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=== Conversions =========================================================

impl TryFrom<u8> for UpdatePhase {
    type Error = PhaseError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(UpdatePhase::Fixed),
            1 => Ok(UpdatePhase::Update),
            2 => Ok(UpdatePhase::Late),
            other => Err(PhaseError::UnknownIndex(other)),
        }
    }
}

impl FromStr for UpdatePhase {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(UpdatePhase::Fixed),
            "update" => Ok(UpdatePhase::Update),
            "late" => Ok(UpdatePhase::Late),
            other => Err(PhaseError::UnknownName(other.to_string())),
        }
    }
}

//=== PhaseError ==========================================================

/// Rejection of an unrecognized phase identifier.
///
/// Raised at the untyped boundaries (raw indices, config strings). The
/// dispatcher reports it and treats the offending call as a no-op; it is
/// never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseError {
    /// Raw index outside the `0..=2` phase range.
    UnknownIndex(u8),

    /// Phase name that matches none of the documented labels.
    UnknownName(String),
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIndex(raw) => {
                write!(f, "unknown phase index {} (expected 0..=2)", raw)
            }
            Self::UnknownName(name) => {
                write!(f, "unknown phase name '{}' (expected fixed, update, or late)", name)
            }
        }
    }
}

impl std::error::Error for PhaseError {}

//=========================================================================
// Unit Tests
//=========================================================================
