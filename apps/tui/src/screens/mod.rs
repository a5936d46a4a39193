//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic.

mod outcomes;
mod wizard;

use std::fmt;

pub(crate) use outcomes::OutcomesScreen;
pub(crate) use wizard::WizardScreen;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Wizard,
    Outcomes,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wizard => write!(f, "Wizard"),
            Self::Outcomes => write!(f, "Outcomes"),
        }
    }
}
