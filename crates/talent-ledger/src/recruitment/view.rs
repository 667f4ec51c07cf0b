use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Screen the command surface is currently presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    PersonView,
    JobView,
    JobDetailView,
    PersonDetailView,
}

impl ViewState {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::PersonView,
            Self::JobView,
            Self::JobDetailView,
            Self::PersonDetailView,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonView => "person view",
            Self::JobView => "job view",
            Self::JobDetailView => "job detail view",
            Self::PersonDetailView => "person detail view",
        }
    }

    /// Job-oriented commands are legal in these states. `PersonDetailView`
    /// is not part of the family.
    pub const fn is_job_family(self) -> bool {
        matches!(self, Self::JobView | Self::JobDetailView)
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mode a command needs before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewGate {
    JobFamily,
    PersonFamily,
}

impl ViewGate {
    pub const fn label(self) -> &'static str {
        match self {
            Self::JobFamily => "job view",
            Self::PersonFamily => "person view",
        }
    }
}

impl fmt::Display for ViewGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewStateMachine {
    state: ViewState,
}

impl ViewStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ViewState {
        self.state
    }

    /// Any state may be entered directly.
    pub fn set(&mut self, state: ViewState) {
        self.state = state;
    }

    pub fn is_job_family(&self) -> bool {
        self.state.is_job_family()
    }

    /// Job family goes to `PersonView`; everything else goes to `JobView`.
    pub fn toggle(&mut self) -> ViewState {
        self.state = if self.is_job_family() {
            ViewState::PersonView
        } else {
            ViewState::JobView
        };
        self.state
    }

    /// Detail views fall back to `JobView`; other states are left alone.
    pub fn clear_detail(&mut self) -> bool {
        match self.state {
            ViewState::JobDetailView | ViewState::PersonDetailView => {
                self.state = ViewState::JobView;
                true
            }
            ViewState::PersonView | ViewState::JobView => false,
        }
    }

    pub fn permits(&self, gate: ViewGate) -> bool {
        match gate {
            ViewGate::JobFamily => self.is_job_family(),
            ViewGate::PersonFamily => !self.is_job_family(),
        }
    }

    pub fn require(&self, gate: ViewGate) -> Result<(), LedgerError> {
        if self.permits(gate) {
            Ok(())
        } else {
            Err(LedgerError::WrongView {
                required: gate,
                current: self.state,
            })
        }
    }
}
