use crate::models::workbook::WorkbookStatus;

/// Gating state for a workbook view. The backend's `em_andamento` status is
/// reserved and carries no distinct behavior, so it gates as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Open,
    Closed,
}

impl LifecycleState {
    pub fn from_status(status: Option<WorkbookStatus>) -> Self {
        match status {
            Some(WorkbookStatus::Closed) => LifecycleState::Closed,
            Some(WorkbookStatus::Open) | Some(WorkbookStatus::InProgress) | None => {
                LifecycleState::Open
            }
        }
    }

    pub fn is_closed(self) -> bool {
        self == LifecycleState::Closed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Close,
    Reopen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Closing with zero selected candidates is disallowed; there is
    /// nothing to submit.
    NothingSelected,
    AlreadyClosed,
    NotClosed,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NothingSelected => {
                write!(f, "cannot close a workbook with no selected candidates")
            }
            RejectReason::AlreadyClosed => write!(f, "workbook is already closed"),
            RejectReason::NotClosed => write!(f, "workbook is not closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCheck {
    Allowed,
    Rejected(RejectReason),
}

impl TransitionCheck {
    pub fn is_allowed(self) -> bool {
        self == TransitionCheck::Allowed
    }
}

/// Validate a lifecycle transition before any side effect runs. Close
/// requires an open workbook with at least one selection; reopen is
/// unconditional on a closed one.
pub fn validate(
    state: LifecycleState,
    transition: Transition,
    selected_count: usize,
) -> TransitionCheck {
    match transition {
        Transition::Close => {
            if state.is_closed() {
                TransitionCheck::Rejected(RejectReason::AlreadyClosed)
            } else if selected_count == 0 {
                TransitionCheck::Rejected(RejectReason::NothingSelected)
            } else {
                TransitionCheck::Allowed
            }
        }
        Transition::Reopen => {
            if state.is_closed() {
                TransitionCheck::Allowed
            } else {
                TransitionCheck::Rejected(RejectReason::NotClosed)
            }
        }
    }
}
