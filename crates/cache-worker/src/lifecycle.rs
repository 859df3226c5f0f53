//! Worker Lifecycle
//!
//! `installing -> installed -> activating -> activated`, with `redundant`
//! reachable from any state once a newer worker takes over.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerState {
    #[default]
    Installing,
    Installed,
    Activating,
    Activated,
    Redundant,
}

impl WorkerState {
    /// Next state in the normal progression; `None` at the end
    pub fn next(self) -> Option<Self> {
        match self {
            WorkerState::Installing => Some(WorkerState::Installed),
            WorkerState::Installed => Some(WorkerState::Activating),
            WorkerState::Activating => Some(WorkerState::Activated),
            WorkerState::Activated | WorkerState::Redundant => None,
        }
    }

    /// `ServiceWorker.state` as reported by the platform
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "installing" => Some(WorkerState::Installing),
            "installed" => Some(WorkerState::Installed),
            "activating" => Some(WorkerState::Activating),
            "activated" => Some(WorkerState::Activated),
            "redundant" => Some(WorkerState::Redundant),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, WorkerState::Activated)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Redundant)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Installing => write!(f, "installing"),
            WorkerState::Installed => write!(f, "installed"),
            WorkerState::Activating => write!(f, "activating"),
            WorkerState::Activated => write!(f, "activated"),
            WorkerState::Redundant => write!(f, "redundant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progression() {
        let mut state = WorkerState::default();
        let mut seen = vec![state];
        while let Some(next) = state.next() {
            state = next;
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                WorkerState::Installing,
                WorkerState::Installed,
                WorkerState::Activating,
                WorkerState::Activated,
            ]
        );
        assert!(state.is_active());
    }

    #[test]
    fn test_redundant_is_terminal() {
        assert_eq!(WorkerState::Redundant.next(), None);
        assert!(WorkerState::Redundant.is_terminal());
        assert_eq!(WorkerState::Installed.to_string(), "installed");
    }

    #[test]
    fn test_parse_platform_names() {
        let mut state = WorkerState::Installing;
        loop {
            assert_eq!(WorkerState::parse(&state.to_string()), Some(state));
            match state.next() {
                Some(next) => state = next,
                None => break,
            }
        }
        assert_eq!(WorkerState::parse("redundant"), Some(WorkerState::Redundant));
        assert_eq!(WorkerState::parse("parsed"), None);
    }
}
