// ============================================================
// SELECTION STATE
// ============================================================
// Shell-held session state: which addresses the user picked for the
// subject and adjoining panels, and whether each panel was triggered.
// Explicit finite state with a single reset, no globals.

use serde::{Deserialize, Serialize};

/// Which of the two independent address panels a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Subject,
    Adjoining,
}

impl SelectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SelectionKind::Subject => "Subject Property",
            SelectionKind::Adjoining => "Adjoining Property",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionState {
    subject: Vec<String>,
    adjoining: Vec<String>,
    run_subject: bool,
    run_adjoining: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one panel's selection set. Changing a selection does not
    /// touch its run flag; the panel re-renders on the next run request.
    pub fn set_selection(&mut self, kind: SelectionKind, addresses: Vec<String>) {
        match kind {
            SelectionKind::Subject => self.subject = addresses,
            SelectionKind::Adjoining => self.adjoining = addresses,
        }
    }

    pub fn selection(&self, kind: SelectionKind) -> &[String] {
        match kind {
            SelectionKind::Subject => &self.subject,
            SelectionKind::Adjoining => &self.adjoining,
        }
    }

    pub fn mark_run(&mut self, kind: SelectionKind) {
        match kind {
            SelectionKind::Subject => self.run_subject = true,
            SelectionKind::Adjoining => self.run_adjoining = true,
        }
    }

    pub fn is_run(&self, kind: SelectionKind) -> bool {
        match kind {
            SelectionKind::Subject => self.run_subject,
            SelectionKind::Adjoining => self.run_adjoining,
        }
    }

    /// The single reset operation: both selection sets and both run flags.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selections_are_independent() {
        let mut state = SelectionState::new();
        state.set_selection(SelectionKind::Subject, vec!["10 Elm".into()]);
        state.set_selection(SelectionKind::Adjoining, vec!["12 Elm".into()]);

        assert_eq!(state.selection(SelectionKind::Subject), ["10 Elm"]);
        assert_eq!(state.selection(SelectionKind::Adjoining), ["12 Elm"]);
    }

    #[test]
    fn test_run_flags() {
        let mut state = SelectionState::new();
        assert!(!state.is_run(SelectionKind::Subject));

        state.mark_run(SelectionKind::Subject);
        assert!(state.is_run(SelectionKind::Subject));
        assert!(!state.is_run(SelectionKind::Adjoining));
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut state = SelectionState::new();
        state.set_selection(SelectionKind::Subject, vec!["10 Elm".into()]);
        state.set_selection(SelectionKind::Adjoining, vec!["12 Elm".into()]);
        state.mark_run(SelectionKind::Subject);
        state.mark_run(SelectionKind::Adjoining);

        state.clear_all();

        assert!(state.selection(SelectionKind::Subject).is_empty());
        assert!(state.selection(SelectionKind::Adjoining).is_empty());
        assert!(!state.is_run(SelectionKind::Subject));
        assert!(!state.is_run(SelectionKind::Adjoining));
    }
}
