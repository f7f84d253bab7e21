use crate::selection::SourceSelection;
use crate::sources::ResearchMode;

/// A mode toggle held back until the user agrees to drop the listed sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub target: ResearchMode,
    pub incompatible: Vec<String>,
    pub message: String,
}

impl PendingToggle {
    fn new(target: ResearchMode, incompatible: Vec<String>) -> Self {
        let message = confirmation_message(target, &incompatible);
        Self {
            target,
            incompatible,
            message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Reconciliation {
    #[default]
    Idle,
    PendingConfirmation(PendingToggle),
}

/// Result of asking for a mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied(ResearchMode),
    AwaitingConfirmation { incompatible: usize },
}

impl Reconciliation {
    pub fn pending(&self) -> Option<&PendingToggle> {
        match self {
            Reconciliation::Idle => None,
            Reconciliation::PendingConfirmation(pending) => Some(pending),
        }
    }

    /// Scans `selection` against the mode opposite to `current`.
    ///
    /// Returns the mode to switch to right away when nothing blocks it.
    /// Otherwise parks a fresh pending toggle, replacing any earlier one.
    pub fn request(&mut self, current: ResearchMode, selection: &SourceSelection) -> Option<ResearchMode> {
        let target = current.toggled();
        let incompatible: Vec<String> = selection
            .incompatible_with(target)
            .into_iter()
            .map(|entry| entry.title().to_string())
            .collect();

        if incompatible.is_empty() {
            *self = Reconciliation::Idle;
            return Some(target);
        }

        *self = Reconciliation::PendingConfirmation(PendingToggle::new(target, incompatible));
        None
    }

    /// Takes the pending target, leaving the machine idle.
    pub fn take_pending(&mut self) -> Option<ResearchMode> {
        match std::mem::take(self) {
            Reconciliation::Idle => None,
            Reconciliation::PendingConfirmation(pending) => Some(pending.target),
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.take_pending().is_some()
    }
}

pub fn confirmation_message(target: ResearchMode, titles: &[String]) -> String {
    let list = titles.join(", ");
    let single = titles.len() == 1;
    let verb = if single { "is" } else { "are" };
    let pronoun = if single { "it" } else { "them" };
    match target {
        ResearchMode::Deep => format!(
            "{list} {verb} incompatible with Deep Research. Would you like to remove {pronoun} in order to enable Deep Research?"
        ),
        ResearchMode::Standard => format!(
            "{list} {verb} only available in Deep Research. Would you like to remove {pronoun} in order to disable Deep Research?"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectedSource;
    use crate::sources::SourceRef;
    use pretty_assertions::assert_eq;

    fn selection(ids: &[&str]) -> SourceSelection {
        let mut selection = SourceSelection::new();
        for id in ids {
            selection.insert(SelectedSource::new(id.to_string(), SourceRef::parse(id)));
        }
        selection
    }

    #[test]
    fn test_enable_message_singular() {
        let message = confirmation_message(ResearchMode::Deep, &["EDGAR".to_string()]);
        assert_eq!(
            message,
            "EDGAR is incompatible with Deep Research. Would you like to remove it in order to enable Deep Research?"
        );
    }

    #[test]
    fn test_disable_message_plural() {
        let titles = vec!["EDGAR".to_string(), "LexisNexis".to_string()];
        let message = confirmation_message(ResearchMode::Standard, &titles);
        assert_eq!(
            message,
            "EDGAR, LexisNexis are only available in Deep Research. Would you like to remove them in order to disable Deep Research?"
        );
    }

    #[test]
    fn test_request_without_conflicts_applies() {
        let mut machine = Reconciliation::default();
        let target = machine.request(ResearchMode::Standard, &selection(&["vault", "web-search"]));
        assert_eq!(target, Some(ResearchMode::Deep));
        assert!(machine.pending().is_none());
    }

    #[test]
    fn test_request_with_conflicts_parks() {
        let mut machine = Reconciliation::default();
        let target = machine.request(ResearchMode::Standard, &selection(&["edgar", "vault"]));
        assert_eq!(target, None);
        let pending = machine.pending().cloned();
        assert_eq!(
            pending,
            Some(PendingToggle {
                target: ResearchMode::Deep,
                incompatible: vec!["EDGAR".to_string()],
                message: "EDGAR is incompatible with Deep Research. Would you like to remove it in order to enable Deep Research?".to_string(),
            })
        );
    }

    #[test]
    fn test_second_request_replaces_pending() {
        let mut machine = Reconciliation::default();
        machine.request(ResearchMode::Standard, &selection(&["edgar"]));
        machine.request(ResearchMode::Standard, &selection(&["edgar", "eur-lex"]));
        let pending = machine.pending().map(|p| p.incompatible.clone());
        assert_eq!(pending, Some(vec!["EDGAR".to_string(), "EUR-Lex".to_string()]));

        // a clean rescan clears the stale prompt
        assert_eq!(machine.request(ResearchMode::Standard, &selection(&["vault"])), Some(ResearchMode::Deep));
        assert!(machine.pending().is_none());
    }

    #[test]
    fn test_unregistered_sources_never_listed() {
        let mut machine = Reconciliation::default();
        assert_eq!(
            machine.request(ResearchMode::Standard, &selection(&["court-listener"])),
            Some(ResearchMode::Deep)
        );
        assert_eq!(
            machine.request(ResearchMode::Deep, &selection(&["court-listener"])),
            Some(ResearchMode::Standard)
        );
    }

    #[test]
    fn test_cancel_and_take() {
        let mut machine = Reconciliation::default();
        assert!(!machine.cancel());
        machine.request(ResearchMode::Deep, &selection(&["imanage-deep-research"]));
        assert!(machine.pending().is_some());
        assert_eq!(machine.take_pending(), Some(ResearchMode::Standard));
        assert_eq!(machine, Reconciliation::Idle);
    }
}
