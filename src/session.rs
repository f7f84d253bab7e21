use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::reconcile::{PendingToggle, Reconciliation, ToggleOutcome};
use crate::selection::{
    vault_project_key, vault_project_source, FileAttachments, FileChip, RemovalEffect,
    RemovalHook, SelectedSource, SourceSelection, DEFAULT_REMOVAL_HOOKS,
};
use crate::sources::{self, Annotation, Incompatibility, ResearchMode, SourceRef, UploadChannel};

const CHAT_ID_MAX_CHARS: usize = 50;

static CHAT_ID_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"));
static CHAT_ID_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// What a selection intent did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added(String),
    Deselected(String),
    FileAttached(UploadChannel),
    /// The channel already had a file chip.
    Unchanged,
    Rejected(Incompatibility),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuery {
    pub text: String,
    pub chat_id: String,
}

/// State of one composition on the assistant homepage.
///
/// Every intent is a single `&mut self` call, so observers never see a mode
/// paired with a selection that was not filtered for it.
#[derive(Debug, Clone)]
pub struct ComposerSession {
    input: String,
    mode: ResearchMode,
    selection: SourceSelection,
    files: FileAttachments,
    reconciliation: Reconciliation,
    active_vault_project: Option<String>,
    removal_hooks: &'static [RemovalHook],
    submitted: Option<ComposedQuery>,
}

impl Default for ComposerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerSession {
    pub fn new() -> Self {
        Self::with_removal_hooks(DEFAULT_REMOVAL_HOOKS)
    }

    pub fn with_removal_hooks(removal_hooks: &'static [RemovalHook]) -> Self {
        Self {
            input: String::new(),
            mode: ResearchMode::Standard,
            selection: SourceSelection::new(),
            files: FileAttachments::default(),
            reconciliation: Reconciliation::Idle,
            active_vault_project: None,
            removal_hooks,
            submitted: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: String) {
        self.input = value;
    }

    pub fn mode(&self) -> ResearchMode {
        self.mode
    }

    pub fn selection(&self) -> &SourceSelection {
        &self.selection
    }

    pub fn files(&self) -> &FileAttachments {
        &self.files
    }

    pub fn pending(&self) -> Option<&PendingToggle> {
        self.reconciliation.pending()
    }

    pub fn pending_message(&self) -> Option<&str> {
        self.pending().map(|p| p.message.as_str())
    }

    pub fn active_vault_project(&self) -> Option<&str> {
        self.active_vault_project.as_deref()
    }

    pub fn submitted(&self) -> Option<&ComposedQuery> {
        self.submitted.as_ref()
    }

    pub fn annotation(&self, source_id: &str) -> Annotation {
        sources::annotate(source_id, self.mode)
    }

    /// Selects, deselects or attaches the source named by `source_id`.
    ///
    /// Upload channels go to the file list. Everything else is gated by the
    /// current mode: incompatible sources are ignored, standard mode keeps at
    /// most one source, Deep Research toggles membership.
    pub fn add_or_toggle_source(&mut self, display_name: &str, source_id: &str) -> SelectionChange {
        let source = SourceRef::parse(source_id);
        if let Some(channel) = source.kind().and_then(|k| k.upload_channel()) {
            if self.files.attach(channel) {
                debug!(?channel, "file attached");
                return SelectionChange::FileAttached(channel);
            }
            return SelectionChange::Unchanged;
        }

        let key = if source_id.is_empty() {
            display_name.to_string()
        } else {
            source_id.to_string()
        };
        self.toggle_keyed(key, source)
    }

    /// Attaches a named Vault project and makes it the active one.
    pub fn attach_vault_project(&mut self, project: &str) -> SelectionChange {
        let change = self.toggle_keyed(vault_project_key(project), vault_project_source());
        if matches!(change, SelectionChange::Added(_)) {
            self.active_vault_project = Some(project.to_string());
        }
        change
    }

    fn toggle_keyed(&mut self, key: String, source: SourceRef) -> SelectionChange {
        if let Some(reason) = source.incompatibility(self.mode) {
            debug!(%key, source = source.id(), mode = %self.mode, %reason, "source ignored");
            return SelectionChange::Rejected(reason);
        }

        let present = self.selection.contains(&key);
        match self.mode {
            ResearchMode::Deep if present => {
                self.remove_source(&key);
                SelectionChange::Deselected(key)
            }
            ResearchMode::Deep => {
                self.selection.insert(SelectedSource::new(key.clone(), source));
                debug!(%key, count = self.selection.len(), "source added");
                SelectionChange::Added(key)
            }
            ResearchMode::Standard => {
                let evicted = self.selection.drain();
                for entry in &evicted {
                    self.after_removal(&entry.key);
                }
                if present {
                    debug!(%key, "source deselected");
                    return SelectionChange::Deselected(key);
                }
                self.selection.insert(SelectedSource::new(key.clone(), source));
                debug!(%key, replaced = evicted.len(), "source selected");
                SelectionChange::Added(key)
            }
        }
    }

    /// Drops `key` from the selection. Absent keys are a no-op.
    ///
    /// Removal hooks run for the key, so dropping a `Vault:` entry also clears
    /// the active Vault project.
    pub fn remove_source(&mut self, key: &str) -> bool {
        let removed = self.selection.remove(key).is_some();
        if removed {
            debug!(%key, "source removed");
        }
        self.after_removal(key);
        removed
    }

    pub fn remove_file(&mut self, index: usize) -> Option<FileChip> {
        self.files.remove(index)
    }

    fn after_removal(&mut self, key: &str) {
        for hook in self.removal_hooks.iter().filter(|h| h.matches(key)) {
            match hook.effect {
                RemovalEffect::ClearActiveVaultProject => self.active_vault_project = None,
            }
        }
    }

    /// Flips Deep Research, or parks the flip when selected sources would break.
    pub fn request_mode_toggle(&mut self) -> ToggleOutcome {
        match self.reconciliation.request(self.mode, &self.selection) {
            Some(target) => {
                self.mode = target;
                info!(mode = %target, "research mode switched");
                ToggleOutcome::Applied(target)
            }
            None => {
                let incompatible = self.pending().map_or(0, |p| p.incompatible.len());
                debug!(incompatible, "mode switch awaiting confirmation");
                ToggleOutcome::AwaitingConfirmation { incompatible }
            }
        }
    }

    /// Removes whatever the target mode cannot use and then switches to it.
    ///
    /// Compatibility is recomputed against the current selection rather than
    /// the list shown in the prompt.
    pub fn confirm_reconciliation(&mut self) -> Option<ResearchMode> {
        let target = self.reconciliation.take_pending()?;
        let evicted = self.selection.retain_compatible(target);
        for entry in &evicted {
            self.after_removal(&entry.key);
        }
        self.mode = target;
        info!(mode = %target, removed = evicted.len(), "research mode switched after removing sources");
        Some(target)
    }

    pub fn cancel_reconciliation(&mut self) -> bool {
        let cancelled = self.reconciliation.cancel();
        if cancelled {
            debug!("mode switch cancelled");
        }
        cancelled
    }

    /// Hands off the composed query. Blank input and repeat submissions do nothing.
    pub fn submit(&mut self) -> Option<ComposedQuery> {
        if self.submitted.is_some() || self.input.trim().is_empty() {
            return None;
        }
        let query = ComposedQuery {
            text: self.input.clone(),
            chat_id: chat_id(&self.input),
        };
        info!(chat_id = %query.chat_id, sources = ?self.selection.keys(), files = self.files.len(), "query submitted");
        self.submitted = Some(query.clone());
        Some(query)
    }
}

/// URL-friendly id derived from the first words of a message.
pub fn chat_id(message: &str) -> String {
    let lowered = message.to_lowercase();
    let stripped = CHAT_ID_STRIP.replace_all(&lowered, "");
    let dashed = CHAT_ID_SPACES.replace_all(&stripped, "-");
    dashed.chars().take(CHAT_ID_MAX_CHARS).collect()
}
