use unicode_width::UnicodeWidthChar;

use crate::sources::{ResearchMode, SourceKind, SourceRef, UploadChannel};

/// Key prefix of sources attached from a specific Vault project.
pub const VAULT_KEY_PREFIX: &str = "Vault:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSource {
    pub key: String,
    pub source: SourceRef,
    pub label: String,
}

impl SelectedSource {
    pub fn new(key: String, source: SourceRef) -> Self {
        let label = match source.kind() {
            Some(_) if key.starts_with(VAULT_KEY_PREFIX) => key.clone(),
            Some(kind) => kind.chip_label().to_string(),
            None => key.clone(),
        };
        Self { key, source, label }
    }

    /// Name used in reconciliation prompts.
    pub fn title(&self) -> &str {
        match self.source.kind() {
            Some(kind) => kind.info().title,
            None => &self.key,
        }
    }
}

/// Ordered set of attached sources. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSelection {
    entries: Vec<SelectedSource>,
}

impl SourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SelectedSource] {
        &self.entries
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Appends unless the key is already present.
    pub fn insert(&mut self, entry: SelectedSource) -> bool {
        if self.contains(&entry.key) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<SelectedSource> {
        let idx = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(idx))
    }

    /// Empties the selection, returning what was removed.
    pub fn drain(&mut self) -> Vec<SelectedSource> {
        std::mem::take(&mut self.entries)
    }

    pub fn incompatible_with(&self, mode: ResearchMode) -> Vec<&SelectedSource> {
        self.entries
            .iter()
            .filter(|e| !e.source.is_compatible(mode))
            .collect()
    }

    /// Keeps only entries usable under `mode`, returning the evicted ones.
    pub fn retain_compatible(&mut self, mode: ResearchMode) -> Vec<SelectedSource> {
        let (kept, evicted): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.source.is_compatible(mode));
        self.entries = kept;
        evicted
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChip {
    pub name: String,
    pub channel: UploadChannel,
}

impl FileChip {
    pub fn for_channel(channel: UploadChannel) -> Self {
        Self {
            name: channel.placeholder_file_name().to_string(),
            channel,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{}{}", self.channel.display_prefix(), self.name)
    }
}

/// Files attached through upload channels, at most one chip per channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAttachments {
    chips: Vec<FileChip>,
}

impl FileAttachments {
    pub fn chips(&self) -> &[FileChip] {
        &self.chips
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn has_channel(&self, channel: UploadChannel) -> bool {
        self.chips.iter().any(|c| c.channel == channel)
    }

    pub fn attach(&mut self, channel: UploadChannel) -> bool {
        if self.has_channel(channel) {
            return false;
        }
        self.chips.push(FileChip::for_channel(channel));
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<FileChip> {
        if index < self.chips.len() {
            Some(self.chips.remove(index))
        } else {
            None
        }
    }
}

/// What a removal hook does once a matching key leaves the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalEffect {
    ClearActiveVaultProject,
}

/// Runs after any key starting with `prefix` is removed from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalHook {
    pub prefix: &'static str,
    pub effect: RemovalEffect,
}

impl RemovalHook {
    pub fn matches(&self, key: &str) -> bool {
        key.starts_with(self.prefix)
    }
}

pub const DEFAULT_REMOVAL_HOOKS: &[RemovalHook] = &[RemovalHook {
    prefix: VAULT_KEY_PREFIX,
    effect: RemovalEffect::ClearActiveVaultProject,
}];

pub fn vault_project_key(project: &str) -> String {
    format!("{VAULT_KEY_PREFIX} {project}")
}

pub fn vault_project_source() -> SourceRef {
    SourceRef::Known(SourceKind::Vault)
}

/// Cuts `label` to at most `max_width` terminal columns, ending with an ellipsis when cut.
pub fn truncate_label(label: &str, max_width: usize) -> String {
    let total: usize = label.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return label.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: &str) -> SelectedSource {
        SelectedSource::new(id.to_string(), SourceRef::parse(id))
    }

    #[test]
    fn test_insert_rejects_duplicate_keys() {
        let mut selection = SourceSelection::new();
        assert!(selection.insert(entry("edgar")));
        assert!(!selection.insert(entry("edgar")));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_absent_key_is_none() {
        let mut selection = SourceSelection::new();
        selection.insert(entry("vault"));
        assert!(selection.remove("edgar").is_none());
        assert_eq!(selection.keys(), vec!["vault"]);
    }

    #[test]
    fn test_retain_compatible_keeps_order() {
        let mut selection = SourceSelection::new();
        for id in ["web-search", "edgar", "vault", "eur-lex"] {
            selection.insert(entry(id));
        }
        let evicted = selection.retain_compatible(ResearchMode::Deep);
        assert_eq!(selection.keys(), vec!["web-search", "vault"]);
        let evicted: Vec<_> = evicted.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(evicted, vec!["edgar", "eur-lex"]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(entry("web-search").label, "Web Search");
        assert_eq!(entry("imanage-deep-research").label, "iManage Search");
        assert_eq!(entry("westlaw").label, "westlaw");
        let project = SelectedSource::new(vault_project_key("Regulatory Compliance Audit"), vault_project_source());
        assert_eq!(project.label, "Vault: Regulatory Compliance Audit");
        assert_eq!(project.title(), "Add from Vault project");
    }

    #[test]
    fn test_file_attachments_one_chip_per_channel() {
        let mut files = FileAttachments::default();
        assert!(files.attach(UploadChannel::SharePoint));
        assert!(!files.attach(UploadChannel::SharePoint));
        assert!(files.attach(UploadChannel::Browser));
        assert_eq!(files.len(), 2);
        assert_eq!(files.chips()[0].display_name(), "SharePoint: example_document.pdf");
        assert_eq!(files.chips()[1].display_name(), "uploaded_file.pdf");
        assert!(files.remove(5).is_none());
        assert_eq!(files.remove(0).map(|c| c.channel), Some(UploadChannel::SharePoint));
        assert!(!files.has_channel(UploadChannel::SharePoint));
    }

    #[test]
    fn test_vault_hook_matches_prefix_only() {
        let hook = DEFAULT_REMOVAL_HOOKS[0];
        assert!(hook.matches("Vault: Amend v Delta IP Litigation"));
        assert!(!hook.matches("vault"));
        assert!(!hook.matches("web-search"));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("EDGAR", 10), "EDGAR");
        assert_eq!(truncate_label("SharePoint: example_document.pdf", 12), "SharePoint:…");
        assert_eq!(truncate_label("", 3), "");
    }
}
