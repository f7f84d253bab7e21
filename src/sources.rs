use std::fmt;

/// Query mode. Deep Research allows several sources at once, standard mode allows one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResearchMode {
    #[default]
    Standard,
    Deep,
}

impl ResearchMode {
    pub fn toggled(self) -> Self {
        match self {
            ResearchMode::Standard => ResearchMode::Deep,
            ResearchMode::Deep => ResearchMode::Standard,
        }
    }

    pub fn is_deep(self) -> bool {
        matches!(self, ResearchMode::Deep)
    }
}

impl fmt::Display for ResearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResearchMode::Standard => write!(f, "standard"),
            ResearchMode::Deep => write!(f, "deep research"),
        }
    }
}

/// Channel a file chip came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadChannel {
    Browser,
    SharePoint,
    IManage,
}

impl UploadChannel {
    pub fn placeholder_file_name(self) -> &'static str {
        match self {
            UploadChannel::Browser => "uploaded_file.pdf",
            UploadChannel::SharePoint | UploadChannel::IManage => "example_document.pdf",
        }
    }

    pub fn display_prefix(self) -> &'static str {
        match self {
            UploadChannel::Browser => "",
            UploadChannel::SharePoint => "SharePoint: ",
            UploadChannel::IManage => "iManage: ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub compatible_with_deep_research: bool,
    pub compatible_without_deep_research: bool,
}

impl SourceInfo {
    pub fn is_compatible(&self, mode: ResearchMode) -> bool {
        match mode {
            ResearchMode::Deep => self.compatible_with_deep_research,
            ResearchMode::Standard => self.compatible_without_deep_research,
        }
    }

    pub fn incompatibility(&self, mode: ResearchMode) -> Option<Incompatibility> {
        match mode {
            ResearchMode::Deep if !self.compatible_with_deep_research => {
                Some(Incompatibility::ExcludedFromDeepResearch)
            }
            ResearchMode::Standard if !self.compatible_without_deep_research => {
                Some(Incompatibility::DeepResearchOnly)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incompatibility {
    ExcludedFromDeepResearch,
    DeepResearchOnly,
}

impl Incompatibility {
    pub fn message(self) -> &'static str {
        match self {
            Incompatibility::ExcludedFromDeepResearch => "Incompatible with Deep Research",
            Incompatibility::DeepResearchOnly => "Only compatible with Deep Research",
        }
    }
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    UploadFiles,
    SharePoint,
    IManage,
    IManageSearch,
    Vault,
    WebSearch,
    Edgar,
    EurLex,
    Sweden,
    Singapore,
    LexisNexis,
}

impl SourceKind {
    /// Dropdown order.
    pub const ALL: [SourceKind; 11] = [
        SourceKind::UploadFiles,
        SourceKind::SharePoint,
        SourceKind::IManage,
        SourceKind::IManageSearch,
        SourceKind::Vault,
        SourceKind::WebSearch,
        SourceKind::Edgar,
        SourceKind::EurLex,
        SourceKind::Sweden,
        SourceKind::Singapore,
        SourceKind::LexisNexis,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SourceKind::UploadFiles => "upload-files",
            SourceKind::SharePoint => "sharepoint",
            SourceKind::IManage => "imanage",
            SourceKind::IManageSearch => "imanage-deep-research",
            SourceKind::Vault => "vault",
            SourceKind::WebSearch => "web-search",
            SourceKind::Edgar => "edgar",
            SourceKind::EurLex => "eur-lex",
            SourceKind::Sweden => "sweden",
            SourceKind::Singapore => "singapore",
            SourceKind::LexisNexis => "lexisnexis",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn info(self) -> &'static SourceInfo {
        match self {
            SourceKind::UploadFiles => &UPLOAD_FILES,
            SourceKind::SharePoint => &SHAREPOINT,
            SourceKind::IManage => &IMANAGE,
            SourceKind::IManageSearch => &IMANAGE_SEARCH,
            SourceKind::Vault => &VAULT,
            SourceKind::WebSearch => &WEB_SEARCH,
            SourceKind::Edgar => &EDGAR,
            SourceKind::EurLex => &EUR_LEX,
            SourceKind::Sweden => &SWEDEN,
            SourceKind::Singapore => &SINGAPORE,
            SourceKind::LexisNexis => &LEXISNEXIS,
        }
    }

    /// Kinds that attach files instead of joining the source selection.
    pub fn upload_channel(self) -> Option<UploadChannel> {
        match self {
            SourceKind::UploadFiles => Some(UploadChannel::Browser),
            SourceKind::SharePoint => Some(UploadChannel::SharePoint),
            SourceKind::IManage => Some(UploadChannel::IManage),
            _ => None,
        }
    }

    /// Short label used on the selection chip.
    pub fn chip_label(self) -> &'static str {
        match self {
            SourceKind::UploadFiles => "Files",
            SourceKind::SharePoint => "SharePoint",
            SourceKind::IManage => "iManage",
            SourceKind::IManageSearch => "iManage Search",
            SourceKind::Vault => "Vault",
            SourceKind::WebSearch => "Web Search",
            SourceKind::Edgar => "EDGAR",
            SourceKind::EurLex => "EUR-Lex",
            SourceKind::Sweden => "Sweden",
            SourceKind::Singapore => "Singapore",
            SourceKind::LexisNexis => "LexisNexis",
        }
    }

    /// Label of the dropdown entry; also the display name passed on selection.
    pub fn menu_label(self) -> &'static str {
        match self {
            SourceKind::UploadFiles => "Upload files",
            SourceKind::SharePoint => "Upload from SharePoint",
            SourceKind::IManage => "Upload from iManage",
            SourceKind::IManageSearch => "Search across iManage",
            SourceKind::Vault => "Add from Vault project",
            SourceKind::WebSearch => "Web search",
            SourceKind::Edgar => "EDGAR",
            SourceKind::EurLex => "EUR-Lex",
            SourceKind::Sweden => "Sweden",
            SourceKind::Singapore => "Singapore",
            SourceKind::LexisNexis => "LexisNexis",
        }
    }

    /// Research databases sit below the separator in the dropdown.
    pub fn is_research_database(self) -> bool {
        matches!(
            self,
            SourceKind::WebSearch
                | SourceKind::Edgar
                | SourceKind::EurLex
                | SourceKind::Sweden
                | SourceKind::Singapore
                | SourceKind::LexisNexis
        )
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A source id as received from a caller. Ids outside the catalog are kept
/// as `Unregistered` and are compatible with every mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceRef {
    Known(SourceKind),
    Unregistered(String),
}

impl SourceRef {
    pub fn parse(id: &str) -> Self {
        match SourceKind::from_id(id) {
            Some(kind) => SourceRef::Known(kind),
            None => SourceRef::Unregistered(id.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SourceRef::Known(kind) => kind.id(),
            SourceRef::Unregistered(id) => id,
        }
    }

    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            SourceRef::Known(kind) => Some(*kind),
            SourceRef::Unregistered(_) => None,
        }
    }

    pub fn is_compatible(&self, mode: ResearchMode) -> bool {
        match self {
            SourceRef::Known(kind) => kind.info().is_compatible(mode),
            SourceRef::Unregistered(_) => true,
        }
    }

    pub fn incompatibility(&self, mode: ResearchMode) -> Option<Incompatibility> {
        match self {
            SourceRef::Known(kind) => kind.info().incompatibility(mode),
            SourceRef::Unregistered(_) => None,
        }
    }
}

#[allow(dead_code)]
pub fn lookup(source_id: &str) -> Option<&'static SourceInfo> {
    SourceKind::from_id(source_id).map(SourceKind::info)
}

#[allow(dead_code)]
pub fn is_compatible(source_id: &str, mode: ResearchMode) -> bool {
    SourceRef::parse(source_id).is_compatible(mode)
}

#[allow(dead_code)]
pub fn incompatibility_reason(source_id: &str, mode: ResearchMode) -> Option<&'static str> {
    SourceRef::parse(source_id)
        .incompatibility(mode)
        .map(Incompatibility::message)
}

/// How a dropdown entry should be presented before the user picks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub is_incompatible: bool,
    pub reason: Option<&'static str>,
}

/// Upload channels are never flagged: attaching a file bypasses the mode gate.
pub fn annotate(source_id: &str, mode: ResearchMode) -> Annotation {
    let source = SourceRef::parse(source_id);
    if source.kind().and_then(SourceKind::upload_channel).is_some() {
        return Annotation {
            is_incompatible: false,
            reason: None,
        };
    }
    let reason = source.incompatibility(mode).map(Incompatibility::message);
    Annotation {
        is_incompatible: reason.is_some(),
        reason,
    }
}

static UPLOAD_FILES: SourceInfo = SourceInfo {
    title: "Upload Files",
    description: concat!(
        "Select individual files to upload to Harvey.\n\n",
        "**Accepted file types:** PDF, Word, Text, Excel\n**Maximum file size:** 100MB\n**File limit:** Up to 50 files"
    ),
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

static SHAREPOINT: SourceInfo = SourceInfo {
    title: "Upload from SharePoint",
    description: concat!(
        "Select individual files from your SharePoint document library to upload to Harvey.\n\n",
        "**Accepted file types:** PDF, Word, Text, Excel\n**Maximum file size:** 100MB\n**File limit:** Up to 50 files"
    ),
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

static IMANAGE: SourceInfo = SourceInfo {
    title: "Upload from iManage",
    description: concat!(
        "Select individual files from your iManage document management system to upload to Harvey.\n\n",
        "**Accepted file types:** PDF, Word, Text, Excel\n**Maximum file size:** 100MB\n**File limit:** Up to 50 files"
    ),
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

static IMANAGE_SEARCH: SourceInfo = SourceInfo {
    title: "Search across iManage (no upload required)",
    description: "Search and analyze documents you have access to directly within iManage. No need to upload individual files\u{2014}Harvey will run intelligent searches against your iManage repository to find the most relevant documents for your query.",
    compatible_with_deep_research: true,
    compatible_without_deep_research: false,
};

static VAULT: SourceInfo = SourceInfo {
    title: "Add from Vault project",
    description: "Select files from your Vault project repository.\n\n**Accepted file types:** PDF, Word, Text, Excel\n**Maximum file size:** 100MB\n**File limit:** Up to 10,000 files (significantly more than other sources)",
    compatible_with_deep_research: true,
    compatible_without_deep_research: true,
};

static WEB_SEARCH: SourceInfo = SourceInfo {
    title: "Web Search",
    description: "Search and analyze content from across the internet. Harvey will find relevant web pages, articles, and publicly available documents to support your research and analysis.",
    compatible_with_deep_research: true,
    compatible_without_deep_research: true,
};

static EDGAR: SourceInfo = SourceInfo {
    title: "EDGAR",
    description: "Search SEC filings from the EDGAR database.\n\n**Supported filings:** 8-Ks, 10-Ks\n**Update frequency:** Every 5 minutes",
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

static EUR_LEX: SourceInfo = SourceInfo {
    title: "EUR-Lex",
    description: "Search European Union legal documents, legislation, and case law from the official EUR-Lex database.\n\n**Content includes:** Treaties, directives, regulations, court decisions from EU institutions",
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

static SWEDEN: SourceInfo = SourceInfo {
    title: "Sweden",
    description: "Search Swedish legal documents, legislation, and regulatory materials.\n\n**Content includes:** Laws, court decisions, official government publications from Swedish legal databases",
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

static SINGAPORE: SourceInfo = SourceInfo {
    title: "Singapore",
    description: "Search Singaporean legal documents, legislation, and regulatory materials.\n\n**Content includes:** Statutes, case law, official government publications from Singapore legal databases",
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

static LEXISNEXIS: SourceInfo = SourceInfo {
    title: "LexisNexis",
    description: "Search comprehensive legal research database including case law, statutes, regulations, and legal commentary.\n\n**Access:** Millions of legal documents from jurisdictions worldwide",
    compatible_with_deep_research: false,
    compatible_without_deep_research: true,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

const UPLOAD_LIMITS: &str = "**Accepted file types:** PDF, Word, Text, Excel\n**Maximum file size:** 100MB\n**File limit:** Up to 50 files";

    #[test]
    fn test_catalog_ids_round_trip() {
        for kind in SourceKind::ALL {
            assert_eq!(SourceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(SourceKind::from_id("westlaw"), None);
    }

    #[test]
    fn test_every_kind_usable_in_some_mode() {
        for kind in SourceKind::ALL {
            let info = kind.info();
            assert!(
                info.compatible_with_deep_research || info.compatible_without_deep_research,
                "{kind} is unusable in both modes"
            );
        }
    }

    #[test]
    fn test_is_compatible_follows_flags() {
        assert!(!is_compatible("edgar", ResearchMode::Deep));
        assert!(is_compatible("edgar", ResearchMode::Standard));
        assert!(is_compatible("imanage-deep-research", ResearchMode::Deep));
        assert!(!is_compatible("imanage-deep-research", ResearchMode::Standard));
        assert!(is_compatible("vault", ResearchMode::Deep));
        assert!(is_compatible("vault", ResearchMode::Standard));
    }

    #[test]
    fn test_incompatibility_reasons() {
        assert_eq!(
            incompatibility_reason("lexisnexis", ResearchMode::Deep),
            Some("Incompatible with Deep Research")
        );
        assert_eq!(
            incompatibility_reason("imanage-deep-research", ResearchMode::Standard),
            Some("Only compatible with Deep Research")
        );
        assert_eq!(incompatibility_reason("web-search", ResearchMode::Deep), None);
        assert_eq!(incompatibility_reason("web-search", ResearchMode::Standard), None);
    }

    #[test]
    fn test_unregistered_source_is_permissive() {
        for mode in [ResearchMode::Standard, ResearchMode::Deep] {
            assert!(is_compatible("court-listener", mode));
            assert_eq!(incompatibility_reason("court-listener", mode), None);
            assert!(!annotate("court-listener", mode).is_incompatible);
        }
        assert!(lookup("court-listener").is_none());
    }

    #[test]
    fn test_upload_channels_never_annotated() {
        let annotation = annotate("upload-files", ResearchMode::Deep);
        assert_eq!(
            annotation,
            Annotation {
                is_incompatible: false,
                reason: None
            }
        );
        // the registry itself still reports the raw flag
        assert_eq!(
            incompatibility_reason("upload-files", ResearchMode::Deep),
            Some("Incompatible with Deep Research")
        );
    }

    #[test]
    fn test_annotate_gated_entry() {
        let annotation = annotate("edgar", ResearchMode::Deep);
        assert!(annotation.is_incompatible);
        assert_eq!(annotation.reason, Some("Incompatible with Deep Research"));
        assert!(!annotate("edgar", ResearchMode::Standard).is_incompatible);
    }

    #[test]
    fn test_upload_limits_shared_by_upload_kinds() {
        for kind in [SourceKind::UploadFiles, SourceKind::SharePoint, SourceKind::IManage] {
            assert!(kind.info().description.ends_with(UPLOAD_LIMITS));
            assert!(kind.upload_channel().is_some());
        }
        assert!(SourceKind::Vault.upload_channel().is_none());
    }
}
