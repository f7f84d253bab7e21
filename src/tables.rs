use std::collections::BTreeSet;

/// A row that can be picked in a selection table.
pub trait TableRow {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    Checked,
    Indeterminate,
    Unchecked,
}

/// Multi-select table over a fixed set of rows. Every row starts selected.
#[derive(Debug, Clone)]
pub struct SelectionTable<T> {
    rows: Vec<T>,
    selected: BTreeSet<String>,
}

impl<T: TableRow> SelectionTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        let selected = rows.iter().map(|r| r.id().to_string()).collect();
        Self { rows, selected }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Flips one row. Unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) {
        if !self.rows.iter().any(|r| r.id() == id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Clears the table when every row is selected, otherwise selects every row.
    pub fn toggle_all(&mut self) {
        if self.header() == HeaderCheck::Checked {
            self.selected.clear();
        } else {
            self.selected = self.rows.iter().map(|r| r.id().to_string()).collect();
        }
    }

    pub fn header(&self) -> HeaderCheck {
        match self.selected.len() {
            0 if self.rows.is_empty() => HeaderCheck::Checked,
            0 => HeaderCheck::Unchecked,
            n if n == self.rows.len() => HeaderCheck::Checked,
            _ => HeaderCheck::Indeterminate,
        }
    }

    /// Selected rows in catalog order.
    pub fn selected(&self) -> Vec<&T> {
        self.rows.iter().filter(|r| self.is_selected(r.id())).collect()
    }

    pub fn summary(&self) -> String {
        format!("{} of {} sources selected", self.selected.len(), self.rows.len())
    }

    pub fn can_proceed(&self) -> bool {
        !self.selected.is_empty()
    }

    /// The rows to carry into the next step, or `None` when nothing is selected.
    pub fn proceed(&self) -> Option<Vec<&T>> {
        self.can_proceed().then(|| self.selected())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedentDocument {
    pub id: String,
    pub title: String,
    pub notes: String,
}

impl TableRow for PrecedentDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseProvision {
    pub id: String,
    pub topic: String,
    pub notes: String,
    pub example_sources: Vec<String>,
}

impl TableRow for LeaseProvision {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubleasingProvision {
    pub id: String,
    pub agreement: String,
    pub notes: String,
}

impl TableRow for SubleasingProvision {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn precedent_documents() -> Vec<PrecedentDocument> {
    [
        "Activision Agreement.pdf",
        "Acme Agreement.pdf",
        "Metlife Agreement.pdf",
        "Hooli Agreement.pdf",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, title)| PrecedentDocument {
        id: (i + 1).to_string(),
        title: title.to_string(),
        notes: "This agreement meets the criteria".to_string(),
    })
    .collect()
}

pub fn lease_provisions() -> Vec<LeaseProvision> {
    let rows: [(&str, &str, [&str; 2]); 6] = [
        (
            "Reduced Penalty Model",
            "12-month notice, 6 months' base rent penalty, available after Year 2",
            ["Series B Startup Lease.pdf", "TechCorp Agreement.pdf"],
        ),
        (
            "Sliding Scale Penalties",
            "9-month notice, penalties decrease over lease term (12mo→6mo→3mo)",
            ["WeWork Sublease.pdf", "Flexible Office Lease.pdf"],
        ),
        (
            "Business Justification",
            "6-month notice, 3 months' rent penalty, must demonstrate 50%+ downsizing",
            ["Fintech Headquarters.pdf", "Startup Campus Lease.pdf"],
        ),
        (
            "Expansion/Contraction Triggers",
            "90-day notice, no penalty if expanding >50% or shrinking >30%",
            ["Scaling SaaS Lease.pdf", "Growth Company Agreement.pdf"],
        ),
        (
            "Acquisition/Funding Triggers",
            "30-day notice, 1 month penalty upon M&A or major funding round",
            ["Unicorn Startup Lease.pdf", "Series C Company.pdf"],
        ),
        (
            "Market Standard Plus",
            "12-month notice, 9 months' rent penalty, available after Year 1",
            ["Spotify Lease.pdf", "Mid-Market Tech.pdf"],
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (topic, notes, sources))| LeaseProvision {
            id: (i + 1).to_string(),
            topic: topic.to_string(),
            notes: notes.to_string(),
            example_sources: sources.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

pub fn subleasing_provisions() -> Vec<SubleasingProvision> {
    let rows = [
        (
            "Spotify Commercial Lease 2023.pdf",
            "Requires landlord's prior written consent, not to be unreasonably withheld or delayed. Tenant may sublease up to 50% of premises without consent if subtenant is in same industry.",
        ),
        (
            "Airbnb Headquarters Lease 2022.pdf",
            "Broad subleasing rights with minimal restrictions. Landlord consent required only for subleases exceeding 75% of total space. Tenant retains primary liability but may collect profits from subletting.",
        ),
        (
            "Slack Office Lease 2024.pdf",
            "Conditional subleasing allowed for 'Permitted Transferees' (affiliates, subsidiaries). All other subleases require landlord approval and cannot exceed 25% of leased premises without additional security deposit.",
        ),
        (
            "Zoom Corporate Lease 2023.pdf",
            "Standard landlord approval required for all subleases. Includes assignment and subletting profit-sharing clause - landlord receives 50% of excess rent above base rent from any sublease arrangement.",
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (agreement, notes))| SubleasingProvision {
            id: (i + 1).to_string(),
            agreement: agreement.to_string(),
            notes: notes.to_string(),
        })
        .collect()
}
