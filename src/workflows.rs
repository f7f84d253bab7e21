use regex::RegexBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowType {
    Draft,
    Output,
    Review,
}

impl WorkflowType {
    pub fn label(self) -> &'static str {
        match self {
            WorkflowType::Draft => "Draft",
            WorkflowType::Output => "Output",
            WorkflowType::Review => "Review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowTab {
    #[default]
    Recommended,
    Draft,
    Output,
    Review,
}

impl WorkflowTab {
    pub const ALL: [WorkflowTab; 4] = [
        WorkflowTab::Recommended,
        WorkflowTab::Draft,
        WorkflowTab::Output,
        WorkflowTab::Review,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkflowTab::Recommended => "Recommended",
            WorkflowTab::Draft => "Draft",
            WorkflowTab::Output => "Output",
            WorkflowTab::Review => "Review",
        }
    }

    fn admits(self, kind: WorkflowType) -> bool {
        match self {
            WorkflowTab::Recommended => true,
            tab => tab.label().eq_ignore_ascii_case(kind.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    #[allow(dead_code)]
    pub id: u32,
    pub title: &'static str,
    pub kind: WorkflowType,
    pub steps: u32,
    pub description: &'static str,
}

impl Workflow {
    pub fn steps_label(&self) -> String {
        if self.steps == 1 {
            "1 step".to_string()
        } else {
            format!("{} steps", self.steps)
        }
    }
}

pub fn catalog() -> Vec<Workflow> {
    vec![
        Workflow {
            id: 1,
            title: "Draft a client alert",
            kind: WorkflowType::Draft,
            steps: 5,
            description: "Create professional client communications",
        },
        Workflow {
            id: 2,
            title: "Generate post-closing timeline",
            kind: WorkflowType::Output,
            steps: 2,
            description: "Develop comprehensive closing schedules",
        },
        Workflow {
            id: 3,
            title: "Extract chronology of key events",
            kind: WorkflowType::Review,
            steps: 2,
            description: "Identify and organize important events",
        },
        Workflow {
            id: 4,
            title: "Extract terms from stock purchase agreements",
            kind: WorkflowType::Output,
            steps: 2,
            description: "Parse and extract key contract terms",
        },
    ]
}

/// Workflows shown for `tab`, narrowed by `query`.
///
/// The query is tried as a case-insensitive regex over title and
/// description; if it does not compile it is matched as a plain substring.
pub fn filter<'a>(workflows: &'a [Workflow], tab: WorkflowTab, query: &str) -> Vec<&'a Workflow> {
    let query = query.trim();
    let matcher: Box<dyn Fn(&str) -> bool> = if query.is_empty() {
        Box::new(|_: &str| true)
    } else {
        match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(re) => Box::new(move |text: &str| re.is_match(text)),
            Err(_) => {
                let needle = query.to_lowercase();
                Box::new(move |text: &str| text.to_lowercase().contains(&needle))
            }
        }
    };

    workflows
        .iter()
        .filter(|w| tab.admits(w.kind))
        .filter(|w| matcher(w.title) || matcher(w.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(found: Vec<&Workflow>) -> Vec<u32> {
        found.into_iter().map(|w| w.id).collect()
    }

    #[test]
    fn test_recommended_shows_everything() {
        let all = catalog();
        assert_eq!(ids(filter(&all, WorkflowTab::Recommended, "")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_tab_filters_by_type() {
        let all = catalog();
        assert_eq!(ids(filter(&all, WorkflowTab::Output, "")), vec![2, 4]);
        assert_eq!(ids(filter(&all, WorkflowTab::Review, "  ")), vec![3]);
    }

    #[test]
    fn test_search_is_case_insensitive_regex() {
        let all = catalog();
        assert_eq!(ids(filter(&all, WorkflowTab::Recommended, "EXTRACT")), vec![3, 4]);
        assert_eq!(ids(filter(&all, WorkflowTab::Recommended, "^draft")), vec![1]);
        // description matches count too
        assert_eq!(ids(filter(&all, WorkflowTab::Recommended, "closing sched")), vec![2]);
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let mut all = catalog();
        all.push(Workflow {
            id: 5,
            title: "Summarize (draft",
            kind: WorkflowType::Draft,
            steps: 1,
            description: "Unbalanced title",
        });
        assert_eq!(ids(filter(&all, WorkflowTab::Draft, "(DRAFT")), vec![5]);
        assert_eq!(all[4].steps_label(), "1 step");
    }

    #[test]
    fn test_tab_and_search_combine() {
        let all = catalog();
        assert!(filter(&all, WorkflowTab::Review, "stock").is_empty());
        assert_eq!(ids(filter(&all, WorkflowTab::Output, "stock")), vec![4]);
    }
}
