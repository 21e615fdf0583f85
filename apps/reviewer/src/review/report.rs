//! Report model — the ordered, labeled result of one detailed-report run.

use serde::{Deserialize, Serialize};

use crate::review::catalog::{PromptTemplate, Slot};

pub const NO_INPUT_SECTION: &str = "no-input";
pub const NO_INPUT_TITLE: &str = "Report";
pub const NO_INPUT_MESSAGE: &str =
    "Nothing to analyze: upload a resume and a job description to generate a report.";

/// What happened to one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    Completed { text: String },
    /// A required document was absent; the LLM was not called.
    Skipped { missing: Vec<Slot> },
    /// The LLM call failed; `cause` is human-readable.
    Failed { cause: String },
    /// Neither document was supplied.
    NoInput,
}

/// One labeled analysis in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub section: String,
    pub title: String,
    pub outcome: SectionOutcome,
}

impl AnalysisResult {
    pub fn completed(template: &PromptTemplate, text: String) -> Self {
        Self::new(template, SectionOutcome::Completed { text })
    }

    pub fn skipped(template: &PromptTemplate, missing: Vec<Slot>) -> Self {
        Self::new(template, SectionOutcome::Skipped { missing })
    }

    pub fn failed(template: &PromptTemplate, cause: String) -> Self {
        Self::new(template, SectionOutcome::Failed { cause })
    }

    pub fn no_input() -> Self {
        Self {
            section: NO_INPUT_SECTION.to_string(),
            title: NO_INPUT_TITLE.to_string(),
            outcome: SectionOutcome::NoInput,
        }
    }

    fn new(template: &PromptTemplate, outcome: SectionOutcome) -> Self {
        Self {
            section: template.name.to_string(),
            title: template.title.to_string(),
            outcome,
        }
    }

    /// Display body: the LLM text, or a marker line.
    pub fn body(&self) -> String {
        match &self.outcome {
            SectionOutcome::Completed { text } => text.clone(),
            SectionOutcome::Skipped { missing } => format!(
                "_Skipped: missing {}_",
                missing
                    .iter()
                    .map(Slot::to_string)
                    .collect::<Vec<_>>()
                    .join(" and ")
            ),
            SectionOutcome::Failed { cause } => format!("_Analysis unavailable: {cause}_"),
            SectionOutcome::NoInput => format!("_{NO_INPUT_MESSAGE}_"),
        }
    }
}

/// Counts of section outcomes, for logging and API responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// An immutable, ordered report. Order is catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    sections: Vec<AnalysisResult>,
}

impl Report {
    pub fn new(sections: Vec<AnalysisResult>) -> Self {
        Self { sections }
    }

    pub fn no_input() -> Self {
        Self::new(vec![AnalysisResult::no_input()])
    }

    pub fn sections(&self) -> &[AnalysisResult] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn summary(&self) -> ReportSummary {
        self.sections
            .iter()
            .fold(ReportSummary::default(), |mut acc, s| {
                match s.outcome {
                    SectionOutcome::Completed { .. } => acc.completed += 1,
                    SectionOutcome::Skipped { .. } | SectionOutcome::NoInput => acc.skipped += 1,
                    SectionOutcome::Failed { .. } => acc.failed += 1,
                }
                acc
            })
    }

    /// Markdown rendering appended to the chat log as a single assistant turn.
    pub fn to_markdown(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("**{}:**\n{}", s.title, s.body()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
