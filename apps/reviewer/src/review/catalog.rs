//! Prompt Catalog — the fixed, ordered set of analysis templates.
//!
//! Each template declares the document slots it needs. `render` checks the
//! declaration before touching the template text, so a missing document is a
//! typed `MissingInput` error and never a half-filled prompt.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::review::prompts::{
    ACTIONABLE_STEPS, ADDITIONAL_QUALIFICATIONS, COMPARISON, COVER_LETTER,
    EXPERIENCE_ENHANCEMENT, GAP_ANALYSIS, JOB_DESCRIPTION_ANALYSIS, JOB_DESCRIPTION_PLACEHOLDER,
    RELEVANT_SKILLS_HIGHLIGHT, RESUME_ANALYSIS, RESUME_EDIT, RESUME_FORMATTING, RESUME_LENGTH,
    RESUME_PLACEHOLDER, RESUME_TAILORING,
};

/// An input document a template can consume. Declaration order is slot order:
/// resume first, job description second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Resume,
    JobDescription,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Resume => f.write_str("resume"),
            Slot::JobDescription => f.write_str("job description"),
        }
    }
}

const RESUME_ONLY: &[Slot] = &[Slot::Resume];
const JOB_DESCRIPTION_ONLY: &[Slot] = &[Slot::JobDescription];
const BOTH: &[Slot] = &[Slot::Resume, Slot::JobDescription];

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("template '{template}' is missing input: {}", join_slots(.missing))]
    MissingInput {
        template: &'static str,
        missing: Vec<Slot>,
    },

    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
}

fn join_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(Slot::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A static template descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptTemplate {
    /// Stable kebab-case identifier.
    pub name: &'static str,
    /// Heading used when the section is rendered in a report.
    pub title: &'static str,
    pub slots: &'static [Slot],
    pub template: &'static str,
}

impl PromptTemplate {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn requires(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    /// Fills the template. Fails if any declared slot has no text.
    pub fn render(
        &self,
        resume: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<String, CatalogError> {
        let resume = present(resume);
        let job_description = present(job_description);
        let missing: Vec<Slot> = self
            .slots
            .iter()
            .copied()
            .filter(|slot| match slot {
                Slot::Resume => resume.is_none(),
                Slot::JobDescription => job_description.is_none(),
            })
            .collect();

        if !missing.is_empty() {
            return Err(CatalogError::MissingInput {
                template: self.name,
                missing,
            });
        }

        Ok(substitute(
            self.template,
            resume.unwrap_or_default(),
            job_description.unwrap_or_default(),
        ))
    }
}

/// Blank or whitespace-only text counts as no document.
pub fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Templates of the detailed report, in report order.
pub const REPORT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        name: "comparison",
        title: "Comparison Analysis",
        slots: BOTH,
        template: COMPARISON,
    },
    PromptTemplate {
        name: "resume-analysis",
        title: "Resume Analysis",
        slots: RESUME_ONLY,
        template: RESUME_ANALYSIS,
    },
    PromptTemplate {
        name: "job-description-analysis",
        title: "Job Description Analysis",
        slots: JOB_DESCRIPTION_ONLY,
        template: JOB_DESCRIPTION_ANALYSIS,
    },
    PromptTemplate {
        name: "gap-analysis",
        title: "Gap Analysis",
        slots: BOTH,
        template: GAP_ANALYSIS,
    },
    PromptTemplate {
        name: "actionable-steps",
        title: "Actionable Steps",
        slots: BOTH,
        template: ACTIONABLE_STEPS,
    },
    PromptTemplate {
        name: "experience-enhancement",
        title: "Experience Enhancement",
        slots: BOTH,
        template: EXPERIENCE_ENHANCEMENT,
    },
    PromptTemplate {
        name: "additional-qualifications",
        title: "Additional Qualifications",
        slots: BOTH,
        template: ADDITIONAL_QUALIFICATIONS,
    },
    PromptTemplate {
        name: "resume-tailoring",
        title: "Resume Tailoring",
        slots: BOTH,
        template: RESUME_TAILORING,
    },
    PromptTemplate {
        name: "relevant-skills-highlight",
        title: "Relevant Skills Highlight",
        slots: BOTH,
        template: RELEVANT_SKILLS_HIGHLIGHT,
    },
    PromptTemplate {
        name: "resume-formatting",
        title: "Resume Formatting",
        slots: RESUME_ONLY,
        template: RESUME_FORMATTING,
    },
    PromptTemplate {
        name: "resume-length",
        title: "Resume Length",
        slots: BOTH,
        template: RESUME_LENGTH,
    },
];

/// Templates that are invoked directly and never appear in the report.
pub const STANDALONE_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        name: "resume-edit",
        title: "New Resume Based on Job Description",
        slots: BOTH,
        template: RESUME_EDIT,
    },
    PromptTemplate {
        name: "cover-letter",
        title: "Generated Cover Letter",
        slots: BOTH,
        template: COVER_LETTER,
    },
];

pub const GAP_ANALYSIS_TEMPLATE: &str = "gap-analysis";
pub const RESUME_EDIT_TEMPLATE: &str = "resume-edit";
pub const COVER_LETTER_TEMPLATE: &str = "cover-letter";

pub fn report_templates() -> &'static [PromptTemplate] {
    REPORT_TEMPLATES
}

pub fn lookup(name: &str) -> Result<&'static PromptTemplate, CatalogError> {
    REPORT_TEMPLATES
        .iter()
        .chain(STANDALONE_TEMPLATES)
        .find(|t| t.name == name)
        .ok_or_else(|| CatalogError::UnknownTemplate(name.to_string()))
}

/// Renders the named template. Pure: no I/O, no shared state.
pub fn render(
    name: &str,
    resume: Option<&str>,
    job_description: Option<&str>,
) -> Result<String, CatalogError> {
    lookup(name)?.render(resume, job_description)
}

/// Single left-to-right pass so that placeholder-looking text inside a
/// document is copied verbatim instead of being substituted again.
fn substitute(template: &str, resume: &str, job_description: &str) -> String {
    let mut out = String::with_capacity(template.len() + resume.len() + job_description.len());
    let mut rest = template;

    loop {
        let next = [
            (RESUME_PLACEHOLDER, resume),
            (JOB_DESCRIPTION_PLACEHOLDER, job_description),
        ]
        .into_iter()
        .filter_map(|(placeholder, value)| rest.find(placeholder).map(|i| (i, placeholder, value)))
        .min_by_key(|(i, _, _)| *i);

        match next {
            Some((i, placeholder, value)) => {
                out.push_str(&rest[..i]);
                out.push_str(value);
                rest = &rest[i + placeholder.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
