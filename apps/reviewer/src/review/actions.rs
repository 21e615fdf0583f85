//! Quick actions — the one-click review operations offered next to the chat.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::review::pipeline::{PipelineError, ReportPipeline};
use crate::review::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    DetailedReport,
    TailorResume,
    ActionableSuggestions,
    SkillGapAnalysis,
    StrengthsWeaknesses,
    CoverLetter,
}

impl QuickAction {
    pub const ALL: [QuickAction; 6] = [
        QuickAction::TailorResume,
        QuickAction::DetailedReport,
        QuickAction::ActionableSuggestions,
        QuickAction::SkillGapAnalysis,
        QuickAction::StrengthsWeaknesses,
        QuickAction::CoverLetter,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            QuickAction::DetailedReport => "detailed-report",
            QuickAction::TailorResume => "tailor-resume",
            QuickAction::ActionableSuggestions => "actionable-suggestions",
            QuickAction::SkillGapAnalysis => "skill-gap-analysis",
            QuickAction::StrengthsWeaknesses => "strengths-weaknesses",
            QuickAction::CoverLetter => "cover-letter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::DetailedReport => "Detailed Report",
            QuickAction::TailorResume => "Tailor Resume Based on Job Description",
            QuickAction::ActionableSuggestions => "Actionable Suggestions",
            QuickAction::SkillGapAnalysis => "Skill Gap Analysis",
            QuickAction::StrengthsWeaknesses => "Strengths & Weaknesses",
            QuickAction::CoverLetter => "Generate Cover Letter",
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for QuickAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuickAction::ALL
            .into_iter()
            .find(|a| a.slug() == s)
            .ok_or_else(|| format!("unknown action '{s}'"))
    }
}

/// Result of a quick action, ready to append to the chat log.
#[derive(Debug, Clone)]
pub enum ActionOutput {
    Report(Report),
    Text(String),
}

impl ActionOutput {
    pub fn to_markdown(&self) -> String {
        match self {
            ActionOutput::Report(report) => report.to_markdown(),
            ActionOutput::Text(text) => text.clone(),
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            ActionOutput::Report(report) => Some(report),
            ActionOutput::Text(_) => None,
        }
    }
}

pub async fn run_action(
    pipeline: &ReportPipeline,
    action: QuickAction,
    resume: Option<&str>,
    job_description: Option<&str>,
) -> Result<ActionOutput, PipelineError> {
    let output = match action {
        QuickAction::DetailedReport => {
            ActionOutput::Report(pipeline.generate_report(resume, job_description).await?)
        }
        QuickAction::TailorResume => {
            let text = pipeline
                .generate_tailored_resume(resume, job_description)
                .await?;
            ActionOutput::Text(format!("**New Resume Based on Job Description:**\n\n{text}"))
        }
        QuickAction::CoverLetter => {
            let text = pipeline
                .generate_cover_letter(resume, job_description)
                .await?;
            ActionOutput::Text(format!("**Generated Cover Letter:**\n\n{text}"))
        }
        QuickAction::ActionableSuggestions => ActionOutput::Text(
            pipeline
                .generate_section("actionable-steps", resume, job_description)
                .await?,
        ),
        QuickAction::SkillGapAnalysis => ActionOutput::Text(
            pipeline
                .generate_section("gap-analysis", resume, job_description)
                .await?,
        ),
        QuickAction::StrengthsWeaknesses => ActionOutput::Text(
            pipeline
                .generate_section("resume-analysis", resume, job_description)
                .await?,
        ),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::mock::MockLlmClient;
    use crate::review::catalog::{render, CatalogError, REPORT_TEMPLATES};

    const RESUME: &str = "John Smith. Data engineer. Airflow, Spark, Python.";
    const JD: &str = "Analytics Engineer. dbt, SQL, Snowflake.";

    #[test]
    fn test_slug_round_trips_for_every_action() {
        for action in QuickAction::ALL {
            assert_eq!(action.slug().parse::<QuickAction>().unwrap(), action);
        }
        assert!("make-coffee".parse::<QuickAction>().is_err());
    }

    #[test]
    fn test_serde_matches_slug() {
        let json = serde_json::to_string(&QuickAction::SkillGapAnalysis).unwrap();
        assert_eq!(json, "\"skill-gap-analysis\"");
    }

    #[tokio::test]
    async fn test_strengths_weaknesses_needs_only_resume() {
        let mock = MockLlmClient::with_responder(|_| "Strong Spark background".to_string());
        let pipeline = ReportPipeline::new(Arc::new(mock.clone()), 1);

        let output = run_action(&pipeline, QuickAction::StrengthsWeaknesses, Some(RESUME), None)
            .await
            .unwrap();

        assert_eq!(output.to_markdown(), "Strong Spark background");
        assert_eq!(
            mock.calls()[0].user,
            render("resume-analysis", Some(RESUME), None).unwrap()
        );
    }

    #[tokio::test]
    async fn test_tailor_resume_is_headed() {
        let mock = MockLlmClient::with_responder(|_| "RESUME V2".to_string());
        let pipeline = ReportPipeline::new(Arc::new(mock), 1);

        let output = run_action(&pipeline, QuickAction::TailorResume, Some(RESUME), Some(JD))
            .await
            .unwrap();

        assert_eq!(
            output.to_markdown(),
            "**New Resume Based on Job Description:**\n\nRESUME V2"
        );
        assert!(output.report().is_none());
    }

    #[tokio::test]
    async fn test_detailed_report_returns_report() {
        let mock = MockLlmClient::default();
        let pipeline = ReportPipeline::new(Arc::new(mock), 1);

        let output = run_action(&pipeline, QuickAction::DetailedReport, Some(RESUME), Some(JD))
            .await
            .unwrap();

        assert_eq!(output.report().unwrap().len(), REPORT_TEMPLATES.len());
        assert!(output.to_markdown().starts_with("**Comparison Analysis:**"));
    }

    #[tokio::test]
    async fn test_skill_gap_without_job_description_is_missing_input() {
        let mock = MockLlmClient::default();
        let pipeline = ReportPipeline::new(Arc::new(mock.clone()), 1);

        let err = run_action(&pipeline, QuickAction::SkillGapAnalysis, Some(RESUME), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Catalog(CatalogError::MissingInput { .. })
        ));
        assert_eq!(mock.call_count(), 0);
    }
}
