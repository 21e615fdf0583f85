//! Report Pipeline — sequences the LLM calls behind every review operation.
//!
//! Flow for the detailed report: resolve template names → render each prompt →
//! call the LLM once per rendered prompt → assemble sections in catalog order.
//!
//! The pipeline is stateless: each call works only from the document texts it
//! is given, and the `Report` it returns is built locally.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::{chat_system_prompt, REVIEWER_PERSONA, REVIEW_TEMPERATURE};
use crate::llm_client::{ChatMessage, LlmClient, LlmError};
use crate::review::catalog::{
    lookup, present, report_templates, CatalogError, PromptTemplate, COVER_LETTER_TEMPLATE,
    GAP_ANALYSIS_TEMPLATE, RESUME_EDIT_TEMPLATE,
};
use crate::review::report::{AnalysisResult, Report};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("LLM call for '{template}' failed: {source}")]
    Llm {
        template: &'static str,
        #[source]
        source: LlmError,
    },
}

#[derive(Clone)]
pub struct ReportPipeline {
    llm: Arc<dyn LlmClient>,
    /// Max in-flight LLM calls within one report. Never below 1.
    concurrency: usize,
}

impl ReportPipeline {
    pub fn new(llm: Arc<dyn LlmClient>, concurrency: usize) -> Self {
        Self {
            llm,
            concurrency: concurrency.max(1),
        }
    }

    /// Runs every report template and returns one section per template.
    ///
    /// Missing documents and failed calls become section markers. Only an
    /// unknown template name (a catalog defect) is returned as an error.
    pub async fn generate_report(
        &self,
        resume: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<Report, CatalogError> {
        let names: Vec<&str> = report_templates().iter().map(|t| t.name).collect();
        self.generate_sections(&names, resume, job_description)
            .await
    }

    /// Report over an explicit list of template names, in the given order.
    pub async fn generate_sections(
        &self,
        names: &[&str],
        resume: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<Report, CatalogError> {
        let resume = present(resume);
        let job_description = present(job_description);
        if resume.is_none() && job_description.is_none() {
            info!("Report requested with no documents; skipping all LLM calls");
            return Ok(Report::no_input());
        }

        let templates = names
            .iter()
            .map(|name| lookup(name))
            .collect::<Result<Vec<_>, _>>()?;

        let calls: Vec<_> = templates
            .into_iter()
            .map(|template| self.run_section(template, resume, job_description))
            .collect();

        // `buffered` yields in submission order, so sections land by catalog
        // index no matter which call finishes first.
        let sections: Vec<AnalysisResult> = stream::iter(calls)
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = Report::new(sections);
        let summary = report.summary();
        info!(
            "Report assembled: {} sections ({} completed, {} skipped, {} failed)",
            report.len(),
            summary.completed,
            summary.skipped,
            summary.failed
        );

        Ok(report)
    }

    async fn run_section(
        &self,
        template: &PromptTemplate,
        resume: Option<&str>,
        job_description: Option<&str>,
    ) -> AnalysisResult {
        let prompt = match template.render(resume, job_description) {
            Ok(prompt) => prompt,
            Err(CatalogError::MissingInput { missing, .. }) => {
                warn!("Section '{}' skipped: missing {:?}", template.name, missing);
                return AnalysisResult::skipped(template, missing);
            }
            Err(e) => return AnalysisResult::failed(template, e.to_string()),
        };

        match self
            .llm
            .complete(REVIEWER_PERSONA, &prompt, REVIEW_TEMPERATURE)
            .await
        {
            Ok(text) => AnalysisResult::completed(template, text),
            Err(e) => {
                warn!("Section '{}' failed: {e}", template.name);
                AnalysisResult::failed(template, e.to_string())
            }
        }
    }

    /// Gap analysis, then a full rewrite. Only the rewrite is returned.
    ///
    /// Both prompts are rendered before any call, so a missing document costs
    /// zero LLM calls.
    pub async fn generate_tailored_resume(
        &self,
        resume: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<String, PipelineError> {
        let gap_template = lookup(GAP_ANALYSIS_TEMPLATE)?;
        let edit_template = lookup(RESUME_EDIT_TEMPLATE)?;
        let gap_prompt = gap_template.render(resume, job_description)?;
        let edit_prompt = edit_template.render(resume, job_description)?;

        let gap_analysis = self.call(gap_template, &gap_prompt).await?;
        debug!(
            "Gap analysis for tailored resume: {} chars (not used by the rewrite)",
            gap_analysis.len()
        );

        self.call(edit_template, &edit_prompt).await
    }

    pub async fn generate_cover_letter(
        &self,
        resume: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<String, PipelineError> {
        self.generate_section(COVER_LETTER_TEMPLATE, resume, job_description)
            .await
    }

    /// One template, one call. Errors propagate instead of becoming markers.
    pub async fn generate_section(
        &self,
        name: &str,
        resume: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<String, PipelineError> {
        let template = lookup(name)?;
        let prompt = template.render(resume, job_description)?;
        self.call(template, &prompt).await
    }

    /// Free-form one-shot query. Failures come back as display text.
    pub async fn generate_response(&self, prompt: &str) -> String {
        match self
            .llm
            .complete(REVIEWER_PERSONA, prompt, REVIEW_TEMPERATURE)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Free-form response failed: {e}");
                format!("Error: {e}")
            }
        }
    }

    /// Free-form chat with the documents embedded in the system prompt and the
    /// last `window` exchanges replayed. `history` ends with the new user message.
    pub async fn chat_reply(
        &self,
        resume: Option<&str>,
        job_description: Option<&str>,
        history: &[ChatMessage],
        window: usize,
    ) -> Result<String, LlmError> {
        let system = chat_system_prompt(present(resume), present(job_description));
        self.llm
            .chat(&system, windowed(history, window), REVIEW_TEMPERATURE)
            .await
    }

    async fn call(&self, template: &PromptTemplate, prompt: &str) -> Result<String, PipelineError> {
        self.llm
            .complete(REVIEWER_PERSONA, prompt, REVIEW_TEMPERATURE)
            .await
            .map_err(|source| PipelineError::Llm {
                template: template.name,
                source,
            })
    }
}

/// Keeps the last `window` user/assistant exchanges plus the pending message.
fn windowed(history: &[ChatMessage], window: usize) -> &[ChatMessage] {
    let keep = window.saturating_mul(2).saturating_add(1);
    &history[history.len().saturating_sub(keep)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::MockLlmClient;
    use crate::review::catalog::{render, Slot, REPORT_TEMPLATES};
    use crate::review::report::SectionOutcome;

    const RESUME: &str = "Jane Doe. Rust engineer. Built a Kafka ingestion service handling 2M events/day.";
    const JD: &str = "Senior Backend Engineer. Required: Rust, Kubernetes, 5+ years.";

    fn pipeline(mock: &MockLlmClient, concurrency: usize) -> ReportPipeline {
        ReportPipeline::new(Arc::new(mock.clone()), concurrency)
    }

    fn prompt_for(name: &str) -> String {
        render(name, Some(RESUME), Some(JD)).unwrap()
    }

    #[tokio::test]
    async fn test_no_documents_yields_single_no_input_section() {
        let mock = MockLlmClient::default();
        let report = pipeline(&mock, 1).generate_report(None, None).await.unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.sections()[0].outcome, SectionOutcome::NoInput);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_full_report_has_one_section_per_template_in_order() {
        let mock = MockLlmClient::default();
        let report = pipeline(&mock, 1)
            .generate_report(Some(RESUME), Some(JD))
            .await
            .unwrap();

        let names: Vec<_> = report.sections().iter().map(|s| s.section.as_str()).collect();
        let expected: Vec<_> = REPORT_TEMPLATES.iter().map(|t| t.name).collect();
        assert_eq!(names, expected);
        assert_eq!(report.summary().completed, REPORT_TEMPLATES.len());
        assert_eq!(mock.call_count(), REPORT_TEMPLATES.len());
    }

    #[tokio::test]
    async fn test_every_call_uses_persona_and_zero_temperature() {
        let mock = MockLlmClient::default();
        pipeline(&mock, 1)
            .generate_report(Some(RESUME), Some(JD))
            .await
            .unwrap();

        for call in mock.calls() {
            assert_eq!(call.system, REVIEWER_PERSONA);
            assert_eq!(call.temperature, 0.0);
        }
    }

    #[tokio::test]
    async fn test_resume_only_skips_job_description_sections() {
        let mock = MockLlmClient::with_responder(|_| "analysis".to_string());
        let report = pipeline(&mock, 1)
            .generate_report(Some(RESUME), None)
            .await
            .unwrap();

        assert_eq!(report.len(), REPORT_TEMPLATES.len());
        for (section, template) in report.sections().iter().zip(REPORT_TEMPLATES) {
            if template.requires(Slot::JobDescription) {
                assert_eq!(
                    section.outcome,
                    SectionOutcome::Skipped {
                        missing: vec![Slot::JobDescription]
                    },
                    "{}",
                    template.name
                );
                assert_eq!(section.body(), "_Skipped: missing job description_");
            } else {
                assert_eq!(
                    section.outcome,
                    SectionOutcome::Completed {
                        text: "analysis".to_string()
                    },
                    "{}",
                    template.name
                );
            }
        }

        let resume_only = REPORT_TEMPLATES
            .iter()
            .filter(|t| !t.requires(Slot::JobDescription))
            .count();
        assert_eq!(mock.call_count(), resume_only);
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let mock = MockLlmClient::default().failing_on(prompt_for("actionable-steps"));
        let report = pipeline(&mock, 1)
            .generate_report(Some(RESUME), Some(JD))
            .await
            .unwrap();

        assert_eq!(report.len(), REPORT_TEMPLATES.len());
        let failed: Vec<_> = report
            .sections()
            .iter()
            .filter(|s| matches!(s.outcome, SectionOutcome::Failed { .. }))
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].section, "actionable-steps");
        assert!(failed[0].body().contains("mock LLM error"));
        assert_eq!(report.summary().completed, REPORT_TEMPLATES.len() - 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_assembly_order_ignores_completion_order() {
        // Earlier templates get longer delays, so calls finish in reverse order.
        let count = REPORT_TEMPLATES.len() as u64;
        let mut mock = MockLlmClient::with_responder(|prompt| prompt.to_string());
        for (i, template) in REPORT_TEMPLATES.iter().enumerate() {
            mock = mock.with_delay_on(prompt_for(template.name), (count - i as u64) * 100);
        }

        let report = pipeline(&mock, REPORT_TEMPLATES.len())
            .generate_report(Some(RESUME), Some(JD))
            .await
            .unwrap();

        for (section, template) in report.sections().iter().zip(REPORT_TEMPLATES) {
            assert_eq!(section.section, template.name);
            assert_eq!(
                section.outcome,
                SectionOutcome::Completed {
                    text: prompt_for(template.name)
                }
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_template_propagates_without_calls() {
        let mock = MockLlmClient::default();
        let err = pipeline(&mock, 1)
            .generate_sections(&["comparison", "astrology"], Some(RESUME), Some(JD))
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::UnknownTemplate("astrology".to_string()));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_tailored_resume_makes_two_calls_and_returns_rewrite() {
        let gap_prompt = prompt_for("gap-analysis");
        let mock = MockLlmClient::with_responder(move |prompt| {
            if prompt == gap_prompt {
                "GAP: Kubernetes".to_string()
            } else {
                "REWRITTEN RESUME".to_string()
            }
        });

        let text = pipeline(&mock, 1)
            .generate_tailored_resume(Some(RESUME), Some(JD))
            .await
            .unwrap();

        assert_eq!(text, "REWRITTEN RESUME");
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].user, prompt_for("gap-analysis"));
        assert_eq!(calls[1].user, prompt_for("resume-edit"));
    }

    #[tokio::test]
    async fn test_tailored_resume_requires_both_documents() {
        let mock = MockLlmClient::default();
        let err = pipeline(&mock, 1)
            .generate_tailored_resume(Some(RESUME), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Catalog(CatalogError::MissingInput { .. })
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_tailored_resume_fails_if_gap_call_fails() {
        let mock = MockLlmClient::default().failing_on(prompt_for("gap-analysis"));
        let err = pipeline(&mock, 1)
            .generate_tailored_resume(Some(RESUME), Some(JD))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Llm {
                template: "gap-analysis",
                ..
            }
        ));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cover_letter_single_call() {
        let mock = MockLlmClient::with_responder(|_| "Dear Hiring Manager".to_string());
        let text = pipeline(&mock, 1)
            .generate_cover_letter(Some(RESUME), Some(JD))
            .await
            .unwrap();

        assert_eq!(text, "Dear Hiring Manager");
        assert_eq!(mock.calls()[0].user, prompt_for("cover-letter"));
    }

    #[tokio::test]
    async fn test_cover_letter_requires_both_documents() {
        let mock = MockLlmClient::default();
        let err = pipeline(&mock, 1)
            .generate_cover_letter(None, Some(JD))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Catalog(CatalogError::MissingInput { ref missing, .. })
                if missing == &vec![Slot::Resume]
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_response_turns_errors_into_text() {
        let mock = MockLlmClient::default().failing_on("salary");
        let text = pipeline(&mock, 1)
            .generate_response("What salary should I ask for?")
            .await;
        assert!(text.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_chat_reply_replays_only_window() {
        let mock = MockLlmClient::with_responder(|_| "reply".to_string());
        let history = vec![
            ChatMessage::user("q1"),
            ChatMessage::assistant("a1"),
            ChatMessage::user("q2"),
            ChatMessage::assistant("a2"),
            ChatMessage::user("q3"),
        ];

        let reply = pipeline(&mock, 1)
            .chat_reply(Some(RESUME), Some(JD), &history, 1)
            .await
            .unwrap();

        assert_eq!(reply, "reply");
        let call = &mock.calls()[0];
        assert_eq!(call.history_len, 3);
        assert_eq!(call.user, "q3");
        assert!(call.system.contains(RESUME));
        assert!(call.system.contains(JD));
    }

    #[test]
    fn test_windowed_keeps_everything_when_short() {
        let history = vec![ChatMessage::user("only")];
        assert_eq!(windowed(&history, 5).len(), 1);
        assert_eq!(windowed(&history, 0).len(), 1);
    }

    #[test]
    fn test_windowed_huge_window_keeps_everything() {
        let history = vec![
            ChatMessage::user("q1"),
            ChatMessage::assistant("a1"),
            ChatMessage::user("q2"),
        ];
        assert_eq!(windowed(&history, usize::MAX).len(), 3);
    }

    #[tokio::test]
    async fn test_blank_documents_count_as_no_input() {
        let mock = MockLlmClient::default();
        let report = pipeline(&mock, 1)
            .generate_report(Some(""), Some("   \n\t"))
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.sections()[0].outcome, SectionOutcome::NoInput);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_job_description_skips_its_sections() {
        let mock = MockLlmClient::default();
        let report = pipeline(&mock, 1)
            .generate_report(Some(RESUME), Some("  "))
            .await
            .unwrap();

        let resume_only = REPORT_TEMPLATES
            .iter()
            .filter(|t| !t.requires(Slot::JobDescription))
            .count();
        assert_eq!(report.summary().completed, resume_only);
        assert_eq!(report.summary().skipped, REPORT_TEMPLATES.len() - resume_only);
        assert_eq!(mock.call_count(), resume_only);
    }

    #[tokio::test]
    async fn test_tailored_resume_with_blank_documents_makes_no_calls() {
        let mock = MockLlmClient::default();
        let err = pipeline(&mock, 1)
            .generate_tailored_resume(Some(""), Some(" "))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Catalog(CatalogError::MissingInput { ref missing, .. })
                if missing == &vec![Slot::Resume, Slot::JobDescription]
        ));
        assert_eq!(mock.call_count(), 0);
    }
}
