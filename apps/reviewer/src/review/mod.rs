// Review engine: prompt catalog, report model, report pipeline and quick actions.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod actions;
pub mod catalog;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod report;
