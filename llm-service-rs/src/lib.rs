// llm-service-rs/src/lib.rs
//
// Generative-AI layer of the event planner: a resilient Gemini client, JSON
// extraction from model text, and the use-case generators with their static
// fallbacks.

pub mod contract;
pub mod extractor;
pub mod fallbacks;
pub mod gemini_client;
pub mod generators;
pub mod models;
pub mod prompts;
pub mod provider;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod tests;

pub use contract::ContractAnalyzer;
pub use extractor::{extract_json, ExtractionError, JsonShape};
pub use gemini_client::{GeminiClient, RemoteCallOutcome};
pub use generators::EventGenerator;
pub use models::{
    BudgetLine, ContractAnalysis, ContractWarning, PersonalDetails, ScheduleItem, ThemeBoard,
    Vendor,
};
pub use prompts::{GenerationRequest, PriorityLevel};
pub use provider::{Embedder, TextGenerator};
