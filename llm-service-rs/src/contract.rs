// llm-service-rs/src/contract.rs
//
// Contract risk analysis. Unlike the generators, a failed remote call is
// returned to the caller (so throttling can reach the client); only an
// unparseable answer degrades to the soft "medium" result.

use std::sync::Arc;

use error_handling::{sanitize_message, Error, FallbackResult, Result};
use tracing::{info, warn};

use crate::extractor::extract_json;
use crate::fallbacks;
use crate::models::ContractAnalysis;
use crate::prompts::GenerationRequest;
use crate::provider::TextGenerator;

#[derive(Clone)]
pub struct ContractAnalyzer {
    text: Arc<dyn TextGenerator>,
}

impl ContractAnalyzer {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    pub async fn analyze(&self, contract_text: &str) -> Result<FallbackResult<ContractAnalysis>> {
        let request = GenerationRequest::Contract {
            raw_text: contract_text.to_string(),
        };
        info!(chars = contract_text.len(), "Analyzing contract");

        let raw = self.text.generate_text(&request.prompt()).await?;

        let parsed = extract_json(&raw, request.expected_shape())
            .map_err(Error::from)
            .and_then(|value| serde_json::from_value::<ContractAnalysis>(value).map_err(Error::from));

        match parsed {
            Ok(analysis) => Ok(FallbackResult::Primary(analysis)),
            Err(err) => {
                warn!(
                    error = %sanitize_message(&err.message),
                    "Contract analysis was not valid JSON, returning raw summary"
                );
                Ok(FallbackResult::Fallback(fallbacks::contract(&raw)))
            }
        }
    }
}
