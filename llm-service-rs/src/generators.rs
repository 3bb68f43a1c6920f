// llm-service-rs/src/generators.rs
//
// Use-case generators. Each one builds a prompt, calls the text model,
// extracts and decodes the JSON, and on any failure substitutes its static
// fallback. Callers always get content; `FallbackResult` says which kind.

use std::collections::BTreeMap;
use std::sync::Arc;

use error_handling::{with_fallback, Error, FallbackResult, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::extractor::extract_json;
use crate::fallbacks;
use crate::models::{BudgetLine, ScheduleItem, ThemeBoard, Vendor};
use crate::prompts::{GenerationRequest, PriorityLevel, DEFAULT_TOTAL_BUDGET};
use crate::provider::TextGenerator;

#[derive(Clone)]
pub struct EventGenerator {
    text: Arc<dyn TextGenerator>,
}

impl EventGenerator {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    /// Prompt -> remote call -> extraction -> typed decode.
    pub async fn generate<T: DeserializeOwned>(&self, request: &GenerationRequest) -> Result<T> {
        let raw = self.text.generate_text(&request.prompt()).await?;
        let value = extract_json(&raw, request.expected_shape())?;

        if matches!(&value, Value::Array(items) if items.is_empty()) {
            return Err(Error::extraction("model returned an empty array"));
        }

        debug!(use_case = request.use_case(), "Extracted model response");
        serde_json::from_value(value).map_err(Error::from)
    }

    pub async fn schedule(
        &self,
        event_type: &str,
        duration_hours: f64,
        activities: &[String],
    ) -> FallbackResult<Vec<ScheduleItem>> {
        let request = GenerationRequest::Schedule {
            event_type: event_type.to_string(),
            duration_hours,
            activities: activities.to_vec(),
        };
        info!(event_type = %event_type, "Generating schedule");

        with_fallback(request.use_case(), self.generate(&request), fallbacks::schedule).await
    }

    pub async fn theme(&self, description: &str) -> FallbackResult<ThemeBoard> {
        let request = GenerationRequest::Theme {
            description: description.to_string(),
        };
        info!("Generating theme");

        with_fallback(request.use_case(), self.generate(&request), || {
            fallbacks::theme(description)
        })
        .await
    }

    /// `total_budget` of `None` or zero falls back to the default budget,
    /// both in the prompt and in the static split.
    pub async fn budget(
        &self,
        total_budget: Option<f64>,
        priorities: BTreeMap<String, PriorityLevel>,
        event_type: &str,
        guest_count: u32,
    ) -> FallbackResult<Vec<BudgetLine>> {
        let total_budget = total_budget
            .filter(|b| b.is_finite() && *b > 0.0)
            .unwrap_or(DEFAULT_TOTAL_BUDGET);
        let request = GenerationRequest::Budget {
            total_budget,
            priorities,
            event_type: event_type.to_string(),
            guest_count,
        };
        info!(total_budget, guest_count, "Allocating budget");

        with_fallback(request.use_case(), self.generate(&request), || {
            fallbacks::budget(total_budget)
        })
        .await
    }

    /// Three synthetic vendors for a vibe description.
    pub async fn vendor_recommendations(&self, vibe: &str) -> FallbackResult<Vec<Vendor>> {
        let request = GenerationRequest::VendorQuery {
            query: vibe.to_string(),
        };
        info!(vibe = %vibe, "Generating vendor recommendations");

        with_fallback(request.use_case(), self.generate(&request), || {
            fallbacks::vendors(vibe)
        })
        .await
        .map(|vendors: Vec<Vendor>| {
            vendors
                .into_iter()
                .map(|vendor| Vendor {
                    is_ai_generated: true,
                    ..vendor
                })
                .collect()
        })
    }
}
