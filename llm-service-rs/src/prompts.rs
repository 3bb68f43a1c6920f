// llm-service-rs/src/prompts.rs
//
// One request type per use case. Each variant renders the prompt sent to the
// text model and names the JSON shape expected back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extractor::JsonShape;

/// Budget used when the caller sends none (or zero)
pub const DEFAULT_TOTAL_BUDGET: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerationRequest {
    Schedule {
        event_type: String,
        duration_hours: f64,
        activities: Vec<String>,
    },
    Theme {
        description: String,
    },
    Budget {
        total_budget: f64,
        priorities: BTreeMap<String, PriorityLevel>,
        event_type: String,
        guest_count: u32,
    },
    VendorQuery {
        query: String,
    },
    Contract {
        raw_text: String,
    },
}

impl GenerationRequest {
    /// Bracket kind the model is asked to return
    pub fn expected_shape(&self) -> JsonShape {
        match self {
            GenerationRequest::Theme { .. } | GenerationRequest::Contract { .. } => JsonShape::Object,
            GenerationRequest::Schedule { .. }
            | GenerationRequest::Budget { .. }
            | GenerationRequest::VendorQuery { .. } => JsonShape::Array,
        }
    }

    pub fn use_case(&self) -> &'static str {
        match self {
            GenerationRequest::Schedule { .. } => "schedule",
            GenerationRequest::Theme { .. } => "theme",
            GenerationRequest::Budget { .. } => "budget",
            GenerationRequest::VendorQuery { .. } => "vendor-recommendation",
            GenerationRequest::Contract { .. } => "contract",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            GenerationRequest::Schedule {
                event_type,
                duration_hours,
                activities,
            } => format!(
                r#"Create a detailed "Run of Show" schedule for a {event_type} event.

Duration: {duration_hours} hours
Key Activities: {activities}

Generate a time-stamped schedule ensuring:
- Logical flow of activities
- Appropriate buffer times
- Meal times at reasonable hours
- Setup and breakdown time
- Breaks between intensive activities

Return a JSON array with this structure:
[
  {{
    "time": "HH:MM AM/PM",
    "activity": "Activity name",
    "duration": "X minutes",
    "notes": "Any special notes"
  }}
]

IMPORTANT: Return ONLY the JSON array. No other text."#,
                activities = activities.join(", "),
            ),
            GenerationRequest::Theme { description } => format!(
                r##"Create a detailed visual theme and moodboard for an event with the following description:
"{description}"

Provide a JSON response with:
{{
  "colorPalette": ["#hex1", "#hex2", "#hex3", "#hex4", "#hex5"],
  "visualDescription": "Detailed description of the visual aesthetic",
  "decorElements": ["element1", "element2", ...],
  "lightingStyle": "Description of lighting",
  "atmosphere": "Overall mood and feeling"
}}

IMPORTANT: Return ONLY the JSON object. No other text."##
            ),
            GenerationRequest::Budget {
                total_budget,
                priorities,
                event_type,
                guest_count,
            } => format!(
                r#"Create a smart budget allocation for a {event_type} event with {guest_count} attendees.

Total Budget: ₹{total_budget}
Guest Count: {guest_count} people
Priorities: {priorities}

Based on industry standards and the scale of {guest_count} people, allocate the budget across these categories:
- Venue
- Catering/Food (Consider per-head cost for {guest_count} people)
- Entertainment (DJ/Music)
- Decoration
- Photography/Videography
- Sound & Lighting
- Miscellaneous/Contingency

Return a JSON array:
[
  {{
    "category": "Category name",
    "amount": number,
    "percentage": number,
    "justification": "Why this allocation based on {guest_count} people and priorities",
    "items": ["Specific item 1", "Specific item 2", "Specific item 3"]
  }}
]

Ensure the total adds up to the budget and respects the stated priorities.

IMPORTANT: Return ONLY the JSON array. No other text."#,
                priorities = serde_json::to_string(priorities).unwrap_or_else(|_| "{}".to_string()),
            ),
            GenerationRequest::VendorQuery { query } => format!(
                r#"Based on the following event "vibe" or description, generate 3 sample vendors that would be perfect for this event.
Description: "{query}"

Return a JSON array of 3 vendor objects with this structure:
[
  {{
    "name": "Creative Vendor Name",
    "category": "Catering|DJ/Music|Photography|Decoration|Sound & Lighting",
    "description": "Short catchy description matching the vibe",
    "specialties": ["Specialty 1", "Specialty 2"],
    "style": "Brief style description",
    "priceRange": "$|$$|$$$|$$$$",
    "rating": number (4.0-5.0),
    "phoneNumber": "+91 9xxx-xxxxx",
    "highlights": ["Highlight 1", "Highlight 2"],
    "teamInfo": "Brief background about the team or owner",
    "personalDetails": {{ "yearsExp": number, "location": "City, Service Area", "teamSize": number }},
    "isAIGenerated": true
  }}
]

IMPORTANT: Return ONLY the JSON array. No other text."#
            ),
            GenerationRequest::Contract { raw_text } => format!(
                r#"You are a legal contract analyzer. Analyze the following contract and identify any risky, unfair, or non-standard clauses. Focus on:
- Cancellation policies
- Hidden fees or overtime charges
- Refund policies
- Liability clauses
- Payment terms

Contract:
{raw_text}

Provide a JSON response with the following structure:
{{
  "riskLevel": "low|medium|high",
  "warnings": [
    {{
      "clause": "Clause reference",
      "issue": "Description of the issue",
      "severity": "low|medium|high"
    }}
  ],
  "summary": "Overall assessment"
}}

IMPORTANT: Return ONLY the JSON object. No other text."#
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_prompt_lists_activities() {
        let request = GenerationRequest::Schedule {
            event_type: "wedding".into(),
            duration_hours: 6.0,
            activities: vec!["Ceremony".into(), "Dinner".into()],
        };
        let prompt = request.prompt();
        assert!(prompt.contains("for a wedding event"));
        assert!(prompt.contains("Duration: 6 hours"));
        assert!(prompt.contains("Key Activities: Ceremony, Dinner"));
        assert_eq!(request.expected_shape(), JsonShape::Array);
    }

    #[test]
    fn test_budget_prompt_encodes_priorities() {
        let mut priorities = BTreeMap::new();
        priorities.insert("catering".to_string(), PriorityLevel::High);
        let request = GenerationRequest::Budget {
            total_budget: 50000.0,
            priorities,
            event_type: "conference".into(),
            guest_count: 120,
        };
        let prompt = request.prompt();
        assert!(prompt.contains(r#"Priorities: {"catering":"high"}"#));
        assert!(prompt.contains("with 120 attendees"));
        assert!(prompt.contains("Total Budget: ₹50000"));
    }

    #[test]
    fn test_theme_prompt_keeps_hex_placeholders() {
        let request = GenerationRequest::Theme { description: "Art deco rooftop".into() };
        let prompt = request.prompt();
        assert!(prompt.contains(r##""colorPalette": ["#hex1", "#hex2""##));
        assert!(prompt.contains("\"Art deco rooftop\""));
        assert!(prompt.ends_with("Return ONLY the JSON object. No other text."));
    }

    #[test]
    fn test_object_shapes() {
        let theme = GenerationRequest::Theme { description: "neon".into() };
        assert!(theme.prompt().contains("\"neon\""));
        assert_eq!(theme.expected_shape(), JsonShape::Object);

        let contract = GenerationRequest::Contract { raw_text: "No refunds.".into() };
        assert!(contract.prompt().contains("Contract:\nNo refunds."));
        assert_eq!(contract.expected_shape(), JsonShape::Object);
    }
}
