// llm-service-rs/src/fallbacks.rs
//
// Static results served when generation fails. All of them are pure functions
// of their input, so repeated failures return identical content.

use crate::models::{BudgetLine, ContractAnalysis, ScheduleItem, ThemeBoard, Vendor};
use crate::prompts::DEFAULT_TOTAL_BUDGET;

pub fn schedule() -> Vec<ScheduleItem> {
    [
        ("09:00 AM", "Arrival & Registration", "60 min", "Welcome guests"),
        ("10:00 AM", "Opening Ceremony", "30 min", "Kickoff"),
        ("10:30 AM", "Main Activity Block 1", "120 min", "Core event activities"),
        ("12:30 PM", "Lunch Break", "60 min", "Buffet service"),
        ("01:30 PM", "Main Activity Block 2", "90 min", "Continued activities"),
        ("03:00 PM", "Networking / Tea Break", "45 min", "Casual interaction"),
        ("03:45 PM", "Closing Remarks", "30 min", "Thank you note"),
    ]
    .into_iter()
    .map(|(time, activity, duration, notes)| ScheduleItem {
        time: time.to_string(),
        activity: activity.to_string(),
        duration: duration.to_string(),
        notes: notes.to_string(),
    })
    .collect()
}

pub fn theme(description: &str) -> ThemeBoard {
    ThemeBoard {
        color_palette: ["#1a1a2e", "#16213e", "#0f3460", "#e94560", "#fcdab7"]
            .into_iter()
            .map(String::from)
            .collect(),
        visual_description: format!(
            "(AI Service Unavailable) A reliable fallback theme based on: \"{}\". High contrast and professional.",
            description
        ),
        decor_elements: ["Geometric centerpieces", "Metallic accents", "Smart lighting fixtures"]
            .into_iter()
            .map(String::from)
            .collect(),
        lighting_style: "Ambient warm paired with focused spotlights".to_string(),
        atmosphere: "Professional, energetic, and polished".to_string(),
    }
}

/// Fixed 35/30/15/15/5 split. Priorities are ignored; a non-positive or
/// non-finite budget is replaced by the default.
pub fn budget(total_budget: f64) -> Vec<BudgetLine> {
    let budget = if total_budget.is_finite() && total_budget > 0.0 {
        total_budget
    } else {
        DEFAULT_TOTAL_BUDGET
    };

    [
        ("Venue & Facilities", 35.0, "Standard allocation (Fallback)", &["Rentals", "Basic Setup"][..]),
        ("Catering & Food", 30.0, "Standard allocation (Fallback)", &["Buffet", "Beverages"][..]),
        ("Decoration & Vibe", 15.0, "Standard allocation (Fallback)", &["Layout", "Props"][..]),
        ("Entertainment & AV", 15.0, "Standard allocation (Fallback)", &["Music", "Sound System"][..]),
        ("Contingency", 5.0, "Emergency fund", &["Miscellaneous"][..]),
    ]
    .into_iter()
    .map(|(category, percentage, justification, items)| BudgetLine {
        category: category.to_string(),
        amount: budget * percentage / 100.0,
        percentage,
        justification: justification.to_string(),
        items: items.iter().map(|s| s.to_string()).collect(),
    })
    .collect()
}

/// Three fixed vendors, each quoting the requested vibe in its description.
pub fn vendors(vibe: &str) -> Vec<Vendor> {
    let vendor = |name: &str,
                  category: &str,
                  description: String,
                  specialties: [&str; 2],
                  style: &str,
                  price_range: &str,
                  rating: f64| Vendor {
        name: name.to_string(),
        category: category.to_string(),
        description,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        style: style.to_string(),
        price_range: price_range.to_string(),
        rating,
        is_ai_generated: true,
        ..Default::default()
    };

    vec![
        vendor(
            "Lumina Events (AI Fallback)",
            "Decoration",
            format!("Creative decor matching: {}", vibe),
            ["Custom Themes", "Lighting"],
            "Modern & Adaptive",
            "$$$",
            4.5,
        ),
        vendor(
            "Sonic Waves (AI Fallback)",
            "DJ/Music",
            format!("High energy entertainment for: {}", vibe),
            ["Live Mixing", "Genre Blending"],
            "Energetic",
            "$$",
            4.7,
        ),
        vendor(
            "Taste Fusion (AI Fallback)",
            "Catering",
            format!("Exquisite flavors to complement: {}", vibe),
            ["fusion Cuisine", "Live Stations"],
            "Elegant",
            "$$$",
            4.8,
        ),
    ]
}

/// Soft result when the model answered but not with parseable JSON.
pub fn contract(raw_response: &str) -> ContractAnalysis {
    ContractAnalysis {
        risk_level: "medium".to_string(),
        warnings: Vec::new(),
        summary: raw_response.to_string(),
    }
}
