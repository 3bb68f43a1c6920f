//! Generators and contract analysis against scripted model output

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use error_handling::{Error, FallbackResult};

    use crate::contract::ContractAnalyzer;
    use crate::fallbacks;
    use crate::generators::EventGenerator;
    use crate::prompts::PriorityLevel;
    use crate::test_support::ScriptedTextGenerator;

    fn generator(fake: &Arc<ScriptedTextGenerator>) -> EventGenerator {
        EventGenerator::new(fake.clone())
    }

    #[tokio::test]
    async fn test_schedule_from_fenced_response() {
        let fake = Arc::new(ScriptedTextGenerator::always(
            "Here you go:\n```json\n[{\"time\": \"06:00 PM\", \"activity\": \"Welcome drinks\", \"duration\": \"30 minutes\", \"notes\": \"Terrace\"}]\n```",
        ));

        let result = generator(&fake).schedule("gala", 4.0, &["Dinner".to_string()]).await;

        assert!(result.is_primary());
        let items = result.into_inner();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].activity, "Welcome drinks");
        assert!(fake.prompts().await[0].contains("Key Activities: Dinner"));
    }

    #[tokio::test]
    async fn test_schedule_fallback_is_repeatable() {
        let fake = Arc::new(ScriptedTextGenerator::failing(Error::from_status(503, "down")));
        let gen = generator(&fake);

        let first = gen.schedule("gala", 4.0, &[]).await;
        let second = gen.schedule("gala", 4.0, &[]).await;

        assert_eq!(first, FallbackResult::Fallback(fallbacks::schedule()));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_array_counts_as_failure() {
        let fake = Arc::new(ScriptedTextGenerator::always("[]"));

        let result = generator(&fake).schedule("meetup", 2.0, &[]).await;

        assert!(result.is_fallback());
        assert_eq!(result.into_inner().len(), 7);
    }

    #[tokio::test]
    async fn test_theme_fallback_on_prose() {
        let fake = Arc::new(ScriptedTextGenerator::always("I'd suggest warm tones."));

        let result = generator(&fake).theme("autumn harvest").await;

        assert_eq!(result, FallbackResult::Fallback(fallbacks::theme("autumn harvest")));
    }

    #[tokio::test]
    async fn test_theme_primary() {
        let fake = Arc::new(ScriptedTextGenerator::always(
            r##"{"colorPalette": ["#000000"], "visualDescription": "Dark", "decorElements": "Candles, Velvet", "lightingStyle": "Dim", "atmosphere": "Moody"}"##,
        ));

        let board = generator(&fake).theme("gothic").await.into_inner();

        assert_eq!(board.color_palette, vec!["#000000"]);
        assert_eq!(board.decor_elements, vec!["Candles", "Velvet"]);
    }

    #[tokio::test]
    async fn test_budget_fallback_ignores_priorities() {
        let fake = Arc::new(ScriptedTextGenerator::failing(Error::transport("timed out")));
        let mut priorities = BTreeMap::new();
        priorities.insert("venue".to_string(), PriorityLevel::High);

        let result = generator(&fake).budget(None, priorities, "wedding", 200).await;

        assert!(result.is_fallback());
        let lines = result.into_inner();
        assert_eq!(lines, fallbacks::budget(100_000.0));
        let total: f64 = lines.iter().map(|l| l.amount).sum();
        assert!((total - 100_000.0).abs() < 1e-6);
        assert!(fake.prompts().await[0].contains("Total Budget: ₹100000"));
    }

    #[tokio::test]
    async fn test_vendor_recommendations_are_flagged() {
        let fake = Arc::new(ScriptedTextGenerator::always(
            r#"[{"name": "Glow Co", "category": "Decoration", "rating": 4.6}]"#,
        ));

        let vendors = generator(&fake).vendor_recommendations("glow party").await.into_inner();

        assert_eq!(vendors.len(), 1);
        assert!(vendors[0].is_ai_generated);
    }

    #[tokio::test]
    async fn test_contract_primary() {
        let fake = Arc::new(ScriptedTextGenerator::always(
            r#"```json
{"riskLevel": "high", "warnings": [{"clause": "7.2", "issue": "No refunds", "severity": "high"}], "summary": "Risky"}
```"#,
        ));

        let result = ContractAnalyzer::new(fake.clone()).analyze("contract body").await.unwrap();

        assert!(result.is_primary());
        let analysis = result.into_inner();
        assert_eq!(analysis.risk_level, "high");
        assert_eq!(analysis.warnings[0].clause, "7.2");
    }

    #[tokio::test]
    async fn test_contract_soft_fallback_keeps_raw_text() {
        let raw = "The contract looks mostly fine.";
        let fake = Arc::new(ScriptedTextGenerator::always(raw));

        let result = ContractAnalyzer::new(fake.clone()).analyze("contract body").await.unwrap();

        assert!(result.is_fallback());
        let analysis = result.into_inner();
        assert_eq!(analysis.risk_level, "medium");
        assert!(analysis.warnings.is_empty());
        assert_eq!(analysis.summary, raw);
    }

    #[tokio::test]
    async fn test_contract_trailing_comma_degrades() {
        let raw = r#"{"riskLevel":"high","warnings":[{"clause":"7.2","issue":"No refunds","severity":"high"},],"summary":"Risky"}"#;
        let fake = Arc::new(ScriptedTextGenerator::always(raw));

        let result = ContractAnalyzer::new(fake.clone()).analyze("contract body").await.unwrap();

        assert!(result.is_fallback());
        assert_eq!(result.into_inner(), fallbacks::contract(raw));
    }

    #[tokio::test]
    async fn test_contract_without_risk_level_degrades() {
        let raw = r#"Notes: {"summary": "Looks standard"}"#;
        let fake = Arc::new(ScriptedTextGenerator::always(raw));

        let result = ContractAnalyzer::new(fake.clone()).analyze("contract body").await.unwrap();

        assert!(result.is_fallback());
        let analysis = result.into_inner();
        assert_eq!(analysis.risk_level, "medium");
        assert_eq!(analysis.summary, raw);
    }

    #[tokio::test]
    async fn test_contract_propagates_rate_limit() {
        let fake = Arc::new(ScriptedTextGenerator::failing(
            Error::from_status(429, "Quota exceeded. Please retry in 30s.").with_retry_after(Some(30)),
        ));

        let err = ContractAnalyzer::new(fake.clone()).analyze("contract body").await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after_hint(), Some(30));
        assert_eq!(fake.calls(), 1);
    }
}
