//! Vendor catalog and search routes

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use llm_service::test_support::ScriptedTextGenerator;
    use serde_json::json;
    use vendor_search::test_support::InMemoryVectorIndex;
    use vendor_search::VendorStore;

    use crate::tests::support::{json_body, TestApp};
    use crate::{DEGRADED_HEADER, SEARCH_STRATEGY_HEADER};

    const SUGGESTIONS: &str = r#"[{"name": "Aurora Lights", "category": "Decoration", "description": "Glow", "rating": 4.8}]"#;

    #[tokio::test]
    async fn test_health_and_root() {
        let app = TestApp::new(ScriptedTextGenerator::always("[]"));

        let health = app.get("/health").await;
        assert_eq!(health.status(), StatusCode::OK);
        let body = json_body(health).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["status"], "DEGRADED");
        assert_eq!(body["vector_index_configured"], false);

        let root = json_body(app.get("/").await).await;
        assert!(root["endpoints"]
            .as_array()
            .unwrap()
            .contains(&json!("POST /api/vendors/search")));
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let app = TestApp::new(ScriptedTextGenerator::always(SUGGESTIONS));

        for body in [json!({}), json!({ "query": "" }), json!({ "query": "   " })] {
            let response = app.post_json("/api/vendors/search", body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await, json!({ "error": "Query is required" }));
        }
        assert_eq!(app.text.calls(), 0);
    }

    #[tokio::test]
    async fn test_seed_then_keyword_search() {
        let app = TestApp::new(ScriptedTextGenerator::always(SUGGESTIONS));

        let seeded = json_body(app.post_json("/api/vendors/seed", json!({})).await).await;
        assert_eq!(seeded["message"], "Seeded vendors and generated embeddings");
        assert_eq!(seeded["count"], 10);

        let listed = json_body(app.get("/api/vendors").await).await;
        assert_eq!(listed.as_array().unwrap().len(), 10);

        let response = app
            .post_json("/api/vendors/search", json!({ "query": "vegan catering" }))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[&SEARCH_STRATEGY_HEADER], "keyword");
        let vendors = json_body(response).await;
        let vendors = vendors.as_array().unwrap();
        assert!(!vendors.is_empty());
        assert!(vendors.iter().all(|v| v["similarityScore"] == 0.5));
        assert_eq!(app.text.calls(), 0);
    }

    #[tokio::test]
    async fn test_semantic_search_after_seed() {
        let index = Arc::new(InMemoryVectorIndex::new());
        let app = TestApp::with_index(ScriptedTextGenerator::always(SUGGESTIONS), index.clone());

        let seeded = json_body(app.post_json("/api/vendors/seed", json!({})).await).await;
        assert!(seeded["details"]
            .as_array()
            .unwrap()
            .iter()
            .all(|d| d["pinned"] == true));
        assert_eq!(index.len().await, 10);

        let response = app
            .post_json("/api/vendors/search", json!({ "query": "anything at all" }))
            .await;

        assert_eq!(response.headers()[&SEARCH_STRATEGY_HEADER], "semantic");
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 5);
        assert_eq!(app.text.calls(), 0);

        let debug = json_body(app.get("/api/pinecone-debug").await).await;
        assert_eq!(debug["stats"]["totalVectorCount"], 10);
        assert_eq!(debug["samples"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_unmatched_search_generates_suggestions() {
        let app = TestApp::new(ScriptedTextGenerator::always(SUGGESTIONS));

        let response = app
            .post_json("/api/vendors/search", json!({ "query": "zero gravity tea party" }))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[&SEARCH_STRATEGY_HEADER], "synthetic");
        assert!(response.headers().get(&DEGRADED_HEADER).is_none());
        let vendors = json_body(response).await;
        assert_eq!(vendors[0]["name"], "Aurora Lights");
        assert_eq!(vendors[0]["isAIGenerated"], true);
        assert_eq!(vendors[0]["similarityScore"], 0.99);
        assert_eq!(app.text.calls(), 1);
    }

    #[tokio::test]
    async fn test_create_vendor_assigns_id() {
        let app = TestApp::new(ScriptedTextGenerator::always("[]"));

        let response = app
            .post_json(
                "/api/vendors",
                json!({ "name": "Pop-up Bar", "category": "Catering", "specialties": "Cocktails, Mocktails" }),
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert!(created["id"].as_str().is_some());
        assert_eq!(created["specialties"], json!(["Cocktails", "Mocktails"]));
        assert_eq!(app.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_debug_routes() {
        let app = TestApp::new(ScriptedTextGenerator::always("[]"));
        app.post_json("/api/vendors/seed", json!({})).await;

        let db = json_body(app.get("/api/db-debug").await).await;
        assert_eq!(db["database"], "event_planner");
        assert_eq!(db["counts"]["vendors"], 10);

        let index = app.get("/api/pinecone-debug").await;
        assert_eq!(index.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(index).await["error"], "Vector index not configured");
    }
}
