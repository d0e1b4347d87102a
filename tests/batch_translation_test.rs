//! Structure translation against a mock Microsoft Translator

mod helpers;

use helpers::*;
use serde_json::json;
use FarmLive::TranslatableStructure;

fn structure(value: serde_json::Value) -> TranslatableStructure {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("test structure must be an object"),
    }
}

#[tokio::test]
async fn test_translate_object_translates_leaves_in_order() {
    let ctx = TestContext::new().await;
    let mock = &ctx.translator_mock;
    mock.mock_translation("Soil Health", "hi", "मृदा स्वास्थ्य", MockResponseConfig::default()).await;
    mock.mock_translation("Check moisture", "hi", "नमी जांचें", MockResponseConfig::default()).await;
    mock.mock_translation("Add compost", "hi", "खाद डालें", MockResponseConfig::default()).await;
    let service = ctx.translation_service();

    let input = structure(json!({
        "title": "Soil Health",
        "steps": ["Check moisture", 2, "Add compost"],
        "priority": 1,
        "published": true,
        "author": null,
        "meta": { "title": "Soil Health" }
    }));

    let output = service.translate_object(input, "hi").await;

    let keys: Vec<&str> = output.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["title", "steps", "priority", "published", "author", "meta"]);
    assert_eq!(output["title"], json!("मृदा स्वास्थ्य"));
    assert_eq!(output["steps"], json!(["नमी जांचें", 2, "खाद डालें"]));
    assert_eq!(output["priority"], json!(1));
    assert_eq!(output["published"], json!(true));
    assert_eq!(output["author"], json!(null));
    assert_eq!(output["meta"], json!({ "title": "Soil Health" }));
}

#[tokio::test]
async fn test_translate_object_isolates_failed_leaves() {
    let ctx = TestContext::new().await;
    let mock = &ctx.translator_mock;
    mock.mock_translation("Weather alert", "ta", "வானிலை எச்சரிக்கை", MockResponseConfig::default()).await;
    mock.mock_translation("Sow seeds", "ta", "", MockResponseConfig::failing(500)).await;
    let service = ctx.translation_service();

    let output = service
        .translate_object(structure(json!({ "a": "Weather alert", "b": "Sow seeds" })), "ta")
        .await;

    assert_eq!(output["a"], json!("வானிலை எச்சரிக்கை"));
    assert_eq!(output["b"], json!("Sow seeds (ta)"));
}

#[tokio::test]
async fn test_translate_object_source_language_is_identity() {
    let ctx = TestContext::new().await;
    let service = ctx.translation_service();
    let input = structure(json!({ "title": "Soil Health", "tags": ["a", "b"] }));

    let output = service.translate_object(input.clone(), "en").await;

    assert_eq!(output, input);
    assert_eq!(ctx.translator_mock.request_count().await, 0);
}

#[tokio::test]
async fn test_translate_object_empty_structure() {
    let ctx = TestContext::new().await;
    let service = ctx.translation_service();

    let output = service.translate_object(TranslatableStructure::new(), "kn").await;

    assert!(output.is_empty());
}

#[tokio::test]
async fn test_translate_object_shares_cache_with_text_translation() {
    let ctx = TestContext::new().await;
    ctx.translator_mock
        .mock_translation("Pest control", "te", "చీడపీడల నియంత్రణ", MockResponseConfig::default().expect(1))
        .await;
    let service = ctx.translation_service();

    service
        .translate_object(structure(json!({ "heading": "Pest control" })), "te")
        .await;
    let cached = service.translate_text_detailed("Pest control", "te").await;

    assert_eq!(cached.text, "చీడపీడల నియంత్రణ");
    assert_eq!(cached.source, FarmLive::ResolutionSource::Cache);
}

#[tokio::test]
async fn test_translate_texts_preserves_order() {
    let ctx = TestContext::new_with_config(TestConfig {
        translator_key: false,
        ..TestConfig::default()
    })
    .await;
    let service = ctx.translation_service();

    let output = service
        .translate_texts(vec!["About".to_string(), "".to_string(), "Harvest".to_string()], "hi")
        .await;

    assert_eq!(output, vec!["परिचय", "", "Harvest (hi)"]);
}
