//! Tests for get_statistics, list_languages and list_keys.

use rmcp::handler::server::wrapper::Parameters;
use xcstool::mcp::{
    XcsMcpServer,
    types::{GetStatisticsParams, ListKeysParams, ListLanguagesParams},
};

use crate::{
    McpTestFixture, assert_pagination, extract_tool_result_json, fixture_many_keys,
    fixture_multi_language,
};

#[tokio::test]
async fn test_get_statistics_all_languages() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .get_statistics(Parameters(GetStatisticsParams {
            catalog_path: fixture.catalog_path(),
            language: None,
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["sourceLanguage"], "en");
    assert_eq!(json["totalKeys"], 4);

    let languages = json["languages"].as_array().unwrap();
    let codes: Vec<&str> = languages
        .iter()
        .map(|l| l["language"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["de", "en", "fr"]);

    let de = &languages[0];
    assert_eq!(de["isSource"], false);
    assert_eq!(de["total"], 3);
    assert_eq!(de["translated"], 2);
    assert_eq!(de["stale"], 1);
    assert_eq!(de["missing"], 0);
    assert_eq!(de["percentTranslated"], 66);

    let en = &languages[1];
    assert_eq!(en["isSource"], true);
    assert_eq!(en["translated"], 3);
    assert_eq!(en["percentTranslated"], 100);
}

#[tokio::test]
async fn test_get_statistics_single_language() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .get_statistics(Parameters(GetStatisticsParams {
            catalog_path: fixture.catalog_path(),
            language: Some("fr".to_string()),
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    let languages = json["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 1);
    let fr = &languages[0];
    assert_eq!(fr["language"], "fr");
    assert_eq!(fr["translated"], 0);
    assert_eq!(fr["needsReview"], 1);
    assert_eq!(fr["missing"], 2);
    assert_eq!(fr["percentTranslated"], 0);
}

#[tokio::test]
async fn test_get_statistics_unknown_language() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .get_statistics(Parameters(GetStatisticsParams {
            catalog_path: fixture.catalog_path(),
            language: Some("ja".to_string()),
        }))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_statistics_missing_catalog() {
    let fixture = McpTestFixture::new().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .get_statistics(Parameters(GetStatisticsParams {
            catalog_path: fixture.catalog_path(),
            language: None,
        }))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_list_languages() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .list_languages(Parameters(ListLanguagesParams {
            catalog_path: fixture.catalog_path(),
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["sourceLanguage"], "en");
    assert_eq!(json["languages"], serde_json::json!(["de", "en", "fr"]));
}

#[tokio::test]
async fn test_list_keys_without_language() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: None,
            state: None,
            offset: None,
            limit: None,
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["totalCount"], 4);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0]["key"], "Cancel");
    assert!(items[0].get("state").is_none());
    assert_eq!(items[2]["key"], "Internal");
    assert_eq!(items[2]["shouldTranslate"], false);
    assert_eq!(items[3]["comment"], "Toolbar button");
    assert_pagination(&json, 0, 20, false);
}

#[tokio::test]
async fn test_list_keys_filtered_by_state() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: Some("fr".to_string()),
            state: Some("needs_review".to_string()),
            offset: None,
            limit: None,
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["items"][0]["key"], "Cancel");
    assert_eq!(json["items"][0]["state"], "needs_review");

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: Some("fr".to_string()),
            state: Some("not_translated".to_string()),
            offset: None,
            limit: None,
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);
    let keys: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["Done", "Internal", "Save"]);
}

#[tokio::test]
async fn test_list_keys_source_language_state() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: Some("en".to_string()),
            state: None,
            offset: None,
            limit: Some(1),
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["items"][0]["state"], "source");
    assert_pagination(&json, 0, 1, true);
}

#[tokio::test]
async fn test_list_keys_state_requires_language() {
    let fixture = fixture_multi_language().unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: None,
            state: Some("stale".to_string()),
            offset: None,
            limit: None,
        }))
        .await;
    assert!(result.is_err());

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: Some("de".to_string()),
            state: Some("done".to_string()),
            offset: None,
            limit: None,
        }))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_list_keys_pagination() {
    let fixture = fixture_many_keys(25).unwrap();
    let server = XcsMcpServer::new();

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: None,
            state: None,
            offset: Some(10),
            limit: Some(10),
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["totalCount"], 25);
    assert_eq!(json["items"].as_array().unwrap().len(), 10);
    assert_eq!(json["items"][0]["key"], "key_010");
    assert_pagination(&json, 10, 10, true);

    let result = server
        .list_keys(Parameters(ListKeysParams {
            catalog_path: fixture.catalog_path(),
            language: None,
            state: None,
            offset: Some(20),
            limit: Some(500),
        }))
        .await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["items"].as_array().unwrap().len(), 5);
    assert_pagination(&json, 20, 100, false);
}
