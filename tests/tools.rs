mod common;

use std::time::Duration;

use common::{sample_cards, DeckBytes};
use hearthstone_decks::catalog::{CardCatalog, StaticSource};
use hearthstone_decks::server::{
    handle_line, serve, INVALID_PARAMS, INVALID_REQUEST, MCP_PROTOCOL_VERSION, METHOD_NOT_FOUND,
    PARSE_ERROR,
};
use hearthstone_decks::tools::{list_tools, DeckTools, ToolResponse};
use hearthstone_decks::ImageTemplate;
use serde_json::{json, Value};

fn deck_tools(cards: Vec<hearthstone_decks::CardRecord>) -> DeckTools<StaticSource> {
    DeckTools::new(
        CardCatalog::new(StaticSource::new(cards), Duration::from_secs(3600)),
        ImageTemplate::new("https://art.example/{CARD_ID}.png"),
    )
}

fn envelope(response: &ToolResponse) -> Value {
    serde_json::from_str(response.envelope_text()).expect("envelope is JSON")
}

fn mage_code() -> String {
    DeckBytes {
        heroes: vec![637],
        singles: vec![559],
        doubles: vec![315],
        multiples: vec![(1004, 3)],
        ..DeckBytes::default()
    }
    .to_code()
}

#[test]
fn lists_three_tools_with_schemas() {
    let tools = list_tools();
    let names: Vec<&str> = tools.iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["parse_deck_code", "search_cards", "get_card_info"]);

    let json = serde_json::to_value(&tools).unwrap();
    assert_eq!(json[0]["inputSchema"]["required"], json!(["deckCode"]));
    assert_eq!(json[1]["inputSchema"]["properties"]["limit"]["maximum"], 50);
    assert_eq!(json[2]["inputSchema"]["required"], json!(["cardId"]));
}

#[tokio::test]
async fn parse_deck_code_returns_meta_cards_and_statistics() {
    let tools = deck_tools(sample_cards());
    let code = mage_code();
    let response = tools.call_tool("parse_deck_code", &json!({ "deckCode": code })).await;
    assert!(!response.is_error);

    let body = envelope(&response);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["meta"]["format"], "Standard");
    assert_eq!(data["meta"]["version"], 1);
    assert_eq!(data["meta"]["totalCards"], 6);
    assert_eq!(data["meta"]["deckCode"], code.as_str());
    assert_eq!(data["heroes"][0]["name"], "Jaina Proudmoore");
    assert_eq!(data["cards"][0]["id"], "EX1_116");
    assert_eq!(data["cards"][0]["count"], 1);
    assert_eq!(data["cards"][1]["count"], 2);
    assert_eq!(data["cards"][2]["count"], 3);
    assert_eq!(data["cards"][2]["imageUrl"], "https://art.example/CS2_032.png");
    assert_eq!(data["statistics"]["totalCards"], 6);
    assert_eq!(data["statistics"]["manaCurve"][7], 3);
}

#[tokio::test]
async fn include_stats_false_drops_statistics() {
    let tools = deck_tools(sample_cards());
    let args = json!({ "deckCode": mage_code(), "includeStats": false });
    let body = envelope(&tools.call_tool("parse_deck_code", &args).await);
    assert_eq!(body["success"], true);
    assert!(body["data"].get("statistics").is_none());
}

#[tokio::test]
async fn bad_deck_codes_produce_failure_envelopes() {
    let tools = deck_tools(sample_cards());

    let response = tools.call_tool("parse_deck_code", &json!({ "deckCode": "***" })).await;
    assert!(response.is_error);
    let body = envelope(&response);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "DECK_PARSE_ERROR");
    assert!(body["error"].as_str().unwrap().contains("Malformed"));
    assert!(body.get("data").is_none());

    let body = envelope(&tools.call_tool("parse_deck_code", &json!({ "deckCode": "AAECAAEqAAE" })).await);
    assert_eq!(body["code"], "DECK_PARSE_ERROR");
    assert!(body["error"].as_str().unwrap().contains("multiples"));

    let body = envelope(&tools.call_tool("parse_deck_code", &json!({ "deckCode": 42 })).await);
    assert_eq!(body["error"], "deckCode is required and must be a string");
}

#[tokio::test]
async fn unreachable_catalog_fails_the_deck_call() {
    let tools = deck_tools(Vec::new());
    let response = tools.call_tool("parse_deck_code", &json!({ "deckCode": mage_code() })).await;
    assert!(response.is_error);
    assert_eq!(envelope(&response)["code"], "DECK_PARSE_ERROR");
}

#[tokio::test]
async fn search_cards_limits_and_reports_totals() {
    let tools = deck_tools(sample_cards());

    let body = envelope(&tools.call_tool("search_cards", &json!({ "cardName": "a", "limit": 2 })).await);
    let data = &body["data"];
    assert_eq!(data["returned"], 2);
    assert!(data["total"].as_u64().unwrap() > 2);
    assert_eq!(data["searchTerm"], "a");
    assert_eq!(data["cards"].as_array().unwrap().len(), 2);
    assert!(data["cards"][0]["imageUrl"].as_str().unwrap().starts_with("https://art.example/"));

    let body = envelope(&tools.call_tool("search_cards", &json!({ "cardName": "leeroy" })).await);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["cards"][0]["id"], "EX1_116");

    // Out-of-range limits are clamped.
    let body = envelope(&tools.call_tool("search_cards", &json!({ "cardName": "a", "limit": 0 })).await);
    assert_eq!(body["data"]["returned"], 1);

    let body = envelope(&tools.call_tool("search_cards", &json!({})).await);
    assert_eq!(body["code"], "CARD_SEARCH_ERROR");
    assert_eq!(body["error"], "cardName is required and must be a string");
}

#[tokio::test]
async fn get_card_info_finds_cards_by_stable_id() {
    let tools = deck_tools(sample_cards());

    let body = envelope(&tools.call_tool("get_card_info", &json!({ "cardId": "CS2_029" })).await);
    assert_eq!(body["data"]["name"], "Fireball");
    assert_eq!(body["data"]["dbfId"], 315);
    assert_eq!(body["data"]["imageUrl"], "https://art.example/CS2_029.png");

    let response = tools.call_tool("get_card_info", &json!({ "cardId": "XYZ_999" })).await;
    assert!(response.is_error);
    let body = envelope(&response);
    assert_eq!(body["code"], "CARD_INFO_ERROR");
    assert_eq!(body["error"], "Card with ID XYZ_999 not found");
}

#[tokio::test]
async fn unknown_tools_are_reported_not_panicked() {
    let tools = deck_tools(sample_cards());
    let response = tools.call_tool("draw_card", &json!({})).await;
    assert!(response.is_error);
    let body = envelope(&response);
    assert_eq!(body["code"], "UNKNOWN_TOOL");
    assert_eq!(body["error"], "Unknown tool: draw_card");
}

#[test]
fn success_responses_omit_the_error_flag() {
    let json = serde_json::to_value(ToolResponse::success(json!({}))).unwrap();
    assert!(json.get("isError").is_none());
    assert_eq!(json["content"][0]["type"], "text");

    let json = serde_json::to_value(ToolResponse::failure("boom", "X")).unwrap();
    assert_eq!(json["isError"], true);
}

fn rpc(id: i64, method: &str, params: Value) -> String {
    json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }).to_string()
}

#[tokio::test]
async fn initialize_announces_tools_capability() {
    let tools = deck_tools(sample_cards());

    let params = json!({ "protocolVersion": MCP_PROTOCOL_VERSION });
    let response = handle_line(&tools, &rpc(1, "initialize", params))
        .await
        .expect("initialize is answered");
    let response = serde_json::to_value(&response).unwrap();
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], MCP_PROTOCOL_VERSION);
    assert_eq!(response["result"]["serverInfo"]["name"], "hearthstone-decks-server");
    assert!(response["result"]["capabilities"]["tools"].is_object());
    assert!(response.get("error").is_none());
}

#[tokio::test]
async fn notifications_get_no_reply() {
    let tools = deck_tools(sample_cards());
    let line = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string();

    assert!(handle_line(&tools, &line).await.is_none());
}

#[tokio::test]
async fn requests_are_dispatched_by_method() {
    let tools = deck_tools(sample_cards());

    let response = handle_line(&tools, &rpc(2, "tools/list", json!({}))).await.unwrap();
    let response = serde_json::to_value(&response).unwrap();
    assert_eq!(response["id"], 2);
    assert_eq!(response["result"]["tools"].as_array().unwrap().len(), 3);

    let params = json!({ "name": "get_card_info", "arguments": { "cardId": "EX1_116" } });
    let response = handle_line(&tools, &rpc(3, "tools/call", params)).await.unwrap();
    let response = serde_json::to_value(&response).unwrap();
    assert_eq!(response["id"], 3);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let body: Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["data"]["name"], "Leeroy Jenkins");
}

#[tokio::test]
async fn protocol_errors_use_json_rpc_codes() {
    let tools = deck_tools(sample_cards());

    let response = handle_line(&tools, &rpc(7, "tools/explode", json!({}))).await.unwrap();
    let error = response.error.expect("unknown method fails");
    assert_eq!(response.id, json!(7));
    assert_eq!(error.code, METHOD_NOT_FOUND);

    let response = handle_line(&tools, &rpc(8, "tools/call", json!({ "arguments": {} }))).await.unwrap();
    assert_eq!(response.error.expect("missing tool name").code, INVALID_PARAMS);

    let line = json!({ "id": 9, "method": "tools/list" }).to_string();
    let response = handle_line(&tools, &line).await.unwrap();
    assert_eq!(response.id, json!(9));
    assert_eq!(response.error.expect("jsonrpc field required").code, INVALID_REQUEST);

    let line = json!({ "jsonrpc": "2.0", "id": 10 }).to_string();
    let response = handle_line(&tools, &line).await.unwrap();
    assert_eq!(response.id, json!(10));
    assert_eq!(response.error.expect("method required").code, INVALID_REQUEST);

    let response = handle_line(&tools, "not json").await.unwrap();
    assert_eq!(response.id, Value::Null);
    assert_eq!(response.error.expect("unparsable line").code, PARSE_ERROR);
}

#[tokio::test]
async fn serve_runs_a_client_session() {
    let tools = deck_tools(sample_cards());
    let input = [
        rpc(1, "initialize", json!({})),
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
        String::new(),
        rpc(2, "tools/list", json!({})),
        rpc(3, "tools/call", json!({ "name": "parse_deck_code", "arguments": { "deckCode": mage_code() } })),
        "garbage".to_string(),
    ]
    .join("\n");
    let mut output = Vec::new();

    serve(&tools, input.as_bytes(), &mut output).await.expect("serve completes");

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l["jsonrpc"] == "2.0"));
    assert_eq!(lines[0]["result"]["protocolVersion"], MCP_PROTOCOL_VERSION);
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[2]["id"], 3);
    assert!(lines[2]["result"].get("isError").is_none());
    assert_eq!(lines[3]["error"]["code"], PARSE_ERROR);
}
