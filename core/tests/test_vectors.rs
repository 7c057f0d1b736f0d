//! Verify build/parse methods against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use uuid::Uuid;
use vps_core::{
    CreateKeypair, CreateServer, HttpMethod, HttpRequest, HttpResponse, Keypair, Server,
    ServerAction, VpsClient,
};

const BASE_URL: &str = "http://localhost:3000";
const TOKEN: &str = "test-token";

fn client() -> VpsClient {
    VpsClient::new(BASE_URL, TOKEN)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Check a built request against the vector's `expected_request` block.
fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(req_body, expected["body"], "{name}: body");
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

#[test]
fn keypair_create_test_vectors() {
    let raw = include_str!("../../test-vectors/keypair_create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let keypairs = client().keypairs();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateKeypair = serde_json::from_value(case["input"].clone()).unwrap();

        let req = keypairs.build_create(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let keypair = keypairs.parse_create(simulated_response(case)).unwrap();
        let expected: Keypair = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(keypair, expected, "{name}: parsed result");
    }
}

#[test]
fn server_create_test_vectors() {
    let raw = include_str!("../../test-vectors/server_create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let servers = client().servers();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateServer = serde_json::from_value(case["input"].clone()).unwrap();

        let req = servers.build_create(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let server = servers.parse_create(simulated_response(case)).unwrap();
        let expected: Server = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(server, expected, "{name}: parsed result");
    }
}

#[test]
fn server_action_test_vectors() {
    let raw = include_str!("../../test-vectors/server_action.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let servers = client().servers();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let server_id: Uuid = serde_json::from_value(case["server_id"].clone()).unwrap();
        let action: ServerAction = serde_json::from_value(case["input"].clone()).unwrap();

        let req = servers.build_action(server_id, &action).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let server = servers.parse_action(simulated_response(case)).unwrap();
        let expected: Server = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(server, expected, "{name}: parsed result");
    }
}
