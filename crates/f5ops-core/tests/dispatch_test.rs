#![allow(clippy::unwrap_used)]
// End-to-end dispatch tests: parameters in, one request to a mock device,
// rendered output and exit status out.

use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{any, basic_auth, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use f5ops_core::{
    AUTH_REQUIRED_BODY, Action, ActionKind, Classification, ClientConfig, CoreError, EXIT_FAILURE,
    EXIT_SUCCESS, Params, execute, render, run,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn plain_http() -> ClientConfig {
    ClientConfig {
        scheme: "http".into(),
        ..ClientConfig::default()
    }
}

/// Parameters aimed at the mock server, merged with `extra`.
fn params_for(server: &MockServer, extra: Value) -> Params {
    let addr = server.address();
    let mut params = Params::from_value(extra).unwrap();
    params.insert("device_name", addr.ip().to_string());
    params.insert("device_port", addr.port());
    params
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_node_disable_sends_expected_request() {
    let server = MockServer::start().await;
    let device_reply = r#"{"kind":"tm:ltm:node:nodestate","name":"node1","session":"user-disabled","state":"user-up"}"#;

    Mock::given(method("PUT"))
        .and(path("/mgmt/tm/ltm/node/node1"))
        .and(basic_auth("admin", "admin"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"session":"user-disabled","state":"user-up"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string(device_reply))
        .expect(1)
        .mount(&server)
        .await;

    let params = params_for(
        &server,
        json!({ "node_name": "node1", "node_state": "disabled" }),
    );
    let result = run(ActionKind::SetNodeState, &params, &plain_http()).await;
    let rendered = render(&result);

    assert_eq!(rendered.exit_code, EXIT_SUCCESS);
    assert_eq!(rendered.body, device_reply.as_bytes());
}

#[tokio::test]
async fn test_unauthorized_prints_fixed_literal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mgmt/tm/cm"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<html>401 Unauthorized</html>"))
        .mount(&server)
        .await;

    let params = params_for(&server, json!({ "api_password": "wrong" }));
    let result = run(ActionKind::ConfigSync, &params, &plain_http()).await;

    assert_eq!(
        result.as_ref().unwrap().classification,
        Classification::AuthRequired
    );
    let rendered = render(&result);
    assert_eq!(rendered.exit_code, EXIT_FAILURE);
    assert_eq!(rendered.body, AUTH_REQUIRED_BODY.as_bytes());
}

#[tokio::test]
async fn test_ucs_save_default_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mgmt/tm/sys/ucs"))
        .and(body_string(
            r#"{"command":"save","name":"/var/local/ucs/backup-20240105.ucs"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let action = Action::resolve(
        ActionKind::UcsSave,
        &params_for(&server, json!({})),
        day(2024, 1, 5),
    )
    .unwrap();
    let outcome = execute(&action, &plain_http()).await.unwrap();

    assert_eq!(outcome.classification, Classification::Success);
}

#[tokio::test]
async fn test_pool_member_in_custom_partition() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mgmt/tm/ltm/pool/app_pool/members/~Tenant_A~10.2.0.7:8080"))
        .and(body_string(r#"{"session":"user-enabled","state":"user-up"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let params = params_for(
        &server,
        json!({
            "pool_name": "app_pool",
            "partition_name": "Tenant_A",
            "member_name": "10.2.0.7:8080",
            "member_state": "enabled"
        }),
    );
    let outcome = run(ActionKind::SetPoolMemberState, &params, &plain_http())
        .await
        .unwrap();
    assert_eq!(outcome.classification, Classification::Success);
}

#[tokio::test]
async fn test_password_update_and_ucs_delete() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mgmt/tm/auth/user/operator"))
        .and(body_string(r#"{"encryptedPassword":"$6$abc$def"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/mgmt/tm/sys/ucs/pre-upgrade.ucs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let password = params_for(
        &server,
        json!({ "target_user": "operator", "target_password_hash": "$6$abc$def" }),
    );
    let delete = params_for(&server, json!({ "file_name": "pre-upgrade.ucs" }));

    let first = run(ActionKind::SetPassword, &password, &plain_http()).await.unwrap();
    let second = run(ActionKind::UcsDelete, &delete, &plain_http()).await.unwrap();
    assert!(first.classification.is_success());
    assert!(second.classification.is_success());
}

#[tokio::test]
async fn test_repeated_enable_is_stable() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/mgmt/tm/ltm/node/node1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"node1"}"#))
        .expect(2)
        .mount(&server)
        .await;

    let params = params_for(&server, json!({ "node_name": "node1", "node_state": "enabled" }));
    let first = run(ActionKind::SetNodeState, &params, &plain_http()).await.unwrap();
    let second = run(ActionKind::SetNodeState, &params, &plain_http()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_device_error_is_passed_through() {
    let server = MockServer::start().await;
    let reply = r#"{"code":400,"message":"01070734:3: Configuration error: invalid group","errorStack":[]}"#;

    Mock::given(method("POST"))
        .and(path("/mgmt/tm/cm"))
        .respond_with(ResponseTemplate::new(400).set_body_string(reply))
        .mount(&server)
        .await;

    let params = params_for(&server, json!({ "device_group": "no_such_group" }));
    let rendered = render(&run(ActionKind::ConfigSync, &params, &plain_http()).await);

    assert_eq!(rendered.exit_code, EXIT_FAILURE);
    assert_eq!(rendered.body, reply.as_bytes());
}

// ── Failures without a device response ──────────────────────────────

#[tokio::test]
async fn test_missing_identifier_never_reaches_device() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let params = params_for(&server, json!({ "node_state": "enabled" }));
    let result = run(ActionKind::SetNodeState, &params, &plain_http()).await;

    assert!(matches!(
        result,
        Err(CoreError::MissingParameter { name: "node_name" })
    ));
    assert_eq!(render(&result).exit_code, EXIT_FAILURE);
}

#[tokio::test]
async fn test_traversal_in_file_name_never_reaches_device() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    for name in ["../../ltm/node/node1", "a b.ucs", "x.ucs?y=1#z", "%2e%2e"] {
        let params = params_for(&server, json!({ "file_name": name }));
        let result = run(ActionKind::UcsDelete, &params, &plain_http()).await;

        assert!(
            matches!(result, Err(CoreError::InvalidParameter { name: "file_name", .. })),
            "{name:?}: {result:?}"
        );
        let value: Value = serde_json::from_slice(&render(&result).body).unwrap();
        assert_eq!(value["_error"]["kind"], "f5ops/input-validation");
        assert_eq!(value["_error"]["details"]["parameter"], "file_name");
    }
}

#[tokio::test]
async fn test_device_name_with_path_never_reaches_device() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let addr = server.address();
    let params = Params::from_value(json!({
        "device_name": format!("{}:{}/x#", addr.ip(), addr.port()),
        "node_name": "node1",
        "node_state": "enabled",
    }))
    .unwrap();
    let result = run(ActionKind::SetNodeState, &params, &plain_http()).await;

    assert!(
        matches!(result, Err(CoreError::InvalidParameter { name: "device_name", .. })),
        "{result:?}"
    );
    assert_eq!(render(&result).exit_code, EXIT_FAILURE);
}

#[tokio::test]
async fn test_slow_device_times_out_with_url_in_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mgmt/tm/cm"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        timeout: Some(Duration::from_millis(200)),
        ..plain_http()
    };
    let result = run(ActionKind::ConfigSync, &params_for(&server, json!({})), &config).await;
    assert!(matches!(result, Err(CoreError::Timeout { .. })), "{result:?}");

    let rendered = render(&result);
    assert_eq!(rendered.exit_code, EXIT_FAILURE);
    let value: Value = serde_json::from_slice(&rendered.body).unwrap();
    assert_eq!(value["_error"]["kind"], "f5ops/transport");
    let url = value["_error"]["details"]["url"].as_str().unwrap();
    assert!(url.ends_with("/mgmt/tm/cm"), "{url}");
}

#[tokio::test]
async fn test_unreachable_device_renders_transport_envelope() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let params = Params::from_value(json!({
        "device_name": "127.0.0.1",
        "device_port": port,
    }))
    .unwrap();

    let result = run(ActionKind::ConfigSync, &params, &plain_http()).await;
    assert!(matches!(result, Err(CoreError::ConnectionFailed { .. })), "{result:?}");

    let rendered = render(&result);
    assert_eq!(rendered.exit_code, EXIT_FAILURE);
    let value: Value = serde_json::from_slice(&rendered.body).unwrap();
    assert_eq!(value["_error"]["kind"], "f5ops/transport");
    assert!(value["_error"]["details"]["url"].is_string());
}
