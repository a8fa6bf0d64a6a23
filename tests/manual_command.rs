//! Tests for the `/vpn` command against a running monitor.

mod helpers;

use helpers::{mock_config, settle, start_monitor, wait_for_frame};
use tokio_util::sync::CancellationToken;
use vpn_status::command::{CommandRegistry, Dispatch, LoopEnd};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_vpn_command_issues_exactly_one_ip_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("192.0.2.77"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/192.0.2.77/city"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Reykjavik"))
        .expect(1)
        .mount(&server)
        .await;

    let mut running = start_monitor(&mock_config(&server));
    let registry = CommandRegistry::new();
    let mut out = Vec::new();

    let result = registry
        .dispatch("/vpn", &mut out, &running.handle)
        .await
        .expect("command should dispatch");
    assert_eq!(result, Dispatch::Continue);
    assert_eq!(String::from_utf8_lossy(&out), "VPN status refreshing...\n");

    let frame = wait_for_frame(&mut running.frames, |f| !f.snapshot.location.is_empty()).await;
    assert_eq!(frame.line, "VPN: 192.0.2.77 (Reykjavik)");
    settle().await;
}

#[tokio::test]
async fn test_vpn_command_works_regardless_of_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not an address"))
        .expect(3)
        .mount(&server)
        .await;

    let running = start_monitor(&mock_config(&server));
    let registry = CommandRegistry::new();
    let mut out = Vec::new();
    let input: &[u8] = b"/vpn\n/vpn\n/vpn\n";

    let end = registry
        .run_loop(input, &mut out, &running.handle, &CancellationToken::new())
        .await
        .expect("loop should succeed");

    assert_eq!(end, LoopEnd::Eof);
    assert_eq!(
        String::from_utf8_lossy(&out).matches("VPN status refreshing...").count(),
        3
    );
    settle().await;
    assert_eq!(running.bar.current().line, "VPN: VPN active");
}
