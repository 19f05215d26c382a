#[path = "../common/mod.rs"]
mod common;

use common::{api_page, build_cycle, config, mock_page};
use mockito::{Matcher, Server};
use querylog_shipper_application::use_cases::CycleReport;
use tempfile::TempDir;

#[tokio::test]
async fn test_new_rows_reach_loki_and_advance_state_file() {
    // Arrange - state file says 100, source now holds rows up to 105
    let mut technitium = Server::new_async().await;
    let mut loki = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("last_row.txt");
    std::fs::write(&state_file, "100").unwrap();

    let head = mock_page(&mut technitium, 1, 1, api_page([105])).await;
    let page = mock_page(&mut technitium, 1, 100, api_page(6..=105)).await;
    let push = loki
        .mock("POST", "/loki/api/v1/push")
        .match_header("Content-Type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""job":"dns_query_logs""#.to_string()),
            Matcher::Regex(r#""client_hostname":"192.168.1.20""#.to_string()),
            Matcher::Regex(r#""protocol":"udp""#.to_string()),
            Matcher::Regex(r#""rcode":"noerror""#.to_string()),
            Matcher::Regex(r#""response_type":"recursive""#.to_string()),
            Matcher::Regex("site105.example.org".to_string()),
        ]))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let cycle = build_cycle(&config(&technitium.url(), &loki.url(), &state_file));

    // Act
    let report = cycle.execute().await.unwrap();

    // Assert
    head.assert_async().await;
    page.assert_async().await;
    push.assert_async().await;
    match report {
        CycleReport::Shipped { harvested, report, .. } => {
            assert_eq!(harvested, 5);
            assert_eq!(report.delivered, 5);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&state_file).unwrap(), "105");
}

#[tokio::test]
async fn test_first_run_without_state_file_ships_everything() {
    let mut technitium = Server::new_async().await;
    let mut loki = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("state").join("last_row.txt");

    mock_page(&mut technitium, 1, 1, api_page([3])).await;
    mock_page(&mut technitium, 1, 100, api_page(1..=3)).await;
    let push = loki
        .mock("POST", "/loki/api/v1/push")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let cycle = build_cycle(&config(&technitium.url(), &loki.url(), &state_file));
    cycle.execute().await.unwrap();

    push.assert_async().await;
    assert_eq!(std::fs::read_to_string(&state_file).unwrap(), "3");
}

#[tokio::test]
async fn test_rejected_push_leaves_state_file_untouched() {
    let mut technitium = Server::new_async().await;
    let mut loki = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("last_row.txt");
    std::fs::write(&state_file, "10").unwrap();

    mock_page(&mut technitium, 1, 1, api_page([12])).await;
    mock_page(&mut technitium, 1, 100, api_page(1..=12)).await;
    let push = loki
        .mock("POST", "/loki/api/v1/push")
        .with_status(500)
        .with_body("ingester unavailable")
        .expect(1)
        .create_async()
        .await;

    let cycle = build_cycle(&config(&technitium.url(), &loki.url(), &state_file));
    let report = cycle.execute().await.unwrap();

    push.assert_async().await;
    match report {
        CycleReport::Shipped { report, .. } => {
            assert!(!report.is_complete());
            assert!(report.cursor.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&state_file).unwrap(), "10");
}

#[tokio::test]
async fn test_source_rollback_rewrites_state_file_to_zero() {
    let mut technitium = Server::new_async().await;
    let loki = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("last_row.txt");
    std::fs::write(&state_file, "5000").unwrap();

    mock_page(&mut technitium, 1, 1, api_page([40])).await;

    let cycle = build_cycle(&config(&technitium.url(), &loki.url(), &state_file));
    let report = cycle.execute().await.unwrap();

    assert!(matches!(report, CycleReport::Reset { latest_row: 40, .. }));
    assert_eq!(std::fs::read_to_string(&state_file).unwrap(), "0");
}
