use std::time::Duration;

use echo_service::probe::{parse_target, Endpoint, ProbeClient};

use crate::common::{spawn_server, test_config};

#[tokio::test]
async fn probe_passes_against_live_service() {
    let base = spawn_server(test_config()).await;
    let client = ProbeClient::new(Duration::from_secs(5)).unwrap();

    let report = client.probe_all(&[parse_target(&base).unwrap()]).await;

    assert_eq!(report.outcomes.len(), 4);
    assert!(report.all_passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());
    assert!(report.outcomes.iter().all(|o| o.status == Some(200)));
    assert_eq!(report.summary(), "4/4 checks passed");
}

#[tokio::test]
async fn probe_reports_each_target_separately() {
    let up = spawn_server(test_config()).await;

    // A port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let down = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = ProbeClient::new(Duration::from_secs(2)).unwrap();
    let targets = [parse_target(&up).unwrap(), parse_target(&down).unwrap()];
    let report = client.probe_all(&targets).await;

    assert_eq!(report.outcomes.len(), 8);
    assert_eq!(report.passed_count(), 4);

    let failed_targets: Vec<_> = report.failures().map(|o| o.target.clone()).collect();
    assert!(failed_targets.iter().all(|t| t == targets[1].as_str()));
    assert!(report
        .failures()
        .any(|o| o.endpoint == Endpoint::Echo && o.status.is_none()));
}
