use super::*;

#[tokio::test]
async fn healthz_reports_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[test]
fn probe_router_builds_without_leptos_config() {
    let _router: Router = probe_routes();
}
