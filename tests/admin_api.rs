//! Admin API authentication and reporting tests.

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_admin_requires_bearer_key() {
    let (addr, shutdown) = common::spawn_service(common::sample_config()).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{base}/admin/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = client
        .get(format!("{base}/admin/status"))
        .bearer_auth("wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = client
        .get(format!("{base}/admin/status"))
        .bearer_auth(common::ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let status: Value = res.json().await.unwrap();
    assert_eq!(status["status"], "operational");

    shutdown.trigger();
}

#[tokio::test]
async fn test_admin_disabled_means_no_admin_routes() {
    let mut config = common::sample_config();
    config.admin.enabled = false;
    let (addr, shutdown) = common::spawn_service(config).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/admin/status"))
        .bearer_auth(common::ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_catalog_summary_includes_hidden_entries() {
    let (addr, shutdown) = common::spawn_service(common::sample_config()).await;
    let client = reqwest::Client::new();

    let summary: Value = client
        .get(format!("http://{addr}/admin/catalog"))
        .bearer_auth(common::ADMIN_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary["services"].as_array().unwrap().len(), 7);
    assert_eq!(summary["visible_count"], 6);

    shutdown.trigger();
}

#[tokio::test]
async fn test_analytics_track_sessions_and_revenue() {
    let (addr, shutdown) = common::spawn_service(common::sample_config()).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base}/api/sessions"))
        .send()
        .await
        .unwrap();
    let session = res.json::<Value>().await.unwrap()["session_id"]
        .as_str()
        .unwrap()
        .to_string();

    for id in ["brand-identity", "social-media", "press-kit"] {
        client
            .post(format!("{base}/api/sessions/{session}/toggle"))
            .json(&json!({ "service_id": id }))
            .send()
            .await
            .unwrap();
    }
    client
        .post(format!("{base}/api/sessions/{session}/checkout"))
        .send()
        .await
        .unwrap();

    let analytics: Value = client
        .get(format!("{base}/admin/analytics"))
        .bearer_auth(common::ADMIN_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(analytics["open_sessions"], 1);
    assert_eq!(analytics["packages_sold"], 1);
    assert_eq!(analytics["revenue_committed"], 48.0);

    shutdown.trigger();
}
