use driftwatch::application::{FailureKind, MonitoringJob};
use driftwatch::config::JobEnvConfig;
use driftwatch::domain::monitoring::RowPolicy;
use driftwatch::domain::ports::JSON_CONTENT_TYPE;
use driftwatch::infrastructure::InMemoryBlobStore;
use std::sync::Arc;

// --- Fixtures ---

const OBSERVATIONS: &str = "true_values;predictions\n3;2.5\n5;5.0\n2;2.5\n";
const BASELINE: &str = r#"{"mse": 0.2, "mae": 0.3, "r2": 0.9}"#;

async fn seeded_store(observations: &str, baseline: &str) -> InMemoryBlobStore {
    let store = InMemoryBlobStore::new();
    let job = JobEnvConfig::default();
    store
        .insert(&job.observations_path, observations, "text/csv")
        .await;
    store
        .insert(&job.baseline_path, baseline, JSON_CONTENT_TYPE)
        .await;
    store
}

fn job(store: &InMemoryBlobStore, config: JobEnvConfig) -> MonitoringJob {
    MonitoringJob::with_csv(Arc::new(store.clone()), config)
}

fn json_at(value: &serde_json::Value, key: &str) -> f64 {
    value[key].as_f64().unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_run_persists_metrics_and_comparison() {
    let store = seeded_store(OBSERVATIONS, BASELINE).await;
    let config = JobEnvConfig::default();

    let summary = job(&store, config.clone()).run().await.unwrap();

    assert_eq!(summary.observations, 3);
    assert_eq!(summary.rows_skipped, 0);
    assert!(!summary.dry_run);
    assert_eq!(
        summary.artifacts,
        vec![
            config.metrics_output_path.clone(),
            config.comparison_output_path.clone()
        ]
    );

    let metrics = store.get(&config.metrics_output_path).await.unwrap();
    assert_eq!(metrics.content_type, "application/json");
    let metrics: serde_json::Value = serde_json::from_slice(&metrics.content).unwrap();
    assert!((json_at(&metrics, "mse") - 0.5 / 3.0).abs() < 1e-9);
    assert!((json_at(&metrics, "mae") - 1.0 / 3.0).abs() < 1e-9);
    assert!((json_at(&metrics, "r2") - (1.0 - 0.5 / (14.0 / 3.0))).abs() < 1e-9);

    let comparison = store.get(&config.comparison_output_path).await.unwrap();
    let comparison: serde_json::Value = serde_json::from_slice(&comparison.content).unwrap();
    assert_eq!(comparison.as_object().unwrap().len(), 3);
    assert!((json_at(&comparison, "mse_diff") - (0.2 - 0.5 / 3.0)).abs() < 1e-9);
    assert!((json_at(&comparison, "mae_diff") - (0.3 - 1.0 / 3.0)).abs() < 1e-9);
    assert!(
        (json_at(&comparison, "r2_diff") - (0.9 - summary.current.r2)).abs() < 1e-9
    );
}

#[tokio::test]
async fn test_identical_baseline_yields_zero_drift() {
    let store = InMemoryBlobStore::new();
    let config = JobEnvConfig::default();
    store
        .insert(&config.observations_path, OBSERVATIONS, "text/csv")
        .await;

    // Use the metrics of a first run as the baseline of a second
    let first = job(&store, JobEnvConfig { dry_run: true, ..config.clone() });
    store
        .insert(&config.baseline_path, r#"{"mse":1,"mae":1,"r2":0}"#, JSON_CONTENT_TYPE)
        .await;
    let current = first.run().await.unwrap().current;
    store
        .insert(
            &config.baseline_path,
            serde_json::to_vec(&current).unwrap(),
            JSON_CONTENT_TYPE,
        )
        .await;

    let summary = job(&store, config).run().await.unwrap();
    assert_eq!(summary.comparison.mse_diff, 0.0);
    assert_eq!(summary.comparison.mae_diff, 0.0);
    assert_eq!(summary.comparison.r2_diff, 0.0);
}

#[tokio::test]
async fn test_missing_column_aborts_without_writes() {
    let store = seeded_store("true_values;prediction\n1;1\n2;2\n", BASELINE).await;
    let before = store.paths().await;

    let err = job(&store, JobEnvConfig::default()).run().await.unwrap_err();

    assert_eq!(FailureKind::classify(&err), FailureKind::Schema);
    assert!(format!("{:#}", err).contains("predictions"));
    assert_eq!(store.paths().await, before);
}

#[tokio::test]
async fn test_constant_ground_truth_aborts_without_writes() {
    let store = seeded_store("true_values;predictions\n4;3\n4;5\n", BASELINE).await;
    let before = store.paths().await;

    let err = job(&store, JobEnvConfig::default()).run().await.unwrap_err();

    assert_eq!(FailureKind::classify(&err), FailureKind::Statistical);
    assert_eq!(store.paths().await, before);
}

#[tokio::test]
async fn test_empty_batch_is_statistical_failure() {
    let store = seeded_store("true_values;predictions\n", BASELINE).await;
    let err = job(&store, JobEnvConfig::default()).run().await.unwrap_err();
    assert_eq!(FailureKind::classify(&err), FailureKind::Statistical);
}

#[tokio::test]
async fn test_malformed_baseline_aborts_without_writes() {
    let store = seeded_store(OBSERVATIONS, r#"{"mse": 0.2, "mae": 0.3}"#).await;
    let before = store.paths().await;

    let err = job(&store, JobEnvConfig::default()).run().await.unwrap_err();

    assert_eq!(FailureKind::classify(&err), FailureKind::Baseline);
    assert_eq!(store.paths().await, before);
}

#[tokio::test]
async fn test_missing_baseline_is_store_failure() {
    let store = InMemoryBlobStore::new();
    let config = JobEnvConfig::default();
    store
        .insert(&config.observations_path, OBSERVATIONS, "text/csv")
        .await;

    let err = job(&store, config).run().await.unwrap_err();
    assert_eq!(FailureKind::classify(&err), FailureKind::Store);
}

#[tokio::test]
async fn test_metrics_write_failure_leaves_nothing_new() {
    let store = seeded_store(OBSERVATIONS, BASELINE).await;
    let config = JobEnvConfig::default();
    store.fail_writes_to(&config.metrics_output_path).await;

    let err = job(&store, config.clone()).run().await.unwrap_err();

    assert_eq!(FailureKind::classify(&err), FailureKind::Store);
    assert!(store.get(&config.metrics_output_path).await.is_none());
    assert!(store.get(&config.comparison_output_path).await.is_none());
}

#[tokio::test]
async fn test_archive_write_failure_keeps_previous_latest_artifacts() {
    let store = seeded_store(OBSERVATIONS, BASELINE).await;
    let config = JobEnvConfig {
        archive_prefix: Some("history".to_string()),
        ..JobEnvConfig::default()
    };
    store
        .insert(&config.metrics_output_path, "previous metrics", JSON_CONTENT_TYPE)
        .await;
    store
        .insert(&config.comparison_output_path, "previous comparison", JSON_CONTENT_TYPE)
        .await;

    // Fail the archived metrics copy whatever second the run starts in
    let archive_job = job(&store, config.clone());
    let start = chrono::Utc::now();
    for offset in 0..5 {
        let at = start + chrono::Duration::seconds(offset);
        let dir = MonitoringJob::archive_dir("history", at);
        store
            .fail_writes_to(&format!("{}/current_metrics.json", dir))
            .await;
    }

    let err = archive_job.run().await.unwrap_err();

    assert_eq!(FailureKind::classify(&err), FailureKind::Store);
    let metrics = store.get(&config.metrics_output_path).await.unwrap();
    assert_eq!(metrics.content, b"previous metrics".to_vec());
    let comparison = store.get(&config.comparison_output_path).await.unwrap();
    assert_eq!(comparison.content, b"previous comparison".to_vec());
    assert!(
        !store
            .paths()
            .await
            .iter()
            .any(|p| p.ends_with("metrics_comparison.json") && p.starts_with("history/"))
    );
}

#[tokio::test]
async fn test_comparison_write_failure_after_metrics_written() {
    let store = seeded_store(OBSERVATIONS, BASELINE).await;
    let config = JobEnvConfig {
        archive_prefix: Some("history".to_string()),
        ..JobEnvConfig::default()
    };
    store.fail_writes_to(&config.comparison_output_path).await;

    let err = job(&store, config.clone()).run().await.unwrap_err();

    assert_eq!(FailureKind::classify(&err), FailureKind::Store);
    // Archive copies and metrics precede the comparison write
    let paths = store.paths().await;
    assert_eq!(
        paths.iter().filter(|p| p.starts_with("history/")).count(),
        2
    );
    assert!(store.get(&config.metrics_output_path).await.is_some());
    assert!(store.get(&config.comparison_output_path).await.is_none());
}

#[tokio::test]
async fn test_bad_row_fails_fast_by_default() {
    let observations = "true_values;predictions\n3;2.5\n5;oops\n2;2.5\n";
    let store = seeded_store(observations, BASELINE).await;

    let err = job(&store, JobEnvConfig::default()).run().await.unwrap_err();

    assert_eq!(FailureKind::classify(&err), FailureKind::Schema);
    assert!(format!("{:#}", err).contains("row 2"));
}

#[tokio::test]
async fn test_skip_invalid_policy_drops_bad_rows() {
    let observations = "true_values;predictions\n3;2.5\n5;oops\n5;5.0\n;1\n2;2.5\n";
    let store = seeded_store(observations, BASELINE).await;
    let config = JobEnvConfig {
        row_policy: RowPolicy::SkipInvalid,
        ..JobEnvConfig::default()
    };

    let summary = job(&store, config).run().await.unwrap();

    assert_eq!(summary.rows_read, 5);
    assert_eq!(summary.rows_skipped, 2);
    assert_eq!(summary.observations, 3);
    assert!((summary.current.mse - 0.5 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let store = seeded_store(OBSERVATIONS, BASELINE).await;
    let before = store.paths().await;
    let config = JobEnvConfig {
        dry_run: true,
        ..JobEnvConfig::default()
    };

    let summary = job(&store, config).run().await.unwrap();

    assert!(summary.dry_run);
    assert!(summary.artifacts.is_empty());
    assert_eq!(store.paths().await, before);
}

#[tokio::test]
async fn test_archive_prefix_writes_history_copies() {
    let store = seeded_store(OBSERVATIONS, BASELINE).await;
    let config = JobEnvConfig {
        archive_prefix: Some("history".to_string()),
        ..JobEnvConfig::default()
    };

    let summary = job(&store, config.clone()).run().await.unwrap();

    let dir = MonitoringJob::archive_dir("history", summary.started_at);
    assert_eq!(
        summary.artifacts,
        vec![
            format!("{}/current_metrics.json", dir),
            format!("{}/metrics_comparison.json", dir),
            config.metrics_output_path.clone(),
            config.comparison_output_path.clone(),
        ]
    );

    let latest = store.get(&config.metrics_output_path).await.unwrap();
    let archived = store.get(&summary.artifacts[0]).await.unwrap();
    assert_eq!(latest.content, archived.content);
}

#[tokio::test]
async fn test_custom_delimiter_and_columns() {
    let store = InMemoryBlobStore::new();
    let config = JobEnvConfig {
        delimiter: b',',
        true_column: "actual".to_string(),
        prediction_column: "forecast".to_string(),
        ..JobEnvConfig::default()
    };
    store
        .insert(
            &config.observations_path,
            "forecast,actual\n2.5,3\n5.0,5\n2.5,2\n",
            "text/csv",
        )
        .await;
    store
        .insert(&config.baseline_path, BASELINE, JSON_CONTENT_TYPE)
        .await;

    let summary = job(&store, config).run().await.unwrap();
    assert!((summary.current.mae - 1.0 / 3.0).abs() < 1e-9);
}
