//! Generate command integration tests.
//!
//! These tests run the generate workflow end to end against fixture
//! dataset configs:
//! 1. Load and validate the dataset config
//! 2. Write a bulk-ingest file with a fixed seed
//! 3. Parse the file back and check every action/document pair
//! 4. Rebuild the generator from the same seed to check pool membership

use bulk_export::{ActionArg, BulkExportArgs, DatasetArgs, ModeArg};
use chrono::Local;
use metrics_core::{
    AssociationMode, BulkAction, BulkActionKind, DatasetConfig, MetricRecord, ResourceAssociation,
};
use metrics_datagen::commands::{run_generate, run_validate};
use metrics_generator::RecordGenerator;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn export_args(output: PathBuf, count: u64, config: Option<PathBuf>) -> BulkExportArgs {
    BulkExportArgs {
        output,
        count,
        index_name: None,
        action: ActionArg::Index,
        dry_run: false,
        dataset: DatasetArgs {
            config,
            ..DatasetArgs::default()
        },
    }
}

fn read_pairs(path: &Path) -> Vec<(BulkAction, MetricRecord)> {
    let content = std::fs::read_to_string(path).expect("Failed to read bulk file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len() % 2, 0, "Odd number of lines");

    lines
        .chunks(2)
        .map(|pair| {
            let action: BulkAction = serde_json::from_str(pair[0]).expect("Bad action line");
            let record: MetricRecord = serde_json::from_str(pair[1]).expect("Bad record line");
            (action, record)
        })
        .collect()
}

#[test]
fn test_generate_single_resource_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("test-data.json");
    let config_path = fixture("single_resource.yaml");

    let before = Local::now().naive_local();
    let metrics = run_generate(&export_args(output.clone(), 300, Some(config_path.clone())))
        .unwrap()
        .expect("Export metrics");
    let after = Local::now().naive_local();
    assert_eq!(metrics.documents_written, 300);
    assert_eq!(metrics.lines_written, 600);

    let config = DatasetConfig::from_file(&config_path).unwrap();
    assert_eq!(config.association, AssociationMode::SingleResource);
    let reference = RecordGenerator::new(config.clone()).unwrap();
    let pools = reference.pools();

    let pairs = read_pairs(&output);
    assert_eq!(pairs.len(), 300);

    for (i, (action, record)) in pairs.iter().enumerate() {
        assert_eq!(action, &BulkAction::new(BulkActionKind::Index, i as u64, None));

        assert!(pools.contains_user(&record.user_id));
        let ResourceAssociation::Single(resource) = &record.resources else {
            panic!("Expected single resource, got {:?}", record.resources);
        };
        assert!(pools.contains_resource(&resource.resource_type, &resource.resource_id));
        assert!(uuid::Uuid::parse_str(&resource.resource_id).is_ok());

        let catalog = &config.get_resource(&resource.resource_type).unwrap().metrics;
        assert!(catalog.contains(&record.metric_type));

        let source = reference.value_source(&record.metric_type).unwrap();
        assert!(source.contains(record.value));

        assert!(record.timestamp <= after);
        let earliest = before - config.timestamp.max_offset() - chrono::TimeDelta::seconds(1);
        assert!(record.timestamp >= earliest);
    }
}

#[test]
fn test_generate_multi_metadata_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("test-data.json");
    let config_path = fixture("multi_metadata.yaml");

    run_generate(&export_args(output.clone(), 500, Some(config_path.clone()))).unwrap();

    let config = DatasetConfig::from_file(&config_path).unwrap();
    let reference = RecordGenerator::new(config.clone()).unwrap();
    let pools = reference.pools();
    let resource_count = config.resources.len();

    for (i, (action, record)) in read_pairs(&output).iter().enumerate() {
        assert_eq!(action.target().id, i as u64);

        let ResourceAssociation::Metadata { metadata } = &record.resources else {
            panic!("Expected metadata, got {:?}", record.resources);
        };
        assert!((1..=resource_count).contains(&metadata.len()));

        let types: HashSet<&str> = metadata.iter().map(|r| r.resource_type.as_str()).collect();
        assert_eq!(types.len(), metadata.len());

        for r in metadata {
            assert!(pools.contains_resource(&r.resource_type, &r.resource_id));
        }
        assert!(pools.contains_user(&record.user_id));

        let (min, max) = config
            .get_metric(&record.metric_type)
            .unwrap()
            .value
            .bounds()
            .unwrap();
        assert!((min..=max).contains(&record.value));
        if record.metric_type == "jump_length" {
            assert!([50, 100, 250, 500, 1000].contains(&record.value));
        }
    }
}

#[test]
fn test_generate_with_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("test-data.json");

    let mut args = export_args(output.clone(), 10, None);
    args.index_name = Some("metrics".to_string());
    args.action = ActionArg::Create;
    args.dataset.seed = Some(42);
    args.dataset.mode = Some(ModeArg::SingleResource);

    run_generate(&args).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 20);
    assert_eq!(lines[0], r#"{"create":{"_index":"metrics","_id":0}}"#);
    assert_eq!(lines[18], r#"{"create":{"_index":"metrics","_id":9}}"#);

    for pair in lines.chunks(2) {
        let record: serde_json::Value = serde_json::from_str(pair[1]).unwrap();
        let obj = record.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        for key in [
            "metric_type",
            "user_id",
            "timestamp",
            "resource_type",
            "resource_id",
            "value",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert!(obj.get("metadata").is_none());
    }
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("test-data.json");

    let mut args = export_args(output.clone(), 10, None);
    args.dry_run = true;

    assert!(run_generate(&args).unwrap().is_none());
    assert!(!output.exists());
}

#[test]
fn test_dry_run_with_huge_count() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("test-data.json");

    let mut args = export_args(output.clone(), u64::MAX, None);
    args.dry_run = true;

    assert!(run_generate(&args).unwrap().is_none());
    assert!(!output.exists());
}

#[test]
fn test_invalid_config_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("test-data.json");

    let result = run_generate(&export_args(
        output.clone(),
        10,
        Some(fixture("empty_catalog.yaml")),
    ));

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("no permissible metric types"));
    assert!(!output.exists());
}

#[test]
fn test_validate_fixtures() {
    let config = run_validate(&DatasetArgs {
        config: Some(fixture("single_resource.yaml")),
        ..DatasetArgs::default()
    })
    .unwrap();
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.users, 5);

    assert!(run_validate(&DatasetArgs {
        config: Some(fixture("empty_catalog.yaml")),
        ..DatasetArgs::default()
    })
    .is_err());
}

#[test]
fn test_same_seed_same_output() {
    // Timestamps depend on the wall clock, so compare everything else.
    let temp_dir = TempDir::new().unwrap();
    let path1 = temp_dir.path().join("a.json");
    let path2 = temp_dir.path().join("b.json");

    run_generate(&export_args(path1.clone(), 50, Some(fixture("multi_metadata.yaml")))).unwrap();
    run_generate(&export_args(path2.clone(), 50, Some(fixture("multi_metadata.yaml")))).unwrap();

    let strip = |pairs: Vec<(BulkAction, MetricRecord)>| {
        pairs
            .into_iter()
            .map(|(action, record)| {
                (
                    action,
                    record.metric_type,
                    record.user_id,
                    record.resources,
                    record.value,
                )
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(strip(read_pairs(&path1)), strip(read_pairs(&path2)));
}
