// Tests for the append-only results tables

use sitegraph_core::audit::AuditSummary;
use sitegraph_core::metrics::GraphMetrics;
use sitegraph_core::report::{append_audit_row, append_metrics_row};
use tempfile::TempDir;

fn sample_metrics() -> GraphMetrics {
    GraphMetrics {
        density: 0.5,
        width: 2,
        max_depth: 3,
        leafs: 1,
    }
}

#[test]
fn test_metrics_table_header_written_once() {
    let temp_dir = TempDir::new().unwrap();
    let results = temp_dir.path().join("usability_metrics.csv");

    append_metrics_row(&results, "database.csv", &sample_metrics()).unwrap();
    append_metrics_row(&results, "database.csv", &sample_metrics()).unwrap();

    let content = std::fs::read_to_string(&results).unwrap();
    assert_eq!(
        content,
        "File Name,Density,Width,Maximum Depth,Leafs\n\
         database.csv,0.5,2,3,1\n\
         database.csv,0.5,2,3,1\n"
    );
}

#[test]
fn test_metrics_table_appends_to_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let results = temp_dir.path().join("usability_metrics.csv");
    std::fs::write(&results, "File Name,Density,Width,Maximum Depth,Leafs\nold.csv,0,0,0,0\n")
        .unwrap();

    append_metrics_row(&results, "new.csv", &sample_metrics()).unwrap();

    let content = std::fs::read_to_string(&results).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "old.csv,0,0,0,0");
    assert_eq!(lines[2], "new.csv,0.5,2,3,1");
}

#[test]
fn test_audit_table_columns() {
    let temp_dir = TempDir::new().unwrap();
    let results = temp_dir.path().join("security_metrics.csv");
    let summary = AuditSummary {
        pages_with_login_field: 1,
        pages_with_forms: 4,
        max_size: 5120,
        min_size: 80,
        average_size: 900.0,
    };

    append_audit_row(&results, "database.csv", &summary).unwrap();

    let content = std::fs::read_to_string(&results).unwrap();
    assert_eq!(
        content,
        "File Name,Number of pages with a login/password field,\
         Number of pages with forms or user interaction,Maximum webpage size\n\
         database.csv,1,4,5120\n"
    );
}

#[test]
fn test_results_table_in_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let results = temp_dir.path().join("no-such-dir").join("metrics.csv");

    assert!(append_metrics_row(&results, "x.csv", &sample_metrics()).is_err());
}
