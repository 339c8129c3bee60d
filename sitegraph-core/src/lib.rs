pub mod audit;
pub mod edgelist;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod report;

pub use audit::{AuditSummary, audit_pages, collect_internal_links};
pub use edgelist::{read_edge_list, write_edge_list};
pub use error::GraphError;
pub use graph::SiteGraph;
pub use metrics::GraphMetrics;
pub use report::{append_audit_row, append_metrics_row};
