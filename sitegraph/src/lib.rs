pub mod commands;
pub mod handlers;

// Re-export commonly used helpers for convenience
pub use handlers::{
    expand_path, file_label, format_audit_summary, format_crawl_summary, format_metrics_summary,
    parse_seed_url,
};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
