use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitegraph_core::audit::{AuditSummary, audit_pages, collect_internal_links};
use sitegraph_core::edgelist::{read_edge_list, write_edge_list};
use sitegraph_core::graph::SiteGraph;
use sitegraph_core::metrics::GraphMetrics;
use sitegraph_core::report::{append_audit_row, append_metrics_row};
use sitegraph_scanner::normalize::normalize_seed;
use sitegraph_scanner::{Crawler, LinkClass, LinkMap, PageFetcher, ProgressCallback};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

// Helper functions shared by the handlers

/// Accept a seed with or without a scheme, assuming http:// when it is missing.
pub fn parse_seed_url(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    match normalize_seed(raw) {
        Ok(url) => Ok(url.to_string()),
        Err(_) if !raw.contains("://") => normalize_seed(&format!("http://{}", raw))
            .map(|url| url.to_string())
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Label used for the "File Name" column of the results tables.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn format_crawl_summary(links: &LinkMap, output: &Path) -> String {
    let mut summary = String::new();
    summary.push_str(&format!("  Pages expanded:  {}\n", links.source_count()));
    summary.push_str(&format!("  Links recorded:  {}\n", links.edge_count()));
    summary.push_str(&format!(
        "    {} internal:   {}\n",
        "●".green(),
        links.count_class(LinkClass::Internal)
    ));
    summary.push_str(&format!(
        "    {} external:   {}\n",
        "●".bright_black(),
        links.count_class(LinkClass::External)
    ));
    summary.push_str(&format!(
        "    {} error:      {}\n",
        "●".red(),
        links.count_class(LinkClass::Error)
    ));
    summary.push_str(&format!("  Edge list:       {}\n", output.display()));
    summary
}

pub fn format_metrics_summary(file_name: &str, metrics: &GraphMetrics) -> String {
    let mut summary = String::new();
    summary.push_str(&format!("  File:            {}\n", file_name));
    summary.push_str(&format!("  Density:         {:.4}\n", metrics.density));
    summary.push_str(&format!("  Width:           {}\n", metrics.width));
    summary.push_str(&format!("  Maximum depth:   {}\n", metrics.max_depth));
    summary.push_str(&format!("  Leafs:           {}\n", metrics.leafs));
    summary
}

pub fn format_audit_summary(file_name: &str, pages: usize, audit: &AuditSummary) -> String {
    let mut summary = String::new();
    summary.push_str(&format!("  File:                 {}\n", file_name));
    summary.push_str(&format!("  Pages inspected:      {}\n", pages));
    summary.push_str(&format!(
        "  With login field:     {}\n",
        audit.pages_with_login_field
    ));
    summary.push_str(&format!("  With forms:           {}\n", audit.pages_with_forms));
    summary.push_str(&format!("  Largest page:         {} bytes\n", audit.max_size));
    summary.push_str(&format!("  Smallest page:        {} bytes\n", audit.min_size));
    summary.push_str(&format!(
        "  Average page size:    {:.1} bytes\n",
        audit.average_size
    ));
    summary
}

fn load_graph_input(args: &ArgMatches) -> Result<(PathBuf, Vec<sitegraph_scanner::Edge>)> {
    let edge_list = args
        .get_one::<PathBuf>("EDGE_LIST")
        .context("missing edge list argument")?;
    let edge_list = expand_path(&edge_list.to_string_lossy());
    let edges = read_edge_list(&edge_list)
        .with_context(|| format!("Failed to read edge list {}", edge_list.display()))?;
    if edges.is_empty() {
        warn!("{} contains no usable edges", edge_list.display());
    }
    Ok((edge_list, edges))
}

fn results_path(args: &ArgMatches) -> Result<PathBuf> {
    let results = args
        .get_one::<String>("results")
        .context("missing results argument")?;
    Ok(expand_path(results))
}

pub async fn handle_crawl(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let seed = args.get_one::<String>("URL").context("missing URL argument")?;
    let max_pages = *args.get_one::<usize>("max-pages").unwrap_or(&30);
    let delay_ms = *args.get_one::<u64>("delay-ms").unwrap_or(&1000);
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&10);
    let output = expand_path(
        args.get_one::<String>("output")
            .context("missing output argument")?,
    );

    if !quiet {
        print_divider();
        println!("{} {}", "  CRAWLING".bright_white().bold(), seed.bright_white());
        print_divider();
        println!("{} Max pages: {}", "→".blue(), max_pages);
        println!("{} Delay: {} ms, timeout: {} s", "→".blue(), delay_ms, timeout);
        println!();
    }

    let progress = spinner(quiet);
    let progress_bar = progress.clone();
    let progress_callback: ProgressCallback = Arc::new(move |count: usize, url: String| {
        progress_bar.set_message(format!("[{}/{}] {}", count, max_pages, url));
    });

    let crawler = Crawler::with_timeout(timeout)?
        .with_max_pages(max_pages)
        .with_request_delay(delay_ms)
        .with_progress_callback(progress_callback);

    let crawled = crawler.crawl(seed).await;
    progress.finish_and_clear();
    let links = crawled.with_context(|| format!("Crawl of {} failed", seed))?;

    write_edge_list(&output, links.edges())
        .with_context(|| format!("Failed to write edge list {}", output.display()))?;
    info!("Edge list written to {}", output.display());

    println!("{} Crawl complete!", "✓".green().bold());
    print!("{}", format_crawl_summary(&links, &output));
    Ok(())
}

pub fn handle_metrics(args: &ArgMatches) -> Result<()> {
    let (edge_list, edges) = load_graph_input(args)?;
    let results = results_path(args)?;
    let file_name = file_label(&edge_list);

    let graph = SiteGraph::build(edges);
    info!(
        "Computing metrics over {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    let metrics = GraphMetrics::compute(&graph);

    append_metrics_row(&results, &file_name, &metrics)
        .with_context(|| format!("Failed to update results table {}", results.display()))?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("{} Metrics computed", "✓".green().bold());
    print!("{}", format_metrics_summary(&file_name, &metrics));
    println!("{} Appended to {}", "→".blue(), results.display());
    Ok(())
}

pub async fn handle_audit(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let (edge_list, edges) = load_graph_input(args)?;
    let results = results_path(args)?;
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&10);
    let file_name = file_label(&edge_list);

    let links = collect_internal_links(&edges);
    info!("Auditing {} internal pages", links.len());

    let progress = spinner(quiet);
    progress.set_message(format!("Inspecting {} pages from {}", links.len(), file_name));

    let fetcher = PageFetcher::with_timeout(timeout)?;
    let inspections = audit_pages(&fetcher, links).await;
    progress.finish_and_clear();

    let summary = AuditSummary::from_inspections(&inspections);
    append_audit_row(&results, &file_name, &summary)
        .with_context(|| format!("Failed to update audit table {}", results.display()))?;

    println!("{} Audit complete", "✓".green().bold());
    print!(
        "{}",
        format_audit_summary(&file_name, inspections.len(), &summary)
    );
    println!("{} Appended to {}", "→".blue(), results.display());
    Ok(())
}
