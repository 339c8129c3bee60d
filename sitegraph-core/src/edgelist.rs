// Edge-list files: the handoff between a crawl run and a metrics run

use crate::error::Result;
use sitegraph_scanner::result::{Edge, LinkClass};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

pub const EDGE_LIST_HEADER: [&str; 3] = ["Source Link", "Target", "Color"];

/// Write `edges` with the standard header. Returns the number of rows written.
pub fn write_edge_list<'a, I>(path: &Path, edges: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Edge>,
{
    let file = File::create(path)?;
    let written = write_edges(file, edges)?;
    debug!("Wrote {} edges to {}", written, path.display());
    Ok(written)
}

pub fn write_edges<'a, W, I>(writer: W, edges: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Edge>,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(EDGE_LIST_HEADER)?;

    let mut written = 0;
    for edge in edges {
        writer.write_record([edge.source.as_str(), edge.target.as_str(), edge.class.color()])?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

pub fn read_edge_list(path: &Path) -> Result<Vec<Edge>> {
    let file = File::open(path)?;
    read_edges(file)
}

/// Parse an edge list by column position: source, target, color.
///
/// The first row is always treated as the header. Rows that cannot be used
/// (too few columns, blank endpoints, unknown color, unreadable record) are
/// skipped with a warning.
pub fn read_edges<R: Read>(reader: R) -> Result<Vec<Edge>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut edges = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let row = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable edge-list row {}: {}", row, e);
                continue;
            }
        };

        let (Some(source), Some(target)) = (record.get(0), record.get(1)) else {
            warn!("Skipping edge-list row {}: expected source and target", row);
            continue;
        };
        if source.is_empty() || target.is_empty() {
            warn!("Skipping edge-list row {}: blank source or target", row);
            continue;
        }

        let color = record.get(2).unwrap_or_default();
        let Some(class) = LinkClass::from_color(color) else {
            warn!("Skipping edge-list row {}: unknown color '{}'", row, color);
            continue;
        };

        edges.push(Edge::new(source, target, class));
    }

    Ok(edges)
}
