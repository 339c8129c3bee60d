use crate::CLAP_STYLING;
use crate::handlers::parse_seed_url;
use clap::{arg, command};
use std::path::PathBuf;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitegraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitegraph")
        .about("Crawl a website into a link graph and measure its shape")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress progress and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Log every fetch and classification decision")
                .required(false)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl a site from a seed URL, classifying every link as internal, external \
                or error, and write the edge list.",
                )
                .arg(
                    arg!(<URL>)
                        .help("The seed URL. http:// is assumed when no scheme is given")
                        .value_parser(parse_seed_url),
                )
                .arg(
                    arg!(-m --"max-pages" <NUM>)
                        .required(false)
                        .help("Stop expanding pages once this many have been visited")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("30"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the edge list")
                        .default_value("database.csv"),
                )
                .arg(
                    arg!(--"delay-ms" <MILLIS>)
                        .required(false)
                        .help("Pause before every page fetch, in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1000"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                ),
        )
        .subcommand(
            command!("metrics")
                .about(
                    "Build the link graph from an edge list, compute density, width, maximum \
                depth and leaf count, and append them to the results table.",
                )
                .arg(
                    arg!(<EDGE_LIST>)
                        .help("Edge list written by the crawl command")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-r --"results" <PATH>)
                        .required(false)
                        .help("Results table to append to")
                        .default_value("usability_metrics.csv"),
                )
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Print the metrics as JSON")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("audit")
                .about(
                    "Fetch every internal page in an edge list and count login fields, forms \
                and page sizes. Appends a row to the audit table.",
                )
                .arg(
                    arg!(<EDGE_LIST>)
                        .help("Edge list written by the crawl command")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-r --"results" <PATH>)
                        .required(false)
                        .help("Audit table to append to")
                        .default_value("security_metrics.csv"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                ),
        )
}
