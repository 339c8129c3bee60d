use colored::Colorize;
use sitegraph::commands::command_argument_builder;
use sitegraph::handlers::{handle_audit, handle_crawl, handle_metrics};
use tracing::Level;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let chosen_command = command_argument_builder().get_matches();

    let level = if chosen_command.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => handle_crawl(primary_command).await,
        Some(("metrics", primary_command)) => handle_metrics(primary_command),
        Some(("audit", primary_command)) => handle_audit(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
