use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::{self, IsTerminal};

use treequery::config::{Config, OutputFormat};
use treequery::document::node::Node;
use treequery::file::loader::{load_file, load_from_stdin};
use treequery::query::{parse_path_or_query, Evaluator, Match, PathOrQuery, Query};
use treequery::walker::{IterativeTreeWalker, TreeWalker};

/// treeq - Query nested JSON/YAML documents
#[derive(Parser)]
#[command(name = "treeq")]
#[command(version)]
#[command(about = "Query nested JSON/YAML documents with treequery paths", long_about = None)]
struct Cli {
    /// Path or query to run (default: the configured default query)
    query: Option<String>,

    /// JSON or YAML file to read, optionally gzipped (omit to read from stdin)
    file: Option<String>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Visit every node instead of running a query
    #[arg(short, long)]
    all: bool,

    /// Stop after the first match
    #[arg(long)]
    first: bool,

    /// Print the number of matches only
    #[arg(short, long)]
    count: bool,

    /// Print paths without values
    #[arg(long)]
    no_values: bool,

    /// Config file to use instead of ~/.config/treequery/config.toml
    #[arg(long)]
    config: Option<String>,
}

/// One match as printed in JSON or YAML output.
#[derive(Serialize)]
struct Entry<'a> {
    path: String,
    value: &'a Node,
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    init_logging(&config.log_level);

    // With --all the only positional argument is the file
    let (query_arg, file_arg) = if cli.all {
        (None, cli.file.clone().or_else(|| cli.query.clone()))
    } else {
        (cli.query.clone(), cli.file.clone())
    };

    let tree = match &file_arg {
        Some(file_path) => load_file(file_path)?,
        None => {
            if io::stdin().is_terminal() {
                anyhow::bail!("No input: pass a FILE or pipe a document on stdin");
            }
            load_from_stdin()?
        }
    };

    let matches = if cli.all {
        walk_all(&tree, cli.first)
    } else {
        let text = query_arg.unwrap_or_else(|| config.default_query.clone());
        let query = parse_query(&text)?;
        let evaluator = Evaluator::new(&tree);
        if cli.first {
            evaluator.first(&query).into_iter().collect()
        } else {
            evaluator.evaluate(&query)
        }
    };

    if cli.count {
        println!("{}", matches.len());
        return Ok(());
    }

    let format = cli.format.unwrap_or(config.output_format);
    let show_values = config.show_values && !cli.no_values;
    print_matches(&matches, format, show_values)
}

/// Plain paths become single-match queries.
fn parse_query(text: &str) -> Result<Query> {
    let parsed =
        parse_path_or_query(text).with_context(|| format!("Invalid query '{}'", text))?;
    Ok(match parsed {
        PathOrQuery::Path(path) => Query::from(path),
        PathOrQuery::Query(query) => query,
    })
}

/// Every node below the root, in depth-first order.
fn walk_all(tree: &Node, first_only: bool) -> Vec<Match<'_>> {
    let mut matches = Vec::new();
    IterativeTreeWalker::new(|state, node| {
        matches.push(Match {
            path: state.current_path().cloned().unwrap_or_default(),
            node,
        });
        !first_only
    })
    .walk(tree);
    matches
}

fn print_matches(matches: &[Match<'_>], format: OutputFormat, show_values: bool) -> Result<()> {
    match format {
        OutputFormat::Paths => {
            for found in matches {
                if show_values {
                    println!("{}: {}", found.path, found.node.to_text());
                } else {
                    println!("{}", found.path);
                }
            }
        }
        OutputFormat::Json => {
            let entries = entries(matches);
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).context("Failed to serialize JSON")?
            );
        }
        OutputFormat::Yaml => {
            let entries = entries(matches);
            print!(
                "{}",
                serde_yaml::to_string(&entries).context("Failed to serialize YAML")?
            );
        }
    }
    Ok(())
}

fn entries<'a>(matches: &[Match<'a>]) -> Vec<Entry<'a>> {
    matches
        .iter()
        .map(|found| Entry {
            path: found.path.to_string(),
            value: found.node,
        })
        .collect()
}
