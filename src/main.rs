//! CLI entry point for the openlib tool.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use openlib_core::{
    BookId, ClientConfig, CoverSize, DeweyDecimal, Isbn13, Language, Lccn, Olid, OpenLibrary,
    Paging, SearchRequest, SortKey,
};
use serde::Serialize;
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::FileConfig;
use cli::{Args, Command, PagingArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries JSON output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let loaded = app_config::load_config(args.config.as_deref())?;
    if let Some(path) = &loaded.path {
        debug!(path = %path.display(), loaded = loaded.config.is_some(), "Config file resolved");
    }
    let file = loaded.file();
    let config = client_config(&args, &file);

    match args.command {
        Command::Validate { value } => print_json(&classify_identifier(&value)?),
        Command::Query(query) => {
            let compiled = query.to_query().compile()?;
            println!("{compiled}");
            Ok(())
        }
        Command::Book { work } => {
            let client = OpenLibrary::with_config(config)?;
            print_json(&client.book(&Olid::parse(&work)?).await?)
        }
        Command::Edition { id } => {
            let client = OpenLibrary::with_config(config)?;
            print_json(&client.edition(&BookId::parse(&id)?).await?)
        }
        Command::Editions { work, paging } => {
            let client = OpenLibrary::with_config(config)?;
            let page = client
                .editions(&Olid::parse(&work)?, paging_for(paging, &file))
                .await?;
            print_json(&page)
        }
        Command::Author { author } => {
            let client = OpenLibrary::with_config(config)?;
            print_json(&client.author(&Olid::parse(&author)?).await?)
        }
        Command::AuthorWorks { author, paging } => {
            let client = OpenLibrary::with_config(config)?;
            let page = client
                .author_works(&Olid::parse(&author)?, paging_for(paging, &file))
                .await?;
            print_json(&page)
        }
        Command::Ratings { work } => {
            let client = OpenLibrary::with_config(config)?;
            print_json(&client.ratings(&Olid::parse(&work)?).await?)
        }
        Command::Search {
            query,
            sort,
            lang,
            fields,
            paging,
        } => {
            let mut request = SearchRequest::new(query.to_query()).fields(fields);
            if let Some(sort) = sort {
                request = request.sort(SortKey::parse(&sort)?);
            }
            if let Some(lang) = lang.or(file.lang.clone()) {
                request = request.lang(Language::parse(&lang)?);
            }
            if let Some(offset) = paging.offset {
                request = request.offset(offset);
            }
            if let Some(limit) = paging.limit.or(file.limit) {
                request = request.limit(limit);
            }
            let client = OpenLibrary::with_config(config)?;
            print_json(&client.search(&request).await?)
        }
        Command::SearchAuthors { name, paging } => {
            let client = OpenLibrary::with_config(config)?;
            print_json(
                &client
                    .search_authors(&name, paging_for(paging, &file))
                    .await?,
            )
        }
        Command::Cover { isbn, size, output } => {
            let isbn = Isbn13::parse(&isbn)?;
            let size = CoverSize::parse(&size)?;
            let client = OpenLibrary::with_config(config)?;
            let bytes = client.cover(&isbn, size).await?;
            write_cover(&bytes, output.as_deref())
        }
    }
}

/// File values first, then CLI flags on top.
fn client_config(args: &Args, file: &FileConfig) -> ClientConfig {
    let mut config = file.apply_to(ClientConfig::default());
    if let Some(url) = &args.api_url {
        config.api_base_url.clone_from(url);
    }
    if let Some(url) = &args.covers_url {
        config.covers_base_url.clone_from(url);
    }
    if let Some(secs) = args.timeout {
        config.timeout_secs = secs;
    }
    config
}

fn paging_for(args: PagingArgs, file: &FileConfig) -> Paging {
    let defaults = Paging::default();
    Paging::new(
        args.offset.unwrap_or(defaults.offset),
        args.limit.or(file.limit).unwrap_or(defaults.limit),
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

fn write_cover(bytes: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write cover to '{}'", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "Cover saved");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write cover to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Result of offline identifier classification.
#[derive(Debug, PartialEq, Serialize)]
struct Classification {
    input: String,
    #[serde(rename = "type")]
    id_type: &'static str,
    canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Tries OLID, ISBN, LCCN and Dewey in that order; the first that parses wins.
fn classify_identifier(raw: &str) -> Result<Classification> {
    let input = raw.to_string();
    if let Ok(olid) = Olid::parse(raw) {
        return Ok(Classification {
            input,
            id_type: "olid",
            canonical: olid.to_string(),
            detail: Some(olid.kind().to_string()),
        });
    }
    if let Ok(isbn) = Isbn13::parse(raw) {
        return Ok(Classification {
            input,
            id_type: "isbn",
            canonical: isbn.to_string(),
            detail: None,
        });
    }
    if let Ok(lccn) = Lccn::parse(raw) {
        let era = match lccn.era() {
            openlib_core::LccnEra::Pre2001 => "pre_2001",
            openlib_core::LccnEra::Post2000 => "post_2000",
        };
        return Ok(Classification {
            input,
            id_type: "lccn",
            canonical: lccn.to_string(),
            detail: Some(era.to_string()),
        });
    }
    if let Ok(dewey) = DeweyDecimal::parse(raw) {
        return Ok(Classification {
            input,
            id_type: "dewey",
            canonical: dewey.to_string(),
            detail: Some(format!("main class {}", dewey.main_class())),
        });
    }
    bail!("'{raw}' is not a recognized OLID, ISBN, LCCN or Dewey number")
}
