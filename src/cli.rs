//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use openlib_core::{Query, Range};

/// Query the Open Library catalogue from the command line.
///
/// Entities are printed as pretty JSON on stdout; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "openlib")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/openlib/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the covers base URL
    #[arg(long, global = true, value_name = "URL")]
    pub covers_url: Option<String>,

    /// Total request timeout in seconds (1-3600)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify and normalize an identifier without contacting the service
    Validate {
        /// OLID, ISBN-10/13, LCCN or Dewey number
        value: String,
    },
    /// Compile search flags into a query string without contacting the service
    Query(QueryArgs),
    /// Fetch a work
    Book {
        /// Work OLID, e.g. OL45804W
        work: String,
    },
    /// Fetch an edition by edition OLID or ISBN
    Edition { id: String },
    /// List a work's editions
    Editions {
        work: String,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Fetch an author
    Author {
        /// Author OLID, e.g. OL23919A
        author: String,
    },
    /// List an author's works
    AuthorWorks {
        author: String,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Fetch a work's reader ratings
    Ratings { work: String },
    /// Search works
    Search {
        #[command(flatten)]
        query: QueryArgs,

        /// Result ordering (e.g. new, old, rating, editions)
        #[arg(long)]
        sort: Option<String>,

        /// Two-letter result language
        #[arg(long)]
        lang: Option<String>,

        /// Restrict returned document fields (repeatable)
        #[arg(long = "field", value_name = "NAME")]
        fields: Vec<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Search authors by name
    SearchAuthors {
        name: String,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Download a cover image by ISBN
    Cover {
        isbn: String,

        /// S, M or L
        #[arg(long, default_value = "L")]
        size: String,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Structured search flags shared by `query` and `search`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct QueryArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    /// Author name (repeatable)
    #[arg(long = "author", value_name = "NAME")]
    pub authors: Vec<String>,

    #[arg(long = "subject", value_name = "SUBJECT")]
    pub subjects: Vec<String>,

    #[arg(long = "place", value_name = "PLACE")]
    pub places: Vec<String>,

    #[arg(long = "person", value_name = "PERSON")]
    pub people: Vec<String>,

    #[arg(long = "publisher", value_name = "PUBLISHER")]
    pub publishers: Vec<String>,

    #[arg(long = "isbn", value_name = "ISBN")]
    pub isbns: Vec<String>,

    /// Dewey class, e.g. 823 or 82*
    #[arg(long)]
    pub ddc: Option<String>,

    /// Library of Congress classification
    #[arg(long)]
    pub lcc: Option<String>,

    /// Earliest first-publish year
    #[arg(long)]
    pub year_from: Option<u32>,

    /// Latest first-publish year
    #[arg(long)]
    pub year_to: Option<u32>,
}

impl QueryArgs {
    /// Builds the structured query; values are validated when it is compiled.
    #[must_use]
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(title) = &self.title {
            query = query.title(title.as_str());
        }
        if let Some(subtitle) = &self.subtitle {
            query = query.subtitle(subtitle.as_str());
        }
        if !self.authors.is_empty() {
            query = query.authors(self.authors.clone());
        }
        if !self.subjects.is_empty() {
            query = query.subjects(self.subjects.clone());
        }
        if !self.places.is_empty() {
            query = query.places(self.places.clone());
        }
        if !self.people.is_empty() {
            query = query.people(self.people.clone());
        }
        if !self.publishers.is_empty() {
            query = query.publishers(self.publishers.clone());
        }
        if !self.isbns.is_empty() {
            query = query.isbns(self.isbns.clone());
        }
        if let Some(ddc) = &self.ddc {
            query = query.ddc(ddc.as_str());
        }
        if let Some(lcc) = &self.lcc {
            query = query.lcc(lcc.as_str());
        }
        if self.year_from.is_some() || self.year_to.is_some() {
            query = query.first_publish_year(Range {
                start: self.year_from.map(|year| year.to_string()),
                end: self.year_to.map(|year| year.to_string()),
            });
        }
        query
    }
}

/// Offset and page size for listing commands.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct PagingArgs {
    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Page size (1-1000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub limit: Option<u32>,
}
