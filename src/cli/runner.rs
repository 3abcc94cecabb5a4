//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourceConfig;
use crate::error::{Result, ResultExt};
use crate::http::{HttpClient, ItemsClient, ItemsPage};
use crate::server;
use futures::{pin_mut, StreamExt};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Overrides given on the command line for `fetch`
#[derive(Debug, Clone, Default)]
pub struct FetchArgs {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub total: Option<u64>,
    pub per_page: Option<u64>,
    pub initial_page: Option<u64>,
    pub max_pages: Option<u64>,
}

impl FetchArgs {
    /// Load the config file (if any) and apply the overrides on top
    pub fn resolve(&self) -> Result<SourceConfig> {
        let mut config = match &self.config {
            Some(path) => SourceConfig::load(path)?,
            None => SourceConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(total) = self.total {
            config.total = total;
        }
        if let Some(per_page) = self.per_page {
            config.per_page = per_page;
        }
        if let Some(initial_page) = self.initial_page {
            config.initial_page = initial_page;
        }
        if self.max_pages.is_some() {
            config.max_pages = self.max_pages;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Totals for one `fetch` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub pages: u64,
    pub items: u64,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port } => {
                let addr = SocketAddr::from(([0, 0, 0, 0], *port));
                server::serve(addr).await
            }
            Commands::Fetch {
                config,
                base_url,
                total,
                per_page,
                initial_page,
                max_pages,
                format,
            } => {
                let args = FetchArgs {
                    config: config.clone(),
                    base_url: base_url.clone(),
                    total: *total,
                    per_page: *per_page,
                    initial_page: *initial_page,
                    max_pages: *max_pages,
                };
                let source = args.resolve()?;
                let stdout = std::io::stdout();
                fetch(&source, *format, &mut stdout.lock()).await?;
                Ok(())
            }
        }
    }
}

/// Consume every page of `source`, writing each one to `out` as it arrives
pub async fn fetch(
    source: &SourceConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<FetchSummary> {
    let start = Instant::now();
    let client = ItemsClient::new(HttpClient::with_config(source.http_config())?)
        .with_path(source.path.clone());

    info!(
        "Fetching {} items from {} ({} per page)",
        source.total, source.base_url, source.per_page
    );

    let pages = client.pages(
        source.total,
        source.per_page,
        source.initial_page,
        source.max_pages,
    );
    pin_mut!(pages);

    let mut summary = FetchSummary::default();
    while let Some(page) = pages.next().await {
        let page_number = source.initial_page + summary.pages;
        let page = match page {
            Ok(page) => page,
            // 4xx: the source refused the query itself
            Err(e) if e.is_client_error() => {
                warn!(page = page_number, "Source rejected page request");
                return Err(e).with_context(|| {
                    format!(
                        "page {page_number} rejected (total={}, per_page={})",
                        source.total, source.per_page
                    )
                });
            }
            Err(e) => return Err(e),
        };
        summary.pages += 1;
        summary.items += page.items.len() as u64;
        write_page(out, format, page_number, &page)?;
    }

    if format == OutputFormat::Pretty {
        writeln!(
            out,
            "Fetched {} items in {} pages",
            summary.items, summary.pages
        )?;
    }

    info!(
        "Completed fetch: {} items in {} pages ({}ms)",
        summary.items,
        summary.pages,
        start.elapsed().as_millis()
    );

    Ok(summary)
}

fn write_page(
    out: &mut impl Write,
    format: OutputFormat,
    page_number: u64,
    page: &ItemsPage,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let line = serde_json::json!({
                "page": page_number,
                "items": page.items,
                "count": page.count,
            });
            writeln!(out, "{line}")?;
        }
        OutputFormat::Pretty => match (page.items.first(), page.items.last()) {
            (Some(first), Some(last)) => writeln!(
                out,
                "Page {page_number}: {} items ({first}..={last})",
                page.items.len()
            )?,
            _ => writeln!(out, "Page {page_number}: no items")?,
        },
    }
    Ok(())
}
