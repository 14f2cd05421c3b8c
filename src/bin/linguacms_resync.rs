// ABOUTME: Command-line tool rebuilding and republishing detail aggregates from the relational store
// ABOUTME: Repairs cache and search after an outage by replaying publication for one root or whole families
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! Republish detail aggregates to the cache and the search index.
//!
//! Usage:
//! ```bash
//! # Every root of every family
//! cargo run --bin linguacms-resync
//!
//! # Every course
//! cargo run --bin linguacms-resync -- --family course
//!
//! # One listening question
//! cargo run --bin linguacms-resync -- --family listening --id 3f0c...
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use linguacms::config::environment::ServerConfig;
use linguacms::context::ServerResources;
use linguacms::errors::AppResult;
use linguacms::logging::{LogFormat, LoggingConfig};
use linguacms::models::ContentFamily;
use linguacms::services::{RootService, RootStore};
use linguacms::sync::{PublishMode, PublishReport};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "linguacms-resync",
    about = "Lingua CMS cache and search resynchronization",
    long_about = "Rebuild detail aggregates from the relational store and publish them to the cache and the search index."
)]
struct ResyncArgs {
    /// Content family to republish (listening, grammar, course); all when omitted
    #[arg(long, value_parser = parse_family)]
    family: Option<ContentFamily>,

    /// Single root id to republish
    #[arg(long, requires = "family")]
    id: Option<Uuid>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_family(value: &str) -> Result<ContentFamily, String> {
    ContentFamily::parse(value).ok_or_else(|| {
        format!("unknown family '{value}', expected one of: listening, grammar, course")
    })
}

async fn resync<R: RootStore>(
    roots: &RootService<R>,
    id: Option<Uuid>,
) -> AppResult<Vec<PublishReport>> {
    match id {
        Some(id) => Ok(vec![roots.republish(id, PublishMode::Root).await?]),
        None => roots.republish_all().await,
    }
}

async fn resync_family(
    resources: &ServerResources,
    family: ContentFamily,
    id: Option<Uuid>,
) -> AppResult<Vec<PublishReport>> {
    match family {
        ContentFamily::Listening => resync(resources.listening.roots(), id).await,
        ContentFamily::Grammar => resync(resources.grammar.roots(), id).await,
        ContentFamily::Course => resync(resources.courses.roots(), id).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ResyncArgs::parse();

    let mut logging = LoggingConfig::from_env();
    logging.format = LogFormat::Compact;
    if args.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    let resources = ServerResources::from_config(&config).await?;
    resources
        .cache
        .health_check()
        .await
        .context("cache backend is not healthy")?;
    resources
        .search
        .health_check()
        .await
        .context("search backend is not healthy")?;

    let families = args
        .family
        .map_or_else(|| ContentFamily::ALL.to_vec(), |family| vec![family]);

    let mut published = 0_usize;
    let mut degraded = 0_usize;
    for family in families {
        let reports = resync_family(&resources, family, args.id)
            .await
            .with_context(|| format!("republishing {family} failed"))?;

        for report in reports.iter().filter(|report| !report.is_clean()) {
            warn!(
                content.root_id = %report.root_id,
                warnings = ?report.warnings,
                "Republished with degraded writes"
            );
        }
        degraded += reports.iter().filter(|report| !report.is_clean()).count();
        published += reports.len();
        info!(content.family = %family, count = reports.len(), "Family republished");
    }

    info!(published, degraded, "Resync complete");
    Ok(())
}
