use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use pager_core::{PageRules, PaginationState};
use pager_engine::{
    system_clock, ApiPageSource, ApiResource, Character, Endpoints, Episode, Location,
    NetworkGateway, PageLoadError, PageSource, Paginator, ReqwestFetcher, ResponseCache,
    RickAndMortyApi,
};
use pager_logging::{pager_debug, pager_info, pager_warn};
use url::Url;

use crate::cli::{ListArgs, Resource};
use crate::config::Config;

/// Prints one collection page by page, then the rollup and cache usage.
pub async fn list(config: &Config, args: &ListArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let api_url = Url::parse(&config.api_url)
        .with_context(|| format!("invalid api_url {:?}", config.api_url))?;

    let fetcher = ReqwestFetcher::new(&config.fetch_settings())?;
    let cache = Arc::new(ResponseCache::new(config.cache_settings()));
    let gateway = NetworkGateway::new(Arc::new(fetcher), cache.clone(), system_clock());
    let api = RickAndMortyApi::new(Arc::new(gateway));

    let endpoints = api
        .endpoints(&api_url)
        .await
        .with_context(|| format!("failed to fetch endpoints from {api_url}"))?
        .output;
    pager_debug!("endpoints: {:?}", endpoints);

    match args.resource {
        Resource::Episodes => {
            list_collection::<Episode>(api, &endpoints, &cache, args, out, |episode| {
                format!("{:>4}  {}  {}", episode.id, episode.episode, episode.name)
            })
            .await
        }
        Resource::Characters => {
            list_collection::<Character>(api, &endpoints, &cache, args, out, |character| {
                format!(
                    "{:>4}  {}  ({}, {})",
                    character.id, character.name, character.status, character.species
                )
            })
            .await
        }
        Resource::Locations => {
            list_collection::<Location>(api, &endpoints, &cache, args, out, |location| {
                format!("{:>4}  {}  [{}]", location.id, location.name, location.dimension)
            })
            .await
        }
    }
}

async fn list_collection<T: ApiResource>(
    api: RickAndMortyApi,
    endpoints: &Endpoints,
    cache: &ResponseCache,
    args: &ListArgs,
    out: &mut impl Write,
    describe: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    let first_page = T::collection(endpoints).clone();
    let source: Arc<dyn PageSource<Url, T>> = Arc::new(ApiPageSource::new(api));
    let paginator = Paginator::spawn(
        PaginationState::new(Some(first_page)),
        PageRules::follow_links(),
        source,
    )?;

    let mut waiter = if args.refresh {
        paginator.reload_invalidating(cache, args.resource.cache_category())
    } else {
        paginator.load_next_page()
    };
    let mut printed = 0;
    let mut merged_pages = 0;
    let mut pages = 0;

    loop {
        match waiter.wait().await {
            Ok(page) => {
                pages += 1;
                pager_info!("page {} delivered {} items", pages, page.results.len());
            }
            Err(PageLoadError::Exhausted) => break,
            Err(err) => return Err(err).context("failed to load page"),
        }

        let state = paginator.snapshot();
        // A page one arriving mid-walk replaces everything merged so far.
        if state.pages().len() <= merged_pages {
            pager_warn!("list restarted from its first page");
            writeln!(out, "-- restarted from the first page --")?;
            printed = 0;
        }
        merged_pages = state.pages().len();

        // Items are de-duplicated across pages; print only what is new.
        for item in state.items().iter().skip(printed) {
            writeln!(out, "{}", describe(item))?;
        }
        printed = state.items().len();

        let reached_limit = args.max_pages.is_some_and(|max| pages >= max);
        if !state.has_next_page() || reached_limit {
            break;
        }
        waiter = paginator.load_next_page();
    }

    let view = paginator.view();
    writeln!(out)?;
    writeln!(
        out,
        "{} items over {} pages{}",
        view.item_count,
        view.page_count,
        if view.has_next_page { ", more available" } else { "" }
    )?;
    if let Some(since) = view.cached_since {
        writeln!(out, "first page cached since {}", since.to_rfc3339())?;
    }
    for report in cache.reports() {
        writeln!(
            out,
            "cache {:<10} {:>3} entries  {}/{} bytes",
            format!("{:?}", report.category),
            report.entries,
            report.usage_bytes,
            report.capacity_bytes
        )?;
    }
    Ok(())
}
