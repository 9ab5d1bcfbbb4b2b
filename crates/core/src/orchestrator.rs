//! Composition of the three public operations.
//!
//! The orchestrator owns the per-request resource lifecycle: acquire a
//! rendering session, run one resolution workflow, release the session on
//! every exit path. No state is shared across concurrent operations and
//! nothing is memoized; every call re-fetches from upstream.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::catalog::{validate_detail_url, CatalogFetcher, DetailExtractor, TitleDetail};
use crate::config::Config;
use crate::episodes::PageReleaseFeed;
use crate::error::ResolveError;
use crate::links::{PlaybackLinkResolver, ResolvedEpisode};
use crate::ranking::{rank, RankedEntry};
use crate::renderer::{RenderPage, RenderSession, Renderer, WaitFor};

pub struct ResolutionOrchestrator {
    renderer: Arc<dyn Renderer>,
    config: Config,
    /// Sessions are heavyweight (one browser instance each); this bounds
    /// how many run simultaneously.
    sessions: Semaphore,
}

impl ResolutionOrchestrator {
    pub fn new(renderer: Arc<dyn Renderer>, config: Config) -> Self {
        let max_sessions = config.browser.max_sessions;
        Self {
            renderer,
            config,
            sessions: Semaphore::new(max_sessions),
        }
    }

    /// Search the catalog listing for titles similar to `query`.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<RankedEntry>, ResolveError> {
        let query = query.unwrap_or(&self.config.source.default_query).to_string();
        info!("Searching catalog for '{}'", query);

        let _permit = self.acquire().await?;
        let session = self.renderer.open_session().await?;
        let result = self.search_in(session.as_ref(), &query).await;
        close_session(session).await;
        result
    }

    async fn search_in(
        &self,
        session: &dyn RenderSession,
        query: &str,
    ) -> Result<Vec<RankedEntry>, ResolveError> {
        let page = session.open_page().await?;
        let result = async {
            let entries = CatalogFetcher::new(page.as_ref(), &self.config.source.base_url)
                .fetch()
                .await?;
            Ok(rank(query, &entries))
        }
        .await;
        close_page(page).await;
        result
    }

    /// Resolve a detail-page URL into structured metadata plus an episode
    /// count. The URL is validated before any collaborator contact.
    pub async fn detail(&self, detail_url: &str) -> Result<TitleDetail, ResolveError> {
        validate_detail_url(detail_url, &self.config.source.base_url)?;
        info!("Resolving detail page {}", detail_url);

        let _permit = self.acquire().await?;
        let session = self.renderer.open_session().await?;
        let result = self.detail_in(session.as_ref(), detail_url).await;
        close_session(session).await;
        result
    }

    async fn detail_in(
        &self,
        session: &dyn RenderSession,
        detail_url: &str,
    ) -> Result<TitleDetail, ResolveError> {
        let page = session.open_page().await?;
        let result = async {
            let feed = PageReleaseFeed::new(page.as_ref(), &self.config.source.base_url);
            DetailExtractor::new(page.as_ref())
                .extract(detail_url, &feed)
                .await
        }
        .await;
        close_page(page).await;
        result
    }

    /// Resolve (catalog id, episode number) into playback/download links.
    pub async fn resolve_episode(
        &self,
        catalog_id: &str,
        episode: f64,
    ) -> Result<ResolvedEpisode, ResolveError> {
        if catalog_id.trim().is_empty() {
            return Err(ResolveError::validation("catalog id must not be blank"));
        }
        info!("Resolving episode {} of '{}'", episode, catalog_id);

        let _permit = self.acquire().await?;
        let session = self.renderer.open_session().await?;
        let result = self
            .resolve_episode_in(session.as_ref(), catalog_id, episode)
            .await;
        close_session(session).await;
        result
    }

    async fn resolve_episode_in(
        &self,
        session: &dyn RenderSession,
        catalog_id: &str,
        episode: f64,
    ) -> Result<ResolvedEpisode, ResolveError> {
        let page = session.open_page().await?;
        let result = async {
            let source = &self.config.source;
            let title_url = format!("{}/anime/{}", source.base_url, catalog_id);
            page.navigate(&title_url, WaitFor::DomContentLoaded).await?;

            // An unknown catalog id resolves to the site's error page.
            let title = page.title().await?;
            if title.contains("404") || title.contains("Not Found") {
                return Err(ResolveError::not_found("Anime not found"));
            }

            let feed = PageReleaseFeed::new(page.as_ref(), &source.base_url);
            PlaybackLinkResolver::new(
                session,
                &source.base_url,
                &source.download_host,
                Duration::from_secs(self.config.browser.player_settle_secs),
            )
            .resolve(&feed, catalog_id, episode)
            .await
        }
        .await;
        close_page(page).await;
        result
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, ResolveError> {
        self.sessions
            .acquire()
            .await
            .map_err(|_| ResolveError::upstream("session pool closed"))
    }
}

/// Release failures are logged and never allowed to mask the operation's
/// own outcome.
async fn close_session(session: Box<dyn RenderSession>) {
    if let Err(e) = session.close().await {
        warn!("Failed to close rendering session: {}", e);
    }
}

async fn close_page(page: Box<dyn RenderPage>) {
    if let Err(e) = page.close().await {
        warn!("Failed to close page: {}", e);
    }
}
