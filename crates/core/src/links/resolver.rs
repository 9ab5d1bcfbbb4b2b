//! Episode-to-links resolution: locate the episode in the paginated
//! listing, load the play page in a fresh context, and normalize whatever
//! the player exposes into a [`LinkBundle`].

use std::time::Duration;
use tracing::{debug, warn};

use crate::episodes::{EpisodePaginator, EpisodeRecord, ReleaseFeed};
use crate::error::ResolveError;
use crate::renderer::{RenderSession, WaitFor};

use super::{DownloadSource, LinkBundle, StreamSource};

/// Collects raw streaming candidates from the player's resolution menu.
const STREAM_SOURCES_SCRIPT: &str = r#"
(() => {
    return Array.from(document.querySelectorAll('#resolutionMenu button[data-src]'))
        .map(b => ({
            resolution: b.getAttribute('data-resolution'),
            audio: b.getAttribute('data-audio'),
            src: b.getAttribute('data-src'),
        }));
})()
"#;

/// A fully resolved episode: the located record, the play URL built from
/// it, and the classified link bundle.
#[derive(Debug, Clone)]
pub struct ResolvedEpisode {
    pub record: EpisodeRecord,
    pub play_url: String,
    pub links: LinkBundle,
}

pub struct PlaybackLinkResolver<'a> {
    session: &'a dyn RenderSession,
    base_url: &'a str,
    download_host: &'a str,
    settle: Duration,
}

impl<'a> PlaybackLinkResolver<'a> {
    pub fn new(
        session: &'a dyn RenderSession,
        base_url: &'a str,
        download_host: &'a str,
        settle: Duration,
    ) -> Self {
        Self {
            session,
            base_url,
            download_host,
            settle,
        }
    }

    /// Resolve `episode` of `catalog_id` into playback and download links.
    ///
    /// The play page is loaded in a second, independent context: the
    /// player's client-side negotiation is stateful and must not run in a
    /// context primed by catalog browsing.
    pub async fn resolve(
        &self,
        feed: &dyn ReleaseFeed,
        catalog_id: &str,
        episode: f64,
    ) -> Result<ResolvedEpisode, ResolveError> {
        let record = EpisodePaginator::new(feed)
            .find_episode(catalog_id, episode)
            .await
            .ok_or_else(|| ResolveError::not_found(format!("Episode {} not found", episode)))?;

        let play_url = format!(
            "{}/play/{}/{}",
            self.base_url, catalog_id, record.session_token
        );

        let play_page = self.session.open_page().await?;
        let result = self.extract_links(play_page.as_ref(), &play_url).await;
        if let Err(e) = play_page.close().await {
            warn!("Failed to close play page: {}", e);
        }
        let links = result?;

        Ok(ResolvedEpisode {
            record,
            play_url,
            links,
        })
    }

    async fn extract_links(
        &self,
        page: &dyn crate::renderer::RenderPage,
        play_url: &str,
    ) -> Result<LinkBundle, ResolveError> {
        page.navigate(play_url, WaitFor::DomContentLoaded).await?;

        // The player negotiates stream sources asynchronously after
        // navigation; give it a fixed window to settle.
        tokio::time::sleep(self.settle).await;

        let raw = page.evaluate(STREAM_SOURCES_SCRIPT).await?;
        let streams: Vec<StreamSource> = serde_json::from_value(raw)
            .map_err(|e| ResolveError::upstream(format!("malformed stream sources: {}", e)))?;

        let raw = page.evaluate(&self.download_sources_script()).await?;
        let downloads: Vec<DownloadSource> = serde_json::from_value(raw)
            .map_err(|e| ResolveError::upstream(format!("malformed download sources: {}", e)))?;

        let mut links = LinkBundle::default();
        for stream in &streams {
            links.add_stream(stream);
        }
        for download in &downloads {
            links.add_download(download);
        }
        debug!(
            "Classified {} stream and {} download candidates",
            streams.len(),
            downloads.len()
        );
        Ok(links)
    }

    /// Collects download-mirror anchors; the host pattern is configured
    /// per deployment.
    fn download_sources_script(&self) -> String {
        format!(
            r#"
(() => {{
    return Array.from(document.querySelectorAll('#pickDownload a[href*="{}"]'))
        .map(a => ({{ label: a.innerText.trim(), href: a.href }}));
}})()
"#,
            self.download_host
        )
    }
}
