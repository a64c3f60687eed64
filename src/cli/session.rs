//! Command execution session
//!
//! A session owns everything a page command needs: the resolved
//! configuration, one cached API client and the output format. One-shot
//! commands build a session and drop it; the interactive shell keeps a
//! single session alive so repeated lookups are served from the cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::CachedStatsApi;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{StatsApi, VpsClient};
use crate::config::Config;
use crate::error::Result;

/// Config, cached client and output format for running commands.
pub struct Session<A: StatsApi = VpsClient> {
    /// Resolved configuration (file plus overrides)
    pub config: Config,
    /// API client behind the response cache
    pub client: Arc<CachedStatsApi<A>>,
    /// Output format for this session
    pub format: OutputFormat,
}

impl Session {
    /// Resolve config, require an API URL and build the cached HTTP client.
    ///
    /// # Errors
    /// Returns error if the config cannot be read or no API URL is set.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::resolve(opts.config_ref(), opts.api_url_ref())?;
        let client = VpsClient::new(config.require_api_url()?)?;
        let format = opts.resolve_format(config.preferences.format.as_deref());

        Ok(Self::with_client(config, client, format, !opts.no_cache))
    }
}

impl<A: StatsApi> Session<A> {
    /// Build a session around an existing client
    pub fn with_client(config: Config, client: A, format: OutputFormat, cache: bool) -> Self {
        Self {
            config,
            client: Arc::new(CachedStatsApi::new(client, cache)),
            format,
        }
    }

    /// Page size for custom queries when none is given on the command line
    pub fn default_page_size(&self) -> u32 {
        self.config.preferences.page_size
    }

    /// Await `request`, showing a spinner on stderr in pretty mode.
    pub async fn fetching<T, Fut>(&self, message: &str, request: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        if self.format != OutputFormat::Pretty {
            return request.await;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        let result = request.await;
        spinner.finish_and_clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockStatsApi;
    use crate::error::{ConfigError, Error};

    #[test]
    fn test_session_requires_api_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        Config::default().save_to(&path).unwrap();

        let opts = GlobalOptions {
            config: Some(path.display().to_string()),
            ..Default::default()
        };

        match Session::new(&opts) {
            Err(Error::Config(ConfigError::MissingApiUrl)) => (),
            Err(other) => panic!("Expected MissingApiUrl, got {:?}", other),
            Ok(_) => panic!("Expected MissingApiUrl, got a session"),
        }
    }

    #[test]
    fn test_session_with_override_and_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GlobalOptions {
            config: Some(dir.path().join("absent.yaml").display().to_string()),
            api_url: Some("http://localhost:5000/".to_string()),
            no_cache: true,
            ..Default::default()
        };

        let session = Session::new(&opts).unwrap();
        assert_eq!(session.client.inner().base_url(), "http://localhost:5000");
        assert!(!session.client.is_enabled());
    }

    #[tokio::test]
    async fn test_fetching_passes_result_through() {
        let session = Session::with_client(
            Config::default(),
            MockStatsApi::new(),
            OutputFormat::Json,
            true,
        );
        let value = session.fetching("Loading", async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
        assert_eq!(session.default_page_size(), 10);
    }
}
