//! Landing redirect.
//!
//! Visiting the site root fetches the configuration and sends the visitor
//! to the first page of the navigation. The fetch is tied to a
//! [`CancelSignal`]: if the owner goes away or the user navigates first,
//! the fetch result is discarded and no navigation is issued.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use luma_config::{Config, ConfigError};
use luma_navigation::{Router, landing_destination};
use tokio::sync::watch;

/// Something that can produce the site configuration asynchronously.
pub trait ConfigSource {
    /// Fetch and parse the configuration.
    fn fetch(&self) -> impl Future<Output = Result<Config, ConfigError>> + Send;
}

/// Reads the configuration from a `luma.yaml` file.
#[derive(Clone, Debug)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    /// Source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for FileConfigSource {
    async fn fetch(&self) -> Result<Config, ConfigError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(self.path.clone()));
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };
        let root_dir = self.path.parent().unwrap_or(Path::new("."));
        let mut config = Config::from_yaml(&content, root_dir)?;
        config.config_path = Some(self.path.clone());
        Ok(config)
    }
}

/// Owner side of a cancellation pair. Cancels on [`cancel`](Self::cancel) or drop.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel every associated signal.
    pub fn cancel(self) {
        self.tx.send_replace(true);
    }
}

/// Observer side of a cancellation pair.
#[derive(Clone, Debug)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Whether cancellation has been requested or the handle is gone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once cancelled.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Create a linked cancellation handle and signal.
#[must_use]
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

/// What the landing redirect did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LandingOutcome {
    /// Navigated to the given route.
    Navigated(String),
    /// The fetch was superseded; nothing happened.
    Cancelled,
}

/// Fetch the configuration and redirect to the landing page.
///
/// A failed fetch redirects to `/`. If `cancel` fires before the fetch
/// completes, the result is discarded and the router is left alone.
pub async fn landing_redirect<S, R>(
    source: &S,
    router: &mut R,
    mut cancel: CancelSignal,
) -> LandingOutcome
where
    S: ConfigSource,
    R: Router + ?Sized,
{
    if cancel.is_cancelled() {
        tracing::debug!("Landing redirect cancelled before fetch");
        return LandingOutcome::Cancelled;
    }

    let fetched = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::warn!("Configuration fetch superseded, discarding result");
            return LandingOutcome::Cancelled;
        }
        result = source.fetch() => result,
    };

    let destination = match fetched {
        Ok(config) => landing_destination(&config.navigation),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to fetch configuration, redirecting to root");
            "/".to_owned()
        }
    };

    router.navigate(&destination);
    LandingOutcome::Navigated(destination)
}
