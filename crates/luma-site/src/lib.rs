//! Session context and page composition for Luma sites.
//!
//! This crate provides:
//! - [`Session`]: explicitly constructed context owning the configuration,
//!   search corpus and lazily built search index
//! - [`DocumentShell`]: wraps rendered pages with head, side navigation,
//!   search trigger and table of contents
//! - [`landing_redirect`]: cancellable fetch-then-redirect for the site root
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use luma_config::Config;
//! use luma_site::{DocumentShell, Session};
//!
//! let config = Config::load(None, None)?;
//! let session = Session::from_config(config);
//!
//! let page = session.render_page("/intro")?;
//! let html = DocumentShell::render(&session, &page, "/intro");
//! # Ok(())
//! # }
//! ```

mod error;
mod landing;
mod session;
mod shell;

pub use error::RenderError;
pub use landing::{
    CancelHandle, CancelSignal, ConfigSource, FileConfigSource, LandingOutcome, cancel_pair,
    landing_redirect,
};
pub use session::{RenderedPage, Session};
pub use shell::DocumentShell;
