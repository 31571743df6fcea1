//! Markdown page rendering extensions for Luma.
//!
//! This crate turns a page's markdown source into HTML plus the data the
//! surrounding document shell needs:
//!
//! - [`PageRenderer`]: renders markdown with heading anchors, rewritten image
//!   paths and tab containers
//! - [`TocEntry`] / [`TableOfContents`]: the in-page outline
//! - [`ImagePaths`]: image `src` rewriting against a release version
//! - [`TabsPreprocessor`] / [`TabsProcessor`]: `{% tabs %}` containers
//! - [`Frontmatter`]: optional leading YAML block
//!
//! # Example
//!
//! ```
//! use luma_renderer::{PageRenderer, TableOfContents};
//!
//! let markdown = "# Guide\n\n## Install\n\ntext\n\n## Usage\n\ntext\n";
//! let result = PageRenderer::new().render(markdown);
//!
//! assert_eq!(result.title.as_deref(), Some("Guide"));
//! let toc = TableOfContents::from_headings(&result.toc).unwrap();
//! assert_eq!(toc.entries().len(), 2);
//! ```

mod frontmatter;
mod headings;
mod image;
mod renderer;
pub(crate) mod tabs;
mod toc;
mod util;

pub use frontmatter::{Frontmatter, split_frontmatter};
pub use headings::TocEntry;
pub use image::ImagePaths;
pub use renderer::{PageRenderer, RenderResult};
pub use tabs::{TabMetadata, TabsGroup, TabsPreprocessor, TabsProcessor};
pub use toc::TableOfContents;
pub use util::{escape_html, slugify};
