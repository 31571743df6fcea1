//! Tab containers for markdown pages.
//!
//! Pages group alternative content with Markdoc tags:
//!
//! ```markdown
//! {% tabs %}
//! {% tab name="macOS" %}
//! Install with Homebrew.
//! {% /tab %}
//! {% tab name="Linux" %}
//! Install with apt.
//! {% /tab %}
//! {% /tabs %}
//! ```
//!
//! Processing happens in two phases:
//!
//! 1. [`TabsPreprocessor`] rewrites the tags to intermediate `<luma-tabs>` /
//!    `<luma-tab>` elements that survive markdown parsing as raw HTML.
//! 2. [`TabsProcessor`] replaces the intermediate elements in the rendered
//!    HTML with accessible tab markup.

mod fence;
mod preprocessor;
mod processor;

pub use preprocessor::{TabMetadata, TabsGroup, TabsPreprocessor};
pub use processor::TabsProcessor;
