//! Markdown page renderer.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::frontmatter::{Frontmatter, split_frontmatter};
use crate::headings::{HeadingCollector, TocEntry};
use crate::image::ImagePaths;
use crate::tabs::{TabsPreprocessor, TabsProcessor};
use crate::util::heading_level_to_num;

/// Result of rendering a page.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Text of the first H1 heading.
    pub title: Option<String>,
    /// Parsed frontmatter, if the page has a valid block.
    pub frontmatter: Option<Frontmatter>,
    /// Every heading of the page in document order.
    pub toc: Vec<TocEntry>,
    /// Warnings generated during rendering (malformed tabs, bad frontmatter).
    pub warnings: Vec<String>,
}

/// Renders a page's markdown to HTML.
///
/// Beyond plain CommonMark + GFM rendering, the renderer:
/// - assigns every heading an anchor (explicit `{#id}` or a generated slug)
/// - rewrites local image sources against the release version
/// - turns `{% tabs %}` containers into accessible tab markup
/// - strips and parses a leading frontmatter block
#[derive(Clone, Debug)]
pub struct PageRenderer {
    images: ImagePaths,
    gfm: bool,
}

impl PageRenderer {
    /// Create a renderer with GFM enabled and no release version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            images: ImagePaths::default(),
            gfm: true,
        }
    }

    /// Publish local images under `/{version}/`.
    #[must_use]
    pub fn with_release_version(mut self, version: Option<&str>) -> Self {
        self.images = ImagePaths::new(version);
        self
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(&self) -> Options {
        let base = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            base
        }
    }

    /// Render a page.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut warnings = Vec::new();

        let (frontmatter, body) = split_frontmatter(markdown);
        let frontmatter = match frontmatter {
            Some(Ok(fm)) => Some(fm),
            Some(Err(message)) => {
                warnings.push(message);
                None
            }
            None => None,
        };

        let mut preprocessor = TabsPreprocessor::new();
        let body = preprocessor.process(body);
        let (groups, tab_warnings) = preprocessor.into_parts();
        warnings.extend(tab_warnings);

        let mut events: Vec<Event<'_>> = Parser::new_ext(&body, self.parser_options()).collect();
        let mut headings = HeadingCollector::new();
        let mut open_heading: Option<usize> = None;

        for idx in 0..events.len() {
            if matches!(events[idx], Event::End(TagEnd::Heading(_))) {
                let id = headings.end();
                if let Some(start) = open_heading.take()
                    && let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[start]
                {
                    *slot = id.map(CowStr::from);
                }
                continue;
            }

            match &mut events[idx] {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    headings.start(heading_level_to_num(*level), id.as_deref());
                    open_heading = Some(idx);
                }
                Event::Text(text) | Event::Code(text) => headings.push_text(text),
                Event::Start(Tag::Image { dest_url, .. }) => {
                    let rewritten = self.images.rewrite(dest_url);
                    *dest_url = CowStr::from(rewritten);
                }
                _ => {}
            }
        }

        let mut html_out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut html_out, events.into_iter());

        let mut tabs = TabsProcessor::new(groups);
        tabs.post_process(&mut html_out);
        warnings.extend(tabs.into_warnings());

        let (title, toc) = headings.finish();
        RenderResult {
            html: html_out,
            title,
            frontmatter,
            toc,
            warnings,
        }
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_headings_get_anchor_ids() {
        let result = PageRenderer::new().render("# Title\n\n## Getting Started\n");

        assert!(result.html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
        assert_eq!(result.title.as_deref(), Some("Title"));
        assert_eq!(
            result.toc,
            vec![
                TocEntry::new("title", "Title", 1),
                TocEntry::new("getting-started", "Getting Started", 2),
            ]
        );
    }

    #[test]
    fn test_explicit_heading_id() {
        let result = PageRenderer::new().render("## Install {#setup}\n");

        assert!(result.html.contains(r#"<h2 id="setup">Install</h2>"#));
        assert_eq!(result.toc[0].id.as_deref(), Some("setup"));
    }

    #[test]
    fn test_explicit_id_colliding_with_slug_is_suffixed() {
        let result = PageRenderer::new().render("## Setup\n\n## Other {#setup}\n");

        assert!(result.html.contains(r#"<h2 id="setup">Setup</h2>"#));
        assert!(result.html.contains(r#"<h2 id="setup-1">Other</h2>"#), "{}", result.html);
    }

    #[test]
    fn test_inline_code_in_heading_text() {
        let result = PageRenderer::new().render("## The `run` command\n");
        assert_eq!(result.toc[0].title, "The run command");
        assert_eq!(result.toc[0].id.as_deref(), Some("the-run-command"));
    }

    #[test]
    fn test_images_rewritten_with_version() {
        let result = PageRenderer::new()
            .with_release_version(Some("1.0"))
            .render("![logo](/img/logo.png)\n\n![remote](https://x.io/a.png)\n");

        assert!(result.html.contains(r#"src="/1.0/img/logo.png""#));
        assert!(result.html.contains(r#"src="https://x.io/a.png""#));
    }

    #[test]
    fn test_frontmatter_stripped_and_parsed() {
        let result = PageRenderer::new().render("---\ntitle: Intro\n---\n# Hello\n");

        assert_eq!(
            result.frontmatter.and_then(|fm| fm.title).as_deref(),
            Some("Intro")
        );
        assert!(!result.html.contains("title: Intro"));
    }

    #[test]
    fn test_bad_frontmatter_is_a_warning() {
        let result = PageRenderer::new().render("---\ntitle: [x\n---\ntext\n");

        assert!(result.frontmatter.is_none());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_tabs_rendered() {
        let markdown = r#"Intro

{% tabs %}
{% tab name="macOS" %}
Install with **Homebrew**.
{% /tab %}
{% tab name="Linux" %}
Install with apt.
{% /tab %}
{% /tabs %}

Outro
"#;
        let result = PageRenderer::new().render(markdown);

        assert!(result.html.contains(r#"role="tablist""#), "{}", result.html);
        assert!(result.html.contains("<strong>Homebrew</strong>"));
        assert!(result.html.contains(r#"aria-labelledby="tab-0-1" hidden"#));
        assert!(!result.html.contains("luma-tab"));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_paragraph_right_after_tabs_is_rendered() {
        let markdown = "{% tabs %}\n{% tab name=\"A\" %}\nA\n{% /tabs %}\n**Outro** text\n";
        let result = PageRenderer::new().render(markdown);

        assert!(
            result.html.ends_with("</div>\n<p><strong>Outro</strong> text</p>\n"),
            "{}",
            result.html
        );
        assert!(!result.html.contains("**Outro**"));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_text_before_first_tab_renders_outside_container() {
        let markdown = "{% tabs %}\nlost text\n{% tab name=\"A\" %}\nA\n{% /tabs %}\n";
        let result = PageRenderer::new().render(markdown);

        let text = result.html.find("<p>lost text</p>").unwrap();
        let container = result.html.find(r#"<div class="tabs""#).unwrap();
        assert!(text < container, "{}", result.html);
        assert!(
            result
                .html
                .contains(r#"aria-labelledby="tab-0-0"><p>A</p></div>"#),
            "{}",
            result.html
        );
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_unclosed_tabs_still_render() {
        let result = PageRenderer::new().render("{% tabs %}\n{% tab name=\"A\" %}\nA text\n");

        assert!(result.html.contains(r#"role="tablist""#), "{}", result.html);
        assert!(result.html.contains("<p>A text</p>"));
        assert!(!result.html.contains("luma-tab"));
        assert!(result.warnings.iter().any(|w| w.contains("unclosed")));
    }

    #[test]
    fn test_tables_enabled_by_default() {
        let result = PageRenderer::new().render("| a |\n|---|\n| b |\n");
        assert!(result.html.contains("<table>"));
    }

    #[test]
    fn test_gfm_disabled() {
        let result = PageRenderer::new().with_gfm(false).render("| a |\n|---|\n| b |\n");
        assert!(!result.html.contains("<table>"));
    }
}
