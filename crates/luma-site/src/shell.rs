//! Document shell.
//!
//! Wraps a rendered page with the site chrome: document head, search
//! trigger, side navigation and table of contents.

use std::fmt::Write;

use luma_navigation::route_fragment;
use luma_renderer::{TableOfContents, escape_html};
use luma_search::SearchOverlay;

use crate::session::{RenderedPage, Session};

/// Document title when the site has no name.
const UNTITLED: &str = "Untitled";

/// Meta description when the page sets none.
const DEFAULT_DESCRIPTION: &str = "Documentation";

/// Composes full HTML documents around rendered pages.
pub struct DocumentShell;

impl DocumentShell {
    /// Render `page` as a complete HTML document for `route`.
    ///
    /// `route` is the full current location; its fragment selects the
    /// active table of contents entry.
    #[must_use]
    pub fn render(session: &Session, page: &RenderedPage, route: &str) -> String {
        let config = session.config();
        let frontmatter = page.result.frontmatter.as_ref();

        let site_name = if config.name.trim().is_empty() {
            UNTITLED
        } else {
            config.name.as_str()
        };
        let meta_title = frontmatter
            .and_then(|fm| fm.title.as_deref())
            .unwrap_or(&page.title);
        let description = frontmatter
            .and_then(|fm| fm.description.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTION);

        let mut out = String::with_capacity(page.result.html.len() + 2048);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        writeln!(out, "<title>{}</title>", escape_html(site_name)).unwrap();
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
             <meta name=\"referrer\" content=\"strict-origin\">\n",
        );
        writeln!(
            out,
            r#"<meta name="title" content="{}">"#,
            escape_html(meta_title)
        )
        .unwrap();
        writeln!(
            out,
            r#"<meta name="description" content="{}">"#,
            escape_html(description)
        )
        .unwrap();
        if let Some(favicon) = &config.favicon {
            writeln!(
                out,
                r#"<link rel="icon" href="/{}">"#,
                escape_html(favicon.trim_start_matches('/'))
            )
            .unwrap();
        }
        out.push_str("</head>\n<body>\n<div class=\"page\">\n<aside class=\"sidebar\">");

        out.push_str(SearchOverlay::render_trigger_html());
        out.push_str(&session.side_nav(route).render_html());
        if !config.socials.is_empty() {
            out.push_str(r#"<ul class="socials">"#);
            for social in &config.socials {
                write!(
                    out,
                    r#"<li><a class="social-{}" href="{}">{}</a></li>"#,
                    escape_html(&social.platform),
                    escape_html(&social.url),
                    escape_html(&social.platform)
                )
                .unwrap();
            }
            out.push_str("</ul>");
        }
        out.push_str("</aside>\n<main class=\"flex column\">\n");
        out.push_str(&page.result.html);
        out.push_str("</main>\n");

        if let Some(toc) = TableOfContents::from_headings(&page.result.toc) {
            out.push_str(&toc.render_html(route_fragment(route)));
            out.push('\n');
        }

        out.push_str("</div>\n</body>\n</html>\n");
        out
    }
}
