//! Page frontmatter.
//!
//! A page may start with a `---` delimited YAML block carrying its
//! `title` and `description`. Unknown keys are ignored.

use serde::Deserialize;

/// Parsed frontmatter fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// Page title for the document head.
    pub title: Option<String>,
    /// Page description for the document head.
    pub description: Option<String>,
}

/// Split a leading frontmatter block from markdown.
///
/// Returns the parsed frontmatter (if a block is present) and the remaining
/// body. Malformed YAML is reported as an error message while the block is
/// still removed from the body.
///
/// # Examples
///
/// ```
/// use luma_renderer::split_frontmatter;
///
/// let (fm, body) = split_frontmatter("---\ntitle: Intro\n---\n# Hello\n");
/// assert_eq!(fm.unwrap().unwrap().title.as_deref(), Some("Intro"));
/// assert_eq!(body, "# Hello\n");
/// ```
pub fn split_frontmatter(markdown: &str) -> (Option<Result<Frontmatter, String>>, &str) {
    let Some(rest) = markdown
        .strip_prefix("---\n")
        .or_else(|| markdown.strip_prefix("---\r\n"))
    else {
        return (None, markdown);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(parse(yaml)), body);
        }
        offset += line.len();
    }

    // No closing delimiter: not frontmatter.
    (None, markdown)
}

fn parse(yaml: &str) -> Result<Frontmatter, String> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| format!("invalid frontmatter: {e}"))
}
