//! Tabs preprocessor for converting Markdoc tab tags to HTML elements.
//!
//! Converts `{% tabs %}` / `{% tab name="…" %}` / `{% /tab %}` / `{% /tabs %}`
//! lines into `<luma-tabs>` / `<luma-tab>` elements that pass through
//! pulldown-cmark unchanged.

use super::fence::FenceTracker;

/// Metadata for a single tab within a tab group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabMetadata {
    /// Unique ID for this tab within the document.
    pub id: usize,
    /// Display label for the tab button.
    pub label: String,
    /// Line number where the tab was opened (1-indexed).
    pub line: usize,
}

/// Metadata for a tab group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabsGroup {
    /// Unique ID for this tab group.
    pub id: usize,
    /// Tabs within this group.
    pub tabs: Vec<TabMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside any tab container.
    Normal,
    /// Inside `{% tabs %}`, between tabs.
    InTabs,
    /// Inside `{% tab %}`.
    InTab,
}

/// Preprocessor that converts tab tags to intermediate HTML elements.
///
/// - `{% tabs %}` → `<luma-tabs data-id="N">`
/// - `{% tab name="Label" %}` → `<luma-tab data-id="M">` (implicitly closes an open tab)
/// - `{% /tab %}` → `</luma-tab>`
/// - `{% /tabs %}` → `</luma-tabs>` (implicitly closes an open tab)
///
/// Tags inside fenced code blocks are left alone. Misplaced tags pass through
/// verbatim with a warning.
///
/// # Example
///
/// ```
/// use luma_renderer::TabsPreprocessor;
///
/// let mut preprocessor = TabsPreprocessor::new();
/// let output = preprocessor.process(r#"
/// {% tabs %}
/// {% tab name="macOS" %}
/// Install with Homebrew.
/// {% /tab %}
/// {% tab name="Linux" %}
/// Install with apt.
/// {% /tab %}
/// {% /tabs %}
/// "#);
///
/// assert!(output.contains("<luma-tabs"));
/// let groups = preprocessor.into_groups();
/// assert_eq!(groups[0].tabs.len(), 2);
/// ```
pub struct TabsPreprocessor {
    state: State,
    fence: FenceTracker,
    warnings: Vec<String>,
    groups: Vec<TabsGroup>,
    current_group: Option<TabsGroup>,
    next_group_id: usize,
    next_tab_id: usize,
    tabs_start_line: usize,
}

impl TabsPreprocessor {
    /// Create a new preprocessor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            fence: FenceTracker::new(),
            warnings: Vec::new(),
            groups: Vec::new(),
            current_group: None,
            next_group_id: 0,
            next_tab_id: 0,
            tabs_start_line: 0,
        }
    }

    /// Process markdown text and return the transformed output.
    ///
    /// A container left open at the end of the input is closed so its tabs
    /// still render.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for (idx, line) in input.lines().enumerate() {
            if idx > 0 {
                output.push('\n');
            }
            let processed = self.process_line(line, idx + 1);
            output.push_str(&processed);
        }
        if input.ends_with('\n') {
            output.push('\n');
        }

        output.push_str(&self.finalize());
        output
    }

    /// Warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the preprocessor and return collected tab groups and warnings.
    #[must_use]
    pub fn into_parts(self) -> (Vec<TabsGroup>, Vec<String>) {
        (self.groups, self.warnings)
    }

    /// Consume the preprocessor and return collected tab groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<TabsGroup> {
        self.groups
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> String {
        self.fence.update(line);
        let tag = if self.fence.in_fence() {
            None
        } else {
            parse_tag(line.trim())
        };

        match tag {
            Some(Tag::OpenTabs) => self.open_tabs(line, line_num),
            Some(Tag::OpenTab(name)) => self.open_tab(line, name, line_num),
            Some(Tag::CloseTab) => self.close_tab(line, line_num),
            Some(Tag::CloseTabs) => self.close_tabs(line, line_num),
            Some(Tag::TabWithoutName) => {
                self.warnings.push(format!(
                    "line {line_num}: {{% tab %}} requires a name attribute, passing through"
                ));
                self.content_line(line, line_num)
            }
            None => self.content_line(line, line_num),
        }
    }

    /// Whether the `<luma-tabs>` element of the open group has been emitted.
    ///
    /// The element is deferred to the first tab, so content between
    /// `{% tabs %}` and the first `{% tab %}` stays outside the container.
    fn container_emitted(&self) -> bool {
        self.current_group
            .as_ref()
            .is_some_and(|group| !group.tabs.is_empty())
    }

    fn content_line(&mut self, line: &str, line_num: usize) -> String {
        if self.state != State::InTabs || line.trim().is_empty() {
            return line.to_owned();
        }
        if self.container_emitted() {
            self.warnings.push(format!(
                "line {line_num}: content between tabs is ignored, move it into a {{% tab %}}"
            ));
            return String::new();
        }
        self.warnings.push(format!(
            "line {line_num}: content before the first {{% tab %}} is rendered outside the tabs"
        ));
        line.to_owned()
    }

    fn open_tabs(&mut self, line: &str, line_num: usize) -> String {
        if self.state != State::Normal {
            self.warnings.push(format!(
                "line {line_num}: nested {{% tabs %}} not supported, passing through"
            ));
            return line.to_owned();
        }

        let group_id = self.next_group_id;
        self.next_group_id += 1;
        self.current_group = Some(TabsGroup {
            id: group_id,
            tabs: Vec::new(),
        });
        self.tabs_start_line = line_num;
        self.state = State::InTabs;
        String::new()
    }

    fn open_tab(&mut self, line: &str, label: String, line_num: usize) -> String {
        // Every element starts after a blank line so it never continues a
        // paragraph, and ends with one so the HTML block closes.
        let prefix = match self.state {
            State::Normal => {
                self.warnings.push(format!(
                    "line {line_num}: {{% tab %}} outside {{% tabs %}}, passing through"
                ));
                return line.to_owned();
            }
            State::InTabs if self.container_emitted() => "\n".to_owned(),
            State::InTabs => {
                let group_id = self.current_group.as_ref().map_or(0, |group| group.id);
                format!("\n<luma-tabs data-id=\"{group_id}\">\n\n")
            }
            State::InTab => "\n</luma-tab>\n\n".to_owned(),
        };

        let tab_id = self.next_tab_id;
        self.next_tab_id += 1;
        if let Some(group) = self.current_group.as_mut() {
            group.tabs.push(TabMetadata {
                id: tab_id,
                label,
                line: line_num,
            });
        }
        self.state = State::InTab;
        format!("{prefix}<luma-tab data-id=\"{tab_id}\">\n")
    }

    fn close_tab(&mut self, line: &str, line_num: usize) -> String {
        if self.state != State::InTab {
            self.warnings.push(format!(
                "line {line_num}: stray {{% /tab %}} with no open tab"
            ));
            return line.to_owned();
        }
        self.state = State::InTabs;
        "\n</luma-tab>\n".to_owned()
    }

    fn close_tabs(&mut self, line: &str, line_num: usize) -> String {
        if self.state == State::Normal {
            self.warnings.push(format!(
                "line {line_num}: stray {{% /tabs %}} with no open container"
            ));
            return line.to_owned();
        }
        self.close_container()
    }

    /// Close the open group, returning the closing elements to emit.
    fn close_container(&mut self) -> String {
        let state = std::mem::replace(&mut self.state, State::Normal);
        let Some(group) = self.current_group.take() else {
            return String::new();
        };
        if group.tabs.is_empty() {
            self.warnings.push(format!(
                "line {}: {{% tabs %}} with no tabs, skipping",
                self.tabs_start_line
            ));
            return String::new();
        }

        self.groups.push(group);
        let tab_close = if state == State::InTab {
            "\n</luma-tab>\n"
        } else {
            ""
        };
        format!("{tab_close}\n</luma-tabs>\n")
    }

    fn finalize(&mut self) -> String {
        if self.state == State::Normal {
            return String::new();
        }
        self.warnings.push(format!(
            "line {}: unclosed {{% tabs %}} (missing {{% /tabs %}})",
            self.tabs_start_line
        ));
        self.close_container()
    }
}

impl Default for TabsPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsed tab tag.
#[derive(Debug, PartialEq, Eq)]
enum Tag {
    OpenTabs,
    OpenTab(String),
    TabWithoutName,
    CloseTab,
    CloseTabs,
}

/// Parse a trimmed line consisting of a single `{% … %}` tab tag.
fn parse_tag(trimmed: &str) -> Option<Tag> {
    let inner = trimmed.strip_prefix("{%")?.strip_suffix("%}")?.trim();

    match inner {
        "tabs" => return Some(Tag::OpenTabs),
        "/tabs" => return Some(Tag::CloseTabs),
        "/tab" => return Some(Tag::CloseTab),
        "tab" => return Some(Tag::TabWithoutName),
        _ => {}
    }

    let attrs = inner.strip_prefix("tab ")?;
    match attribute(attrs, "name") {
        Some(name) => Some(Tag::OpenTab(name)),
        None => Some(Tag::TabWithoutName),
    }
}

/// Extract a quoted attribute value (`key="value"` or `key='value'`).
fn attribute(attrs: &str, key: &str) -> Option<String> {
    let mut rest = attrs;
    while let Some(pos) = rest.find(key) {
        let preceded_by_boundary = rest[..pos]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let after = rest[pos + key.len()..].trim_start();

        if preceded_by_boundary && let Some(value) = after.strip_prefix('=') {
            let value = value.trim_start();
            let quote = value.chars().next().filter(|c| matches!(c, '"' | '\''))?;
            let body = &value[1..];
            let end = body.find(quote)?;
            return Some(body[..end].to_owned());
        }
        rest = &rest[pos + key.len()..];
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_tag_variants() {
        assert_eq!(parse_tag("{% tabs %}"), Some(Tag::OpenTabs));
        assert_eq!(parse_tag("{%tabs%}"), Some(Tag::OpenTabs));
        assert_eq!(parse_tag("{% /tabs %}"), Some(Tag::CloseTabs));
        assert_eq!(parse_tag("{% /tab %}"), Some(Tag::CloseTab));
        assert_eq!(
            parse_tag(r#"{% tab name="macOS" %}"#),
            Some(Tag::OpenTab("macOS".to_owned()))
        );
        assert_eq!(
            parse_tag("{% tab name='Linux' %}"),
            Some(Tag::OpenTab("Linux".to_owned()))
        );
        assert_eq!(parse_tag("{% tab %}"), Some(Tag::TabWithoutName));
        assert_eq!(parse_tag(r#"{% tab label="x" %}"#), Some(Tag::TabWithoutName));
    }

    #[test]
    fn test_parse_tag_ignores_other_tags() {
        assert_eq!(parse_tag("{% callout %}"), None);
        assert_eq!(parse_tag("{% table %}"), None);
        assert_eq!(parse_tag("regular text"), None);
        assert_eq!(parse_tag("{% tabs"), None);
    }

    #[test]
    fn test_attribute_requires_word_boundary() {
        assert_eq!(attribute(r#"rename="a" name="b""#, "name"), Some("b".to_owned()));
        assert_eq!(attribute(r#"name = "spaced""#, "name"), Some("spaced".to_owned()));
        assert_eq!(attribute("name=unquoted", "name"), None);
    }

    #[test]
    fn test_simple_tabs() {
        let mut pp = TabsPreprocessor::new();
        let input = "{% tabs %}\n{% tab name=\"A\" %}\nContent A\n{% /tab %}\n{% tab name=\"B\" %}\nContent B\n{% /tab %}\n{% /tabs %}";
        let output = pp.process(input);

        assert!(output.contains(r#"<luma-tabs data-id="0">"#));
        assert!(output.contains(r#"<luma-tab data-id="0">"#));
        assert!(output.contains(r#"<luma-tab data-id="1">"#));
        assert!(output.contains("</luma-tabs>"));
        assert!(pp.warnings().is_empty());

        let groups = pp.into_groups();
        assert_eq!(
            groups,
            vec![TabsGroup {
                id: 0,
                tabs: vec![
                    TabMetadata {
                        id: 0,
                        label: "A".to_owned(),
                        line: 2,
                    },
                    TabMetadata {
                        id: 1,
                        label: "B".to_owned(),
                        line: 5,
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_implicit_tab_close() {
        let mut pp = TabsPreprocessor::new();
        let output = pp.process(
            "{% tabs %}\n{% tab name=\"A\" %}\nA\n{% tab name=\"B\" %}\nB\n{% /tabs %}\n",
        );

        assert_eq!(output.matches("</luma-tab>").count(), 2);
        assert!(pp.warnings().is_empty());
        assert_eq!(pp.into_groups()[0].tabs.len(), 2);
    }

    #[test]
    fn test_tags_inside_code_fence_untouched() {
        let mut pp = TabsPreprocessor::new();
        let input = "```\n{% tabs %}\n```\n";
        let output = pp.process(input);

        assert_eq!(output, input);
        assert!(pp.into_groups().is_empty());
    }

    #[test]
    fn test_tab_outside_tabs_passes_through() {
        let mut pp = TabsPreprocessor::new();
        let output = pp.process("{% tab name=\"A\" %}");

        assert_eq!(output, "{% tab name=\"A\" %}");
        assert_eq!(pp.warnings().len(), 1);
    }

    #[test]
    fn test_tab_without_name_warns() {
        let mut pp = TabsPreprocessor::new();
        let _ = pp.process("{% tabs %}\n{% tab %}\n{% /tabs %}");

        assert!(pp.warnings().iter().any(|w| w.contains("name attribute")));
    }

    #[test]
    fn test_nested_tabs_warns() {
        let mut pp = TabsPreprocessor::new();
        let _ = pp.process("{% tabs %}\n{% tab name=\"A\" %}\n{% tabs %}\n{% /tabs %}");

        assert!(pp.warnings().iter().any(|w| w.contains("nested")));
    }

    #[test]
    fn test_unclosed_tabs_warns() {
        let mut pp = TabsPreprocessor::new();
        let _ = pp.process("{% tabs %}\n{% tab name=\"A\" %}\ntext");

        assert!(pp.warnings().iter().any(|w| w.contains("unclosed")));
    }

    #[test]
    fn test_unclosed_tabs_are_closed() {
        let mut pp = TabsPreprocessor::new();
        let output = pp.process("{% tabs %}\n{% tab name=\"A\" %}\ntext\n");

        assert!(output.ends_with("\n</luma-tab>\n\n</luma-tabs>\n"));
        assert_eq!(pp.into_groups().len(), 1);
    }

    #[test]
    fn test_close_tag_followed_by_blank_line() {
        let mut pp = TabsPreprocessor::new();
        let output = pp.process("{% tabs %}\n{% tab name=\"A\" %}\nA\n{% /tabs %}\nAfter\n");

        assert!(output.contains("</luma-tabs>\n\nAfter\n"), "{output:?}");
    }

    #[test]
    fn test_content_before_first_tab_stays_outside() {
        let mut pp = TabsPreprocessor::new();
        let output = pp.process("{% tabs %}\nearly text\n{% tab name=\"A\" %}\nA\n{% /tabs %}");

        let text = output.find("early text").unwrap();
        let container = output.find("<luma-tabs").unwrap();
        assert!(text < container);
        assert!(pp.warnings().iter().any(|w| w.contains("before the first")));
    }

    #[test]
    fn test_content_between_tabs_dropped_with_warning() {
        let mut pp = TabsPreprocessor::new();
        let output = pp.process(
            "{% tabs %}\n{% tab name=\"A\" %}\nA\n{% /tab %}\nstray\n{% tab name=\"B\" %}\nB\n{% /tabs %}",
        );

        assert!(!output.contains("stray"));
        assert!(pp.warnings().iter().any(|w| w.starts_with("line 5:")));
    }

    #[test]
    fn test_empty_tabs_skipped() {
        let mut pp = TabsPreprocessor::new();
        let output = pp.process("{% tabs %}\n{% /tabs %}");

        assert!(pp.warnings().iter().any(|w| w.contains("no tabs")));
        assert!(!output.contains("luma-tabs"));
        assert!(pp.into_groups().is_empty());
    }

    #[test]
    fn test_multiple_groups_have_distinct_ids() {
        let mut pp = TabsPreprocessor::new();
        let block = "{% tabs %}\n{% tab name=\"A\" %}\nA\n{% /tabs %}\n";
        let _ = pp.process(&format!("{block}\n{block}"));

        let ids: Vec<_> = pp.into_groups().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_preserves_trailing_newline() {
        let mut pp = TabsPreprocessor::new();
        assert_eq!(pp.process("a\nb\n"), "a\nb\n");
        assert_eq!(pp.process("a\nb"), "a\nb");
    }
}
