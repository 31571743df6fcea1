//! Tabs post-processor for transforming `<luma-tabs>` to accessible HTML.

use std::collections::HashMap;
use std::fmt::Write;

use crate::util::escape_html;

use super::TabsGroup;

const TABS_OPEN: &str = "<luma-tabs ";
const TABS_CLOSE: &str = "</luma-tabs>";
const TAB_OPEN: &str = "<luma-tab ";
const TAB_CLOSE: &str = "</luma-tab>";

/// Post-processor that replaces `<luma-tabs>` elements in rendered HTML.
///
/// # Output HTML Structure
///
/// ```html
/// <div class="tabs" id="tabs-0">
///   <div class="tabs-buttons" role="tablist">
///     <button role="tab" id="tab-0-0" aria-controls="panel-0-0"
///             aria-selected="true" tabindex="0">macOS</button>
///     <button role="tab" id="tab-0-1" aria-controls="panel-0-1"
///             aria-selected="false" tabindex="-1">Linux</button>
///   </div>
///   <div role="tabpanel" id="panel-0-0" aria-labelledby="tab-0-0">…</div>
///   <div role="tabpanel" id="panel-0-1" aria-labelledby="tab-0-1" hidden>…</div>
/// </div>
/// ```
pub struct TabsProcessor {
    groups: HashMap<usize, TabsGroup>,
    warnings: Vec<String>,
}

impl TabsProcessor {
    /// Create a processor for the groups collected by the preprocessor.
    #[must_use]
    pub fn new(groups: Vec<TabsGroup>) -> Self {
        Self {
            groups: groups.into_iter().map(|g| (g.id, g)).collect(),
            warnings: Vec::new(),
        }
    }

    /// Warnings collected during post-processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the processor and return its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    /// Replace every `<luma-tabs>` element in `html`.
    pub fn post_process(&mut self, html: &mut String) {
        if !html.contains(TABS_OPEN) {
            return;
        }

        let mut result = String::with_capacity(html.len() + 512);
        let mut remaining = html.as_str();

        while let Some(start) = remaining.find(TABS_OPEN) {
            result.push_str(&remaining[..start]);

            let Some((group_id, inner, consumed)) =
                split_element(&remaining[start..], TABS_CLOSE)
            else {
                self.warnings
                    .push("malformed tabs container, keeping content without tabs".to_owned());
                result.push_str(&strip_tab_elements(&remaining[start..]));
                remaining = "";
                break;
            };

            match group_id {
                Some(id) => self.transform_group(id, inner, &mut result),
                None => {
                    self.warnings
                        .push("tabs container without data-id".to_owned());
                    result.push_str(inner);
                }
            }
            remaining = &remaining[start + consumed..];
        }

        result.push_str(remaining);
        *html = result;
    }

    fn transform_group(&mut self, group_id: usize, inner: &str, out: &mut String) {
        let Some(group) = self.groups.get(&group_id) else {
            // Empty or unknown groups lose their wrapper but keep content.
            self.warnings
                .push(format!("tabs group {group_id} has no tabs, dropping container"));
            out.push_str(inner);
            return;
        };

        write!(out, r#"<div class="tabs" id="tabs-{group_id}">"#).unwrap();
        out.push_str(r#"<div class="tabs-buttons" role="tablist">"#);
        for (idx, tab) in group.tabs.iter().enumerate() {
            let selected = idx == 0;
            write!(
                out,
                r#"<button role="tab" id="tab-{group_id}-{id}" aria-controls="panel-{group_id}-{id}" aria-selected="{selected}" tabindex="{tabindex}">{label}</button>"#,
                id = tab.id,
                tabindex = if selected { "0" } else { "-1" },
                label = escape_html(&tab.label),
            )
            .unwrap();
        }
        out.push_str("</div>");

        for (idx, (tab_id, content)) in parse_panels(inner).into_iter().enumerate() {
            if !group.tabs.iter().any(|t| t.id == tab_id) {
                self.warnings
                    .push(format!("tab {tab_id} not found in group {group_id}"));
            }
            let hidden = if idx == 0 { "" } else { " hidden" };
            write!(
                out,
                r#"<div role="tabpanel" id="panel-{group_id}-{tab_id}" aria-labelledby="tab-{group_id}-{tab_id}"{hidden}>{}</div>"#,
                content.trim()
            )
            .unwrap();
        }

        out.push_str("</div>");
    }
}

/// Split an element starting at the beginning of `input`.
///
/// Returns the parsed `data-id`, the inner content and the number of bytes
/// consumed through the closing tag.
fn split_element<'a>(input: &'a str, close: &str) -> Option<(Option<usize>, &'a str, usize)> {
    let tag_end = input.find('>')? + 1;
    let close_start = tag_end + input[tag_end..].find(close)?;
    Some((
        parse_data_id(&input[..tag_end]),
        &input[tag_end..close_start],
        close_start + close.len(),
    ))
}

/// Parse the `data-id` attribute from an opening tag.
fn parse_data_id(tag: &str) -> Option<usize> {
    const ATTR: &str = "data-id=\"";
    let value_start = tag.find(ATTR)? + ATTR.len();
    let value_end = value_start + tag[value_start..].find('"')?;
    tag[value_start..value_end].parse().ok()
}

/// Remove every `<luma-tabs>` and `<luma-tab>` tag, keeping the text between them.
fn strip_tab_elements(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    loop {
        let next = [rest.find("<luma-tab"), rest.find("</luma-tab")]
            .into_iter()
            .flatten()
            .min();
        let Some(start) = next else { break };
        out.push_str(&rest[..start]);
        rest = match rest[start..].find('>') {
            Some(end) => &rest[start + end + 1..],
            None => "",
        };
    }

    out.push_str(rest);
    out
}

/// Parse `<luma-tab>` panels as `(tab_id, content)` pairs.
fn parse_panels(content: &str) -> Vec<(usize, &str)> {
    let mut panels = Vec::new();
    let mut remaining = content;

    while let Some(start) = remaining.find(TAB_OPEN) {
        let Some((tab_id, inner, consumed)) = split_element(&remaining[start..], TAB_CLOSE)
        else {
            break;
        };
        if let Some(id) = tab_id {
            panels.push((id, inner));
        }
        remaining = &remaining[start + consumed..];
    }

    panels
}
