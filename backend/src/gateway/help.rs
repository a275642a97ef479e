//! Help page rendering from Markdown.
//!
//! Headings get stable `id` anchors and are collected into a table of
//! contents. External links open in a new tab.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpDocument {
    pub toc: Vec<TocEntry>,
    /// Rendered HTML body.
    pub fragment: String,
}

impl HelpDocument {
    /// Table of contents as a flat HTML list, indented by heading level.
    pub fn toc_html(&self) -> String {
        if self.toc.is_empty() {
            return String::new();
        }
        let mut out = String::from("<ul class=\"toc\">\n");
        for entry in &self.toc {
            out.push_str(&format!(
                "<li class=\"toc-h{}\"><a href=\"#{}\">{}</a></li>\n",
                entry.level,
                escape_attr(&entry.anchor),
                escape_text(&entry.title)
            ));
        }
        out.push_str("</ul>\n");
        out
    }
}

pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render Markdown help text.
pub fn render_help(markdown: &str) -> HelpDocument {
    let mut events: Vec<Event> = Parser::new_ext(markdown, markdown_options()).collect();
    let toc = assign_heading_anchors(&mut events);
    let events = events.into_iter().map(rewrite_external_link);

    let mut fragment = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut fragment, events);

    HelpDocument { toc, fragment }
}

/// Lowercase slug of heading text: alphanumerics kept, runs of anything
/// else collapsed to a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

fn is_external(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

fn assign_heading_anchors(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut used: HashMap<String, usize> = HashMap::new();

    let mut i = 0;
    while i < events.len() {
        let level = match &events[i] {
            Event::Start(Tag::Heading { level, .. }) => *level as u8,
            _ => {
                i += 1;
                continue;
            }
        };

        let mut title = String::new();
        let mut j = i + 1;
        while j < events.len() {
            match &events[j] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => title.push_str(t),
                _ => {}
            }
            j += 1;
        }

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            let anchor = match id {
                Some(existing) => existing.to_string(),
                None => {
                    let base = slugify(&title);
                    let count = used.entry(base.clone()).or_insert(0);
                    let anchor = if *count == 0 {
                        base
                    } else {
                        format!("{}-{}", base, count)
                    };
                    *count += 1;
                    *id = Some(CowStr::from(anchor.clone()));
                    anchor
                }
            };
            toc.push(TocEntry {
                level,
                title: title.trim().to_string(),
                anchor,
            });
        }

        i = j + 1;
    }

    toc
}

fn rewrite_external_link(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) if is_external(&dest_url) => {
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(" title=\"{}\"", escape_attr(&title))
            };
            Event::InlineHtml(CowStr::from(format!(
                "<a href=\"{}\"{} target=\"_blank\" rel=\"noopener noreferrer\">",
                escape_attr(&dest_url),
                title_attr
            )))
        }
        other => other,
    }
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
