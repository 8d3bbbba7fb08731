//! Markdown to HTML rendering.
//!
//! Raw HTML passes through, bare URLs become links, smart punctuation is on,
//! and tables are wrapped in a scrollable container.

use std::fmt::Write;
use std::ops::Range;
use std::sync::OnceLock;

use pulldown_cmark::{html, Alignment, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex_lite::Regex;

use crate::core::names::slug;

/// Converts markdown source into HTML
pub trait Render {
    fn render(&self, source: &str) -> String;
}

const TABLE_OPEN: &str = "<div class=\"table-container\"><table class=\"markdown-table\">";
const TABLE_CLOSE: &str = "</table></div>";

#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: markdown_options(),
        }
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
}

impl Render for MarkdownRenderer {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options);
        let events = rewrite_events(parser);

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

/// Apply table wrapping and URL auto-linking to the event stream
fn rewrite_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut table = TableState::default();
    // Inside links, images or code blocks no auto-linking happens
    let mut opaque = 0usize;
    // Emphasis delimiters and smart quotes split one run of text into several events
    let mut pending: Option<CowStr<'a>> = None;

    for event in parser {
        let event = match event {
            Event::Text(text) if opaque == 0 => {
                pending = Some(match pending.take() {
                    Some(prev) => {
                        let mut joined = prev.to_string();
                        joined.push_str(&text);
                        joined.into()
                    }
                    None => text,
                });
                continue;
            }
            other => other,
        };
        if let Some(text) = pending.take() {
            linkify(text, &mut out);
        }

        match event {
            Event::Start(Tag::Table(alignments)) => {
                table = TableState {
                    alignments,
                    ..TableState::default()
                };
                out.push(Event::Html(TABLE_OPEN.into()));
            }
            Event::End(TagEnd::Table) => {
                out.push(Event::Html(format!("</tbody>{TABLE_CLOSE}\n").into()));
            }
            Event::Start(Tag::TableHead) => {
                table.in_head = true;
                table.cell = 0;
                out.push(Event::Html("<thead><tr>".into()));
            }
            Event::End(TagEnd::TableHead) => {
                table.in_head = false;
                out.push(Event::Html("</tr></thead><tbody>\n".into()));
            }
            Event::Start(Tag::TableRow) => {
                table.cell = 0;
                out.push(Event::Html("<tr>".into()));
            }
            Event::End(TagEnd::TableRow) => out.push(Event::Html("</tr>\n".into())),
            Event::Start(Tag::TableCell) => {
                let tag = if table.in_head { "th" } else { "td" };
                let style = match table.alignments.get(table.cell) {
                    Some(Alignment::Left) => " style=\"text-align: left\"",
                    Some(Alignment::Center) => " style=\"text-align: center\"",
                    Some(Alignment::Right) => " style=\"text-align: right\"",
                    _ => "",
                };
                out.push(Event::Html(format!("<{tag}{style}>").into()));
            }
            Event::End(TagEnd::TableCell) => {
                let tag = if table.in_head { "th" } else { "td" };
                table.cell += 1;
                out.push(Event::Html(format!("</{tag}>").into()));
            }
            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_))) => {
                opaque += 1;
                out.push(Event::Start(tag));
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock)) => {
                opaque = opaque.saturating_sub(1);
                out.push(Event::End(end));
            }
            other => out.push(other),
        }
    }
    if let Some(text) = pending.take() {
        linkify(text, &mut out);
    }

    out
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?:https?://|www\.)[^\s<>"'`]+"#).unwrap_or_else(|e| panic!("bad url pattern: {e}"))
    })
}

/// Bare URLs in `text` as (byte offset, url) pairs, trailing punctuation trimmed
fn find_urls(text: &str) -> Vec<(usize, &str)> {
    url_pattern()
        .find_iter(text)
        .map(|found| (found.start(), trim_url(found.as_str())))
        .filter(|(_, url)| !url.ends_with("://") && *url != "www.")
        .collect()
}

/// Drop sentence punctuation after a URL; a `)` stays when it closes a `(` of the URL
fn trim_url(mut url: &str) -> &str {
    while let Some(last) = url.chars().last() {
        let trim = match last {
            '.' | ',' | ';' | ':' | '!' | '?' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };
        if !trim {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    url
}

fn href(url: &str) -> String {
    if url.starts_with("www.") {
        format!("http://{url}")
    } else {
        url.to_string()
    }
}

/// Split a text run around bare URLs, wrapping each in an anchor
fn linkify<'a>(text: CowStr<'a>, out: &mut Vec<Event<'a>>) {
    let urls = find_urls(&text);
    if urls.is_empty() {
        out.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for (start, url) in urls {
        if start > last {
            out.push(Event::Text(text[last..start].to_string().into()));
        }
        out.push(Event::Html(format!("<a href=\"{}\">", escape_html(&href(url))).into()));
        out.push(Event::Text(url.to_string().into()));
        out.push(Event::Html("</a>".into()));
        last = start + url.len();
    }
    if last < text.len() {
        out.push(Event::Text(text[last..].to_string().into()));
    }
}

/// Markdown with every bare URL turned into an explicit link.
///
/// Used where the markdown itself is displayed by another renderer.
pub fn autolink(source: &str) -> String {
    let mut runs: Vec<Range<usize>> = Vec::new();
    let mut opaque = 0usize;
    for (event, range) in Parser::new_ext(source, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => opaque += 1,
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                opaque = opaque.saturating_sub(1);
            }
            Event::Text(_) if opaque == 0 => match runs.last_mut() {
                Some(run) if run.end == range.start => run.end = range.end,
                _ => runs.push(range),
            },
            _ => {}
        }
    }

    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for run in runs {
        for (offset, url) in find_urls(&source[run.clone()]) {
            let start = run.start + offset;
            out.push_str(&source[last..start]);
            if url.starts_with("www.") {
                let _ = write!(out, "[{url}](<{}>)", href(url));
            } else {
                let _ = write!(out, "<{url}>");
            }
            last = start + url.len();
        }
    }
    out.push_str(&source[last..]);
    out
}

/// Byte offset of the heading whose slug equals `anchor`
pub fn anchor_offset(source: &str, anchor: &str) -> Option<usize> {
    let wanted = slug(anchor);
    let mut heading: Option<(usize, String)> = None;
    for (event, range) in Parser::new_ext(source, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { .. }) => heading = Some((range.start, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, title)) = heading.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, title)) = heading.take() {
                    if slug(title.trim()) == wanted {
                        return Some(start);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// A standalone HTML page around a rendered body
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
