//! Walking a `pulldown_cmark::Parser` into a flat sequence of
//! [`BuilderCall`]s (`SPEC_FULL.md` §7): "headings, paragraphs,
//! unordered/ordered lists, code blocks/spans, links, emphasis/strong, and
//! a placeholder node for unrecognized embedded components." `compile`
//! returns plain data rather than touching the lifecycle stack directly,
//! so it can be unit-tested without an installed engine; [`crate::emit`]
//! replays the result through the builder surface.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Parser, Tag, TagEnd};

/// One inline run of text plus the formatting in effect when it was
/// emitted. Block structure (headings, paragraphs, lists) is carried by
/// the surrounding [`BuilderCall::OpenContainer`]/[`BuilderCall::CloseContainer`]
/// pair, not by this struct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub content: String,
    pub heading_level: Option<u8>,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuilderCall {
    OpenContainer,
    CloseContainer,
    Text(TextRun),
    Image { src: String, alt: Option<String> },
    /// An embedded construct this compiler has no kind for (tables,
    /// footnotes, raw HTML, ...). Carries a short label so the host can at
    /// least render a stand-in.
    Placeholder { label: String },
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[derive(Default)]
struct InlineState {
    heading_level: Option<u8>,
    bold_depth: u32,
    italic_depth: u32,
    code_depth: u32,
    href: Option<String>,
}

impl InlineState {
    fn run(&self, content: String) -> TextRun {
        TextRun {
            content,
            heading_level: self.heading_level,
            bold: self.bold_depth > 0,
            italic: self.italic_depth > 0,
            code: self.code_depth > 0,
            href: self.href.clone(),
        }
    }
}

fn cow(s: &CowStr<'_>) -> String {
    s.to_string()
}

/// Compile `markdown` into a flat call sequence a host replays (via
/// [`crate::emit::emit`]) through the builder surface.
pub fn compile(markdown: &str) -> Vec<BuilderCall> {
    let mut calls = Vec::new();
    let mut state = InlineState::default();
    let mut pending_image: Option<(String, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph | Tag::List(_) | Tag::Item | Tag::BlockQuote(_) | Tag::CodeBlock(_) => {
                    calls.push(BuilderCall::OpenContainer);
                    if matches!(tag, Tag::CodeBlock(_)) {
                        state.code_depth += 1;
                    }
                }
                Tag::Heading { level, .. } => {
                    calls.push(BuilderCall::OpenContainer);
                    state.heading_level = Some(heading_number(level));
                }
                Tag::Emphasis => state.italic_depth += 1,
                Tag::Strong => state.bold_depth += 1,
                Tag::Link { dest_url, .. } => state.href = Some(dest_url.to_string()),
                Tag::Image { dest_url, .. } => pending_image = Some((dest_url.to_string(), String::new())),
                _ => calls.push(BuilderCall::Placeholder { label: "block".to_string() }),
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph | TagEnd::List(_) | TagEnd::Item | TagEnd::BlockQuote(_) => {
                    calls.push(BuilderCall::CloseContainer);
                }
                TagEnd::CodeBlock => {
                    state.code_depth = state.code_depth.saturating_sub(1);
                    calls.push(BuilderCall::CloseContainer);
                }
                TagEnd::Heading(_) => {
                    state.heading_level = None;
                    calls.push(BuilderCall::CloseContainer);
                }
                TagEnd::Emphasis => state.italic_depth = state.italic_depth.saturating_sub(1),
                TagEnd::Strong => state.bold_depth = state.bold_depth.saturating_sub(1),
                TagEnd::Link => state.href = None,
                TagEnd::Image => {
                    if let Some((src, alt)) = pending_image.take() {
                        calls.push(BuilderCall::Image { src, alt: (!alt.is_empty()).then_some(alt) });
                    }
                }
                _ => calls.push(BuilderCall::Placeholder { label: "block-end".to_string() }),
            },
            Event::Text(text) => {
                if let Some((_, alt)) = pending_image.as_mut() {
                    alt.push_str(&text);
                } else {
                    calls.push(BuilderCall::Text(state.run(cow(&text))));
                }
            }
            Event::Code(code) => {
                state.code_depth += 1;
                calls.push(BuilderCall::Text(state.run(cow(&code))));
                state.code_depth = state.code_depth.saturating_sub(1);
            }
            Event::SoftBreak | Event::HardBreak => calls.push(BuilderCall::Text(state.run(" ".to_string()))),
            Event::Rule => calls.push(BuilderCall::Placeholder { label: "rule".to_string() }),
            Event::Html(_) | Event::InlineHtml(_) => {
                calls.push(BuilderCall::Placeholder { label: "embedded-html".to_string() })
            }
            Event::FootnoteReference(name) => {
                calls.push(BuilderCall::Placeholder { label: format!("footnote-ref:{name}") })
            }
            Event::TaskListMarker(_) => {}
        }
    }

    calls
}
