//! Safe output markup for the floating CLI.
//!
//! Replies are stored as a small HTML-like dialect so the same scrollback can
//! be rendered styled (TUI) or flattened (`folio exec`). Only two tags are
//! recognised:
//!
//! | Tag                              | Tone                   |
//! |----------------------------------|------------------------|
//! | `<span class="t-prompt">`        | [`Tone::Prompt`]       |
//! | `<span class="cli-out-cmd">`     | [`Tone::Command`]      |
//! | `<span class="cli-acc">`         | [`Tone::Accent`]       |
//! | `<span class="cli-err">`         | [`Tone::Error`]        |
//! | `<a href="..." ...>`             | [`Tone::Accent`] + href |
//!
//! Anything else that looks like a tag is rendered literally. User input is
//! passed through [`escape_html`] before it enters the scrollback, so it can
//! never open a tag.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)(span|a)\b([^<>]*)>").expect("tag regex is valid"));
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"class="([^"]*)""#).expect("class regex is valid"));
static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="([^"]*)""#).expect("href regex is valid"));

/// Visual role of a run of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Plain,
    Prompt,
    Command,
    Accent,
    Error,
}

impl Tone {
    fn from_class(class: &str) -> Option<Self> {
        class.split_whitespace().find_map(|c| match c {
            "t-prompt" => Some(Self::Prompt),
            "cli-out-cmd" => Some(Self::Command),
            "cli-acc" => Some(Self::Accent),
            "cli-err" => Some(Self::Error),
            _ => None,
        })
    }
}

/// A decoded run of text with a single tone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
    pub href: Option<String>,
}

/// Escape `&`, `<` and `>`. Quotes are left alone.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// [`escape_html`] plus `"`, for attribute values.
pub fn escape_attr(input: &str) -> String {
    escape_html(input).replace('"', "&quot;")
}

/// Decode the entities produced by [`escape_html`] and [`escape_attr`] in a
/// single pass.
pub fn unescape_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (decoded, consumed) = if tail.starts_with("&amp;") {
            ('&', 5)
        } else if tail.starts_with("&lt;") {
            ('<', 4)
        } else if tail.starts_with("&gt;") {
            ('>', 4)
        } else if tail.starts_with("&quot;") {
            ('"', 6)
        } else {
            ('&', 1)
        };
        out.push(decoded);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

#[derive(Clone, Debug)]
struct Frame {
    tag: &'static str,
    tone: Tone,
    href: Option<String>,
}

/// Parse markup into tone-tagged segments.
pub fn parse(markup: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut cursor = 0;

    let push_text = |segments: &mut Vec<Segment>, stack: &[Frame], raw: &str| {
        if raw.is_empty() {
            return;
        }
        let (tone, href) = stack
            .last()
            .map(|f| (f.tone, f.href.clone()))
            .unwrap_or_default();
        let text = unescape_entities(raw);
        if let Some(last) = segments.last_mut()
            && last.tone == tone
            && last.href == href
        {
            last.text.push_str(&text);
            return;
        }
        segments.push(Segment { text, tone, href });
    };

    for caps in TAG_RE.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut segments, &stack, &markup[cursor..whole.start()]);
        cursor = whole.end();

        let closing = !caps[1].is_empty();
        let tag: &'static str = if &caps[2] == "a" { "a" } else { "span" };
        if closing {
            if stack.last().is_some_and(|f| f.tag == tag) {
                stack.pop();
            }
            continue;
        }

        let attrs = &caps[3];
        let inherited = stack.last().map(|f| f.tone).unwrap_or_default();
        let class_tone = CLASS_RE
            .captures(attrs)
            .and_then(|c| Tone::from_class(&c[1]));
        let frame = if tag == "a" {
            Frame {
                tag,
                tone: class_tone.unwrap_or(Tone::Accent),
                href: HREF_RE.captures(attrs).map(|c| unescape_entities(&c[1])),
            }
        } else {
            Frame {
                tag,
                tone: class_tone.unwrap_or(inherited),
                href: stack.last().and_then(|f| f.href.clone()),
            }
        };
        stack.push(frame);
    }
    push_text(&mut segments, &stack, &markup[cursor..]);
    segments
}

/// Flatten markup to the text a reader would see.
pub fn to_plain(markup: &str) -> String {
    parse(markup).into_iter().map(|s| s.text).collect()
}

/// Wrap already-escaped text in a tone span.
pub fn span(class: &str, escaped_text: &str) -> String {
    format!("<span class=\"{class}\">{escaped_text}</span>")
}

/// Build an accent link. Both `href` and `label` are escaped here.
pub fn link(href: &str, label: &str) -> String {
    let target = if href.starts_with("mailto:") {
        ""
    } else {
        " target=\"_blank\""
    };
    format!(
        "<a href=\"{}\"{target} class=\"cli-acc\">{}</a>",
        escape_attr(href),
        escape_html(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_only_touches_three_characters() {
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_html("\"quoted\" 'x'"), "\"quoted\" 'x'");
    }

    #[test]
    fn unescape_is_single_pass() {
        assert_eq!(unescape_entities("&amp;lt;"), "&lt;");
        assert_eq!(unescape_entities("&lt;b&gt;"), "<b>");
        assert_eq!(unescape_entities("AT&T &copy;"), "AT&T &copy;");
    }

    #[test]
    fn escaped_input_renders_literally() {
        let raw = "<script>alert(1)</script> & <span class=\"cli-err\">x</span>";
        let escaped = escape_html(raw);
        let segments = parse(&escaped);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].tone, Tone::Plain);
        assert_eq!(segments[0].text, raw);
    }

    #[test]
    fn escaping_twice_is_visible() {
        let twice = escape_html(&escape_html("<b>"));
        assert_eq!(to_plain(&twice), "&lt;b&gt;");
    }

    #[test]
    fn parses_prompt_and_command_spans() {
        let markup = format!(
            "{} {}",
            span("t-prompt", "visitor@portfolio:~$"),
            span("cli-out-cmd", &escape_html("echo <hi>"))
        );
        let segments = parse(&markup);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].tone, Tone::Prompt);
        assert_eq!(segments[1].text, " ");
        assert_eq!(segments[2].tone, Tone::Command);
        assert_eq!(segments[2].text, "echo <hi>");
    }

    #[test]
    fn link_carries_href() {
        let markup = format!("github   : {}", link("https://github.com/x", "@x"));
        let segments = parse(&markup);
        let last = segments.last().unwrap();
        assert_eq!(last.text, "@x");
        assert_eq!(last.tone, Tone::Accent);
        assert_eq!(last.href.as_deref(), Some("https://github.com/x"));
        assert_eq!(to_plain(&markup), "github   : @x");
    }

    #[test]
    fn quotes_in_href_stay_inside_the_attribute() {
        let href = "https://x.test/?q=\"><span class=\"cli-err\">pwned";
        let markup = link(href, "x");
        assert!(markup.contains("&quot;&gt;&lt;span"));
        let segments = parse(&markup);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "x");
        assert_eq!(segments[0].tone, Tone::Accent);
        assert_eq!(segments[0].href.as_deref(), Some(href));
    }

    #[test]
    fn ampersands_in_href_round_trip() {
        let href = "https://x.test/?a=1&b=2";
        let markup = link(href, "x");
        assert!(markup.contains("a=1&amp;b=2"));
        assert_eq!(parse(&markup)[0].href.as_deref(), Some(href));
    }

    #[test]
    fn mailto_links_have_no_target() {
        let html = link("mailto:a@b.c", "a@b.c");
        assert!(!html.contains("_blank"));
        assert!(html.contains("href=\"mailto:a@b.c\""));
    }

    #[test]
    fn unknown_tags_stay_literal() {
        let segments = parse("<b>bold</b>");
        assert_eq!(to_plain("<b>bold</b>"), "<b>bold</b>");
        assert_eq!(segments[0].tone, Tone::Plain);
    }

    #[test]
    fn stray_closing_tag_is_dropped() {
        assert_eq!(to_plain("a</span>b"), "ab");
    }

    #[test]
    fn nested_span_without_class_inherits_tone() {
        let segments = parse("<span class=\"cli-err\">x <span>y</span></span>");
        assert!(segments.iter().all(|s| s.tone == Tone::Error));
        assert_eq!(to_plain("<span class=\"cli-err\">x <span>y</span></span>"), "x y");
    }
}
