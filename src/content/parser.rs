//! Lenient HTML fragment parser.
//!
//! Produces a [`Fragment`] from CMS-authored markup without ever failing:
//!
//! - unknown tags are kept as elements
//! - unclosed elements close at the end of their parent
//! - end tags with no open match are dropped
//! - void elements never take children; `<x/>` is treated as void
//! - `<script>` and `<style>` bodies are raw text
//! - a `<` that does not start a tag is literal text
//! - doctype and processing instructions are dropped
//! - elements opened deeper than [`MAX_DEPTH`] are kept empty

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::dom::{is_raw_text, is_void, Element, Fragment, Node};

static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z]{2,8});").unwrap());

/// Block-level tags that implicitly close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "ol", "p", "pre", "section",
    "table", "ul",
];

/// Deepest element nesting the parser will build.
pub const MAX_DEPTH: usize = 512;

pub fn parse_fragment(input: &str) -> Fragment {
    let mut parser = Parser {
        input,
        pos: 0,
        stack: Vec::new(),
        root: Vec::new(),
    };
    parser.run();
    Fragment::new(parser.root)
}

/// Replace character references with the characters they name.
/// Unknown named references are left untouched.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(body)
            };
            match decoded {
                Some(ch) => ch.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "euro" => '\u{20ac}',
        "pound" => '\u{a3}',
        "yen" => '\u{a5}',
        "cent" => '\u{a2}',
        "deg" => '\u{b0}',
        "middot" => '\u{b7}',
        "bull" => '\u{2022}',
        "times" => '\u{d7}',
        _ => return None,
    };
    Some(ch)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    stack: Vec<Element>,
    root: Vec<Node>,
}

struct StartTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn run(&mut self) {
        while self.pos < self.input.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.comment();
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past('>');
            } else if rest.starts_with("</") {
                if !self.end_tag() {
                    self.text_until_next_tag(true);
                }
            } else if rest.starts_with('<') && starts_tag_name(&rest[1..]) {
                match self.start_tag() {
                    Some(tag) => self.open(tag),
                    None => self.text_until_next_tag(true),
                }
            } else {
                self.text_until_next_tag(rest.starts_with('<'));
            }
        }
        while !self.stack.is_empty() {
            self.close_top();
        }
    }

    fn append(&mut self, node: Node) {
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root,
        };
        if let Node::Text(text) = &node {
            if let Some(Node::Text(previous)) = siblings.last_mut() {
                previous.push_str(text);
                return;
            }
        }
        siblings.push(node);
    }

    fn close_top(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.append(Node::Element(element));
        }
    }

    fn top_is(&self, names: &[&str]) -> bool {
        self.stack
            .last()
            .map(|top| names.contains(&top.name.as_str()))
            .unwrap_or(false)
    }

    /// Comments end at the first `-->` or `--!>`. `<!-->` and `<!--->` are
    /// complete empty comments.
    fn comment(&mut self) {
        let input = self.input;
        let body_start = self.pos + 4;
        let body = &input[body_start..];
        for abrupt in [">", "->"] {
            if body.starts_with(abrupt) {
                self.append(Node::Comment(String::new()));
                self.pos = body_start + abrupt.len();
                return;
            }
        }

        let end = [("-->", 3), ("--!>", 4)]
            .iter()
            .filter_map(|(close, len)| body.find(close).map(|offset| (offset, *len)))
            .min_by_key(|(offset, _)| *offset);
        match end {
            Some((offset, len)) => {
                self.append(Node::Comment(body[..offset].to_string()));
                self.pos = body_start + offset + len;
            }
            None => {
                self.append(Node::Comment(body.to_string()));
                self.pos = self.input.len();
            }
        }
    }

    fn skip_past(&mut self, ch: char) {
        match self.rest().find(ch) {
            Some(offset) => self.pos += offset + ch.len_utf8(),
            None => self.pos = self.input.len(),
        }
    }

    /// Consume text up to the next `<`. When `include_lt` is set the `<` at
    /// the current position is part of the text.
    fn text_until_next_tag(&mut self, include_lt: bool) {
        let skip = if include_lt { 1 } else { 0 };
        let end = self.rest()[skip..]
            .find('<')
            .map(|offset| self.pos + skip + offset)
            .unwrap_or(self.input.len());
        let raw = &self.input[self.pos..end];
        self.pos = end;
        if !raw.is_empty() {
            self.append(Node::Text(decode_entities(raw)));
        }
    }

    /// Returns false when the `</` does not begin a well-formed end tag.
    fn end_tag(&mut self) -> bool {
        let after = &self.rest()[2..];
        let name_len = tag_name_len(after);
        if name_len == 0 {
            return false;
        }
        let name = after[..name_len].to_ascii_lowercase();
        let Some(close) = after.find('>') else {
            return false;
        };
        self.pos += 2 + close + 1;

        if let Some(index) = self.stack.iter().rposition(|open| open.name == name) {
            while self.stack.len() > index {
                self.close_top();
            }
        }
        true
    }

    fn start_tag(&mut self) -> Option<StartTag> {
        let bytes = self.input.as_bytes();
        let mut pos = self.pos + 1;
        let name_len = tag_name_len(&self.input[pos..]);
        let name = self.input[pos..pos + name_len].to_ascii_lowercase();
        pos += name_len;

        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;

        loop {
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos >= bytes.len() {
                return None;
            }
            match bytes[pos] {
                b'>' => {
                    pos += 1;
                    break;
                }
                b'/' => {
                    if bytes.get(pos + 1) == Some(&b'>') {
                        self_closing = true;
                        pos += 2;
                        break;
                    }
                    pos += 1;
                    continue;
                }
                _ => {}
            }

            let attr_start = pos;
            while pos < bytes.len()
                && !bytes[pos].is_ascii_whitespace()
                && !matches!(bytes[pos], b'=' | b'>' | b'/')
            {
                pos += 1;
            }
            let attr_name = self.input[attr_start..pos].to_ascii_lowercase();

            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            let mut value = String::new();
            if bytes.get(pos) == Some(&b'=') {
                pos += 1;
                while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                match bytes.get(pos) {
                    Some(&quote) if quote == b'"' || quote == b'\'' => {
                        let value_start = pos + 1;
                        let value_end = self.input[value_start..]
                            .find(quote as char)
                            .map(|offset| value_start + offset)?;
                        value = decode_entities(&self.input[value_start..value_end]);
                        pos = value_end + 1;
                    }
                    Some(_) => {
                        let value_start = pos;
                        while pos < bytes.len()
                            && !bytes[pos].is_ascii_whitespace()
                            && bytes[pos] != b'>'
                        {
                            pos += 1;
                        }
                        value = decode_entities(&self.input[value_start..pos]);
                    }
                    None => return None,
                }
            }

            if !attr_name.is_empty() && !attrs.iter().any(|(existing, _)| *existing == attr_name) {
                attrs.push((attr_name, value));
            }
        }

        self.pos = pos;
        Some(StartTag {
            name,
            attrs,
            self_closing,
        })
    }

    fn open(&mut self, tag: StartTag) {
        self.close_implied_by(&tag.name);

        let mut element = Element::new(tag.name);
        element.attrs = tag.attrs;

        if is_void(&element.name) || tag.self_closing || self.stack.len() >= MAX_DEPTH {
            self.append(Node::Element(element));
            return;
        }

        if is_raw_text(&element.name) {
            let body_end = find_raw_text_end(self.rest(), &element.name);
            let body = &self.input[self.pos..self.pos + body_end];
            if !body.is_empty() {
                element.children.push(Node::Text(body.to_string()));
            }
            self.pos += body_end;
            if self.pos < self.input.len() {
                self.skip_past('>');
            }
            self.append(Node::Element(element));
            return;
        }

        self.stack.push(element);
    }

    /// Authoring shortcuts: `<p>a<p>b`, `<li>a<li>b`, `<td>a<td>b`.
    fn close_implied_by(&mut self, name: &str) {
        if CLOSES_PARAGRAPH.contains(&name) && self.top_is(&["p"]) {
            self.close_top();
        }
        match name {
            "li" if self.top_is(&["li"]) => self.close_top(),
            "dt" | "dd" if self.top_is(&["dt", "dd"]) => self.close_top(),
            "td" | "th" if self.top_is(&["td", "th"]) => self.close_top(),
            "tr" => {
                if self.top_is(&["td", "th"]) {
                    self.close_top();
                }
                if self.top_is(&["tr"]) {
                    self.close_top();
                }
            }
            _ => {}
        }
    }
}

fn starts_tag_name(s: &str) -> bool {
    s.as_bytes()
        .first()
        .map(|b| b.is_ascii_alphabetic())
        .unwrap_or(false)
}

fn tag_name_len(s: &str) -> usize {
    if !starts_tag_name(s) {
        return 0;
    }
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b':')
        .count()
}

/// Byte offset of `</name` (case-insensitive) in `rest`, or `rest.len()`.
fn find_raw_text_end(rest: &str, name: &str) -> usize {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{}", name);
    let mut from = 0;
    while let Some(offset) = lower[from..].find(&needle) {
        let at = from + offset;
        let after = lower.as_bytes().get(at + needle.len());
        if matches!(after, None | Some(b'>') | Some(b'/')) || after.map(u8::is_ascii_whitespace).unwrap_or(false) {
            return at;
        }
        from = at + needle.len();
    }
    rest.len()
}
