//! Styled fragment to terminal lines.
//!
//! Block layout and inline styling are derived from the presentation classes
//! (see [`super::styles`]), so the rendered article follows the same rules
//! as the HTML produced by [`super::style_content`].

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::dom::{Element, Fragment, Node};
use super::styles::{
    element_style, has_bottom_margin, has_top_margin, STYLE_IMAGE, STYLE_LINK_REF,
    STYLE_QUOTE_BAR, STYLE_TABLE_BORDER,
};

const MIN_WIDTH: usize = 10;

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "tbody", "thead", "tfoot", "tr", "ul",
];

/// Elements whose content is never displayed.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "head", "title", "template", "noscript"];

/// Terminal rendition of an article body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedArticle {
    pub lines: Vec<Line<'static>>,
    /// Link and image targets in reference order; `[n]` in the text is `links[n - 1]`
    pub links: Vec<String>,
}

pub fn render_fragment(fragment: &Fragment, width: u16) -> RenderedArticle {
    let mut renderer = Renderer::new(width as usize);
    for node in &fragment.children {
        renderer.node(node);
    }
    renderer.finish()
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Unordered,
    Ordered(u32),
}

struct Renderer {
    width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    line_open: bool,
    line_width: usize,
    pending_space: bool,
    pending_margin: bool,
    prefixes: Vec<(String, Style)>,
    styles: Vec<Style>,
    pre_depth: usize,
    lists: Vec<ListKind>,
    cells: Vec<usize>,
    links: Vec<String>,
}

impl Renderer {
    fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            lines: Vec::new(),
            spans: Vec::new(),
            line_open: false,
            line_width: 0,
            pending_space: false,
            pending_margin: false,
            prefixes: Vec::new(),
            styles: vec![Style::default()],
            pre_depth: 0,
            lists: Vec::new(),
            cells: Vec::new(),
            links: Vec::new(),
        }
    }

    fn finish(mut self) -> RenderedArticle {
        self.flush_line();
        while self
            .lines
            .last()
            .map(|line| line.width() == 0)
            .unwrap_or(false)
        {
            self.lines.pop();
        }
        RenderedArticle {
            lines: self.lines,
            links: self.links,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn prefix_width(&self) -> usize {
        self.prefixes.iter().map(|(text, _)| text.width()).sum()
    }

    fn last_line_blank(&self) -> bool {
        self.lines
            .last()
            .map(|line| line.spans.iter().all(|span| span.content.trim().is_empty()))
            .unwrap_or(true)
    }

    fn open_line(&mut self) {
        if self.line_open {
            return;
        }
        if self.pending_margin && !self.last_line_blank() {
            let blank: Vec<Span<'static>> = self
                .prefixes
                .iter()
                .map(|(text, style)| (text.trim_end(), *style))
                .filter(|(text, _)| !text.is_empty())
                .map(|(text, style)| Span::styled(text.to_string(), style))
                .collect();
            self.lines.push(Line::from(blank));
        }
        self.pending_margin = false;
        self.spans = self
            .prefixes
            .iter()
            .map(|(text, style)| Span::styled(text.clone(), *style))
            .collect();
        self.line_width = self.prefix_width();
        self.line_open = true;
        self.pending_space = false;
    }

    fn flush_line(&mut self) {
        if !self.line_open {
            return;
        }
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        self.line_open = false;
        self.line_width = 0;
        self.pending_space = false;
    }

    fn available(&self) -> usize {
        self.width.saturating_sub(self.line_width)
    }

    /// Push text that must not be split or preceded by a wrap-space.
    fn push_atomic(&mut self, text: &str, style: Style) {
        self.open_line();
        self.line_width += text.width();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn push_word(&mut self, word: &str, style: Style) {
        let word_width = word.width();
        if self.line_open && self.pending_space && self.line_width > self.prefix_width() {
            if word_width + 1 > self.available() {
                self.flush_line();
            } else {
                self.spans.push(Span::styled(" ".to_string(), style));
                self.line_width += 1;
            }
        }
        self.pending_space = false;
        self.open_line();

        if word_width <= self.available() {
            self.line_width += word_width;
            self.spans.push(Span::styled(word.to_string(), style));
            return;
        }

        // Longer than a whole line: hard-split by display width
        let mut chunk = String::new();
        let mut chunk_width = 0;
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if chunk_width + ch_width > self.available() && !chunk.is_empty() {
                self.line_width += chunk_width;
                self.spans.push(Span::styled(std::mem::take(&mut chunk), style));
                chunk_width = 0;
                self.flush_line();
                self.open_line();
            }
            chunk.push(ch);
            chunk_width += ch_width;
        }
        if !chunk.is_empty() {
            self.line_width += chunk_width;
            self.spans.push(Span::styled(chunk, style));
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.style();
        if self.pre_depth > 0 {
            self.push_preformatted(text, style);
            return;
        }
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        let mut words = text.split_whitespace().peekable();
        while let Some(word) = words.next() {
            self.push_word(word, style);
            if words.peek().is_some() {
                self.pending_space = true;
            }
        }
        if text.ends_with(char::is_whitespace) && !text.trim().is_empty() {
            self.pending_space = true;
        }
    }

    fn push_preformatted(&mut self, text: &str, style: Style) {
        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                self.open_line();
                self.flush_line();
            }
            if segment.is_empty() {
                continue;
            }
            self.open_line();
            let mut chunk = String::new();
            let mut chunk_width = 0;
            for ch in segment.chars() {
                let ch = if ch == '\t' { ' ' } else { ch };
                let ch_width = ch.width().unwrap_or(0);
                if chunk_width + ch_width > self.available() && !chunk.is_empty() {
                    self.line_width += chunk_width;
                    self.spans.push(Span::styled(std::mem::take(&mut chunk), style));
                    chunk_width = 0;
                    self.flush_line();
                    self.open_line();
                }
                chunk.push(ch);
                chunk_width += ch_width;
            }
            if !chunk.is_empty() {
                self.line_width += chunk_width;
                self.spans.push(Span::styled(chunk, style));
            }
        }
    }

    fn block_start(&mut self, element: &Element) {
        self.flush_line();
        if has_top_margin(element) && !self.lines.is_empty() {
            self.pending_margin = true;
        }
    }

    fn block_end(&mut self, element: &Element) {
        self.flush_line();
        if has_bottom_margin(element) {
            self.pending_margin = true;
        }
    }

    fn children(&mut self, element: &Element) {
        for child in &element.children {
            self.node(child);
        }
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.push_text(text),
            Node::Comment(_) => {}
            Node::Element(element) => self.element(element),
        }
    }

    fn element(&mut self, element: &Element) {
        let name = element.name.as_str();
        if HIDDEN_ELEMENTS.contains(&name) {
            return;
        }

        let style = self.style().patch(element_style(element));
        self.styles.push(style);

        match name {
            "br" => {
                if self.line_open {
                    self.flush_line();
                } else {
                    self.open_line();
                    self.flush_line();
                }
            }
            "hr" => {
                self.block_start(element);
                let rule = "─".repeat(self.available().max(1));
                self.push_atomic(&rule, STYLE_TABLE_BORDER);
                self.flush_line();
                self.pending_margin = true;
            }
            "img" => self.image(element),
            "a" => self.link(element),
            "ul" | "ol" => {
                self.block_start(element);
                self.lists.push(if name == "ol" {
                    ListKind::Ordered(list_start(element))
                } else {
                    ListKind::Unordered
                });
                self.prefixes.push(("  ".to_string(), Style::default()));
                self.children(element);
                self.prefixes.pop();
                self.lists.pop();
                self.block_end(element);
            }
            "li" => {
                self.block_start(element);
                let bullet = match self.lists.last_mut() {
                    Some(ListKind::Ordered(next)) => {
                        let bullet = format!("{}. ", next);
                        *next += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.push_atomic(&bullet, style);
                self.children(element);
                self.block_end(element);
            }
            "blockquote" => {
                self.block_start(element);
                if element.has_class("border-start") {
                    self.prefixes.push(("│ ".to_string(), STYLE_QUOTE_BAR));
                    self.children(element);
                    self.flush_line();
                    self.prefixes.pop();
                } else {
                    self.children(element);
                }
                self.block_end(element);
            }
            "pre" => {
                self.block_start(element);
                self.pre_depth += 1;
                self.children(element);
                self.pre_depth -= 1;
                self.block_end(element);
            }
            "tr" => {
                self.flush_line();
                self.cells.push(0);
                self.children(element);
                self.cells.pop();
                self.flush_line();
            }
            "td" | "th" => {
                if let Some(count) = self.cells.last_mut() {
                    let first = *count == 0;
                    *count += 1;
                    if !first {
                        self.push_atomic(" │ ", STYLE_TABLE_BORDER);
                    }
                }
                self.pending_space = false;
                self.children(element);
            }
            _ if BLOCK_ELEMENTS.contains(&name) => {
                self.block_start(element);
                self.children(element);
                self.block_end(element);
            }
            _ => self.children(element),
        }

        self.styles.pop();
    }

    fn link(&mut self, element: &Element) {
        self.children(element);
        if let Some(href) = element.attr("href").filter(|href| !href.trim().is_empty()) {
            self.links.push(href.trim().to_string());
            let reference = format!("[{}]", self.links.len());
            self.push_atomic(&reference, STYLE_LINK_REF);
        }
    }

    fn image(&mut self, element: &Element) {
        self.block_start(element);
        let alt = element
            .attr("alt")
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .unwrap_or("image");
        self.push_atomic(&format!("[image: {}]", alt), STYLE_IMAGE);
        if let Some(src) = element.attr("src").filter(|src| !src.trim().is_empty()) {
            self.links.push(src.trim().to_string());
            let reference = format!("[{}]", self.links.len());
            self.push_atomic(&reference, STYLE_LINK_REF);
        }
        self.block_end(element);
    }
}

fn list_start(element: &Element) -> u32 {
    element
        .attr("start")
        .and_then(|start| start.trim().parse().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{parse_fragment, style_fragment};

    fn render(html: &str, width: u16) -> RenderedArticle {
        render_fragment(&style_fragment(parse_fragment(html)), width)
    }

    fn text_lines(article: &RenderedArticle) -> Vec<String> {
        article
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let article = render("<p>First para.</p><p>Second para.</p>", 40);
        assert_eq!(text_lines(&article), vec!["First para.", "", "Second para."]);
    }

    #[test]
    fn test_word_wrapping() {
        let article = render("<p>one two three four five six</p>", 10);
        let lines = text_lines(&article);
        assert_eq!(lines, vec!["one two", "three four", "five six"]);
        assert!(lines.iter().all(|line| line.width() <= 10));
    }

    #[test]
    fn test_long_word_is_split() {
        let article = render("<p>abcdefghijklmnopqrstuvwxyz</p>", 10);
        assert_eq!(
            text_lines(&article),
            vec!["abcdefghij", "klmnopqrst", "uvwxyz"]
        );
    }

    #[test]
    fn test_heading_style_and_margin() {
        let article = render("<p>intro</p><h2>Title</h2><p>body</p>", 40);
        assert_eq!(
            text_lines(&article),
            vec!["intro", "", "Title", "", "body"]
        );
        let heading = &article.lines[2].spans[0];
        assert_eq!(heading.style.fg, Some(ratatui::style::Color::Cyan));
    }

    #[test]
    fn test_lists() {
        let article = render("<ul><li>alpha</li><li>beta</li></ul><ol start=\"3\"><li>x</li><li>y</li></ol>", 40);
        assert_eq!(
            text_lines(&article),
            vec!["  • alpha", "  • beta", "", "  3. x", "  4. y"]
        );
    }

    #[test]
    fn test_links_collected_with_references() {
        let article = render(
            r#"<p>See <a href="https://a.test">this</a> and <a href="https://b.test">that</a>.</p>"#,
            60,
        );
        assert_eq!(text_lines(&article), vec!["See this[1] and that[2]."]);
        assert_eq!(article.links, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_blockquote_prefix() {
        let article = render("<blockquote>quoted words</blockquote>", 40);
        assert_eq!(text_lines(&article), vec!["│ quoted words"]);
    }

    #[test]
    fn test_preformatted_keeps_lines() {
        let article = render("<pre>fn main() {\n    run();\n}</pre>", 40);
        assert_eq!(
            text_lines(&article),
            vec!["fn main() {", "    run();", "}"]
        );
    }

    #[test]
    fn test_table_rows() {
        let article = render(
            "<table><tr><th>Pair</th><th>Rate</th></tr><tr><td>EUR/USD</td><td>1.08</td></tr></table>",
            40,
        );
        assert_eq!(
            text_lines(&article),
            vec!["Pair │ Rate", "EUR/USD │ 1.08"]
        );
    }

    #[test]
    fn test_image_line() {
        let article = render(r#"<img src="https://cdn.test/c.png" alt="Chart">"#, 40);
        assert_eq!(text_lines(&article), vec!["[image: Chart][1]"]);
        assert_eq!(article.links, vec!["https://cdn.test/c.png"]);
    }

    #[test]
    fn test_scripts_never_rendered() {
        let article = render("<p>safe</p><script>alert('x')</script>", 40);
        assert_eq!(text_lines(&article), vec!["safe"]);
    }

    #[test]
    fn test_br_and_inline_whitespace() {
        let article = render("<p>a<br>b <b>bold</b> c</p>", 40);
        assert_eq!(text_lines(&article), vec!["a", "b bold c"]);
    }
}
