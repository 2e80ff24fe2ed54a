//! Terminal styles keyed off the presentation classes the styler injects.

use ratatui::style::{Color, Modifier, Style};

use super::dom::Element;

pub const STYLE_HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

pub const STYLE_CODE_BLOCK: Style = Style::new().fg(Color::Gray).bg(Color::Rgb(30, 30, 38));

pub const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

pub const STYLE_LINK: Style = Style::new()
    .fg(Color::Blue)
    .add_modifier(Modifier::UNDERLINED);

pub const STYLE_LINK_REF: Style = Style::new().fg(Color::DarkGray);

pub const STYLE_QUOTE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC);

pub const STYLE_QUOTE_BAR: Style = Style::new().fg(Color::DarkGray);

pub const STYLE_IMAGE: Style = Style::new().fg(Color::Magenta);

pub const STYLE_TABLE_BORDER: Style = Style::new().fg(Color::DarkGray);

/// Blank line before the element (`mt-*`, `my-*`).
pub fn has_top_margin(element: &Element) -> bool {
    element
        .classes()
        .iter()
        .any(|class| class.starts_with("mt-") || class.starts_with("my-"))
}

/// Blank line after the element (`mb-*`, `my-*`).
pub fn has_bottom_margin(element: &Element) -> bool {
    element
        .classes()
        .iter()
        .any(|class| class.starts_with("mb-") || class.starts_with("my-"))
}

/// Style contributed by an element's tag and presentation classes.
pub fn element_style(element: &Element) -> Style {
    let classes = element.classes();
    let has = |class: &str| classes.contains(&class);

    let mut style = match element.name.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => STYLE_HEADING,
        "strong" | "b" => Style::new().add_modifier(Modifier::BOLD),
        "em" | "i" | "cite" => Style::new().add_modifier(Modifier::ITALIC),
        "u" | "ins" => Style::new().add_modifier(Modifier::UNDERLINED),
        "s" | "strike" | "del" => Style::new().add_modifier(Modifier::CROSSED_OUT),
        "th" => Style::new().add_modifier(Modifier::BOLD),
        _ => Style::new(),
    };

    if has("text-primary") {
        style = style.patch(STYLE_LINK);
    }
    if has("blockquote") {
        style = style.patch(STYLE_QUOTE);
    }
    if has("bg-light") {
        let code = if element.name == "pre" {
            STYLE_CODE_BLOCK
        } else {
            STYLE_INLINE_CODE
        };
        style = style.patch(code);
    }
    if element.name == "h1" {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_class(name: &str, class: &str) -> Element {
        let mut element = Element::new(name);
        element.set_attr("class", class);
        element
    }

    #[test]
    fn test_margins_from_classes() {
        assert!(has_top_margin(&with_class("h2", "mt-4 mb-3")));
        assert!(has_bottom_margin(&with_class("p", "mb-3")));
        assert!(has_top_margin(&with_class("pre", "bg-light my-3")));
        assert!(!has_top_margin(&with_class("p", "mb-3")));
        assert!(!has_bottom_margin(&Element::new("p")));
    }

    #[test]
    fn test_element_style_from_classes() {
        assert_eq!(element_style(&with_class("a", "text-primary")), STYLE_LINK);
        assert_eq!(element_style(&Element::new("a")), Style::new());
        assert_eq!(
            element_style(&with_class("code", "bg-light px-2")),
            STYLE_INLINE_CODE
        );
        assert_eq!(
            element_style(&with_class("pre", "bg-light p-3")),
            STYLE_CODE_BLOCK
        );
        assert!(element_style(&Element::new("h3"))
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
