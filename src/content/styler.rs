//! Script stripping and presentation classes.
//!
//! Scripts and comments are removed before anything else touches the tree. Classes are
//! appended without duplicates, so styling an already-styled fragment
//! changes nothing.

use super::dom::{Element, Fragment, Node};

/// Presentation classes applied to a set of element names.
#[derive(Debug, Clone, Copy)]
pub struct StyleRule {
    pub tags: &'static [&'static str],
    pub classes: &'static [&'static str],
}

pub const STYLE_RULES: &[StyleRule] = &[
    StyleRule {
        tags: &["p"],
        classes: &["mb-3"],
    },
    StyleRule {
        tags: &["h1", "h2", "h3", "h4", "h5", "h6"],
        classes: &["mt-4", "mb-3"],
    },
    StyleRule {
        tags: &["ul", "ol"],
        classes: &["mb-3"],
    },
    StyleRule {
        tags: &["img"],
        classes: &["img-fluid", "my-3", "rounded"],
    },
    StyleRule {
        tags: &["blockquote"],
        classes: &["blockquote", "border-start", "border-4", "ps-4", "my-4"],
    },
    StyleRule {
        tags: &["pre"],
        classes: &["bg-light", "p-3", "rounded", "my-3"],
    },
    StyleRule {
        tags: &["code"],
        classes: &["bg-light", "px-2", "py-1", "rounded"],
    },
    StyleRule {
        tags: &["table"],
        classes: &["table", "table-bordered", "my-3"],
    },
    StyleRule {
        tags: &["a"],
        classes: &["text-primary"],
    },
];

pub const LINK_TARGET: &str = "_blank";
pub const LINK_REL: &str = "noopener noreferrer";

/// Drop every `<script>` element at any depth.
pub fn strip_scripts(fragment: Fragment) -> Fragment {
    Fragment::new(strip_nodes(fragment.children, &|node| {
        matches!(node, Node::Element(element) if element.name == "script")
    }))
}

/// Drop every comment at any depth.
pub fn strip_comments(fragment: Fragment) -> Fragment {
    Fragment::new(strip_nodes(fragment.children, &|node| {
        matches!(node, Node::Comment(_))
    }))
}

fn strip_nodes(nodes: Vec<Node>, drop: &dyn Fn(&Node) -> bool) -> Vec<Node> {
    nodes
        .into_iter()
        .filter(|node| !drop(node))
        .map(|node| match node {
            Node::Element(mut element) => {
                element.children = strip_nodes(std::mem::take(&mut element.children), drop);
                Node::Element(element)
            }
            other => other,
        })
        .collect()
}

/// Apply [`STYLE_RULES`] and safe link attributes. Assumes scripts are gone.
pub fn apply_presentation(fragment: Fragment) -> Fragment {
    let mut fragment = fragment;
    for node in fragment.children.iter_mut() {
        style_node(node);
    }
    fragment
}

fn style_node(node: &mut Node) {
    if let Node::Element(element) = node {
        style_element(element);
        for child in element.children.iter_mut() {
            style_node(child);
        }
    }
}

fn style_element(element: &mut Element) {
    for rule in STYLE_RULES {
        if rule.tags.contains(&element.name.as_str()) {
            element.add_classes(rule.classes);
        }
    }
    if element.name == "a" {
        element.set_attr("target", LINK_TARGET);
        element.set_attr("rel", LINK_REL);
    }
}

/// Strip scripts and comments, then apply presentation.
pub fn style_fragment(fragment: Fragment) -> Fragment {
    apply_presentation(strip_comments(strip_scripts(fragment)))
}
