//! HTML serialization of the mock DOM.
//!
//! The same walker produces both the plain `outerHTML` / `innerHTML` strings of
//! the DOM getters and the normalized form fed to the comparator, where
//! attributes are sorted by name and class tokens are sorted.

use crate::dom::{Element, Fragment, Node};
use crate::pretty::is_void_element;
use std::collections::HashSet;

/// Configuration for serializing a node
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Include the element's own tag (`outerHTML`) instead of only its content
    pub outer_html: bool,
    /// Drop comment nodes
    pub remove_comments: bool,
    /// Tags whose own markup is skipped while their children are still written
    pub exclude_tags: HashSet<String>,
    /// Tags skipped together with everything inside them
    pub exclude_tag_content: HashSet<String>,
    /// Write an element's shadow root as a `<template shadowrootmode="open">` child
    pub serialize_shadow_root: bool,
    /// Sort attributes by name, sort class tokens and write empty attributes bare
    pub normalize_attributes: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        presets::dom()
    }
}

/// Option sets used by the DOM getters and the HTML matchers
pub mod presets {
    use super::*;

    fn tags(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    /// Plain `outerHTML`, as a browser would report it
    pub fn dom() -> SerializeOptions {
        SerializeOptions {
            outer_html: true,
            remove_comments: false,
            exclude_tags: HashSet::new(),
            exclude_tag_content: HashSet::new(),
            serialize_shadow_root: false,
            normalize_attributes: false,
        }
    }

    /// An element under test: outer form, `body` wrappers skipped
    pub fn element(serialize_shadow_root: bool, remove_comments: bool) -> SerializeOptions {
        SerializeOptions {
            outer_html: true,
            remove_comments,
            exclude_tags: tags(&["body"]),
            exclude_tag_content: HashSet::new(),
            serialize_shadow_root,
            normalize_attributes: true,
        }
    }

    /// A fragment or shadow root under test: inner form, `<style>` dropped entirely
    pub fn fragment(serialize_shadow_root: bool) -> SerializeOptions {
        SerializeOptions {
            outer_html: false,
            remove_comments: false,
            exclude_tags: tags(&["style"]),
            exclude_tag_content: tags(&["style"]),
            serialize_shadow_root,
            normalize_attributes: true,
        }
    }

    /// A fragment parsed from a markup string
    pub fn markup(serialize_shadow_root: bool) -> SerializeOptions {
        SerializeOptions {
            outer_html: false,
            ..element(serialize_shadow_root, false)
        }
    }
}

/// Serialize an element in outer or inner form depending on `options.outer_html`.
pub fn serialize_element(element: &Element, options: &SerializeOptions) -> String {
    log::trace!(
        "serializing <{}> (outer: {})",
        element.tag_name(),
        options.outer_html
    );
    let mut out = String::new();
    if options.outer_html {
        write_element(element, options, &mut out);
    } else {
        write_contents(element, options, &mut out);
    }
    out
}

/// Serialize the children of a fragment. A fragment has no tag of its own.
pub fn serialize_fragment(fragment: &Fragment, options: &SerializeOptions) -> String {
    let mut out = String::new();
    write_nodes(fragment.children(), options, false, &mut out);
    out
}

fn write_element(element: &Element, options: &SerializeOptions, out: &mut String) {
    let tag = element.tag_name();
    if options.exclude_tag_content.contains(tag) {
        return;
    }
    if options.exclude_tags.contains(tag) {
        write_contents(element, options, out);
        return;
    }

    out.push('<');
    out.push_str(tag);
    write_attributes(element, options, out);
    out.push('>');

    if is_void_element(tag) {
        return;
    }

    write_contents(element, options, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_contents(element: &Element, options: &SerializeOptions, out: &mut String) {
    if options.serialize_shadow_root {
        if let Some(shadow) = element.shadow_root() {
            out.push_str("<template shadowrootmode=\"open\">");
            write_nodes(shadow.children(), options, false, out);
            out.push_str("</template>");
        }
    }
    let raw_text = matches!(element.tag_name(), "script" | "style");
    write_nodes(element.children(), options, raw_text, out);
}

fn write_nodes(nodes: &[Node], options: &SerializeOptions, raw_text: bool, out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(element) => write_element(element, options, out),
            Node::Text(text) if raw_text => out.push_str(text),
            Node::Text(text) => escape_text(text, out),
            Node::Comment(comment) => {
                if !options.remove_comments {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
            }
        }
    }
}

fn write_attributes(element: &Element, options: &SerializeOptions, out: &mut String) {
    let mut attributes: Vec<_> = element.attributes().iter().collect();
    if options.normalize_attributes {
        attributes.sort_by(|a, b| a.name.cmp(&b.name));
    }

    for attr in attributes {
        let value = if options.normalize_attributes && attr.name == "class" {
            let mut classes: Vec<&str> = attr.value.split_whitespace().collect();
            classes.sort_unstable();
            classes.dedup();
            if classes.is_empty() {
                continue;
            }
            classes.join(" ")
        } else {
            attr.value.clone()
        };

        out.push(' ');
        out.push_str(&attr.name);
        if value.is_empty() && options.normalize_attributes {
            continue;
        }
        out.push_str("=\"");
        escape_attribute(&value, out);
        out.push('"');
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FragmentKind;

    fn card() -> Element {
        Element::new("status-card")
            .with_attribute("title", "Hi")
            .with_attribute("class", "z a z")
            .with_shadow_root(vec![Element::new("p").with_text("shadow").into()])
            .with_text("light")
    }

    #[test]
    fn test_dom_outer_html_keeps_attribute_order() {
        let el = Element::new("div")
            .with_attribute("b", "2")
            .with_attribute("a", "")
            .with_text("x < y");
        assert_eq!(el.outer_html(), r#"<div b="2" a="">x &lt; y</div>"#);
        assert_eq!(el.inner_html(), "x &lt; y");
    }

    #[test]
    fn test_normalized_attributes() {
        let el = Element::new("button")
            .with_attribute("type", "submit")
            .with_attribute("disabled", "")
            .with_attribute("class", "  ");
        assert_eq!(
            serialize_element(&el, &presets::element(false, false)),
            r#"<button disabled type="submit"></button>"#
        );
    }

    #[test]
    fn test_shadow_root_serialization() {
        let el = card();
        assert_eq!(
            serialize_element(&el, &presets::element(true, false)),
            r#"<status-card class="a z" title="Hi"><template shadowrootmode="open"><p>shadow</p></template>light</status-card>"#
        );
        assert_eq!(
            serialize_element(&el, &presets::element(false, false)),
            r#"<status-card class="a z" title="Hi">light</status-card>"#
        );
    }

    #[test]
    fn test_excluded_tags() {
        let body = Element::new("body").with_child(Element::new("my-cmp"));
        assert_eq!(
            serialize_element(&body, &presets::element(true, false)),
            "<my-cmp></my-cmp>"
        );

        let mut shadow = Fragment::new(FragmentKind::ShadowRoot);
        shadow.append_child(Element::new("style").with_text(":host { display: block; }"));
        shadow.append_child(Element::new("slot"));
        assert_eq!(
            serialize_fragment(&shadow, &presets::fragment(true)),
            "<slot></slot>"
        );
    }

    #[test]
    fn test_comments_and_void_elements() {
        let el = Element::new("div")
            .with_child(Node::Comment("note".into()))
            .with_child(Element::new("input").with_attribute("type", "email"));
        assert_eq!(
            serialize_element(&el, &presets::element(false, false)),
            r#"<div><!--note--><input type="email"></div>"#
        );
        assert_eq!(
            serialize_element(&el, &presets::element(false, true)),
            r#"<div><input type="email"></div>"#
        );
    }

    #[test]
    fn test_raw_text_and_escaping() {
        let el = Element::new("div")
            .with_attribute("data-q", "say \"hi\" & go")
            .with_child(Element::new("script").with_text("if (a < b) {}"));
        assert_eq!(
            el.outer_html(),
            r#"<div data-q="say &quot;hi&quot; &amp; go"><script>if (a < b) {}</script></div>"#
        );
    }
}
