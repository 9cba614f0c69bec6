//! A small mock DOM used as the tree provider for the matchers.
//!
//! Only the parts of the DOM that the matchers read are modelled: elements
//! with ordered attributes and a class list, shadow roots, document fragments,
//! text and comment nodes, and a document that carries test-page options.

use crate::serialize::{self, presets};
use ego_tree::NodeRef;
use scraper::{Html, Node as HtmlNode};
use std::sync::Arc;

/// Numeric node-type discriminator, using the DOM's constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    DocumentFragment = 11,
}

/// Options a test page was created with. Elements created through a
/// [`Document`] can reach these through [`Element::owner_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// `Some(false)` removes comments when an element is serialized for comparison
    pub include_annotations: Option<bool>,
}

impl PageOptions {
    pub fn remove_comments(&self) -> bool {
        self.include_annotations == Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Any node that can be a child of an element or fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Element(_) => NodeType::Element,
            Node::Text(_) => NodeType::Text,
            Node::Comment(_) => NodeType::Comment,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
            Node::Comment(_) => {}
        }
    }

    fn set_owner(&mut self, owner: &Arc<PageOptions>) {
        if let Node::Element(element) = self {
            element.set_owner(owner);
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    DocumentFragment,
    ShadowRoot,
}

/// A document fragment or a shadow root: a container whose own tag is never
/// serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    kind: FragmentKind,
    children: Vec<Node>,
}

impl Fragment {
    pub fn new(kind: FragmentKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Parse an HTML string into a document fragment.
    ///
    /// A `<template shadowrootmode>` child becomes the shadow root of its host
    /// element instead of a child of it.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_fragment(&mark_shadow_templates(html));
        let children = convert_children(*document.root_element());
        log::trace!("parsed fragment with {} top-level nodes", children.len());
        Self {
            kind: FragmentKind::DocumentFragment,
            children,
        }
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::DocumentFragment
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn append_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn first_element_child(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn inner_html(&self) -> String {
        serialize::serialize_fragment(self, &presets::dom())
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag_name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    shadow_root: Option<Fragment>,
    owner: Option<Arc<PageOptions>>,
}

impl Element {
    /// Create a detached element. Tag names are stored lower-cased.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
            shadow_root: None,
            owner: None,
        }
    }

    /// Builder method: set an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder method: append a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append_child(child);
        self
    }

    /// Builder method: append a text node
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Builder method: attach a shadow root holding the given nodes
    pub fn with_shadow_root(mut self, children: Vec<Node>) -> Self {
        let shadow = self.attach_shadow();
        for child in children {
            shadow.append_child(child);
        }
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Element
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|attr| attr.name != name);
    }

    /// The `class` attribute value, or an empty string.
    pub fn class_name(&self) -> &str {
        self.get_attribute("class").unwrap_or("")
    }

    /// Class tokens in document order, without duplicates.
    pub fn class_list(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = Vec::new();
        for class in self.class_name().split_whitespace() {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        classes
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class_name)
    }

    pub fn add_class(&mut self, class_name: &str) {
        if self.has_class(class_name) {
            return;
        }
        let mut classes = self.class_list().join(" ");
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class_name);
        self.set_attribute("class", classes);
    }

    pub fn remove_class(&mut self, class_name: &str) {
        if !self.has_class(class_name) {
            return;
        }
        let classes: Vec<&str> = self
            .class_list()
            .into_iter()
            .filter(|c| *c != class_name)
            .collect();
        let classes = classes.join(" ");
        self.set_attribute("class", classes);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        let mut child = child.into();
        if let Some(owner) = &self.owner {
            child.set_owner(owner);
        }
        self.children.push(child);
    }

    pub fn first_element_child(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Attach an open shadow root, or return the existing one.
    pub fn attach_shadow(&mut self) -> &mut Fragment {
        self.shadow_root
            .get_or_insert_with(|| Fragment::new(FragmentKind::ShadowRoot))
    }

    pub fn shadow_root(&self) -> Option<&Fragment> {
        self.shadow_root.as_ref()
    }

    /// Options of the document that owns this element, if any.
    pub fn owner_options(&self) -> Option<&PageOptions> {
        self.owner.as_deref()
    }

    /// Concatenated light-DOM text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn outer_html(&self) -> String {
        serialize::serialize_element(self, &presets::dom())
    }

    pub fn inner_html(&self) -> String {
        let options = serialize::SerializeOptions {
            outer_html: false,
            ..presets::dom()
        };
        serialize::serialize_element(self, &options)
    }

    fn set_owner(&mut self, owner: &Arc<PageOptions>) {
        self.owner = Some(Arc::clone(owner));
        for child in &mut self.children {
            child.set_owner(owner);
        }
        if let Some(shadow) = &mut self.shadow_root {
            for child in &mut shadow.children {
                child.set_owner(owner);
            }
        }
    }
}

/// A mock document: page options plus a `<body>` holding the rendered tree.
#[derive(Debug, Clone)]
pub struct Document {
    options: Arc<PageOptions>,
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(PageOptions::default())
    }
}

impl Document {
    pub fn new(options: PageOptions) -> Self {
        let options = Arc::new(options);
        let mut body = Element::new("body");
        body.set_owner(&options);
        Self { options, body }
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Create an element owned by this document.
    pub fn create_element(&self, tag_name: impl Into<String>) -> Element {
        let mut element = Element::new(tag_name);
        element.set_owner(&self.options);
        element
    }

    /// Make `element` and its subtree owned by this document.
    pub fn adopt(&self, element: &mut Element) {
        element.set_owner(&self.options);
    }

    /// Replace the body content with the parsed `html`.
    pub fn set_body_html(&mut self, html: &str) {
        let mut children = Fragment::parse(html).children;
        for child in &mut children {
            child.set_owner(&self.options);
        }
        self.body.children = children;
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.body.append_child(child);
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    /// The first element rendered into the body.
    pub fn root(&self) -> Option<&Element> {
        self.body.first_element_child()
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.body.children.iter_mut().find_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }
}

const SHADOW_ROOT_MODE: &str = "shadowrootmode";

/// Stands in for `shadowrootmode` while parsing, so the parser keeps the
/// `<template>` in the tree rather than consuming it.
const SHADOW_ROOT_MARKER: &str = "data-declared-shadowrootmode";

/// Rename `shadowrootmode` on every `<template>` start tag to the marker.
fn mark_shadow_templates(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len() + 16);
    let mut copied = 0;
    let mut search = 0;

    while let Some(found) = lower[search..].find("<template") {
        let start = search + found;
        let end = lower[start..].find('>').map_or(lower.len(), |i| start + i);
        let is_template = lower[start + "<template".len()..]
            .starts_with(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/');
        if let Some(attr) = lower[start..end]
            .find(SHADOW_ROOT_MODE)
            .filter(|_| is_template)
        {
            let attr = start + attr;
            out.push_str(&html[copied..attr]);
            out.push_str(SHADOW_ROOT_MARKER);
            copied = attr + SHADOW_ROOT_MODE.len();
        }
        search = end;
    }
    out.push_str(&html[copied..]);
    out
}

fn is_shadow_template(node: &Node) -> bool {
    node.as_element().is_some_and(|element| {
        element.tag_name == "template" && element.has_attribute(SHADOW_ROOT_MODE)
    })
}

/// Convert the children of a parsed scraper node into mock nodes.
fn convert_children(parent: NodeRef<HtmlNode>) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        match child.value() {
            HtmlNode::Element(el) => {
                let mut element = Element::new(el.name());
                for (name, value) in el.attrs() {
                    let name = if name == SHADOW_ROOT_MARKER {
                        SHADOW_ROOT_MODE
                    } else {
                        name
                    };
                    element.attributes.push(Attribute::new(name, value));
                }
                element.children = convert_children(child);
                // only the first declared shadow root attaches
                if let Some(pos) = element.children.iter().position(is_shadow_template) {
                    if let Node::Element(template) = element.children.remove(pos) {
                        element.attach_shadow().children = template.children;
                    }
                }
                nodes.push(Node::Element(element));
            }
            HtmlNode::Text(text) => nodes.push(Node::Text(String::from(&**text))),
            HtmlNode::Comment(comment) => nodes.push(Node::Comment(String::from(&**comment))),
            // template contents hang off a fragment node
            HtmlNode::Fragment => nodes.extend(convert_children(child)),
            _ => {}
        }
    }
    nodes
}
