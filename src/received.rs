//! What a test hands to a matcher, and the resolved forms the matchers work on.

use crate::dom::{Element, Fragment, Node, NodeType};
use crate::error::{MatcherError, Result};
use crate::spy::EventSpy;
use std::task::Poll;

/// The value under test.
///
/// `Null` and `Pending` exist so that a missing value or a value that has not
/// been awaited yet can be rejected with a clear error instead of being
/// compared. A `Poll::Pending` converts into `Received::Pending`.
#[derive(Debug, Clone, Copy)]
pub enum Received<'a> {
    Null,
    Pending,
    Html(&'a str),
    Element(&'a Element),
    Fragment(&'a Fragment),
    Spy(&'a EventSpy),
    /// A node the matchers cannot take, such as a text or comment node
    Other(NodeType),
}

impl Received<'_> {
    /// True for a value still waiting on an asynchronous computation.
    pub fn is_pending(&self) -> bool {
        matches!(self, Received::Pending)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Received::Null)
    }

    /// Reject null and pending values, in that order.
    pub fn check_resolved(
        &self,
        matcher: &'static str,
        subject: &'static str,
    ) -> Result<()> {
        match self {
            Received::Null => Err(MatcherError::NullInput { matcher }),
            Received::Pending => Err(MatcherError::Pending { subject }),
            _ => Ok(()),
        }
    }

    /// Resolve to an element, the input of the class and attribute matchers.
    pub fn element(&self, matcher: &'static str) -> Result<&Element> {
        self.check_resolved(matcher, "element")?;
        match *self {
            Received::Element(element) => Ok(element),
            _ => Err(MatcherError::WrongKind {
                matcher,
                expected: "an element",
            }),
        }
    }
}

impl<'a> From<&'a str> for Received<'a> {
    fn from(html: &'a str) -> Self {
        Received::Html(html)
    }
}

impl<'a> From<&'a String> for Received<'a> {
    fn from(html: &'a String) -> Self {
        Received::Html(html)
    }
}

impl<'a> From<&'a Element> for Received<'a> {
    fn from(element: &'a Element) -> Self {
        Received::Element(element)
    }
}

impl<'a> From<&'a Fragment> for Received<'a> {
    fn from(fragment: &'a Fragment) -> Self {
        Received::Fragment(fragment)
    }
}

impl<'a> From<&'a EventSpy> for Received<'a> {
    fn from(spy: &'a EventSpy) -> Self {
        Received::Spy(spy)
    }
}

impl<'a> From<&'a Node> for Received<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Element(element) => Received::Element(element),
            other => Received::Other(other.node_type()),
        }
    }
}

impl<'a, T: Into<Received<'a>>> From<Option<T>> for Received<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Received::Null, Into::into)
    }
}

impl<'a, T: Into<Received<'a>>> From<Poll<T>> for Received<'a> {
    fn from(value: Poll<T>) -> Self {
        match value {
            Poll::Ready(value) => value.into(),
            Poll::Pending => Received::Pending,
        }
    }
}

/// Input of the HTML comparator after null/pending/kind checks.
#[derive(Debug, Clone, Copy)]
pub enum HtmlLike<'a> {
    Markup(&'a str),
    Element(&'a Element),
    Fragment(&'a Fragment),
}

impl<'a> HtmlLike<'a> {
    /// Resolve a received value once, before any serialization work.
    pub fn resolve(received: &Received<'a>, matcher: &'static str) -> Result<Self> {
        received.check_resolved(matcher, "element")?;
        match *received {
            Received::Html(html) => Ok(HtmlLike::Markup(html)),
            Received::Element(element) => Ok(HtmlLike::Element(element)),
            Received::Fragment(fragment) => Ok(HtmlLike::Fragment(fragment)),
            _ => Err(MatcherError::WrongKind {
                matcher,
                expected: "an element, shadow root or string",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let el = Element::new("div");
        assert!(matches!(Received::from(&el), Received::Element(_)));
        assert!(matches!(Received::from("<p></p>"), Received::Html(_)));
        assert!(Received::from(None::<&Element>).is_null());
        assert!(Received::from(Poll::<&Element>::Pending).is_pending());
        assert!(matches!(
            Received::from(Poll::Ready(Some(&el))),
            Received::Element(_)
        ));
        let text = Node::Text("x".into());
        assert!(matches!(
            Received::from(&text),
            Received::Other(NodeType::Text)
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        assert_eq!(
            HtmlLike::resolve(&Received::Null, "toEqualHtml").unwrap_err(),
            MatcherError::NullInput {
                matcher: "toEqualHtml"
            }
        );
        assert_eq!(
            HtmlLike::resolve(&Received::Pending, "toEqualHtml").unwrap_err(),
            MatcherError::Pending { subject: "element" }
        );
        assert!(matches!(
            HtmlLike::resolve(&Received::Other(NodeType::Comment), "toEqualHtml"),
            Err(MatcherError::WrongKind { .. })
        ));
    }
}
