//! Matchers for testing rendered custom elements.
//!
//! This crate compares HTML structurally, ignoring differences that don't
//! affect the rendered output: whitespace between tags, attribute order and
//! class order. It also provides element matchers (classes, attributes, text),
//! event-spy matchers with deep payload comparison, and a small mock DOM to
//! run them against.
//!
//! # Example
//! ```ignore
//! use html_test_matchers::{to_equal_html, Element, PanicSink, Received};
//!
//! let mut div = Element::new("div");
//! div.add_class("b");
//! div.add_class("a");
//!
//! let expected = r#"<div class="a b"></div>"#;
//! let result = to_equal_html(&Received::from(&div), expected, &mut PanicSink)?;
//! assert!(result.pass);
//! ```
//!
//! For testing, you can use the provided assertion macros:
//! ```ignore
//! # use html_test_matchers::assert_html_eq;
//! assert_html_eq!(
//!     "<div><p>Hello</p></div>",
//!     "<div>\n  <p>Hello</p>\n</div>"
//! );
//! ```
//!
//! Matchers can also be looked up by name through a [`MatcherRegistry`]:
//! ```ignore
//! use html_test_matchers::{Detail, EventSpy, MatcherRegistry, PanicSink, Received};
//!
//! let registry = MatcherRegistry::with_defaults();
//! let mut spy = EventSpy::new("valueChange");
//! spy.record(serde_json::json!({ "value": "a@b.c" }));
//!
//! registry.assert(
//!     "toHaveReceivedEventDetail",
//!     &Received::from(&spy),
//!     &[Detail::from(serde_json::json!({ "value": "a@b.c" }))],
//!     false,
//!     &mut PanicSink,
//! )?;
//! ```

/// Asserts that the received HTML (a string, element or fragment) is
/// structurally equal to the expected HTML string.
///
/// The optional third argument selects whether shadow roots are serialized
/// (`true`, the default) or only the light DOM is compared (`false`).
///
/// # Examples
/// ```ignore
/// use html_test_matchers::assert_html_eq;
///
/// assert_html_eq!(
///     "<div><p>Hello</p></div>",
///     "<div>\n  <p>Hello</p>\n</div>"
/// );
///
/// // Light DOM only
/// # use html_test_matchers::Element;
/// let card = Element::new("x-card").with_text("light");
/// assert_html_eq!(&card, "<x-card>light</x-card>", false);
/// ```
#[macro_export]
macro_rules! assert_html_eq {
    ($received:expr, $expected:expr $(,)?) => {
        $crate::assert_html_eq!($received, $expected, true)
    };
    ($received:expr, $expected:expr, $serialize_shadow_root:expr $(,)?) => {{
        let received: $crate::Received<'_> = ::core::convert::Into::into($received);
        let expected: &str = &$expected;
        match $crate::compare_html(
            &received,
            expected,
            $serialize_shadow_root,
            &mut $crate::PanicSink,
        ) {
            Ok(result) if result.equal => {}
            Ok(result) => panic!("\nHTML comparison failed:\n{}", result.message),
            Err(err) => panic!("\nHTML comparison failed:\n{}", err),
        }
    }};
}

/// Asserts that the received HTML is not structurally equal to the expected
/// HTML string.
///
/// # Examples
/// ```ignore
/// use html_test_matchers::assert_html_ne;
///
/// assert_html_ne!(
///     "<div><p>Hello</p></div>",
///     "<div><p>Different</p></div>"
/// );
/// ```
#[macro_export]
macro_rules! assert_html_ne {
    ($received:expr, $expected:expr $(,)?) => {
        $crate::assert_html_ne!($received, $expected, true)
    };
    ($received:expr, $expected:expr, $serialize_shadow_root:expr $(,)?) => {{
        let received: $crate::Received<'_> = ::core::convert::Into::into($received);
        let expected: &str = &$expected;
        let mut sink = $crate::RecordingSink::new();
        match $crate::compare_html(&received, expected, $serialize_shadow_root, &mut sink) {
            Ok(result) if !result.equal => {}
            Ok(result) => panic!(
                "\n\
                HTML was equal but expected to be different:\n\n\
                HTML:\n\
                {}\n",
                result.left_pretty
            ),
            Err(err) => panic!("\nHTML comparison failed:\n{}", err),
        }
    }};
}

pub mod detail;
pub mod dom;
pub mod error;
pub mod matchers;
pub mod pretty;
pub mod received;
pub mod serialize;
pub mod sink;
pub mod snapshot;
pub mod spy;

pub use detail::{deep_equal, Detail};
pub use dom::{Attribute, Document, Element, Fragment, FragmentKind, Node, NodeType, PageOptions};
pub use error::{MatcherError, Result};
pub use matchers::{
    compare_html, to_equal_attribute, to_equal_attributes, to_equal_html, to_equal_light_html,
    to_equal_text, to_have_attribute, to_have_class, to_have_classes,
    to_have_first_received_event_detail, to_have_last_received_event_detail,
    to_have_nth_received_event_detail, to_have_received_event, to_have_received_event_detail,
    to_have_received_event_times, to_match_classes, ComparisonResult, MatcherFn, MatcherRegistry,
};
pub use pretty::{prettify_html, NormalizedFragment, Token};
pub use received::{HtmlLike, Received};
pub use sink::{AssertionSink, MatchResult, PanicSink, RecordingSink, Report};
pub use spy::{EventSpy, SpyEvent};
