//! The matchers and the registry that maps matcher names to them.

pub mod attribute;
pub mod class;
pub mod events;
pub mod html;
pub mod text;

pub use attribute::{to_equal_attribute, to_equal_attributes, to_have_attribute};
pub use class::{to_have_class, to_have_classes, to_match_classes};
pub use events::{
    to_have_first_received_event_detail, to_have_last_received_event_detail,
    to_have_nth_received_event_detail, to_have_received_event, to_have_received_event_detail,
    to_have_received_event_times,
};
pub use html::{compare_html, to_equal_html, to_equal_light_html, ComparisonResult};
pub use text::to_equal_text;

use crate::detail::Detail;
use crate::error::{MatcherError, Result};
use crate::received::Received;
use crate::sink::{AssertionSink, MatchResult};
use std::collections::BTreeMap;
use std::fmt;

/// A matcher as stored in the registry: the value under test, the remaining
/// arguments, and the sink used for nested assertions.
pub type MatcherFn = fn(&Received<'_>, &[Detail], &mut dyn AssertionSink) -> Result<MatchResult>;

/// Table of matchers by name.
///
/// Nothing is registered implicitly: build one with
/// [`MatcherRegistry::with_defaults`] at start-up, then add custom matchers
/// with [`MatcherRegistry::register`].
#[derive(Clone, Default)]
pub struct MatcherRegistry {
    matchers: BTreeMap<&'static str, MatcherFn>,
}

impl fmt::Debug for MatcherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl MatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in matcher.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("toEqualHtml", equal_html);
        registry.register("toEqualLightHtml", equal_light_html);
        registry.register("toEqualText", equal_text);
        registry.register("toHaveAttribute", have_attribute);
        registry.register("toEqualAttribute", equal_attribute);
        registry.register("toEqualAttributes", equal_attributes);
        registry.register("toHaveClass", have_class);
        registry.register("toHaveClasses", have_classes);
        registry.register("toMatchClasses", match_classes);
        registry.register("toHaveReceivedEvent", received_event);
        registry.register("toHaveReceivedEventTimes", received_event_times);
        registry.register("toHaveReceivedEventDetail", received_event_detail);
        registry.register("toHaveFirstReceivedEventDetail", first_received_event_detail);
        registry.register("toHaveLastReceivedEventDetail", last_received_event_detail);
        registry.register("toHaveNthReceivedEventDetail", nth_received_event_detail);
        log::trace!("registered {} matchers", registry.len());
        registry
    }

    /// Add or replace a matcher, returning the one it replaced.
    pub fn register(&mut self, name: &'static str, matcher: MatcherFn) -> Option<MatcherFn> {
        self.matchers.insert(name, matcher)
    }

    pub fn get(&self, name: &str) -> Option<MatcherFn> {
        self.matchers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matchers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matchers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Run a matcher and return its result without reporting it.
    pub fn evaluate(
        &self,
        name: &str,
        received: &Received<'_>,
        args: &[Detail],
        sink: &mut dyn AssertionSink,
    ) -> Result<MatchResult> {
        let matcher = self
            .get(name)
            .ok_or_else(|| MatcherError::UnknownMatcher(name.to_string()))?;
        matcher(received, args, sink)
    }

    /// Run a matcher and report `pass != negated` to the sink.
    ///
    /// Matchers that make nested assertions (`toEqualHtml`, `toEqualLightHtml`
    /// and the event-detail matchers) report those to the same sink first,
    /// and the nested report fails on any mismatch whatever `negated` says.
    /// A negated assertion on such a matcher should therefore use a sink
    /// that records rather than panics, the way `assert_html_ne!` does.
    pub fn assert(
        &self,
        name: &str,
        received: &Received<'_>,
        args: &[Detail],
        negated: bool,
        sink: &mut dyn AssertionSink,
    ) -> Result<MatchResult> {
        let result = self.evaluate(name, received, args, sink)?;
        sink.report(result.pass != negated, &|| result.message.clone());
        Ok(result)
    }
}

static UNDEFINED: Detail = Detail::Undefined;

/// Messages are written for the `.not` case when the match passed.
fn not(pass: bool) -> &'static str {
    if pass {
        "not "
    } else {
        ""
    }
}

fn arg_detail(args: &[Detail], position: usize) -> &Detail {
    args.get(position).unwrap_or(&UNDEFINED)
}

fn arg_str<'a>(args: &'a [Detail], position: usize, matcher: &'static str) -> Result<&'a str> {
    match args.get(position) {
        Some(Detail::String(value)) => Ok(value),
        _ => Err(MatcherError::InvalidArgument {
            matcher,
            position,
            expected: "a string",
        }),
    }
}

fn arg_strings<'a>(
    args: &'a [Detail],
    position: usize,
    matcher: &'static str,
) -> Result<Vec<&'a str>> {
    let invalid = MatcherError::InvalidArgument {
        matcher,
        position,
        expected: "an array of strings",
    };
    match args.get(position) {
        Some(Detail::Array(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(|| invalid.clone()))
            .collect(),
        _ => Err(invalid),
    }
}

fn arg_index(args: &[Detail], position: usize, matcher: &'static str) -> Result<usize> {
    match args.get(position).and_then(Detail::as_f64) {
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 => Ok(n as usize),
        _ => Err(MatcherError::InvalidArgument {
            matcher,
            position,
            expected: "a non-negative integer",
        }),
    }
}

/// An expected attribute value: nullish means absent, anything else is stringified.
fn attribute_value(value: &Detail) -> Option<String> {
    if value.is_nullish() {
        None
    } else {
        Some(value.to_js_string())
    }
}

fn equal_html(
    received: &Received<'_>,
    args: &[Detail],
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_equal_html(received, arg_str(args, 0, "toEqualHtml")?, sink)
}

fn equal_light_html(
    received: &Received<'_>,
    args: &[Detail],
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_equal_light_html(received, arg_str(args, 0, "toEqualLightHtml")?, sink)
}

fn equal_text(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_equal_text(received, arg_str(args, 0, "toEqualText")?)
}

fn have_attribute(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_attribute(received, arg_str(args, 0, "toHaveAttribute")?)
}

fn equal_attribute(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    let name = arg_str(args, 0, "toEqualAttribute")?;
    let value = attribute_value(arg_detail(args, 1));
    to_equal_attribute(received, name, value.as_deref())
}

fn equal_attributes(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    let expected: Vec<(&str, Option<String>)> = match args.first() {
        Some(Detail::Object(entries)) => entries
            .iter()
            .map(|(name, value)| (name.as_str(), attribute_value(value)))
            .collect(),
        _ => {
            return Err(MatcherError::InvalidArgument {
                matcher: "toEqualAttributes",
                position: 0,
                expected: "an object of attribute values",
            })
        }
    };
    let expected: Vec<(&str, Option<&str>)> = expected
        .iter()
        .map(|(name, value)| (*name, value.as_deref()))
        .collect();
    to_equal_attributes(received, &expected)
}

fn have_class(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_class(received, arg_str(args, 0, "toHaveClass")?)
}

fn have_classes(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_classes(received, &arg_strings(args, 0, "toHaveClasses")?)
}

fn match_classes(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_match_classes(received, &arg_strings(args, 0, "toMatchClasses")?)
}

fn received_event(
    received: &Received<'_>,
    _: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_received_event(received)
}

fn received_event_times(
    received: &Received<'_>,
    args: &[Detail],
    _: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_received_event_times(received, arg_index(args, 0, "toHaveReceivedEventTimes")?)
}

fn received_event_detail(
    received: &Received<'_>,
    args: &[Detail],
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_received_event_detail(received, arg_detail(args, 0), sink)
}

fn first_received_event_detail(
    received: &Received<'_>,
    args: &[Detail],
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_first_received_event_detail(received, arg_detail(args, 0), sink)
}

fn last_received_event_detail(
    received: &Received<'_>,
    args: &[Detail],
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    to_have_last_received_event_detail(received, arg_detail(args, 0), sink)
}

fn nth_received_event_detail(
    received: &Received<'_>,
    args: &[Detail],
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    let index = arg_index(args, 0, "toHaveNthReceivedEventDetail")?;
    to_have_nth_received_event_detail(received, index, arg_detail(args, 1), sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::sink::RecordingSink;
    use crate::spy::EventSpy;
    use serde_json::json;

    #[test]
    fn test_defaults_are_registered() {
        let registry = MatcherRegistry::with_defaults();
        assert_eq!(registry.len(), 15);
        assert!(registry.contains("toEqualHtml"));
        assert!(registry.contains("toHaveNthReceivedEventDetail"));
        assert!(MatcherRegistry::new().is_empty());
        assert!(registry.names().all(|name| name.starts_with("to")));
    }

    #[test]
    fn test_assert_reports_through_sink() {
        let registry = MatcherRegistry::with_defaults();
        let el = Element::new("div").with_attribute("class", "a b");
        let mut sink = RecordingSink::new();

        let result = registry
            .assert("toHaveClass", &(&el).into(), &[Detail::from("a")], false, &mut sink)
            .unwrap();
        assert!(result.pass);

        registry
            .assert("toHaveClass", &(&el).into(), &[Detail::from("a")], true, &mut sink)
            .unwrap();
        registry
            .assert(
                "toMatchClasses",
                &(&el).into(),
                &[Detail::from(vec!["b", "a"])],
                false,
                &mut sink,
            )
            .unwrap();

        let passed: Vec<bool> = sink.reports().iter().map(|r| r.passed).collect();
        assert_eq!(passed, vec![true, false, true]);
        assert_eq!(
            sink.reports()[1].message,
            "expected to not have css class \"a\""
        );
    }

    #[test]
    fn test_argument_conversion() {
        let registry = MatcherRegistry::with_defaults();
        let el = Element::new("input")
            .with_attribute("maxlength", "10")
            .with_attribute("checked", "true");
        let mut sink = RecordingSink::new();

        let result = registry
            .evaluate(
                "toEqualAttribute",
                &(&el).into(),
                &[Detail::from("maxlength"), Detail::from(10)],
                &mut sink,
            )
            .unwrap();
        assert!(result.pass);

        let attrs = Detail::from(json!({"maxlength": 10, "checked": true, "name": null}));
        let result = registry
            .evaluate("toEqualAttributes", &(&el).into(), &[attrs], &mut sink)
            .unwrap();
        assert!(result.pass, "{}", result.message);

        let mut spy = EventSpy::new("change");
        spy.record(json!({"value": "a"}));
        spy.record(json!({"value": "b"}));
        let result = registry
            .evaluate(
                "toHaveNthReceivedEventDetail",
                &(&spy).into(),
                &[Detail::from(1), Detail::from(json!({"value": "b"}))],
                &mut sink,
            )
            .unwrap();
        assert!(result.pass);
        assert!(registry
            .evaluate("toHaveReceivedEventTimes", &(&spy).into(), &[Detail::from(2)], &mut sink)
            .unwrap()
            .pass);
    }

    #[test]
    fn test_negated_assert_keeps_nested_report() {
        let registry = MatcherRegistry::with_defaults();
        let el = Element::new("p").with_text("a");
        let mut sink = RecordingSink::new();

        let result = registry
            .assert(
                "toEqualHtml",
                &(&el).into(),
                &[Detail::from("<p>b</p>")],
                true,
                &mut sink,
            )
            .unwrap();
        assert!(!result.pass);

        let passed: Vec<bool> = sink.reports().iter().map(|r| r.passed).collect();
        assert_eq!(passed, vec![false, true]);
    }

    #[test]
    fn test_large_number_attribute() {
        let registry = MatcherRegistry::with_defaults();
        let el = Element::new("x-counter").with_attribute("max", "100000000000000000000");
        let mut sink = RecordingSink::new();

        let result = registry
            .evaluate(
                "toEqualAttribute",
                &(&el).into(),
                &[Detail::from("max"), Detail::from(1e20)],
                &mut sink,
            )
            .unwrap();
        assert!(result.pass, "{}", result.message);
    }

    #[test]
    fn test_registry_errors() {
        let registry = MatcherRegistry::with_defaults();
        let mut sink = RecordingSink::new();
        let el = Element::new("div");

        let err = registry
            .evaluate("toBeVisible", &(&el).into(), &[], &mut sink)
            .unwrap_err();
        assert_eq!(err, MatcherError::UnknownMatcher("toBeVisible".to_string()));
        assert!(!err.is_invalid_input());

        let err = registry
            .evaluate("toHaveClass", &(&el).into(), &[Detail::from(1)], &mut sink)
            .unwrap_err();
        assert!(matches!(err, MatcherError::InvalidArgument { position: 0, .. }));

        let err = registry
            .evaluate("toHaveReceivedEventTimes", &(&el).into(), &[Detail::from(-1)], &mut sink)
            .unwrap_err();
        assert!(matches!(err, MatcherError::InvalidArgument { .. }));

        let err = registry
            .assert("toEqualHtml", &Received::Pending, &[Detail::from("<p></p>")], false, &mut sink)
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_custom_matcher() {
        fn to_be_custom_element(
            received: &Received<'_>,
            _: &[Detail],
            _: &mut dyn AssertionSink,
        ) -> Result<MatchResult> {
            let element = received.element("toBeCustomElement")?;
            Ok(MatchResult::new(
                element.tag_name().contains('-'),
                "expected a custom element",
            ))
        }

        let mut registry = MatcherRegistry::new();
        assert!(registry
            .register("toBeCustomElement", to_be_custom_element)
            .is_none());
        let el = Element::new("my-cmp");
        let mut sink = RecordingSink::new();
        assert!(registry
            .evaluate("toBeCustomElement", &(&el).into(), &[], &mut sink)
            .unwrap()
            .pass);
    }
}
