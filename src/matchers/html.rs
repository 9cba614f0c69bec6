//! Structural HTML comparison.

use crate::dom::{Fragment, PageOptions};
use crate::error::Result;
use crate::pretty::prettify_html;
use crate::received::{HtmlLike, Received};
use crate::serialize::{presets, serialize_element, serialize_fragment};
use crate::sink::{AssertionSink, MatchResult};

/// Outcome of comparing received HTML against an expected string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub equal: bool,
    /// The received side, pretty-printed
    pub left_pretty: String,
    /// The expected side, pretty-printed
    pub right_pretty: String,
    pub message: String,
}

impl From<ComparisonResult> for MatchResult {
    fn from(result: ComparisonResult) -> Self {
        MatchResult::new(result.equal, result.message)
    }
}

/// Compare `received` with the `expected` markup, shadow roots included.
pub fn to_equal_html(
    received: &Received<'_>,
    expected: &str,
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    compare("toEqualHtml", received, expected, true, sink).map(Into::into)
}

/// Compare the light DOM of `received` with the `expected` markup.
pub fn to_equal_light_html(
    received: &Received<'_>,
    expected: &str,
    sink: &mut dyn AssertionSink,
) -> Result<MatchResult> {
    compare("toEqualLightHtml", received, expected, false, sink).map(Into::into)
}

/// Serialize and pretty-print both sides and compare them line for line.
///
/// An element is serialized in outer form, a fragment or shadow root in inner
/// form with `<style>` removed, and a string is parsed into a fragment first.
/// On a mismatch the two pretty strings are also checked through
/// [`AssertionSink::expect_str_eq`] so the failure carries a diff.
pub fn compare_html(
    received: &Received<'_>,
    expected: &str,
    serialize_shadow_root: bool,
    sink: &mut dyn AssertionSink,
) -> Result<ComparisonResult> {
    let matcher = if serialize_shadow_root {
        "toEqualHtml"
    } else {
        "toEqualLightHtml"
    };
    compare(matcher, received, expected, serialize_shadow_root, sink)
}

fn compare(
    matcher: &'static str,
    received: &Received<'_>,
    expected: &str,
    serialize_shadow_root: bool,
    sink: &mut dyn AssertionSink,
) -> Result<ComparisonResult> {
    let input = HtmlLike::resolve(received, matcher)?;

    let actual = match input {
        HtmlLike::Element(element) => {
            let remove_comments = element
                .owner_options()
                .is_some_and(PageOptions::remove_comments);
            serialize_element(
                element,
                &presets::element(serialize_shadow_root, remove_comments),
            )
        }
        HtmlLike::Fragment(fragment) => {
            serialize_fragment(fragment, &presets::fragment(serialize_shadow_root))
        }
        HtmlLike::Markup(html) => serialize_fragment(
            &Fragment::parse(html),
            &presets::markup(serialize_shadow_root),
        ),
    };
    let expected = serialize_fragment(
        &Fragment::parse(expected),
        &presets::markup(serialize_shadow_root),
    );

    let left_pretty = prettify_html(&actual);
    let right_pretty = prettify_html(&expected);
    let equal = left_pretty == right_pretty;
    log::debug!(
        "{}: {}",
        matcher,
        if equal { "match" } else { "mismatch" }
    );

    if !equal {
        sink.expect_str_eq(&left_pretty, &right_pretty);
        let message = format!(
            "HTML does not match\n\nexpected:\n{}\n\nreceived:\n{}",
            right_pretty, left_pretty
        );
        return Ok(ComparisonResult {
            equal,
            left_pretty,
            right_pretty,
            message,
        });
    }

    Ok(ComparisonResult {
        equal,
        left_pretty,
        right_pretty,
        message: "expect HTML to match".to_string(),
    })
}
