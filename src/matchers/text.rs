use crate::error::{MatcherError, Result};
use crate::received::Received;
use crate::sink::MatchResult;
use super::not;

/// Replace every run of two or more whitespace characters with one space, then trim.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();

    let flush = |out: &mut String, run: &mut String| {
        if run.chars().count() > 1 {
            out.push(' ');
        } else {
            out.push_str(run);
        }
        run.clear();
    };

    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
        } else {
            flush(&mut out, &mut run);
            out.push(c);
        }
    }
    flush(&mut out, &mut run);

    out.trim().to_string()
}

/// Compare an element's `textContent`, or a string, with `expected`.
pub fn to_equal_text(received: &Received<'_>, expected: &str) -> Result<MatchResult> {
    received.check_resolved("toEqualText", "element")?;
    let actual = match *received {
        Received::Element(element) => element.text_content(),
        Received::Html(text) => text.to_string(),
        _ => {
            return Err(MatcherError::WrongKind {
                matcher: "toEqualText",
                expected: "an element or string",
            })
        }
    };

    let actual = collapse_whitespace(&actual);
    let expected = collapse_whitespace(expected);
    let pass = actual == expected;
    Ok(MatchResult::new(
        pass,
        format!(
            "expected textContent \"{}\" to {}equal \"{}\"",
            expected,
            not(pass),
            actual
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a   b\tc\n\nd "), "a b\tc d");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_element_text() {
        let title = Element::new("h3")
            .with_text("\n    Important ")
            .with_child(Element::new("em").with_text("  Notice"));
        assert!(to_equal_text(&(&title).into(), "Important Notice").unwrap().pass);

        let result = to_equal_text(&(&title).into(), "Other").unwrap();
        assert!(!result.pass);
        assert_eq!(
            result.message,
            "expected textContent \"Other\" to equal \"Important Notice\""
        );
    }

    #[test]
    fn test_string_text() {
        assert!(to_equal_text(&"  Hello   World ".into(), "Hello World").unwrap().pass);
        assert!(!to_equal_text(&"Hello\nWorld".into(), "Hello World").unwrap().pass);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            to_equal_text(&Received::Null, "x").unwrap_err(),
            MatcherError::NullInput {
                matcher: "toEqualText"
            }
        );
        assert!(to_equal_text(&Received::Pending, "x")
            .unwrap_err()
            .is_invalid_input());
    }
}
