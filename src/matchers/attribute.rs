use crate::error::Result;
use crate::received::Received;
use crate::sink::MatchResult;
use super::not;

fn quoted(value: Option<&str>) -> String {
    format!("\"{}\"", value.unwrap_or("null"))
}

pub fn to_have_attribute(received: &Received<'_>, name: &str) -> Result<MatchResult> {
    let element = received.element("toHaveAttribute")?;
    let pass = element.has_attribute(name);
    Ok(MatchResult::new(
        pass,
        format!("expected to {}have the attribute \"{}\"", not(pass), name),
    ))
}

/// Compare one attribute value. `None` expects the attribute to be absent.
pub fn to_equal_attribute(
    received: &Received<'_>,
    name: &str,
    expected: Option<&str>,
) -> Result<MatchResult> {
    let element = received.element("toEqualAttribute")?;
    let actual = element.get_attribute(name);
    let pass = actual == expected;
    Ok(MatchResult::new(
        pass,
        format!(
            "expected attribute {} {} to {}equal {}",
            name,
            quoted(expected),
            not(pass),
            quoted(actual)
        ),
    ))
}

/// Compare several attribute values at once.
pub fn to_equal_attributes(
    received: &Received<'_>,
    expected: &[(&str, Option<&str>)],
) -> Result<MatchResult> {
    let element = received.element("toEqualAttributes")?;
    let pass = expected
        .iter()
        .all(|(name, value)| element.get_attribute(name) == *value);
    let listed = expected
        .iter()
        .map(|(name, value)| format!("[{}={}]", name, quoted(*value)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(MatchResult::new(
        pass,
        format!("expected attributes to {}equal {}", not(pass), listed),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Node};
    use crate::error::MatcherError;

    fn input() -> Element {
        Element::new("input")
            .with_attribute("type", "email")
            .with_attribute("aria-invalid", "false")
            .with_attribute("required", "")
    }

    #[test]
    fn test_have_attribute() {
        let el = input();
        assert!(to_have_attribute(&(&el).into(), "required").unwrap().pass);
        let result = to_have_attribute(&(&el).into(), "disabled").unwrap();
        assert!(!result.pass);
        assert_eq!(result.message, "expected to have the attribute \"disabled\"");
    }

    #[test]
    fn test_equal_attribute() {
        let el = input();
        assert!(to_equal_attribute(&(&el).into(), "type", Some("email")).unwrap().pass);
        assert!(to_equal_attribute(&(&el).into(), "placeholder", None).unwrap().pass);

        let result = to_equal_attribute(&(&el).into(), "type", Some("text")).unwrap();
        assert!(!result.pass);
        assert_eq!(result.message, "expected attribute type \"text\" to equal \"email\"");

        let result = to_equal_attribute(&(&el).into(), "name", Some("mail")).unwrap();
        assert_eq!(result.message, "expected attribute name \"mail\" to equal \"null\"");

        let result = to_equal_attribute(&(&el).into(), "type", None).unwrap();
        assert!(!result.pass);
        assert_eq!(result.message, "expected attribute type \"null\" to equal \"email\"");
    }

    #[test]
    fn test_equal_attributes() {
        let el = input();
        let result = to_equal_attributes(
            &(&el).into(),
            &[("type", Some("email")), ("aria-invalid", Some("false"))],
        )
        .unwrap();
        assert!(result.pass);
        assert_eq!(
            result.message,
            "expected attributes to not equal [type=\"email\"], [aria-invalid=\"false\"]"
        );

        assert!(!to_equal_attributes(&(&el).into(), &[("required", None)]).unwrap().pass);
    }

    #[test]
    fn test_requires_element() {
        let comment = Node::Comment("x".into());
        assert!(matches!(
            to_have_attribute(&(&comment).into(), "a"),
            Err(MatcherError::WrongKind { .. })
        ));
        assert!(matches!(
            to_equal_attributes(&Received::Null, &[]),
            Err(MatcherError::NullInput { .. })
        ));
    }
}
