use crate::error::Result;
use crate::received::Received;
use crate::sink::MatchResult;
use super::not;

pub fn to_have_class(received: &Received<'_>, class_name: &str) -> Result<MatchResult> {
    let element = received.element("toHaveClass")?;
    let pass = element.has_class(class_name);
    Ok(MatchResult::new(
        pass,
        format!("expected to {}have css class \"{}\"", not(pass), class_name),
    ))
}

/// Pass when every class in `class_names` is present.
pub fn to_have_classes(received: &Received<'_>, class_names: &[&str]) -> Result<MatchResult> {
    let element = received.element("toHaveClasses")?;
    let pass = class_names.iter().all(|name| element.has_class(name));
    Ok(MatchResult::new(
        pass,
        format!(
            "expected to {}have css classes \"{}\", but className is \"{}\"",
            not(pass),
            class_names.join(" "),
            element.class_name()
        ),
    ))
}

/// Pass when the element has exactly the classes in `class_names`, in any order.
pub fn to_match_classes(received: &Received<'_>, class_names: &[&str]) -> Result<MatchResult> {
    let element = received.element("toMatchClasses")?;
    let pass = class_names.iter().all(|name| element.has_class(name))
        && class_names.len() == element.class_list().len();
    Ok(MatchResult::new(
        pass,
        format!(
            "expected to {}match css classes \"{}\", but className is \"{}\"",
            not(pass),
            class_names.join(" "),
            element.class_name()
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::error::MatcherError;

    fn button() -> Element {
        Element::new("button").with_attribute("class", "btn btn--primary  active")
    }

    #[test]
    fn test_have_class() {
        let el = button();
        let result = to_have_class(&(&el).into(), "active").unwrap();
        assert!(result.pass);
        assert_eq!(result.message, "expected to not have css class \"active\"");
        assert!(!to_have_class(&(&el).into(), "btn--").unwrap().pass);
    }

    #[test]
    fn test_have_classes() {
        let el = button();
        assert!(to_have_classes(&(&el).into(), &["active", "btn"]).unwrap().pass);
        let result = to_have_classes(&(&el).into(), &["btn", "disabled"]).unwrap();
        assert!(!result.pass);
        assert_eq!(
            result.message,
            "expected to have css classes \"btn disabled\", but className is \"btn btn--primary  active\""
        );
    }

    #[test]
    fn test_match_classes() {
        let el = button();
        assert!(to_match_classes(&(&el).into(), &["active", "btn--primary", "btn"]).unwrap().pass);
        assert!(!to_match_classes(&(&el).into(), &["active", "btn"]).unwrap().pass);
        let bare = Element::new("div");
        assert!(to_match_classes(&(&bare).into(), &[]).unwrap().pass);
    }

    #[test]
    fn test_requires_element() {
        assert!(matches!(
            to_have_class(&"<div class='a'></div>".into(), "a"),
            Err(MatcherError::WrongKind { .. })
        ));
        assert_eq!(
            to_have_classes(&Received::Null, &["a"]).unwrap_err(),
            MatcherError::NullInput {
                matcher: "toHaveClasses"
            }
        );
        assert!(matches!(
            to_match_classes(&Received::Pending, &["a"]),
            Err(MatcherError::Pending { .. })
        ));
    }
}
