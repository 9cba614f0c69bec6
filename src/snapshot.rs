//! Snapshot serialization of custom elements.

use crate::dom::{Element, Node};
use crate::pretty::{is_void_element, tokenize, Token};
use crate::serialize::{presets, serialize_element, SerializeOptions};

/// True for nodes the snapshot serializer handles: custom elements, whose
/// tag names always contain a hyphen.
pub fn test(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|element| element.tag_name().contains('-'))
}

/// Pretty-printed `outerHTML` of `element`, shadow root included.
///
/// Attributes keep their document order. Each tag starts a new line, text
/// directly inside an opening tag starts one too, and text that follows a
/// closing tag or comment stays on that line.
pub fn serialize(element: &Element, indent_size: usize) -> String {
    let options = SerializeOptions {
        serialize_shadow_root: true,
        ..presets::dom()
    };
    prettify(&serialize_element(element, &options), indent_size)
}

fn prettify(html: &str, indent_size: usize) -> String {
    let indent = " ".repeat(indent_size);
    let mut out = String::new();
    let mut level = 0usize;
    let mut after_open_tag = false;

    let new_line = |out: &mut String, level: usize| {
        if !out.is_empty() {
            out.push('\n');
            out.push_str(&indent.repeat(level));
        }
    };

    for token in tokenize(html) {
        match token {
            Token::OpenTag {
                name,
                self_closing,
                raw,
                ..
            } => {
                new_line(&mut out, level);
                out.push_str(&raw);
                if !self_closing && !is_void_element(&name) {
                    level += 1;
                }
                after_open_tag = true;
            }
            Token::CloseTag { raw, .. } => {
                level = level.saturating_sub(1);
                new_line(&mut out, level);
                out.push_str(&raw);
                after_open_tag = false;
            }
            Token::Comment { raw } => {
                new_line(&mut out, level);
                out.push_str(&raw);
                after_open_tag = false;
            }
            Token::Text { content } => {
                let text = content.trim();
                if text.is_empty() {
                    continue;
                }
                if after_open_tag {
                    new_line(&mut out, level);
                }
                out.push_str(text);
                after_open_tag = false;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_custom_elements() {
        assert!(test(&Element::new("my-button").into()));
        assert!(!test(&Element::new("button").into()));
        assert!(!test(&Node::Text("my-button".into())));
    }

    #[test]
    fn test_serialize() {
        let el = Element::new("my-button")
            .with_attribute("variant", "primary")
            .with_shadow_root(vec![Element::new("button")
                .with_child(Element::new("slot"))
                .into()])
            .with_text("Go");
        assert_eq!(
            serialize(&el, 2),
            "<my-button variant=\"primary\">\n  <template shadowrootmode=\"open\">\n    <button>\n      <slot>\n      </slot>\n    </button>\n  </template>Go\n</my-button>"
        );
    }

    #[test]
    fn test_serialize_keeps_raw_attributes() {
        let el = Element::new("x-field")
            .with_attribute("name", "email")
            .with_attribute("class", "b a")
            .with_attribute("required", "")
            .with_child(Element::new("input").with_attribute("type", "email"))
            .with_text("hint");
        assert_eq!(
            serialize(&el, 4),
            "<x-field name=\"email\" class=\"b a\" required=\"\">\n    <input type=\"email\">\n    hint\n</x-field>"
        );
    }

    #[test]
    fn test_text_after_comment_stays_on_line() {
        let el = Element::new("x-note")
            .with_child(Node::Comment(" c ".into()))
            .with_text("text");
        assert_eq!(serialize(&el, 2), "<x-note>\n  <!-- c -->text\n</x-note>");
    }
}
