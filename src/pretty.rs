//! Tokenizer and pretty-printer for serialized HTML.
//!
//! Both sides of a comparison go through [`prettify_html`] so that a textual
//! diff of the results lines up: one tag, comment or text run per line,
//! indented two spaces per open element.

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Spaces per indentation level used by the comparator.
pub const INDENT_SIZE: usize = 2;

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// A unit of scanned HTML text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenTag {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
        raw: String,
    },
    CloseTag {
        name: String,
        raw: String,
    },
    /// A comment, or another `<!...>` / `<?...>` declaration
    Comment { raw: String },
    Text { content: String },
}

impl Token {
    /// The source text this token was scanned from.
    pub fn raw(&self) -> &str {
        match self {
            Token::OpenTag { raw, .. }
            | Token::CloseTag { raw, .. }
            | Token::Comment { raw } => raw,
            Token::Text { content } => content,
        }
    }
}

/// The token stream of an HTML string after whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFragment {
    tokens: Vec<Token>,
}

impl NormalizedFragment {
    /// Normalize line endings, remove whitespace between `>` and `<`, trim,
    /// and tokenize. Comment tokens are dropped when `strip_comments` is set.
    pub fn new(html: &str, strip_comments: bool) -> Self {
        let cleaned = clean_html(html);
        let mut tokens = tokenize(&cleaned);
        if strip_comments {
            tokens.retain(|token| !matches!(token, Token::Comment { .. }));
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Render one token per line with `indent_size` spaces per nesting level.
    pub fn pretty(&self, indent_size: usize) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.tokens.len());
        let mut level = 0usize;
        let pad = |level: usize| " ".repeat(level * indent_size);

        for token in &self.tokens {
            match token {
                Token::CloseTag { name, raw } => {
                    // a void element was never opened, so there is nothing to close
                    if is_void_element(name) {
                        continue;
                    }
                    level = level.saturating_sub(1);
                    lines.push(pad(level) + raw);
                }
                Token::OpenTag {
                    name,
                    self_closing,
                    raw,
                    ..
                } => {
                    lines.push(pad(level) + raw);
                    if !self_closing && !is_void_element(name) {
                        level += 1;
                    }
                }
                Token::Comment { raw } => lines.push(pad(level) + raw),
                Token::Text { content } => {
                    let text = content.trim();
                    if !text.is_empty() {
                        lines.push(pad(level) + text);
                    }
                }
            }
        }

        lines.join("\n")
    }
}

/// Pretty-print HTML with the comparator's indentation.
pub fn prettify_html(html: &str) -> String {
    prettify_html_with_indent(html, INDENT_SIZE)
}

pub fn prettify_html_with_indent(html: &str, indent_size: usize) -> String {
    NormalizedFragment::new(html, false).pretty(indent_size)
}

/// Normalize line endings, drop whitespace sitting between `>` and `<`, and trim.
pub fn clean_html(html: &str) -> String {
    let html = html.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(html.len());
    let mut rest = html.as_str();
    while let Some(pos) = rest.find('>') {
        out.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('<') {
            rest = trimmed;
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Split HTML text into tag, comment and text tokens.
///
/// A `<` without a later `>` starts plain text that runs to the end.
pub fn tokenize(html: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(body) = rest.strip_prefix("<!--") {
            let end = body.find("-->").map(|i| i + 4 + 3).unwrap_or(rest.len());
            tokens.push(Token::Comment {
                raw: rest[..end].to_string(),
            });
            rest = &rest[end..];
            continue;
        }

        if rest.starts_with('<') {
            match rest.find('>') {
                Some(close) => {
                    tokens.push(scan_tag(&rest[..=close]));
                    rest = &rest[close + 1..];
                }
                None => {
                    tokens.push(Token::Text {
                        content: rest.to_string(),
                    });
                    rest = "";
                }
            }
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        tokens.push(Token::Text {
            content: rest[..end].to_string(),
        });
        rest = &rest[end..];
    }

    tokens
}

/// Classify a `<...>` span.
fn scan_tag(raw: &str) -> Token {
    let inner = &raw[1..raw.len() - 1];

    if let Some(closing) = inner.strip_prefix('/') {
        let (name, _) = scan_name(closing.trim_start());
        return Token::CloseTag {
            name,
            raw: raw.to_string(),
        };
    }

    if inner.starts_with('!') || inner.starts_with('?') {
        return Token::Comment {
            raw: raw.to_string(),
        };
    }

    let self_closing = inner.ends_with('/');
    let body = inner.strip_suffix('/').unwrap_or(inner);
    let (name, len) = scan_name(body);
    Token::OpenTag {
        name,
        attributes: scan_attributes(&body[len..]),
        self_closing,
        raw: raw.to_string(),
    }
}

/// Read a tag name from the start of `s`, returning it lower-cased along with
/// the number of bytes consumed.
fn scan_name(s: &str) -> (String, usize) {
    if !s.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return (String::new(), 0);
    }
    let len = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_' | '.')))
        .unwrap_or(s.len());
    (s[..len].to_ascii_lowercase(), len)
}

fn scan_attributes(s: &str) -> Vec<(String, String)> {
    let mut attributes = Vec::new();
    let mut chars = s.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace() || *c == '/').is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=' && *c != '/') {
            name.push(c);
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if chars.next_if_eq(&'=').is_some() {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.next_if(|c| *c == '"' || *c == '\'') {
                Some(quote) => {
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                None => {
                    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                        value.push(c);
                    }
                }
            }
        }

        if name.is_empty() {
            // a stray `=` with no name in front of it
            continue;
        }
        attributes.push((name, value));
    }

    attributes
}
