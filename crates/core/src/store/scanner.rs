//! Tag scanner for documentation sources.
//!
//! Only element structure is checked: tags must balance and documented
//! member elements must carry a `name`. Member bodies are captured as the
//! raw text between the open and close tags.

use once_cell::sync::Lazy;
use regex::Regex;

static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z_:][\w:.\-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub reason: String,
}

struct OpenElement<'a> {
    name: &'a str,
    member: Option<(String, usize)>,
}

pub struct MemberScanner<'a> {
    src: &'a str,
    member_element: &'a str,
    pos: usize,
}

impl<'a> MemberScanner<'a> {
    pub fn new(src: &'a str, member_element: &'a str) -> Self {
        Self {
            src,
            member_element,
            pos: 0,
        }
    }

    /// Every `(name, body)` pair in document order.
    pub fn scan(mut self) -> Result<Vec<(String, String)>, SyntaxError> {
        let src: &'a str = self.src;
        let mut entries = Vec::new();
        let mut stack: Vec<OpenElement<'a>> = Vec::new();

        while let Some(offset) = src[self.pos..].find('<') {
            let start = self.pos + offset;
            let rest = &src[start..];

            if rest.starts_with("<!--") {
                self.pos = self.skip_past(start, "-->", "unterminated comment")?;
            } else if rest.starts_with("<![CDATA[") {
                self.pos = self.skip_past(start, "]]>", "unterminated CDATA section")?;
            } else if rest.starts_with("<?") {
                self.pos = self.skip_past(start, "?>", "unterminated processing instruction")?;
            } else if rest.starts_with("<!") {
                self.pos = self.skip_past(start, ">", "unterminated declaration")?;
            } else if rest.starts_with("</") {
                let end = self.tag_end(start)?;
                let name = src[start + 2..end].trim();
                let open = stack.pop().ok_or_else(|| {
                    self.error_at(start, format!("unexpected closing tag </{}>", name))
                })?;
                if open.name != name {
                    return Err(self.error_at(
                        start,
                        format!("closing tag </{}> does not match <{}>", name, open.name),
                    ));
                }
                if let Some((key, body_start)) = open.member {
                    entries.push((key, src[body_start..start].to_string()));
                }
                self.pos = end + 1;
            } else {
                let end = self.tag_end(start)?;
                let content = &src[start + 1..end];
                let (content, self_closing) = match content.strip_suffix('/') {
                    Some(inner) => (inner, true),
                    None => (content, false),
                };
                let name_len = content
                    .find(|c: char| c.is_whitespace())
                    .unwrap_or(content.len());
                let name = &content[..name_len];
                if name.is_empty() {
                    return Err(self.error_at(start, "element without a name".to_string()));
                }

                let member = if name == self.member_element {
                    let key = attribute(&content[name_len..], "name").ok_or_else(|| {
                        self.error_at(start, format!("<{}> without a name attribute", name))
                    })?;
                    Some(key)
                } else {
                    None
                };

                if self_closing {
                    if let Some(key) = member {
                        entries.push((key, String::new()));
                    }
                } else {
                    stack.push(OpenElement {
                        name,
                        member: member.map(|key| (key, end + 1)),
                    });
                }
                self.pos = end + 1;
            }
        }

        if let Some(open) = stack.last() {
            return Err(self.error_at(src.len(), format!("unclosed element <{}>", open.name)));
        }
        Ok(entries)
    }

    fn skip_past(
        &self,
        start: usize,
        terminator: &str,
        reason: &str,
    ) -> Result<usize, SyntaxError> {
        self.src[start..]
            .find(terminator)
            .map(|i| start + i + terminator.len())
            .ok_or_else(|| self.error_at(start, reason.to_string()))
    }

    /// Offset of the `>` closing the tag opened at `start`, skipping quoted values.
    fn tag_end(&self, start: usize) -> Result<usize, SyntaxError> {
        let mut quote: Option<u8> = None;
        for (i, &b) in self.src.as_bytes()[start + 1..].iter().enumerate() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'<') => break,
                (None, b'>') => return Ok(start + 1 + i),
                _ => {}
            }
        }
        Err(self.error_at(start, "unterminated tag".to_string()))
    }

    fn error_at(&self, offset: usize, reason: String) -> SyntaxError {
        SyntaxError {
            line: self.src[..offset].matches('\n').count() + 1,
            reason,
        }
    }
}

fn attribute(attributes: &str, wanted: &str) -> Option<String> {
    ATTRIBUTE.captures_iter(attributes).find_map(|caps| {
        if &caps[1] != wanted {
            return None;
        }
        let raw = caps.get(2).or_else(|| caps.get(3))?.as_str();
        Some(unescape(raw))
    })
}

fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
