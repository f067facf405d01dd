//! CSS selector subset understood by [`MemoryDom`](super::MemoryDom).
//!
//! Supported: type (`a`), universal (`*`), `#id`, `.class`, `[attr]`,
//! `[attr="v"]`, `[attr^="v"]`, compounds of those, the descendant
//! combinator (whitespace) and comma-separated lists. That covers every
//! selector the site binds to.

use crate::error::{SiteError, SiteResult};

/// Attribute condition inside `[...]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttrMatch {
    pub name: String,
    pub op: AttrOp,
}

impl AttrMatch {
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (&self.op, value) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(expected), Some(v)) => v == expected,
            (AttrOp::Prefix(prefix), Some(v)) => v.starts_with(prefix.as_str()),
        }
    }
}

/// One compound selector, e.g. `a.btn[href]`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
    universal: bool,
}

impl Compound {
    fn is_empty(&self) -> bool {
        !self.universal
            && self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }
}

/// Parsed selector list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Each alternative is a descendant chain, outermost first.
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(input: &str) -> SiteResult<Self> {
        let unsupported = || SiteError::UnsupportedSelector(input.to_string());
        let mut chars = input.chars().peekable();

        let mut alternatives = Vec::new();
        let mut chain: Vec<Compound> = Vec::new();
        let mut current = Compound::default();

        while let Some(&c) = chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    chars.next();
                    if !current.is_empty() {
                        chain.push(core::mem::take(&mut current));
                    }
                }
                ',' => {
                    chars.next();
                    if !current.is_empty() {
                        chain.push(core::mem::take(&mut current));
                    }
                    if chain.is_empty() {
                        return Err(unsupported());
                    }
                    alternatives.push(core::mem::take(&mut chain));
                }
                '*' => {
                    chars.next();
                    current.universal = true;
                }
                '#' => {
                    chars.next();
                    let id = read_ident(&mut chars);
                    if id.is_empty() {
                        return Err(unsupported());
                    }
                    current.id = Some(id);
                }
                '.' => {
                    chars.next();
                    let class = read_ident(&mut chars);
                    if class.is_empty() {
                        return Err(unsupported());
                    }
                    current.classes.push(class);
                }
                '[' => {
                    chars.next();
                    let attr = read_attr(&mut chars).ok_or_else(unsupported)?;
                    current.attrs.push(attr);
                }
                c if is_ident_char(c) => {
                    if !current.is_empty() {
                        return Err(unsupported());
                    }
                    current.tag = Some(read_ident(&mut chars).to_ascii_lowercase());
                }
                _ => return Err(unsupported()),
            }
        }

        if !current.is_empty() {
            chain.push(current);
        }
        if chain.is_empty() {
            return Err(unsupported());
        }
        alternatives.push(chain);

        Ok(Self { alternatives })
    }

    pub(crate) fn alternatives(&self) -> &[Vec<Compound>] {
        &self.alternatives
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut core::iter::Peekable<core::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

fn skip_ws(chars: &mut core::iter::Peekable<core::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

/// Parse the inside of `[...]`, consuming the closing bracket.
fn read_attr(chars: &mut core::iter::Peekable<core::str::Chars<'_>>) -> Option<AttrMatch> {
    skip_ws(chars);
    let name = read_ident(chars).to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    skip_ws(chars);

    let prefix = match chars.next()? {
        ']' => {
            return Some(AttrMatch {
                name,
                op: AttrOp::Exists,
            })
        }
        '=' => false,
        '^' => {
            if chars.next()? != '=' {
                return None;
            }
            true
        }
        _ => return None,
    };

    skip_ws(chars);
    let value = match *chars.peek()? {
        q @ ('"' | '\'') => {
            chars.next();
            let mut value = String::new();
            loop {
                let c = chars.next()?;
                if c == q {
                    break;
                }
                value.push(c);
            }
            value
        }
        _ => read_ident(chars),
    };
    skip_ws(chars);
    if chars.next()? != ']' {
        return None;
    }

    let op = if prefix {
        AttrOp::Prefix(value)
    } else {
        AttrOp::Equals(value)
    };
    Some(AttrMatch { name, op })
}
