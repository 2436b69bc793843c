//! Minimal CSS selector matching for `accept` and `handle` options.
//!
//! Supports comma-separated lists of compound selectors built from `tag`, `*`, `#id`,
//! `.class`, `[attr]` and `[attr=value]`. Combinators are not supported.

use crate::tree::Element;
use std::fmt;
use std::str::FromStr;

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector (or one entry of a selector list) is empty.
    Empty,
    /// A character that cannot appear at this position.
    UnexpectedChar { ch: char, pos: usize },
    /// Input ended where a name was expected.
    UnexpectedEnd,
    /// An attribute selector without a closing `]`.
    UnterminatedAttribute,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "Empty selector"),
            SelectorError::UnexpectedChar { ch, pos } => {
                write!(f, "Unexpected character {:?} at position {}", ch, pos)
            }
            SelectorError::UnexpectedEnd => write!(f, "Selector ended unexpectedly"),
            SelectorError::UnterminatedAttribute => write!(f, "Unterminated attribute selector"),
        }
    }
}

impl std::error::Error for SelectorError {}

/// Result type for selector parsing.
pub type SelectorResult<T> = Result<T, SelectorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag
            && !el.tag().eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && el.id() != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|c| el.has_class(c))
            && self.attrs.iter().all(|a| match &a.value {
                Some(value) => el.attribute(&a.name) == Some(value.as_str()),
                None => el.attribute(&a.name).is_some(),
            })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> SelectorResult<Self> {
        let alternatives = input
            .split(',')
            .map(|part| Parser::new(part.trim()).compound())
            .collect::<SelectorResult<Vec<_>>>()?;
        Ok(Self { alternatives })
    }

    /// `true` if any selector of the list matches `el`.
    pub fn matches(&self, el: &Element) -> bool {
        self.alternatives.iter().any(|c| c.matches(el))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> SelectorResult<Self> {
        Self::parse(s)
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn expect(&mut self, expected: char) -> SelectorResult<()> {
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(SelectorError::UnexpectedChar {
                ch,
                pos: self.pos - ch.len_utf8(),
            }),
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }

    fn name(&mut self) -> SelectorResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        if start == self.pos {
            return match self.peek() {
                Some(ch) => Err(SelectorError::UnexpectedChar { ch, pos: self.pos }),
                None => Err(SelectorError::UnexpectedEnd),
            };
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn attr_value(&mut self) -> SelectorResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                loop {
                    match self.bump() {
                        Some(ch) if ch == quote => {
                            return Ok(self.input[start..self.pos - 1].to_string());
                        }
                        Some(_) => {}
                        None => return Err(SelectorError::UnterminatedAttribute),
                    }
                }
            }
            Some(_) => self.name(),
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }

    fn compound(mut self) -> SelectorResult<Compound> {
        if self.input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut compound = Compound::default();
        if self.peek() == Some('*') {
            self.bump();
        } else if self.peek().is_some_and(is_name_char) {
            compound.tag = Some(self.name()?);
        }
        while let Some(ch) = self.peek() {
            match ch {
                '#' => {
                    self.bump();
                    compound.id = Some(self.name()?);
                }
                '.' => {
                    self.bump();
                    compound.classes.push(self.name()?);
                }
                '[' => {
                    self.bump();
                    let name = self.name()?;
                    let value = if self.peek() == Some('=') {
                        self.bump();
                        Some(self.attr_value()?)
                    } else {
                        None
                    };
                    self.expect(']')?;
                    compound.attrs.push(AttrMatch { name, value });
                }
                ch => return Err(SelectorError::UnexpectedChar { ch, pos: self.pos }),
            }
        }
        Ok(compound)
    }
}

/// A class name that may also be a selector: matches on class membership OR selector
/// match. Strings that do not parse as selectors only match by class.
#[derive(Debug, Clone)]
pub struct ClassOrSelector {
    raw: String,
    selector: Option<Selector>,
}

impl ClassOrSelector {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let selector = match Selector::parse(&raw) {
            Ok(selector) => Some(selector),
            Err(err) => {
                tracing::warn!("'{}' is not a supported selector ({}); matching by class only", raw, err);
                None
            }
        };
        Self { raw, selector }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, el: &Element) -> bool {
        el.has_class(&self.raw) || self.selector.as_ref().is_some_and(|s| s.matches(el))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementTree;

    fn item(tree: &mut ElementTree) -> crate::tree::NodeId {
        let node = tree.create_element("div");
        tree.set_element_id(node, "w1");
        tree.add_class(node, "grid-stack-item");
        tree.add_class(node, "wide");
        tree.set_attribute(node, "gs-w", "4");
        node
    }

    #[test]
    fn test_compound_selectors() {
        let mut tree = ElementTree::new();
        let node = item(&mut tree);
        let el = tree.get(node).unwrap();

        for yes in [
            "div",
            "*",
            ".grid-stack-item",
            "div.grid-stack-item.wide",
            "#w1",
            "[gs-w]",
            "[gs-w=4]",
            "[gs-w='4']",
            "span, .wide",
        ] {
            assert!(Selector::parse(yes).unwrap().matches(el), "{yes} should match");
        }
        for no in ["span", ".narrow", "#w2", "[gs-h]", "[gs-w=\"5\"]", "div.narrow"] {
            assert!(!Selector::parse(no).unwrap().matches(el), "{no} should not match");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse(".a,"), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("."), Err(SelectorError::UnexpectedEnd));
        assert_eq!(
            Selector::parse("div > p"),
            Err(SelectorError::UnexpectedChar { ch: ' ', pos: 3 })
        );
        assert_eq!(
            Selector::parse("[gs-w"),
            Err(SelectorError::UnterminatedAttribute)
        );
        assert_eq!(
            Selector::parse("[gs-w='4"),
            Err(SelectorError::UnterminatedAttribute)
        );
    }

    #[test]
    fn test_class_or_selector_falls_back_to_class() {
        let mut tree = ElementTree::new();
        let node = item(&mut tree);
        tree.add_class(node, "odd name");

        let rule = ClassOrSelector::new("odd name");
        assert!(rule.matches(tree.get(node).unwrap()));

        let rule = ClassOrSelector::new("grid-stack-item");
        assert!(rule.matches(tree.get(node).unwrap()));
    }
}
