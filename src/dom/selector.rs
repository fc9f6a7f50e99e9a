use crate::error::Error;

/// A parsed candidate selector.
///
/// Supports the subset a filter instance actually needs: `*`, `tag`,
/// `.class`, `#id`, compounds like `li.item`, and comma-separated lists.
/// Combinators (descendant, `>`, `+`) are rejected at parse time so a
/// misconfigured instance fails at bind rather than silently matching
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

/// One comma-separated alternative of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parse a selector string, validating it up front.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut parts = Vec::new();
        for alternative in input.split(',') {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return Err(Error::InvalidSelector(input.to_string()));
            }
            parts.push(Compound::parse(alternative)
                .ok_or_else(|| Error::InvalidSelector(input.to_string()))?);
        }
        Ok(Self { parts })
    }

    /// The universal selector, matching every element.
    pub fn universal() -> Self {
        Self {
            parts: vec![Compound::default()],
        }
    }

    /// Whether an element with the given tag, id and classes matches.
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        self.parts.iter().any(|part| part.matches(tag, id, classes))
    }
}

impl Compound {
    fn parse(input: &str) -> Option<Self> {
        if input == "*" {
            return Some(Self::default());
        }

        let mut compound = Self::default();
        let mut rest = input;

        // Leading bare segment is the tag name
        let head_len = rest
            .find(|c: char| c == '.' || c == '#')
            .unwrap_or(rest.len());
        if head_len > 0 {
            let tag = &rest[..head_len];
            if !is_identifier(tag) {
                return None;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
            rest = &rest[head_len..];
        }

        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            rest = &rest[1..];
            let seg_len = rest
                .find(|c: char| c == '.' || c == '#')
                .unwrap_or(rest.len());
            let name = &rest[..seg_len];
            if !is_identifier(name) {
                return None;
            }
            match marker {
                b'.' => compound.classes.push(name.to_string()),
                b'#' => {
                    if compound.id.is_some() {
                        return None;
                    }
                    compound.id = Some(name.to_string());
                }
                _ => return None,
            }
            rest = &rest[seg_len..];
        }

        Some(compound)
    }

    fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(wanted) = &self.tag {
            if !tag.eq_ignore_ascii_case(wanted) {
                return false;
            }
        }
        if let Some(wanted) = &self.id {
            if id != Some(wanted.as_str()) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|wanted| classes.iter().any(|c| c == wanted))
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_class_selector() {
        let sel = Selector::parse(".item").unwrap();
        assert!(sel.matches("li", None, &classes(&["item"])));
        assert!(sel.matches("div", None, &classes(&["item", "active"])));
        assert!(!sel.matches("li", None, &classes(&["other"])));
    }

    #[test]
    fn parses_tag_and_compound() {
        let sel = Selector::parse("li.item").unwrap();
        assert!(sel.matches("li", None, &classes(&["item"])));
        assert!(sel.matches("LI", None, &classes(&["item"])));
        assert!(!sel.matches("div", None, &classes(&["item"])));
    }

    #[test]
    fn parses_id_selector() {
        let sel = Selector::parse("#search").unwrap();
        assert!(sel.matches("input", Some("search"), &[]));
        assert!(!sel.matches("input", Some("other"), &[]));
        assert!(!sel.matches("input", None, &[]));
    }

    #[test]
    fn parses_comma_list() {
        let sel = Selector::parse("li, .entry").unwrap();
        assert!(sel.matches("li", None, &[]));
        assert!(sel.matches("div", None, &classes(&["entry"])));
        assert!(!sel.matches("div", None, &[]));
    }

    #[test]
    fn universal_matches_everything() {
        let sel = Selector::universal();
        assert!(sel.matches("li", None, &[]));
        assert!(sel.matches("input", Some("x"), &classes(&["y"])));
        assert_eq!(sel, Selector::parse("*").unwrap());
    }

    #[test]
    fn rejects_combinators_and_garbage() {
        assert!(Selector::parse("ul > li").is_err());
        assert!(Selector::parse("ul li").is_err());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".item,").is_err());
        assert!(Selector::parse("#a#b").is_err());
    }
}
