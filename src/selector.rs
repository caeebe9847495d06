//! Selector parsing
//!
//! A selector packs a tag name, an optional id and an optional class list
//! into one string: `div#app.card.active`. Parsing splits on the first `#`
//! and on the first `.` that follows it.
//!
//! The split is positional rather than grammatical, so a class written
//! before the id folds into the tag: `div.a#b` parses as tag `div.a`, id
//! `b`. A `#` in first position is not an id marker either. Both behaviors
//! are kept for compatibility with existing selectors.

/// Selector sentinel marking a comment node.
pub const COMMENT_SELECTOR: &str = "!";

/// A selector split into its tag, id and class parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector<'a> {
    /// Tag name passed to the host
    pub tag: &'a str,
    /// Text between `#` and the following `.` (or the end)
    pub id: Option<&'a str>,
    /// Dot-separated class list, without the leading dot
    pub classes: Option<&'a str>,
}

impl<'a> Selector<'a> {
    /// Split a selector string into tag, id and classes.
    pub fn parse(sel: &'a str) -> Self {
        let hash_idx = sel.find('#');
        // A missing `#` searches from the start
        let dot_idx = sel[hash_idx.unwrap_or(0)..]
            .find('.')
            .map(|i| i + hash_idx.unwrap_or(0));

        let hash = hash_idx.filter(|&i| i > 0).unwrap_or(sel.len());
        let dot = dot_idx.filter(|&i| i > 0).unwrap_or(sel.len());

        let tag = if hash_idx.is_some() || dot_idx.is_some() {
            &sel[..hash.min(dot)]
        } else {
            sel
        };

        let id = (hash < dot).then(|| &sel[hash + 1..dot]);
        let classes = dot_idx.filter(|&i| i > 0).map(|_| &sel[dot + 1..]);

        Self { tag, id, classes }
    }

    /// Class list joined with spaces, ready for a `class` attribute.
    pub fn class_attr(&self) -> Option<String> {
        self.classes.map(|c| c.replace('.', " "))
    }
}

/// Whether a selector names an `svg` root (`svg`, `svg.x`, `svg#x`).
pub fn is_svg_root(sel: &str) -> bool {
    match sel.strip_prefix("svg") {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('#'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tag() {
        let s = Selector::parse("div");
        assert_eq!(s.tag, "div");
        assert_eq!(s.id, None);
        assert_eq!(s.classes, None);
    }

    #[test]
    fn test_id_and_classes() {
        let s = Selector::parse("div#app.container.active");
        assert_eq!(s.tag, "div");
        assert_eq!(s.id, Some("app"));
        assert_eq!(s.classes, Some("container.active"));
        assert_eq!(s.class_attr().as_deref(), Some("container active"));
    }

    #[test]
    fn test_classes_only() {
        let s = Selector::parse("span.a.b");
        assert_eq!(s.tag, "span");
        assert_eq!(s.id, None);
        assert_eq!(s.class_attr().as_deref(), Some("a b"));
    }

    #[test]
    fn test_id_only() {
        let s = Selector::parse("p#intro");
        assert_eq!(s.tag, "p");
        assert_eq!(s.id, Some("intro"));
        assert_eq!(s.classes, None);
    }

    #[test]
    fn test_class_before_id_folds_into_tag() {
        let s = Selector::parse("div.a#b");
        assert_eq!(s.tag, "div.a");
        assert_eq!(s.id, Some("b"));
        assert_eq!(s.classes, None);
    }

    #[test]
    fn test_leading_hash_is_not_an_id() {
        let s = Selector::parse("#app");
        assert_eq!(s.tag, "#app");
        assert_eq!(s.id, None);
    }

    #[test]
    fn test_svg_root_detection() {
        assert!(is_svg_root("svg"));
        assert!(is_svg_root("svg.icon"));
        assert!(is_svg_root("svg#logo"));
        assert!(!is_svg_root("svgfoo"));
        assert!(!is_svg_root("div"));
    }
}
