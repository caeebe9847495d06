//! Attribute lists carried on node data
//!
//! The engine itself only writes `id` and `class` (from the selector). Hosts
//! may read `VNodeData::attrs` when realizing an element, and modules may
//! diff them in their `update` hooks.

use compact_str::CompactString;

/// Element attributes as ordered name/value pairs
pub type Attrs = Vec<(CompactString, CompactString)>;

/// Lookup and in-place update on [`Attrs`]
pub trait AttrsExt {
    /// Value of the attribute `name`
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Overwrite `name` where it already is, or append it
    fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>);
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        let name = name.into();
        match self.iter_mut().find(|(k, _)| *k == name) {
            Some(attr) => attr.1 = value.into(),
            None => self.push((name, value.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_class_overrides_data_class_in_place() {
        // Data attrs first, then the selector's class the way element creation
        // applies it
        let mut attrs: Attrs = vec![("class".into(), "from-data".into()), ("href".into(), "/".into())];
        attrs.set_attr("class", "a b");
        attrs.set_attr("id", "x");

        assert_eq!(attrs.get_attr("class"), Some("a b"));
        assert_eq!(attrs.get_attr("missing"), None);
        let names: Vec<&str> = attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["class", "href", "id"]);
    }
}
