//! Event tag rewriting.

use lookup_model::TagOptions;

/// Rewrites event tags before they are forwarded downstream.
///
/// Steps run in a fixed order: strip prefix, strip suffix, add prefix,
/// add suffix. Stripping also removes the `.` joining the stripped part to
/// the rest of the tag; adding does not insert one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRewriter {
    options: TagOptions,
}

impl TagRewriter {
    pub fn new(options: TagOptions) -> Self {
        Self { options }
    }

    pub fn is_identity(&self) -> bool {
        self.options.is_empty()
    }

    pub fn rewrite(&self, tag: &str) -> String {
        let mut tag = tag;
        if let Some(prefix) = self.options.remove_tag_prefix.as_deref()
            && let Some(rest) = tag.strip_prefix(prefix)
        {
            tag = rest.strip_prefix('.').unwrap_or(rest);
        }
        if let Some(suffix) = self.options.remove_tag_suffix.as_deref()
            && let Some(rest) = tag.strip_suffix(suffix)
        {
            tag = rest.strip_suffix('.').unwrap_or(rest);
        }

        let prefix = self.options.add_tag_prefix.as_deref().unwrap_or("");
        let suffix = self.options.add_tag_suffix.as_deref().unwrap_or("");
        format!("{prefix}{tag}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter(
        remove_prefix: Option<&str>,
        remove_suffix: Option<&str>,
        add_prefix: Option<&str>,
        add_suffix: Option<&str>,
    ) -> TagRewriter {
        TagRewriter::new(TagOptions {
            remove_tag_prefix: remove_prefix.map(String::from),
            remove_tag_suffix: remove_suffix.map(String::from),
            add_tag_prefix: add_prefix.map(String::from),
            add_tag_suffix: add_suffix.map(String::from),
        })
    }

    #[test]
    fn add_prefix() {
        let tags = rewriter(None, None, Some("lookup."), None);
        assert_eq!(tags.rewrite("test"), "lookup.test");
    }

    #[test]
    fn remove_prefix_with_separator() {
        let tags = rewriter(Some("raw"), None, None, None);
        assert_eq!(tags.rewrite("raw.access"), "access");
        assert_eq!(tags.rewrite("other.access"), "other.access");
    }

    #[test]
    fn remove_suffix_with_separator() {
        let tags = rewriter(None, Some("raw"), None, None);
        assert_eq!(tags.rewrite("access.raw"), "access");
    }

    #[test]
    fn strip_then_add() {
        let tags = rewriter(Some("raw"), None, Some("enriched."), Some(".done"));
        assert_eq!(tags.rewrite("raw.access"), "enriched.access.done");
    }

    #[test]
    fn default_is_identity() {
        let tags = TagRewriter::default();
        assert!(tags.is_identity());
        assert_eq!(tags.rewrite("test"), "test");
    }
}
