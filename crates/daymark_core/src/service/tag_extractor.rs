//! Tag extraction from note headers.

use crate::model::document::Document;
use crate::repo::DocumentRepository;

const TAG_MARKER: char = '#';

/// Returns the document's header tags with the leading `#` removed.
///
/// Absent documents and headers without tags yield an empty list. Order and
/// duplicates follow the header declaration.
pub fn extract_tags<R>(repo: &R, document: Option<&Document>) -> Vec<String>
where
    R: DocumentRepository + ?Sized,
{
    document
        .and_then(|document| repo.header_tags(document))
        .map(|tags| strip_markers(&tags))
        .unwrap_or_default()
}

/// Strips one leading `#` from every tag.
pub fn strip_markers(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.strip_prefix(TAG_MARKER).unwrap_or(tag).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::strip_markers;

    #[test]
    fn strips_hash_prefix_in_order() {
        let tags = vec!["#work".to_string(), "#personal".to_string()];
        assert_eq!(strip_markers(&tags), vec!["work", "personal"]);
    }

    #[test]
    fn keeps_duplicates_and_unmarked_tags() {
        let tags = vec!["#a".to_string(), "b".to_string(), "#a".to_string()];
        assert_eq!(strip_markers(&tags), vec!["a", "b", "a"]);
    }

    #[test]
    fn strips_only_one_marker() {
        assert_eq!(strip_markers(&["##nested".to_string()]), vec!["#nested"]);
    }
}
