use indexmap::IndexMap;

use super::classify::ClassifiedComment;

/// Author login -> that author's comments, in source order. Insertion order
/// of the map follows the first appearance of each author, so serialization
/// mirrors the chronological input.
pub type ProviderGroups = IndexMap<String, Vec<ClassifiedComment>>;

/// Partition comments by authoring identity, preserving relative order.
///
/// Keys are exact login strings: a bot account and a similarly named human
/// stay separate groups. Display-level normalization (e.g. stripping a
/// `[bot]` suffix) belongs to the presentation layer, not here.
pub fn group_by_provider(comments: &[ClassifiedComment]) -> ProviderGroups {
    let mut groups = ProviderGroups::new();
    for comment in comments {
        groups
            .entry(comment.raw.user.login.clone())
            .or_default()
            .push(comment.clone());
    }
    groups
}
