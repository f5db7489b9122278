//! Tier extraction and tag deduplication.

use std::collections::BTreeSet;

use search_sink_shared::TagLabel;

/// Substring that marks a tag as a tier tag.
pub const TIER_MARKER: &str = "Tier";

/// The tags of one document: a single tier plus the deduplicated remainder.
///
/// When several tags qualify as tier, the lexicographically smallest FQN is
/// chosen so the result does not depend on tag order. No tier-like tag of the
/// entity itself reaches the general set. The chosen tier is also kept out of
/// tags merged in later from columns, charts or tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tier: Option<String>,
    tags: BTreeSet<String>,
}

impl TagSet {
    /// Partition an entity's own tags into tier and remainder.
    pub fn from_labels(labels: &[TagLabel]) -> Self {
        let (tiers, rest): (Vec<&TagLabel>, Vec<&TagLabel>) = labels
            .iter()
            .partition(|label| label.tag_fqn.contains(TIER_MARKER));

        Self {
            tier: tiers.iter().map(|label| label.tag_fqn.clone()).min(),
            tags: rest.iter().map(|label| label.tag_fqn.clone()).collect(),
        }
    }

    /// Add tags from a nested element (column, chart, task).
    pub fn merge(&mut self, labels: &[TagLabel]) {
        for label in labels {
            if self.tier.as_deref() != Some(label.tag_fqn.as_str()) {
                self.tags.insert(label.tag_fqn.clone());
            }
        }
    }

    /// Split into the tier and the sorted general tags.
    pub fn into_parts(self) -> (Option<String>, Vec<String>) {
        (self.tier, self.tags.into_iter().collect())
    }
}
