//! Merging classifier output back into a record

use serde::{Deserialize, Serialize};

use crate::model::DebriefInput;
use crate::{Error, Result};

/// Predicted tags for the section document plus one cluster name per lesson
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub tags: Vec<String>,
    /// Positionally aligned with the submitted lesson texts
    pub clusters: Vec<String>,
}

/// Render tags as the stored label string
///
/// Every tag, including the last, is followed by `", "`. Consumers of the
/// stored records split on that separator, so the trailing one stays.
pub fn format_labels<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter().fold(String::new(), |mut labels, tag| {
        labels.push_str(tag.as_ref());
        labels.push_str(", ");
        labels
    })
}

/// Assign `labels` and per-lesson `cluster` from an enrichment result
///
/// The cluster list must have exactly one entry per lesson; otherwise the
/// record is left untouched and a [`Error::ClusterCountMismatch`] is returned.
pub fn apply_enrichment(record: &mut DebriefInput, enrichment: Enrichment) -> Result<()> {
    let expected = record.lessons().len();
    let actual = enrichment.clusters.len();
    if expected != actual {
        return Err(Error::ClusterCountMismatch { expected, actual });
    }

    record.labels = Some(format_labels(enrichment.tags.as_slice()));

    for (lesson, cluster) in record
        .lessons
        .iter_mut()
        .flatten()
        .zip(enrichment.clusters)
    {
        lesson.cluster = Some(cluster);
    }

    Ok(())
}
