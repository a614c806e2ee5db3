//! Section text extraction for the classifier
//!
//! Builds the single document sent for tag prediction out of the bullet
//! comments of selected paragraphs. Tables, tasks and lessons never
//! contribute; lesson texts travel separately (see [`lesson_texts`]).

use tracing::warn;

use crate::model::{Comment, DebriefInput, Paragraph};

/// Concatenate the bullets of every paragraph whose name is in `section_names`
///
/// Name matching is case-insensitive. Within a paragraph, bullets are ordered
/// by comment `index`; each non-blank bullet is followed by one space.
/// A record without `contentItems` or `paragraphs` yields `""` and a warning.
pub fn extract_sections<S: AsRef<str>>(record: &DebriefInput, section_names: &[S]) -> String {
    let Some(paragraphs) = record
        .content_items
        .as_ref()
        .and_then(|items| items.paragraphs.as_ref())
    else {
        warn!("Cannot extract section content: contentItems or paragraphs is missing");
        return String::new();
    };

    let wanted: Vec<String> = section_names
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();

    let mut combined = String::new();
    for paragraph in paragraphs.iter().filter(|p| is_selected(p, &wanted)) {
        for comment in ordered_comments(&paragraph.comments) {
            if !comment.bullet.trim().is_empty() {
                combined.push_str(&comment.bullet);
                combined.push(' ');
            }
        }
    }

    combined
}

fn is_selected(paragraph: &Paragraph, wanted: &[String]) -> bool {
    !paragraph.name.is_empty() && wanted.contains(&paragraph.name.to_lowercase())
}

/// Comments in ascending `index` order
///
/// Comments without an index keep their slot; indexed comments are stably
/// sorted among the remaining slots.
fn ordered_comments(comments: &[Comment]) -> Vec<&Comment> {
    let mut ordered: Vec<&Comment> = comments.iter().collect();

    let slots: Vec<usize> = comments
        .iter()
        .enumerate()
        .filter(|(_, c)| c.index.is_some())
        .map(|(pos, _)| pos)
        .collect();

    let mut indexed: Vec<&Comment> = slots.iter().map(|&pos| &comments[pos]).collect();
    indexed.sort_by_key(|c| c.index);

    for (slot, comment) in slots.into_iter().zip(indexed) {
        ordered[slot] = comment;
    }

    ordered
}

/// Lesson contents in list order, one entry per lesson
///
/// Position in the returned list is the correlation key used to map cluster
/// predictions back onto lessons.
pub fn lesson_texts(record: &DebriefInput) -> Vec<String> {
    record
        .lessons()
        .iter()
        .map(|lesson| lesson.content.clone())
        .collect()
}
