//! Identity reset for create-style flows
//!
//! The backend treats a node carrying an id as "update this existing row".
//! A record cloned from an existing debrief therefore has to lose every id,
//! at every depth, before it is submitted as a new one.

use crate::model::{
    Cell, Column, Comment, ContentItems, DebriefInput, Lesson, Paragraph, Row, Table, Task,
};

/// Node that can drop its own persistent identifier and those of its children
pub trait ClearIdentities {
    fn clear_identities(&mut self);
}

impl<T: ClearIdentities> ClearIdentities for Vec<T> {
    fn clear_identities(&mut self) {
        self.iter_mut().for_each(T::clear_identities);
    }
}

impl<T: ClearIdentities> ClearIdentities for Option<T> {
    fn clear_identities(&mut self) {
        if let Some(inner) = self {
            inner.clear_identities();
        }
    }
}

impl ClearIdentities for Comment {
    fn clear_identities(&mut self) {
        self.id = None;
    }
}

impl ClearIdentities for Paragraph {
    fn clear_identities(&mut self) {
        self.id = None;
        self.comments.clear_identities();
    }
}

impl ClearIdentities for Cell {
    fn clear_identities(&mut self) {
        self.id = None;
    }
}

impl ClearIdentities for Column {
    fn clear_identities(&mut self) {
        self.id = None;
    }
}

impl ClearIdentities for Row {
    fn clear_identities(&mut self) {
        self.id = None;
        self.cells.clear_identities();
    }
}

impl ClearIdentities for Table {
    fn clear_identities(&mut self) {
        self.id = None;
        self.columns.clear_identities();
        self.rows.clear_identities();
    }
}

impl ClearIdentities for ContentItems {
    fn clear_identities(&mut self) {
        self.paragraphs.clear_identities();
        self.tables.clear_identities();
    }
}

impl ClearIdentities for Task {
    fn clear_identities(&mut self) {
        self.id = None;
    }
}

impl ClearIdentities for Lesson {
    fn clear_identities(&mut self) {
        self.id = None;
        self.tasks.clear_identities();
    }
}

impl ClearIdentities for DebriefInput {
    fn clear_identities(&mut self) {
        self.id = None;
        clear_descendant_identities(self);
    }
}

/// Clear the record id and every descendant id
pub fn clear_identities(record: &mut DebriefInput) {
    record.clear_identities();
}

/// Clear every descendant id, keeping the record's own id
///
/// Used by updates configured to recreate child rows: the record id is the
/// update target and has to survive.
pub fn clear_descendant_identities(record: &mut DebriefInput) {
    record.content_items.clear_identities();
    record.tasks.clear_identities();
    record.lessons.clear_identities();
}
