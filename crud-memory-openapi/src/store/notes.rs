use chrono::Utc;

use crate::notes::{NewNote, Note, NoteChanges, NoteId};

pub const FIRST_ID: NoteId = 1000;

/// Ordered in-memory collection of notes.
///
/// Notes keep their insertion order. Ids come from a counter that only moves
/// forward, so an id is never handed out twice, even after its note is deleted.
#[derive(Debug)]
pub struct Notes {
    items: Vec<Note>,
    next_id: NoteId,
}

impl Default for Notes {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: FIRST_ID,
        }
    }
}

impl Notes {
    pub fn seeded(fixtures: impl IntoIterator<Item = NewNote>) -> Self {
        let mut notes = Self::default();
        for note in fixtures {
            notes.create(note);
        }
        notes
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All notes, or the ones whose title contains `search_term`.
    pub fn list(&self, search_term: Option<&str>) -> Vec<Note> {
        match search_term.filter(|term| !term.is_empty()) {
            Some(term) => self
                .items
                .iter()
                .filter(|note| note.title.contains(term))
                .cloned()
                .collect(),
            None => self.items.clone(),
        }
    }

    pub fn get(&self, id: NoteId) -> Option<Note> {
        self.items.iter().find(|note| note.id == id).cloned()
    }

    pub fn create(&mut self, NewNote { title, content }: NewNote) -> Note {
        let note = Note {
            id: self.next_id,
            title,
            content,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.next_id += 1;
        self.items.push(note.clone());
        note
    }

    pub fn update(&mut self, id: NoteId, NoteChanges { title, content }: NoteChanges) -> Option<Note> {
        let note = self.items.iter_mut().find(|note| note.id == id)?;
        if let Some(title) = title {
            note.title = title;
        }
        if let Some(content) = content {
            note.content = content;
        }
        note.updated_at = Some(Utc::now());
        Some(note.clone())
    }

    /// Removes the note, returning `false` when there was nothing to remove.
    pub fn delete(&mut self, id: NoteId) -> bool {
        match self.items.iter().position(|note| note.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(title: &str, content: &str) -> NewNote {
        NewNote {
            title: title.into(),
            content: content.into(),
        }
    }

    fn cats() -> Notes {
        Notes::seeded([
            new_note("5 life lessons learned from cats", "a"),
            new_note("What the government doesn't want you to know about cats", "b"),
            new_note("The most boring article about cats you'll ever read", "c"),
            new_note("10 ways cats can help you live to 100", "d"),
        ])
    }

    #[test]
    fn seeding_assigns_sequential_ids() {
        let notes = cats();
        let ids: Vec<_> = notes.list(None).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1000, 1001, 1002, 1003]);
    }

    #[test]
    fn list_without_term_returns_everything_in_order() {
        let notes = cats();
        assert_eq!(notes.list(None).len(), notes.len());
        assert_eq!(notes.list(Some("")).len(), 4);
        assert_eq!(notes.list(None)[2].title, "The most boring article about cats you'll ever read");
    }

    #[test]
    fn list_matches_title_substring_case_sensitively() {
        let mut notes = cats();

        let found = notes.list(Some("about cats"));
        assert_eq!(found.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1001, 1002]);

        assert!(notes.list(Some("About Cats")).is_empty());
        assert!(notes.list(Some("not a valid search")).is_empty());

        // content is not searched
        notes.create(new_note("visible", "hidden"));
        assert!(notes.list(Some("hidden")).is_empty());
    }

    #[test]
    fn get_unknown_id_is_absent() {
        let notes = cats();
        assert_eq!(notes.get(1001).map(|n| n.id), Some(1001));
        assert!(notes.get(3000).is_none());
    }

    #[test]
    fn create_appends_with_next_id() {
        let mut notes = cats();
        let note = notes.create(new_note("Some article about cats", ""));

        assert_eq!(note.id, 1004);
        assert!(note.created_at.is_some());
        assert_eq!(notes.list(None).last(), Some(&note));
    }

    #[test]
    fn create_on_empty_store_starts_at_first_id() {
        let mut notes = Notes::default();
        assert!(notes.is_empty());
        assert_eq!(notes.create(new_note("first", "")).id, FIRST_ID);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut notes = cats();
        assert!(notes.delete(1003));

        let note = notes.create(new_note("fresh", ""));
        assert_eq!(note.id, 1004);
    }

    #[test]
    fn update_overwrites_only_given_fields() {
        let mut notes = cats();
        let updated = notes
            .update(
                1002,
                NoteChanges {
                    title: Some("Dogs are better".into()),
                    content: None,
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Dogs are better");
        assert_eq!(updated.content, "c");
        assert!(updated.updated_at.is_some());
        assert_eq!(notes.get(1002), Some(updated));
    }

    #[test]
    fn update_with_empty_content_overwrites() {
        let mut notes = cats();
        let updated = notes
            .update(
                1000,
                NoteChanges {
                    title: None,
                    content: Some(String::new()),
                },
            )
            .unwrap();
        assert_eq!(updated.content, "");
        assert_eq!(updated.title, "5 life lessons learned from cats");
    }

    #[test]
    fn update_keeps_position() {
        let mut notes = cats();
        notes.update(
            1000,
            NoteChanges {
                title: Some("moved?".into()),
                content: None,
            },
        );
        assert_eq!(notes.list(None)[0].title, "moved?");
    }

    #[test]
    fn update_unknown_id_is_absent() {
        let mut notes = cats();
        assert!(notes.update(3000, NoteChanges::default()).is_none());
        assert_eq!(notes.len(), 4);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut notes = cats();

        assert!(notes.delete(1001));
        assert!(notes.get(1001).is_none());
        assert!(!notes.delete(1001));

        let ids: Vec<_> = notes.list(None).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1000, 1002, 1003]);
    }
}
