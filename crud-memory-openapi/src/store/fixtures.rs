use crate::notes::NewNote;

const DEV_FIXTURES: &str = include_str!("notes.json");

pub fn load() -> serde_json::Result<Vec<NewNote>> {
    serde_json::from_str(DEV_FIXTURES)
}
