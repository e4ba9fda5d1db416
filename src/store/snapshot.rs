use serde::{Deserialize, Serialize};

use crate::store::persistence::KeyValueStore;
use crate::wizard::WizardState;

/// Storage key for a wizard's state snapshot.
pub fn state_key(form_id: &str) -> String {
    format!("WZ_MEAL_APP_STATE::{}", form_id)
}

/// Storage key for the one-shot edit request token.
pub fn edit_request_key(form_id: &str) -> String {
    format!("WZ_EDIT_REQUEST::{}", form_id)
}

/// Storage key for the last applied discount code.
pub fn discount_key(form_id: &str) -> String {
    format!("WZ_DISCOUNT_CODE::{}", form_id)
}

/// Persist a snapshot. Serialization failure drops the write.
pub fn save_snapshot(store: &mut dyn KeyValueStore, form_id: &str, state: &WizardState) {
    if let Ok(json) = serde_json::to_string(state) {
        store.set(&state_key(form_id), &json);
    }
}

/// Load a previously persisted snapshot.
///
/// Absent or malformed data is treated as "no prior state".
pub fn load_snapshot(store: &dyn KeyValueStore, form_id: &str) -> Option<WizardState> {
    let raw = store.get(&state_key(form_id))?;
    serde_json::from_str(&raw).ok()
}

/// Remove the persisted snapshot and any saved discount code.
pub fn clear_snapshot(store: &mut dyn KeyValueStore, form_id: &str) {
    store.remove(&state_key(form_id));
    store.remove(&discount_key(form_id));
}

/// A deep-link style request to re-open meal selection for one person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    #[serde(rename = "PersonIndex")]
    pub person_index: usize,
}

/// Store an edit request for the next wizard initialization to consume.
pub fn store_edit_request(store: &mut dyn KeyValueStore, form_id: &str, request: &EditRequest) {
    if let Ok(json) = serde_json::to_string(request) {
        store.set(&edit_request_key(form_id), &json);
    }
}

/// Consume the edit request token: read once, then delete.
///
/// The token is removed even when it fails to parse.
pub fn take_edit_request(store: &mut dyn KeyValueStore, form_id: &str) -> Option<EditRequest> {
    let key = edit_request_key(form_id);
    let raw = store.get(&key)?;
    store.remove(&key);
    serde_json::from_str(&raw).ok()
}

pub fn save_discount_code(store: &mut dyn KeyValueStore, form_id: &str, code: &str) {
    store.set(&discount_key(form_id), code);
}

pub fn load_discount_code(store: &dyn KeyValueStore, form_id: &str) -> Option<String> {
    store.get(&discount_key(form_id))
}

pub fn clear_discount_code(store: &mut dyn KeyValueStore, form_id: &str) {
    store.remove(&discount_key(form_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persistence::MemoryStore;

    #[test]
    fn test_snapshot_roundtrip() {
        let mut store = MemoryStore::new();
        let mut state = WizardState::default();
        state.resize_persons(2);
        state.persons[0].name = "Ada".to_string();
        state.set_current_person(1);

        save_snapshot(&mut store, "default", &state);
        let loaded = load_snapshot(&store, "default").unwrap();

        assert_eq!(loaded.persons.len(), 2);
        assert_eq!(loaded.persons[0].name, "Ada");
        assert_eq!(loaded.current_person_index(), 1);
    }

    #[test]
    fn test_malformed_snapshot_is_absent() {
        let mut store = MemoryStore::new();
        store.set(&state_key("default"), "{not json");
        assert!(load_snapshot(&store, "default").is_none());
    }

    #[test]
    fn test_edit_request_is_read_once() {
        let mut store = MemoryStore::new();
        store_edit_request(&mut store, "default", &EditRequest { person_index: 1 });

        let first = take_edit_request(&mut store, "default");
        assert_eq!(first.unwrap().person_index, 1);

        assert!(take_edit_request(&mut store, "default").is_none());
    }

    #[test]
    fn test_malformed_edit_request_is_still_consumed() {
        let mut store = MemoryStore::new();
        store.set(&edit_request_key("default"), "garbage");

        assert!(take_edit_request(&mut store, "default").is_none());
        assert!(store.get(&edit_request_key("default")).is_none());
    }
}
