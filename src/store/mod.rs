pub mod persistence;
pub mod snapshot;

pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use snapshot::{
    clear_discount_code, clear_snapshot, discount_key, edit_request_key, load_discount_code,
    load_snapshot, save_discount_code, save_snapshot, state_key, store_edit_request,
    take_edit_request, EditRequest,
};
