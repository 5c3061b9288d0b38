//! Request extractors.

mod record_id;
pub use record_id::{parse_id, RecordId};
