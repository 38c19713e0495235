use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

use super::helpers::resolve_id;

/// Soft-deletes the record itself. Clearing a file reference inside a
/// record is `rm`'s job, not this one's.
pub fn run<S: RecordStore>(store: &mut S, id_input: &str) -> Result<CmdResult> {
    let id = resolve_id(store, id_input)?;
    store.soft_delete(&id)?;
    let record = store.get_any(&id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted record {}", id)));
    Ok(result.with_affected_records(vec![record]))
}
