use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RecordStore;

use super::helpers::resolve_id;

pub fn run<S: RecordStore>(store: &S, id_input: &str) -> Result<CmdResult> {
    let id = resolve_id(store, id_input)?;
    let record = store.get(&id)?;
    Ok(CmdResult::default().with_listed_records(vec![record]))
}
