use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Record;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S, show_deleted: bool) -> Result<CmdResult> {
    let mut records: Vec<Record> = store
        .list()?
        .into_iter()
        .filter(|record| record.meta.is_deleted == show_deleted)
        .collect();
    records.sort_by(|a, b| b.meta.created_at.cmp(&a.meta.created_at));

    Ok(CmdResult::default().with_listed_records(records))
}
