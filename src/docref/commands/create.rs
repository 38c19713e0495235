use serde_json::Value;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::hooks::{HookEvent, HookRegistry};
use crate::store::RecordStore;

use super::helpers::report_hook_failures;

pub fn run<S: RecordStore>(store: &mut S, hooks: &HookRegistry, data: Value) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::BeforeRecordInsert { data: &data }),
    );

    let record = store.create(data)?;
    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::AfterRecordInsert { record: &record }),
    );

    result.add_message(CmdMessage::success(format!(
        "Created record {}",
        record.meta.id
    )));
    Ok(result.with_affected_records(vec![record]))
}
