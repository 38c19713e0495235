use crate::commands::{CmdMessage, CmdResult};
use crate::document::Document;
use crate::error::Result;
use crate::hooks::{HookEvent, HookRegistry};
use crate::store::RecordStore;
use crate::vfs::SchemeRegistry;

use super::helpers::{report_hook_failures, resolve_id};

pub fn run<S: RecordStore>(
    store: &mut S,
    registry: &SchemeRegistry,
    hooks: &HookRegistry,
    id_input: &str,
    pointer: &str,
    destination: &str,
) -> Result<CmdResult> {
    let id = resolve_id(store, id_input)?;
    let mut record = store.get(&id)?;
    {
        let mut doc = Document::new(&mut record.data, pointer).with_resolver(registry);
        doc.move_to(destination)?;
    }

    let mut result = CmdResult::default();
    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::BeforeRecordUpdate { record: &record }),
    );
    store.commit(&mut record)?;
    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::AfterRecordUpdate { record: &record }),
    );

    result.add_message(CmdMessage::success(format!(
        "Moved document to {}",
        destination
    )));
    Ok(result.with_affected_records(vec![record]))
}
