use std::io::Read;

use crate::commands::{CmdMessage, CmdResult};
use crate::document::Document;
use crate::error::{DocrefError, Result};
use crate::hooks::{HookEvent, HookRegistry};
use crate::store::RecordStore;
use crate::vfs::SchemeRegistry;

use super::helpers::{report_hook_failures, resolve_id};

/// Overwrite the referenced file's contents. The record itself is left
/// untouched, so nothing is committed back to the store.
pub fn run<S: RecordStore>(
    store: &S,
    registry: &SchemeRegistry,
    hooks: &HookRegistry,
    id_input: &str,
    pointer: &str,
    source: &mut dyn Read,
) -> Result<CmdResult> {
    let id = resolve_id(store, id_input)?;
    let mut record = store.get(&id)?;
    let mut result = CmdResult::default();

    let doc = Document::new(&mut record.data, pointer).with_resolver(registry);
    let uri = doc
        .uri()?
        .map(str::to_owned)
        .ok_or_else(|| DocrefError::UnresolvedUri(pointer.to_string()))?;

    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::BeforeContentSet { uri: &uri }),
    );
    doc.set_contents(source)?;
    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::AfterContentSet { uri: &uri }),
    );

    result.add_message(CmdMessage::success(format!("Wrote contents to {}", uri)));
    Ok(result)
}
