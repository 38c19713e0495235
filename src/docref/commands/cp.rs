use crate::commands::CmdResult;
use crate::document::Document;
use crate::error::Result;
use crate::store::RecordStore;
use crate::vfs::SchemeRegistry;

use super::helpers::resolve_id;

/// Copies the referenced file. The stored record is deliberately left
/// untouched; the returned patch describes the reference a derived
/// record would carry.
pub fn run<S: RecordStore>(
    store: &S,
    registry: &SchemeRegistry,
    id_input: &str,
    pointer: &str,
    destination: &str,
) -> Result<CmdResult> {
    let id = resolve_id(store, id_input)?;
    let mut record = store.get(&id)?;
    let doc = Document::new(&mut record.data, pointer).with_resolver(registry);

    let patch = doc.copy_to(destination)?;
    Ok(CmdResult::default().with_patch(vec![patch]))
}
