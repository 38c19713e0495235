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
    force: bool,
) -> Result<CmdResult> {
    let id = resolve_id(store, id_input)?;
    let mut record = store.get(&id)?;
    let mut result = CmdResult::default();
    {
        let mut doc = Document::new(&mut record.data, pointer).with_resolver(registry);
        if force {
            if let Some(uri) = doc.uri()? {
                report_hook_failures(
                    &mut result,
                    hooks.notify(&HookEvent::BeforeFileDelete { uri }),
                );
            }
        }
        doc.remove(force)?;
    }

    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::BeforeRecordUpdate { record: &record }),
    );
    store.commit(&mut record)?;
    report_hook_failures(
        &mut result,
        hooks.notify(&HookEvent::AfterRecordUpdate { record: &record }),
    );

    let message = if force {
        "Deleted file and cleared reference"
    } else {
        "Cleared document reference"
    };
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocrefError;
    use crate::hooks::HookPoint;
    use crate::store::memory::InMemoryStore;
    use crate::vfs::{self, memfs::MemFs};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn registry_with_mem() -> (SchemeRegistry, MemFs) {
        let mem = MemFs::new();
        let mut registry = SchemeRegistry::new();
        registry.register("mem", Arc::new(mem.clone()));
        (registry, mem)
    }

    #[test]
    fn clears_reference_and_keeps_file() {
        let (registry, fs) = registry_with_mem();
        vfs::set_contents(&fs, "a.txt", b"body").unwrap();
        let mut store = InMemoryStore::new();
        let hooks = HookRegistry::new();
        let record = store
            .create(json!({"document": {"uri": "mem://a.txt"}}))
            .unwrap();

        run(
            &mut store,
            &registry,
            &hooks,
            &record.meta.id.to_string(),
            "/document/uri",
            false,
        )
        .unwrap();

        assert!(fs.contains("a.txt"));
        let stored = store.get(&record.meta.id).unwrap();
        assert_eq!(stored.data["document"]["uri"], json!(null));
    }

    #[test]
    fn force_deletes_the_file_and_fires_the_hook() {
        let (registry, fs) = registry_with_mem();
        vfs::set_contents(&fs, "a.txt", b"body").unwrap();
        let mut store = InMemoryStore::new();
        let mut hooks = HookRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        hooks.register(HookPoint::BeforeFileDelete, move |_event| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let record = store
            .create(json!({"document": {"uri": "mem://a.txt"}}))
            .unwrap();

        run(
            &mut store,
            &registry,
            &hooks,
            &record.meta.id.to_string(),
            "/document/uri",
            true,
        )
        .unwrap();

        assert!(!fs.contains("a.txt"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        let stored = store.get(&record.meta.id).unwrap();
        assert_eq!(stored.data["document"]["uri"], json!(null));
    }

    #[test]
    fn failed_force_delete_keeps_the_reference() {
        let (registry, _fs) = registry_with_mem();
        let mut store = InMemoryStore::new();
        let hooks = HookRegistry::new();
        let record = store
            .create(json!({"document": {"uri": "mem://missing.txt"}}))
            .unwrap();

        assert!(run(
            &mut store,
            &registry,
            &hooks,
            &record.meta.id.to_string(),
            "/document/uri",
            true,
        )
        .is_err());

        let stored = store.get(&record.meta.id).unwrap();
        assert_eq!(stored.data["document"]["uri"], json!("mem://missing.txt"));
    }

    #[test]
    fn force_without_reference_is_unresolved() {
        let (registry, _fs) = registry_with_mem();
        let mut store = InMemoryStore::new();
        let hooks = HookRegistry::new();
        let record = store.create(json!({"document": {"uri": null}})).unwrap();

        assert!(matches!(
            run(
                &mut store,
                &registry,
                &hooks,
                &record.meta.id.to_string(),
                "/document/uri",
                true,
            ),
            Err(DocrefError::UnresolvedUri(_))
        ));
    }
}
