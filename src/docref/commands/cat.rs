use std::io::Read as _;

use crate::commands::CmdResult;
use crate::document::Document;
use crate::error::Result;
use crate::store::RecordStore;
use crate::vfs::{OpenMode, SchemeRegistry};

use super::helpers::resolve_id;

pub fn run<S: RecordStore>(
    store: &S,
    registry: &SchemeRegistry,
    id_input: &str,
    pointer: &str,
) -> Result<CmdResult> {
    let id = resolve_id(store, id_input)?;
    let mut record = store.get(&id)?;
    let doc = Document::new(&mut record.data, pointer).with_resolver(registry);

    let mut handle = doc.open(OpenMode::Read)?;
    let mut content = Vec::new();
    handle.read_to_end(&mut content)?;

    Ok(CmdResult::default().with_content(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocrefError;
    use crate::store::memory::InMemoryStore;
    use crate::vfs::{self, memfs::MemFs};
    use serde_json::json;
    use std::sync::Arc;

    fn registry_with_mem() -> (SchemeRegistry, MemFs) {
        let mem = MemFs::new();
        let mut registry = SchemeRegistry::new();
        registry.register("mem", Arc::new(mem.clone()));
        (registry, mem)
    }

    #[test]
    fn returns_the_file_bytes() {
        let (registry, fs) = registry_with_mem();
        vfs::set_contents(&fs, "a.txt", b"file body").unwrap();
        let mut store = InMemoryStore::new();
        let record = store
            .create(json!({"document": {"uri": "mem://a.txt"}}))
            .unwrap();

        let result = run(
            &store,
            &registry,
            &record.meta.id.to_string(),
            "/document/uri",
        )
        .unwrap();
        assert_eq!(result.content.as_deref(), Some(&b"file body"[..]));
    }

    #[test]
    fn missing_reference_is_unresolved() {
        let (registry, _fs) = registry_with_mem();
        let mut store = InMemoryStore::new();
        let record = store.create(json!({"document": {"uri": null}})).unwrap();

        assert!(matches!(
            run(
                &store,
                &registry,
                &record.meta.id.to_string(),
                "/document/uri"
            ),
            Err(DocrefError::UnresolvedUri(_))
        ));
    }
}
