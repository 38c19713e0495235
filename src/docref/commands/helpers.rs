use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocrefError, Result};
use crate::hooks::HookError;
use crate::store::RecordStore;

/// Resolve user input to a record id: a full UUID, or a unique prefix of
/// its hyphenated lowercase form.
pub fn resolve_id<S: RecordStore>(store: &S, input: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }

    let needle = input.to_lowercase();
    let records = store.list()?;
    let mut matches = records
        .iter()
        .filter(|record| record.meta.id.to_string().starts_with(&needle))
        .map(|record| record.meta.id);

    let first = matches
        .next()
        .ok_or_else(|| DocrefError::Api(format!("No record matches id '{}'", input)))?;
    if matches.next().is_some() {
        return Err(DocrefError::Api(format!(
            "Id prefix '{}' is ambiguous",
            input
        )));
    }
    Ok(first)
}

/// Hook failures never abort the operation they observed; they surface
/// as warnings on the result.
pub fn report_hook_failures(result: &mut CmdResult, failures: Vec<HookError>) {
    for failure in failures {
        result.add_message(CmdMessage::warning(format!("Hook failed: {}", failure)));
    }
}
