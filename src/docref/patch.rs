//! Minimal JSON Patch (RFC 6902) descriptions.
//!
//! Only `replace` is produced here: copying a document yields the patch a
//! caller would apply to a derived record to point it at the copy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pointer::{self, PointerError};

/// A single JSON Patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Replace { path: String, value: Value },
}

impl PatchOp {
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        PatchOp::Replace {
            path: path.into(),
            value,
        }
    }

    /// Apply the operation to `target` in place.
    ///
    /// `replace` requires the path to already resolve, per RFC 6902.
    pub fn apply(&self, target: &mut Value) -> Result<(), PointerError> {
        match self {
            PatchOp::Replace { path, value } => {
                *pointer::resolve_mut(target, path)? = value.clone();
                Ok(())
            }
        }
    }
}
