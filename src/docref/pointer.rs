//! JSON Pointer (RFC 6901) resolution over `serde_json::Value`.
//!
//! Two read paths exist because the document layer needs them both:
//! [`resolve`] requires every token to resolve, while [`resolve_opt`]
//! tolerates a missing *final* token (an unset field reads as absent, a
//! missing intermediate is still an error). [`set`] writes through a
//! pointer, creating intermediate containers as it goes.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer '{0}' must be empty or start with '/'")]
    Syntax(String),
    #[error("pointer '{pointer}' has nothing at '{token}'")]
    Unresolved { pointer: String, token: String },
    #[error("pointer '{pointer}' has invalid array index '{token}'")]
    BadIndex { pointer: String, token: String },
    #[error("pointer '{pointer}' hits a non-container value at '{token}'")]
    NotAContainer { pointer: String, token: String },
}

type PointerResult<T> = std::result::Result<T, PointerError>;

/// Split a pointer into unescaped reference tokens.
///
/// The empty pointer refers to the whole document and yields no tokens.
/// Unescaping order matters: `~1` becomes `/` before `~0` becomes `~`.
pub fn parse(pointer: &str) -> PointerResult<Vec<String>> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    if !pointer.starts_with('/') {
        return Err(PointerError::Syntax(pointer.to_string()));
    }
    Ok(pointer[1..]
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect())
}

/// Resolve `pointer` against `value`, requiring every token to resolve.
pub fn resolve<'a>(value: &'a Value, pointer: &str) -> PointerResult<&'a Value> {
    let tokens = parse(pointer)?;
    let mut current = value;
    for token in &tokens {
        current = descend(current, token, pointer)?;
    }
    Ok(current)
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(value: &'a mut Value, pointer: &str) -> PointerResult<&'a mut Value> {
    let tokens = parse(pointer)?;
    let mut current = value;
    for token in &tokens {
        current = descend_mut(current, token, pointer)?;
    }
    Ok(current)
}

/// Resolve `pointer`, treating a missing final token as an absent value.
///
/// Intermediate tokens must still resolve. An out-of-range index (or `-`)
/// as the final token also reads as absent, as long as the parent is an
/// array.
pub fn resolve_opt<'a>(value: &'a Value, pointer: &str) -> PointerResult<Option<&'a Value>> {
    let tokens = parse(pointer)?;
    let (last, parents) = match tokens.split_last() {
        Some(split) => split,
        None => return Ok(Some(value)),
    };
    let mut current = value;
    for token in parents {
        current = descend(current, token, pointer)?;
    }
    match current {
        Value::Object(map) => Ok(map.get(last.as_str())),
        Value::Array(items) => {
            let index = array_index(last, items.len(), pointer)?;
            Ok(items.get(index))
        }
        _ => Err(PointerError::NotAContainer {
            pointer: pointer.to_string(),
            token: last.clone(),
        }),
    }
}

/// Write `new_value` at `pointer`, creating intermediate containers.
///
/// A missing intermediate becomes an array when the token indexing into it
/// is `0` or `-`, an object otherwise. Array writes accept an existing
/// index, the current length, or `-` (both append); larger indices are
/// rejected. The empty pointer replaces the whole document.
pub fn set(value: &mut Value, pointer: &str, new_value: Value) -> PointerResult<()> {
    let tokens = parse(pointer)?;
    let (last, parents) = match tokens.split_last() {
        Some(split) => split,
        None => {
            *value = new_value;
            return Ok(());
        }
    };
    let mut current = value;
    for (i, token) in parents.iter().enumerate() {
        current = descend_or_create(current, token, tokens[i + 1].as_str(), pointer)?;
    }
    insert(current, last, new_value, pointer)
}

fn descend<'a>(value: &'a Value, token: &str, pointer: &str) -> PointerResult<&'a Value> {
    match value {
        Value::Object(map) => map.get(token).ok_or_else(|| PointerError::Unresolved {
            pointer: pointer.to_string(),
            token: token.to_string(),
        }),
        Value::Array(items) => {
            let index = array_index(token, items.len(), pointer)?;
            items.get(index).ok_or_else(|| PointerError::Unresolved {
                pointer: pointer.to_string(),
                token: token.to_string(),
            })
        }
        _ => Err(PointerError::NotAContainer {
            pointer: pointer.to_string(),
            token: token.to_string(),
        }),
    }
}

fn descend_mut<'a>(
    value: &'a mut Value,
    token: &str,
    pointer: &str,
) -> PointerResult<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(token).ok_or_else(|| PointerError::Unresolved {
            pointer: pointer.to_string(),
            token: token.to_string(),
        }),
        Value::Array(items) => {
            let index = array_index(token, items.len(), pointer)?;
            items.get_mut(index).ok_or_else(|| PointerError::Unresolved {
                pointer: pointer.to_string(),
                token: token.to_string(),
            })
        }
        _ => Err(PointerError::NotAContainer {
            pointer: pointer.to_string(),
            token: token.to_string(),
        }),
    }
}

fn descend_or_create<'a>(
    value: &'a mut Value,
    token: &str,
    next: &str,
    pointer: &str,
) -> PointerResult<&'a mut Value> {
    if value.is_null() {
        *value = empty_container(token);
    }
    match value {
        Value::Object(map) => Ok(map
            .entry(token.to_string())
            .or_insert_with(|| empty_container(next))),
        Value::Array(items) => {
            let index = array_index(token, items.len(), pointer)?;
            if index > items.len() {
                return Err(PointerError::BadIndex {
                    pointer: pointer.to_string(),
                    token: token.to_string(),
                });
            }
            if index == items.len() {
                items.push(empty_container(next));
            }
            Ok(&mut items[index])
        }
        _ => Err(PointerError::NotAContainer {
            pointer: pointer.to_string(),
            token: token.to_string(),
        }),
    }
}

fn insert(parent: &mut Value, token: &str, new_value: Value, pointer: &str) -> PointerResult<()> {
    if parent.is_null() {
        *parent = empty_container(token);
    }
    match parent {
        Value::Object(map) => {
            map.insert(token.to_string(), new_value);
            Ok(())
        }
        Value::Array(items) => {
            let index = array_index(token, items.len(), pointer)?;
            if index > items.len() {
                return Err(PointerError::BadIndex {
                    pointer: pointer.to_string(),
                    token: token.to_string(),
                });
            }
            if index == items.len() {
                items.push(new_value);
            } else {
                items[index] = new_value;
            }
            Ok(())
        }
        _ => Err(PointerError::NotAContainer {
            pointer: pointer.to_string(),
            token: token.to_string(),
        }),
    }
}

fn empty_container(token: &str) -> Value {
    if token == "0" || token == "-" {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

// `-` addresses past-the-end, so it never resolves on a read but appends
// on a write.
fn array_index(token: &str, len: usize, pointer: &str) -> PointerResult<usize> {
    if token == "-" {
        return Ok(len);
    }
    if token.len() > 1 && token.starts_with('0') {
        return Err(PointerError::BadIndex {
            pointer: pointer.to_string(),
            token: token.to_string(),
        });
    }
    token.parse::<usize>().map_err(|_| PointerError::BadIndex {
        pointer: pointer.to_string(),
        token: token.to_string(),
    })
}
