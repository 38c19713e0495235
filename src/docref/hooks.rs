//! Extension points around record and file mutations.
//!
//! Callers register plain callbacks against a [`HookPoint`]; the command
//! layer notifies them as operations happen. Hooks observe, they do not
//! veto: a failing hook is collected and reported, and the operation it
//! watched still completes.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::model::Record;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HookError(String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Where in an operation a hook fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    BeforeRecordInsert,
    AfterRecordInsert,
    BeforeRecordUpdate,
    AfterRecordUpdate,
    BeforeContentSet,
    AfterContentSet,
    BeforeFileDelete,
}

/// What a hook gets to see. Borrows stay valid only for the call.
#[derive(Debug)]
pub enum HookEvent<'a> {
    BeforeRecordInsert { data: &'a Value },
    AfterRecordInsert { record: &'a Record },
    BeforeRecordUpdate { record: &'a Record },
    AfterRecordUpdate { record: &'a Record },
    BeforeContentSet { uri: &'a str },
    AfterContentSet { uri: &'a str },
    BeforeFileDelete { uri: &'a str },
}

impl HookEvent<'_> {
    pub fn point(&self) -> HookPoint {
        match self {
            HookEvent::BeforeRecordInsert { .. } => HookPoint::BeforeRecordInsert,
            HookEvent::AfterRecordInsert { .. } => HookPoint::AfterRecordInsert,
            HookEvent::BeforeRecordUpdate { .. } => HookPoint::BeforeRecordUpdate,
            HookEvent::AfterRecordUpdate { .. } => HookPoint::AfterRecordUpdate,
            HookEvent::BeforeContentSet { .. } => HookPoint::BeforeContentSet,
            HookEvent::AfterContentSet { .. } => HookPoint::AfterContentSet,
            HookEvent::BeforeFileDelete { .. } => HookPoint::BeforeFileDelete,
        }
    }
}

type HookFn = Box<dyn Fn(&HookEvent) -> Result<(), HookError> + Send + Sync>;

/// Ordered callback lists, one per hook point.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<HookPoint, Vec<HookFn>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, point: HookPoint, hook: F)
    where
        F: Fn(&HookEvent) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.entry(point).or_default().push(Box::new(hook));
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }

    /// Run every hook registered for the event's point, in registration
    /// order. Failures are collected, not short-circuited.
    pub fn notify(&self, event: &HookEvent) -> Vec<HookError> {
        let Some(hooks) = self.hooks.get(&event.point()) else {
            return Vec::new();
        };
        hooks.iter().filter_map(|hook| hook(event).err()).collect()
    }
}
