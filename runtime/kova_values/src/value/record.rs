//! Compound record values.
//!
//! A record is the one mutable value shape: a string-keyed field map
//! behind an `RwLock`. The `operators` slot decides overloadability and is
//! fixed at construction — the overload machinery depends on a type's
//! tables never changing for the lifetime of its values.
//!
//! Records optionally carry two primitive-conversion hooks, `value_of` and
//! `to_text`, tried in that fixed order when an operator requires
//! reduction to a primitive.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;

use crate::sets::SharedSet;
use crate::value::Value;

/// Primitive-conversion hook.
///
/// Plain function pointer: conversion behavior belongs to the record's
/// shape, not to captured state.
pub type CoerceFn = fn(&RecordValue) -> Option<Value>;

/// Compound value with optional operator set and conversion hooks.
pub struct RecordValue {
    /// Operator set attached at construction; `Some` makes every value
    /// holding this record an overloaded operand.
    operators: Option<SharedSet>,
    /// Ordinary string-keyed property storage.
    fields: RwLock<FxHashMap<String, Value>>,
    /// Value-producing conversion hook, tried first during reduction.
    value_of: Option<CoerceFn>,
    /// Text-producing conversion hook, tried second.
    to_text: Option<CoerceFn>,
}

impl RecordValue {
    /// Create an untagged record (classifies as a plain operand).
    pub fn plain() -> Self {
        Self {
            operators: None,
            fields: RwLock::new(FxHashMap::default()),
            value_of: None,
            to_text: None,
        }
    }

    /// Create a record tagged with an operator set (classifies as an
    /// overloaded operand).
    pub fn with_operators(set: SharedSet) -> Self {
        Self {
            operators: Some(set),
            ..Self::plain()
        }
    }

    /// Add a field (builder form, used at construction sites).
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.get_mut().insert(name.into(), value);
        self
    }

    /// Install the value-producing conversion hook.
    pub fn with_value_of(mut self, hook: CoerceFn) -> Self {
        self.value_of = Some(hook);
        self
    }

    /// Install the text-producing conversion hook.
    pub fn with_to_text(mut self, hook: CoerceFn) -> Self {
        self.to_text = Some(hook);
        self
    }

    /// The operator set this record was tagged with, if any.
    pub fn operators(&self) -> Option<&SharedSet> {
        self.operators.as_ref()
    }

    /// Read a field.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }

    /// Write a field.
    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        self.fields.write().insert(name.into(), value);
    }

    /// Run the value-producing hook.
    pub fn run_value_of(&self) -> Option<Value> {
        self.value_of.and_then(|hook| hook(self))
    }

    /// Run the text-producing hook.
    pub fn run_to_text(&self) -> Option<Value> {
        self.to_text.and_then(|hook| hook(self))
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RecordValue");
        match &self.operators {
            Some(set) => s.field("operators", &set.name()),
            None => s.field("operators", &"<none>"),
        };
        s.field("fields", &self.fields.read().len()).finish()
    }
}
