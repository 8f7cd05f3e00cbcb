use clap::ValueEnum;
use serde_json::Value;
use vack_client::state::{VersionedSlot, VersionedState};
use vack_core::{AckResult, Version};

/// JSON shape a stored value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    Any,
    String,
    Number,
    Object,
}

impl ValueKind {
    pub fn accepts(self, raw: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => raw.is_string(),
            Self::Number => raw.is_number(),
            Self::Object => raw.is_object(),
        }
    }
}

/// Persisted slot that only accepts values of one kind.
pub struct KindedSlot<'a> {
    pub slot: &'a mut VersionedSlot<Value>,
    pub kind: ValueKind,
}

impl VersionedState for KindedSlot<'_> {
    type Value = Value;

    fn parse_value(&self, raw: &Value) -> Option<Value> {
        self.kind.accepts(raw).then(|| raw.clone())
    }

    fn apply_value(&mut self, value: Option<Value>) {
        self.slot.apply_value(value);
    }

    fn apply_version(&mut self, version: Version) {
        self.slot.apply_version(version);
    }

    fn log_invalid_value(&mut self, context: AckResult, version: Version) {
        self.slot.log_invalid_value(context, version);
    }
}
