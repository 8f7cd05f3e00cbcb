use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};
use vack_core::{AckResult, Version};

/// Caller-owned state that acknowledgments are applied to.
///
/// The processor calls these in a fixed order within one acknowledgment:
/// `parse_value`, then either `apply_value` or `log_invalid_value`, then
/// `apply_version`.
pub trait VersionedState {
    type Value;

    /// Parses a present, non-null raw value. `None` marks it invalid.
    fn parse_value(&self, raw: &Value) -> Option<Self::Value>;

    /// Replaces the value slot. `None` clears it.
    fn apply_value(&mut self, value: Option<Self::Value>);

    fn apply_version(&mut self, version: Version);

    /// Reports a value that failed to parse on an otherwise valid response.
    fn log_invalid_value(&mut self, context: AckResult, version: Version);
}

/// [`VersionedState`] assembled from four closures.
pub struct AckCallbacks<T, P, V, R, L> {
    parse: P,
    apply_value: V,
    apply_version: R,
    log_invalid: L,
    _value: PhantomData<fn() -> T>,
}

impl<T, P, V, R, L> AckCallbacks<T, P, V, R, L>
where
    P: Fn(&Value) -> Option<T>,
    V: FnMut(Option<T>),
    R: FnMut(Version),
    L: FnMut(AckResult, Version),
{
    pub fn new(parse: P, apply_value: V, apply_version: R, log_invalid: L) -> Self {
        Self {
            parse,
            apply_value,
            apply_version,
            log_invalid,
            _value: PhantomData,
        }
    }
}

impl<T, P, V, R, L> fmt::Debug for AckCallbacks<T, P, V, R, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AckCallbacks").finish_non_exhaustive()
    }
}

impl<T, P, V, R, L> VersionedState for AckCallbacks<T, P, V, R, L>
where
    P: Fn(&Value) -> Option<T>,
    V: FnMut(Option<T>),
    R: FnMut(Version),
    L: FnMut(AckResult, Version),
{
    type Value = T;

    fn parse_value(&self, raw: &Value) -> Option<T> {
        (self.parse)(raw)
    }

    fn apply_value(&mut self, value: Option<T>) {
        (self.apply_value)(value)
    }

    fn apply_version(&mut self, version: Version) {
        (self.apply_version)(version)
    }

    fn log_invalid_value(&mut self, context: AckResult, version: Version) {
        (self.log_invalid)(context, version)
    }
}

/// Invalid-value records kept by a [`VersionedSlot`]; older ones are dropped.
pub const MAX_INVALID_VALUE_RECORDS: usize = 32;

/// One value that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidValueRecord {
    pub context: AckResult,
    pub version: Version,
}

/// Owned value slot with its version counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedSlot<T> {
    pub value: Option<T>,
    pub version: Version,
    /// Most recent values rejected by the parser, oldest first, at most
    /// [`MAX_INVALID_VALUE_RECORDS`].
    #[serde(default)]
    pub invalid_values: VecDeque<InvalidValueRecord>,
}

impl<T> VersionedSlot<T> {
    pub fn new(value: Option<T>, version: Version) -> Self {
        Self {
            value,
            version,
            invalid_values: VecDeque::new(),
        }
    }
}

impl<T> Default for VersionedSlot<T> {
    fn default() -> Self {
        Self::new(None, Version::default())
    }
}

impl<T: DeserializeOwned> VersionedState for VersionedSlot<T> {
    type Value = T;

    fn parse_value(&self, raw: &Value) -> Option<T> {
        T::deserialize(raw).ok()
    }

    fn apply_value(&mut self, value: Option<T>) {
        trace!(present = value.is_some(), "value slot replaced");
        self.value = value;
    }

    fn apply_version(&mut self, version: Version) {
        trace!(from = %self.version, to = %version, "version advanced");
        self.version = version;
    }

    fn log_invalid_value(&mut self, context: AckResult, version: Version) {
        warn!(%context, %version, "acknowledged value failed to parse");
        while self.invalid_values.len() >= MAX_INVALID_VALUE_RECORDS {
            self.invalid_values.pop_front();
        }
        self.invalid_values.push_back(InvalidValueRecord { context, version });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;
    use vack_core::{AckResult, Version};

    use super::{
        AckCallbacks, InvalidValueRecord, VersionedSlot, VersionedState, MAX_INVALID_VALUE_RECORDS,
    };

    #[test]
    fn slot_parses_with_serde() {
        let slot: VersionedSlot<String> = VersionedSlot::default();
        assert_eq!(slot.parse_value(&json!("x")), Some("x".to_string()));
        assert_eq!(slot.parse_value(&json!(123)), None);
    }

    #[test]
    fn slot_records_invalid_values() {
        let mut slot = VersionedSlot::new(Some(1_u32), Version(1));
        slot.log_invalid_value(AckResult::VersionMismatch, Version(4));
        assert_eq!(
            slot.invalid_values,
            vec![InvalidValueRecord {
                context: AckResult::VersionMismatch,
                version: Version(4),
            }]
        );
        assert_eq!(slot.value, Some(1));
        assert_eq!(slot.version, Version(1));
    }

    #[test]
    fn slot_keeps_only_recent_invalid_values() {
        let mut slot: VersionedSlot<u32> = VersionedSlot::default();
        for n in 0..40 {
            slot.log_invalid_value(AckResult::Success, Version(n));
        }
        assert_eq!(slot.invalid_values.len(), MAX_INVALID_VALUE_RECORDS);
        assert_eq!(
            slot.invalid_values.front().map(|record| record.version),
            Some(Version(8))
        );
        assert_eq!(
            slot.invalid_values.back().map(|record| record.version),
            Some(Version(39))
        );
    }

    #[test]
    fn oversized_persisted_log_is_trimmed_on_next_record() {
        let mut slot: VersionedSlot<u32> = VersionedSlot::default();
        slot.invalid_values = (0..50)
            .map(|n| InvalidValueRecord {
                context: AckResult::VersionMismatch,
                version: Version(n),
            })
            .collect();
        slot.log_invalid_value(AckResult::Success, Version(50));
        assert_eq!(slot.invalid_values.len(), MAX_INVALID_VALUE_RECORDS);
        assert_eq!(
            slot.invalid_values.front().map(|record| record.version),
            Some(Version(19))
        );
    }

    #[test]
    fn callbacks_forward_to_closures() {
        let applied = RefCell::new(Vec::new());
        {
            let mut callbacks = AckCallbacks::new(
                |raw: &serde_json::Value| raw.as_i64(),
                |value| applied.borrow_mut().push(format!("value {value:?}")),
                |version| applied.borrow_mut().push(format!("version {version}")),
                |context, version| {
                    applied
                        .borrow_mut()
                        .push(format!("invalid {context} {version}"))
                },
            );

            assert_eq!(callbacks.parse_value(&json!(5)), Some(5));
            callbacks.apply_value(Some(5));
            callbacks.apply_version(Version(2));
            callbacks.log_invalid_value(AckResult::Success, Version(2));
        }

        assert_eq!(
            applied.into_inner(),
            vec![
                "value Some(5)".to_string(),
                "version 2".to_string(),
                "invalid success 2".to_string(),
            ]
        );
    }
}
