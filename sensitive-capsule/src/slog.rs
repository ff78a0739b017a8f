//! Adapters for logging detached records through `slog`.
//!
//! Logging is the main reason to detach a record: the insensitive copy is what
//! should reach the log, and the capsule stays behind in memory. This module
//! provides `slog::Value` implementations that serialize the insensitive copy
//! as structured JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation comes from `detach`, never from the
//!   original value.
//! - Avoiding fallible logging APIs: detach or serialization failures are
//!   represented as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` and does not keep the capsule; callers that need
//! the original back should call [`crate::detach`] themselves.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::capsule::{detach, Source};

const DETACH_FAILED: &str = "Failed to detach value";
const SERIALIZE_FAILED: &str = "Failed to serialize detached value";

/// A `slog::Value` that emits the insensitive copy of a record as JSON.
pub struct DetachedJson {
    value: JsonValue,
}

impl DetachedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for DetachedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts records into a `slog::Value` that logs only their insensitive copy.
///
/// ## Example
/// ```ignore
/// use sensitive_capsule::slog::IntoDetachedJson;
///
/// info!(logger, "login"; "request" => request.into_detached_json());
/// ```
pub trait IntoDetachedJson: Source + Serialize {
    /// Detaches `self`, drops the capsule, and stores the insensitive copy as JSON.
    ///
    /// If the value cannot be detached, the stored JSON is the string
    /// `"Failed to detach value"`; if serialization fails, it is
    /// `"Failed to serialize detached value"`.
    fn into_detached_json(self) -> DetachedJson {
        let value = match detach(self) {
            Ok((insensitive, _capsule)) => serde_json::to_value(&insensitive)
                .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string())),
            Err(_) => JsonValue::String(DETACH_FAILED.to_string()),
        };
        DetachedJson::new(value)
    }
}

impl<T> IntoDetachedJson for T where T: Source + Serialize {}
