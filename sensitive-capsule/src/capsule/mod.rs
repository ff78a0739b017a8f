//! Records, capsules, and the detach/attach entrypoints.
//!
//! - **`record`**: Domain layer - what a record is (`Record`, `FieldDescriptor`, `Shape`)
//! - **`detach`**: Application layer - splitting a record and putting it back
//!   (`Source`, `Capsule`, `detach`, `attach`)

mod detach;
mod record;

pub use detach::{attach, detach, Capsule, Source};
pub use record::{zero_field, FieldDescriptor, FieldVisibility, Record, SensitiveFields, Shape};
