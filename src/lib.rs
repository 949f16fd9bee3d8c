//! Mend: Schema-Driven Configuration Reconciliation
//!
//! Heals an arbitrary, possibly malformed configuration value against a
//! trusted, fully-specified defaults value. The result is guaranteed to
//! have the defaults' shape at every level, with every well-typed,
//! semantically valid value from the candidate preserved and everything
//! else silently replaced by the corresponding default.
//!
//! ```
//! use mend::{reconcile, ConfigValue};
//!
//! let defaults = ConfigValue::from_json_str(
//!     r#"{"gradientType": "linear", "scale": 1.0, "colors": []}"#,
//! ).unwrap();
//! let current = ConfigValue::from_json_str(
//!     r#"{"gradientType": "bogus", "scale": 2.0, "stale": true}"#,
//! ).unwrap();
//!
//! let healed = reconcile(&current, &defaults);
//! assert_eq!(healed.get("gradientType").and_then(|v| v.as_str()), Some("linear"));
//! ```

pub mod error;
pub mod reconcile;
pub mod rules;
pub mod value;

pub use error::ValueError;
pub use reconcile::{reconcile, Reconciler};
pub use rules::FieldRules;
pub use value::{ConfigValue, Mapping, ValueKind};
