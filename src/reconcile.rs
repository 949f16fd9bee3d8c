//! Configuration reconciliation
//!
//! The reconciler walks a candidate value and a trusted defaults value in
//! lockstep and returns a corrected value with exactly the defaults' shape:
//! same key set, same branching (mapping vs sequence vs primitive) at every
//! node. Anything missing, wrong-typed, or semantically invalid in the
//! candidate is replaced by the corresponding default at the point of
//! failure, so one bad leaf never invalidates its siblings. Nothing is
//! reported to the caller; corrections are only visible as `debug!` events.

use crate::rules::FieldRules;
use crate::value::{ConfigValue, Mapping};
use tracing::debug;

/// Reconciles candidate configuration values against a defaults tree.
///
/// Holds the field-rule table consulted at primitive leaves. The reconciler
/// never mutates its inputs and never fails: for any pair of values it
/// returns a value with the defaults' shape.
#[derive(Debug, Default)]
pub struct Reconciler {
    rules: FieldRules,
}

impl Reconciler {
    /// A reconciler with the built-in rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reconciler with a caller-supplied rule table.
    pub fn with_rules(rules: FieldRules) -> Self {
        Self { rules }
    }

    /// Reconcile `current` against `defaults`.
    ///
    /// `Null` at the root counts as absent and yields a deep copy of
    /// `defaults`. The returned value never shares structure with either
    /// input.
    pub fn reconcile(&self, current: &ConfigValue, defaults: &ConfigValue) -> ConfigValue {
        self.heal(Some(current), defaults, None)
    }

    /// Reconcile a subtree as if it had been reached under the mapping key
    /// `field`, so field-specific rules apply at its root.
    pub fn reconcile_field(
        &self,
        current: &ConfigValue,
        defaults: &ConfigValue,
        field: &str,
    ) -> ConfigValue {
        self.heal(Some(current), defaults, Some(field))
    }

    /// One step of the recursion. `current` is `None` when the key was
    /// missing from the candidate mapping; `field` is the mapping key this
    /// value was reached under, `None` at the root.
    fn heal(
        &self,
        current: Option<&ConfigValue>,
        defaults: &ConfigValue,
        field: Option<&str>,
    ) -> ConfigValue {
        // Absent or null: take the whole default subtree.
        let current = match current {
            None | Some(ConfigValue::Null) => {
                if !defaults.is_null() {
                    debug!(field = field.unwrap_or("<root>"), "value absent, using default");
                }
                return defaults.clone();
            }
            Some(current) => current,
        };

        match defaults {
            // Sequence contents are not validated, only the shape is.
            ConfigValue::Sequence(_) => match current {
                ConfigValue::Sequence(_) => current.clone(),
                _ => self.fall_back(current, defaults, field, "expected a sequence"),
            },

            // Iteration is driven by the defaults' key set: extra keys in
            // the candidate are dropped, missing keys are filled.
            ConfigValue::Mapping(default_entries) => match current {
                ConfigValue::Mapping(current_entries) => {
                    let healed: Mapping = default_entries
                        .iter()
                        .map(|(key, default_value)| {
                            let value =
                                self.heal(current_entries.get(key), default_value, Some(key));
                            (key.clone(), value)
                        })
                        .collect();
                    ConfigValue::Mapping(healed)
                }
                _ => self.fall_back(current, defaults, field, "expected a mapping"),
            },

            // Primitive (or null) default: the candidate must match the
            // defaults' kind, then pass any rule registered for this field.
            _ => {
                if current.kind() != defaults.kind() {
                    return self.fall_back(current, defaults, field, "kind mismatch");
                }
                if let Some(field_name) = field {
                    if !self.rules.accepts(field_name, current) {
                        return self.fall_back(current, defaults, field, "rejected by field rule");
                    }
                }
                current.clone()
            }
        }
    }

    fn fall_back(
        &self,
        current: &ConfigValue,
        defaults: &ConfigValue,
        field: Option<&str>,
        reason: &str,
    ) -> ConfigValue {
        debug!(
            field = field.unwrap_or("<root>"),
            expected = %defaults.kind(),
            found = %current.kind(),
            reason,
            "replacing value with default"
        );
        defaults.clone()
    }
}

/// Reconcile `current` against `defaults` using the built-in rule set.
pub fn reconcile(current: &ConfigValue, defaults: &ConfigValue) -> ConfigValue {
    Reconciler::new().reconcile(current, defaults)
}
