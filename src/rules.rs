//! Field-specific semantic rules
//!
//! Shape checking alone cannot tell a valid `"radial"` from a bogus
//! `"rdaial"`. `FieldRules` maps a mapping key to a validator predicate
//! that is consulted when a type-matched primitive was reached under that
//! key. Rules never reject by raising an error: a failing predicate simply
//! causes the reconciler to fall back to the default value.

use crate::value::ConfigValue;
use std::collections::HashMap;
use std::fmt;

/// Gradient styles accepted for the `gradientType` field.
pub const GRADIENT_TYPES: [&str; 3] = ["linear", "radial", "halftone"];

/// A predicate deciding whether a type-matched primitive is acceptable.
pub type FieldValidator = Box<dyn Fn(&ConfigValue) -> bool + Send + Sync>;

/// Registry of field name -> validator predicate.
///
/// Keyed by the mapping key a value was reached under, not by its path, so
/// a rule for `"gradientType"` applies at any nesting depth.
pub struct FieldRules {
    validators: HashMap<String, FieldValidator>,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldRules {
    /// An empty registry: every type-matched primitive is accepted.
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// The shipped rule set: `gradientType` must be one of
    /// `linear`, `radial`, or `halftone`.
    pub fn builtin() -> Self {
        let mut rules = Self::empty();
        rules.one_of("gradientType", &GRADIENT_TYPES);
        rules
    }

    /// Register an enumerated-string rule: the value must be a string equal
    /// to one of `allowed`.
    pub fn one_of(&mut self, field: &str, allowed: &[&str]) -> &mut Self {
        let allowed: Vec<String> = allowed.iter().map(|s| s.to_string()).collect();
        self.register(field, move |value| {
            value
                .as_str()
                .is_some_and(|s| allowed.iter().any(|a| a == s))
        })
    }

    /// Register an arbitrary predicate for a field name, replacing any
    /// previous rule for that name.
    pub fn register<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: Fn(&ConfigValue) -> bool + Send + Sync + 'static,
    {
        self.validators
            .insert(field.to_string(), Box::new(validator));
        self
    }

    /// Whether `value` is acceptable under `field`. Fields without a
    /// registered rule accept everything.
    pub fn accepts(&self, field: &str, value: &ConfigValue) -> bool {
        match self.validators.get(field) {
            Some(validator) => validator(value),
            None => true,
        }
    }
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        fields.sort_unstable();
        f.debug_struct("FieldRules").field("fields", &fields).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_accepts_known_gradient_types() {
        let rules = FieldRules::builtin();
        for name in GRADIENT_TYPES {
            assert!(rules.accepts("gradientType", &ConfigValue::String(name.into())));
        }
    }

    #[test]
    fn builtin_rejects_unknown_gradient_type() {
        let rules = FieldRules::builtin();
        assert!(!rules.accepts("gradientType", &ConfigValue::String("bogus".into())));
    }

    #[test]
    fn rules_are_scoped_to_their_field_name() {
        let rules = FieldRules::builtin();
        // Other fields have no rule and accept anything.
        assert!(rules.accepts("label", &ConfigValue::String("bogus".into())));
    }

    #[test]
    fn one_of_requires_a_string() {
        let mut rules = FieldRules::empty();
        rules.one_of("mode", &["on", "off"]);
        assert!(!rules.accepts("mode", &ConfigValue::Bool(true)));
        assert!(rules.accepts("mode", &ConfigValue::String("off".into())));
    }

    #[test]
    fn register_replaces_previous_rule() {
        let mut rules = FieldRules::empty();
        rules.one_of("mode", &["on"]);
        rules.register("mode", |_| true);
        assert!(rules.accepts("mode", &ConfigValue::String("anything".into())));
    }

    #[test]
    fn custom_predicate_sees_the_value() {
        let mut rules = FieldRules::empty();
        rules.register("opacity", |value| match value {
            ConfigValue::Number(n) => n.as_f64().is_some_and(|f| (0.0..=1.0).contains(&f)),
            _ => false,
        });
        let in_range = ConfigValue::Number(serde_json::Number::from_f64(0.5).unwrap());
        let out_of_range = ConfigValue::Number(2.into());
        assert!(rules.accepts("opacity", &in_range));
        assert!(!rules.accepts("opacity", &out_of_range));
    }
}
