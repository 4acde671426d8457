//! Parameter schemas and validation.
//!
//! A schema is static data describing every parameter an archetype accepts.
//! Validation turns an arbitrary caller-supplied [`ParameterValues`] map into
//! a complete one: missing entries take their defaults, numbers are clamped
//! into range and snapped onto the step grid. Names the schema does not
//! declare, values of the wrong kind and non-finite numbers are rejected,
//! since they can only come from a caller bug.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ParameterError, Result};

/// Distance from a whole number of steps still treated as on the grid.
const GRID_TOLERANCE: f64 = 1e-9;

/// How a parameter is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// A numeric slider.
    Slider,
    /// A numeric text field.
    Input,
    /// A boolean switch.
    Toggle,
}

/// A single parameter value.
///
/// Serialized untagged, so JSON `1.5` and `true` map directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Parameter values keyed by name. Ordered so iteration is deterministic.
pub type ParameterValues = BTreeMap<String, ParameterValue>;

/// Declaration of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Name used as the key in [`ParameterValues`].
    pub name: &'static str,
    /// Presentation hint.
    pub kind: ParameterKind,
    /// Value used when the caller supplies none.
    pub default: ParameterValue,
    /// Smallest accepted number (ignored for toggles).
    pub min: f64,
    /// Largest accepted number (ignored for toggles).
    pub max: f64,
    /// Granularity of accepted numbers (ignored for toggles).
    pub step: f64,
}

impl ParameterSpec {
    /// Declares a numeric slider.
    #[must_use]
    pub const fn slider(name: &'static str, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            name,
            kind: ParameterKind::Slider,
            default: ParameterValue::Number(default),
            min,
            max,
            step,
        }
    }

    /// Declares a numeric text field.
    #[must_use]
    pub const fn input(name: &'static str, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            name,
            kind: ParameterKind::Input,
            default: ParameterValue::Number(default),
            min,
            max,
            step,
        }
    }

    /// Declares a boolean toggle.
    #[must_use]
    pub const fn toggle(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ParameterKind::Toggle,
            default: ParameterValue::Bool(default),
            min: 0.0,
            max: 1.0,
            step: 1.0,
        }
    }

    /// Clamps `value` into `[min, max]` and snaps it onto the step grid
    /// anchored at `min`.
    ///
    /// A value already in range and on the grid is returned bit-for-bit, so
    /// validating valid parameters never perturbs them.
    #[must_use]
    pub fn constrain(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = (clamped - self.min) / self.step;
        if (steps - steps.round()).abs() < GRID_TOLERANCE {
            return clamped;
        }
        let mut snapped = self.min + steps.round() * self.step;
        // A range that is not a whole number of steps can round past max.
        if snapped > self.max {
            snapped -= self.step;
        }
        snapped
    }

    fn validate(&self, archetype: &'static str, value: ParameterValue) -> Result<ParameterValue> {
        match (self.kind, value) {
            (ParameterKind::Toggle, ParameterValue::Bool(_)) => Ok(value),
            (ParameterKind::Toggle, ParameterValue::Number(_)) => Err(ParameterError::KindMismatch {
                name: self.name,
                expected: "boolean",
            }
            .into()),
            (_, ParameterValue::Bool(_)) => Err(ParameterError::KindMismatch {
                name: self.name,
                expected: "numeric",
            }
            .into()),
            (_, ParameterValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(ParameterError::NonFinite { name: self.name }.into());
                }
                let constrained = self.constrain(n);
                if (constrained - n).abs() > 1e-9 {
                    warn!(
                        archetype,
                        parameter = self.name,
                        requested = n,
                        applied = constrained,
                        "parameter adjusted to schema range"
                    );
                }
                Ok(ParameterValue::Number(constrained))
            }
        }
    }
}

/// The ordered parameter declarations of one archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSchema {
    /// Archetype name used in diagnostics.
    pub archetype: &'static str,
    /// Parameter declarations in presentation order.
    pub specs: &'static [ParameterSpec],
}

impl ParameterSchema {
    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static ParameterSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Every parameter at its default value.
    #[must_use]
    pub fn defaults(&self) -> ParameterValues {
        self.specs
            .iter()
            .map(|s| (s.name.to_owned(), s.default))
            .collect()
    }

    /// Validates one value against its declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the name is unknown, the kind is wrong or
    /// the number is not finite.
    pub fn validate_one(&self, name: &str, value: ParameterValue) -> Result<ParameterValue> {
        let spec = self.get(name).ok_or_else(|| ParameterError::Unknown {
            archetype: self.archetype,
            name: name.to_owned(),
        })?;
        spec.validate(self.archetype, value)
    }

    /// Validates a value map and completes it with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] on the first value that cannot be accepted.
    pub fn validate(&self, values: &ParameterValues) -> Result<ParameterValues> {
        let mut out = self.defaults();
        for (name, value) in values {
            let accepted = self.validate_one(name, *value)?;
            out.insert(name.clone(), accepted);
        }
        Ok(out)
    }
}

/// Builds a value map from literal entries.
pub(crate) fn value_map<const N: usize>(entries: [(&str, ParameterValue); N]) -> ParameterValues {
    entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

/// Typed read access to a validated value map.
pub(crate) struct ValueReader<'a> {
    schema: &'a ParameterSchema,
    values: &'a ParameterValues,
}

impl<'a> ValueReader<'a> {
    pub(crate) fn new(schema: &'a ParameterSchema, values: &'a ParameterValues) -> Self {
        Self { schema, values }
    }

    fn lookup(&self, name: &'static str) -> Result<ParameterValue> {
        self.values
            .get(name)
            .copied()
            .or_else(|| self.schema.get(name).map(|s| s.default))
            .ok_or_else(|| {
                ParameterError::Unknown {
                    archetype: self.schema.archetype,
                    name: name.to_owned(),
                }
                .into()
            })
    }

    pub(crate) fn number(&self, name: &'static str) -> Result<f64> {
        match self.lookup(name)? {
            ParameterValue::Number(n) => Ok(n),
            ParameterValue::Bool(_) => Err(ParameterError::KindMismatch {
                name,
                expected: "numeric",
            }
            .into()),
        }
    }

    pub(crate) fn flag(&self, name: &'static str) -> Result<bool> {
        match self.lookup(name)? {
            ParameterValue::Bool(b) => Ok(b),
            ParameterValue::Number(_) => Err(ParameterError::KindMismatch {
                name,
                expected: "boolean",
            }
            .into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::JewelgenError;

    const SPECS: &[ParameterSpec] = &[
        ParameterSpec::slider("radius", 9.0, 7.0, 12.0, 0.5),
        ParameterSpec::input("steps", 100.0, 10.0, 1000.0, 1.0),
        ParameterSpec::slider("odd", 0.0, 0.0, 1.0, 0.3),
        ParameterSpec::toggle("twist_all", true),
    ];

    const SCHEMA: ParameterSchema = ParameterSchema {
        archetype: "test",
        specs: SPECS,
    };

    fn values(entries: &[(&str, ParameterValue)]) -> ParameterValues {
        entries.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
    }

    #[test]
    fn defaults_cover_every_parameter() {
        let d = SCHEMA.defaults();
        assert_eq!(d.len(), 4);
        assert_eq!(d["radius"], ParameterValue::Number(9.0));
        assert_eq!(d["twist_all"], ParameterValue::Bool(true));
    }

    #[test]
    fn out_of_range_numbers_are_clamped() {
        let v = SCHEMA
            .validate(&values(&[("radius", 40.0.into()), ("steps", (-5.0).into())]))
            .unwrap();
        assert_eq!(v["radius"], ParameterValue::Number(12.0));
        assert_eq!(v["steps"], ParameterValue::Number(10.0));
    }

    #[test]
    fn numbers_snap_to_step() {
        let v = SCHEMA.validate(&values(&[("radius", 9.3.into())])).unwrap();
        assert_eq!(v["radius"], ParameterValue::Number(9.5));
    }

    #[test]
    fn snapping_never_exceeds_max() {
        let spec = SCHEMA.get("odd").unwrap();
        let snapped = spec.constrain(1.0);
        assert!(snapped <= 1.0);
        assert_relative_eq!(snapped, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn on_grid_values_pass_through_unchanged() {
        let spec = ParameterSpec::slider("height", 1.2, 0.5, 3.0, 0.05);
        for value in [0.5, 1.2, 1.35, 2.95, 3.0] {
            assert_eq!(spec.constrain(value).to_bits(), f64::to_bits(value));
        }
        let radius = SCHEMA.get("radius").unwrap();
        assert_eq!(radius.constrain(12.0).to_bits(), 12.0_f64.to_bits());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = SCHEMA.validate(&values(&[("colour", 1.0.into())])).unwrap_err();
        assert!(matches!(err, JewelgenError::Parameter(ParameterError::Unknown { .. })));
    }

    #[test]
    fn wrong_kind_is_rejected() {
        assert!(SCHEMA.validate(&values(&[("radius", true.into())])).is_err());
        assert!(SCHEMA.validate(&values(&[("twist_all", 1.0.into())])).is_err());
    }

    #[test]
    fn non_finite_is_rejected() {
        let err = SCHEMA.validate(&values(&[("radius", f64::NAN.into())])).unwrap_err();
        assert!(matches!(err, JewelgenError::Parameter(ParameterError::NonFinite { .. })));
    }

    #[test]
    fn values_parse_from_json() {
        let parsed: ParameterValues = serde_json::from_str(r#"{"radius": 10.5, "twist_all": false}"#).unwrap();
        assert_eq!(parsed["radius"], ParameterValue::Number(10.5));
        assert_eq!(parsed["twist_all"], ParameterValue::Bool(false));
        let v = SCHEMA.validate(&parsed).unwrap();
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn reader_returns_typed_values() {
        let v = SCHEMA.defaults();
        let reader = ValueReader::new(&SCHEMA, &v);
        assert_relative_eq!(reader.number("radius").unwrap(), 9.0);
        assert!(reader.flag("twist_all").unwrap());
        assert_relative_eq!(reader.number("steps").unwrap(), 100.0);
        assert!(reader.flag("radius").is_err());
    }
}
