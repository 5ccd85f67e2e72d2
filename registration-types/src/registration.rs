use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::options::{Gender, OptionSet, Vehicle};
use crate::{Field, ValidValues};

/// A validated registration, as submitted to the endpoint.
///
/// Serializes to `{ name, email, age, gender, vehicle? }`; `vehicle` is
/// omitted when the registrant did not answer it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub age: Age,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vec<Vehicle>>,
}

/// Error assembling a `Registration` from checked values.
///
/// Happens only when the schema that checked the draft does not describe the
/// registration form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The schema produced no value for a field the registration needs.
    #[error("No checked value for required field '{0}'")]
    Missing(Field),

    /// The schema accepted a label outside the field's option set.
    #[error("'{label}' is not a {field} option")]
    UnknownOption { field: Field, label: String },
}

impl RegistrationError {
    /// The field the error is about.
    pub fn field(&self) -> Field {
        match self {
            Self::Missing(field) | Self::UnknownOption { field, .. } => *field,
        }
    }
}

impl Registration {
    /// Assemble a registration from values that passed a schema.
    ///
    /// No rule is applied here: the checked values are only converted. A
    /// schema that skips a required field or accepts a foreign label yields a
    /// `RegistrationError`.
    pub fn from_values(values: &ValidValues) -> Result<Self, RegistrationError> {
        let text = move |field: Field| {
            values
                .text(field)
                .ok_or(RegistrationError::Missing(field))
        };

        let vehicle = values
            .choices(Field::Vehicle)
            .map(|labels| {
                labels
                    .iter()
                    .map(|label| option(Field::Vehicle, label))
                    .collect::<Result<Vec<Vehicle>, _>>()
            })
            .transpose()?;

        Ok(Self {
            name: text(Field::Name)?.to_string(),
            email: text(Field::Email)?.to_string(),
            age: values
                .number(Field::Age)
                .map(Age)
                .ok_or(RegistrationError::Missing(Field::Age))?,
            gender: option(Field::Gender, text(Field::Gender)?)?,
            vehicle,
        })
    }

    /// Serialize to the JSON body sent to the endpoint.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

fn option<T: OptionSet>(field: Field, label: &str) -> Result<T, RegistrationError> {
    T::from_label(label).ok_or_else(|| RegistrationError::UnknownOption {
        field,
        label: label.to_string(),
    })
}

/// A validated age.
///
/// Whole numbers serialize as JSON integers so the payload carries `30`
/// rather than `30.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Age(pub f64);

impl Age {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < 9_007_199_254_740_992.0 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Age {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Age)
    }
}

impl From<f64> for Age {
    fn from(value: f64) -> Self {
        Self(value)
    }
}
