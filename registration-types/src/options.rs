use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Gender options offered by the select control.
///
/// The strum serialization is the display label, which is also the value
/// submitted by the form and the value accepted by validation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum Gender {
    #[strum(serialize = "Male")]
    #[serde(rename = "Male")]
    Male,
    #[strum(serialize = "Female")]
    #[serde(rename = "Female")]
    Female,
    #[strum(serialize = "Nun ya business")]
    #[serde(rename = "Nun ya business")]
    Nunya,
}

/// Vehicles a registrant may own. Rendered as a checkbox group.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum Vehicle {
    #[strum(serialize = "Car")]
    #[serde(rename = "Car")]
    Car,
    #[strum(serialize = "Bike")]
    #[serde(rename = "Bike")]
    Bike,
    #[strum(serialize = "Boat")]
    #[serde(rename = "Boat")]
    Boat,
    #[strum(serialize = "Tractor")]
    #[serde(rename = "Tractor")]
    Tractor,
}

/// A closed set of display labels shared by validation and rendering.
///
/// Implemented by the strum-derived option enums; the strum serialization
/// is the label.
pub trait OptionSet: IntoEnumIterator + Into<&'static str> + Copy + 'static {
    /// All members, in display order.
    fn members() -> Vec<Self> {
        Self::iter().collect()
    }

    /// The display label of this member.
    fn label(&self) -> &'static str {
        (*self).into()
    }

    /// Find the member with exactly this label.
    fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|m| m.label() == label)
    }

    /// All labels, in display order.
    fn labels() -> Vec<&'static str> {
        Self::iter().map(Into::into).collect()
    }
}

impl OptionSet for Gender {}

impl OptionSet for Vehicle {}

/// The checkbox rendered next to the vehicle options that is not a `Vehicle`.
///
/// It is registered under the `vehicle` field, so selecting it always fails
/// the membership check.
pub const DODGEM_CAR: &str = "Dodgem car";
