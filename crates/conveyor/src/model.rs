use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
pub struct TrayId(u32);

impl TrayId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct OutputId(String);

crate::impl_string_newtype!(OutputId);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct ProductCode(String);

crate::impl_string_newtype!(ProductCode);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, StrumDisplay)]
pub enum BucketState {
    #[default]
    Empty,
    Injected,
    Sorted,
    Rejected,
    Failure,
    Unknown,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, StrumDisplay)]
pub enum OutputTrayState {
    #[default]
    Enabled,
    InhibitedU,
    InhibitedPatd,
    InhibitedSd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, StrumDisplay)]
pub enum ContainerTrayState {
    Empty,
    NotEmpty,
    #[default]
    Unknown,
    Ejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, StrumDisplay)]
pub enum ConveyorSide {
    #[default]
    Front,
    Back,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ConveyorLevel {
    #[strum(serialize = "Lower", serialize = "l", serialize = "0")]
    Lower,
    #[default]
    #[strum(serialize = "Upper", serialize = "u", serialize = "1")]
    Upper,
    #[strum(serialize = "Both", serialize = "b", serialize = "2")]
    Both,
}

impl ConveyorLevel {
    /// Single-letter prefix used in tray labels.
    pub fn prefix(&self) -> char {
        match self {
            Self::Upper => 'U',
            Self::Lower | Self::Both => 'L',
        }
    }
}

impl ConveyorSide {
    pub fn prefix(&self) -> char {
        match self {
            Self::Front => 'F',
            Self::Back => 'B',
        }
    }
}

/// The (id, state) pair carried by one ring slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bucket {
    pub id: TrayId,
    pub state: BucketState,
}

impl Bucket {
    pub fn new(id: TrayId, state: BucketState) -> Self {
        Self { id, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_deserialization() {
        let cases = vec![
            ("\"upper\"", ConveyorLevel::Upper),
            ("\"Upper\"", ConveyorLevel::Upper),
            ("\"UPPER\"", ConveyorLevel::Upper),
            ("\"u\"", ConveyorLevel::Upper),
            ("\"1\"", ConveyorLevel::Upper),
            ("\"lower\"", ConveyorLevel::Lower),
            ("\"L\"", ConveyorLevel::Lower),
            ("\"both\"", ConveyorLevel::Both),
        ];

        for (json, expected) in cases {
            let deserialized: ConveyorLevel = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_level_rejects_unknown() {
        assert!(serde_json::from_str::<ConveyorLevel>("\"middle\"").is_err());
    }

    #[test]
    fn test_tray_id_is_transparent() {
        let id: TrayId = serde_json::from_str("42").unwrap();
        assert_eq!(id, TrayId::new(42));
        assert_eq!(id.to_string(), "42");
    }
}
