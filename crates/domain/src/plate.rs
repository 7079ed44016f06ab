// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vehicle plate identity.

use crate::error::DomainError;

/// A vehicle plate number in canonical form.
///
/// Plates arrive as free text ("1234 abc", "1234-ABC"); the canonical
/// form is uppercased with whitespace and dashes removed. All plate
/// comparisons in occupancy and conflict checks use this form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlateNumber {
    value: String,
}

impl PlateNumber {
    /// Creates a plate number from raw text.
    ///
    /// # Arguments
    ///
    /// * `raw` - The plate as supplied by the caller
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyPlate` if nothing remains after
    /// normalization.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let value: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .flat_map(char::to_uppercase)
            .collect();
        if value.is_empty() {
            return Err(DomainError::EmptyPlate);
        }
        Ok(Self { value })
    }

    /// Returns the canonical plate string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Tests whether raw plate text denotes this plate.
    ///
    /// Returns `false` for text that does not normalize to a valid
    /// plate at all.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        Self::new(raw).is_ok_and(|other| other == *self)
    }
}

impl std::fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl serde::Serialize for PlateNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> serde::Deserialize<'de> for PlateNumber {
    /// Deserializes from raw plate text, normalizing on the way in.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: String = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_and_strips_separators() {
        let plate = PlateNumber::new(" 1234 abc ").expect("valid plate");
        assert_eq!(plate.value(), "1234ABC");

        let dashed = PlateNumber::new("1234-ABC").expect("valid plate");
        assert_eq!(dashed, plate);
    }

    #[test]
    fn test_empty_plate_rejected() {
        assert_eq!(PlateNumber::new("  - "), Err(DomainError::EmptyPlate));
    }

    #[test]
    fn test_matches_raw_variants() {
        let plate = PlateNumber::new("1234ABC").expect("valid plate");
        assert!(plate.matches("1234 abc"));
        assert!(plate.matches("1234-abc"));
        assert!(!plate.matches("9999ZZZ"));
        assert!(!plate.matches("   "));
    }

    #[test]
    fn test_serde_normalizes_on_the_way_in() {
        let plate: PlateNumber = serde_json::from_str("\"1234 abc\"").expect("valid plate json");
        assert_eq!(plate.value(), "1234ABC");
        let json = serde_json::to_string(&plate).expect("serialize plate");
        assert_eq!(json, "\"1234ABC\"");
    }

    #[test]
    fn test_serde_rejects_empty_plate() {
        let result: Result<PlateNumber, _> = serde_json::from_str("\" - \"");
        assert!(result.is_err());
    }
}
