// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department identity.
//!
//! Departments arrive as free text ("Cuina", "logística", "SALA") and
//! are reduced to a canonical key before any lookup or write. One
//! roster collection exists per department; the legacy collection
//! label is derived from the key with a fixed naming scheme.

use crate::error::DomainError;
use crate::normalize::fold_key;

/// A department, identified by its normalized key.
///
/// The key is the diacritic-stripped, lowercased, trimmed form of the
/// raw department name. Two departments are the same department if and
/// only if their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Department {
    key: String,
}

impl Department {
    /// Creates a department from a raw name.
    ///
    /// # Arguments
    ///
    /// * `raw` - The department name as supplied by the caller
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyDepartment` if the name is empty
    /// after normalization.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let key: String = fold_key(raw);
        if key.is_empty() {
            return Err(DomainError::EmptyDepartment);
        }
        Ok(Self { key })
    }

    /// Returns the canonical department key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the legacy collection label for this department.
    ///
    /// The historical store named one collection per department as
    /// `rosters` + capitalized key (e.g. `rostersCuina`). The label is
    /// kept for log and export compatibility; lookups use `key()`.
    #[must_use]
    pub fn collection_label(&self) -> String {
        let mut chars = self.key.chars();
        chars.next().map_or_else(
            || String::from("rosters"),
            |first| format!("rosters{}{}", first.to_uppercase(), chars.as_str()),
        )
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}
