// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Road distance lookup for roster destination enrichment.
//!
//! Distance enrichment is a best-effort side effect of roster writes: a
//! missing destination or an unknown route skips the update and never
//! fails the write that triggered it.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crewdesk_domain::fold_key;

use crate::error::ApiError;

/// Source of one-way road distances from the company base to a destination.
pub trait DistanceProvider: Send + Sync {
    /// One-way road distance in meters, or `None` when the destination
    /// is unknown to this provider.
    fn one_way_meters(&self, destination: &str) -> Option<f64>;
}

/// A distance provider backed by a CSV table of known routes.
///
/// Rows pair a destination address with the one-way distance in meters.
/// Destinations are matched under key folding, so case and accents in
/// either the table or the roster do not matter.
#[derive(Debug, Clone)]
pub struct RouteTable {
    origin: String,
    routes: HashMap<String, f64>,
}

impl RouteTable {
    /// Loads a route table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the file cannot be opened or
    /// is not a usable route table.
    pub fn from_csv_path(
        origin: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, ApiError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| ApiError::InvalidInput {
            field: String::from("route_table"),
            message: format!("Failed to open route table: {e}"),
        })?;
        Self::from_csv_reader(origin, file)
    }

    /// Loads a route table from any CSV reader.
    ///
    /// The data must carry `destination` and `meters` columns; extra
    /// columns are ignored and column order does not matter. Rows whose
    /// distance does not parse are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the headers cannot be read,
    /// a required column is missing, or a row cannot be parsed as CSV.
    pub fn from_csv_reader(
        origin: impl Into<String>,
        reader: impl Read,
    ) -> Result<Self, ApiError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ApiError::InvalidInput {
                field: String::from("route_table"),
                message: format!("Failed to read route table headers: {e}"),
            })?
            .clone();

        let mut destination_idx: Option<usize> = None;
        let mut meters_idx: Option<usize> = None;
        for (idx, header) in headers.iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "destination" => destination_idx = Some(idx),
                "meters" => meters_idx = Some(idx),
                _ => {}
            }
        }
        let (Some(destination_idx), Some(meters_idx)) = (destination_idx, meters_idx) else {
            return Err(ApiError::InvalidInput {
                field: String::from("route_table"),
                message: String::from("Route table requires 'destination' and 'meters' columns"),
            });
        };

        let mut routes: HashMap<String, f64> = HashMap::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| ApiError::InvalidInput {
                field: String::from("route_table"),
                message: format!("Failed to read route table row: {e}"),
            })?;
            let Some(destination) = record
                .get(destination_idx)
                .map(str::trim)
                .filter(|d| !d.is_empty())
            else {
                continue;
            };
            let Some(meters) = record
                .get(meters_idx)
                .and_then(|m| m.trim().parse::<f64>().ok())
            else {
                tracing::warn!("Route table row for '{destination}' has no usable distance");
                continue;
            };
            routes.insert(fold_key(destination), meters);
        }

        Ok(Self {
            origin: origin.into(),
            routes,
        })
    }

    /// The origin all distances are measured from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of known routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl DistanceProvider for RouteTable {
    fn one_way_meters(&self, destination: &str) -> Option<f64> {
        self.routes.get(&fold_key(destination)).copied()
    }
}
