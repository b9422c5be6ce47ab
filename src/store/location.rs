//! Map lookups over the in-memory collection
//!
//! Linear scans are sufficient at this data size. Matches come back in the
//! collection's natural order.

use super::records::PoliticianRecord;

/// Borrowed view used by the map endpoints
#[derive(Debug, Clone, Copy)]
pub struct LocationIndex<'a> {
    records: &'a [PoliticianRecord],
}

impl<'a> LocationIndex<'a> {
    pub fn new(records: &'a [PoliticianRecord]) -> Self {
        Self { records }
    }

    /// Politicians serving the given state, compared ASCII case-insensitively
    pub fn by_state(&self, code: &str) -> Vec<&'a PoliticianRecord> {
        let code = code.trim();
        if code.is_empty() {
            return Vec::new();
        }

        self.records
            .iter()
            .filter(|record| !record.is_national())
            .filter(|record| record.state_code().eq_ignore_ascii_case(code))
            .collect()
    }

    /// National-level politicians (President, Vice President)
    pub fn national(&self) -> Vec<&'a PoliticianRecord> {
        self.records.iter().filter(|record| record.is_national()).collect()
    }

    /// Resolve a map query.
    ///
    /// Only the state filter is applied. Coordinates are accepted for
    /// compatibility but no per-politician area matching exists yet, so a
    /// coordinate-only query yields nothing.
    pub fn by_location(
        &self,
        lat: Option<f64>,
        lng: Option<f64>,
        state: Option<&str>,
    ) -> Vec<&'a PoliticianRecord> {
        match state {
            Some(code) => self.by_state(code),
            None => {
                if lat.is_some() || lng.is_some() {
                    tracing::debug!("Coordinate lookup requested ({:?}, {:?}); not supported", lat, lng);
                }
                Vec::new()
            }
        }
    }
}
