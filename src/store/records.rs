//! Politician record types
//!
//! Mirrors the layout of the politician data file. Records are validated once
//! at load time and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Political party affiliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    Democrat,
    Republican,
    Independent,
    Other,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Independent => "Independent",
            Party::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Office held by a politician.
///
/// The common offices are enumerated; national roles such as "President" or
/// "Vice President" are kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    Senator,
    Representative,
    Governor,
    Mayor,
    Other,
    Custom(String),
}

impl Position {
    pub fn as_str(&self) -> &str {
        match self {
            Position::Senator => "Senator",
            Position::Representative => "Representative",
            Position::Governor => "Governor",
            Position::Mayor => "Mayor",
            Position::Other => "Other",
            Position::Custom(title) => title,
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Senator" => Position::Senator,
            "Representative" => Position::Representative,
            "Governor" => Position::Governor,
            "Mayor" => Position::Mayor,
            "Other" => Position::Other,
            _ => Position::Custom(value),
        }
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        match value {
            Position::Custom(title) => title,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bill the politician is currently working on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrentBill {
    pub title: String,
    pub status: String,
    pub your_impact: String,
}

/// Stated policy position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    pub category: String,
    pub stance: String,
    pub description: String,
    pub impact: String,
}

/// A recorded vote on a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vote {
    pub bill_name: String,
    #[serde(rename = "vote")]
    pub decision: String,
    pub date: String,
    pub description: String,
}

/// Scope of the area a politician serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    National,
    State,
    District,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::National => "national",
            LocationType::State => "state",
            LocationType::District => "district",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Washington, DC. Used as the map anchor for national politicians.
    pub const WASHINGTON_DC: Coordinates = Coordinates {
        lat: 38.9072,
        lng: -77.0369,
    };

    pub const ORIGIN: Coordinates = Coordinates { lat: 0.0, lng: 0.0 };

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Map placement of a politician
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    #[serde(rename = "type")]
    pub kind: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    pub center: Coordinates,
}

/// One politician as stored in the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoliticianRecord {
    pub id: u32,
    pub name: String,
    pub party: Party,
    pub position: Position,
    pub state_or_district: String,
    pub image_url: String,
    pub vote_count: u32,
    pub statement_count: u32,
    #[serde(default)]
    pub current_bills: Vec<CurrentBill>,
    #[serde(default)]
    pub key_policies: Vec<Policy>,
    #[serde(default)]
    pub recent_votes: Vec<Vote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl PoliticianRecord {
    pub fn is_national(&self) -> bool {
        self.location
            .as_ref()
            .is_some_and(|loc| loc.kind == LocationType::National)
    }

    /// State code used for map lookups.
    ///
    /// Prefers the location block and falls back to `state_or_district`.
    pub fn state_code(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|loc| loc.state.as_deref())
            .unwrap_or(&self.state_or_district)
    }

    /// Check field-level constraints serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        if let Some(location) = &self.location {
            if !location.center.is_valid() {
                return Err(format!(
                    "location center ({}, {}) is out of range",
                    location.center.lat, location.center.lng
                ));
            }
        }
        Ok(())
    }
}
