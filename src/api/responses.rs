//! Response bodies for the HTTP API and the CLI

use crate::cache::CacheStats;
use crate::search::{MatchScore, SearchResult};
use crate::store::{Coordinates, CurrentBill, PoliticianRecord, Policy, Vote};
use serde::Serialize;

/// Politician fields shown in listings, search results and comparisons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoliticianSummary {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    pub party: String,
    pub state_or_district: String,
    pub position: String,
    pub vote_count: u32,
    pub statement_count: u32,
}

impl From<&PoliticianRecord> for PoliticianSummary {
    fn from(record: &PoliticianRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            image_url: record.image_url.clone(),
            party: record.party.to_string(),
            state_or_district: record.state_or_district.clone(),
            position: record.position.to_string(),
            vote_count: record.vote_count,
            statement_count: record.statement_count,
        }
    }
}

pub fn summaries<'a>(records: impl IntoIterator<Item = &'a PoliticianRecord>) -> Vec<PoliticianSummary> {
    records.into_iter().map(PoliticianSummary::from).collect()
}

/// Search hit with its score breakdown, printed by `search --scores`
#[derive(Debug, Serialize)]
pub struct ScoredSummary {
    #[serde(flatten)]
    pub summary: PoliticianSummary,
    pub score: MatchScore,
}

impl From<&SearchResult<'_>> for ScoredSummary {
    fn from(result: &SearchResult<'_>) -> Self {
        Self {
            summary: PoliticianSummary::from(result.record),
            score: result.score.clone(),
        }
    }
}

/// Body of `/search` and `/compare`
#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    pub politician_summaries: Vec<PoliticianSummary>,
}

#[derive(Debug, Serialize)]
pub struct VotesResponse {
    pub politician_id: u32,
    pub politician_name: String,
    pub votes: Vec<Vote>,
}

impl From<&PoliticianRecord> for VotesResponse {
    fn from(record: &PoliticianRecord) -> Self {
        Self {
            politician_id: record.id,
            politician_name: record.name.clone(),
            votes: record.recent_votes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PoliciesResponse {
    pub politician_id: u32,
    pub politician_name: String,
    pub policies: Vec<Policy>,
}

impl From<&PoliticianRecord> for PoliciesResponse {
    fn from(record: &PoliticianRecord) -> Self {
        Self {
            politician_id: record.id,
            politician_name: record.name.clone(),
            policies: record.key_policies.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImpactResponse {
    pub politician_id: u32,
    pub politician_name: String,
    pub current_bills: Vec<CurrentBill>,
    pub summary: String,
}

impl From<&PoliticianRecord> for ImpactResponse {
    fn from(record: &PoliticianRecord) -> Self {
        let count = record.current_bills.len();
        let summary = format!(
            "{} is currently working on {} bill{} that affect you.",
            record.name,
            count,
            if count == 1 { "" } else { "s" }
        );
        Self {
            politician_id: record.id,
            politician_name: record.name.clone(),
            current_bills: record.current_bills.clone(),
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLocation {
    #[serde(rename = "type")]
    pub kind: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub center: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPolitician {
    pub id: u32,
    pub name: String,
    pub party: String,
    pub position: String,
    pub image_url: String,
    pub location: MapLocation,
}

impl MapPolitician {
    /// Build a map entry, using `fallback` when the record has no location
    pub fn from_record(record: &PoliticianRecord, fallback: &MapLocation) -> Self {
        let location = match &record.location {
            Some(loc) => MapLocation {
                kind: loc.kind.as_str().to_string(),
                state: loc.state.clone(),
                district: loc.district.clone(),
                center: loc.center,
            },
            None => fallback.clone(),
        };

        Self {
            id: record.id,
            name: record.name.clone(),
            party: record.party.to_string(),
            position: record.position.to_string(),
            image_url: record.image_url.clone(),
            location,
        }
    }
}

impl MapLocation {
    /// Placeholder for records without a location on the state map
    pub fn unknown() -> Self {
        Self {
            kind: "unknown".to_string(),
            state: None,
            district: None,
            center: Coordinates::ORIGIN,
        }
    }

    /// Placeholder for national records without a location
    pub fn national() -> Self {
        Self {
            kind: "national".to_string(),
            state: None,
            district: None,
            center: Coordinates::WASHINGTON_DC,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub politicians: Vec<MapPolitician>,
}

impl MapResponse {
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a PoliticianRecord>,
        fallback: MapLocation,
    ) -> Self {
        Self {
            politicians: records
                .into_iter()
                .map(|record| MapPolitician::from_record(record, &fallback))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub politicians: usize,
    pub cache: CacheStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::sample_store;

    #[test]
    fn test_summary_fields() {
        let store = sample_store();
        let summary = PoliticianSummary::from(store.get(1).unwrap());
        assert_eq!(summary.name, "Joe Biden");
        assert_eq!(summary.party, "Democrat");
        assert_eq!(summary.position, "President");

        let value = serde_json::to_value(&summary).unwrap();
        for field in [
            "id",
            "name",
            "image_url",
            "party",
            "state_or_district",
            "position",
            "vote_count",
            "statement_count",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
    }

    #[test]
    fn test_impact_summary_pluralization() {
        let store = sample_store();
        let biden = ImpactResponse::from(store.get(1).unwrap());
        assert_eq!(biden.summary, "Joe Biden is currently working on 2 bills that affect you.");

        let padilla = ImpactResponse::from(store.get(3).unwrap());
        assert_eq!(padilla.summary, "Alex Padilla is currently working on 1 bill that affect you.");

        let harris = ImpactResponse::from(store.get(2).unwrap());
        assert_eq!(harris.summary, "Kamala Harris is currently working on 0 bills that affect you.");
    }

    #[test]
    fn test_votes_response_uses_vote_key() {
        let store = sample_store();
        let votes = VotesResponse::from(store.get(1).unwrap());
        let value = serde_json::to_value(&votes).unwrap();
        assert_eq!(value["politician_id"], 1);
        assert_eq!(value["votes"][0]["vote"], "Yes");
    }

    #[test]
    fn test_scored_summary_is_flat() {
        use crate::cache::ResultCache;
        use crate::search::SearchEngine;
        use std::sync::Arc;

        let engine = SearchEngine::new(Arc::new(sample_store()), ResultCache::default());
        let results = engine.search_scored("biden", 1);
        let value = serde_json::to_value(ScoredSummary::from(&results[0])).unwrap();
        assert_eq!(value["name"], "Joe Biden");
        assert_eq!(value["score"]["final_score"], 100.0);
    }

    #[test]
    fn test_map_entry_fallback() {
        let store = sample_store();
        let adams = store.get(9).unwrap();
        let entry = MapPolitician::from_record(adams, &MapLocation::unknown());
        assert_eq!(entry.location.kind, "unknown");
        assert_eq!(entry.location.center, Coordinates::ORIGIN);

        let padilla = MapPolitician::from_record(store.get(3).unwrap(), &MapLocation::unknown());
        assert_eq!(padilla.location.kind, "state");
        assert_eq!(padilla.location.state.as_deref(), Some("CA"));
    }
}
