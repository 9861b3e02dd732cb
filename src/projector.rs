//! Bindings for the search response body and the projection from hits back
//! into [`Deal`]s.

use crate::deal::Deal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultEnvelope {
    pub hits: Hits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    /// Absent when the request disables total hit tracking.
    #[serde(default)]
    pub total: Option<HitsTotal>,
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitsTotal {
    pub value: u64,
    pub relation: HitsTotalRelation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HitsTotalRelation {
    #[serde(rename = "eq")]
    Accurate,
    #[serde(rename = "gte")]
    LowerBound,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type", default)]
    pub hit_type: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: Deal,
}

/// One deal per hit, in the order the engine returned them.
pub fn project(envelope: SearchResultEnvelope) -> Vec<Deal> {
    envelope
        .hits
        .hits
        .into_iter()
        .map(|hit| hit.source.with_id(hit.id))
        .collect()
}
