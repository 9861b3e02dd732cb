use serde::Serialize;
use std::collections::BTreeMap;

/// Field holding the numeric value of a deal.
pub const VALUE_FIELD: &str = "value";

/// What gets sent to the search endpoint: either a query DSL body or a bare
/// query-string parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryDocument {
    Dsl(SearchBody),
    QueryString(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBody {
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    MatchAll(MatchAll),
    Bool(BoolQuery),
    Range(BTreeMap<String, RangeBounds>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchAll {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    pub must: Box<Query>,
    pub filter: Box<Query>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBounds {
    pub gte: i64,
}

impl Query {
    pub fn range_gte(field: &str, lower: i64) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), RangeBounds { gte: lower });
        Query::Range(fields)
    }
}

/// Every deal whose value is at least `threshold`. Inclusive, no bounds check.
pub fn build_range_query(threshold: i64) -> QueryDocument {
    QueryDocument::Dsl(SearchBody {
        query: Query::Bool(BoolQuery {
            must: Box::new(Query::MatchAll(MatchAll {})),
            filter: Box::new(Query::range_gte(VALUE_FIELD, threshold)),
        }),
    })
}

/// Passed to the engine's query-string parser as is. Operators such as
/// `AND`, `OR` or `field:` inside `text` are interpreted by the engine.
pub fn build_free_text_query(text: &str) -> QueryDocument {
    QueryDocument::QueryString(text.to_string())
}
