use async_trait::async_trait;
use deal_search::projector::SearchResultEnvelope;
use deal_search::query::QueryDocument;
use deal_search::{AppError, Deal, DealIndex, UpdateEnvelope};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Stand-in for the engine. Interprets the range filter and a simplified
/// query-string match on titles, and answers with real response bodies.
#[derive(Default)]
pub struct InMemoryDealIndex {
    docs: Mutex<Vec<(String, Value)>>,
}

impl InMemoryDealIndex {
    fn hits(&self, keep: impl Fn(&Value) -> bool) -> Value {
        let docs = self.docs.lock().unwrap();
        let hits: Vec<Value> = docs
            .iter()
            .filter(|(_, source)| keep(source))
            .map(|(id, source)| {
                json!({ "_index": "deals", "_type": "_doc", "_id": id, "_score": 1.0, "_source": source })
            })
            .collect();
        json!({
            "took": 1,
            "timed_out": false,
            "hits": {
                "total": { "value": hits.len(), "relation": "eq" },
                "max_score": if hits.is_empty() { Value::Null } else { json!(1.0) },
                "hits": hits
            }
        })
    }
}

#[async_trait]
impl DealIndex for InMemoryDealIndex {
    async fn ensure_index_exists(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn index_deal(&self, deal: &Deal) -> Result<(), AppError> {
        let source = serde_json::to_value(deal)?;
        let mut docs = self.docs.lock().unwrap();
        match docs.iter_mut().find(|(id, _)| id == deal.id()) {
            Some(existing) => existing.1 = source,
            None => docs.push((deal.id().to_string(), source)),
        }
        Ok(())
    }

    async fn update_deal(&self, id: &str, update: UpdateEnvelope<'_>) -> Result<(), AppError> {
        let body = serde_json::to_value(update)?;
        let mut docs = self.docs.lock().unwrap();
        let (_, source) = docs
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .ok_or_else(|| AppError::Rejected {
                status: 404,
                reason: format!("[{}]: document missing", id),
            })?;
        if let (Some(target), Some(patch)) = (source.as_object_mut(), body["doc"].as_object()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn get_deal(&self, id: &str) -> Result<Option<Deal>, AppError> {
        let docs = self.docs.lock().unwrap();
        match docs.iter().find(|(doc_id, _)| doc_id == id) {
            Some((doc_id, source)) => {
                let deal: Deal = serde_json::from_value(source.clone())?;
                Ok(Some(Deal::new(doc_id.clone(), deal.title(), deal.value())))
            }
            None => Ok(None),
        }
    }

    async fn search(&self, query: &QueryDocument) -> Result<SearchResultEnvelope, AppError> {
        let body = match serde_json::to_value(query)? {
            Value::String(text) => {
                let needle = text.to_lowercase();
                self.hits(|source| {
                    source["title"]
                        .as_str()
                        .map(|title| title.to_lowercase().split_whitespace().any(|w| w == needle))
                        .unwrap_or(false)
                })
            }
            dsl => {
                let gte = dsl["query"]["bool"]["filter"]["range"]["value"]["gte"]
                    .as_i64()
                    .unwrap_or_else(|| panic!("no value range filter in {dsl}"));
                self.hits(|source| source["value"].as_i64().map(|v| v >= gte).unwrap_or(false))
            }
        };
        Ok(serde_json::from_value(body)?)
    }
}

/// Engine double whose every call fails with the configured outcome.
pub struct BrokenIndex {
    pub body: Value,
}

#[async_trait]
impl DealIndex for BrokenIndex {
    async fn ensure_index_exists(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn index_deal(&self, deal: &Deal) -> Result<(), AppError> {
        Err(AppError::Rejected {
            status: 409,
            reason: format!("[{}]: version conflict", deal.id()),
        })
    }

    async fn update_deal(&self, id: &str, _update: UpdateEnvelope<'_>) -> Result<(), AppError> {
        Err(AppError::Rejected {
            status: 404,
            reason: format!("[{}]: document missing", id),
        })
    }

    async fn get_deal(&self, _id: &str) -> Result<Option<Deal>, AppError> {
        Ok(None)
    }

    async fn search(&self, _query: &QueryDocument) -> Result<SearchResultEnvelope, AppError> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}
