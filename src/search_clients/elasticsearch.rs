use crate::config::AppConfig;
use crate::deal::{Deal, UpdateEnvelope};
use crate::error::AppError;
use crate::projector::SearchResultEnvelope;
use crate::query::QueryDocument;
use crate::search::DealIndex;
use async_trait::async_trait;
use elasticsearch::{
    auth::Credentials,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    Elasticsearch, GetParts, IndexParts, SearchParts, UpdateParts,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

pub struct ElasticsearchDealIndex {
    client: Elasticsearch,
    index_name: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(rename = "_id")]
    id: String,
    found: bool,
    #[serde(rename = "_source")]
    source: Option<Deal>,
}

impl ElasticsearchDealIndex {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        log::debug!("Creating Elasticsearch client for URL: {}", config.elasticsearch_url);
        let url = Url::parse(&config.elasticsearch_url)?;
        let conn_pool = SingleNodeConnectionPool::new(url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            log::debug!("Using basic authentication as '{}'.", username);
            builder = builder.auth(Credentials::Basic(username.clone(), password.clone()));
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let transport = builder.build()?;
        log::trace!("Elasticsearch client created successfully.");
        Ok(Self::from_client(Elasticsearch::new(transport), &config.index_name))
    }

    pub fn from_client(client: Elasticsearch, index_name: &str) -> Self {
        Self {
            client,
            index_name: index_name.to_string(),
        }
    }
}

/// Passes successful responses through and turns everything else into a
/// rejection carrying the engine's reason.
async fn check(response: Response) -> Result<Response, AppError> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    Err(rejection(status.as_u16(), &body))
}

fn rejection(status: u16, body: &str) -> AppError {
    let reason = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v["error"]["reason"]
                .as_str()
                .or_else(|| v["error"].as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string());
    log::warn!("Elasticsearch rejected request with status {}: {}", status, reason);
    AppError::Rejected { status, reason }
}

#[async_trait]
impl DealIndex for ElasticsearchDealIndex {
    async fn ensure_index_exists(&self) -> Result<(), AppError> {
        log::debug!("Checking if Elasticsearch index '{}' exists.", self.index_name);
        let index_exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index_name.as_str()]))
            .send()
            .await?
            .status_code()
            .is_success();

        if !index_exists {
            log::info!("Elasticsearch index '{}' does not exist. Creating it.", self.index_name);
            let response = self
                .client
                .indices()
                .create(IndicesCreateParts::Index(&self.index_name))
                .body(json!({
                    "mappings": {
                        "properties": {
                            "title": { "type": "text" },
                            "value": { "type": "long" }
                        }
                    }
                }))
                .send()
                .await?;
            check(response).await?;
            log::info!("Elasticsearch index '{}' created successfully.", self.index_name);
        } else {
            log::debug!("Elasticsearch index '{}' already exists.", self.index_name);
        }

        Ok(())
    }

    async fn index_deal(&self, deal: &Deal) -> Result<(), AppError> {
        log::debug!("Indexing deal '{}' into '{}'", deal.id(), self.index_name);
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_name, deal.id()))
            .body(deal)
            .refresh(Refresh::True)
            .send()
            .await?;
        check(response).await?;
        log::trace!("Deal '{}' indexed and refreshed.", deal.id());
        Ok(())
    }

    async fn update_deal(&self, id: &str, update: UpdateEnvelope<'_>) -> Result<(), AppError> {
        log::debug!("Updating deal '{}' in '{}'", id, self.index_name);
        let response = self
            .client
            .update(UpdateParts::IndexId(&self.index_name, id))
            .body(update)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn get_deal(&self, id: &str) -> Result<Option<Deal>, AppError> {
        log::debug!("Fetching deal '{}' from '{}'", id, self.index_name);
        let response = self
            .client
            .get(GetParts::IndexId(&self.index_name, id))
            .send()
            .await?;

        let status = response.status_code();
        let body = response.text().await?;
        log::trace!("Elasticsearch get response ({}): {}", status, body);

        // a missing index also answers 404, but without a get response body
        if status.as_u16() == 404 {
            return match serde_json::from_str::<GetResponse>(&body) {
                Ok(GetResponse { found: false, .. }) => {
                    log::debug!("Deal '{}' not found.", id);
                    Ok(None)
                }
                _ => Err(rejection(404, &body)),
            };
        }
        if !status.is_success() {
            return Err(rejection(status.as_u16(), &body));
        }

        let found: GetResponse = serde_json::from_str(&body)?;
        if !found.found {
            return Ok(None);
        }
        Ok(found.source.map(|deal| deal.with_id(found.id)))
    }

    async fn search(&self, query: &QueryDocument) -> Result<SearchResultEnvelope, AppError> {
        log::debug!("Searching '{}' with {:?}", self.index_name, query);
        let indices = [self.index_name.as_str()];
        let search = self.client.search(SearchParts::Index(&indices));
        let response = match query {
            QueryDocument::Dsl(body) => search.body(body).send().await?,
            QueryDocument::QueryString(text) => search.q(text).send().await?,
        };

        let body = check(response).await?.text().await?;
        log::trace!("Elasticsearch search response: {}", body);
        Ok(serde_json::from_str(&body)?)
    }
}
