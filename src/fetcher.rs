use crate::callibri_types::{CallRecord, Site, SiteStatisticsResponse, SitesResponse};
use crate::consts::{
    GET_SITES_ENDPOINT, HTTP_CLIENT_TIMEOUT, REQUEST_DELAY, SITE_STATISTICS_ENDPOINT, STATUS_OK,
};
use crate::error::FetchError;
use crate::throttle::{Sleeper, TokioSleeper};
use crate::types::DateRange;
use crate::utils::{endpoint_url, format_api_date, with_credentials};

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

/// Account credentials and location of the Callibri API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub login: String,
    pub token: String,
}

/// Client for the two statistics endpoints.
pub struct StatisticsFetcher<S = TokioSleeper> {
    client: reqwest::Client,
    api: ApiConfig,
    sleeper: S,
}

impl StatisticsFetcher<TokioSleeper> {
    pub fn new(api: ApiConfig) -> Result<Self, reqwest::Error> {
        Self::with_sleeper(api, TokioSleeper)
    }
}

impl<S: Sleeper> StatisticsFetcher<S> {
    pub fn with_sleeper(api: ApiConfig, sleeper: S) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .timeout(HTTP_CLIENT_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api,
            sleeper,
        })
    }

    /// All sites on the account, in the order the API lists them.
    pub async fn list_sites(&self) -> Result<Vec<Site>, FetchError> {
        let response: SitesResponse = self.send_request(GET_SITES_ENDPOINT, &[], false).await?;
        Ok(response.sites)
    }

    pub async fn get_site_statistics(
        &self,
        site: &Site,
        range: &DateRange,
    ) -> Result<SiteStatisticsResponse, FetchError> {
        let params = [
            ("site_id", site.site_id.clone()),
            ("date1", format_api_date(range.from())),
            ("date2", format_api_date(range.to())),
        ];
        self.send_request(SITE_STATISTICS_ENDPOINT, &params, true)
            .await
    }

    /// One flattened list of calls per site, in site listing order.
    pub async fn fetch_all(&self, range: &DateRange) -> Result<Vec<Vec<CallRecord>>, FetchError> {
        let sites = self.list_sites().await?;
        info!(sites = sites.len(), "listed sites");

        let mut calls_data = Vec::with_capacity(sites.len());
        for site in &sites {
            let calls = self.get_site_statistics(site, range).await?.into_calls();
            info!(site_id = %site.site_id, calls = calls.len(), "fetched site statistics");
            calls_data.push(calls);
        }

        Ok(calls_data)
    }

    /// GET `endpoint` with `params` plus the account credentials. A `safe` request first waits
    /// out `REQUEST_DELAY`.
    async fn send_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        safe: bool,
    ) -> Result<T, FetchError> {
        if safe {
            self.sleeper.sleep(REQUEST_DELAY).await;
        }

        let url = endpoint_url(&self.api.base_url, endpoint);
        debug!(url = %url, safe, "sending request");
        let query = with_credentials(params, &self.api.login, &self.api.token);

        let transport = |source: reqwest::Error| {
            error!(error=%source, endpoint, "request failed");
            FetchError::Transport {
                endpoint: endpoint.to_string(),
                source,
            }
        };
        let resp = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        debug!(%status, bytes = body.len(), endpoint, "got response");

        decode_response(endpoint, &body)
    }
}

/// Decode a response body, checking the `code` field before the payload is touched.
pub fn decode_response<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, FetchError> {
    let protocol = |source: serde_json::Error| {
        error!(error=%source, endpoint, "failed to decode response body");
        FetchError::Protocol {
            endpoint: endpoint.to_string(),
            body: body.to_string(),
            source,
        }
    };

    let value: Value = serde_json::from_str(body).map_err(protocol)?;
    let code = value.get("code").and_then(Value::as_i64);
    if code != Some(STATUS_OK) {
        error!(?code, endpoint, "api returned an error code");
        return Err(FetchError::Api {
            endpoint: endpoint.to_string(),
            code,
        });
    }

    serde_json::from_value(value).map_err(protocol)
}
