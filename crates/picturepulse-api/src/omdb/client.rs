use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::OmdbError;
use super::types::{is_success, OmdbDetailResponse, OmdbSearchResponse};
use crate::traits::{MovieDetail, MovieProvider, MovieSummary};

/// OMDb REST client. Every request carries the API key as `apikey`.
pub struct OmdbClient {
    api_key: String,
    base_url: Url,
    http: Client,
}

impl OmdbClient {
    /// Client for the OMDb endpoint at `base_url` (normally
    /// `provider.base_url` from config).
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, OmdbError> {
        let base_url = Url::parse(base_url).map_err(|e| OmdbError::Parse(e.to_string()))?;
        Ok(Self {
            api_key,
            base_url,
            http: Client::new(),
        })
    }

    /// Build the GET request for the given query parameters.
    fn build_request(&self, params: &[(&str, &str)]) -> Result<reqwest::Request, OmdbError> {
        let request = self
            .http
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .build()?;
        Ok(request)
    }

    /// Send the request and return the status and raw body.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<(u16, String), OmdbError> {
        let request = self.build_request(params)?;
        let resp = self.http.execute(request).await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok((status, body))
    }
}

/// Reject non-2xx statuses, then decode the JSON body.
fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, OmdbError> {
    if !(200..300).contains(&status) {
        tracing::warn!(status, "OMDb API error");
        return Err(OmdbError::Api {
            status,
            message: body.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| OmdbError::Parse(e.to_string()))
}

pub(crate) fn decode_search(status: u16, body: &str) -> Result<Vec<MovieSummary>, OmdbError> {
    let body: OmdbSearchResponse = decode(status, body)?;
    if !is_success(&body.response) {
        return Err(OmdbError::NotFound(
            body.error.unwrap_or_else(|| "Movie not found!".into()),
        ));
    }
    Ok(body.search.into_iter().map(|item| item.into_summary()).collect())
}

pub(crate) fn decode_detail(status: u16, body: &str, id: &str) -> Result<MovieDetail, OmdbError> {
    let body: OmdbDetailResponse = decode(status, body)?;
    if !is_success(&body.response) {
        return Err(OmdbError::NotFound(
            body.error.unwrap_or_else(|| "Incorrect IMDb ID.".into()),
        ));
    }
    Ok(body.into_detail(id))
}

impl MovieProvider for OmdbClient {
    type Error = OmdbError;

    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, OmdbError> {
        tracing::debug!(query, "OMDb search");
        let (status, body) = self.fetch(&[("s", query)]).await?;
        decode_search(status, &body)
    }

    async fn movie_detail(&self, id: &str) -> Result<MovieDetail, OmdbError> {
        tracing::debug!(id, "OMDb detail");
        let (status, body) = self.fetch(&[("i", id)]).await?;
        decode_detail(status, &body, id)
    }
}
