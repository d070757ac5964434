//! Tag-suggester client.

use serde::Serialize;

use lexis_core::errors::{CollaboratorError, LexisResult};
use lexis_core::models::{GroupProposal, TagSuggestion};
use lexis_core::traits::ITagSuggester;

use super::network;

/// REST client for the external tag suggester. How the service generates
/// candidates (model-driven or otherwise) is its business; we only speak
/// the two request shapes.
pub struct HttpTagSuggester {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct SuggestRequest<'a> {
    title: &'a str,
    existing_tags: &'a [String],
}

#[derive(Debug, Serialize)]
struct GroupRequest<'a> {
    tags: &'a [String],
}

impl HttpTagSuggester {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn post<B: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> LexisResult<R> {
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            }
            .into());
        }
        Ok(response.json().map_err(network)?)
    }
}

impl ITagSuggester for HttpTagSuggester {
    fn suggest_tags(&self, title: &str, existing_tags: &[String]) -> LexisResult<TagSuggestion> {
        self.post(
            "/v1/tags",
            &SuggestRequest {
                title,
                existing_tags,
            },
        )
    }

    fn propose_groups(&self, tags: &[String]) -> LexisResult<GroupProposal> {
        self.post("/v1/groups", &GroupRequest { tags })
    }

    fn name(&self) -> &str {
        "http-suggester"
    }
}
