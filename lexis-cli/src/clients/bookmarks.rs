//! Bookmark-store client.

use serde::{Deserialize, Serialize};

use lexis_core::errors::{CollaboratorError, LexisResult};
use lexis_core::models::Bookmark;
use lexis_core::traits::IBookmarkStore;

use super::network;

/// REST client for the bookmark service, bearer-token authenticated.
pub struct HttpBookmarkStore {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct BookmarkPage {
    results: Vec<Bookmark>,
}

#[derive(Debug, Serialize)]
struct SetTagsRequest<'a> {
    tag_names: &'a [String],
}

impl HttpBookmarkStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

fn check(response: reqwest::blocking::Response) -> LexisResult<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(CollaboratorError::Api {
        status: status.as_u16(),
        message: response.text().unwrap_or_default(),
    }
    .into())
}

impl IBookmarkStore for HttpBookmarkStore {
    fn fetch_all(&self) -> LexisResult<Vec<Bookmark>> {
        let response = self
            .client
            .get(self.endpoint("/api/bookmarks/"))
            .bearer_auth(&self.token)
            .send()
            .map_err(network)?;
        let page: BookmarkPage = check(response)?.json().map_err(network)?;
        Ok(page.results)
    }

    fn set_tags(&self, id: &str, tags: &[String]) -> LexisResult<()> {
        let response = self
            .client
            .patch(self.endpoint(&format!("/api/bookmarks/{id}/")))
            .bearer_auth(&self.token)
            .json(&SetTagsRequest { tag_names: tags })
            .send()
            .map_err(network)?;
        check(response)?;
        Ok(())
    }
}
