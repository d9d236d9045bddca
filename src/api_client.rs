use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::client::{Client, Lookup};
use crate::error::{Error, FetchError};
use crate::types::{TeamRecord, TeamResponse};

pub const TEAM_URL: &str = "https://vintagemonster.onefootball.com/api/teams/en/{id}.json";

pub const ID_PLACEHOLDER: &str = "{id}";

const NOT_FOUND_CODE: u16 = 404;
const NOT_FOUND_MARKER: &str = "not find team with id";

pub struct TeamApiClient {
    client: reqwest::Client,
    url_template: String,
}

impl TeamApiClient {
    pub fn new(url_template: &str, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        Ok(Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .timeout(timeout)
                .build()?,
            url_template: url_template.into(),
        })
    }

    fn team_url(&self, id: u32) -> String {
        self.url_template.replace(ID_PLACEHOLDER, &id.to_string())
    }

    async fn team(&self, id: u32) -> Result<TeamResponse, FetchError> {
        let body = self
            .client
            .get(self.team_url(id))
            .send()
            .await
            .map_err(|source| FetchError::Transport { id, source })?
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { id, source })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { id, source })
    }
}

fn classify(resp: TeamResponse) -> Lookup {
    if resp.code == NOT_FOUND_CODE && resp.message.contains(NOT_FOUND_MARKER) {
        Lookup::NotFound
    } else {
        Lookup::Found(TeamRecord::from(resp))
    }
}

#[async_trait]
impl Client for TeamApiClient {
    async fn fetch_team(&self, id: u32) -> Result<Lookup, FetchError> {
        self.team(id).await.map(classify)
    }
}
