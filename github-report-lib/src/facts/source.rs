use super::{Client, LOG_TARGET, RepoQuery};
use crate::Result;
use crate::fields::{Record, record_from_json};
use ohno::{EnrichableExt, IntoAppError, bail};

/// Supplies the raw repository records a report is built from.
pub trait RecordSource {
    fn fetch(&self, query: &RepoQuery) -> impl Future<Output = Result<Vec<Record>>> + Send;
}

/// Reads repository records from the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: Client,
}

impl GitHubSource {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    async fn authenticated_login(&self) -> Result<String> {
        log::debug!(target: LOG_TARGET, "Looking up the authenticated user");

        let user = self
            .client
            .get_json("/user")
            .await
            .map_err(|e| e.enrich("could not determine the owner of the repository, specify it or provide a token"))?;

        user.get("login")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .into_app_err("the authenticated user has no login")
    }
}

impl RecordSource for GitHubSource {
    async fn fetch(&self, query: &RepoQuery) -> Result<Vec<Record>> {
        log::info!(target: LOG_TARGET, "Fetching {query}");

        let path = match query {
            RepoQuery::Single { owner: Some(owner), name } => format!("/repos/{owner}/{name}"),
            RepoQuery::Single { owner: None, name } => format!("/repos/{}/{name}", self.authenticated_login().await?),
            RepoQuery::User(user) => format!("/users/{user}/repos"),
            RepoQuery::Organization(organization) => format!("/orgs/{organization}/repos"),
            RepoQuery::Authenticated => "/user/repos".to_string(),
        };

        let document = self.client.get_json(&path).await?;
        let records = if query.is_single() { vec![document] } else { into_array(document)? };

        records
            .into_iter()
            .map(|value| record_from_json(value).into_app_err_with(|| format!("unexpected repository data for {query}")))
            .collect()
    }
}

fn into_array(document: serde_json::Value) -> Result<Vec<serde_json::Value>> {
    match document {
        serde_json::Value::Array(items) => Ok(items),
        other => bail!("expected a list of repositories, got {other}"),
    }
}
