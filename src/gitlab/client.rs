use mrscribe_schema::{CompareResult, GitlabProject};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::error::ScribeError;
use crate::utils::http::{ClientOptions, append_path, build_client};
use crate::utils::logging::body_preview;

const PRIVATE_TOKEN: &str = "PRIVATE-TOKEN";

pub struct GitlabClient {
    client: reqwest::Client,
    base_url: Url,
}

/// A client bound to one caller's personal access token.
///
/// The token is never stored beyond the request that supplied it.
pub struct GitlabSession<'a> {
    gitlab: &'a GitlabClient,
    token: String,
}

impl GitlabClient {
    pub fn from_config(cfg: &Config) -> Result<Self, ScribeError> {
        let defaults = &cfg.providers.defaults;
        let client = build_client(&ClientOptions {
            proxy: cfg.gitlab.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: defaults.enable_multiplexing,
            connect_timeout: Duration::from_secs(defaults.connect_timeout_secs),
            request_timeout: Duration::from_secs(defaults.request_timeout_secs),
        })?;

        info!(gitlab_base_url = %cfg.gitlab.base_url, "GitLab config (effective)");

        Ok(Self {
            client,
            base_url: cfg.gitlab.base_url.clone(),
        })
    }

    pub fn authenticate(&self, token: &str) -> GitlabSession<'_> {
        GitlabSession {
            gitlab: self,
            token: token.to_string(),
        }
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, ScribeError> {
        let mut path = vec!["api", "v4"];
        path.extend_from_slice(segments);
        append_path(&self.base_url, &path)
    }
}

impl GitlabSession<'_> {
    /// `GET /projects/:id`; fails with the upstream status when the token cannot see it.
    pub async fn project(&self, project_id: i64) -> Result<GitlabProject, ScribeError> {
        let id = project_id.to_string();
        let url = self.gitlab.api_url(&["projects", &id])?;
        self.get_json(url).await
    }

    /// Compares `from..to` (GitLab semantics: changes on `to` that are not on `from`).
    ///
    /// The project is looked up first so that an invalid token or an unknown project
    /// is reported as such instead of as a compare failure.
    pub async fn compare(
        &self,
        project_id: i64,
        from: &str,
        to: &str,
    ) -> Result<CompareResult, ScribeError> {
        let project = self.project(project_id).await?;
        debug!(
            project_id,
            project = %project.path_with_namespace,
            "GitLab project resolved"
        );

        let id = project_id.to_string();
        let mut url = self
            .gitlab
            .api_url(&["projects", &id, "repository", "compare"])?;
        url.query_pairs_mut()
            .append_pair("from", from)
            .append_pair("to", to);

        let start = Instant::now();
        let compare: CompareResult = self.get_json(url).await?;
        info!(
            project_id,
            from,
            to,
            commits = compare.commits.len(),
            diffs = compare.diffs.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "GitLab compare fetched"
        );
        Ok(compare)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ScribeError> {
        let resp = self
            .gitlab
            .client
            .get(url.clone())
            .header(PRIVATE_TOKEN, self.token.as_str())
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            tracing::warn!(
                %status,
                path = url.path(),
                body = %body_preview(&bytes),
                "GitLab returned an error status"
            );
            return Err(ScribeError::UpstreamStatus(status));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}
