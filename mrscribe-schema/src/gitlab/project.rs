use serde::{Deserialize, Serialize};

/// Subset of `GET /api/v4/projects/:id` used to confirm the token can see the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitlabProject {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub path_with_namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}
