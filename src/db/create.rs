use serde::{Deserialize, Serialize};

use crate::providers::ProviderKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCreate {
    pub provider_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCreate {
    pub title: String,
    pub template: String,
    #[serde(default)]
    pub description: Option<String>,
}
