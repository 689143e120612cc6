use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::compactor::compact;
use super::extract::Section;
use super::prompt::PromptParts;
use super::{GeneratedContent, MergeRequestInput};
use crate::config::Config;
use crate::db::DbActorHandle;
use crate::error::ScribeError;
use crate::gitlab::GitlabClient;
use crate::providers::LlmGateway;
use crate::utils::logging::with_pretty_json_debug;

/// Runs the generation pipeline: resolve records, fetch the diff, prompt the model,
/// parse the answer. The first failing step ends the request.
#[derive(Clone)]
pub struct MergeRequestService {
    db: DbActorHandle,
    gateway: Arc<LlmGateway>,
    gitlab: Arc<GitlabClient>,
    max_patch_lines: usize,
    strict_output: bool,
}

impl MergeRequestService {
    pub fn new(
        db: DbActorHandle,
        gateway: Arc<LlmGateway>,
        gitlab: Arc<GitlabClient>,
        cfg: &Config,
    ) -> Self {
        Self {
            db,
            gateway,
            gitlab,
            max_patch_lines: cfg.merge_request.max_patch_lines,
            strict_output: cfg.merge_request.strict_output,
        }
    }

    pub async fn generate(
        &self,
        input: &MergeRequestInput,
    ) -> Result<GeneratedContent, ScribeError> {
        if input.origin_branch.trim().is_empty() || input.target_branch.trim().is_empty() {
            return Err(ScribeError::BadRequest(
                "origin_branch and target_branch must not be empty".to_string(),
            ));
        }

        let provider = self
            .db
            .get_provider(input.provider_id)
            .await?
            .ok_or_else(|| {
                ScribeError::NotFound(format!("Provider with id: {} not found", input.provider_id))
            })?;

        let model = self
            .db
            .get_model_by_name(&input.model)
            .await?
            .ok_or_else(|| ScribeError::NotFound(format!("Model {} not found", input.model)))?;

        if model.provider_id != provider.id {
            return Err(ScribeError::BadRequest(format!(
                "The model {} does not belong to the provider {}",
                model.name, provider.name
            )));
        }

        let template = self
            .db
            .get_template(input.template_id)
            .await?
            .ok_or_else(|| {
                ScribeError::NotFound(format!("Template with id: {} not found", input.template_id))
            })?;

        let compare = self
            .gitlab
            .authenticate(&input.pat)
            .compare(input.project_id, &input.target_branch, &input.origin_branch)
            .await?;

        let compacted = compact(&compare, self.max_patch_lines);
        with_pretty_json_debug(&compacted, |pretty| {
            debug!(project_id = input.project_id, "Compacted diff:\n{pretty}");
        });
        let diff_text = serde_json::to_string(&compacted)?;

        let messages = PromptParts {
            diff_text: &diff_text,
            title_template: &template.title,
            description_template: &template.template,
            project_context: &input.context_ai,
        }
        .into_messages();
        with_pretty_json_debug(&messages[1], |pretty| {
            debug!(provider = %provider.kind, model = %model.name, "Prompt user message:\n{pretty}");
        });

        let start = Instant::now();
        let answer = self
            .gateway
            .complete(provider.kind, &model.name, &messages)
            .await
            .ok_or(ScribeError::LlmUnavailable)?;
        info!(
            provider = %provider.kind,
            model = %model.name,
            files = compacted.total_files,
            commits = compacted.total_commits,
            took_ms = start.elapsed().as_millis() as u64,
            "Merge request content generated"
        );

        Ok(GeneratedContent {
            title: self.section(&answer, Section::Title)?,
            description: self.section(&answer, Section::Description)?,
        })
    }

    fn section(&self, answer: &str, section: Section) -> Result<Option<String>, ScribeError> {
        match section.extract(answer) {
            Some(text) => Ok(Some(text)),
            None if self.strict_output => Err(ScribeError::ContractViolation {
                section: section.name(),
            }),
            None => {
                warn!(section = section.name(), "LLM output is missing a section");
                Ok(None)
            }
        }
    }
}
