//! AI association suggestions.
//!
//! The provider is opaque: it receives a prompt and answers in free text.
//! The shipped provider calls a Dify workflow in blocking mode. The answer is
//! parsed into CP item ids and only ids from the candidate set survive.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::SuggestionConfig;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CpItem, FmeaItem, SuggestedCpItem, SuggestionResponse};

/// Confirmed pairs shown to the provider as examples.
pub const EXAMPLE_LIMIT: u64 = 5;

/// HTTP connect timeout for provider calls.
const PROVIDER_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// `user` field sent with every workflow run.
const WORKFLOW_USER: &str = "fmea-cp-analyzer";

/// Text-completion collaborator used for suggestions.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Send a prompt and return the provider's text answer.
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// Provider used when no AI endpoint is configured. Every call fails.
pub struct DisabledProvider;

#[async_trait]
impl SuggestionProvider for DisabledProvider {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        Err(AppError::Upstream(
            "AI suggestions are not configured on this server".to_string(),
        ))
    }
}

/// Dify workflow API client.
pub struct DifyClient {
    workflow_url: String,
    api_key: SecretString,
    http_client: reqwest::Client,
}

#[derive(Deserialize)]
struct WorkflowRunResponse {
    data: Option<WorkflowRunData>,
}

#[derive(Deserialize)]
struct WorkflowRunData {
    outputs: Option<WorkflowOutputs>,
}

#[derive(Deserialize)]
struct WorkflowOutputs {
    text: Option<String>,
}

impl DifyClient {
    pub fn new(api_url: &str, api_key: SecretString, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(PROVIDER_CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Upstream(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            workflow_url: format!("{}/workflows/run", api_url.trim_end_matches('/')),
            api_key,
            http_client,
        })
    }
}

#[async_trait]
impl SuggestionProvider for DifyClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        debug!("Sending suggestion prompt to {}", self.workflow_url);

        let payload = serde_json::json!({
            "inputs": { "query": prompt },
            "response_mode": "blocking",
            "user": WORKFLOW_USER,
        });

        let response = self
            .http_client
            .post(&self.workflow_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Workflow call failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Workflow returned {}: {}", status, body);
            return Err(AppError::Upstream(format!("Workflow returned {}", status)));
        }

        let body: WorkflowRunResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid workflow response: {}", e)))?;

        body.data
            .and_then(|d| d.outputs)
            .and_then(|o| o.text)
            .ok_or_else(|| AppError::Upstream("Workflow response has no outputs.text".to_string()))
    }
}

/// Build the provider from configuration; disabled when URL or key is missing.
pub fn provider_from_config(config: &SuggestionConfig) -> AppResult<Arc<dyn SuggestionProvider>> {
    match (&config.api_url, &config.api_key) {
        (Some(url), Some(key)) => {
            info!("AI suggestions enabled (endpoint={})", url);
            Ok(Arc::new(DifyClient::new(
                url,
                SecretString::from(key.clone()),
                Duration::from_secs(config.timeout_secs),
            )?))
        }
        _ => {
            warn!("DIFY_API_URL or DIFY_API_KEY not set; AI suggestions disabled");
            Ok(Arc::new(DisabledProvider))
        }
    }
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn format_fmea_item(item: &FmeaItem) -> String {
    format!(
        "[FMEA Item ID: {}] Failure Mode: {}, Cause: {}",
        item.id,
        text(item.failure_mode.as_deref()),
        text(item.failure_cause.as_deref())
    )
}

fn format_cp_item(item: &CpItem) -> String {
    format!(
        "[CP Item ID: {}] Characteristic: {}, Method: {}",
        item.id,
        text(item.product_characteristic.as_deref()),
        text(item.control_method.as_deref())
    )
}

/// Compose the suggestion prompt.
pub fn build_prompt(
    target: &FmeaItem,
    candidates: &[CpItem],
    examples: &[(FmeaItem, CpItem)],
    limit: usize,
) -> String {
    let examples_text = if examples.is_empty() {
        "No examples available.".to_string()
    } else {
        examples
            .iter()
            .map(|(fmea, cp)| {
                format!(
                    "- Example: {} IS LINKED TO {}",
                    format_fmea_item(fmea),
                    format_cp_item(cp)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let options_text = candidates
        .iter()
        .map(format_cp_item)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert assistant for quality control in manufacturing. \
Your task is to find the best matches for a target FMEA item from a list of available Control Plan (CP) items.\n\n\
### EXAMPLES OF EXISTING LINKS:\n{examples_text}\n\n\
### AVAILABLE CP ITEMS (OPTIONS):\n{options_text}\n\n\
### TARGET FMEA ITEM:\n{target}\n\n\
Analyze the target FMEA item and the list of available CP items. \
Identify the top {limit} most suitable CP Item IDs from the list. \
Respond with ONLY a comma-separated list of the numeric IDs, \
ordered from the most relevant to the least relevant (e.g., 123, 456, 789).",
        target = format_fmea_item(target),
    )
}

/// Extract CP ids from a free-text answer.
///
/// Keeps answer order, drops ids outside `candidates` and repeats, stops at `limit`.
pub fn parse_suggested_ids(answer: &str, candidates: &[i32], limit: usize) -> Vec<i32> {
    let mut ids = Vec::new();

    for token in answer.split(|c: char| !c.is_ascii_digit()) {
        if ids.len() >= limit {
            break;
        }
        let Ok(id) = token.parse::<i32>() else {
            continue;
        };
        if candidates.contains(&id) && !ids.contains(&id) {
            ids.push(id);
        }
    }

    ids
}

/// Suggestion workflow over the store and a provider.
#[derive(Clone)]
pub struct SuggestionService {
    provider: Arc<dyn SuggestionProvider>,
    limit: usize,
}

impl SuggestionService {
    pub fn new(provider: Arc<dyn SuggestionProvider>, limit: usize) -> Self {
        Self { provider, limit }
    }

    /// Rank unlinked CP items for an FMEA item. Nothing is persisted.
    pub async fn suggest(&self, pool: &DbPool, fmea_item_id: i32) -> AppResult<SuggestionResponse> {
        let target = pool.get_fmea_item(fmea_item_id).await?;

        let linked: Vec<i32> = pool
            .list_associations_for_fmea_item(fmea_item_id)
            .await?
            .into_iter()
            .map(|a| a.cp_item_id)
            .collect();

        let candidates = pool.list_cp_items_excluding(&linked).await?;
        if candidates.is_empty() {
            return Ok(SuggestionResponse {
                fmea_item_id,
                message: "No unlinked Control Plan items available to suggest.".to_string(),
                suggestions: Vec::new(),
                candidate_count: 0,
                raw_response: None,
            });
        }

        let examples = pool.example_associations(EXAMPLE_LIMIT).await?;
        let prompt = build_prompt(&target, &candidates, &examples, self.limit);

        let answer = self.provider.complete(&prompt).await?;
        let candidate_ids: Vec<i32> = candidates.iter().map(|c| c.id).collect();
        let ids = parse_suggested_ids(&answer, &candidate_ids, self.limit);

        info!(
            fmea_item_id,
            candidates = candidates.len(),
            suggested = ids.len(),
            "AI suggestions received"
        );

        let suggestions = ids
            .iter()
            .enumerate()
            .filter_map(|(rank, id)| {
                candidates
                    .iter()
                    .find(|c| c.id == *id)
                    .map(|cp| SuggestedCpItem {
                        rank: rank + 1,
                        cp_item: cp.clone(),
                    })
            })
            .collect();

        Ok(SuggestionResponse {
            fmea_item_id,
            message: "AI suggestions received successfully.".to_string(),
            suggestions,
            candidate_count: candidates.len(),
            raw_response: Some(answer.trim().to_string()),
        })
    }
}
