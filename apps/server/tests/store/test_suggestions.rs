//! Suggestion workflow tests with a scripted provider.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fmcp_lib::error::{AppError, AppResult};
use fmcp_lib::services::{DisabledProvider, SuggestionProvider, SuggestionService};

use super::test_helpers::*;

/// Returns a fixed answer and remembers every prompt it was sent.
struct ScriptedProvider {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

#[actix_rt::test]
async fn test_suggestions_exclude_linked_items() {
    let pool = create_test_pool().await;
    let (_, fmea_items) = seed_fmea(&pool, vec![fmea_row("Crack", 8, 4, 3)]).await;
    let (_, cp_items) = seed_cp(
        &pool,
        vec![
            cp_row("Surface", "Visual"),
            cp_row("Edge", "Touch"),
            cp_row("Length", "Caliper"),
        ],
    )
    .await;
    let fmea_id = fmea_items[0].id();
    let [linked, second, third] = [cp_items[0].id(), cp_items[1].id(), cp_items[2].id()];

    pool.create_associations(fmea_id, &[linked], UPLOADER)
        .await
        .unwrap();

    // The provider names the already-linked id first; it must be dropped.
    let provider = ScriptedProvider::new(&format!("{}, {}, {}", linked, third, second));
    let service = SuggestionService::new(provider.clone(), 3);

    let response = service.suggest(&pool, fmea_id).await.unwrap();

    let suggested: Vec<i32> = response.suggestions.iter().map(|s| s.cp_item.id).collect();
    assert_eq!(suggested, vec![third, second]);
    assert_eq!(response.suggestions[0].rank, 1);
    assert_eq!(response.candidate_count, 2);

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    let options = prompts[0]
        .split("### AVAILABLE CP ITEMS (OPTIONS):")
        .nth(1)
        .and_then(|rest| rest.split("### TARGET FMEA ITEM:").next())
        .unwrap();
    assert!(!options.contains(&format!("[CP Item ID: {}]", linked)));
    assert!(options.contains(&format!("[CP Item ID: {}]", third)));
    // The confirmed pair is offered as an example.
    assert!(prompts[0].contains(&format!("IS LINKED TO [CP Item ID: {}]", linked)));
    assert!(prompts[0].contains(&format!("[FMEA Item ID: {}] Failure Mode: Crack", fmea_id)));

    // Nothing was persisted by the suggestion.
    assert_eq!(
        pool.list_associations_for_fmea_item(fmea_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[actix_rt::test]
async fn test_no_candidates_skips_provider() {
    let pool = create_test_pool().await;
    let (_, fmea_items) = seed_fmea(&pool, vec![fmea_row("Crack", 8, 4, 3)]).await;
    let (_, cp_items) = seed_cp(&pool, vec![cp_row("Surface", "Visual")]).await;
    let fmea_id = fmea_items[0].id();

    pool.create_associations(fmea_id, &ids(&cp_items), UPLOADER)
        .await
        .unwrap();

    let provider = ScriptedProvider::new("1");
    let service = SuggestionService::new(provider.clone(), 3);
    let response = service.suggest(&pool, fmea_id).await.unwrap();

    assert!(response.suggestions.is_empty());
    assert_eq!(response.candidate_count, 0);
    assert!(response.raw_response.is_none());
    assert!(provider.prompts().is_empty());
}

#[actix_rt::test]
async fn test_suggestion_target_must_be_fmea_item() {
    let pool = create_test_pool().await;
    let (_, cp_items) = seed_cp(&pool, vec![cp_row("Surface", "Visual")]).await;
    let service = SuggestionService::new(ScriptedProvider::new(""), 3);

    assert!(matches!(
        service.suggest(&pool, cp_items[0].id()).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.suggest(&pool, 999).await,
        Err(AppError::NotFound(_))
    ));
}

#[actix_rt::test]
async fn test_disabled_provider_fails_without_touching_ledger() {
    let pool = create_test_pool().await;
    let (_, fmea_items) = seed_fmea(&pool, vec![fmea_row("Crack", 8, 4, 3)]).await;
    seed_cp(&pool, vec![cp_row("Surface", "Visual")]).await;

    let service = SuggestionService::new(Arc::new(DisabledProvider), 3);
    let result = service.suggest(&pool, fmea_items[0].id()).await;

    assert!(matches!(result, Err(AppError::Upstream(_))));
    assert!(
        pool.list_associations_for_fmea_item(fmea_items[0].id())
            .await
            .unwrap()
            .is_empty()
    );
}
