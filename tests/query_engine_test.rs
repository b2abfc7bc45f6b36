//! Integration tests for the list query engine
//!
//! Drives the engine with an in-process fetcher under a paused tokio
//! clock: debounce windows, page resets, stale-response suppression,
//! server-total clamping, and error retention.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use campaignhub::query::{EngineOptions, ListPage, ListQuery, ListQueryEngine};
use campaignhub::CampaignHubError;

/// Shared log of every query the fetcher received
type CallLog = Arc<Mutex<Vec<ListQuery>>>;

fn calls(log: &CallLog) -> Vec<ListQuery> {
    log.lock().unwrap().clone()
}

/// Engine whose fetcher records calls and answers from `respond`
fn engine_with<F>(respond: F) -> (ListQueryEngine<String>, CallLog)
where
    F: Fn(&ListQuery) -> Result<ListPage<String>, CampaignHubError> + Send + Sync + 'static,
{
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let fetcher_log = Arc::clone(&log);
    let engine = ListQueryEngine::new(EngineOptions::default(), move |query: ListQuery| {
        fetcher_log.lock().unwrap().push(query.clone());
        let result = respond(&query);
        async move { result }
    });
    (engine, log)
}

fn page_of(rows: &[&str], total_pages: u32, total_items: u64) -> ListPage<String> {
    ListPage {
        rows: rows.iter().map(|r| r.to_string()).collect(),
        total_pages,
        total_items,
    }
}

/// Let spawned fetch tasks run without firing any debounce timer
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn rapid_search_edits_collapse_into_one_request() {
    let (engine, log) = engine_with(|_| Ok(page_of(&["match"], 1, 1)));

    for text in ["s", "sa", "sal", "sale"] {
        engine.set_search_input(text);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(800)).await;

    let seen = calls(&log);
    assert_eq!(seen.len(), 1, "only the settled search term may hit the backend");
    assert_eq!(seen[0].search, "sale");
    assert_eq!(seen[0].page, 1);
    assert_eq!(engine.snapshot().rows, vec!["match"]);
}

#[tokio::test(start_paused = true)]
async fn retyping_the_effective_search_is_a_no_op() {
    let (engine, log) = engine_with(|_| Ok(page_of(&["match"], 1, 1)));

    engine.set_search_input("sale");
    tokio::time::sleep(Duration::from_millis(800)).await;
    engine.set_search_input("sale");
    tokio::time::sleep(Duration::from_millis(800)).await;

    assert_eq!(calls(&log).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn limit_edits_validate_and_reset_the_page() {
    let (engine, log) = engine_with(|q| {
        Ok(page_of(&[&format!("p{}", q.page)], 10, 50))
    });

    engine.start();
    settle().await;
    engine.set_page(3);
    settle().await;

    // Non-numeric and zero inputs must be dropped after the quiet period.
    engine.set_limit_input("abc");
    tokio::time::sleep(Duration::from_millis(600)).await;
    engine.set_limit_input("0");
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(calls(&log).len(), 2);
    assert_eq!(engine.query().limit, 5);
    assert_eq!(engine.query().page, 3);

    engine.set_limit_input("10");
    tokio::time::sleep(Duration::from_millis(600)).await;

    let seen = calls(&log);
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2].limit, 10);
    assert_eq!(seen[2].page, 1, "a new page size restarts from the first page");
}

#[tokio::test(start_paused = true)]
async fn filter_changes_apply_immediately_and_reset_the_page() {
    let (engine, log) = engine_with(|q| {
        Ok(page_of(&[&format!("p{}", q.page)], 10, 50))
    });

    engine.start();
    settle().await;
    engine.set_page(2);
    settle().await;

    engine.set_filter(Some("pending".to_string()));
    settle().await;

    let seen = calls(&log);
    assert_eq!(seen.len(), 3, "filter changes fetch without a debounce window");
    assert_eq!(seen[2].filter.as_deref(), Some("pending"));
    assert_eq!(seen[2].page, 1);

    // Re-selecting the active filter must not refetch.
    engine.set_filter(Some("pending".to_string()));
    settle().await;
    assert_eq!(calls(&log).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn superseded_responses_never_overwrite_newer_rows() {
    let (engine, _log) = {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let fetcher_log = Arc::clone(&log);
        let engine = ListQueryEngine::new(EngineOptions::default(), move |query: ListQuery| {
            fetcher_log.lock().unwrap().push(query.clone());
            async move {
                if query.filter.is_none() {
                    // Simulates the slow unfiltered request that the user
                    // navigates away from.
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Ok(page_of(&["stale"], 1, 1))
                } else {
                    Ok(page_of(&["fresh"], 1, 1))
                }
            }
        });
        (engine, log)
    };

    engine.start();
    engine.set_filter(Some("pending".to_string()));
    settle().await;
    assert_eq!(engine.snapshot().rows, vec!["fresh"]);

    // Even long after the slow request would have resolved, its result
    // must not surface.
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(engine.snapshot().rows, vec!["fresh"]);
    assert!(!engine.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_page_is_clamped_to_server_totals() {
    let (engine, log) = engine_with(|q| {
        // The backend now only has two pages, whatever was requested.
        Ok(page_of(&[&format!("p{}", q.page)], 2, 8))
    });

    engine.start();
    settle().await;
    engine.set_page(5);
    settle().await;

    let seen = calls(&log);
    assert_eq!(seen.len(), 3, "the clamp refetches exactly once");
    assert_eq!(seen[1].page, 5);
    assert_eq!(seen[2].page, 2);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.page, 2);
    assert_eq!(snapshot.rows, vec!["p2"]);

    // Already on the last page: navigation must stop, not refetch.
    engine.next_page();
    settle().await;
    assert_eq!(calls(&log).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn empty_results_settle_on_page_one_without_a_refetch() {
    let (engine, log) = engine_with(|_| Ok(page_of(&[], 0, 0)));

    engine.start();
    settle().await;

    assert_eq!(calls(&log).len(), 1, "page 1 of an empty set needs no clamp");
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.page, 1);
    assert_eq!(snapshot.window.to_string(), "0–0 of 0");
}

#[tokio::test(start_paused = true)]
async fn failed_fetches_keep_the_last_good_rows() {
    let (engine, _log) = engine_with(|q| {
        if q.filter.as_deref() == Some("boom") {
            Err(CampaignHubError::Server {
                status: 500,
                message: "backend exploded".to_string(),
            })
        } else {
            Ok(page_of(&["good"], 1, 1))
        }
    });

    engine.start();
    settle().await;
    assert_eq!(engine.snapshot().rows, vec!["good"]);

    engine.set_filter(Some("boom".to_string()));
    settle().await;

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.rows, vec!["good"], "stale rows beat an empty table");
    assert!(!snapshot.loading);
    let message = snapshot.error.unwrap();
    assert!(message.contains("backend exploded"));

    engine.dismiss_error();
    assert!(engine.snapshot().error.is_none());

    // Refresh is the retry path; the same failure comes back.
    engine.refresh();
    settle().await;
    assert!(engine.snapshot().error.is_some());
    assert_eq!(engine.snapshot().rows, vec!["good"]);
}

#[tokio::test(start_paused = true)]
async fn cancel_discards_pending_debounces_and_requests() {
    let (engine, log) = engine_with(|_| Ok(page_of(&["row"], 1, 1)));

    engine.set_search_input("half-typed");
    engine.cancel();
    tokio::time::sleep(Duration::from_millis(800)).await;

    assert_eq!(calls(&log).len(), 0, "teardown must reach the backend zero times");
    assert!(engine.snapshot().rows.is_empty());
}
