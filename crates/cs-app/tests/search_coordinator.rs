//! Debounced search, filters and list source selection.

mod common;

use std::time::Duration;

use tokio::sync::mpsc;

use common::{entries, Harness};

use cs_app::events::spawn_history_event_listener;
use cs_app::ControllerConfig;
use cs_core::history::{EmptyState, HistoryEvent};
use cs_core::search::{ContentFilter, ListSource};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[tokio::test(start_paused = true)]
async fn query_is_sent_once_the_debounce_elapses() {
    let harness = Harness::new(entries(5));

    harness.controller.search().set_query("foo");
    tokio::time::sleep(ms(250)).await;
    assert!(harness.history.finds().is_empty());

    tokio::time::sleep(ms(100)).await;
    let finds = harness.history.finds();
    assert_eq!(finds.len(), 1);
    assert_eq!(finds[0].query, "foo");
}

#[tokio::test(start_paused = true)]
async fn typing_within_the_debounce_window_sends_only_the_final_query() {
    let harness = Harness::new(entries(5));
    let search = harness.controller.search();

    search.set_query("foo");
    tokio::time::sleep(ms(150)).await;
    search.set_query("foo bar");
    tokio::time::sleep(ms(200)).await;
    assert!(harness.history.finds().is_empty());

    tokio::time::sleep(ms(200)).await;
    let finds = harness.history.finds();
    assert_eq!(finds.len(), 1);
    assert_eq!(finds[0].query, "foo bar");
    assert_eq!(search.debounced_query(), "foo bar");
}

#[tokio::test(start_paused = true)]
async fn single_character_queries_keep_the_unfiltered_list() {
    let harness = Harness::new(entries(5));
    harness.load_all().await;

    harness.controller.search().set_query("v");
    tokio::time::sleep(ms(400)).await;

    assert!(harness.history.finds().is_empty());
    assert_eq!(harness.controller.list_source(), ListSource::All);
    assert_eq!(harness.controller.collection().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn active_search_renders_the_results_and_clear_restores_the_list() {
    let harness = Harness::new(entries(12));
    harness.load_all().await;

    harness.controller.search().set_query("value 1");
    tokio::time::sleep(ms(400)).await;

    assert_eq!(harness.controller.list_source(), ListSource::Found);
    let found: Vec<String> = harness
        .controller
        .collection()
        .into_iter()
        .map(|e| e.value)
        .collect();
    assert_eq!(found, vec!["value 1", "value 10", "value 11"]);

    harness.controller.search().clear();
    assert_eq!(harness.controller.list_source(), ListSource::All);
    assert_eq!(harness.controller.collection().len(), 12);
}

#[tokio::test(start_paused = true)]
async fn search_without_matches_shows_no_results() {
    let harness = Harness::new(entries(3));
    harness.load_all().await;

    harness.controller.search().set_query("nothing like this");
    tokio::time::sleep(ms(400)).await;

    assert_eq!(harness.controller.empty_state(), Some(EmptyState::NoResults));
}

#[tokio::test]
async fn toggling_a_filter_searches_immediately() {
    let harness = Harness::new(entries(3));

    harness
        .controller
        .search()
        .toggle_content_filter(ContentFilter::Link)
        .await;

    let finds = harness.history.finds();
    assert_eq!(finds.len(), 1);
    assert_eq!(finds[0].filters, vec![ContentFilter::Link]);
    assert!(harness.controller.search().has_search_or_filter());

    harness
        .controller
        .search()
        .toggle_content_filter(ContentFilter::Link)
        .await;
    assert_eq!(harness.history.finds().len(), 1);
    assert_eq!(harness.controller.list_source(), ListSource::All);
}

#[tokio::test]
async fn failed_search_keeps_the_previous_results() {
    let harness = Harness::new(entries(3));
    let search = harness.controller.search();
    search.toggle_app("Terminal").await;
    search.toggle_content_filter(ContentFilter::Text).await;
    let before = search.results();

    harness.history.fail_finds(true);
    search.refetch().await;

    assert_eq!(search.results(), before);
}

#[tokio::test]
async fn clipboard_updates_refetch_only_while_searching() {
    let harness = Harness::new(entries(3));
    assert!(!harness.controller.on_clipboard_updated().await);
    assert!(harness.history.finds().is_empty());

    harness
        .controller
        .search()
        .toggle_code_language("rust")
        .await;
    assert_eq!(harness.history.finds().len(), 1);

    let (tx, rx) = mpsc::channel(4);
    let listener = spawn_history_event_listener(rx, harness.controller.clone());
    tx.send(HistoryEvent::ClipboardMonitorUpdate {
        payload: "update".to_string(),
    })
    .await
    .unwrap();
    drop(tx);
    listener.await.unwrap();

    assert_eq!(harness.history.finds().len(), 2);
}

#[tokio::test]
async fn auto_update_can_be_disabled() {
    let config = ControllerConfig {
        auto_update_on_capture: false,
        ..ControllerConfig::default()
    };
    let harness = Harness::with_config(entries(3), config);
    harness.controller.search().toggle_app("Editor").await;

    assert!(!harness.controller.on_clipboard_updated().await);
    assert_eq!(harness.history.finds().len(), 1);

    harness.controller.search().set_auto_update_on_capture(true);
    assert!(harness.controller.on_clipboard_updated().await);
    assert_eq!(harness.history.finds().len(), 2);
}
