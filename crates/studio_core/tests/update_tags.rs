use std::sync::Once;

use studio_core::{
    update, AppState, Effect, JobOutcome, JobStatus, Msg, ResultView, Route, TagResult, ToolId,
    TAGS_COPIED_NOTICE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(studio_logging::initialize_for_tests);
}

fn submit_keyword(keyword: &str) -> (AppState, u64) {
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Tool(ToolId::TagGenerator)));
    let (state, _) = update(state, Msg::PromptChanged(keyword.to_string()));
    let (state, effects) = update(state, Msg::StartClicked);
    match effects.as_slice() {
        [Effect::GenerateTags { job_id, keyword: sent }] => {
            assert_eq!(sent, keyword.trim());
            (state, *job_id)
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

fn fitness_batch() -> Vec<TagResult> {
    vec![TagResult {
        tags: vec!["fitness".to_string(), "gym".to_string()],
        trending_score: 80,
        search_volume: "10K".to_string(),
    }]
}

#[test]
fn blank_keyword_is_blocked() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Tool(ToolId::TagGenerator)));
    let (state, _) = update(state, Msg::PromptChanged("   ".to_string()));
    let (state, effects) = update(state, Msg::StartClicked);
    assert!(effects.is_empty());
    assert_eq!(state.screen().unwrap().job().status(), JobStatus::Idle);
}

#[test]
fn failure_clears_processing_and_appends_nothing() {
    init_logging();
    let (state, job_id) = submit_keyword("Fitness");
    assert_eq!(
        state.view().screen.unwrap().result,
        ResultView::Pending {
            label: "Analyzing...",
        }
    );

    let (state, _) = update(
        state,
        Msg::JobFinished {
            job_id,
            outcome: JobOutcome::Failed,
        },
    );
    let screen = state.screen().unwrap();
    assert!(!screen.job().is_processing());
    assert!(screen.tag_results().is_empty());
    assert_eq!(
        screen.job().error(),
        Some("Error generating tags. Please check your network or API limit.")
    );
}

#[test]
fn success_renders_exactly_one_card_with_literal_values() {
    init_logging();
    let (state, job_id) = submit_keyword("Fitness");
    let (state, _) = update(
        state,
        Msg::JobFinished {
            job_id,
            outcome: JobOutcome::Tags(fitness_batch()),
        },
    );

    let view = state.view().screen.unwrap();
    assert_eq!(view.status, JobStatus::Completed);
    let ResultView::Tags(cards) = view.result else {
        panic!("expected tag cards, got {:?}", view.result);
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].tags, vec!["fitness", "gym"]);
    assert_eq!(cards[0].hashtags, vec!["#fitness", "#gym"]);
    assert_eq!(cards[0].trending_score, 80);
    assert_eq!(cards[0].search_volume, "10K");
}

#[test]
fn successive_queries_accumulate_in_order() {
    init_logging();
    let (state, job_id) = submit_keyword("Fitness");
    let (state, _) = update(
        state,
        Msg::JobFinished {
            job_id,
            outcome: JobOutcome::Tags(fitness_batch()),
        },
    );

    let (state, _) = update(state, Msg::PromptChanged("Fitness".to_string()));
    let (state, effects) = update(state, Msg::StartClicked);
    let [Effect::GenerateTags { job_id, .. }] = effects.as_slice() else {
        panic!("resubmission from completed should start a job");
    };
    let (state, _) = update(
        state,
        Msg::JobFinished {
            job_id: *job_id,
            outcome: JobOutcome::Tags(fitness_batch()),
        },
    );

    let results = state.screen().unwrap().tag_results();
    assert_eq!(results.len(), 2, "identical batches are not deduplicated");
    assert_eq!(results[0], results[1]);
}

#[test]
fn copy_joins_tags_and_acknowledges() {
    init_logging();
    let (state, job_id) = submit_keyword("Fitness");
    let (state, _) = update(
        state,
        Msg::JobFinished {
            job_id,
            outcome: JobOutcome::Tags(fitness_batch()),
        },
    );
    let screen_id = state.screen().unwrap().id();

    let (state, effects) = update(state, Msg::CopyTagsClicked { index: 0 });
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            screen_id,
            text: "fitness, gym".to_string(),
        }]
    );

    let (state, effects) = update(state, Msg::CopyTagsClicked { index: 3 });
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::ClipboardWritten {
            screen_id,
            result: Ok(()),
        },
    );
    assert_eq!(
        state.view().screen.unwrap().notice.as_deref(),
        Some(TAGS_COPIED_NOTICE)
    );
}
