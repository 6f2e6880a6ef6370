use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Once};

use linkdrop_core::{update, AppState, BackendReply, Effect, Msg, Source, Submission};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(linkdrop_logging::initialize_for_tests);
}

fn fixed_state() -> AppState {
    init_logging();
    AppState::new().with_clock(Arc::new(|| "12:00:00".to_string()))
}

fn submit(state: AppState, source: Source, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(
        state,
        Msg::InputChanged {
            source,
            text: input.to_string(),
        },
    );
    update(state, Msg::ConfirmClicked(source))
}

fn complete(
    state: AppState,
    source: Source,
    outcome: Result<BackendReply, String>,
) -> (AppState, Vec<Effect>) {
    update(state, Msg::SubmissionCompleted { source, outcome })
}

fn messages(state: &AppState, source: Source) -> Vec<String> {
    state
        .log(source)
        .messages()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn success_reply() -> BackendReply {
    BackendReply {
        status: Some("Success".to_string()),
        path: Some("/x".to_string()),
        download_url: Some("/download/x".to_string()),
        message: None,
    }
}

#[test]
fn empty_input_never_dispatches() {
    for source in Source::ALL {
        for input in ["", "   ", "\t\n"] {
            let (state, effects) = submit(fixed_state(), source, input);
            assert!(effects.is_empty());
            assert_eq!(
                messages(&state, source),
                vec![format!("Error: Please enter a {} URL.", source.display_name())]
            );
            assert_eq!(state.in_flight(), 0);
        }
    }
}

#[test]
fn video_submission_posts_defaults_and_clears_input() {
    let (state, effects) = submit(fixed_state(), Source::Video, "  https://youtu.be/abc  ");

    assert_eq!(
        effects,
        vec![Effect::Submit {
            source: Source::Video,
            endpoint: "http://127.0.0.1:5000/process-youtube".to_string(),
            submission: Submission {
                url: "https://youtu.be/abc".to_string(),
                quality: Some("best".to_string()),
                format: Some("mp4".to_string()),
            },
        }]
    );
    assert_eq!(
        messages(&state, Source::Video),
        vec![
            "Processing YouTube URL: https://youtu.be/abc",
            "Sending request to backend...",
        ]
    );
    assert_eq!(state.input(Source::Video), "");
    assert_eq!(state.in_flight(), 1);
}

#[test]
fn social_submission_posts_url_only() {
    let (_, effects) = submit(fixed_state(), Source::Social, "https://x.com/a/status/1");

    assert_eq!(
        effects,
        vec![Effect::Submit {
            source: Source::Social,
            endpoint: "http://127.0.0.1:5000/process-twitter".to_string(),
            submission: Submission {
                url: "https://x.com/a/status/1".to_string(),
                quality: None,
                format: None,
            },
        }]
    );
}

#[test]
fn success_reply_logs_and_navigates() {
    let (state, _) = submit(fixed_state(), Source::Video, "https://youtu.be/abc");
    let (state, effects) = complete(state, Source::Video, Ok(success_reply()));

    assert_eq!(
        effects,
        vec![Effect::Navigate {
            url: "http://127.0.0.1:5000/download/x".to_string()
        }]
    );
    assert_eq!(
        &messages(&state, Source::Video)[2..],
        &[
            "Backend: Success",
            "Server path: /x",
            "Success! Starting download from http://127.0.0.1:5000/download/x",
        ]
    );
    assert_eq!(state.in_flight(), 0);
}

#[test]
fn success_without_download_url_is_reported() {
    let reply = BackendReply {
        download_url: None,
        ..success_reply()
    };
    let (state, effects) = complete(fixed_state(), Source::Social, Ok(reply));

    assert!(effects.is_empty());
    assert_eq!(
        messages(&state, Source::Social),
        vec![
            "Backend: Success",
            "Server path: /x",
            "Error: Backend succeeded but did not provide a download URL.",
        ]
    );
}

#[test]
fn download_url_without_success_never_navigates() {
    let reply = BackendReply {
        status: Some("Error".to_string()),
        message: Some("quota exceeded".to_string()),
        ..success_reply()
    };
    let (state, effects) = complete(fixed_state(), Source::Video, Ok(reply));

    assert!(effects.is_empty());
    assert_eq!(
        messages(&state, Source::Video),
        vec!["Backend: Error", "Error: quota exceeded"]
    );
}

#[test]
fn malformed_success_only_logs_status() {
    for source in [Source::Video, Source::Social] {
        let reply = BackendReply {
            status: Some("Success".to_string()),
            ..BackendReply::default()
        };
        let (state, effects) = complete(fixed_state(), source, Ok(reply));

        assert!(effects.is_empty());
        assert_eq!(messages(&state, source), vec!["Backend: Success"]);
    }
}

#[test]
fn blank_download_url_never_navigates_to_the_origin() {
    let reply = BackendReply {
        download_url: Some(String::new()),
        ..success_reply()
    };
    let (state, effects) = complete(fixed_state(), Source::Video, Ok(reply));

    assert!(effects.is_empty());
    assert_eq!(
        messages(&state, Source::Video),
        vec![
            "Backend: Success",
            "Server path: /x",
            "Error: Backend succeeded but did not provide a download URL.",
        ]
    );
}

#[test]
fn blank_path_falls_through_to_the_server_message() {
    let reply = BackendReply {
        path: Some(String::new()),
        message: Some("oops".to_string()),
        ..success_reply()
    };
    let (state, effects) = complete(fixed_state(), Source::Video, Ok(reply));

    assert!(effects.is_empty());
    assert_eq!(
        messages(&state, Source::Video),
        vec!["Backend: Success", "Error: oops"]
    );
}

#[test]
fn blank_message_is_treated_as_missing() {
    for source in [Source::Video, Source::Social] {
        let reply = BackendReply {
            status: Some("Error".to_string()),
            message: Some(String::new()),
            ..BackendReply::default()
        };
        let (state, effects) = complete(fixed_state(), source, Ok(reply));

        assert!(effects.is_empty());
        assert_eq!(messages(&state, source), vec!["Backend: Error"]);
    }
}

#[test]
fn rejection_logs_message_and_video_hint() {
    let (state, _) = complete(fixed_state(), Source::Video, Err("bad url".to_string()));
    assert_eq!(
        messages(&state, Source::Video),
        vec![
            "Error sending request: bad url",
            "Is the backend server running? Check the application log for details.",
        ]
    );

    let (state, _) = complete(
        fixed_state(),
        Source::Social,
        Err("HTTP error! status: 500".to_string()),
    );
    assert_eq!(
        messages(&state, Source::Social),
        vec!["Error sending request: HTTP error! status: 500"]
    );
}

#[test]
fn music_never_touches_the_network() {
    let (state, effects) = submit(fixed_state(), Source::Music, "https://open.spotify.com/track/1");

    assert!(effects.is_empty());
    assert_eq!(
        messages(&state, Source::Music),
        vec![
            "Processing Spotify URL: https://open.spotify.com/track/1",
            "Note: Actual download requires a backend server.",
        ]
    );
    assert_eq!(state.input(Source::Music), "");
    assert_eq!(state.in_flight(), 0);
}

#[test]
fn double_click_issues_independent_requests_applied_in_arrival_order() {
    let state = fixed_state();
    let (state, first) = submit(state, Source::Social, "https://x.com/a/status/1");
    let (state, second) = submit(state, Source::Social, "https://x.com/a/status/2");
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(state.in_flight(), 2);

    // The second request answers first.
    let (state, _) = complete(state, Source::Social, Err("second failed".to_string()));
    let (state, _) = complete(
        state,
        Source::Social,
        Ok(BackendReply {
            status: Some("Error".to_string()),
            message: Some("first failed".to_string()),
            ..BackendReply::default()
        }),
    );

    let log = messages(&state, Source::Social);
    assert_eq!(
        &log[4..],
        &[
            "Error sending request: second failed",
            "Backend: Error",
            "Error: first failed",
        ]
    );
    assert_eq!(state.in_flight(), 0);
}

#[test]
fn logs_are_scoped_per_source() {
    let (state, _) = submit(fixed_state(), Source::Video, "");
    assert_eq!(state.log(Source::Video).len(), 1);
    assert!(state.log(Source::Social).is_empty());
    assert!(state.log(Source::Music).is_empty());
}

#[test]
fn log_lines_keep_call_order_with_timestamps() {
    init_logging();
    let counter = Arc::new(AtomicU32::new(0));
    let clock_counter = counter.clone();
    let mut state = AppState::new().with_clock(Arc::new(move || {
        format!("t{}", clock_counter.fetch_add(1, Ordering::SeqCst))
    }));

    for _ in 0..5 {
        state = submit(state, Source::Music, "").0;
    }

    let log = state.log(Source::Music);
    assert_eq!(log.len(), 5);
    let stamps: Vec<_> = log.entries().iter().map(|e| e.timestamp.as_str()).collect();
    assert_eq!(stamps, vec!["t0", "t1", "t2", "t3", "t4"]);
    assert!(log
        .text()
        .lines()
        .all(|line| line.starts_with("[t") && line.ends_with("Error: Please enter a Spotify URL.")));
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[test]
fn download_outcome_goes_to_status_line_only() {
    let (state, _) = update(
        fixed_state(),
        Msg::DownloadFinished {
            url: "http://127.0.0.1:5000/download/x".to_string(),
            outcome: Ok("downloads/x.mp4".to_string()),
        },
    );
    assert!(state.view().status_line.ends_with("| Saved downloads/x.mp4"));
    for source in Source::ALL {
        assert!(state.log(source).is_empty());
    }
}
