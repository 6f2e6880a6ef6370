use linkdrop_logging::{linkdrop_debug, linkdrop_error, linkdrop_info, linkdrop_warn};

use crate::{AppState, BackendReply, Effect, HealthStatus, Msg, Source, Submission, HEALTH_PATH};

const SUCCESS_STATUS: &str = "Success";
const PLACEHOLDER_NOTE: &str = "Note: Actual download requires a backend server.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            // One-shot probe; a repeated start never re-checks.
            if state.health() != HealthStatus::Unknown {
                return (state, Vec::new());
            }
            state.set_health(HealthStatus::Checking);
            let url = state.endpoint_url(HEALTH_PATH);
            linkdrop_info!("Attempting health check at: {}", url);
            vec![Effect::ProbeHealth { url }]
        }
        Msg::TabClicked(button_id) => {
            if !state.click_tab(&button_id) {
                linkdrop_debug!("Ignoring click on unknown tab {:?}", button_id);
            }
            Vec::new()
        }
        Msg::InputChanged { source, text } => {
            state.set_input(source, text);
            Vec::new()
        }
        Msg::ConfirmClicked(source) => confirm(&mut state, source),
        Msg::HealthChecked(Ok(body)) => {
            linkdrop_info!("Server is available: {}", body);
            state.set_health(HealthStatus::Online);
            Vec::new()
        }
        Msg::HealthChecked(Err(detail)) => {
            let url = state.endpoint_url(HEALTH_PATH);
            linkdrop_error!("Server health check failed: {}", detail);
            state.set_health(HealthStatus::Offline);
            state.set_alert(format!(
                "Warning: Could not connect to the backend server at {url}. \
                 Please ensure it is running and accessible. Error: {detail}"
            ));
            Vec::new()
        }
        Msg::SubmissionCompleted { source, outcome } => {
            state.finish_request();
            match outcome {
                Ok(reply) => apply_reply(&mut state, source, reply),
                Err(message) => {
                    linkdrop_warn!("{} request rejected: {}", source.display_name(), message);
                    state.append_log(source, format!("Error sending request: {message}"));
                    if let Some(hint) = source.profile().rejection_hint {
                        state.append_log(source, hint);
                    }
                    Vec::new()
                }
            }
        }
        Msg::DownloadFinished { url, outcome } => {
            match outcome {
                Ok(saved) => {
                    linkdrop_info!("Download from {} saved to {}", url, saved);
                    state.set_last_download(format!("Saved {saved}"));
                }
                Err(message) => {
                    linkdrop_error!("Download from {} failed: {}", url, message);
                    state.set_last_download(format!("Download failed: {message}"));
                }
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn confirm(state: &mut AppState, source: Source) -> Vec<Effect> {
    let profile = source.profile();
    let url = state.input(source).trim().to_string();
    if url.is_empty() {
        state.append_log(
            source,
            format!("Error: Please enter a {} URL.", profile.display_name),
        );
        return Vec::new();
    }

    state.append_log(
        source,
        format!("Processing {} URL: {url}", profile.display_name),
    );

    let effects = if profile.dispatches_requests {
        state.append_log(source, "Sending request to backend...");
        let endpoint = state.endpoint_url(profile.endpoint);
        linkdrop_debug!("Sending {} request to {}", profile.display_name, endpoint);
        state.begin_request();
        vec![Effect::Submit {
            source,
            endpoint,
            submission: Submission {
                url,
                quality: profile.default_quality.map(str::to_string),
                format: profile.default_format.map(str::to_string),
            },
        }]
    } else {
        state.append_log(source, PLACEHOLDER_NOTE);
        Vec::new()
    };

    // Cleared as soon as the request is dispatched, not when it completes.
    state.clear_input(source);
    effects
}

fn apply_reply(state: &mut AppState, source: Source, reply: BackendReply) -> Vec<Effect> {
    let status = reply.status.as_deref().unwrap_or("(no status)");
    state.append_log(source, format!("Backend: {status}"));

    let path = non_empty(reply.path);
    let message = non_empty(reply.message);
    match (reply.status.as_deref(), path, message) {
        (Some(SUCCESS_STATUS), Some(path), _) => {
            state.append_log(source, format!("Server path: {path}"));
            match non_empty(reply.download_url) {
                Some(download_url) => {
                    let url = state.endpoint_url(&download_url);
                    state.append_log(source, format!("Success! Starting download from {url}"));
                    vec![Effect::Navigate { url }]
                }
                None => {
                    state.append_log(
                        source,
                        "Error: Backend succeeded but did not provide a download URL.",
                    );
                    Vec::new()
                }
            }
        }
        (_, _, Some(message)) => {
            state.append_log(source, format!("Error: {message}"));
            Vec::new()
        }
        _ => {
            // Neither a usable success nor an error message: only the status
            // line is shown.
            linkdrop_warn!(
                "{} reply carried neither a path nor a message (status {:?})",
                source.display_name(),
                reply.status
            );
            Vec::new()
        }
    }
}

/// Blank reply fields count as absent.
fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
