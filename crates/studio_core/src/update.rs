use std::path::Path;

use crate::job::JobStatus;
use crate::{
    AppState, Effect, InputPayload, JobId, JobOutcome, MediaKind, Msg, ToolCategory, ToolId,
    ToolScreen,
};

pub const TAGS_COPIED_NOTICE: &str = "Tags copied to clipboard!";
pub const SIMULATED_DOWNLOAD_NOTICE: &str = "File downloaded!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(route) => {
            if route == state.route() {
                return (state, Vec::new());
            }
            state
                .navigate(route)
                .map(|job_id| Effect::CancelJob { job_id })
                .into_iter()
                .collect()
        }
        Msg::FileChosen(path) => {
            let Some(screen) = state.screen_mut() else {
                return (state, Vec::new());
            };
            let requirement = screen.tool.descriptor().requirement;
            let (Some(kind), Some(mode)) = (requirement.media_kind(), requirement.file_load_mode())
            else {
                return (state, Vec::new());
            };
            if screen.job.is_processing() {
                return (state, Vec::new());
            }
            if !kind.matches_path(&path) {
                screen.notice = Some(unsupported_file_notice(&path, kind));
                state.mark_dirty();
                return (state, Vec::new());
            }
            let screen_id = screen.id;
            screen.input.set_pending_file(path.clone());
            state.mark_dirty();
            vec![Effect::LoadFile {
                screen_id,
                path,
                mode,
            }]
        }
        Msg::FileLoaded {
            screen_id,
            path,
            result,
        } => {
            let Some(screen) = state.live_screen_mut(screen_id) else {
                return (state, Vec::new());
            };
            let kind = screen.tool.descriptor().requirement.media_kind();
            let changed = match result {
                // The running job keeps the input it started with.
                _ if screen.job.is_processing() => {
                    screen.input.clear_pending_file(&path);
                    false
                }
                Ok(file) if !kind.is_some_and(|kind| kind.matches_mime(&file.mime)) => {
                    let accepted = screen.input.clear_pending_file(&path);
                    if accepted {
                        if let Some(kind) = kind {
                            screen.notice = Some(unsupported_file_notice(&path, kind));
                        }
                    }
                    accepted
                }
                Ok(file) => {
                    let accepted = screen.input.set_loaded_file(&path, file);
                    if accepted && screen.job.status() == JobStatus::Completed {
                        screen.job.reset();
                    }
                    if accepted {
                        // A new upload invalidates the previous result.
                        screen.artifact = None;
                    }
                    accepted
                }
                Err(message) => {
                    let accepted = screen.input.clear_pending_file(&path);
                    if accepted {
                        screen.notice = Some(format!(
                            "Could not read {}: {message}",
                            path.display()
                        ));
                    }
                    accepted
                }
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlChanged(url) => {
            if let Some(screen) = editable_screen(&mut state) {
                if screen.input.url() != url {
                    screen.input.set_url(url);
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::PromptChanged(prompt) => {
            if let Some(screen) = editable_screen(&mut state) {
                if screen.input.prompt() != prompt {
                    screen.input.set_prompt(prompt);
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::SettingChanged(change) => {
            let applied = editable_screen(&mut state)
                .and_then(|screen| screen.settings.as_mut())
                .is_some_and(|settings| settings.apply(change));
            if applied {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StartClicked => start(&mut state).into_iter().collect(),
        Msg::ResetClicked => {
            let Some(screen) = state.screen_mut() else {
                return (state, Vec::new());
            };
            let in_flight = screen.reset();
            state.mark_dirty();
            in_flight
                .map(|job_id| Effect::CancelJob { job_id })
                .into_iter()
                .collect()
        }
        Msg::JobProgress { job_id, progress } => {
            let changed = state
                .screen_mut()
                .is_some_and(|screen| screen.job.advance(job_id, progress));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobFinished { job_id, outcome } => {
            let changed = state
                .screen_mut()
                .is_some_and(|screen| finish(screen, job_id, outcome));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DownloadClicked => download(&mut state).into_iter().collect(),
        Msg::ArtifactSaved { screen_id, result } => {
            if let Some(screen) = state.live_screen_mut(screen_id) {
                screen.notice = Some(match result {
                    Ok(path) => format!("Saved {}", path.display()),
                    Err(message) => format!("Download failed: {message}"),
                });
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CopyTagsClicked { index } => {
            let Some(screen) = state.screen_mut() else {
                return (state, Vec::new());
            };
            match screen.tag_results.get(index) {
                Some(result) => vec![Effect::CopyToClipboard {
                    screen_id: screen.id,
                    text: result.tags.join(", "),
                }],
                None => Vec::new(),
            }
        }
        Msg::ClipboardWritten { screen_id, result } => {
            if let Some(screen) = state.live_screen_mut(screen_id) {
                screen.notice = Some(match result {
                    Ok(()) => TAGS_COPIED_NOTICE.to_string(),
                    Err(message) => format!("Could not copy tags: {message}"),
                });
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DismissError => {
            if state
                .screen_mut()
                .is_some_and(|screen| screen.job.dismiss_error())
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DismissNotice => {
            if state
                .screen_mut()
                .is_some_and(|screen| screen.notice.take().is_some())
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

/// The current screen, unless a job is running on it.
fn editable_screen(state: &mut AppState) -> Option<&mut ToolScreen> {
    state.screen_mut().filter(|screen| !screen.job.is_processing())
}

fn start(state: &mut AppState) -> Option<Effect> {
    let screen = state.screen()?;
    match screen.job.status() {
        JobStatus::Processing => return None,
        JobStatus::Completed if !screen.can_restart_from_completed() => return None,
        JobStatus::Idle | JobStatus::Completed => {}
    }
    let tool = screen.tool;
    let settings = screen.settings;
    let payload = screen.input.validate(tool.descriptor().requirement)?;

    let job_id = state.allocate_job_id();
    let effect = job_effect(job_id, tool, payload, settings)?;
    let screen = state.screen_mut()?;
    screen.job.begin(job_id);
    screen.notice = None;
    state.mark_dirty();
    Some(effect)
}

fn job_effect(
    job_id: JobId,
    tool: ToolId,
    payload: InputPayload,
    settings: Option<crate::ToolSettings>,
) -> Option<Effect> {
    if tool.category() == ToolCategory::Video {
        return Some(Effect::Simulate {
            job_id,
            tool,
            settings,
        });
    }
    match (tool, payload) {
        (
            ToolId::ImageEditor,
            InputPayload::File {
                file,
                instruction: Some(instruction),
            },
        ) => Some(Effect::EditImage {
            job_id,
            image: file.preview?,
            instruction,
        }),
        (ToolId::ImageEnhancer, InputPayload::File { file, .. }) => Some(Effect::EnhanceImage {
            job_id,
            image: file.preview?,
        }),
        (ToolId::TagGenerator, InputPayload::Prompt(keyword)) => {
            Some(Effect::GenerateTags { job_id, keyword })
        }
        _ => None,
    }
}

fn finish(screen: &mut ToolScreen, job_id: JobId, outcome: JobOutcome) -> bool {
    match outcome {
        JobOutcome::Failed => screen
            .job
            .fail(job_id, failure_message(screen.tool).to_string()),
        outcome => {
            if !screen.job.complete(job_id) {
                return false;
            }
            match outcome {
                JobOutcome::Image(data_url) => screen.artifact = Some(data_url),
                JobOutcome::Tags(batch) => screen.tag_results.extend(batch),
                JobOutcome::Simulated | JobOutcome::Failed => {}
            }
            true
        }
    }
}

fn download(state: &mut AppState) -> Option<Effect> {
    let screen = state.screen_mut()?;
    if screen.job.status() != JobStatus::Completed {
        return None;
    }
    match screen.tool {
        ToolId::ImageEditor | ToolId::ImageEnhancer => {
            let file_stem = if screen.tool == ToolId::ImageEditor {
                "gemini-edit"
            } else {
                "enhanced-image"
            };
            Some(Effect::SaveImage {
                screen_id: screen.id,
                data_url: screen.artifact.clone()?,
                file_stem,
            })
        }
        ToolId::TagGenerator => None,
        _ => {
            // Video results are never produced; the download only acknowledges.
            screen.notice = Some(SIMULATED_DOWNLOAD_NOTICE.to_string());
            state.mark_dirty();
            None
        }
    }
}

fn unsupported_file_notice(path: &Path, kind: MediaKind) -> String {
    format!(
        "Unsupported file {}: expected {}",
        path.display(),
        kind.accept()
    )
}

pub(crate) fn failure_message(tool: ToolId) -> &'static str {
    match tool {
        ToolId::ImageEditor => {
            "Failed to edit image. Please ensure your API key supports Gemini 2.5 Flash Image."
        }
        ToolId::ImageEnhancer => "Failed to enhance image. Ensure your API key is valid.",
        ToolId::TagGenerator => "Error generating tags. Please check your network or API limit.",
        _ => "Processing failed.",
    }
}
