use crate::job::JobStatus;
use crate::{Route, ScreenId, TagResult, ToolCategory, ToolId, ToolScreen};

pub const MAX_UPLOAD_HINT: &str = "Supports MP4, MOV, MKV (Max 2GB)";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    /// Header title: "Dashboard" or the active tool's title.
    pub title: String,
    pub nav: Vec<NavEntry>,
    pub screen: Option<ScreenView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub tool: ToolId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub screen_id: ScreenId,
    pub tool: ToolId,
    pub title: &'static str,
    pub description: &'static str,
    pub status: JobStatus,
    /// Floored percentage; only the simulated tools report progress.
    pub progress_percent: Option<u8>,
    pub input: InputView,
    pub settings: Vec<(&'static str, &'static str)>,
    pub can_start: bool,
    pub start_label: String,
    pub result: ResultView,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub file: Option<FileSummary>,
    pub loading_file: bool,
    /// Shown when no file has been chosen yet.
    pub file_hint: Option<&'static str>,
    pub url: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub size_label: String,
    pub has_preview: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Empty { placeholder: &'static str },
    Pending { label: &'static str },
    Image { data_url: String, download_label: &'static str },
    Tags(Vec<TagCardView>),
    Acknowledged {
        headline: &'static str,
        detail: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCardView {
    pub index: usize,
    pub tags: Vec<String>,
    pub hashtags: Vec<String>,
    pub trending_score: u8,
    pub search_volume: String,
}

pub(crate) fn build(route: Route, screen: Option<&ToolScreen>) -> AppViewModel {
    let active_tool = match route {
        Route::Tool(tool) => Some(tool),
        Route::Dashboard => None,
    };
    let nav = crate::tool::all()
        .iter()
        .map(|tool| NavEntry {
            tool: tool.id,
            title: tool.title,
            description: tool.description,
            icon: tool.icon,
            active: Some(tool.id) == active_tool,
        })
        .collect();
    let title = match active_tool {
        Some(tool) => tool.descriptor().title.to_string(),
        None => "Dashboard".to_string(),
    };

    AppViewModel {
        route,
        title,
        nav,
        screen: screen.map(screen_view),
    }
}

fn screen_view(screen: &ToolScreen) -> ScreenView {
    let descriptor = screen.tool.descriptor();
    let status = screen.job.status();
    let is_video = descriptor.category == ToolCategory::Video;
    let processing = status == JobStatus::Processing;
    let can_start = match status {
        JobStatus::Processing => false,
        JobStatus::Completed if !screen.can_restart_from_completed() => false,
        _ => screen.input.validate(descriptor.requirement).is_some(),
    };

    ScreenView {
        screen_id: screen.id,
        tool: screen.tool,
        title: descriptor.title,
        description: descriptor.description,
        status,
        progress_percent: (is_video && status != JobStatus::Idle)
            .then(|| screen.job.progress().floor() as u8),
        input: input_view(screen),
        settings: screen
            .settings
            .map(|settings| settings.describe())
            .unwrap_or_default(),
        can_start,
        start_label: start_label(screen.tool, processing),
        result: result_view(screen),
        error: screen.job.error().map(str::to_string),
        notice: screen.notice.clone(),
    }
}

fn input_view(screen: &ToolScreen) -> InputView {
    let requirement = screen.tool.descriptor().requirement;
    let accepts_file = requirement.file_load_mode().is_some();
    let file = screen.input.file().map(|file| FileSummary {
        name: file.name.clone(),
        size_label: format_megabytes(file.size_bytes),
        has_preview: file.preview.is_some(),
    });
    let file_hint = match screen.tool {
        _ if !accepts_file || file.is_some() => None,
        ToolId::ImageEditor => Some("Click to upload an image"),
        ToolId::ImageEnhancer => Some("Supports JPG, PNG, WEBP"),
        _ => Some(MAX_UPLOAD_HINT),
    };
    let uses_prompt = matches!(screen.tool, ToolId::ImageEditor | ToolId::TagGenerator);

    InputView {
        file,
        loading_file: screen.input.pending_file().is_some(),
        file_hint,
        url: screen
            .tool
            .is_downloader()
            .then(|| screen.input.url().to_string()),
        prompt: uses_prompt.then(|| screen.input.prompt().to_string()),
    }
}

fn result_view(screen: &ToolScreen) -> ResultView {
    match (screen.tool, screen.job.status()) {
        (ToolId::TagGenerator, status) => {
            if screen.tag_results.is_empty() {
                if status == JobStatus::Processing {
                    ResultView::Pending {
                        label: "Analyzing...",
                    }
                } else {
                    ResultView::Empty {
                        placeholder: "Enter a keyword above to discover trending tags.",
                    }
                }
            } else {
                ResultView::Tags(tag_cards(&screen.tag_results))
            }
        }
        (ToolId::ImageEditor, JobStatus::Processing) => ResultView::Pending {
            label: "Gemini is dreaming...",
        },
        (ToolId::ImageEnhancer, JobStatus::Processing) => ResultView::Pending {
            label: "Upscaling & Denoising...",
        },
        (ToolId::ImageEditor | ToolId::ImageEnhancer, _) => match &screen.artifact {
            Some(data_url) => ResultView::Image {
                data_url: data_url.clone(),
                download_label: if screen.tool == ToolId::ImageEditor {
                    "Download"
                } else {
                    "Download HD"
                },
            },
            None => ResultView::Empty {
                placeholder: if screen.tool == ToolId::ImageEditor {
                    "Result will appear here"
                } else {
                    "Enhanced image will appear here"
                },
            },
        },
        (_, JobStatus::Processing) => ResultView::Pending {
            label: "Processing with AI...",
        },
        (_, JobStatus::Completed) => ResultView::Acknowledged {
            headline: "Processing Complete!",
            detail: "Your enhanced file is ready.",
        },
        (_, JobStatus::Idle) => ResultView::Empty {
            placeholder: if screen.tool.is_downloader() {
                "Paste Video URL"
            } else {
                "Drag & Drop Video Here"
            },
        },
    }
}

fn tag_cards(results: &[TagResult]) -> Vec<TagCardView> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| TagCardView {
            index,
            tags: result.tags.clone(),
            hashtags: result
                .tags
                .iter()
                .map(|tag| format!("#{}", tag.strip_prefix('#').unwrap_or(tag)))
                .collect(),
            trending_score: result.trending_score,
            search_volume: result.search_volume.clone(),
        })
        .collect()
}

fn start_label(tool: ToolId, processing: bool) -> String {
    match tool {
        ToolId::ImageEditor => "Generate Edit".to_string(),
        ToolId::ImageEnhancer if processing => "Enhancing Quality...".to_string(),
        ToolId::ImageEnhancer => "✨ Enhance to 4K".to_string(),
        ToolId::TagGenerator if processing => "Analyzing...".to_string(),
        ToolId::TagGenerator => "Generate Tags".to_string(),
        tool if tool.is_downloader() => "Fetch & Download".to_string(),
        tool => format!("Start {}", tool.descriptor().title.replacen("AI ", "", 1)),
    }
}

fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}
