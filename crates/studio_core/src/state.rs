use crate::job::JobState;
use crate::view_model::{self, AppViewModel};
use crate::{InputForm, ToolCategory, ToolId, ToolSettings};

pub type JobId = u64;
pub type ScreenId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Tool(ToolId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagResult {
    pub tags: Vec<String>,
    pub trending_score: u8,
    pub search_volume: String,
}

/// How the engine finished a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Image returned by the service, as a data URL.
    Image(String),
    /// One batch of tag suggestions.
    Tags(Vec<TagResult>),
    /// The progress simulation ran to 100.
    Simulated,
    /// The service call failed; details are logged by the caller.
    Failed,
}

/// State owned by a single visit to a tool screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolScreen {
    pub(crate) id: ScreenId,
    pub(crate) tool: ToolId,
    pub(crate) input: InputForm,
    pub(crate) job: JobState,
    pub(crate) settings: Option<ToolSettings>,
    pub(crate) artifact: Option<String>,
    pub(crate) tag_results: Vec<TagResult>,
    pub(crate) notice: Option<String>,
}

impl ToolScreen {
    fn new(id: ScreenId, tool: ToolId) -> Self {
        Self {
            id,
            tool,
            input: InputForm::default(),
            job: JobState::default(),
            settings: ToolSettings::defaults_for(tool),
            artifact: None,
            tag_results: Vec::new(),
            notice: None,
        }
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn tool(&self) -> ToolId {
        self.tool
    }

    pub fn input(&self) -> &InputForm {
        &self.input
    }

    pub fn job(&self) -> &JobState {
        &self.job
    }

    pub fn settings(&self) -> Option<&ToolSettings> {
        self.settings.as_ref()
    }

    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    pub fn tag_results(&self) -> &[TagResult] {
        &self.tag_results
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Video tools only restart through `reset`; the others may resubmit.
    pub(crate) fn can_restart_from_completed(&self) -> bool {
        self.tool.category() != ToolCategory::Video
    }

    /// Clears input and results. Settings survive. Returns the job in flight.
    pub(crate) fn reset(&mut self) -> Option<JobId> {
        let in_flight = self.job.reset();
        self.input = InputForm::default();
        self.artifact = None;
        self.tag_results.clear();
        self.notice = None;
        in_flight
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    route: Route,
    screen: Option<ToolScreen>,
    last_screen_id: ScreenId,
    last_job_id: JobId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self.route, self.screen.as_ref())
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn screen(&self) -> Option<&ToolScreen> {
        self.screen.as_ref()
    }

    pub(crate) fn screen_mut(&mut self) -> Option<&mut ToolScreen> {
        self.screen.as_mut()
    }

    /// Screen with the given id, if it is still the one on display.
    pub(crate) fn live_screen_mut(&mut self, screen_id: ScreenId) -> Option<&mut ToolScreen> {
        self.screen.as_mut().filter(|screen| screen.id == screen_id)
    }

    /// Replaces the current screen. Returns the job that was in flight on the
    /// screen being torn down, if any.
    pub(crate) fn navigate(&mut self, route: Route) -> Option<JobId> {
        let in_flight = self
            .screen
            .take()
            .and_then(|mut screen| screen.job.reset());
        self.route = route;
        if let Route::Tool(tool) = route {
            self.last_screen_id += 1;
            self.screen = Some(ToolScreen::new(self.last_screen_id, tool));
        }
        self.dirty = true;
        in_flight
    }

    pub(crate) fn allocate_job_id(&mut self) -> JobId {
        self.last_job_id += 1;
        self.last_job_id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
