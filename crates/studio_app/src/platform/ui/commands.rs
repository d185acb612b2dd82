//! Line commands typed at the prompt, parsed with clap in multicall mode:
//! the first word of a line is the subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use studio_core::{
    AudioBitrate, AudioCleanup, AudioFormat, DenoiseStrength, Msg, Route, SettingChange,
    TargetResolution, ToolId, UpscaleModel, TOOLS,
};

#[derive(Debug, Parser)]
#[command(multicall = true, color = clap::ColorChoice::Never)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the tools
    #[command(visible_alias = "ls")]
    Tools,
    /// Back to the dashboard
    Home,
    /// Open a tool by slug or sidebar number
    Open {
        #[arg(value_parser = parse_tool)]
        tool: ToolId,
    },
    /// Choose an image or video file
    File {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<String>,
    },
    /// Set the video URL (downloaders); no text clears it
    Url {
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Set the instruction or keyword; no text clears it
    #[command(visible_alias = "keyword")]
    Prompt {
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Change an advanced video option
    Set {
        #[command(subcommand)]
        option: SetOption,
    },
    /// Run the tool
    #[command(visible_alias = "run")]
    Start,
    /// Clear the screen and start over
    Reset,
    /// Save the current result
    Download,
    /// Copy the tags of a result card
    Copy {
        /// Card number, starting at 1
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        card: u64,
    },
    /// Clear the current error and notice
    Dismiss,
    /// Exit
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SetOption {
    /// Denoise strength
    Strength {
        #[arg(value_enum)]
        value: Strength,
    },
    /// Audio cleaning
    Audio {
        #[arg(value_enum)]
        value: Audio,
    },
    /// Target resolution
    Resolution {
        #[arg(value_enum)]
        value: Resolution,
    },
    /// Upscaling model
    Model {
        #[arg(value_enum)]
        value: Model,
    },
    /// Color correction
    Color {
        #[arg(value_enum)]
        value: Toggle,
    },
    /// Frame interpolation to 60fps
    Interpolation {
        #[arg(value_enum)]
        value: Toggle,
    },
    /// Audio bitrate in kbps
    Bitrate {
        #[arg(value_enum)]
        value: Bitrate,
    },
    /// Audio container
    Format {
        #[arg(value_enum)]
        value: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strength {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Audio {
    Off,
    Hiss,
    Voice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resolution {
    #[value(name = "1080p")]
    Fhd,
    #[value(name = "4k")]
    Uhd4k,
    #[value(name = "8k")]
    Uhd8k,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Model {
    Esrgan,
    Gemini,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Bitrate {
    #[value(name = "128", alias = "128kbps")]
    Kbps128,
    #[value(name = "192", alias = "192kbps")]
    Kbps192,
    #[value(name = "320", alias = "320kbps")]
    Kbps320,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Mp3,
    Wav,
    Aac,
}

impl SetOption {
    pub fn change(self) -> SettingChange {
        match self {
            SetOption::Strength { value } => SettingChange::DenoiseStrength(match value {
                Strength::Low => DenoiseStrength::Low,
                Strength::Medium => DenoiseStrength::Medium,
                Strength::High => DenoiseStrength::High,
            }),
            SetOption::Audio { value } => SettingChange::AudioCleanup(match value {
                Audio::Off => AudioCleanup::Off,
                Audio::Hiss => AudioCleanup::RemoveHissHum,
                Audio::Voice => AudioCleanup::VoiceIsolation,
            }),
            SetOption::Resolution { value } => SettingChange::TargetResolution(match value {
                Resolution::Fhd => TargetResolution::Fhd1080,
                Resolution::Uhd4k => TargetResolution::Uhd4k,
                Resolution::Uhd8k => TargetResolution::Uhd8k,
            }),
            SetOption::Model { value } => SettingChange::UpscaleModel(match value {
                Model::Esrgan => UpscaleModel::RealEsrgan,
                Model::Gemini => UpscaleModel::GeminiVideoEnhance,
                Model::Fast => UpscaleModel::FastRestore,
            }),
            SetOption::Color { value } => SettingChange::ColorCorrection(value == Toggle::On),
            SetOption::Interpolation { value } => {
                SettingChange::FrameInterpolation(value == Toggle::On)
            }
            SetOption::Bitrate { value } => SettingChange::AudioBitrate(match value {
                Bitrate::Kbps128 => AudioBitrate::Kbps128,
                Bitrate::Kbps192 => AudioBitrate::Kbps192,
                Bitrate::Kbps320 => AudioBitrate::Kbps320,
            }),
            SetOption::Format { value } => SettingChange::AudioFormat(match value {
                Format::Mp3 => AudioFormat::Mp3,
                Format::Wav => AudioFormat::Wav,
                Format::Aac => AudioFormat::Aac,
            }),
        }
    }
}

impl Command {
    /// Messages for the core. Local commands (`tools`, `quit`) produce none.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Home => vec![Msg::Navigate(Route::Dashboard)],
            Command::Open { tool } => vec![Msg::Navigate(Route::Tool(tool))],
            Command::File { path } => vec![Msg::FileChosen(PathBuf::from(path.join(" ")))],
            Command::Url { text } => vec![Msg::UrlChanged(text.join(" "))],
            Command::Prompt { text } => vec![Msg::PromptChanged(text.join(" "))],
            Command::Set { option } => vec![Msg::SettingChanged(option.change())],
            Command::Start => vec![Msg::StartClicked],
            Command::Reset => vec![Msg::ResetClicked],
            Command::Download => vec![Msg::DownloadClicked],
            Command::Copy { card } => vec![Msg::CopyTagsClicked {
                index: usize::try_from(card - 1).unwrap_or(usize::MAX),
            }],
            Command::Dismiss => vec![Msg::DismissError, Msg::DismissNotice],
            Command::Tools | Command::Quit => Vec::new(),
        }
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`. `help` comes back as
/// an error of kind `DisplayHelp` whose text is the help page.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    CommandLine::try_parse_from(words).map(|line| Some(line.command))
}

/// Accepts a slug or the 1-based position in the sidebar.
fn parse_tool(arg: &str) -> Result<ToolId, String> {
    if let Ok(number) = arg.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| TOOLS.get(index))
            .map(|descriptor| descriptor.id)
            .ok_or_else(|| format!("the sidebar has tools 1 to {}", TOOLS.len()));
    }
    ToolId::from_slug(&arg.replace('-', "_")).ok_or_else(|| format!("no tool called `{arg}`"))
}
