//! Advanced options shown by the video tools. They only feed the simulation
//! log line; no media is transformed.

use crate::ToolId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DenoiseStrength {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioCleanup {
    Off,
    #[default]
    RemoveHissHum,
    VoiceIsolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetResolution {
    Fhd1080,
    #[default]
    Uhd4k,
    Uhd8k,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpscaleModel {
    RealEsrgan,
    #[default]
    GeminiVideoEnhance,
    FastRestore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioBitrate {
    Kbps128,
    Kbps192,
    #[default]
    Kbps320,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Aac,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSettings {
    NoiseClear {
        strength: DenoiseStrength,
        audio: AudioCleanup,
    },
    Upscale {
        resolution: TargetResolution,
        model: UpscaleModel,
        color_correction: bool,
        frame_interpolation: bool,
    },
    AudioExtract {
        bitrate: AudioBitrate,
        format: AudioFormat,
    },
}

/// A single edit to the current screen's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    DenoiseStrength(DenoiseStrength),
    AudioCleanup(AudioCleanup),
    TargetResolution(TargetResolution),
    UpscaleModel(UpscaleModel),
    ColorCorrection(bool),
    FrameInterpolation(bool),
    AudioBitrate(AudioBitrate),
    AudioFormat(AudioFormat),
}

impl ToolSettings {
    /// Default options for tools that expose any; `None` for the rest.
    pub fn defaults_for(tool: ToolId) -> Option<Self> {
        match tool {
            ToolId::VideoNoiseClear => Some(ToolSettings::NoiseClear {
                strength: DenoiseStrength::default(),
                audio: AudioCleanup::default(),
            }),
            ToolId::VideoQualityIncrease => Some(ToolSettings::Upscale {
                resolution: TargetResolution::default(),
                model: UpscaleModel::default(),
                color_correction: true,
                frame_interpolation: false,
            }),
            ToolId::Mp4ToMp3 => Some(ToolSettings::AudioExtract {
                bitrate: AudioBitrate::default(),
                format: AudioFormat::default(),
            }),
            _ => None,
        }
    }

    /// Applies a change; returns `false` when it does not belong to this tool.
    pub fn apply(&mut self, change: SettingChange) -> bool {
        match (self, change) {
            (ToolSettings::NoiseClear { strength, .. }, SettingChange::DenoiseStrength(v)) => {
                *strength = v;
            }
            (ToolSettings::NoiseClear { audio, .. }, SettingChange::AudioCleanup(v)) => {
                *audio = v;
            }
            (ToolSettings::Upscale { resolution, .. }, SettingChange::TargetResolution(v)) => {
                *resolution = v;
            }
            (ToolSettings::Upscale { model, .. }, SettingChange::UpscaleModel(v)) => {
                *model = v;
            }
            (
                ToolSettings::Upscale {
                    color_correction, ..
                },
                SettingChange::ColorCorrection(v),
            ) => {
                *color_correction = v;
            }
            (
                ToolSettings::Upscale {
                    frame_interpolation,
                    ..
                },
                SettingChange::FrameInterpolation(v),
            ) => {
                *frame_interpolation = v;
            }
            (ToolSettings::AudioExtract { bitrate, .. }, SettingChange::AudioBitrate(v)) => {
                *bitrate = v;
            }
            (ToolSettings::AudioExtract { format, .. }, SettingChange::AudioFormat(v)) => {
                *format = v;
            }
            _ => return false,
        }
        true
    }

    /// Human-readable `label: value` pairs in display order.
    pub fn describe(&self) -> Vec<(&'static str, &'static str)> {
        match *self {
            ToolSettings::NoiseClear { strength, audio } => vec![
                (
                    "Denoise Strength",
                    match strength {
                        DenoiseStrength::Low => "Low (Preserve Details)",
                        DenoiseStrength::Medium => "Medium (Balanced)",
                        DenoiseStrength::High => "High (Aggressive)",
                    },
                ),
                (
                    "Audio Cleaning",
                    match audio {
                        AudioCleanup::Off => "Off",
                        AudioCleanup::RemoveHissHum => "Remove Hiss/Hum",
                        AudioCleanup::VoiceIsolation => "Voice Isolation (AI)",
                    },
                ),
            ],
            ToolSettings::Upscale {
                resolution,
                model,
                color_correction,
                frame_interpolation,
            } => vec![
                (
                    "Target Resolution",
                    match resolution {
                        TargetResolution::Fhd1080 => "1080p FHD",
                        TargetResolution::Uhd4k => "4K UHD (Upscale)",
                        TargetResolution::Uhd8k => "8K (Experimental)",
                    },
                ),
                (
                    "AI Model",
                    match model {
                        UpscaleModel::RealEsrgan => "Real-ESRGAN",
                        UpscaleModel::GeminiVideoEnhance => "Gemini Video Enhance (Pro)",
                        UpscaleModel::FastRestore => "Fast Restore",
                    },
                ),
                ("Color Correction", on_off(color_correction)),
                ("Frame Interpolation (60fps)", on_off(frame_interpolation)),
            ],
            ToolSettings::AudioExtract { bitrate, format } => vec![
                (
                    "Audio Bitrate",
                    match bitrate {
                        AudioBitrate::Kbps128 => "128 kbps",
                        AudioBitrate::Kbps192 => "192 kbps",
                        AudioBitrate::Kbps320 => "320 kbps (Studio)",
                    },
                ),
                (
                    "Format",
                    match format {
                        AudioFormat::Mp3 => "MP3",
                        AudioFormat::Wav => "WAV (Lossless)",
                        AudioFormat::Aac => "AAC",
                    },
                ),
            ],
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "On"
    } else {
        "Off"
    }
}
