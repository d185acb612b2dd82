//! Static tool registry: identifiers, display metadata and input requirements.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolId {
    ImageEditor,
    ImageEnhancer,
    TagGenerator,
    VideoQualityIncrease,
    VideoNoiseClear,
    Mp4ToMp3,
    YoutubeDownloader,
    InstagramDownloader,
}

impl ToolId {
    pub const fn slug(self) -> &'static str {
        match self {
            ToolId::ImageEditor => "image_editor",
            ToolId::ImageEnhancer => "image_enhancer",
            ToolId::TagGenerator => "tag_generator",
            ToolId::VideoQualityIncrease => "video_quality_increase",
            ToolId::VideoNoiseClear => "video_noise_clear",
            ToolId::Mp4ToMp3 => "mp4_to_mp3",
            ToolId::YoutubeDownloader => "youtube_downloader",
            ToolId::InstagramDownloader => "instagram_downloader",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        TOOLS
            .iter()
            .map(|tool| tool.id)
            .find(|id| id.slug().eq_ignore_ascii_case(slug.trim()))
    }

    pub fn descriptor(self) -> &'static ToolDescriptor {
        descriptor(self)
    }

    pub fn category(self) -> ToolCategory {
        self.descriptor().category
    }

    pub fn is_downloader(self) -> bool {
        matches!(
            self,
            ToolId::YoutubeDownloader | ToolId::InstagramDownloader
        )
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Whether a tool talks to the generative service or runs the local simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Image,
    Text,
    Video,
}

/// What a screen needs before `start` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRequirement {
    /// Loaded image preview plus a non-empty edit instruction.
    ImageWithInstruction,
    /// Loaded image preview.
    Image,
    /// Non-blank keyword.
    Keyword,
    /// Any chosen video file; only metadata is read.
    VideoFile,
    /// An http(s) URL.
    SourceUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub category: ToolCategory,
    pub requirement: InputRequirement,
}

pub static TOOLS: [ToolDescriptor; 8] = [
    ToolDescriptor {
        id: ToolId::ImageEditor,
        title: "AI Image Editor",
        description: "Edit images using Gemini 2.5 Flash Image. Add filters, remove objects, or reimagine scenes.",
        icon: "🎨",
        color: "from-purple-500 to-indigo-500",
        category: ToolCategory::Image,
        requirement: InputRequirement::ImageWithInstruction,
    },
    ToolDescriptor {
        id: ToolId::ImageEnhancer,
        title: "AI Image Enhancer",
        description: "Upscale low-quality images to 4K resolution and remove noise instantly.",
        icon: "🔍",
        color: "from-blue-500 to-cyan-500",
        category: ToolCategory::Image,
        requirement: InputRequirement::Image,
    },
    ToolDescriptor {
        id: ToolId::TagGenerator,
        title: "SEO Tag Generator",
        description: "Generate high-value, trending tags for YouTube and Instagram using real-time analysis.",
        icon: "🏷️",
        color: "from-pink-500 to-rose-500",
        category: ToolCategory::Text,
        requirement: InputRequirement::Keyword,
    },
    ToolDescriptor {
        id: ToolId::VideoQualityIncrease,
        title: "Video Upscaler",
        description: "Enhance video resolution and clarity using advanced restoration algorithms.",
        icon: "✨",
        color: "from-emerald-500 to-teal-500",
        category: ToolCategory::Video,
        requirement: InputRequirement::VideoFile,
    },
    ToolDescriptor {
        id: ToolId::VideoNoiseClear,
        title: "Pro Noise Remover",
        description: "Remove background noise and grain from professional footage.",
        icon: "🔇",
        color: "from-blue-600 to-indigo-600",
        category: ToolCategory::Video,
        requirement: InputRequirement::VideoFile,
    },
    ToolDescriptor {
        id: ToolId::Mp4ToMp3,
        title: "MP4 to MP3",
        description: "Extract high-fidelity audio tracks from your video files instantly.",
        icon: "🎵",
        color: "from-orange-500 to-amber-500",
        category: ToolCategory::Video,
        requirement: InputRequirement::VideoFile,
    },
    ToolDescriptor {
        id: ToolId::YoutubeDownloader,
        title: "YouTube Downloader",
        description: "Download videos from YouTube in various formats.",
        icon: "📺",
        color: "from-red-500 to-red-600",
        category: ToolCategory::Video,
        requirement: InputRequirement::SourceUrl,
    },
    ToolDescriptor {
        id: ToolId::InstagramDownloader,
        title: "Insta Saver",
        description: "Save Reels and Videos from Instagram directly to your device.",
        icon: "📸",
        color: "from-fuchsia-500 to-pink-600",
        category: ToolCategory::Video,
        requirement: InputRequirement::SourceUrl,
    },
];

/// Looks up the descriptor for a tool. Every `ToolId` has exactly one entry.
pub fn descriptor(id: ToolId) -> &'static ToolDescriptor {
    match TOOLS.iter().find(|tool| tool.id == id) {
        Some(tool) => tool,
        None => unreachable!("tool {id:?} missing from registry"),
    }
}

/// All tools in dashboard order.
pub fn all() -> &'static [ToolDescriptor] {
    &TOOLS
}
