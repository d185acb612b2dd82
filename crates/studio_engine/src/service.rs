use std::time::Duration;

use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::data_url::ImageData;
use crate::{ServiceError, TagResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub const ENHANCE_INSTRUCTION: &str = "Enhance this image: upscale it to 4K quality, remove noise \
and compression artifacts, and sharpen fine details while preserving the original composition \
and colors.";

/// The generative-media operations the tools rely on.
#[async_trait::async_trait]
pub trait MediaService: Send + Sync {
    async fn edit_image(
        &self,
        source: &ImageData,
        instruction: &str,
    ) -> Result<ImageData, ServiceError>;

    async fn enhance_image(&self, source: &ImageData) -> Result<ImageData, ServiceError>;

    async fn generate_tags(&self, keyword: &str) -> Result<Vec<TagResult>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub image_model: String,
    pub text_model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            image_model: "gemini-2.5-flash-image".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// `MediaService` backed by the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, model: &str) -> Result<reqwest::Url, ServiceError> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        );
        reqwest::Url::parse(&raw).map_err(|err| ServiceError::InvalidEndpoint(err.to_string()))
    }

    async fn generate(&self, model: &str, body: Value) -> Result<GenerateResponse, ServiceError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ServiceError::MissingApiKey)?;
        let api_key = HeaderValue::from_str(api_key.trim())
            .map_err(|_| ServiceError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint(model)?)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::HttpStatus {
                status: status.as_u16(),
                message: summarize(&message),
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ServiceError::Timeout
                } else {
                    ServiceError::MalformedResponse(err.to_string())
                }
            })
    }

    async fn transform_image(
        &self,
        source: &ImageData,
        instruction: &str,
    ) -> Result<ImageData, ServiceError> {
        source
            .decode()
            .map_err(|err| ServiceError::InvalidImage(err.to_string()))?;
        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": source.mime_type, "data": source.data } },
                    { "text": instruction },
                ]
            }]
        });
        let response = self.generate(&self.settings.image_model, body).await?;
        response.first_image().ok_or(ServiceError::NoImage)
    }
}

#[async_trait::async_trait]
impl MediaService for GeminiService {
    async fn edit_image(
        &self,
        source: &ImageData,
        instruction: &str,
    ) -> Result<ImageData, ServiceError> {
        self.transform_image(source, instruction).await
    }

    async fn enhance_image(&self, source: &ImageData) -> Result<ImageData, ServiceError> {
        self.transform_image(source, ENHANCE_INSTRUCTION).await
    }

    async fn generate_tags(&self, keyword: &str) -> Result<Vec<TagResult>, ServiceError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": tag_prompt(keyword) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": tag_schema(),
            }
        });
        let response = self.generate(&self.settings.text_model, body).await?;
        let text = response
            .first_text()
            .ok_or_else(|| ServiceError::MalformedResponse("no text part".to_string()))?;
        parse_tag_results(&text)
    }
}

fn tag_prompt(keyword: &str) -> String {
    format!(
        "Generate trending, high-value hashtags for YouTube and Instagram content about \
         \"{keyword}\". Return 3 groups of 10 tags each. For every group give an estimated \
         trending score from 0 to 100 and a search volume label such as \"10K\" or \"1.2M\"."
    )
}

fn tag_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                "trendingScore": { "type": "INTEGER" },
                "searchVolume": { "type": "STRING" },
            },
            "required": ["tags", "trendingScore", "searchVolume"],
        }
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTagResult {
    tags: Vec<String>,
    trending_score: f64,
    search_volume: String,
}

/// Parses the model's JSON array. Scores are clamped into 0..=100.
pub fn parse_tag_results(text: &str) -> Result<Vec<TagResult>, ServiceError> {
    let raw: Vec<RawTagResult> = serde_json::from_str(text.trim())
        .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?;
    Ok(raw
        .into_iter()
        .map(|item| TagResult {
            tags: item.tags,
            trending_score: item.trending_score.round().clamp(0.0, 100.0) as u8,
            search_volume: item.search_volume,
        })
        .collect())
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    fn first_image(&self) -> Option<ImageData> {
        self.parts()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| ImageData {
                mime_type: inline.mime_type.clone(),
                data: inline.data.clone(),
            })
    }

    fn first_text(&self) -> Option<String> {
        let text: String = self
            .parts()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Timeout;
    }
    ServiceError::Network(err.to_string())
}

fn summarize(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.len() <= MAX {
        return trimmed.to_string();
    }
    let mut end = MAX;
    while end > 0 && !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_scores_are_rounded_and_clamped() {
        let parsed = parse_tag_results(
            r#"[{"tags":["a"],"trendingScore":80.4,"searchVolume":"10K"},
                {"tags":[],"trendingScore":140,"searchVolume":"1M"}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0].trending_score, 80);
        assert_eq!(parsed[1].trending_score, 100);
    }

    #[test]
    fn non_array_tag_payload_is_malformed() {
        let err = parse_tag_results(r#"{"tags":["a"]}"#).unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[test]
    fn text_parts_are_concatenated() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"tags\":"},{"text":"[]}]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some(r#"[{"tags":[]}]"#));
        assert!(response.first_image().is_none());
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "é".repeat(300);
        let summary = summarize(&body);
        assert!(summary.ends_with("..."));
        assert!(summary.len() <= 203);
    }
}
