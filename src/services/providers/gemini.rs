//! Google Gemini vision provider
//!
//! Sends the analysis prompt and the photo as inline base64 data to
//! `generateContent`, then runs the first text part of the first candidate
//! through the validation boundary.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::FacialAnalysis,
    services::providers::{validation, ImagePayload, VisionProvider},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

const ANALYSIS_PROMPT: &str = r#"As a beauty advisor, analyze this facial image and respond with ONLY a JSON object in this exact format (no markdown, no extra text):
{
  "skinType": "normal/combination/oily/dry",
  "concerns": ["concern1", "concern2"],
  "features": {
    "eyes": "description",
    "lips": "description",
    "cheeks": "description",
    "jawline": "description",
    "forehead": "description",
    "noseShape": "description",
    "skinTexture": "description",
    "symmetry": "description"
  },
  "recommendations": [
    {
      "category": "moisturizer/serum/cleanser",
      "productType": "specific type",
      "reason": "explanation",
      "priority": 1,
      "ingredients": ["ingredient1", "ingredient2"]
    }
  ]
}"#;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
    }
}

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request<'a>(image: &'a ImagePayload) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: ANALYSIS_PROMPT,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type(),
                            data: &image.data,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig { temperature: 0.2 },
        }
    }
}

#[async_trait::async_trait]
impl VisionProvider for GeminiProvider {
    async fn analyze(&self, image: &ImagePayload) -> AppResult<FacialAnalysis> {
        tracing::debug!(model = %self.model, mime_type = image.mime_type(), "Sending request to Gemini");

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::build_request(image))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                "Gemini request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .into_text()
            .ok_or_else(|| AppError::ExternalApi("Gemini returned an empty response".to_string()))?;

        let analysis = validation::parse_analysis(&text).map_err(|e| {
            tracing::warn!(error = %e, "Gemini response failed validation");
            e
        })?;

        tracing::info!(
            skin_type = %analysis.skin_type,
            concerns = analysis.concerns.len(),
            recommendations = analysis.recommendations.len(),
            "Received facial analysis from Gemini"
        );

        Ok(analysis)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
