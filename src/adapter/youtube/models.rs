use serde::Deserialize;
use youtube3::api::{Video, VideoSnippet, VideoStatus};

use crate::domain::entities::video_metadata::VideoMetadata;

/// Request body for videos.insert (parts: snippet,status)
pub fn video_resource(metadata: &VideoMetadata) -> Video {
    Video {
        snippet: Some(VideoSnippet {
            title: Some(metadata.title.clone()),
            description: Some(metadata.description.clone()),
            tags: Some(metadata.tags.clone()),
            category_id: metadata.category_id.clone(),
            ..Default::default()
        }),
        status: Some(VideoStatus {
            privacy_status: Some(metadata.privacy.as_str().to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// Google API error envelope
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

/// Human readable message for an error response body
pub fn describe_api_error(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => {
            let message = parsed.error.message.unwrap_or_else(|| "unknown error".to_string());
            let reasons: Vec<String> = parsed
                .error
                .errors
                .into_iter()
                .filter_map(|e| e.reason)
                .collect();
            if reasons.is_empty() {
                message
            } else {
                format!("{} ({})", message, reasons.join(", "))
            }
        }
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
