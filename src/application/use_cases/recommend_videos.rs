use std::sync::Arc;

use reqwest::Url;

use crate::application::ports::VideoProvider;
use crate::domain::entities::Video;

pub const MAX_RECOMMENDATIONS: u32 = 6;

const YOUTUBE_RESULTS_URL: &str = "https://www.youtube.com/results";

#[derive(Debug)]
pub enum RecommendVideosError {
    ValidationError(String),
}

impl std::fmt::Display for RecommendVideosError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendVideosError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for RecommendVideosError {}

#[derive(Debug, Clone)]
pub struct RecommendVideosRequest {
    pub topic: String,
}

#[derive(Debug, Clone)]
pub struct RecommendVideosResponse {
    pub videos: Vec<Video>,
}

pub struct RecommendVideosUseCase {
    video_provider: Arc<dyn VideoProvider>,
}

impl RecommendVideosUseCase {
    pub fn new(video_provider: Arc<dyn VideoProvider>) -> Self {
        Self { video_provider }
    }

    pub async fn execute(
        &self,
        request: RecommendVideosRequest,
    ) -> Result<RecommendVideosResponse, RecommendVideosError> {
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(RecommendVideosError::ValidationError(
                "Topic cannot be empty".to_string(),
            ));
        }

        if !self.video_provider.is_configured() {
            tracing::debug!("No video provider key, returning placeholders for {}", topic);
            return Ok(RecommendVideosResponse {
                videos: placeholder_videos(topic),
            });
        }

        let query = format!("{} tutorial education", topic);
        let videos = match self.video_provider.search(&query, MAX_RECOMMENDATIONS).await {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!("Video search for {:?} failed: {}", topic, e);
                Vec::new()
            }
        };

        Ok(RecommendVideosResponse { videos })
    }
}

/// Stand-in recommendations served when no video provider key is set.
pub fn placeholder_videos(topic: &str) -> Vec<Video> {
    let search_url = results_url(topic);

    [
        ("placeholder-1", "Introduction to", "A beginner-friendly overview of"),
        ("placeholder-2", "Key concepts in", "The core ideas you need to know about"),
        ("placeholder-3", "Worked examples:", "Step-by-step practice problems on"),
    ]
    .into_iter()
    .map(|(id, title, description)| Video {
        id: id.to_string(),
        title: format!("{} {}", title, topic),
        description: format!("{} {}.", description, topic),
        thumbnail: format!("https://via.placeholder.com/320x180?text={}", id),
        url: search_url.clone(),
    })
    .collect()
}

fn results_url(topic: &str) -> String {
    let query = topic.split_whitespace().collect::<Vec<_>>().join(" ");
    match Url::parse_with_params(YOUTUBE_RESULTS_URL, &[("search_query", query.as_str())]) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::warn!("Could not build search link for {:?}: {}", topic, e);
            YOUTUBE_RESULTS_URL.to_string()
        }
    }
}
