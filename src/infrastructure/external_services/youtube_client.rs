use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::video_provider::{VideoProvider, VideoProviderError};
use crate::domain::entities::Video;

pub const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

/// YouTube Data API v3 video search.
pub struct YoutubeClient {
    client: Client,
    api_key: Option<String>,
    search_url: String,
}

impl YoutubeClient {
    pub fn new(api_key: Option<String>) -> Result<Self, ReqwestError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            api_key,
            search_url: YOUTUBE_SEARCH_URL.to_string(),
        })
    }
}

fn into_videos(response: SearchResponse) -> Vec<Video> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            let thumbnail = item
                .snippet
                .thumbnails
                .medium
                .or(item.snippet.thumbnails.default)
                .map(|t| t.url)
                .unwrap_or_default();

            Some(Video {
                url: format!("https://www.youtube.com/watch?v={}", video_id),
                id: video_id,
                title: item.snippet.title,
                description: item.snippet.description,
                thumbnail,
            })
        })
        .collect()
}

#[async_trait]
impl VideoProvider for YoutubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>, VideoProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(VideoProviderError::NotConfigured);
        };

        let max_results = max_results.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| VideoProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VideoProviderError::ApiError(format!(
                "YouTube search returned {}",
                status
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| VideoProviderError::ApiError(e.to_string()))?;

        Ok(into_videos(parsed))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_search_items_to_videos() {
        let raw = r#"{
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "dQw4"},
                 "snippet": {"title": "Kinematics in 10 minutes",
                             "description": "Motion basics",
                             "thumbnails": {"default": {"url": "https://i.ytimg.com/vi/dQw4/default.jpg"},
                                            "medium": {"url": "https://i.ytimg.com/vi/dQw4/mqdefault.jpg"}}}},
                {"id": {"kind": "youtube#channel", "channelId": "UC123"},
                 "snippet": {"title": "A channel"}}
            ]
        }"#;

        let videos = into_videos(serde_json::from_str(raw).unwrap());

        assert_eq!(
            videos,
            vec![Video {
                id: "dQw4".to_string(),
                title: "Kinematics in 10 minutes".to_string(),
                description: "Motion basics".to_string(),
                thumbnail: "https://i.ytimg.com/vi/dQw4/mqdefault.jpg".to_string(),
                url: "https://www.youtube.com/watch?v=dQw4".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_search_without_key_is_not_configured() {
        let client = YoutubeClient::new(None).unwrap();
        assert!(!client.is_configured());
        assert!(matches!(
            client.search("optics", 6).await,
            Err(VideoProviderError::NotConfigured)
        ));
    }
}
