use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    RecommendVideosUseCase, recommend_videos::RecommendVideosRequest,
};
use crate::presentation::http::dto::{VideoListResponseDto, VideoQueryDto};
use crate::presentation::http::errors::ApiError;

pub struct VideoHandler {
    recommend_videos_use_case: Arc<RecommendVideosUseCase>,
}

impl VideoHandler {
    pub fn new(recommend_videos_use_case: Arc<RecommendVideosUseCase>) -> Self {
        Self {
            recommend_videos_use_case,
        }
    }

    pub async fn recommendations(
        State(handler): State<Arc<VideoHandler>>,
        query: Result<Query<VideoQueryDto>, QueryRejection>,
    ) -> Result<impl IntoResponse, ApiError> {
        let Query(query) = query?;
        let response = handler
            .recommend_videos_use_case
            .execute(RecommendVideosRequest { topic: query.topic })
            .await?;

        Ok(Json(VideoListResponseDto {
            videos: response.videos,
        }))
    }
}
