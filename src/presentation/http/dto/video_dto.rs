use serde::{Deserialize, Serialize};

use crate::domain::entities::Video;

#[derive(Debug, Deserialize)]
pub struct VideoQueryDto {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct VideoListResponseDto {
    pub videos: Vec<Video>,
}
