use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponseDto {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PingResponseDto {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}
