use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Public path of the stored file, e.g. `/uploads/1712345678901-123456789.png`.
    pub url: String,
    /// Filename as supplied by the client.
    pub original_name: String,
}
