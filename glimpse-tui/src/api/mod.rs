mod client;
mod error;
pub mod endpoints;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use glimpse_types::{ImageRecord, LikeRecord, Post};

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};

/// Binary image fetched from `/images/{imageId}`
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// Re-encode the payload as an inline `data:` URI
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// The REST surface the views talk to.
///
/// `ApiClient` is the real implementation; tests drive the views through an
/// in-memory backend instead.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Base URL that endpoint paths are appended to
    fn base_url(&self) -> &str;

    /// Absolute URL of an endpoint path, used in user-facing error text
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), path)
    }

    // Images
    async fn get_all_images(&self) -> ApiResult<Vec<ImageRecord>>;
    async fn delete_image(&self, image_id: &str) -> ApiResult<()>;
    async fn get_image(&self, image_id: &str) -> ApiResult<ImagePayload>;

    // Derived counts
    async fn like_count(&self, post_id: &str) -> ApiResult<i64>;
    async fn comment_count(&self, post_id: &str) -> ApiResult<i64>;
    async fn follower_count(&self, username: &str) -> ApiResult<i64>;
    async fn following_count(&self, username: &str) -> ApiResult<i64>;

    // Likes
    async fn like_post(&self, post_id: &str, user_id: &str) -> ApiResult<()>;
    async fn unlike_post(&self, post_id: &str, user_id: &str) -> ApiResult<()>;
    async fn user_likes(&self, user_id: &str) -> ApiResult<Vec<LikeRecord>>;

    // Posts
    async fn posts_by_username(&self, username: &str) -> ApiResult<Vec<Post>>;
    async fn create_post(&self, content: &str, username: &str) -> ApiResult<()>;
    async fn update_post(&self, post_id: &str, content: &str) -> ApiResult<()>;
    async fn delete_post(&self, post_id: &str) -> ApiResult<()>;
}
