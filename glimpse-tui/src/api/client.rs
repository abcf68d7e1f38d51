use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::endpoints;
use super::{ApiError, ApiResult, Backend, ImagePayload};
use glimpse_types::*;

/// HTTP client for the Glimpse backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: None,
        }
    }

    /// Set the credential sent as a bearer token
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    fn add_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.access_token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        ApiError::from_status(status, error_message(status, body))
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn handle_empty(&self, response: reqwest::Response) -> ApiResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path);
        log::debug!(target: "api_calls", "GET {}", url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl Backend for ApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    // Image endpoints

    async fn get_all_images(&self) -> ApiResult<Vec<ImageRecord>> {
        self.get_json(endpoints::ALL_IMAGES).await
    }

    async fn delete_image(&self, image_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&endpoints::image(image_id));
        log::debug!(target: "api_calls", "DELETE {}", url);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_empty(response).await
    }

    async fn get_image(&self, image_id: &str) -> ApiResult<ImagePayload> {
        let url = self.endpoint(&endpoints::image(image_id));
        log::debug!(target: "api_calls", "GET {} (binary)", url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(ImagePayload { content_type, bytes })
    }

    // Count endpoints

    async fn like_count(&self, post_id: &str) -> ApiResult<i64> {
        self.get_json(&endpoints::likes_for_post(post_id)).await
    }

    async fn comment_count(&self, post_id: &str) -> ApiResult<i64> {
        self.get_json(&endpoints::comments_for_post(post_id)).await
    }

    async fn follower_count(&self, username: &str) -> ApiResult<i64> {
        self.get_json(&endpoints::follower_count(username)).await
    }

    async fn following_count(&self, username: &str) -> ApiResult<i64> {
        self.get_json(&endpoints::following_count(username)).await
    }

    // Like endpoints

    async fn like_post(&self, post_id: &str, user_id: &str) -> ApiResult<()> {
        let url = self.endpoint(endpoints::LIKE);
        log::debug!(target: "api_calls", "POST {} post={}", url, post_id);
        let request = LikeRequest {
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
        };
        let req = self.add_auth_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_empty(response).await
    }

    async fn unlike_post(&self, post_id: &str, user_id: &str) -> ApiResult<()> {
        let url = self.endpoint(endpoints::UNLIKE);
        log::debug!(target: "api_calls", "DELETE {} post={}", url, post_id);
        let request = LikeRequest {
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
        };
        let req = self.add_auth_header(self.client.delete(&url).json(&request));
        let response = req.send().await?;
        self.handle_empty(response).await
    }

    async fn user_likes(&self, user_id: &str) -> ApiResult<Vec<LikeRecord>> {
        self.get_json(&endpoints::user_likes(user_id)).await
    }

    // Post endpoints

    async fn posts_by_username(&self, username: &str) -> ApiResult<Vec<Post>> {
        self.get_json(&endpoints::posts_by_username(username)).await
    }

    async fn create_post(&self, content: &str, username: &str) -> ApiResult<()> {
        let url = self.endpoint(endpoints::CREATE_POST);
        log::debug!(target: "api_calls", "POST {}", url);
        let request = CreatePostRequest {
            content: content.to_string(),
            username: username.to_string(),
        };
        let req = self.add_auth_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_empty(response).await
    }

    async fn update_post(&self, post_id: &str, content: &str) -> ApiResult<()> {
        let url = self.endpoint(&endpoints::update_post(post_id));
        log::debug!(target: "api_calls", "PUT {}", url);
        let request = UpdatePostRequest {
            content: content.to_string(),
        };
        let req = self.add_auth_header(self.client.put(&url).json(&request));
        let response = req.send().await?;
        self.handle_empty(response).await
    }

    async fn delete_post(&self, post_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&endpoints::delete_post(post_id));
        log::debug!(target: "api_calls", "DELETE {}", url);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_empty(response).await
    }
}

/// Pull a readable message out of an error body. A `{message}` body yields
/// its message; an HTML error page is replaced by a fixed hint.
fn error_message(status: u16, body: String) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&body) {
        parsed.message
    } else if body.contains("<html>") || body.contains("<!DOCTYPE") {
        format!("Server returned {} error. Please check the server URL.", status)
    } else {
        body
    }
}
