//! In-memory backend used by the view tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use glimpse_types::*;

use super::{ApiError, ApiResult, Backend, ImagePayload};

#[derive(Default)]
pub struct FakeState {
    pub images: Vec<ImageRecord>,
    pub image_payloads: HashMap<String, ImagePayload>,
    pub posts: Vec<Post>,
    pub likes: Vec<LikeRecord>,
    pub comment_counts: HashMap<String, i64>,
    pub followers: HashMap<String, i64>,
    pub following: HashMap<String, i64>,
    /// Operation names that answer with a 500
    pub failing: HashSet<&'static str>,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F: FnOnce(&mut FakeState)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().failing.remove(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn enter(&self, op: &'static str, arg: &str) -> ApiResult<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("{} {}", op, arg));
        if state.failing.contains(op) {
            return Err(ApiError::from_status(500, format!("{} failed", op)));
        }
        Ok(state)
    }
}

pub fn post(id: &str, username: &str, content: &str) -> Post {
    Post {
        id: id.to_string(),
        username: username.to_string(),
        content: content.to_string(),
        image_id: None,
        date: Utc.with_ymd_and_hms(2024, 3, 3, 16, 5, 0).unwrap(),
    }
}

pub fn image(id: &str, name: &str) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        name: name.to_string(),
        desc: String::new(),
        img: ImageBlob {
            data: ImageData::Bytes(vec![1, 2, 3]),
            content_type: "image/png".to_string(),
        },
    }
}

pub fn like(post_id: &str, user_id: &str) -> LikeRecord {
    LikeRecord {
        id: None,
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn base_url(&self) -> &str {
        "http://backend.test"
    }

    async fn get_all_images(&self) -> ApiResult<Vec<ImageRecord>> {
        let state = self.enter("get_all_images", "")?;
        Ok(state.images.clone())
    }

    async fn delete_image(&self, image_id: &str) -> ApiResult<()> {
        let mut state = self.enter("delete_image", image_id)?;
        state.images.retain(|i| i.id != image_id);
        Ok(())
    }

    async fn get_image(&self, image_id: &str) -> ApiResult<ImagePayload> {
        let state = self.enter("get_image", image_id)?;
        state
            .image_payloads
            .get(image_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("image {}", image_id)))
    }

    async fn like_count(&self, post_id: &str) -> ApiResult<i64> {
        let state = self.enter("like_count", post_id)?;
        Ok(state.likes.iter().filter(|l| l.post_id == post_id).count() as i64)
    }

    async fn comment_count(&self, post_id: &str) -> ApiResult<i64> {
        let state = self.enter("comment_count", post_id)?;
        Ok(state.comment_counts.get(post_id).copied().unwrap_or(0))
    }

    async fn follower_count(&self, username: &str) -> ApiResult<i64> {
        let state = self.enter("follower_count", username)?;
        Ok(state.followers.get(username).copied().unwrap_or(0))
    }

    async fn following_count(&self, username: &str) -> ApiResult<i64> {
        let state = self.enter("following_count", username)?;
        Ok(state.following.get(username).copied().unwrap_or(0))
    }

    async fn like_post(&self, post_id: &str, user_id: &str) -> ApiResult<()> {
        let mut state = self.enter("like_post", post_id)?;
        state.likes.push(like(post_id, user_id));
        Ok(())
    }

    async fn unlike_post(&self, post_id: &str, user_id: &str) -> ApiResult<()> {
        let mut state = self.enter("unlike_post", post_id)?;
        state
            .likes
            .retain(|l| !(l.post_id == post_id && l.user_id == user_id));
        Ok(())
    }

    async fn user_likes(&self, user_id: &str) -> ApiResult<Vec<LikeRecord>> {
        let state = self.enter("user_likes", user_id)?;
        Ok(state
            .likes
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn posts_by_username(&self, username: &str) -> ApiResult<Vec<Post>> {
        let state = self.enter("posts_by_username", username)?;
        Ok(state
            .posts
            .iter()
            .filter(|p| p.username == username)
            .cloned()
            .collect())
    }

    async fn create_post(&self, content: &str, username: &str) -> ApiResult<()> {
        let mut state = self.enter("create_post", content)?;
        let id = format!("post-{}", state.posts.len() + 1);
        state.posts.push(post(&id, username, content));
        Ok(())
    }

    async fn update_post(&self, post_id: &str, content: &str) -> ApiResult<()> {
        let mut state = self.enter("update_post", post_id)?;
        match state.posts.iter_mut().find(|p| p.id == post_id) {
            Some(p) => {
                p.content = content.to_string();
                Ok(())
            }
            None => Err(ApiError::NotFound("Post not found".to_string())),
        }
    }

    async fn delete_post(&self, post_id: &str) -> ApiResult<()> {
        let mut state = self.enter("delete_post", post_id)?;
        state.posts.retain(|p| p.id != post_id);
        Ok(())
    }
}
