use glimpse_types::{Post, SessionUser};
use tui_textarea::TextArea;

use super::{CardOutcome, CardUpdate, Feedback, PostCard, ViewContext, ViewScope, ViewToken, ViewUpdate};
use crate::api::{endpoints, ApiResult};
use crate::text_wrapper::{editor_text, new_editor};

#[derive(Debug)]
pub enum ProfileUpdate {
    Posts(ApiResult<Vec<Post>>),
    Created(ApiResult<()>),
    Deleted {
        post_id: String,
        result: ApiResult<()>,
    },
    Followers(ApiResult<i64>),
    Following(ApiResult<i64>),
}

/// Single-field form for a new post
pub struct PostForm {
    pub editor: TextArea<'static>,
    pub submitting: bool,
}

impl PostForm {
    fn new() -> Self {
        Self {
            editor: new_editor(""),
            submitting: false,
        }
    }

    pub fn content(&self) -> String {
        editor_text(&self.editor)
    }
}

/// The session user's own posts, follower counts, the new-post form and
/// per-post deletion
pub struct ProfilePage {
    scope: ViewScope,
    user: Option<SessionUser>,
    pub cards: Vec<PostCard>,
    pub selected: usize,
    pub loading: bool,
    pub followers: Option<i64>,
    pub following: Option<i64>,
    pub form: Option<PostForm>,
    /// Post awaiting delete confirmation
    pub confirm_delete: Option<String>,
}

impl ProfilePage {
    pub fn activate(ctx: &ViewContext) -> Self {
        let mut page = Self {
            scope: ctx.scope(),
            user: ctx.session.user().cloned(),
            cards: Vec::new(),
            selected: 0,
            loading: false,
            followers: None,
            following: None,
            form: None,
            confirm_delete: None,
        };

        if let Some(username) = page.username().map(str::to_string) {
            page.fetch_posts(ctx);

            let backend = ctx.backend.clone();
            let name = username.clone();
            page.scope.spawn(async move {
                ViewUpdate::Profile(ProfileUpdate::Followers(backend.follower_count(&name).await))
            });

            let backend = ctx.backend.clone();
            page.scope.spawn(async move {
                ViewUpdate::Profile(ProfileUpdate::Following(backend.following_count(&username).await))
            });
        }
        page
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    pub fn owns(&self, token: ViewToken) -> bool {
        self.scope.owns(token)
    }

    /// Fetch the full post list again
    pub fn fetch_posts(&mut self, ctx: &ViewContext) {
        let Some(username) = self.username().map(str::to_string) else {
            return;
        };
        self.loading = true;
        let backend = ctx.backend.clone();
        self.scope.spawn(async move {
            ViewUpdate::Profile(ProfileUpdate::Posts(backend.posts_by_username(&username).await))
        });
    }

    pub fn selected_card(&self) -> Option<&PostCard> {
        self.cards.get(self.selected)
    }

    pub fn selected_card_mut(&mut self) -> Option<&mut PostCard> {
        self.cards.get_mut(self.selected)
    }

    /// Card whose edit surface is open, if any
    pub fn editing_card_mut(&mut self) -> Option<&mut PostCard> {
        self.cards.iter_mut().find(|card| card.is_editing())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_form(&mut self) -> bool {
        if self.user.is_none() {
            return false;
        }
        if self.form.is_none() {
            self.form = Some(PostForm::new());
        }
        true
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Send the form content as a new post. The form stays open until the
    /// server accepts it.
    pub fn submit_post(&mut self, ctx: &ViewContext) {
        let Some(username) = self.username().map(str::to_string) else {
            return;
        };
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if form.submitting {
            return;
        }
        let content = form.content();
        if content.trim().is_empty() {
            return;
        }

        form.submitting = true;
        let backend = ctx.backend.clone();
        self.scope.spawn(async move {
            ViewUpdate::Profile(ProfileUpdate::Created(backend.create_post(&content, &username).await))
        });
    }

    pub fn request_delete(&mut self) {
        if let Some(card) = self.selected_card() {
            self.confirm_delete = Some(card.post.id.clone());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Confirmation accepted: close the modal and issue the delete
    pub fn confirm_delete(&mut self, ctx: &ViewContext) {
        let Some(post_id) = self.confirm_delete.take() else {
            return;
        };
        let backend = ctx.backend.clone();
        self.scope.spawn(async move {
            let result = backend.delete_post(&post_id).await;
            ViewUpdate::Profile(ProfileUpdate::Deleted { post_id, result })
        });
    }

    /// Apply a page-level result. Failures come back as blocking alerts
    /// naming the endpoint that failed.
    pub fn apply(&mut self, ctx: &ViewContext, token: ViewToken, update: ProfileUpdate) -> Option<Feedback> {
        if !self.owns(token) {
            return None;
        }

        match update {
            ProfileUpdate::Posts(Ok(posts)) => {
                self.loading = false;
                self.cards = posts.into_iter().map(|post| PostCard::activate(ctx, post)).collect();
                if self.selected >= self.cards.len() {
                    self.selected = self.cards.len().saturating_sub(1);
                }
                None
            }
            ProfileUpdate::Posts(Err(e)) => {
                self.loading = false;
                log::error!("Error fetching posts: {}", e);
                let path = endpoints::posts_by_username(self.username().unwrap_or_default());
                Some(Feedback::Alert(format!("Unable to get posts from {}", ctx.backend.url(&path))))
            }
            ProfileUpdate::Created(Ok(())) => {
                self.form = None;
                self.fetch_posts(ctx);
                None
            }
            ProfileUpdate::Created(Err(e)) => {
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                }
                log::error!("Error creating post: {}", e);
                Some(Feedback::Alert(format!(
                    "Unable to create post: {}",
                    ctx.backend.url(endpoints::CREATE_POST)
                )))
            }
            ProfileUpdate::Deleted { result: Ok(()), .. } => {
                self.fetch_posts(ctx);
                None
            }
            ProfileUpdate::Deleted { post_id, result: Err(e) } => {
                log::error!("Error deleting post {}: {}", post_id, e);
                Some(Feedback::Alert(format!(
                    "Unable to delete post: {}",
                    ctx.backend.url(&endpoints::delete_post(&post_id))
                )))
            }
            ProfileUpdate::Followers(Ok(count)) => {
                self.followers = Some(count);
                None
            }
            ProfileUpdate::Following(Ok(count)) => {
                self.following = Some(count);
                None
            }
            ProfileUpdate::Followers(Err(e)) => {
                log::error!("Error fetching follower count: {}", e);
                let path = endpoints::follower_count(self.username().unwrap_or_default());
                Some(Feedback::Alert(format!("Unable to get follow counts from {}", ctx.backend.url(&path))))
            }
            ProfileUpdate::Following(Err(e)) => {
                log::error!("Error fetching following count: {}", e);
                let path = endpoints::following_count(self.username().unwrap_or_default());
                Some(Feedback::Alert(format!("Unable to get follow counts from {}", ctx.backend.url(&path))))
            }
        }
    }

    /// Route a card result to the card activation that issued it.
    /// Returns `None` when that card is gone.
    pub fn apply_card(
        &mut self,
        ctx: &ViewContext,
        token: ViewToken,
        post_id: &str,
        update: CardUpdate,
    ) -> Option<Feedback> {
        let card = self
            .cards
            .iter_mut()
            .find(|card| card.token() == token && card.post.id == post_id)?;

        match card.apply(update)? {
            CardOutcome::Changed => {
                self.fetch_posts(ctx);
                None
            }
            CardOutcome::Failed(notice) => Some(Feedback::Notice(notice)),
        }
    }

    /// Whether a card activation with this token is still mounted
    pub fn has_card(&self, token: ViewToken) -> bool {
        self.cards.iter().any(|card| card.token() == token)
    }
}
