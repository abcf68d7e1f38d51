use std::collections::HashSet;

use glimpse_types::{LikeRecord, LikeState, Post};
use tui_textarea::TextArea;

use super::{describe_error, Notice, ViewContext, ViewScope, ViewToken, ViewUpdate};
use crate::api::{ApiResult, ImagePayload};
use crate::session::Session;
use crate::text_wrapper::{editor_text, new_editor};

/// Content longer than this many characters is shown truncated until expanded
pub const CONTENT_CUTOFF: usize = 96;

#[derive(Debug)]
pub enum CardUpdate {
    LikeCount(ApiResult<i64>),
    CommentCount(ApiResult<i64>),
    Image(ApiResult<ImagePayload>),
    ViewerLikes(ApiResult<Vec<LikeRecord>>),
    LikeToggled {
        target: LikeState,
        result: ApiResult<()>,
    },
    Edited(ApiResult<()>),
    Deleted(ApiResult<()>),
}

/// What the owning view should do after a card applied an update
#[derive(Debug)]
pub enum CardOutcome {
    /// The post changed on the server; the list should be fetched again
    Changed,
    Failed(Notice),
}

/// Expand/collapse affordance shown after post content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Expand,
    Collapse,
}

impl Affordance {
    pub fn icon(&self) -> &'static str {
        match self {
            Affordance::Expand => " [...]",
            Affordance::Collapse => " [^]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisplay {
    pub text: String,
    pub affordance: Option<Affordance>,
}

/// Decide how much of a post body to show.
///
/// Content at or under `cutoff` characters is shown whole with no affordance.
pub fn display_content(content: &str, expanded: bool, cutoff: usize) -> ContentDisplay {
    if content.chars().count() <= cutoff {
        return ContentDisplay {
            text: content.to_string(),
            affordance: None,
        };
    }

    if expanded {
        ContentDisplay {
            text: content.to_string(),
            affordance: Some(Affordance::Collapse),
        }
    } else {
        ContentDisplay {
            text: content.chars().take(cutoff).collect(),
            affordance: Some(Affordance::Expand),
        }
    }
}

/// Post ids the viewer has liked
#[derive(Debug, Clone, Default)]
pub struct LikeIndex(HashSet<String>);

impl LikeIndex {
    pub fn contains(&self, post_id: &str) -> bool {
        self.0.contains(post_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<LikeRecord> for LikeIndex {
    fn from_iter<I: IntoIterator<Item = LikeRecord>>(records: I) -> Self {
        Self(records.into_iter().map(|record| record.post_id).collect())
    }
}

/// Image attached to a post, ready to hand to an inline renderer
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub content_type: String,
    pub byte_len: usize,
    pub data_uri: String,
}

impl From<ImagePayload> for InlineImage {
    fn from(payload: ImagePayload) -> Self {
        Self {
            data_uri: payload.data_uri(),
            byte_len: payload.bytes.len(),
            content_type: payload.content_type,
        }
    }
}

/// One post with its counts, attached image and the viewer's like state
pub struct PostCard {
    scope: ViewScope,
    pub post: Post,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
    pub image: Option<InlineImage>,
    pub like_state: LikeState,
    /// Set once the viewer's likes have loaded; toggling before then could
    /// send a like for a post the viewer already liked
    like_state_known: bool,
    like_pending: bool,
    pub expanded: bool,
    pub show_detail: bool,
    /// Edit surface, open while the author is revising the post
    pub editor: Option<TextArea<'static>>,
}

impl PostCard {
    /// Activate a card and fetch its like count, comment count, attached
    /// image and the viewer's likes concurrently
    pub fn activate(ctx: &ViewContext, post: Post) -> Self {
        let mut card = Self {
            scope: ctx.scope(),
            post,
            like_count: None,
            comment_count: None,
            image: None,
            like_state: LikeState::Unliked,
            like_state_known: false,
            like_pending: false,
            expanded: false,
            show_detail: false,
            editor: None,
        };
        card.fetch(ctx);
        card
    }

    fn fetch(&mut self, ctx: &ViewContext) {
        let post_id = self.post.id.clone();

        let backend = ctx.backend.clone();
        let id = post_id.clone();
        self.scope.spawn(async move {
            let update = CardUpdate::LikeCount(backend.like_count(&id).await);
            ViewUpdate::Card { post_id: id, update }
        });

        let backend = ctx.backend.clone();
        let id = post_id.clone();
        self.scope.spawn(async move {
            let update = CardUpdate::CommentCount(backend.comment_count(&id).await);
            ViewUpdate::Card { post_id: id, update }
        });

        if let Some(image_id) = self.post.image_id.clone() {
            let backend = ctx.backend.clone();
            let id = post_id.clone();
            self.scope.spawn(async move {
                let update = CardUpdate::Image(backend.get_image(&image_id).await);
                ViewUpdate::Card { post_id: id, update }
            });
        }

        if let Some(user) = ctx.session.user() {
            let backend = ctx.backend.clone();
            let user_id = user.id.clone();
            self.scope.spawn(async move {
                let update = CardUpdate::ViewerLikes(backend.user_likes(&user_id).await);
                ViewUpdate::Card { post_id, update }
            });
        }
    }

    pub fn token(&self) -> ViewToken {
        self.scope.token()
    }

    pub fn content(&self) -> ContentDisplay {
        display_content(&self.post.content, self.expanded, CONTENT_CUTOFF)
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Comment count as displayed; unknown or non-positive reads as "0"
    pub fn comment_label(&self) -> String {
        match self.comment_count {
            Some(count) if count > 0 => count.to_string(),
            _ => "0".to_string(),
        }
    }

    pub fn is_like_state_known(&self) -> bool {
        self.like_state_known
    }

    pub fn is_like_pending(&self) -> bool {
        self.like_pending
    }

    pub fn is_owned_by(&self, session: &Session) -> bool {
        session
            .user()
            .is_some_and(|user| user.username == self.post.username)
    }

    /// Send a like or unlike for the current state. Nothing changes locally
    /// until the server accepts it, and only one toggle is in flight at a time.
    pub fn toggle_like(&mut self, ctx: &ViewContext) {
        let Some(user) = ctx.session.user() else {
            log::debug!("Ignoring like toggle without a signed-in user");
            return;
        };
        if !self.like_state_known {
            log::debug!("Like state for post {} not loaded yet", self.post.id);
            return;
        }
        if self.like_pending {
            log::debug!("Like toggle already in flight for post {}", self.post.id);
            return;
        }

        self.like_pending = true;
        let target = match self.like_state {
            LikeState::Unliked => LikeState::Liked,
            LikeState::Liked => LikeState::Unliked,
        };
        let backend = ctx.backend.clone();
        let post_id = self.post.id.clone();
        let user_id = user.id.clone();
        self.scope.spawn(async move {
            let result = match target {
                LikeState::Liked => backend.like_post(&post_id, &user_id).await,
                LikeState::Unliked => backend.unlike_post(&post_id, &user_id).await,
            };
            ViewUpdate::Card {
                post_id,
                update: CardUpdate::LikeToggled { target, result },
            }
        });
    }

    /// Open the edit surface; only the author may edit
    pub fn begin_edit(&mut self, session: &Session) -> bool {
        if !self.is_owned_by(session) {
            return false;
        }
        self.editor = Some(new_editor(&self.post.content));
        true
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Submit the revised content and close the edit surface
    pub fn submit_edit(&mut self, ctx: &ViewContext) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        let content = editor_text(&editor);
        if content.trim().is_empty() {
            self.editor = Some(editor);
            return;
        }
        let backend = ctx.backend.clone();
        let post_id = self.post.id.clone();
        self.scope.spawn(async move {
            let update = CardUpdate::Edited(backend.update_post(&post_id, &content).await);
            ViewUpdate::Card { post_id, update }
        });
    }

    /// Submit a delete for this post and close the edit surface
    pub fn submit_delete(&mut self, ctx: &ViewContext) {
        self.editor = None;
        let backend = ctx.backend.clone();
        let post_id = self.post.id.clone();
        self.scope.spawn(async move {
            let update = CardUpdate::Deleted(backend.delete_post(&post_id).await);
            ViewUpdate::Card { post_id, update }
        });
    }

    pub fn apply(&mut self, update: CardUpdate) -> Option<CardOutcome> {
        match update {
            CardUpdate::LikeCount(Ok(count)) => self.like_count = Some(count),
            CardUpdate::LikeCount(Err(e)) => {
                log::error!("Error fetching like count for {}: {}", self.post.id, e);
            }
            CardUpdate::CommentCount(Ok(count)) => self.comment_count = Some(count),
            CardUpdate::CommentCount(Err(e)) => {
                log::error!("Error fetching comment count for {}: {}", self.post.id, e);
            }
            CardUpdate::Image(Ok(payload)) => self.image = Some(payload.into()),
            CardUpdate::Image(Err(e)) => {
                log::error!("Error fetching image for {}: {}", self.post.id, e);
            }
            CardUpdate::ViewerLikes(Ok(records)) => {
                let index: LikeIndex = records.into_iter().collect();
                self.like_state = LikeState::from_liked(index.contains(&self.post.id));
                self.like_state_known = true;
            }
            CardUpdate::ViewerLikes(Err(e)) => {
                log::error!("Error fetching viewer likes: {}", e);
            }
            CardUpdate::LikeToggled { target, result } => {
                self.like_pending = false;
                match result {
                    Ok(()) => {
                        if target != self.like_state {
                            if let Some(count) = self.like_count.as_mut() {
                                *count += if target.is_liked() { 1 } else { -1 };
                            }
                            self.like_state = target;
                        }
                    }
                    Err(e) => {
                        log::error!("Error toggling like on {}: {}", self.post.id, e);
                        return Some(CardOutcome::Failed(Notice::error(format!(
                            "Could not {} post. {}",
                            target_verb(target),
                            describe_error(&e)
                        ))));
                    }
                }
            }
            CardUpdate::Edited(result) => {
                return Some(match result {
                    Ok(()) => CardOutcome::Changed,
                    Err(e) => {
                        log::error!("Error updating post {}: {}", self.post.id, e);
                        CardOutcome::Failed(Notice::error(describe_error(&e)))
                    }
                });
            }
            CardUpdate::Deleted(result) => {
                return Some(match result {
                    Ok(()) => CardOutcome::Changed,
                    Err(e) => {
                        log::error!("Error deleting post {}: {}", self.post.id, e);
                        CardOutcome::Failed(Notice::error(describe_error(&e)))
                    }
                });
            }
        }
        None
    }
}

fn target_verb(target: LikeState) -> &'static str {
    match target {
        LikeState::Liked => "like",
        LikeState::Unliked => "unlike",
    }
}
