//! View components. Each one owns its local state and a [`ViewScope`] for the
//! requests it has in flight; results come back to the event loop as
//! [`ViewEvent`]s and are applied only while the issuing scope is alive.

pub mod image_gallery;
pub mod nav_bar;
pub mod post_card;
pub mod profile_page;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::{ApiError, Backend};
use crate::session::Session;

pub use image_gallery::{GalleryUpdate, ImageGallery};
pub use nav_bar::{NavBar, NavLink};
pub use post_card::{CardOutcome, CardUpdate, PostCard};
pub use profile_page::{ProfilePage, ProfileUpdate};

/// Identifies one activation of a view
pub type ViewToken = Uuid;

/// A finished request, addressed to the view activation that issued it
#[derive(Debug)]
pub struct ViewEvent {
    pub token: ViewToken,
    pub update: ViewUpdate,
}

#[derive(Debug)]
pub enum ViewUpdate {
    Gallery(GalleryUpdate),
    Card { post_id: String, update: CardUpdate },
    Profile(ProfileUpdate),
}

/// Everything a view needs to talk to the outside world
#[derive(Clone)]
pub struct ViewContext {
    pub backend: Arc<dyn Backend>,
    pub session: Session,
    events: UnboundedSender<ViewEvent>,
}

impl ViewContext {
    pub fn new(backend: Arc<dyn Backend>, session: Session, events: UnboundedSender<ViewEvent>) -> Self {
        Self {
            backend,
            session,
            events,
        }
    }

    /// Fresh scope for a view being activated
    pub fn scope(&self) -> ViewScope {
        ViewScope::new(self.events.clone())
    }
}

/// Liveness token plus the handles of the requests a view activation issued.
///
/// Dropping the scope aborts whatever is still running; anything that already
/// finished carries a token no live view answers to.
pub struct ViewScope {
    token: ViewToken,
    tasks: Vec<JoinHandle<()>>,
    events: UnboundedSender<ViewEvent>,
}

impl ViewScope {
    fn new(events: UnboundedSender<ViewEvent>) -> Self {
        Self {
            token: Uuid::new_v4(),
            tasks: Vec::new(),
            events,
        }
    }

    pub fn token(&self) -> ViewToken {
        self.token
    }

    pub fn owns(&self, token: ViewToken) -> bool {
        self.token == token
    }

    /// Run a request off the UI thread and post its result back
    pub fn spawn<F>(&mut self, request: F)
    where
        F: Future<Output = ViewUpdate> + Send + 'static,
    {
        let token = self.token;
        let events = self.events.clone();
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(tokio::spawn(async move {
            let update = request.await;
            // The receiver only goes away when the app is shutting down
            let _ = events.send(ViewEvent { token, update });
        }));
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Transient status line message
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    created: Instant,
}

impl Notice {
    const LIFETIME: Duration = Duration::from_secs(3);

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            created: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created.elapsed() > Self::LIFETIME
    }
}

/// User-facing result of applying an update
#[derive(Debug)]
pub enum Feedback {
    /// Transient status line message
    Notice(Notice),
    /// Blocking dialog, dismissed explicitly
    Alert(String),
}

/// Short, user-facing wording for a failed request
pub fn describe_error(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => "Network Error: could not reach the server".to_string(),
        ApiError::Unauthorized(_) => "Authorization Error: please sign in again".to_string(),
        ApiError::NotFound(message) => format!("Not found: {}", message),
        ApiError::BadRequest(message) => format!("Validation Error: {}", message),
        ApiError::Api { status, message } if *status >= 500 => {
            format!("Server Error ({}): {}", status, message)
        }
        ApiError::Api { message, .. } => format!("Error: {}", message),
        ApiError::Payload(_) => "Error: the server sent an unexpected response".to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::api::testing::FakeBackend;

    #[tokio::test]
    async fn test_scope_posts_results_with_its_token() {
        let (ctx, mut rx) = context(Arc::new(FakeBackend::new()), Session::anonymous());
        let mut scope = ctx.scope();
        scope.spawn(async { ViewUpdate::Profile(ProfileUpdate::Followers(Ok(3))) });

        let event = next_event(&mut rx).await;
        assert!(scope.owns(event.token));
    }

    #[tokio::test]
    async fn test_dropped_scope_aborts_pending_requests() {
        let (ctx, mut rx) = context(Arc::new(FakeBackend::new()), Session::anonymous());
        let mut scope = ctx.scope();
        scope.spawn(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            ViewUpdate::Profile(ProfileUpdate::Followers(Ok(1)))
        });
        assert_eq!(scope.in_flight(), 1);
        drop(scope);

        assert!(drain(&mut rx).await.is_empty());
    }

    #[test]
    fn test_describe_error() {
        assert!(describe_error(&ApiError::from_status(500, "boom".into())).starts_with("Server Error (500)"));
        assert!(describe_error(&ApiError::from_status(401, "no".into())).starts_with("Authorization Error"));
    }
}
