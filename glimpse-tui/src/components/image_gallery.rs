use glimpse_types::ImageRecord;

use super::{ViewContext, ViewScope, ViewToken, ViewUpdate};
use crate::api::ApiResult;

#[derive(Debug)]
pub enum GalleryUpdate {
    Loaded(ApiResult<Vec<ImageRecord>>),
    Deleted {
        image_id: String,
        result: ApiResult<()>,
    },
}

/// Uploaded images with per-item removal
pub struct ImageGallery {
    scope: ViewScope,
    authorized: bool,
    pub images: Vec<ImageRecord>,
    pub loading: bool,
    pub selected: usize,
    /// Image awaiting delete confirmation
    pub confirm_delete: Option<String>,
    /// Image whose delete request is in flight
    pub deleting: Option<String>,
}

impl ImageGallery {
    /// Activate the gallery and start fetching the collection.
    /// Without a session user nothing is fetched and the view stays unauthorized.
    pub fn activate(ctx: &ViewContext) -> Self {
        let mut gallery = Self {
            scope: ctx.scope(),
            authorized: ctx.session.is_authenticated(),
            images: Vec::new(),
            loading: false,
            selected: 0,
            confirm_delete: None,
            deleting: None,
        };
        if gallery.authorized {
            gallery.fetch(ctx);
        }
        gallery
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn fetch(&mut self, ctx: &ViewContext) {
        self.loading = true;
        let backend = ctx.backend.clone();
        self.scope.spawn(async move {
            ViewUpdate::Gallery(GalleryUpdate::Loaded(backend.get_all_images().await))
        });
    }

    pub fn selected_image(&self) -> Option<&ImageRecord> {
        self.images.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.images.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Ask for confirmation before removing the selected image
    pub fn request_delete(&mut self) {
        if let Some(image) = self.selected_image() {
            self.confirm_delete = Some(image.id.clone());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Confirmation accepted: issue the delete. Local state changes only once
    /// the server has answered.
    pub fn confirm_delete(&mut self, ctx: &ViewContext) {
        let Some(image_id) = self.confirm_delete.take() else {
            return;
        };

        self.deleting = Some(image_id.clone());
        let backend = ctx.backend.clone();
        self.scope.spawn(async move {
            let result = backend.delete_image(&image_id).await;
            ViewUpdate::Gallery(GalleryUpdate::Deleted { image_id, result })
        });
    }

    /// Apply a finished request. Returns false for results from a previous
    /// activation, which are dropped untouched.
    pub fn apply(&mut self, token: ViewToken, update: GalleryUpdate) -> bool {
        if !self.scope.owns(token) {
            return false;
        }

        match update {
            GalleryUpdate::Loaded(Ok(images)) => {
                log::info!("Loaded {} images", images.len());
                self.images = images;
                self.loading = false;
                self.clamp_selection();
            }
            GalleryUpdate::Loaded(Err(e)) => {
                log::error!("Error fetching images: {}", e);
                self.loading = false;
            }
            GalleryUpdate::Deleted { image_id, result } => {
                if self.deleting.as_deref() == Some(image_id.as_str()) {
                    self.deleting = None;
                }
                match result {
                    Ok(()) => {
                        self.images.retain(|image| image.id != image_id);
                        self.clamp_selection();
                    }
                    Err(e) => {
                        let message = e.server_message().map(str::to_string).unwrap_or_else(|| e.to_string());
                        log::error!("Error deleting image {}: {}", image_id, message);
                    }
                }
            }
        }
        true
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.images.len() {
            self.selected = self.images.len().saturating_sub(1);
        }
    }
}
