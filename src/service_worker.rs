// Runs collaborator requests and preview decodes off the UI thread

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use image::DynamicImage;
use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;
use std::thread;

use crate::event::AppMsg;
use crate::model::ImageRef;
use crate::service::{ServiceAction, ServiceReport, WallpaperService, WallpaperTarget};

pub struct ServiceWorker {
    tx: Sender<AppMsg>,
    service: Arc<dyn WallpaperService>,
}

impl ServiceWorker {
    pub fn new(tx: Sender<AppMsg>, service: Arc<dyn WallpaperService>) -> Self {
        Self { tx, service }
    }

    pub fn start_download(&self, image: ImageRef) {
        self.spawn_request(ServiceAction::Download, image);
    }

    pub fn start_set_wallpaper(&self, image: ImageRef, target: WallpaperTarget) {
        self.spawn_request(ServiceAction::SetWallpaper(target), image);
    }

    fn spawn_request(&self, action: ServiceAction, image: ImageRef) {
        let tx = self.tx.clone();
        let service = Arc::clone(&self.service);

        thread::spawn(move || {
            let result = match action {
                ServiceAction::Download => service.download(&image),
                ServiceAction::SetWallpaper(target) => service.set_wallpaper(&image, target),
            };
            if let Err(e) = &result {
                warn!("{:?} failed for {}: {}", action, image, e);
            }
            let _ = tx.send(AppMsg::ServiceFinished(ServiceReport {
                action,
                image,
                result,
            }));
        });
    }

    /// Decodes a local preview image. Remote references are ignored.
    pub fn start_preview_load(&self, image: ImageRef) {
        let Some(path) = image.local_path() else {
            debug!("no local file for {}, skipping preview decode", image);
            return;
        };
        let tx = self.tx.clone();

        thread::spawn(move || match decode_image(&path) {
            Ok(decoded) => {
                let _ = tx.send(AppMsg::PreviewLoaded(image, decoded));
            }
            Err(e) => {
                let _ = tx.send(AppMsg::PreviewFailed(image, format!("{:#}", e)));
            }
        });
    }
}

fn decode_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("failed to open {}", path.display()))
}
