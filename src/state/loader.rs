use crate::state::messages::{CatalogRequest, CatalogResponse};
use events_api::catalog::{Catalog, CatalogError};
use log::{debug, error};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub const LOADING_CHAR: char = '⠿';
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Schedule provider task: reads event snapshots off the UI thread.
pub struct CatalogWorker {
    requests: mpsc::Receiver<CatalogRequest>,
    responses: mpsc::Sender<CatalogResponse>,
}

impl CatalogWorker {
    pub fn new(
        requests: mpsc::Receiver<CatalogRequest>,
        responses: mpsc::Sender<CatalogResponse>,
    ) -> Self {
        Self { requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.set_loading(LoadingState { is_loading: true, spinner_char: LOADING_CHAR })
                .await;

            let result = match request {
                CatalogRequest::Load { path } => self.handle_load(path).await,
            };

            debug!("catalog request complete");
            let spinner_char = if result.is_ok() { ' ' } else { ERROR_CHAR };
            self.set_loading(LoadingState { is_loading: false, spinner_char })
                .await;

            let response = result.unwrap_or_else(|err| CatalogResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send catalog response: {e}");
                break;
            }
        }
    }

    async fn handle_load(&self, path: PathBuf) -> Result<CatalogResponse, CatalogError> {
        debug!("loading events snapshot from {}", path.display());
        let display = path.display().to_string();
        let catalog = tokio::task::spawn_blocking(move || Catalog::load(path))
            .await
            .map_err(|e| {
                CatalogError::Io(std::io::Error::other(e.to_string()), display)
            })??;
        Ok(CatalogResponse::CatalogLoaded { catalog })
    }

    async fn set_loading(&self, loading_state: LoadingState) {
        let _ = self
            .responses
            .send(CatalogResponse::LoadingStateChanged { loading_state })
            .await;
    }
}
