use std::sync::Arc;

use crate::application::creation_flow::CreationFlow;
use crate::application::directory_store::{DirectoryStore, LoadState};
use crate::domain::ports::DirectoryApi;
use crate::render;

/// The customer directory screen: a list and the dialog that adds to it, both
/// talking to the same directory endpoint.
pub struct DirectoryScreen<A> {
    directory: Arc<DirectoryStore<A>>,
    creation: CreationFlow<A>,
}

impl<A: DirectoryApi> DirectoryScreen<A> {
    pub fn new(api: A) -> Self {
        Self::with_shared(Arc::new(api))
    }

    pub fn with_shared(api: Arc<A>) -> Self {
        let directory = Arc::new(DirectoryStore::new(Arc::clone(&api)));
        let creation = CreationFlow::new(api, Arc::clone(&directory));
        Self {
            directory,
            creation,
        }
    }

    /// Performs the initial read.
    pub async fn mount(&self) -> LoadState {
        self.directory.load().await
    }

    pub fn directory(&self) -> &DirectoryStore<A> {
        &self.directory
    }

    pub fn creation(&self) -> &CreationFlow<A> {
        &self.creation
    }

    pub fn render(&self) -> String {
        let mut out = render::render_directory(&self.directory.snapshot());
        if let Some(dialog) = render::render_dialog(&self.creation.state()) {
            out.push('\n');
            out.push_str(&dialog);
        }
        out
    }
}
