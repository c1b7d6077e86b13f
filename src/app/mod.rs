mod picker;
mod session;
mod state;
mod ui;

use crate::backend::{
    BackendStatus, FileOutcome, PatternOption, RedactionBackend, SaveResponse,
};
use crate::error::BackendResult;
use derivative::Derivative;
use eframe::{egui, App};
pub use picker::PatternPicker;
pub use session::{DownloadRequest, PendingBatch, RedactionSession};
pub use state::{StatusLine, StatusTone};
use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Completion of a backend call, delivered back to the UI thread.
enum AppEvent {
    Status(BackendStatus),
    Patterns(BackendResult<Vec<PatternOption>>),
    Files(BackendResult<Vec<PathBuf>>),
    Batch(u64, BackendResult<Vec<FileOutcome>>),
    Saved(DownloadRequest, BackendResult<SaveResponse>),
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct RedaxApp {
    session: RedactionSession,
    backend_status: Option<BackendStatus>,
    dialog_open: bool,
    #[derivative(Debug = "ignore")]
    backend: Arc<dyn RedactionBackend>,
    #[derivative(Debug = "ignore")]
    runtime: Runtime,
    #[derivative(Debug = "ignore")]
    sender: Sender<AppEvent>,
    #[derivative(Debug = "ignore")]
    events: Receiver<AppEvent>,
    #[derivative(Debug = "ignore")]
    ctx: egui::Context,
}

impl RedaxApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        backend: Arc<dyn RedactionBackend>,
        session: RedactionSession,
        runtime: Runtime,
    ) -> Self {
        tracing::info!("Initializing Redax");
        let (sender, events) = std_mpsc::channel();
        let app = Self {
            session,
            backend_status: None,
            dialog_open: false,
            backend,
            runtime,
            sender,
            events,
            ctx: cc.egui_ctx.clone(),
        };

        let backend = app.backend.clone();
        app.spawn(async move { AppEvent::Status(backend.initial_status().await) });
        let backend = app.backend.clone();
        app.spawn(async move { AppEvent::Patterns(backend.available_patterns().await) });
        app
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let sender = self.sender.clone();
        let ctx = self.ctx.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            if sender.send(event).is_err() {
                tracing::debug!("UI closed before a backend call finished");
            }
            ctx.request_repaint();
        });
    }

    pub fn select_files(&mut self) {
        if self.dialog_open {
            return;
        }
        self.dialog_open = true;
        let backend = self.backend.clone();
        self.spawn(async move { AppEvent::Files(backend.select_files().await) });
    }

    pub fn process_files(&mut self) {
        let Some(PendingBatch {
            generation,
            request,
        }) = self.session.begin_processing()
        else {
            return;
        };
        tracing::info!(
            "Submitting batch {} of {} file(s)",
            generation,
            request.filepaths.len()
        );
        let backend = self.backend.clone();
        self.spawn(async move {
            AppEvent::Batch(generation, backend.process_batch(request).await)
        });
    }

    pub fn download(&mut self, index: usize) {
        if self.dialog_open {
            return;
        }
        let Some(request) = self.session.begin_download(index) else {
            return;
        };
        self.dialog_open = true;
        let backend = self.backend.clone();
        self.spawn(async move {
            let result = backend
                .save_processed_file(&request.output_path, &request.original_name, request.format)
                .await;
            AppEvent::Saved(request, result)
        });
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn update_state(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AppEvent::Status(status) => {
                    tracing::info!("Backend status: {}", status.message);
                    self.backend_status = Some(status);
                }
                AppEvent::Patterns(result) => self.session.finish_pattern_load(result),
                AppEvent::Files(result) => {
                    self.dialog_open = false;
                    self.session.finish_file_selection(result);
                }
                AppEvent::Batch(generation, result) => {
                    self.session.finish_processing(generation, result)
                }
                AppEvent::Saved(request, result) => {
                    self.dialog_open = false;
                    self.session.finish_download(&request, result);
                }
            }
        }
    }
}

impl App for RedaxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.render(ctx);
    }
}
