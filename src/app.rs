//! Application orchestration for one assistant screen.

use crate::ai::{ContentService, GeminiClient};
use crate::config::Config;
use crate::export::{self, DesktopShareSurface, PdfExporter, PdfMetadata, ShareSurface};
use crate::generation;
use crate::state::{Transition, ViewState};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

type Observer = Box<dyn FnMut(&ViewState)>;

/// Owns the view state and drives generation and export against it.
pub struct App {
    state: ViewState,
    content: Box<dyn ContentService>,
    share: Box<dyn ShareSurface>,
    exporter: PdfExporter,
    api_key: String,
    observer: Option<Observer>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub content: Box<dyn ContentService>,
    pub share: Box<dyn ShareSurface>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, api_key: String, export_dir: &Path) -> Self {
        Self {
            state: ViewState::new(),
            content: services.content,
            share: services.share,
            exporter: PdfExporter::new(export_dir),
            api_key,
            observer: None,
        }
    }

    /// Construct an app talking to Gemini and the desktop share surface.
    pub fn from_config(config: &Config) -> Self {
        info!(
            "Using Gemini model {} at {}",
            config.model, config.base_url
        );
        Self::with_services(
            AppServices {
                content: Box::new(GeminiClient::from_config(config)),
                share: Box::new(DesktopShareSurface::new()),
            },
            config.api_key.clone(),
            &config.export_dir,
        )
    }

    /// Register a callback run after every state change.
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(&ViewState) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.state.prompt = prompt.into();
    }

    pub fn export_path(&self) -> PathBuf {
        self.exporter.output_path()
    }

    fn apply(&mut self, transition: Transition) {
        self.state.apply(transition);
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }

    fn record(&mut self, err: Error) -> Error {
        warn!("{}", err);
        self.apply(Transition::Failed(err.to_string()));
        err
    }

    /// Generate content for the current prompt.
    ///
    /// Exactly one of content or error message is updated per call, and
    /// `loading` is false again by the time this returns.
    pub async fn submit(&mut self) -> Result<()> {
        if !self.state.can_submit() {
            warn!("Ignoring submission while a generation is in flight");
            return Ok(());
        }

        let prompt = self.state.prompt.clone();
        if let Err(err) = generation::validate(&prompt, &self.api_key) {
            return Err(self.record(err));
        }

        self.apply(Transition::Begin);
        let outcome = generation::generate(self.content.as_ref(), &prompt, &self.api_key).await;
        let result = match outcome {
            Ok(text) => {
                self.apply(Transition::Succeeded(text));
                Ok(())
            }
            Err(err) => Err(self.record(err)),
        };
        self.apply(Transition::Settled);

        result
    }

    /// Share the generated text.
    pub fn share(&mut self) -> Result<()> {
        match export::share_text(&self.state.generated_content, self.share.as_ref()) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.record(err)),
        }
    }

    /// Render the generated text to PDF and share the file.
    pub fn export_pdf(&mut self) -> Result<PathBuf> {
        let metadata = PdfMetadata::default();
        match self
            .exporter
            .export(&self.state.generated_content, &metadata, self.share.as_ref())
        {
            Ok(path) => Ok(path),
            Err(err) => Err(self.record(err)),
        }
    }
}
