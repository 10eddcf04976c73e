use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use eframe::egui::{self, Context};

use crate::corpus::{
    Embedder, HashedEmbedder, RandomProjection, Reducer, StoredEmbeddings, load_comments,
};
use crate::pack::CommentBox;
use crate::scene::{Scene, SceneOptions, build_scene};
use crate::viewport::Viewport;

mod controls;
mod details;
mod interaction;
mod render_utils;
mod view;

/// Injected external collaborators for the layout pipeline. The app never
/// owns embedding-service credentials; providers are constructed once from
/// the configuration and reused across recomputes.
pub struct LayoutProviders {
    pub embedder: Box<dyn Embedder>,
    pub reducer: Box<dyn Reducer>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub comments_path: PathBuf,
    pub embeddings_path: Option<PathBuf>,
    pub anchor: String,
    pub clusters: usize,
    pub seed: Option<u64>,
}

pub struct CommentMapApp {
    config: AppConfig,
    state: AppState,
    layout_generation: u64,
    layout_rx: Option<Receiver<(u64, Result<SceneUpdate, String>)>>,
}

enum AppState {
    Loading,
    Ready(Box<ViewModel>),
    Error(String),
}

struct SceneUpdate {
    comments: Arc<Vec<String>>,
    providers: Arc<LayoutProviders>,
    scene: Scene,
    anchor: String,
    max_groups: usize,
}

pub(in crate::app) struct ViewModel {
    comments: Arc<Vec<String>>,
    providers: Arc<LayoutProviders>,
    anchor: String,
    anchor_draft: String,
    max_groups: usize,
    cluster_count: usize,
    has_anchor: bool,
    base_boxes: Vec<CommentBox>,
    boxes: Vec<CommentBox>,
    viewport: Viewport,
    search: String,
    expanded: Option<usize>,
}

/// A recompute request raised by the controls panel.
pub(in crate::app) struct RecomputeRequest {
    pub anchor: String,
    pub max_groups: usize,
}

impl CommentMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config,
            state: AppState::Loading,
            layout_generation: 0,
            layout_rx: None,
        };
        app.spawn_layout(app.config.anchor.clone(), app.config.clusters, None);
        app
    }

    fn build_providers(config: &AppConfig) -> Result<LayoutProviders> {
        let embedder: Box<dyn Embedder> = match &config.embeddings_path {
            Some(path) => Box::new(StoredEmbeddings::load(path)?),
            None => Box::new(HashedEmbedder::default()),
        };
        let projection_seed = config.seed.unwrap_or_else(rand::random);
        Ok(LayoutProviders {
            embedder,
            reducer: Box::new(RandomProjection::new(projection_seed)),
        })
    }

    /// Kick off a background layout build. Every request carries a
    /// generation tag and a fresh channel, so a late response from an
    /// abandoned request can never overwrite a newer scene.
    fn spawn_layout(
        &mut self,
        anchor: String,
        max_groups: usize,
        reuse: Option<(Arc<Vec<String>>, Arc<LayoutProviders>)>,
    ) {
        self.layout_generation += 1;
        let generation = self.layout_generation;
        let config = self.config.clone();
        let seed = self.config.seed;
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = (|| -> Result<SceneUpdate> {
                let (comments, providers) = match reuse {
                    Some(existing) => existing,
                    None => {
                        let comments = Arc::new(load_comments(&config.comments_path)?);
                        let providers = Arc::new(Self::build_providers(&config)?);
                        (comments, providers)
                    }
                };

                let options = SceneOptions {
                    max_groups,
                    seed,
                    ..SceneOptions::default()
                };
                let scene = build_scene(
                    &comments,
                    &anchor,
                    providers.embedder.as_ref(),
                    providers.reducer.as_ref(),
                    &options,
                )?;

                Ok(SceneUpdate {
                    comments,
                    providers,
                    scene,
                    anchor,
                    max_groups,
                })
            })()
            .map_err(|error| format!("{error:#}"));

            let _ = tx.send((generation, result));
        });

        self.layout_rx = Some(rx);
    }

    fn poll_layout(&mut self) {
        let Some(rx) = self.layout_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok((generation, result)) => {
                if generation != self.layout_generation {
                    // Stale response from a superseded request.
                    return;
                }
                match result {
                    Ok(update) => self.state = AppState::Ready(Box::new(ViewModel::new(update))),
                    Err(error) => self.state = AppState::Error(error),
                }
            }
            Err(TryRecvError::Empty) => {
                self.layout_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                self.state = AppState::Error("background layout worker disconnected".to_owned());
            }
        }
    }
}

impl eframe::App for CommentMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_layout();

        if self.layout_rx.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let mut recompute = None;
        let mut retry = false;
        let is_loading = self.layout_rx.is_some();

        match &mut self.state {
            AppState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Laying out comment map...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to build the comment map");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &mut recompute, is_loading);
            }
        }

        if retry {
            self.state = AppState::Loading;
            self.spawn_layout(self.config.anchor.clone(), self.config.clusters, None);
        }

        if let Some(request) = recompute
            && let AppState::Ready(model) = &self.state
        {
            let reuse = Some((Arc::clone(&model.comments), Arc::clone(&model.providers)));
            self.spawn_layout(request.anchor, request.max_groups, reuse);
        }
    }
}

impl ViewModel {
    fn new(update: SceneUpdate) -> Self {
        let viewport = Viewport::fit(&update.scene.boxes);
        Self {
            comments: update.comments,
            providers: update.providers,
            anchor_draft: update.anchor.clone(),
            anchor: update.anchor,
            max_groups: update.max_groups,
            cluster_count: update.scene.cluster_count,
            has_anchor: update.scene.has_anchor,
            base_boxes: update.scene.boxes.clone(),
            boxes: update.scene.boxes,
            viewport,
            search: String::new(),
            expanded: None,
        }
    }

    /// Drop all accumulated pan/zoom by restoring the pristine box set and a
    /// default viewport in one replacement.
    pub(in crate::app) fn reset_view(&mut self) {
        self.boxes = self.base_boxes.clone();
        self.viewport = Viewport::fit(&self.boxes);
    }

    fn show(&mut self, ctx: &Context, recompute: &mut Option<RecomputeRequest>, is_loading: bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("comenta");
                    ui.separator();
                    ui.label(format!("comments: {}", self.comments.len()));
                    ui.label(format!("clusters: {}", self.cluster_count));
                    ui.label(format!("zoom: {:.0}%", self.viewport.zoom_scale * 100.0));
                    if self.has_anchor {
                        ui.label(format!("anchor: {}", self.anchor));
                    }
                    if is_loading {
                        ui.separator();
                        ui.spinner();
                        ui.label("recomputing layout...");
                    }
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui, recompute, is_loading));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_map(ui));

        self.draw_expanded_comment(ctx);
    }
}
