use std::path::PathBuf;

use clap::Parser;
use comenta::app::{AppConfig, CommentMapApp};
use comenta::scene::DEFAULT_MAX_GROUPS;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with the comments to map.
    comments: PathBuf,

    /// Term to arrange comments around by similarity.
    #[arg(long, default_value = "")]
    anchor: String,

    /// JSON file mapping each comment to a precomputed embedding vector.
    #[arg(long)]
    embeddings: Option<PathBuf>,

    /// Upper bound on the number of comment groups.
    #[arg(long, default_value_t = DEFAULT_MAX_GROUPS)]
    clusters: usize,

    /// Seed for deterministic layouts.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let config = AppConfig {
        comments_path: args.comments,
        embeddings_path: args.embeddings,
        anchor: args.anchor,
        clusters: args.clusters,
        seed: args.seed,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "comenta",
        options,
        Box::new(move |cc| Ok(Box::new(CommentMapApp::new(cc, config)))),
    )
}
