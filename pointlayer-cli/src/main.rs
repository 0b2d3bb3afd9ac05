//! PointLayer CLI - Command-line interface
//!
//! Replaces the original demo's windowed shell: assembles the application,
//! composes icon sub-layers for one or more viewports, and reports the
//! result as structured logs or JSON on stdout.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pointlayer::app::{AppConfig, AppError, PointLayerApp};
use pointlayer::geom::Position;
use pointlayer::view::{ViewState, Viewport};

/// Tuning preset matching one of the original demo variants.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    /// 500k points, 20ms simulated fetch delay, stride factor 1.
    Fast,
    /// 2M points, 200ms simulated fetch delay, stride factor 100.
    Slow,
}

#[derive(Debug, Parser)]
#[command(name = "pointlayer", version, about = "Tiled point-data subsampling demo")]
struct Cli {
    /// Tuning preset to start from.
    #[arg(long, value_enum, default_value = "fast")]
    variant: Variant,

    /// Override the dataset size.
    #[arg(long)]
    points: Option<usize>,

    /// Seed the dataset RNG for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the simulated fetch delay in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Override the subsample stride factor.
    #[arg(long)]
    subsample: Option<u32>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Camera zoom (fractional; the demo range is -7..0).
    #[arg(long, default_value_t = -7.0, allow_hyphen_values = true)]
    zoom: f64,

    /// Camera target x in world units.
    #[arg(long, default_value_t = 13_000.0)]
    target_x: f64,

    /// Camera target y in world units.
    #[arg(long, default_value_t = 13_000.0)]
    target_y: f64,

    /// Compose once per integer zoom from min_zoom to max_zoom instead of
    /// a single viewport.
    #[arg(long)]
    sweep: bool,

    /// Emit the composed layers as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        let mut config = match self.variant {
            Variant::Fast => AppConfig::fast(),
            Variant::Slow => AppConfig::slow(),
        };
        if let Some(points) = self.points {
            config = config.with_point_count(points);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            config = config.with_delay(Duration::from_millis(delay_ms));
        }
        if let Some(factor) = self.subsample {
            config = config.with_subsample_factor(factor);
        }
        config
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = cli.app_config();
    let min_zoom = config.layer.min_zoom;
    let max_zoom = config.layer.max_zoom;

    let app = PointLayerApp::start(config)?;

    let zooms: Vec<f64> = if cli.sweep {
        (min_zoom..=max_zoom).map(f64::from).collect()
    } else {
        vec![cli.zoom]
    };

    let target = Position::new(cli.target_x, cli.target_y);
    let mut all_layers = Vec::new();

    for zoom in zooms {
        let viewport = Viewport::new(ViewState::new(target, zoom), cli.width, cli.height);
        let layers = app.render(&viewport).await;

        for layer in &layers {
            info!(
                id = %layer.id,
                col = layer.tile.col,
                row = layer.tile.row,
                tile_zoom = layer.tile.zoom,
                points = layer.points.len(),
                "composed icon sub-layer"
            );
        }
        info!(zoom, sub_layers = layers.len(), "viewport composed");
        all_layers.extend(layers);
    }

    if cli.json {
        // Layer descriptions on stdout, logs stay on stderr.
        match serde_json::to_string_pretty(&all_layers) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("failed to serialize layers: {}", e),
        }
    }

    info!("telemetry: {}", app.telemetry());
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
