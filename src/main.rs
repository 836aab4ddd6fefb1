use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use highlight_overlay::cli::{Cli, Command, RenderArgs, SimulateArgs};
use highlight_overlay::core::{
    rasterizer, EventBinder, FlagBinding, MemoryDisplay, PngDataUriEncoder, RenderOutcome,
    SharedViewport, ViewportProbe,
};
use highlight_overlay::{Bounds, HighlighterBuilder, OverlayConfig, OverlayOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = match &cli.command.overlay().config {
        Some(path) => load_options(path)?,
        None => OverlayOptions::default(),
    };
    let mut config = OverlayConfig::from_options(&options);
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    env_logger::Builder::new()
        .filter_level(config.log_level.filter())
        .parse_default_env()
        .init();

    match cli.command {
        Command::Render(args) => run_render(args, config),
        Command::Simulate(args) => run_simulate(args, config),
    }
}

fn load_options(path: &Path) -> Result<OverlayOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading options from {}", path.display()))?;
    OverlayOptions::from_json_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_targets(path: &Path) -> Result<Vec<Bounds>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading targets from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing targets in {}", path.display()))
}

fn run_render(args: RenderArgs, config: OverlayConfig) -> Result<()> {
    let targets = load_targets(&args.overlay.targets)?;
    let (width, height) = (args.overlay.width, args.overlay.height);

    let image = match rasterizer::render(&targets, width, height, &config, &PngDataUriEncoder) {
        RenderOutcome::Image(image) => image,
        RenderOutcome::Empty => bail!("no targets to highlight"),
        RenderOutcome::Failed => bail!("overlay image could not be encoded"),
    };

    match args.out {
        Some(path) => {
            fs::write(&path, image.payload()?)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}x{} overlay to {}", image.width, image.height, path.display());
        }
        None => println!("{}", image.data_uri),
    }

    Ok(())
}

fn run_simulate(args: SimulateArgs, config: OverlayConfig) -> Result<()> {
    let targets = load_targets(&args.overlay.targets)?;
    let (mut width, mut height) = (args.overlay.width, args.overlay.height);

    let viewport = SharedViewport::new(width as f64, height as f64);
    let binding = FlagBinding::new("resize");
    let display = MemoryDisplay::new();

    let mut overlay = HighlighterBuilder::new(display.clone())
        .config(config)
        .viewport(ViewportProbe::new().with_source(viewport.clone()))
        .events(EventBinder::new().with_mechanism(binding.clone()))
        .build::<Bounds>();

    overlay.init(targets);
    overlay.show_highlight();

    for _ in 0..args.resizes {
        width += args.grow;
        height += args.grow;
        viewport.resize(width as f64, height as f64);

        if binding.is_bound() {
            overlay.on_resize();
        }
        overlay.tick(args.interval);
    }

    // Let the trailing render come due
    let delay = overlay.config().resize_delay_secs();
    while overlay.pending_renders() > 0 {
        overlay.tick(delay);
    }

    let stats = overlay.stats();
    println!("Resize events:     {}", overlay.epoch());
    println!("Renders applied:   {}", stats.renders);
    println!("Superseded:        {}", stats.superseded);
    println!("Placeholders:      {}", stats.placeholders);
    println!("Empty / failed:    {} / {}", stats.empty, stats.failed);

    if let Some(panel) = display.latest() {
        let state = panel.snapshot();
        println!(
            "Panel:             attached={} image_updates={} final_size={}x{}",
            state.attached, state.image_updates, width, height
        );
    }

    overlay.clear();
    Ok(())
}
