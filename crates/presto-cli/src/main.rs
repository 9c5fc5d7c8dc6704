mod media;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use presto_core::hash::hash_frames;
use presto_core::{Direction, Easing, PrestoConfig, TransitionKind, TransitionSpec};
use presto_render::sequence::render_sequence;
use presto_render::transition::TransitionRegistry;

#[derive(Parser)]
#[command(
    name = "presto",
    version,
    about = "Presto: slide transition renderer",
    long_about = "Presto renders slide transitions between two frames.\nRender to a PNG sequence or an animated GIF, list the available transitions, or validate a config file."
)]
struct Cli {
    /// Path to a presto.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a transition between two images
    Render {
        /// Incoming slide image
        #[arg()]
        next: PathBuf,

        /// Outgoing slide image (omit for a first slide)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Output: a .gif file, or a directory for a PNG sequence
        #[arg(short, long)]
        output: PathBuf,

        /// Transition kind, e.g. fade, push-left, circular-expand
        #[arg(short, long)]
        kind: Option<String>,

        /// Direction: in or out
        #[arg(short, long)]
        direction: Option<String>,

        /// Duration in milliseconds
        #[arg(long)]
        duration_ms: Option<i64>,

        /// Easing id, e.g. linear, cubic, bounce
        #[arg(short, long)]
        easing: Option<String>,

        /// Number of strips for blinds transitions
        #[arg(long)]
        blind_count: Option<u32>,

        /// Output frame rate
        #[arg(long, default_value_t = 50)]
        fps: u32,

        /// Output format: gif or png (auto-detected from the output path if not set)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// List available transitions and easings
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate a config file and print the transition it resolves to
    CheckConfig {
        #[arg()]
        file: PathBuf,
    },

    /// Write a config file with default settings
    InitConfig {
        #[arg(default_value = "presto.toml")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PrestoConfig::load_from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => PrestoConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            next,
            from,
            output,
            kind,
            direction,
            duration_ms,
            easing,
            blind_count,
            fps,
            format,
        } => {
            let overrides = TransitionOverrides {
                kind,
                direction,
                duration_ms,
                easing,
                blind_count,
            };
            cmd_render(&config, &next, from.as_deref(), &output, overrides, fps, format)
        }
        Commands::List { json } => cmd_list(json),
        Commands::CheckConfig { file } => cmd_check_config(&file),
        Commands::InitConfig { file } => cmd_init_config(&file),
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
struct TransitionOverrides {
    kind: Option<String>,
    direction: Option<String>,
    duration_ms: Option<i64>,
    easing: Option<String>,
    blind_count: Option<u32>,
}

/// Blind density is resolved against `frame_height`, the height of the frames
/// actually composited.
fn resolve_spec(config: &PrestoConfig, overrides: TransitionOverrides, frame_height: u32) -> TransitionSpec {
    let mut transition = config.transition.clone();
    if let Some(kind) = overrides.kind {
        transition.kind = kind;
    }
    if let Some(direction) = overrides.direction {
        transition.direction = direction;
    }
    if let Some(ms) = overrides.duration_ms {
        transition.duration_ms = ms;
    }
    if let Some(easing) = overrides.easing {
        transition.easing = easing;
    }
    if let Some(count) = overrides.blind_count {
        transition.blind_count = count;
        transition.blind_density = None;
    }
    transition.resolve(frame_height)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Gif,
    Png,
}

fn output_format(output: &Path, format: Option<&str>) -> Result<OutputFormat> {
    let name = match format {
        Some(f) => f.to_ascii_lowercase(),
        None => output
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_else(|| "png".to_string()),
    };
    match name.as_str() {
        "gif" => Ok(OutputFormat::Gif),
        "png" => Ok(OutputFormat::Png),
        other => anyhow::bail!("unsupported output format '{}': expected gif or png", other),
    }
}

fn cmd_render(
    config: &PrestoConfig,
    next: &Path,
    from: Option<&Path>,
    output: &Path,
    overrides: TransitionOverrides,
    fps: u32,
    format: Option<String>,
) -> Result<()> {
    let format = output_format(output, format.as_deref())?;
    let (width, height) = (config.display.width, config.display.height);

    let next_frame = media::load_image(next).with_context(|| format!("failed to load {}", next.display()))?;
    let next_frame = media::fit_to(&next_frame, width, height);
    let previous = match from {
        Some(path) => {
            let frame = media::load_image(path).with_context(|| format!("failed to load {}", path.display()))?;
            Some(media::fit_to(&frame, width, height))
        }
        None => None,
    };
    let spec = resolve_spec(config, overrides, next_frame.height);

    let frame_count = media::frame_count(spec.duration_ms, fps);
    println!(
        "🎞  Rendering {} ({}) over {}ms, {} frames at {}x{}",
        spec.kind.display_name(),
        spec.direction.id(),
        spec.duration_ms,
        frame_count,
        width,
        height
    );

    let start = Instant::now();
    let frames = render_sequence(&spec, previous.as_ref(), &next_frame, frame_count)?;
    tracing::info!("rendered {} frames in {:.2?}", frames.len(), start.elapsed());

    match format {
        OutputFormat::Gif => media::write_gif(&frames, fps, output)?,
        OutputFormat::Png => {
            let written = media::write_png_sequence(&frames, output)?;
            tracing::info!("wrote {} PNG frames to {}", written.len(), output.display());
        }
    }

    println!("   ✓ Output:  {}", output.display());
    println!("   ✓ Hash:    {}", hash_frames(&frames));
    Ok(())
}

fn cmd_list(json: bool) -> Result<()> {
    let descriptors = TransitionRegistry::descriptors();
    if json {
        let easings: Vec<&str> = Easing::ALL.iter().map(|e| e.id()).collect();
        let listing = serde_json::json!({
            "transitions": descriptors,
            "easings": easings,
        });
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Transitions:");
    for kind in TransitionKind::ALL {
        let directions = if kind.is_swap() { "in" } else { "in, out" };
        println!("   {:<28} {:<28} {}", kind.id(), kind.display_name(), directions);
    }
    println!();
    println!("Easings:");
    for easing in Easing::ALL {
        println!("   {}", easing.id());
    }
    Ok(())
}

fn cmd_check_config(file: &Path) -> Result<()> {
    println!("🔍 Checking {}", file.display());
    let config =
        PrestoConfig::load_from_file(file).with_context(|| format!("failed to load config: {}", file.display()))?;
    println!("   ✓ Parse OK");

    let t = &config.transition;
    let mut warnings = Vec::new();
    if TransitionKind::from_id(&t.kind).is_none() {
        warnings.push(format!("unknown transition '{}', swap will be used", t.kind));
    }
    if Direction::from_id(&t.direction).is_none() {
        warnings.push(format!("unknown direction '{}', in will be used", t.direction));
    }
    if Easing::from_id(&t.easing).is_none() {
        warnings.push(format!("unknown easing '{}', linear will be used", t.easing));
    }
    if t.duration_ms < 0 {
        warnings.push(format!("negative duration {}ms is treated as 0", t.duration_ms));
    }
    for w in &warnings {
        println!("   ⚠️ {}", w);
    }

    let spec = config.transition_spec();
    println!("   Display:    {}x{} (tick {}ms)", config.display.width, config.display.height, config.display.tick_ms);
    println!(
        "   Transition: {} {} {}ms easing={} blinds={}",
        spec.kind.id(),
        spec.direction.id(),
        spec.duration_ms,
        spec.easing.id(),
        spec.blind_count
    );
    println!();
    if warnings.is_empty() {
        println!("   ✅ No problems found.");
    } else {
        println!("   ✅ Valid with {} warning(s).", warnings.len());
    }
    Ok(())
}

fn cmd_init_config(file: &Path) -> Result<()> {
    if file.exists() {
        anyhow::bail!("'{}' already exists", file.display());
    }
    PrestoConfig::default()
        .save_to_file(file)
        .with_context(|| format!("failed to write {}", file.display()))?;
    println!("   ✨ Wrote {}", file.display());
    Ok(())
}
