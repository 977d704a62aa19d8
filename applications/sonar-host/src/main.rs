/// Sonar Host - spatial navigation cues for screen readers
use anyhow::Context;
use clap::{Parser, Subcommand};
use sonar_audio::AudioStage;
use sonar_audio_desktop::CpalSpatialOutput;
use sonar_catalog::SoundCatalog;
use sonar_core::{CanvasSize, ControlDescriptor, Role, ScreenRect, State};
use sonar_host::{HostConfig, HostEvent, JsonFileSettings, Navigator};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sonar-host")]
#[command(about = "Spatial audio cues for screen reader navigation", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./sonar.toml if present)
    #[arg(short, long, global = true, env = "SONAR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read JSON events from stdin and play cues on the default device
    Listen,
    /// Print the audio-space position of a rectangle
    Position {
        /// Rectangle as x,y,width,height
        #[arg(long, value_parser = parse_rect)]
        rect: Option<ScreenRect>,
        /// Canvas as width,height
        #[arg(long, value_parser = parse_canvas)]
        canvas: CanvasSize,
    },
    /// Print the sounds for a control
    Resolve {
        /// Role name, e.g. check_box
        #[arg(short, long)]
        role: Role,
        /// State names, e.g. --state checked --state focused
        #[arg(short, long = "state")]
        states: Vec<State>,
        /// Heading level (1-6)
        #[arg(short, long)]
        level: Option<u8>,
    },
    /// Manage custom sounds
    Overrides {
        #[command(subcommand)]
        action: OverrideAction,
    },
    /// List every control key with its default sound
    Keys,
}

#[derive(Subcommand)]
enum OverrideAction {
    /// List custom sounds
    List,
    /// Use a mono WAV file for a control key
    Set {
        key: String,
        /// Absolute path to the sound
        path: PathBuf,
    },
    /// Go back to the built-in sound for a control key
    Clear { key: String },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sonar_host=info,sonar_audio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = HostConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Listen => listen(&config)?,
        Commands::Position { rect, canvas } => {
            let stage = AudioStage::new(config.audio.half_width, config.audio.depth);
            let p = stage.position_for(rect.as_ref(), canvas);
            println!("{:.3} {:.3} {:.3}", p.x, p.y, p.z);
        }
        Commands::Resolve {
            role,
            states,
            level,
        } => {
            let mut descriptor = ControlDescriptor::new(role).with_states(states);
            if let Some(level) = level {
                descriptor = descriptor.with_heading_level(level);
            }
            for sound in catalog(&config).resolve(&descriptor) {
                println!("{sound}");
            }
        }
        Commands::Overrides { action } => overrides(&config, action)?,
        Commands::Keys => {
            for info in SoundCatalog::control_keys() {
                println!("{:<16} {:<24} {}", info.key, info.display_name, info.default_sound);
            }
        }
    }

    Ok(())
}

fn catalog(config: &HostConfig) -> SoundCatalog {
    SoundCatalog::new(Arc::new(JsonFileSettings::new(&config.paths.settings_file)))
}

fn listen(config: &HostConfig) -> anyhow::Result<()> {
    let output =
        CpalSpatialOutput::new(config.audio.half_width).context("Failed to open audio output")?;
    let navigator = Navigator::from_config(config, Arc::new(output));

    tracing::info!("Listening for events on stdin");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<HostEvent>(&line) {
            Ok(event) => serde_json::to_string(&navigator.handle(event))?,
            Err(e) => {
                tracing::warn!("Ignoring malformed event: {}", e);
                serde_json::json!({ "outcome": "error", "message": e.to_string() }).to_string()
            }
        };

        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }

    Ok(())
}

fn overrides(config: &HostConfig, action: OverrideAction) -> anyhow::Result<()> {
    let catalog = catalog(config);

    match action {
        OverrideAction::List => {
            for (key, path) in catalog.list_overrides() {
                println!("{key} = {path}");
            }
        }
        OverrideAction::Set { key, path } => match catalog.set_override(&key, &path) {
            Ok(accepted) => {
                if let Some(warning) = accepted.warning {
                    eprintln!("{warning}");
                }
                println!("{key} = {}", path.display());
            }
            Err(e) => anyhow::bail!("{}", e.reason()),
        },
        OverrideAction::Clear { key } => {
            if catalog.clear_override(&key)? {
                println!("{key} reset to default");
            } else {
                println!("{key} had no custom sound");
            }
        }
    }

    Ok(())
}

fn parse_numbers<const N: usize>(value: &str) -> Result<[i32; N], String> {
    let parts: Vec<i32> = value
        .split(',')
        .map(|part| part.trim().parse::<i32>().map_err(|e| e.to_string()))
        .collect::<Result<_, _>>()?;

    parts
        .try_into()
        .map_err(|_| format!("expected {N} comma-separated numbers"))
}

fn parse_rect(value: &str) -> Result<ScreenRect, String> {
    let [x, y, width, height] = parse_numbers::<4>(value)?;
    Ok(ScreenRect::new(x, y, width, height))
}

fn parse_canvas(value: &str) -> Result<CanvasSize, String> {
    let [width, height] = parse_numbers::<2>(value)?;
    Ok(CanvasSize::new(width, height))
}
