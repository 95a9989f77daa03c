use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use spot_core::{Channel, Dimension, EventKind, Position, ViewContext, visible_markers};
use spot_host::{HostConfig, NotificationSink, NullSink, Session};

#[derive(Parser)]
#[command(name = "spot", about = "Replay roster feeds through the logout-spot tracker")]
struct Cli {
    /// Config file (overrides SPOT_CONFIG and the data dir default)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a recorded feed and print notifications and remaining markers
    Replay {
        /// JSONL feed file
        feed: PathBuf,

        /// Print notifications as JSON lines
        #[arg(long)]
        json: bool,

        /// Camera position `x,y,z`; prints the labels visible from it
        #[arg(long)]
        camera: Option<String>,

        /// Camera dimension (overworld, nether, end)
        #[arg(long, default_value = "overworld")]
        dimension: String,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Replay silently and print the marker count
    Status {
        /// JSONL feed file
        feed: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_host_config(cli: &Cli) -> Result<HostConfig> {
    let base_dir = std::env::var("SPOT_DATA_DIR").ok().map(PathBuf::from);
    spot_host::load_config(cli.config.as_deref(), base_dir.as_deref())
        .context("failed to load config")
}

fn open_session(cli: &Cli) -> Result<Session> {
    let host = load_host_config(cli)?;
    Session::from_host_config(&host).context("invalid friends list")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Replay {
            feed,
            json,
            camera,
            dimension,
        } => cmd_replay(&cli, feed, *json, camera.as_deref(), dimension),
        Commands::Config => cmd_config(&cli),
        Commands::Status { feed } => cmd_status(&cli, feed),
    }
}

/// Parse `x,y,z`.
fn parse_camera(s: &str) -> Result<Position> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        bail!("camera must be x,y,z, got '{s}'");
    };
    let axis = |v: &str| {
        v.parse::<f64>()
            .with_context(|| format!("bad camera coordinate '{v}'"))
    };
    Ok(Position::new(axis(*x)?, axis(*y)?, axis(*z)?))
}

fn parse_dimension(s: &str) -> Result<Dimension> {
    match s.to_ascii_lowercase().as_str() {
        "overworld" => Ok(Dimension::Overworld),
        "nether" => Ok(Dimension::Nether),
        "end" => Ok(Dimension::End),
        other => bail!("unknown dimension '{other}'"),
    }
}

/// Prints notifications as they arrive.
struct ConsoleSink {
    json: bool,
}

impl ConsoleSink {
    fn print(&self, channel: Channel, intent: &spot_core::NotificationIntent) {
        if self.json {
            let line = serde_json::json!({ "channel": channel, "intent": intent });
            println!("{line}");
            return;
        }
        match channel {
            Channel::Message => println!("[chat] {}", intent.message()),
            Channel::Sound => {
                let kind = match intent.kind {
                    EventKind::Departure => "departure",
                    EventKind::Return => "return",
                };
                println!("[sound] {kind} {}", intent.display_name);
            }
        }
    }
}

impl NotificationSink for ConsoleSink {
    fn message(&mut self, intent: &spot_core::NotificationIntent) {
        self.print(Channel::Message, intent);
    }

    fn sound(&mut self, intent: &spot_core::NotificationIntent) {
        self.print(Channel::Sound, intent);
    }
}

fn cmd_replay(
    cli: &Cli,
    feed: &Path,
    json: bool,
    camera: Option<&str>,
    dimension: &str,
) -> Result<()> {
    let mut session = open_session(cli)?;
    let frames = spot_host::read_feed(feed).context("failed to read feed")?;
    let view = camera
        .map(|c| -> Result<ViewContext> {
            Ok(ViewContext {
                camera: parse_camera(c)?,
                dimension: parse_dimension(dimension)?,
                view_distance_chunks: session.config().view_distance_chunks,
            })
        })
        .transpose()?;

    let mut sink = ConsoleSink { json };
    let outcomes = session.replay(frames, &mut sink);
    tracing::debug!(cycles = outcomes.len(), "replay finished");

    if json {
        return Ok(());
    }

    println!("markers: {}", session.marker_count());
    for m in session.markers().all() {
        let (x, y, z) = m.position.block();
        println!(
            "  {} {} at {x}, {y}, {z} ({}) vitals {}/{}",
            m.identity, m.display_name, m.dimension, m.vital_value, m.max_vital
        );
    }

    if let Some(view) = view {
        let visible = visible_markers(session.markers(), &view);
        println!("visible: {}", visible.len());
        for v in visible {
            let c = v.label.vitals_color;
            println!(
                "  {} {} #{:02x}{:02x}{:02x}",
                v.label.name, v.label.vitals_text, c.r, c.g, c.b
            );
        }
    }
    Ok(())
}

fn cmd_config(cli: &Cli) -> Result<()> {
    let host = load_host_config(cli)?;
    let text = toml::to_string(&host).context("failed to serialize config")?;
    print!("{text}");
    Ok(())
}

fn cmd_status(cli: &Cli, feed: &Path) -> Result<()> {
    let mut session = open_session(cli)?;
    let frames = spot_host::read_feed(feed).context("failed to read feed")?;
    session.replay(frames, &mut NullSink);
    println!("markers: {}", session.marker_count());
    Ok(())
}
