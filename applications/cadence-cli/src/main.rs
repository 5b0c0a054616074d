/// Cadence - terminal playlist player
use anyhow::Context;
use cadence_cli::{
    config::AppConfig,
    engine::{track_length, RodioFactory},
    session::render_playlist,
    tracks::build_playlist,
    ChannelListener, Command, Input, Reply, Session,
};
use clap::{Parser, Subcommand};
use std::{
    io::{self, BufRead},
    path::PathBuf,
    sync::{mpsc, Arc},
    thread,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Play a list of audio files from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./cadence.toml if present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play files in order and accept commands on stdin
    Play {
        /// Audio files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Start with shuffle on
        #[arg(long)]
        shuffle: bool,
        /// Start with repeat on
        #[arg(long)]
        repeat: bool,
        /// Initial volume (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        volume: Option<u8>,
    },
    /// Print the playlist the given files would make
    List {
        /// Audio files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    // Initialize tracing
    let default_filter = config.logging.filter.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Play {
            files,
            shuffle,
            repeat,
            volume,
        } => {
            config.apply_overrides(shuffle, repeat, volume);
            config.validate()?;
            play(&files, &config)?;
        }
        Commands::List { files } => {
            let playlist = build_playlist(&files, track_length)?;
            println!("{}", render_playlist(&playlist));
        }
    }

    Ok(())
}

fn play(files: &[PathBuf], config: &AppConfig) -> anyhow::Result<()> {
    let playlist = build_playlist(files, track_length)?;
    let factory = RodioFactory::try_default().context("No usable audio output")?;

    let (tx, rx) = mpsc::channel();
    let listener = Arc::new(ChannelListener::new(tx.clone()));
    let mut session = Session::new(playlist, factory, &config.playback, listener);

    tracing::info!(
        tracks = files.len(),
        shuffle = config.playback.shuffle,
        repeat = config.playback.repeat,
        "Starting Cadence"
    );

    session.execute(Command::Play)?;
    println!("{}", session.status());
    println!("Type `help` for commands.");

    spawn_stdin_reader(tx);

    for input in rx {
        match input {
            Input::Line(line) if line.trim().is_empty() => {}
            Input::Line(line) => match line.parse::<Command>() {
                Ok(command) => match session.execute(command) {
                    Ok(Reply::Quit) => break,
                    Ok(Reply::Text(text)) => println!("{}", text),
                    Err(err) => {
                        tracing::warn!(error = %err, ?command, "Command failed");
                        eprintln!("{}", err);
                    }
                },
                Err(err) => eprintln!("{}", err),
            },
            Input::Event(event) => {
                if let Err(err) = session.on_event(&event) {
                    tracing::warn!(error = %err, "Could not follow engine event");
                }
            }
            Input::Closed => {
                session.shutdown()?;
                break;
            }
        }
    }

    tracing::info!("Playback session ended");
    Ok(())
}

/// Forward stdin lines to the main loop until EOF
fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Closed);
    });
}
