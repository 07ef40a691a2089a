mod analysis;
mod app;
mod config;
mod input;
mod lyrics;
mod player;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lyrasync", version, about = "Synchronized lyrics companion for the terminal")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Search LRCLIB and print matching tracks (headless).
    Search { query: String },
    /// Print the parsed lyric timeline of a track (headless).
    Lyrics {
        artist: String,
        title: String,
        /// Mark the line active at this position, in seconds.
        #[arg(long)]
        at: Option<f64>,
        /// Print normalized LRC text instead of the annotated timeline.
        #[arg(long, conflicts_with = "at")]
        lrc: bool,
    },
    /// Ask the model what a song means (headless).
    Analyze { artist: String, title: String },
    /// Ask the model for similar songs (headless).
    Similar { artist: String, title: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            init_file_logging(&cfg.paths.data_dir)?;
            let mut app = app::App::new(cfg.clone())?;
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Search { query } => {
            init_stderr_logging();
            let client = lyrics::LrclibClient::new(&cfg.lrclib)?;
            let tracks = client.search(&query).await;
            if tracks.is_empty() {
                println!("No tracks found.");
            }
            print_tracks(&tracks);
        }
        Command::Lyrics {
            artist,
            title,
            at,
            lrc,
        } => {
            init_stderr_logging();
            let client = lyrics::LrclibClient::new(&cfg.lrclib)?;
            let Some(track) = client.fetch(&artist, &title).await else {
                println!("Track not found.");
                return Ok(());
            };
            match lyrics::Lyrics::from_track(&track) {
                lyrics::Lyrics::Synced(lines) if lrc => {
                    println!("{}", lyrics::parser::to_lrc(&lines))
                }
                _ => print_lyrics(&track, at),
            }
        }
        Command::Analyze { artist, title } => {
            init_stderr_logging();
            let client = lyrics::LrclibClient::new(&cfg.lrclib)?;
            let analysis = analysis::AnalysisClient::new(&cfg.analysis)?;
            let Some(track) = client.fetch(&artist, &title).await else {
                println!("Track not found.");
                return Ok(());
            };
            let Some(text) = lyrics::Lyrics::source_text(&track) else {
                println!("No lyrics to analyze.");
                return Ok(());
            };
            println!(
                "{}",
                analysis.analyze(text, &track.track_name, &track.artist_name).await
            );
        }
        Command::Similar { artist, title } => {
            init_stderr_logging();
            let analysis = analysis::AnalysisClient::new(&cfg.analysis)?;
            println!("{}", analysis.recommend(&title, &artist).await);
        }
    }

    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

/// The TUI owns the terminal, so logs go to a file in the data dir.
fn init_file_logging(data_dir: &std::path::Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("create dir {}", data_dir.display()))?;
    let path = data_dir.join("lyrasync.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();
    Ok(())
}

fn print_tracks(tracks: &[lyrics::Track]) {
    for (i, t) in tracks.iter().enumerate() {
        let kind = if t.instrumental {
            "instrumental"
        } else if t.synced_lyrics.is_some() {
            "synced"
        } else if t.plain_lyrics.is_some() {
            "plain"
        } else {
            "no lyrics"
        };
        let duration = t.duration.map(player::format_clock).unwrap_or_default();
        println!(
            "{:02}. {} - {}  [{}] {}  (id={})",
            i + 1,
            t.track_name,
            t.artist_name,
            kind,
            duration,
            t.id
        );
    }
}

fn print_lyrics(track: &lyrics::Track, at: Option<f64>) {
    println!("{} - {}", track.track_name, track.artist_name);
    match lyrics::Lyrics::from_track(track) {
        lyrics::Lyrics::Synced(lines) => {
            let active = at.and_then(|t| lyrics::active_index(&lines, t));
            for (i, line) in lines.iter().enumerate() {
                let marker = match lyrics::LineState::classify(active, i) {
                    lyrics::LineState::Current => ">",
                    lyrics::LineState::Past | lyrics::LineState::Future => " ",
                };
                println!(
                    "{marker} [{}] {}",
                    lyrics::parser::format_timestamp(line.time),
                    line.text
                );
            }
        }
        lyrics::Lyrics::Plain(lines) => {
            println!("(unsynced)");
            for line in lines {
                println!("  {line}");
            }
        }
        lyrics::Lyrics::Missing if track.instrumental => println!("Instrumental."),
        lyrics::Lyrics::Missing => println!("No lyrics available."),
    }
}
