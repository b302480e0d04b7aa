use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::core::engine::Engine;
use crate::typing::{AppOptions, Dictionaries, GameConfig, SpeedPreset, TypingApp, WordsPerRound};

#[derive(Parser, Debug)]
#[command(name = "wordfall")]
#[command(about = "⌨️  Type the falling words before they hit the bottom")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON word lists to use instead of the built-in ones
    #[arg(long, global = true)]
    pub dictionary_file: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a game (the default)
    Play(PlayArgs),
    /// List available word lists
    List,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// How fast words appear and fall
    #[arg(short, long, value_enum, default_value_t = SpeedPreset::Normal)]
    pub speed: SpeedPreset,

    /// Words in each round
    #[arg(short, long, value_enum, default_value_t = WordsPerRound::Ten)]
    pub words_per_round: WordsPerRound,

    /// Index of the word list to play (see `wordfall list`)
    #[arg(short, long, default_value_t = 0)]
    pub dictionary: usize,

    /// Disable the falling-particle background
    #[arg(long)]
    pub no_background: bool,

    /// Require typing spaces inside phrases
    #[arg(long)]
    pub no_skip_spaces: bool,

    /// Seed for word order and durations, for repeatable games
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let dictionaries = match &cli.dictionary_file {
        Some(path) => Dictionaries::load(path)?,
        None => Dictionaries::embedded()?,
    };

    match cli.command {
        Some(Commands::List) => {
            println!("📚 {} word lists available:", dictionaries.len());
            println!();
            for (i, list) in dictionaries.lists().iter().enumerate() {
                let words: usize = list.rounds.iter().map(Vec::len).sum();
                println!("  {i}. {} ({} rounds, {words} words)", list.name, list.rounds.len());
            }
            Ok(())
        }
        Some(Commands::Play(args)) => play(&dictionaries, args).await,
        None => play(&dictionaries, PlayArgs::default()).await,
    }
}

pub async fn play(dictionaries: &Dictionaries, args: PlayArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let list = dictionaries.get(args.dictionary)?;
    let rounds = dictionaries.prepare(args.dictionary, args.words_per_round.count(), &mut rng)?;
    let config = GameConfig::new(rounds)
        .with_speed(args.speed)
        .with_skip_spaces(!args.no_skip_spaces);

    let options = AppOptions {
        dictionary_name: list.name.clone(),
        speed: args.speed,
        background: !args.no_background,
    };
    info!(dictionary = %options.dictionary_name, speed = %args.speed, seed = ?args.seed, "launching game");
    let app = TypingApp::new(config, rng, options)?;

    let terminal = ratatui::init();
    let result = Engine::new(app).run(terminal).await;
    ratatui::restore();

    let app = result?;
    if let Some(score) = app.scoreboard().final_score() {
        println!("🏁 You typed {score}/{} words", app.scoreboard().total_words());
    }
    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    // The terminal belongs to the UI; without a file there is nowhere to log
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
