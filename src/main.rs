use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tethari::engines::engine_minimax::{MinimaxEngine, ScorerKind};
use tethari::engines::engine_random::RandomEngine;
use tethari::engines::engine_trait::{Engine, GoParams};
use tethari::errors::GameResult;
use tethari::game_state::game_state::{GameState, PositionSetup};
use tethari::game_state::game_types::Player;
use tethari::move_generation::perft::perft;
use tethari::utils::match_harness::{play_engine_match_series, MatchConfig, MatchSeriesConfig};
use tethari::utils::move_log::format_move_log;
use tethari::utils::notation::{move_notation, parse_move_token, tokenize_moves};
use tethari::utils::render_game_state::{render_game_state, render_status};

#[derive(Debug, Parser)]
#[command(name = "tethari", about = "Tethari rules engine and alpha-beta opponent")]
struct Args {
    /// Tracing filter used when RUST_LOG is not set (e.g. info, debug, tethari=trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Seed for engine tie-breaking; omitted means OS entropy
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON position setup to start from instead of the standard formation
    #[arg(long, global = true)]
    position: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScorerOpt {
    Standard,
    Material,
}

impl From<ScorerOpt> for ScorerKind {
    fn from(value: ScorerOpt) -> Self {
        match value {
            ScorerOpt::Standard => ScorerKind::Standard,
            ScorerOpt::Material => ScorerKind::Material,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OpponentOpt {
    Minimax,
    Random,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play against the engine on the terminal, entering moves like c3-d4
    Play {
        #[arg(long, default_value_t = 3)]
        depth: u8,
        /// Side the human plays
        #[arg(long, value_enum, default_value_t = SideOpt::White)]
        side: SideOpt,
        #[arg(long, value_enum, default_value_t = ScorerOpt::Standard)]
        scorer: ScorerOpt,
    },
    /// Engine-vs-engine series from the standard formation
    Selfplay {
        #[arg(long, default_value_t = 3)]
        depth: u8,
        #[arg(long, default_value_t = 4)]
        games: u16,
        #[arg(long, default_value_t = 300)]
        max_plies: u16,
        /// Engine facing the minimax engine
        #[arg(long, value_enum, default_value_t = OpponentOpt::Minimax)]
        opponent: OpponentOpt,
    },
    /// Print the engine's move for a position
    Suggest {
        #[arg(long, default_value_t = 3)]
        depth: u8,
        /// Moves to play before searching, e.g. "1. d2-d3 c5-c4 2. ..."
        #[arg(long)]
        moves: Option<String>,
        #[arg(long)]
        movetime_ms: Option<u64>,
        #[arg(long, value_enum, default_value_t = ScorerOpt::Standard)]
        scorer: ScorerOpt,
    },
    /// Count reachable positions to a fixed depth
    Perft {
        #[arg(long, default_value_t = 3)]
        depth: u8,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideOpt {
    White,
    Black,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_start_state(position: Option<&PathBuf>) -> GameResult<GameState> {
    match position {
        None => Ok(GameState::new_game()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let setup = PositionSetup::from_json_str(&text)?;
            info!(path = %path.display(), pieces = setup.pieces.len(), "loaded position");
            Ok(GameState::from_setup(&setup))
        }
    }
}

fn minimax_engine(depth: u8, scorer: ScorerKind, seed: Option<u64>) -> MinimaxEngine {
    let engine = MinimaxEngine::new_with_scorer(depth, scorer);
    match seed {
        Some(seed) => engine.with_seed(seed),
        None => engine,
    }
}

fn apply_move_list(state: &mut GameState, text: &str) -> GameResult<()> {
    for token in tokenize_moves(text) {
        let mv = parse_move_token(token)?;
        state.execute_move(mv)?;
    }
    Ok(())
}

fn run_play(
    mut state: GameState,
    depth: u8,
    human: Player,
    scorer: ScorerKind,
    seed: Option<u64>,
) -> GameResult<()> {
    let mut engine = minimax_engine(depth, scorer, seed);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", render_game_state(&state));
        println!("{}", render_status(&state));
        if state.game_over {
            break;
        }

        if state.active_player == human {
            print!("{} > ", state.active_player);
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let input = line.trim();
            match input {
                "" => continue,
                "quit" | "exit" => break,
                "log" => {
                    println!("{}", format_move_log(&state.move_log));
                    continue;
                }
                _ => {}
            }
            match parse_move_token(input).and_then(|mv| state.execute_move(mv)) {
                Ok(record) => println!("you: {}", move_notation(&record)),
                Err(err) => println!("{err}"),
            }
        } else {
            let out = engine.choose_move(&state, &GoParams::default())?;
            let Some(mv) = out.best_move else {
                println!("{} has no move", state.active_player);
                break;
            };
            let record = state.execute_move(mv)?;
            println!("engine: {}", move_notation(&record));
        }
    }

    println!("{}", format_move_log(&state.move_log));
    Ok(())
}

fn run_selfplay(
    depth: u8,
    games: u16,
    max_plies: u16,
    opponent: OpponentOpt,
    seed: Option<u64>,
) -> GameResult<()> {
    let base_seed = seed.unwrap_or(0);
    let config = MatchSeriesConfig {
        games,
        base_seed,
        per_game: MatchConfig {
            max_plies,
            go_params: GoParams {
                depth: Some(depth),
                movetime_ms: None,
            },
            ..MatchConfig::default()
        },
    };

    let stats = play_engine_match_series(
        || Box::new(MinimaxEngine::new(depth).with_seed(base_seed)) as Box<dyn Engine>,
        || match opponent {
            OpponentOpt::Minimax => {
                Box::new(MinimaxEngine::new(depth).with_seed(base_seed ^ 1)) as Box<dyn Engine>
            }
            OpponentOpt::Random => {
                Box::new(RandomEngine::with_seed(base_seed ^ 1)) as Box<dyn Engine>
            }
        },
        config,
    )?;

    for (i, outcome) in stats.outcomes.iter().enumerate() {
        println!("game {}: {:?}", i + 1, outcome);
    }
    println!("{}", stats.report());
    Ok(())
}

fn run_suggest(
    mut state: GameState,
    depth: u8,
    moves: Option<&str>,
    movetime_ms: Option<u64>,
    scorer: ScorerKind,
    seed: Option<u64>,
) -> GameResult<()> {
    if let Some(text) = moves {
        apply_move_list(&mut state, text)?;
    }
    println!("{}", render_game_state(&state));

    let mut engine = minimax_engine(depth, scorer, seed);
    let out = engine.choose_move(
        &state,
        &GoParams {
            depth: Some(depth),
            movetime_ms,
        },
    )?;
    for line in &out.info_lines {
        println!("info {line}");
    }
    match out.best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
    Ok(())
}

fn run(args: Args) -> GameResult<()> {
    let state = load_start_state(args.position.as_ref())?;
    match args.command {
        Command::Play {
            depth,
            side,
            scorer,
        } => {
            let human = match side {
                SideOpt::White => Player::White,
                SideOpt::Black => Player::Black,
            };
            run_play(state, depth, human, scorer.into(), args.seed)
        }
        Command::Selfplay {
            depth,
            games,
            max_plies,
            opponent,
        } => run_selfplay(depth, games, max_plies, opponent, args.seed),
        Command::Suggest {
            depth,
            moves,
            movetime_ms,
            scorer,
        } => run_suggest(
            state,
            depth,
            moves.as_deref(),
            movetime_ms,
            scorer.into(),
            args.seed,
        ),
        Command::Perft { depth } => {
            for d in 1..=depth {
                let counts = perft(&state, d);
                println!(
                    "depth {d}: nodes {} captures {} promotions {} deaths {} game_ends {}",
                    counts.nodes, counts.captures, counts.promotions, counts.deaths, counts.game_ends
                );
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "tethari failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
