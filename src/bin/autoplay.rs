//! Play a full match with four automated seats and log every hand.

use anyhow::Context;
use clap::Parser;
use rust_mahjong::{Board, HandEnd, TableConfig, TableObserver, TableView};

#[derive(Parser)]
#[command(author, version, about = "Play an automated Mahjong match", long_about = None)]
struct Args {
    /// Wall shuffle seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Prevailing winds to play (1 = East only).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    winds: u8,

    /// Log every decision.
    #[arg(short, long)]
    verbose: bool,

    /// Print the resolved config and exit.
    #[arg(long)]
    dump_config: bool,
}

/// Logs the discard pool at the end of each hand.
struct PoolLogger {
    last: Option<TableView>,
}

impl TableObserver for PoolLogger {
    fn on_view(&mut self, view: &TableView) {
        self.last = Some(view.clone());
    }

    fn on_hand_ended(&mut self, _outcome: &rust_mahjong::HandOutcome) {
        if let Some(view) = &self.last {
            let pool: Vec<String> = view.discards.iter().map(|t| t.to_string()).collect();
            log::debug!("discards: {}", pool.join(" "));
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = TableConfig::new().with_seed(args.seed).with_winds(args.winds);
    if args.dump_config {
        println!("{:?}", config);
        return Ok(());
    }

    let mut board = Board::with_auto_players(config);
    board.add_observer(Box::new(PoolLogger { last: None }));

    let (round, outcomes) = board.play_match().context("match aborted by a seat policy")?;

    let wins = outcomes
        .iter()
        .filter(|o| matches!(o.end, HandEnd::Win { .. }))
        .count();
    log::info!(
        "{} hands played: {} won, {} exhausted",
        round.hands_played,
        wins,
        outcomes.len() - wins
    );
    Ok(())
}
