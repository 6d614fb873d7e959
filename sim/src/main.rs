//! Headless match simulator
//!
//! Plays seeded matches with the built-in action selector on both sides and
//! prints a summary. Run with: `cargo run -p gembattle-sim -- --matches 1000`

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use gembattle_core::engine::validate_roster;
use gembattle_core::{random_roster, BattleSession, Kind, MatchOutcome, Side, XorShiftRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Headless gem battle simulator
#[derive(Parser, Debug)]
#[command(name = "gembattle-sim")]
#[command(about = "Simulate seeded 3v3 gem battles", long_about = None)]
#[command(version)]
struct Args {
    /// Player roster as kind codes, e.g. "RW,EA,TB" (random per match if omitted)
    #[arg(short, long, value_name = "CODES")]
    player: Option<String>,

    /// Opponent roster as kind codes (random per match if omitted)
    #[arg(short, long, value_name = "CODES")]
    opponent: Option<String>,

    /// Number of matches to play
    #[arg(short, long, default_value_t = 100)]
    matches: u64,

    /// Base seed; match `i` uses `seed + i`
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Give up on a match after this many rounds
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,

    /// Print the full battle log of the first match
    #[arg(long)]
    show_log: bool,

    /// Replay every match and fail if the final state differs
    #[arg(long)]
    check_determinism: bool,
}

#[derive(Debug)]
struct MatchRecord {
    seed: u64,
    player: Vec<Kind>,
    opponent: Vec<Kind>,
    outcome: Option<MatchOutcome>,
    rounds: u32,
    log: Vec<String>,
    /// SCALE-encoded final state
    encoded: Vec<u8>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct KindStats {
    appearances: u64,
    wins: u64,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    matches: u64,
    player_wins: u64,
    opponent_wins: u64,
    draws: u64,
    unfinished: u64,
    average_rounds: f64,
    by_kind: BTreeMap<&'static str, KindStats>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_roster(codes: &str) -> Result<Vec<Kind>> {
    let kinds = codes
        .split(',')
        .map(|code| {
            let code = code.trim();
            Kind::from_code(code).ok_or_else(|| anyhow!("unknown kind code '{}'", code))
        })
        .collect::<Result<Vec<_>>>()?;
    validate_roster(&kinds).with_context(|| format!("invalid roster '{}'", codes))?;
    Ok(kinds)
}

fn play_match(
    seed: u64,
    player: Option<&[Kind]>,
    opponent: Option<&[Kind]>,
    max_rounds: u32,
) -> Result<MatchRecord> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let player = player.map_or_else(|| random_roster(&mut rng), <[Kind]>::to_vec);
    let opponent = opponent.map_or_else(|| random_roster(&mut rng), <[Kind]>::to_vec);

    let mut session = BattleSession::new(&player, &opponent)?;
    while !session.is_match_over() && session.round() <= max_rounds {
        session.submit_auto(Side::Player, &mut rng)?;
        session.submit_auto(Side::Opponent, &mut rng)?;
        session.resolve_round(&mut rng)?;
    }
    log::debug!(
        "seed {} finished after {} rounds: {:?}",
        seed,
        session.round() - 1,
        session.outcome()
    );

    Ok(MatchRecord {
        seed,
        player,
        opponent,
        outcome: session.outcome(),
        rounds: session.round() - 1,
        log: session.log().to_vec(),
        encoded: session.encoded_state(),
    })
}

fn summarize(records: &[MatchRecord]) -> Summary {
    let mut summary = Summary {
        matches: records.len() as u64,
        ..Default::default()
    };
    let mut total_rounds = 0u64;

    for record in records {
        total_rounds += u64::from(record.rounds);
        match record.outcome {
            Some(MatchOutcome::PlayerVictory) => summary.player_wins += 1,
            Some(MatchOutcome::OpponentVictory) => summary.opponent_wins += 1,
            Some(MatchOutcome::Draw) => summary.draws += 1,
            None => summary.unfinished += 1,
        }
        let winner = record.outcome.and_then(MatchOutcome::winner);
        for (side, roster) in [(Side::Player, &record.player), (Side::Opponent, &record.opponent)] {
            for kind in roster {
                let stats = summary.by_kind.entry(kind.code()).or_default();
                stats.appearances += 1;
                if winner == Some(side) {
                    stats.wins += 1;
                }
            }
        }
    }

    if !records.is_empty() {
        summary.average_rounds = total_rounds as f64 / records.len() as f64;
    }
    summary
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let player = args.player.as_deref().map(parse_roster).transpose()?;
    let opponent = args.opponent.as_deref().map(parse_roster).transpose()?;

    let records = (0..args.matches)
        .into_par_iter()
        .map(|i| {
            play_match(
                args.seed.wrapping_add(i),
                player.as_deref(),
                opponent.as_deref(),
                args.max_rounds,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    if args.check_determinism {
        records.par_iter().try_for_each(|record| -> Result<()> {
            let replay = play_match(
                record.seed,
                player.as_deref(),
                opponent.as_deref(),
                args.max_rounds,
            )?;
            if replay.encoded != record.encoded || replay.log != record.log {
                bail!("seed {} diverged on replay", record.seed);
            }
            Ok(())
        })?;
        log::info!("all {} matches replayed identically", records.len());
    }

    if args.show_log {
        if let Some(first) = records.first() {
            println!("# seed {}", first.seed);
            for line in &first.log {
                println!("{}", line);
            }
            println!();
        }
    }

    let summary = summarize(&records);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
