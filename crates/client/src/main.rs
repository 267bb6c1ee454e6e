//! Dungeon game client binary.
//!
//! Composition root: configuration, logging, content, then a line-based
//! input loop over a [`Session`].
//!
//! ```bash
//! DUNGEON_WEAPON=bow cargo run -p dungeon-client
//! RUST_LOG=debug cargo run -p dungeon-client
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use dungeon_client::{ClientConfig, Command, HELP, Session, SessionError, logging};
use game_content::ContentFactory;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config.session_id)?;

    tracing::info!("Starting Dungeon client");
    tracing::info!("Content dir: {}", config.content_dir.display());
    tracing::info!("Weapon: {:?}", config.weapon);

    let factory = ContentFactory::new(&config.content_dir);
    let bundle = factory
        .load_bundle(&config.map, &config.monster)
        .context("Failed to load game content")?;

    let player = Session::default_player(config.weapon.clone());
    let mut session = Session::new(bundle, player);

    run(&mut session, io::stdin().lock(), io::stdout().lock())?;

    tracing::info!(
        gold = session.player().gold,
        kills = ?session.kill_counts(),
        "Client shutdown complete"
    );
    Ok(())
}

fn run(session: &mut Session, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut shown = 0;
    draw(session, &mut out, &mut shown)?;
    writeln!(out, "{HELP}")?;

    for line in input.lines() {
        let Some(command) = Command::parse(&line?) else {
            writeln!(out, "Unknown command. {HELP}")?;
            continue;
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Move { dx, dy } => session.try_move(dx, dy).map(drop),
            Command::Ability(slot) => session.select_ability(slot).map(drop),
            Command::EndTurn => session.end_turn().map(drop),
        };

        if let Err(SessionError::GameOver) = result {
            writeln!(out, "The adventure is over. Press q to quit.")?;
            continue;
        }
        draw(session, &mut out, &mut shown)?;

        if session.is_game_over() {
            writeln!(out, "Game over! Final gold: {}", session.player().gold)?;
        }
    }

    Ok(())
}

/// Prints log entries added since the last draw, the map and the HUD.
fn draw(session: &Session, out: &mut impl Write, shown: &mut usize) -> io::Result<()> {
    for entry in session.log().since(*shown) {
        writeln!(out, "{entry}")?;
    }
    *shown = session.log().len();

    for row in session.render() {
        writeln!(out, "{row}")?;
    }
    writeln!(out, "{}", session.status_line())?;
    if session.in_combat() {
        writeln!(out, "{}", session.ability_bar())?;
    }
    out.flush()
}
