//! Review session commands.

use clap::Subcommand;
use std::time::Duration;

use hafiz_core::audio::CueGuard;
use hafiz_core::review::{map_key, ReviewSession, SessionCommand, SessionPhase};
use hafiz_core::temporal;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{connect, CmdResult};

#[derive(Subcommand)]
pub enum ReviewAction {
    /// List the due queue
    Queue {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Grade the current head item once (scriptable)
    Grade {
        /// Quality on the configured scale
        quality: u8,
    },
    /// Run an interactive session in the terminal
    Run,
}

pub async fn run(action: ReviewAction) -> CmdResult {
    match action {
        ReviewAction::Queue { json } => queue(json).await,
        ReviewAction::Grade { quality } => grade(quality).await,
        ReviewAction::Run => interactive().await,
    }
}

async fn queue(json: bool) -> CmdResult {
    let (config, scheduler, _) = connect()?;
    let mut session = ReviewSession::new(scheduler, config.review_options());
    session.load(temporal::today()).await?;

    if json {
        let items: Vec<_> = session.items().cloned().collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if session.phase() == SessionPhase::Empty {
        println!("Nothing due. All reviewed for today.");
        return Ok(());
    }
    println!("{} item(s) due", session.total());
    for item in session.items() {
        println!("  #{:<6} due {}", item.id, item.due_date);
    }
    Ok(())
}

async fn grade(quality: u8) -> CmdResult {
    let (config, scheduler, _) = connect()?;
    let mut session = ReviewSession::new(scheduler, config.review_options());
    let today = temporal::today();
    session.load(today).await?;

    let Some(head) = session.current().cloned() else {
        println!("Nothing due. All reviewed for today.");
        return Ok(());
    };
    session.grade(quality, today).await?;
    println!(
        "graded #{} with {} -- {} remaining",
        head.id,
        quality,
        session.queue_len()
    );
    Ok(())
}

async fn interactive() -> CmdResult {
    let (config, scheduler, _) = connect()?;
    let _cue = CueGuard::acquire();
    let scale = config.review.scale;
    let mut session = ReviewSession::new(scheduler, config.review_options());
    let today = temporal::today();
    session.load(today).await?;

    if session.phase() == SessionPhase::Empty {
        println!("Nothing due. All reviewed for today.");
        return Ok(());
    }
    println!("{} item(s) due today", session.total());
    println!("keys: space+enter reveal, {:?} grade, p pause, q quit", scale.allowed());
    show_current(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        if session.phase() == SessionPhase::Empty {
            println!("All reviewed for today.");
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                if session.tick().is_some() {
                    // The countdown expired and forced a reveal.
                    println!("time's up:");
                    show_current(&session);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                match input {
                    "q" => break,
                    "p" => {
                        let paused = if session.timer().is_paused() {
                            session.resume();
                            false
                        } else {
                            session.pause();
                            true
                        };
                        println!(
                            "{} at {}s",
                            if paused { "paused" } else { "resumed" },
                            session.timer().remaining_secs()
                        );
                    }
                    _ => {
                        // An empty line is the terminal's spacebar.
                        let key = input.chars().next().unwrap_or(' ');
                        match map_key(key, scale, false) {
                            Some(SessionCommand::ToggleReveal) => {
                                session.toggle_reveal();
                                show_current(&session);
                            }
                            Some(SessionCommand::Grade(quality)) => {
                                match session.grade(quality, today).await {
                                    Ok(_) => {
                                        println!(
                                            "graded {} -- {}/{} done",
                                            quality,
                                            session.done(),
                                            session.total()
                                        );
                                        show_current(&session);
                                    }
                                    Err(e) => {
                                        eprintln!("error: {e}");
                                        println!("queue reloaded from the scheduler");
                                        show_current(&session);
                                    }
                                }
                            }
                            None => println!("unmapped key: {input:?}"),
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn show_current(session: &ReviewSession) {
    let Some(item) = session.current() else {
        return;
    };
    println!(
        "[#{}] due {} -- {}s left",
        item.id,
        item.due_date,
        session.timer().remaining_secs()
    );
    if session.revealed() {
        println!("  {}", item.content);
    } else {
        println!("  *** hidden -- recite, then reveal ***");
    }
}
