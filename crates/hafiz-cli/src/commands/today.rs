//! Schedule overview commands.

use chrono::Duration;
use clap::Subcommand;

use hafiz_core::audio::CueGuard;
use hafiz_core::overview::OverviewSession;
use hafiz_core::temporal;

use super::{connect, CmdResult};

#[derive(Subcommand)]
pub enum TodayAction {
    /// Show the pending schedule: counts, priority and the sorted list
    Show {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Move a segment N days out from today
    Reschedule {
        segment_id: i64,
        /// Days from today for the new planned date
        days: i64,
    },
    /// Complete a segment straight from the overview
    Complete { segment_id: i64 },
}

pub async fn run(action: TodayAction) -> CmdResult {
    match action {
        TodayAction::Show { json } => show(json).await,
        TodayAction::Reschedule { segment_id, days } => reschedule(segment_id, days).await,
        TodayAction::Complete { segment_id } => complete(segment_id).await,
    }
}

async fn session() -> Result<OverviewSession, Box<dyn std::error::Error>> {
    let (config, scheduler, _) = connect()?;
    let mut session = OverviewSession::new(scheduler, config.review.sound);
    session.refresh(temporal::today()).await?;
    Ok(session)
}

async fn show(json: bool) -> CmdResult {
    let session = session().await?;
    let overview = session.overview();

    if json {
        println!("{}", serde_json::to_string_pretty(overview)?);
        return Ok(());
    }

    let counts = overview.counts;
    println!(
        "late: {}  today: {}  upcoming: {}  total: {}",
        counts.late, counts.today, counts.next, counts.total
    );

    match overview.priority() {
        Some(priority) => {
            println!(
                "\npriority: #{} {} -- {} ({}, planned {})",
                priority.segment.id,
                priority.program_title,
                priority.segment.pages_label(),
                priority.status.label(),
                priority.segment.planned_date
            );
        }
        None => {
            println!("\nNothing pending. Plan a new segment to keep going.");
            return Ok(());
        }
    }

    println!();
    for entry in &overview.entries {
        println!(
            "  #{:<6} {:<10} {:<12} {} -- {}",
            entry.segment.id,
            entry.status.label(),
            entry.segment.planned_date,
            entry.segment.pages_label(),
            entry.program_title
        );
    }
    Ok(())
}

async fn reschedule(segment_id: i64, days: i64) -> CmdResult {
    let _cue = CueGuard::acquire();
    let mut session = session().await?;
    let today = temporal::today();
    let new_date = today + Duration::days(days);
    session.reschedule(segment_id, new_date, today).await?;
    println!("Segment #{segment_id} rescheduled to {new_date}.");
    Ok(())
}

async fn complete(segment_id: i64) -> CmdResult {
    let _cue = CueGuard::acquire();
    let mut session = session().await?;
    session.complete(segment_id, temporal::today()).await?;
    println!("Segment #{segment_id} completed.");
    Ok(())
}
