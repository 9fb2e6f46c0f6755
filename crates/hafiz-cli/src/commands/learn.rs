//! Learn session commands.

use chrono::Utc;
use clap::Subcommand;

use hafiz_core::audio::CueGuard;
use hafiz_core::learn::LearnSession;
use hafiz_core::temporal;
use hafiz_core::ChapterCatalog;

use super::{connect, CmdResult};

#[derive(Subcommand)]
pub enum LearnAction {
    /// Show the segment to learn today
    Show {
        /// Load a specific segment instead of resolving today's
        #[arg(long)]
        seg: Option<i64>,
    },
    /// Mark the segment learned and initialize its review schedule
    Complete {
        /// Complete a specific segment instead of today's
        #[arg(long)]
        seg: Option<i64>,
    },
    /// List the chapters of the work
    Chapters,
}

pub async fn run(action: LearnAction) -> CmdResult {
    match action {
        LearnAction::Show { seg } => show(seg).await,
        LearnAction::Complete { seg } => complete(seg).await,
        LearnAction::Chapters => chapters().await,
    }
}

async fn load_session(explicit: Option<i64>) -> Result<LearnSession, Box<dyn std::error::Error>> {
    let (config, scheduler, content) = connect()?;
    let mut session = LearnSession::new(scheduler, content, config.review.sound);
    session.load(explicit, temporal::today()).await?;
    Ok(session)
}

async fn show(explicit: Option<i64>) -> CmdResult {
    let session = load_session(explicit).await?;
    let Some(segment) = session.segment() else {
        println!("No segment to learn today.");
        return Ok(());
    };
    println!(
        "Segment #{} -- {} (planned {})",
        segment.id,
        segment.pages_label(),
        segment.planned_date
    );
    for verse in session.verses() {
        println!("  {:>3}  {}", verse.number, verse.text);
    }
    if session.verses().is_empty() {
        println!("  (no content loaded for this page range)");
    }
    Ok(())
}

async fn complete(explicit: Option<i64>) -> CmdResult {
    let _cue = CueGuard::acquire();
    let mut session = load_session(explicit).await?;
    let Some(segment_id) = session.segment().map(|s| s.id) else {
        println!("No segment to learn today.");
        return Ok(());
    };
    session.complete().await?;
    println!("Segment #{segment_id} learned. Its reviews will appear in the due queue.");
    Ok(())
}

async fn chapters() -> CmdResult {
    let (_, _, content) = connect()?;
    let mut catalog = ChapterCatalog::new(content.as_ref().clone());
    let chapters = catalog.chapters(Utc::now()).await?;
    for chapter in &chapters {
        println!(
            "{:>3}  {:<30} {} verses",
            chapter.id, chapter.name, chapter.verse_count
        );
    }
    Ok(())
}
