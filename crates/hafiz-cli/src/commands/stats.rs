//! Statistics commands: streak, activity heatmap, weekly completions.

use chrono::Datelike;
use clap::Subcommand;

use hafiz_core::{activity_heatmap, current_streak, temporal, weekly_counts, DayActivity};
use hafiz_core::scheduler::SchedulerService;

use super::{connect, CmdResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Streak, review heatmap and weekly segment completions
    Show {
        /// Heatmap window in months (defaults to the configured value)
        #[arg(long)]
        months: Option<u32>,
    },
}

pub async fn run(action: StatsAction) -> CmdResult {
    match action {
        StatsAction::Show { months } => show(months).await,
    }
}

async fn show(months: Option<u32>) -> CmdResult {
    let (config, scheduler, _) = connect()?;
    let today = temporal::today();
    let months = months.unwrap_or(config.stats.heatmap_months);

    let events = scheduler.fetch_review_events(None).await?;
    let completions = scheduler.fetch_completed_segment_dates().await?;

    let streak = current_streak(&events, today);
    println!("reviews logged:     {}", events.len());
    println!("segments completed: {}", completions.len());
    println!("streak:             {} day(s)", streak);

    println!("\nActivity ({months} months)");
    let map = activity_heatmap(&events, months, today);
    print!("{}", render_heatmap(&map));
    println!("legend: ' ' none  ░ low  ▒ some  ▓ busy  █ peak");

    let weeks = weekly_counts(&completions);
    if !weeks.is_empty() {
        println!("\nSegments per week");
        for week in &weeks {
            println!("  {}  {} {}", week.week, "█".repeat(week.count as usize), week.count);
        }
    }
    Ok(())
}

const LEVEL_CHARS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Calendar grid, one column per ISO week, Monday through Sunday rows.
fn render_heatmap(days: &[DayActivity]) -> String {
    let mut out = String::new();
    let Some(first) = days.first() else {
        return out;
    };

    // Column-major: pad the first week down to the starting weekday.
    let mut columns: Vec<Vec<Option<&DayActivity>>> = Vec::new();
    let mut column: Vec<Option<&DayActivity>> =
        vec![None; first.day.weekday().num_days_from_monday() as usize];
    for day in days {
        column.push(Some(day));
        if column.len() == 7 {
            columns.push(column);
            column = Vec::new();
        }
    }
    if !column.is_empty() {
        columns.push(column);
    }

    const ROW_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    for (row, label) in ROW_LABELS.iter().enumerate() {
        out.push_str(&format!("{label} "));
        for week in &columns {
            let ch = week
                .get(row)
                .and_then(|cell| *cell)
                .map(|d| LEVEL_CHARS[d.level as usize])
                .unwrap_or(' ');
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
