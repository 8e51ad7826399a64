pub mod loops;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{HttpApi, WorkoutApi};
use crate::config::AppConfig;
use crate::tui::event::EventHandler;
use crate::tui::screens::workout::{self, RideOutcome, ScreenSettings};
use crate::tui::TuiSession;
use crate::util::{format_miles, format_seconds};
use crate::workout::{PaceTable, Zone};

/// Redraw rate while the workout screen is up.
const FRAME_RATE: Duration = Duration::from_millis(33);

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")
}

/// Ride a workout in the TUI, then print a summary.
pub fn run_ride(config: &AppConfig) -> Result<()> {
    let api = Arc::new(HttpApi::new(
        &config.server.api_base_url,
        config.server.request_timeout(),
    )?);
    let settings = ScreenSettings::from_config(config);
    tracing::info!(
        workout_id = settings.workout_id,
        api = %config.server.api_base_url,
        "Opening workout screen"
    );

    let rt = runtime()?;
    let outcome = {
        let mut terminal = TuiSession::enter().context("Failed to initialise terminal")?;
        let mut events = EventHandler::new(FRAME_RATE);
        rt.block_on(workout::run(&mut *terminal, &mut events, api, settings))?
    };

    print_summary(&outcome);
    Ok(())
}

fn print_summary(outcome: &RideOutcome) {
    println!();
    if let Some(reason) = &outcome.load_error {
        println!(
            "  {} {}",
            style("ERROR").red().bold(),
            workout::LOAD_ERROR_MESSAGE
        );
        println!("  {}", style(reason).dim());
        println!();
        return;
    }

    let Some(plan_id) = &outcome.plan_id else {
        println!("  Left before the workout loaded.");
        println!();
        return;
    };

    println!("{}", style(format!("=== Workout {plan_id} ===")).bold());
    println!();
    let status = if outcome.finished {
        style("finished").green().to_string()
    } else {
        style("stopped early").yellow().to_string()
    };
    println!("  Status:   {status}");
    println!(
        "  Blocks:   {}/{}",
        outcome.completed_blocks, outcome.total_blocks
    );
    println!(
        "  Time:     {} of {}",
        format_seconds(outcome.elapsed_secs),
        format_seconds(outcome.total_secs)
    );
    println!(
        "  Distance: {} (goal {})",
        format_miles(outcome.distance),
        format_miles(outcome.goal_distance)
    );
    println!(
        "  Date:     {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    println!();
}

/// Fetch a plan and print it block by block with goal paces.
pub fn print_plan(config: &AppConfig) -> Result<()> {
    let api = HttpApi::new(&config.server.api_base_url, config.server.request_timeout())?;
    let workout_id = config.server.workout_id;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Fetching workout {workout_id}..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = runtime()?.block_on(api.fetch_plan(workout_id));
    spinner.finish_and_clear();

    let plan = result.with_context(|| format!("Failed to load workout {workout_id}"))?;

    println!();
    println!("{}", style(format!("=== Workout {} ===", plan.id)).bold());
    println!();
    println!("  {:>3}  {:>7}  {:<16} {:>10}", "#", "Time", "Zone", "Goal");
    for (i, block) in plan.blocks.iter().enumerate() {
        println!(
            "  {:>3}  {:>7}  {:<16} {:>10}",
            i + 1,
            format_seconds(block.duration_secs),
            block.intensity.to_string(),
            format!("{:.1} mph", config.zones.pace_for(&block.intensity)),
        );
    }
    println!();
    println!(
        "  Total: {} in {} blocks",
        style(format_seconds(plan.total_secs())).cyan(),
        plan.len()
    );
    println!();
    Ok(())
}

/// Print the zone → goal pace table in effect.
pub fn print_zones(paces: &PaceTable) {
    println!();
    println!("{}", style("Zone paces").bold());
    println!();
    for zone in Zone::KNOWN.iter() {
        println!(
            "  {:<14} {:>6.1} mph",
            zone.to_string(),
            paces.pace_for(zone)
        );
    }
    println!();
}
