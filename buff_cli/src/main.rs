use buff_core::*;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bufflog")]
#[command(about = "Daily fitness check-in tracker with versioned goals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new goal version (run once to set your initial goals)
    Init {
        /// Date the goals take effect (defaults to today)
        #[arg(long)]
        effective: Option<NaiveDate>,

        /// Workouts per week
        #[arg(long, default_value_t = 4)]
        workouts_per_week: u32,

        /// Wake time goal (HH:MM)
        #[arg(long, default_value = "06:30")]
        wake_time: String,

        /// Nightly sleep goal in hours
        #[arg(long, default_value_t = 8.0)]
        sleep_hours: f64,

        /// Weekly cardio goal in minutes
        #[arg(long, default_value_t = 150.0)]
        cardio_minutes: f64,

        /// Daily average protein goal in grams
        #[arg(long, default_value_t = 150.0)]
        protein: f64,

        /// Daily average calorie goal
        #[arg(long, default_value_t = 2500)]
        calories: u32,

        /// Daily average steps goal
        #[arg(long, default_value_t = 10000)]
        steps: u32,
    },

    /// Record a daily check-in
    Checkin {
        /// Date of the check-in (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Wake time (HH:MM)
        #[arg(long)]
        wake: Option<String>,

        /// Hours of sleep last night
        #[arg(long)]
        sleep: Option<f64>,

        /// Primary lift (its presence marks a workout day)
        #[arg(long)]
        lift: Option<String>,

        /// Weight sets, e.g. "135x5, 185x5" or "90kgx5"
        #[arg(long, requires = "lift")]
        weights: Option<String>,

        /// Week of your training block
        #[arg(long, requires = "lift")]
        block_week: Option<u32>,

        /// Day of your training block
        #[arg(long, requires = "lift")]
        block_day: Option<u32>,

        /// Cardio medium, e.g. rowing or bike
        #[arg(long, requires = "cardio_minutes")]
        cardio_medium: Option<String>,

        /// Cardio duration in minutes
        #[arg(long, requires = "cardio_medium")]
        cardio_minutes: Option<f64>,

        /// Cardio zone (1-5)
        #[arg(long, requires = "cardio_medium", value_parser = clap::value_parser!(u8).range(1..=5))]
        cardio_zone: Option<u8>,

        /// Protein intake in grams
        #[arg(long)]
        protein: Option<f64>,

        /// Calorie intake
        #[arg(long)]
        calories: Option<u32>,

        /// Step count
        #[arg(long)]
        steps: Option<u32>,
    },

    /// Print your current goals
    Goals {
        /// Show every goal version, not just the current one
        #[arg(long)]
        history: bool,
    },

    /// Print the lifetime summary and weekly breakdowns
    Report {
        /// Include weeks with no check-ins
        #[arg(long)]
        all_weeks: bool,

        /// Print the running sleep balance table
        #[arg(long)]
        balance: bool,
    },

    /// Export weekly summaries to CSV
    Export {
        /// Output path (defaults to weekly.csv in the data directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print config and data file locations
    Paths,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    buff_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Init {
            effective,
            workouts_per_week,
            wake_time,
            sleep_hours,
            cardio_minutes,
            protein,
            calories,
            steps,
        } => cmd_init(
            data_dir,
            effective,
            workouts_per_week,
            &wake_time,
            sleep_hours,
            cardio_minutes,
            protein,
            calories,
            steps,
        ),
        Commands::Checkin {
            date,
            wake,
            sleep,
            lift,
            weights,
            block_week,
            block_day,
            cardio_medium,
            cardio_minutes,
            cardio_zone,
            protein,
            calories,
            steps,
        } => cmd_checkin(CheckinArgs {
            data_dir,
            date,
            wake,
            sleep,
            lift,
            weights,
            block_week,
            block_day,
            cardio_medium,
            cardio_minutes,
            cardio_zone,
            protein,
            calories,
            steps,
        }),
        Commands::Goals { history } => cmd_goals(data_dir, history),
        Commands::Report { all_weeks, balance } => {
            cmd_report(data_dir, &config, all_weeks, balance)
        }
        Commands::Export { output } => cmd_export(data_dir, &config, output),
        Commands::Paths => cmd_paths(data_dir),
    }
}

fn goal_store(data_dir: &std::path::Path) -> GoalStore {
    GoalStore::new(data_dir.join("goals.jsonl"))
}

fn checkin_store(data_dir: &std::path::Path) -> CheckinStore {
    CheckinStore::new(data_dir.join("checkins.jsonl"))
}

#[allow(clippy::too_many_arguments)]
fn cmd_init(
    data_dir: PathBuf,
    effective: Option<NaiveDate>,
    workouts_per_week: u32,
    wake_time: &str,
    sleep_hours: f64,
    cardio_minutes: f64,
    protein: f64,
    calories: u32,
    steps: u32,
) -> Result<()> {
    if sleep_hours <= 0.0 {
        return Err(Error::Parse("sleep goal must be positive".into()));
    }
    if cardio_minutes < 0.0 || protein < 0.0 {
        return Err(Error::Parse("goals must be non-negative".into()));
    }

    let goal = GoalVersion {
        effective_date: effective.unwrap_or_else(today),
        workouts_per_week,
        wake_time_goal: wake_time
            .parse()
            .map_err(|e: String| Error::Parse(e))?,
        sleep_goal_hours: sleep_hours,
        cardio_minutes_per_week: cardio_minutes,
        protein_goal_g: protein,
        calorie_goal: calories,
        steps_goal: steps,
    };

    goal_store(&data_dir).append(&goal)?;

    println!("✓ Goals recorded (effective {})", goal.effective_date);
    print_goal(&goal);
    Ok(())
}

struct CheckinArgs {
    data_dir: PathBuf,
    date: Option<NaiveDate>,
    wake: Option<String>,
    sleep: Option<f64>,
    lift: Option<String>,
    weights: Option<String>,
    block_week: Option<u32>,
    block_day: Option<u32>,
    cardio_medium: Option<String>,
    cardio_minutes: Option<f64>,
    cardio_zone: Option<u8>,
    protein: Option<f64>,
    calories: Option<u32>,
    steps: Option<u32>,
}

fn cmd_checkin(args: CheckinArgs) -> Result<()> {
    if matches!(args.sleep, Some(h) if h < 0.0) {
        return Err(Error::Parse("sleep hours must be non-negative".into()));
    }
    if matches!(args.protein, Some(g) if g < 0.0) {
        return Err(Error::Parse("protein must be non-negative".into()));
    }
    if matches!(args.cardio_minutes, Some(m) if m < 0.0) {
        return Err(Error::Parse("cardio minutes must be non-negative".into()));
    }

    let wake_time = match &args.wake {
        Some(s) => Some(s.parse().map_err(|e: String| Error::Parse(e))?),
        None => None,
    };

    let workout = match args.lift {
        Some(primary_lift) => Some(Workout {
            block_week: args.block_week.unwrap_or(1),
            block_day: args.block_day.unwrap_or(1),
            primary_lift,
            sets: match &args.weights {
                Some(w) => parse_weight_sets(w)?,
                None => Vec::new(),
            },
        }),
        None => None,
    };

    let cardio = match (args.cardio_medium, args.cardio_minutes) {
        (Some(medium), Some(duration_minutes)) => Some(Cardio {
            medium,
            duration_minutes,
            zone: args.cardio_zone.unwrap_or(3),
        }),
        _ => None,
    };

    let record = DailyRecord {
        date: args.date.unwrap_or_else(today),
        wake_time,
        sleep_hours: args.sleep,
        workout,
        cardio,
        protein_g: args.protein,
        calories: args.calories,
        steps: args.steps,
    };

    checkin_store(&args.data_dir).append(&record)?;

    println!("✓ Check-in recorded for {}", record.date);
    Ok(())
}

fn cmd_goals(data_dir: PathBuf, history: bool) -> Result<()> {
    let catalog = goal_store(&data_dir).load()?;

    let Some(current) = catalog.latest() else {
        eprintln!("No goals recorded yet. Run 'bufflog init' first.");
        std::process::exit(1);
    };

    if history {
        println!("=== Goal History ===");
        for goal in catalog.versions() {
            println!("\nEffective {}:", goal.effective_date);
            print_goal(goal);
        }
    } else {
        println!("=== Your Weekly Goals (effective {}) ===", current.effective_date);
        print_goal(current);
    }

    Ok(())
}

fn cmd_report(
    data_dir: PathBuf,
    config: &Config,
    all_weeks: bool,
    show_balance: bool,
) -> Result<()> {
    let catalog = goal_store(&data_dir).load()?;
    let records = checkin_store(&data_dir).load()?;

    if records.is_empty() {
        println!("No check-ins recorded yet. Use 'bufflog checkin' to record your first day.");
        return Ok(());
    }

    let week_start = config.week_start_weekday()?;
    let report = if all_weeks {
        build_report_filled(&records, &catalog, week_start)?
    } else {
        build_report(&records, &catalog, week_start)?
    };

    render_report(&report, show_balance);
    Ok(())
}

fn cmd_export(data_dir: PathBuf, config: &Config, output: Option<PathBuf>) -> Result<()> {
    let catalog = goal_store(&data_dir).load()?;
    let records = checkin_store(&data_dir).load()?;

    let week_start = config.week_start_weekday()?;
    let report = build_report(&records, &catalog, week_start)?;

    let path = output.unwrap_or_else(|| data_dir.join("weekly.csv"));
    let count = write_weekly_csv(&report.weeks, &path)?;

    println!("✓ Exported {} weeks to {}", count, path.display());
    Ok(())
}

fn cmd_paths(data_dir: PathBuf) -> Result<()> {
    println!("Config file: {}", Config::default_config_path().display());
    println!("Data directory: {}", data_dir.display());
    println!("Check-in log: {}", checkin_store(&data_dir).path().display());
    println!("Goal log: {}", goal_store(&data_dir).path().display());
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn print_goal(goal: &GoalVersion) {
    println!("  Workouts per week: {}", goal.workouts_per_week);
    println!("  Wake up time: {}", goal.wake_time_goal);
    println!("  Sleep: {} hours", goal.sleep_goal_hours);
    println!("  Weekly cardio: {} minutes", goal.cardio_minutes_per_week);
    println!("  Daily protein: {} g", goal.protein_goal_g);
    println!("  Daily calories: {}", goal.calorie_goal);
    println!("  Daily steps: {}", goal.steps_goal);
}

fn render_report(report: &Report, show_balance: bool) {
    println!("=== Lifetime Summary ===");
    println!("Days recorded: {}", report.total_days);
    println!(
        "Average sleep: {}",
        report
            .mean_sleep_hours
            .map(|h| format!("{:.2} hours", h))
            .unwrap_or_else(na)
    );
    println!(
        "Average workouts per week: {}",
        report
            .mean_workouts_per_week
            .map(|w| format!("{:.2}", w))
            .unwrap_or_else(na)
    );
    println!(
        "Average wake time: {}",
        report
            .mean_wake_time
            .map(|t| t.to_string())
            .unwrap_or_else(na)
    );
    println!(
        "Sleep balance: {}",
        report
            .sleep_balance
            .map(|b| format!("{:+.1} h", b))
            .unwrap_or_else(na)
    );

    if show_balance && !report.balance.is_empty() {
        println!("\n=== Sleep Balance ===");
        for entry in &report.balance {
            println!(
                "  {}  {:+.1} h  (total {:+.1} h)",
                entry.date, entry.delta, entry.cumulative
            );
        }
    }

    println!("\n=== Weekly Summaries ===");
    for week in &report.weeks {
        render_week(week);
    }
}

fn render_week(week: &Aggregate) {
    let mixed = if week.mixed_goal {
        " (goal changed mid-week)"
    } else {
        ""
    };
    println!("\n{}{}", format_week_header(week.week_start), mixed);
    println!("  Days recorded: {}", week.days_with_data);

    if let Some(sleep) = week.sleep {
        println!(
            "  Average sleep: {:.2} h over {} days (goal {})",
            sleep.mean, sleep.days, week.goal.sleep_goal_hours
        );
    } else {
        println!("  Average sleep: {}", na());
    }

    match week.wake_adherence() {
        Some(ratio) => println!(
            "  Wake adherence: {}/{} days ({:.1}%)",
            week.wake_days_met,
            week.wake_days_recorded,
            ratio * 100.0
        ),
        // Undefined is rendered distinctly from 0%
        None => println!("  Wake adherence: {} (no wake times recorded)", na()),
    }

    println!(
        "  Workouts: {} of {} {}",
        week.workout_days,
        week.goal.workouts_per_week,
        badge(week.workouts_met())
    );
    println!(
        "  Cardio: {:.0} of {:.0} min {}",
        week.cardio_minutes_total,
        week.goal.cardio_minutes_per_week,
        badge(week.cardio_met())
    );

    if let Some(protein) = week.protein_g {
        println!("  Average protein: {:.1} g", protein.mean);
    }
    if let Some(calories) = week.calories {
        println!("  Average calories: {:.0}", calories.mean);
    }
    if let Some(steps) = week.steps {
        println!("  Average steps: {:.0}", steps.mean);
    }
}

fn na() -> String {
    "n/a".into()
}

fn badge(met: bool) -> &'static str {
    if met {
        "✓"
    } else {
        "✗"
    }
}

/// Format a week header like "2024 Week of Jan 1st -> Jan 7th"
fn format_week_header(week_start: NaiveDate) -> String {
    use chrono::Datelike;

    let week_end = week_start + chrono::Duration::days(6);
    format!(
        "{} Week of {} {}{} -> {} {}{}",
        week_start.year(),
        month_abbrev(week_start.month()),
        week_start.day(),
        day_suffix(week_start.day()),
        month_abbrev(week_end.month()),
        week_end.day(),
        day_suffix(week_end.day()),
    )
}

fn month_abbrev(month: u32) -> &'static str {
    [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ][(month - 1) as usize]
}

fn day_suffix(day: u32) -> &'static str {
    if (10..=20).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
