use clap::{Parser, Subcommand};
use hero_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "heroforge")]
#[command(about = "Hero path and level-up flow engine for workout gamification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Workout history CSV (defaults to the configured data path)
    #[arg(long, global = true)]
    workouts: Option<PathBuf>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the classifier's tie-break randomness (reproducible runs)
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the workout history into a hero path (default)
    Classify {
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the workout-type distribution behind the classification
    Stats {
        /// Emit the distribution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply an XP gain and walk the resulting flow chain
    LevelUp {
        /// Current cumulative XP
        #[arg(long)]
        xp: u64,

        /// XP gained
        #[arg(long)]
        gain: u64,

        /// Advance through flows without prompting (for testing)
        #[arg(long)]
        auto_advance: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    hero_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let workouts_path = cli
        .workouts
        .clone()
        .unwrap_or_else(|| config.data.workouts_path.clone());

    // Seeded runs reproduce the classifier's tie-break choice
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Some(Commands::Classify { json }) => cmd_classify(&workouts_path, &config, &mut rng, json),
        Some(Commands::Stats { json }) => cmd_stats(&workouts_path, json),
        Some(Commands::LevelUp {
            xp,
            gain,
            auto_advance,
        }) => cmd_level_up(&workouts_path, &config, &mut rng, xp, gain, auto_advance),
        None => {
            // Default to "classify" command
            cmd_classify(&workouts_path, &config, &mut rng, false)
        }
    }
}

fn cmd_classify(
    workouts_path: &Path,
    config: &Config,
    rng: &mut StdRng,
    json: bool,
) -> Result<()> {
    let records = load_workout_records(workouts_path)?;
    let stats = WorkoutTypeStats::from_records(&records);

    if stats.total_workouts == 0 {
        eprintln!("Warning: no workout history in {:?}", workouts_path);
    }

    let path = classify(&stats, &config.classifier, rng);

    if json {
        let payload = serde_json::json!({
            "path": path,
            "display_name": path.display_name(),
            "icon": path.icon(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let favored: Vec<&str> = path
        .primary_categories()
        .iter()
        .map(|c| c.name())
        .collect();

    println!("==============================================");
    println!("  {}", path.display_name());
    println!("==============================================");
    println!("{}", path.description());
    println!();
    println!("Favored categories: {}", favored.join(", "));
    println!();
    display_stats(&stats);

    Ok(())
}

fn cmd_stats(workouts_path: &Path, json: bool) -> Result<()> {
    let records = load_workout_records(workouts_path)?;
    let stats = WorkoutTypeStats::from_records(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    display_stats(&stats);
    Ok(())
}

fn cmd_level_up(
    workouts_path: &Path,
    config: &Config,
    rng: &mut StdRng,
    xp: u64,
    gain: u64,
    auto_advance: bool,
) -> Result<()> {
    let outcome = apply_xp(xp, gain, &config.leveling);
    println!("XP: {} -> {}", xp, outcome.new_total);

    let Some(level_up) = outcome.level_up else {
        println!("No level boundary crossed.");
        return Ok(());
    };

    // A crossed path milestone re-derives the hero path from the full history
    let new_path = if level_up.crossed_path_milestone {
        let records = load_workout_records(workouts_path)?;
        let stats = WorkoutTypeStats::from_records(&records);
        let path = classify(&stats, &config.classifier, rng);
        tracing::debug!("Path milestone at level {}: {:?}", level_up.to_level, path);
        Some(path)
    } else {
        None
    };

    let notification = LevelUpNotification::from_outcome(&level_up, new_path);

    let mut sequencer = FlowSequencer::new();
    sequencer.enqueue_level_up(notification);

    // Walk the chain the way the presentation layer would: show the current
    // flow, dismiss, repeat until idle
    while !sequencer.is_idle() {
        display_flow(sequencer.current());
        if !auto_advance {
            wait_for_dismiss()?;
        }
        sequencer.advance();
    }

    println!();
    println!("All caught up.");
    Ok(())
}

fn display_stats(stats: &WorkoutTypeStats) {
    println!("Workout distribution ({} workouts):", stats.total_workouts);
    for (category, pct) in stats.sorted_by_percentage() {
        println!("  {:<12} {:>5.1}%", category.name(), pct);
    }
}

fn display_flow(flow: &AppFlow) {
    match flow {
        AppFlow::LevelUp(notification) => {
            println!();
            println!("==============================================");
            println!(
                "  LEVEL UP!  {} -> {}",
                notification.from_level, notification.to_level
            );
            println!("==============================================");
            for content in &notification.unlocked_content {
                println!("  Unlocked: {}", content.name());
            }
        }
        AppFlow::PathAssignment(path) => {
            println!();
            println!("==============================================");
            println!("  YOUR PATH: {}", path.display_name());
            println!("==============================================");
            println!("  {}", path.description());
        }
        AppFlow::FactionSelection => {
            println!();
            println!("==============================================");
            println!("  CHOOSE YOUR FACTION");
            println!("==============================================");
            println!("  Faction selection is now available.");
        }
        AppFlow::Idle => {}
    }
}

fn wait_for_dismiss() -> Result<()> {
    print!("\n[Press Enter to continue] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(())
}
