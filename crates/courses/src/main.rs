use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use courses::{conflicting_pairs, CoursesConfig, ScheduleGenerator, Section, SemesterSnapshot};

#[derive(Debug, Parser)]
#[command(name = "courses", about = "Check course section conflicts and availability")]
struct Cli {
    /// Semester snapshot (JSON) to read courses from
    #[arg(long)]
    snapshot: PathBuf,

    /// Optional configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Precompute conflicts for the whole semester before answering
    #[arg(long)]
    bulk: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report conflicts among the given sections
    Check {
        #[arg(long = "crn", required = true)]
        crns: Vec<u32>,
    },
    /// List conflict-free schedules for the given courses
    Schedules {
        #[arg(long = "course", required = true)]
        courses: Vec<i64>,
    },
    /// Show open seats per course
    Availability,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CoursesConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CoursesConfig::default(),
    };
    config.apply();

    let mut snapshot = SemesterSnapshot::load_from_file(&cli.snapshot)
        .with_context(|| format!("failed to load snapshot {}", cli.snapshot.display()))?;

    if cli.bulk {
        let index = snapshot.precompute_conflicts()?;
        info!("Precomputed {} conflicting section pairs", index.pair_count());
    }

    match cli.command {
        Command::Check { crns } => check(&snapshot, &crns),
        Command::Schedules { courses } => schedules(&snapshot, &config, &courses),
        Command::Availability => {
            availability(&snapshot);
            Ok(())
        }
    }
}

fn check(snapshot: &SemesterSnapshot, crns: &[u32]) -> anyhow::Result<()> {
    let mut sections: Vec<&Section> = Vec::with_capacity(crns.len());
    for crn in crns {
        match snapshot.find_crn(*crn) {
            Some((_, section)) => sections.push(section),
            None => bail!("no section with CRN {crn} in {}", snapshot.semester),
        }
    }

    let pairs = conflicting_pairs(&sections);
    if pairs.is_empty() {
        println!("No conflicts among {} sections", sections.len());
        return Ok(());
    }

    for (a, b) in pairs {
        let describe = |id| {
            sections
                .iter()
                .find(|s| s.id == id)
                .map(|s| format!("CRN {} [{}]", s.crn, s.days_of_week().join(", ")))
                .unwrap_or_default()
        };
        println!("Conflict: {} <-> {}", describe(a), describe(b));
    }
    Ok(())
}

fn schedules(
    snapshot: &SemesterSnapshot,
    config: &CoursesConfig,
    course_ids: &[i64],
) -> anyhow::Result<()> {
    let mut courses = Vec::with_capacity(course_ids.len());
    for id in course_ids {
        match snapshot.course(*id) {
            Some(course) => courses.push(course),
            None => bail!("no course with id {id} in {}", snapshot.semester),
        }
    }

    let generator = ScheduleGenerator::from_config(config);
    let search = generator.search(&courses);
    if search.truncated {
        warn!("Stopped after {} schedules", generator.max_schedules);
    }
    let found = search.schedules;
    if found.is_empty() {
        if !search.truncated {
            warn!("No conflict-free schedule exists for the selected courses");
        }
        return Ok(());
    }

    for (n, schedule) in found.iter().enumerate() {
        let crns: Vec<String> = schedule
            .iter()
            .filter_map(|id| snapshot.sections().find(|s| s.id == *id))
            .map(|s| s.crn.to_string())
            .collect();
        println!("{:>4}: {}", n + 1, crns.join(" "));
    }
    Ok(())
}

fn availability(snapshot: &SemesterSnapshot) {
    for course in &snapshot.courses {
        println!(
            "{:<12} {:<40} {:>10}  {}",
            course.code(),
            course.name,
            course.seats_left_display(),
            course.num_sections_display()
        );
        let full = course.full_crns();
        if !full.is_empty() {
            let crns: Vec<String> = full.iter().map(u32::to_string).collect();
            println!("{:<12} full: {}", "", crns.join(" "));
        }
    }
}
