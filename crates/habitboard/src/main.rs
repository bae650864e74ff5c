//! habitboard - Habit tag taxonomy and analytics rollups

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use habitboard_core::analytics::{
    aggregate_by_umbrella_with, aggregate_trends, summarize_categories, EventQuery, SortField,
    SortOrder,
};
use habitboard_core::{aggregate_categories, DrillDown, HabitboardConfig, Taxonomy, TagValidator};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "habitboard",
    version,
    about = "Habit tag taxonomy, validation and analytics rollups",
    long_about = "Validates habit tags against an umbrella/specific/contextual taxonomy and\n\
                  rolls logged habit events up into category statistics, umbrella\n\
                  drill-downs and daily trends.\n\
                  \n\
                  Examples:\n\
                    habitboard validate food cooking          # Check a tag set\n\
                    habitboard suggest me --existing food     # Autocomplete a tag\n\
                    habitboard suggest-name \"Gym session\"     # Tags for an activity name\n\
                    habitboard umbrellas --events log.jsonl   # Umbrella rollup\n\
                    habitboard drill food --events log.jsonl  # Specific tags under food\n\
                    habitboard trends --events log.jsonl --days 7\n\
                  \n\
                  Environment Variables:\n\
                    HABITBOARD_CONFIG                # Config file (default: <config_dir>/habitboard/config.toml)\n\
                    HABITBOARD_TAXONOMY              # Taxonomy seed file (.toml, .yaml, .json)\n\
                    HABITBOARD_FORMAT                # Force output format: json|table\n\
                    HABITBOARD_NO_COLOR              # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to config file
    #[arg(long, env = "HABITBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Taxonomy seed file, overrides the config's taxonomy_path
    #[arg(long, env = "HABITBOARD_TAXONOMY")]
    taxonomy: Option<PathBuf>,

    /// Force output format (json|table)
    #[arg(long, env = "HABITBOARD_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "HABITBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a tag set
    Validate {
        /// Tags exactly as entered
        #[arg(required = true)]
        tags: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize raw tags to kebab-case
    Normalize {
        #[arg(required = true)]
        tags: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest approved tags for a partial input
    Suggest {
        partial: String,
        /// Tags already on the event
        #[arg(long, short = 'e', num_args = 1..)]
        existing: Vec<String>,
        /// Max suggestions (default from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest tags from an activity name
    SuggestName {
        name: String,
        /// Max suggestions (default from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the tag taxonomy
    Taxonomy {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Per-tag statistics
    Categories {
        /// Events file (JSON array or JSONL)
        #[arg(long)]
        events: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Umbrella rollup
    Umbrellas {
        /// Events file (JSON array or JSONL)
        #[arg(long)]
        events: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Specific tags under one umbrella
    Drill {
        umbrella: String,
        /// Events file (JSON array or JSONL)
        #[arg(long)]
        events: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily trend buckets ending today
    Trends {
        /// Events file (JSON array or JSONL)
        #[arg(long)]
        events: PathBuf,
        /// Window size, 1-365 (default from config)
        #[arg(long, short = 'd')]
        days: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List habit events
    Habits {
        /// Events file (JSON array or JSONL)
        #[arg(long)]
        events: PathBuf,
        /// Case-insensitive search over name and tags
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Only events carrying this tag
        #[arg(long, short = 't')]
        tag: Option<String>,
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,
        /// Sort ascending (default: descending, newest first)
        #[arg(long)]
        asc: bool,
        /// Max results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Duration,
    Name,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortField::Date,
            SortArg::Duration => SortField::Duration,
            SortArg::Name => SortField::Name,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.no_color);

    let mut config = match cli.config.clone().or_else(HabitboardConfig::default_path) {
        Some(path) => HabitboardConfig::load_or_default(&path),
        None => HabitboardConfig::default(),
    };
    if let Some(path) = &cli.taxonomy {
        config.taxonomy_path = Some(path.clone());
    }
    let taxonomy = config.taxonomy().context("Failed to load taxonomy")?;
    debug!(umbrellas = taxonomy.umbrellas().count(), "Taxonomy ready");

    let forced_json = cli.format.as_deref() == Some("json");
    let no_color = cli.no_color;

    let output = match cli.command {
        Command::Validate { tags, json } => {
            let result = TagValidator::new(&taxonomy).validate(&tags);
            cli::format_validation(&result, json || forced_json)
        }
        Command::Normalize { tags, json } => {
            cli::format_tags(&habitboard_core::normalize_tags(&tags), json || forced_json)
        }
        Command::Suggest {
            partial,
            existing,
            limit,
            json,
        } => {
            let mut suggestions = TagValidator::new(&taxonomy).suggest_tags(&partial, &existing);
            suggestions.truncate(limit.unwrap_or(config.suggestion_limit));
            cli::format_tags(&suggestions, json || forced_json)
        }
        Command::SuggestName { name, limit, json } => {
            let suggestions = TagValidator::new(&taxonomy)
                .suggest_tags_for_name(&name, limit.unwrap_or(config.suggestion_limit));
            cli::format_tags(&suggestions, json || forced_json)
        }
        Command::Taxonomy { json } => cli::format_taxonomy(&taxonomy, json || forced_json, no_color),
        Command::Categories { events, json } => {
            run_categories(&events, json || forced_json, no_color)?
        }
        Command::Umbrellas { events, json } => {
            let stats = aggregate_categories(&cli::load_events(&events)?);
            let rolled = aggregate_by_umbrella_with(&stats, &taxonomy, config.rollup_mode);
            cli::format_categories(&rolled, json || forced_json, no_color)
        }
        Command::Drill {
            umbrella,
            events,
            json,
        } => run_drill(&taxonomy, &config, &umbrella, &events, json || forced_json, no_color)?,
        Command::Trends { events, days, json } => {
            let window = cli::clamp_window(days.unwrap_or(config.default_window_days));
            let buckets = aggregate_trends(&cli::load_events(&events)?, window);
            cli::format_trends(&buckets, json || forced_json, no_color)
        }
        Command::Habits {
            events,
            search,
            tag,
            sort,
            asc,
            limit,
            json,
        } => {
            let events = cli::load_events(&events)?;
            let mut query = EventQuery::new().sort(sort.into(), sort_order(asc));
            if let Some(search) = search {
                query = query.search(search);
            }
            if let Some(tag) = tag {
                query = query.tag(tag);
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            cli::format_events(&query.apply(&events), json || forced_json, no_color)
        }
    };

    println!("{}", output);
    Ok(())
}

fn sort_order(asc: bool) -> SortOrder {
    if asc {
        SortOrder::Asc
    } else {
        SortOrder::default()
    }
}

fn init_tracing(no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}

fn run_categories(events: &Path, json: bool, no_color: bool) -> Result<String> {
    let stats = aggregate_categories(&cli::load_events(events)?);
    if json {
        return Ok(cli::format_categories(&stats, true, no_color));
    }

    let summary = summarize_categories(&stats);
    Ok(format!(
        "{}\n\nCategories: {}  Tagged events: {}  Total: {}m  Avg per category: {:.1}",
        cli::format_categories(&stats, false, no_color),
        summary.total_categories,
        summary.total_events,
        summary.total_duration_minutes,
        summary.average_events_per_category
    ))
}

fn run_drill(
    taxonomy: &Taxonomy,
    config: &HabitboardConfig,
    umbrella: &str,
    events: &Path,
    json: bool,
    no_color: bool,
) -> Result<String> {
    let stats = aggregate_categories(&cli::load_events(events)?);
    let mut nav = DrillDown::new(taxonomy, &stats).with_mode(config.rollup_mode);

    if !taxonomy.is_umbrella(umbrella) {
        anyhow::bail!(
            "'{}' is not an umbrella tag (umbrellas: {})",
            umbrella,
            taxonomy.umbrellas().collect::<Vec<_>>().join(", ")
        );
    }
    if !nav.select(umbrella) {
        anyhow::bail!("No specific tags logged under '{}'", umbrella);
    }

    let view = nav.current_view();
    if json {
        return Ok(cli::format_categories(&view, true, no_color));
    }
    Ok(format!(
        "{}\n{}",
        nav.state().breadcrumb(),
        cli::format_categories(&view, false, no_color)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habits_default_newest_first() {
        let cli = Cli::try_parse_from(["habitboard", "habits", "--events", "log.jsonl"]).unwrap();
        let Command::Habits { asc, sort, .. } = cli.command else {
            panic!("expected habits command");
        };
        assert!(!asc);
        assert_eq!(sort_order(asc), SortOrder::Desc);
        assert_eq!(SortField::from(sort), SortField::Date);
    }

    #[test]
    fn test_habits_asc_flag() {
        let cli =
            Cli::try_parse_from(["habitboard", "habits", "--events", "log.jsonl", "--asc"]).unwrap();
        let Command::Habits { asc, .. } = cli.command else {
            panic!("expected habits command");
        };
        assert_eq!(sort_order(asc), SortOrder::Asc);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
