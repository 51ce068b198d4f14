use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// NutriChoice: log dishes and track them against your daily macro goals.
#[derive(Parser, Debug)]
#[command(name = "nutri-choice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the log and profile files.
    #[arg(short, long, default_value = ".nutri_choice")]
    pub data_dir: PathBuf,

    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set your body profile and recompute daily goals.
    Profile {
        /// Weight in kilograms.
        #[arg(long)]
        weight: Option<f64>,

        /// Height in centimeters.
        #[arg(long)]
        height: Option<f64>,

        /// Age in years.
        #[arg(long)]
        age: Option<u32>,

        /// male or female.
        #[arg(long)]
        gender: Option<String>,

        /// sedentary, moderate or active (anything else counts as moderate).
        #[arg(long)]
        activity: Option<String>,
    },

    /// Show current daily goals.
    Goals,

    /// List recognized dishes and their nutrition per serving.
    Dishes,

    /// Add one serving of a dish to the log.
    Add {
        /// Dish name (fuzzy matched).
        #[arg(required_unless_present = "scores", conflicts_with = "scores")]
        dish: Option<String>,

        /// Comma-separated class probabilities from the classifier.
        #[arg(long)]
        scores: Option<String>,
    },

    /// Show the log, most recent first, with progress against goals.
    Log {
        /// Only entries logged today (UTC).
        #[arg(long)]
        today: bool,
    },

    /// Remove an entry by its position in `log` output.
    Remove {
        /// 1-based position as shown by `log`.
        position: usize,

        /// Position refers to `log --today` output.
        #[arg(long)]
        today: bool,
    },

    /// Change the number of servings of an entry.
    Adjust {
        /// 1-based position as shown by `log`.
        position: usize,

        /// Servings to add (negative to remove). Quantity never drops below 1.
        #[arg(allow_hyphen_values = true)]
        delta: i64,

        /// Position refers to `log --today` output.
        #[arg(long)]
        today: bool,
    },

    /// Export the log as CSV.
    Export {
        /// Output file.
        #[arg(short, long, default_value = "nutri_log.csv")]
        out: PathBuf,
    },

    /// Delete every log entry.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Log { today: false }
    }
}

/// Parse `0.1,0.2,...` into scores.
pub fn parse_scores(s: &str) -> Option<Vec<f32>> {
    s.split(',')
        .map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_adjust_accepts_negative_delta() {
        let cli = Cli::try_parse_from(["nutri-choice", "adjust", "2", "-3"]).unwrap();
        match cli.command {
            Some(Command::Adjust {
                position, delta, ..
            }) => {
                assert_eq!(position, 2);
                assert_eq!(delta, -3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_dish_or_scores() {
        assert!(Cli::try_parse_from(["nutri-choice", "add"]).is_err());
        assert!(Cli::try_parse_from(["nutri-choice", "add", "samosa"]).is_ok());
        assert!(Cli::try_parse_from(["nutri-choice", "add", "--scores", "0.1,0.9"]).is_ok());
    }

    #[test]
    fn test_parse_scores() {
        assert_eq!(parse_scores("0.1, 0.9"), Some(vec![0.1, 0.9]));
        assert_eq!(parse_scores("0.1,abc"), None);
    }
}
