use clap::{Parser, Subcommand, ValueEnum};
use taskdeck_core::config::ConfigOverrides;
use taskdeck_core::error::AppError;
use taskdeck_core::filter::FilterMode;
use taskdeck_core::model::Priority;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task to the end of the list
    ///
    /// Example: taskdeck add "Buy milk" --priority high
    Add {
        text: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
    },
    /// Toggle a task between done and not done
    ///
    /// Example: taskdeck done 2
    Done {
        position: usize,
    },
    /// Delete a task
    ///
    /// Example: taskdeck delete 2
    Delete {
        position: usize,
    },
    /// Pull a task's text into the draft and drop the task from the list
    ///
    /// Example: taskdeck edit 2
    Edit {
        position: usize,
    },
    /// Move a task one place up
    ///
    /// Example: taskdeck up 2
    Up {
        position: usize,
    },
    /// Move a task one place down
    ///
    /// Example: taskdeck down 2
    Down {
        position: usize,
    },
    /// Show tasks, optionally restricted to completed or incomplete
    ///
    /// Example: taskdeck list completed
    List {
        mode: Option<FilterArg>,
    },
    /// Select the filter applied to the rendered list
    ///
    /// Example: taskdeck filter incomplete
    Filter {
        mode: FilterArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Completed,
    Incomplete,
}

impl From<FilterArg> for FilterMode {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Completed => Self::Completed,
            FilterArg::Incomplete => Self::Incomplete,
        }
    }
}

/// Parse the repeated `--config-override KEY=VALUE` values into a single
/// overrides struct. Recognised keys are `theme` and `aliases.<name>`.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let trimmed = entry.trim();
        let (key, value) = trimmed.split_once('=').ok_or_else(|| {
            AppError::invalid_input(format!("override '{trimmed}' must be KEY=VALUE"))
        })?;
        let value = value.trim().to_string();

        let (field, remainder) = match key.split_once('.') {
            Some((field, rest)) => (field.trim(), Some(rest.trim())),
            None => (key.trim(), None),
        };

        match field.to_ascii_lowercase().as_str() {
            "theme" => {
                if remainder.is_some() {
                    return Err(AppError::invalid_input("theme override cannot have subfields"));
                }
                overrides.theme = Some(value);
            }
            "aliases" | "alias" => {
                let name = remainder.filter(|segment| !segment.is_empty()).ok_or_else(|| {
                    AppError::invalid_input("aliases override requires an alias name")
                })?;
                overrides.aliases.insert(name.to_string(), value);
            }
            other => {
                return Err(AppError::invalid_input(format!(
                    "unknown config field '{other}'"
                )));
            }
        }
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, FilterArg, PriorityArg, collect_overrides};
    use clap::Parser;

    #[test]
    fn add_command_parses_text_and_priority() {
        let cli = Cli::try_parse_from(["taskdeck", "add", "Buy milk", "--priority", "high"])
            .unwrap();

        match cli.command {
            Command::Add { text, priority } => {
                assert_eq!(text.as_deref(), Some("Buy milk"));
                assert_eq!(priority, Some(PriorityArg::High));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_command_accepts_an_optional_mode() {
        let cli = Cli::try_parse_from(["taskdeck", "list", "completed"]).unwrap();

        match cli.command {
            Command::List { mode } => assert_eq!(mode, Some(FilterArg::Completed)),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["taskdeck", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List { mode: None }));
    }

    #[test]
    fn positions_parse_as_numbers() {
        let cli = Cli::try_parse_from(["taskdeck", "done", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Done { position: 3 }));

        assert!(Cli::try_parse_from(["taskdeck", "done", "third"]).is_err());
    }

    #[test]
    fn collect_overrides_reads_theme_and_aliases() {
        let raw = vec!["THEME=noir".to_string(), "aliases.ls=list all".to_string()];
        let overrides = collect_overrides(&raw).unwrap();

        assert_eq!(overrides.theme.as_deref(), Some("noir"));
        assert_eq!(
            overrides.aliases.get("ls").map(String::as_str),
            Some("list all")
        );
    }

    #[test]
    fn collect_overrides_rejects_missing_equals() {
        let err = collect_overrides(&["theme".to_string()]).unwrap_err();
        assert!(err.message().contains("KEY=VALUE"));
    }

    #[test]
    fn collect_overrides_rejects_unknown_fields() {
        let err = collect_overrides(&["store=elsewhere".to_string()]).unwrap_err();
        assert!(err.message().contains("unknown config field"));
    }

    #[test]
    fn collect_overrides_rejects_alias_without_name() {
        let err = collect_overrides(&["aliases.=x".to_string()]).unwrap_err();
        assert!(err.message().contains("alias name"));
    }
}
