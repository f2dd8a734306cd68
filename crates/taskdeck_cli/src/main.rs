use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskdeck_cli::cli::{self, Cli, Command};
use taskdeck_core::config::{self, Config, Palette};
use taskdeck_core::error::AppError;
use taskdeck_core::filter::{self, FilterMode};
use taskdeck_core::model::{Priority, Task};
use taskdeck_core::storage::{self, FileStore};
use taskdeck_core::store::TaskListStore;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "task")]
    text: String,
    #[tabled(rename = "priority")]
    priority: String,
    #[tabled(rename = "done")]
    done: &'static str,
}

fn task_row(position: usize, task: &Task, palette: &Palette) -> TaskRow {
    let text = if task.completed {
        palette.dim(&task.text)
    } else {
        task.text.clone()
    };
    let priority = if task.priority == Priority::High {
        palette.highlight(task.priority.label())
    } else {
        task.priority.label().to_string()
    };

    TaskRow {
        position,
        text,
        priority,
        done: if task.completed { "x" } else { "" },
    }
}

fn print_list_plain(store: &TaskListStore, mode: FilterMode, palette: &Palette) {
    let rows: Vec<TaskRow> = store
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, task)| filter::matches(task, mode))
        .map(|(index, task)| task_row(index + 1, task, palette))
        .collect();

    if rows.is_empty() {
        println!("No tasks.");
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{table}");
}

fn print_list_json(store: &TaskListStore, mode: FilterMode) {
    let mut payload = Vec::new();
    for (index, task) in store.tasks().iter().enumerate() {
        if !filter::matches(task, mode) {
            continue;
        }
        payload.push(serde_json::json!({
            "position": index + 1,
            "text": task.text,
            "completed": task.completed,
            "priority": task.priority.label(),
        }));
    }
    println!("{}", serde_json::Value::Array(payload));
}

fn print_task_json(position: usize, task: &Task) {
    let json = serde_json::json!({
        "position": position,
        "text": task.text,
        "completed": task.completed,
        "priority": task.priority.label(),
    });
    println!("{json}");
}

/// Map a rendered 1-based position to an index into the full list.
fn resolve_index(store: &TaskListStore, position: usize) -> Result<usize, AppError> {
    let index = position
        .checked_sub(1)
        .ok_or_else(|| AppError::invalid_input("positions start at 1"))?;
    if index >= store.tasks().len() {
        return Err(AppError::invalid_input(format!(
            "no task at position {position}"
        )));
    }
    Ok(index)
}

fn run_command(
    cli: Cli,
    store: &mut TaskListStore,
    session: &Config,
    echo_list: bool,
) -> Result<(), AppError> {
    let overrides = cli::collect_overrides(&cli.config_override)?;
    let effective = config::merge_overrides(session, &overrides);
    let palette = config::palette_for_theme(effective.theme.as_deref());

    let rendered = match cli.command {
        Command::Add { text, priority } => {
            if let Some(priority) = priority {
                store.set_draft_priority(priority.into());
            }
            if let Some(text) = text {
                store.set_draft_text(text);
            }

            if !store.submit_draft()? {
                return Err(AppError::invalid_input("text is required"));
            }

            let position = store.tasks().len();
            let task = &store.tasks()[position - 1];
            if cli.json {
                print_task_json(position, task);
            } else {
                println!("Added task: {}", task.text);
            }
            false
        }
        Command::Done { position } => {
            let index = resolve_index(store, position)?;
            store.toggle_completion(index)?;

            let task = &store.tasks()[index];
            if cli.json {
                print_task_json(position, task);
            } else if task.completed {
                println!("Completed task: {}", task.text);
            } else {
                println!("Reopened task: {}", task.text);
            }
            false
        }
        Command::Delete { position } => {
            let index = resolve_index(store, position)?;
            let removed = store.delete_task(index)?;

            if let Some(task) = removed {
                if cli.json {
                    print_task_json(position, &task);
                } else {
                    println!("Deleted task: {}", task.text);
                }
            }
            false
        }
        Command::Edit { position } => {
            let index = resolve_index(store, position)?;
            store.edit_task(index)?;

            let draft = store.draft_text().to_string();
            if cli.json {
                println!("{}", serde_json::json!({ "draft": draft }));
            } else {
                println!("Editing task: {draft}");
                println!("Resubmit with: add \"{draft}\"");
            }
            false
        }
        Command::Up { position } => {
            let index = resolve_index(store, position)?;
            if store.move_up(index)? {
                if cli.json {
                    print_list_json(store, FilterMode::All);
                } else {
                    println!("Moved task up: {}", store.tasks()[index - 1].text);
                }
            } else if cli.json {
                print_list_json(store, FilterMode::All);
            } else {
                println!("Task is already at the top: {}", store.tasks()[index].text);
            }
            cli.json
        }
        Command::Down { position } => {
            let index = resolve_index(store, position)?;
            if store.move_down(index)? {
                if cli.json {
                    print_list_json(store, FilterMode::All);
                } else {
                    println!("Moved task down: {}", store.tasks()[index + 1].text);
                }
            } else if cli.json {
                print_list_json(store, FilterMode::All);
            } else {
                println!("Task is already at the bottom: {}", store.tasks()[index].text);
            }
            cli.json
        }
        Command::List { mode } => {
            let mode = mode.map_or(store.filter(), Into::into);
            if cli.json {
                print_list_json(store, mode);
            } else {
                print_list_plain(store, mode, &palette);
            }
            true
        }
        Command::Filter { mode } => {
            store.set_filter(mode.into());
            if cli.json {
                print_list_json(store, store.filter());
            } else {
                println!("Filter set to {}", store.filter().label());
                print_list_plain(store, store.filter(), &palette);
            }
            true
        }
    };

    if echo_list && !rendered && !cli.json {
        print_list_plain(store, store.filter(), &palette);
    }

    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_quotes => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => current.push('\\'),
            },
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

/// Replace a leading alias token with its configured expansion. One pass
/// only, so aliases cannot loop.
fn expand_alias(
    args: Vec<String>,
    aliases: &HashMap<String, String>,
) -> Result<Vec<String>, AppError> {
    let Some(first) = args.first() else {
        return Ok(args);
    };
    let Some(expansion) = aliases.get(first) else {
        return Ok(args);
    };

    let mut expanded = split_command_line(expansion)?;
    expanded.extend(args.into_iter().skip(1));
    Ok(expanded)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn help_requested(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
    )
}

fn run_interactive(store: &mut TaskListStore, config: &Config) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let mut input = String::new();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;
        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line).and_then(|args| expand_alias(args, &config.aliases)) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("taskdeck".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                if help_requested(&err) {
                    print!("{err}");
                } else {
                    eprintln!("ERROR: {}", normalize_parse_error(err));
                }
                continue;
            }
        };

        if let Err(err) = run_command(cli, store, config, true) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    let interactive = args.next().is_none();

    let config_load = config::load_config_with_fallback();
    if let Some(err) = &config_load.error {
        eprintln!("WARNING: {err}");
    }

    let adapter = match storage::data_dir() {
        Ok(dir) => FileStore::new(dir),
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };

    let mut store = TaskListStore::new(Box::new(adapter));
    store.hydrate();

    if interactive {
        if let Err(err) = run_interactive(&mut store, &config_load.config) {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if help_requested(&err) {
                print!("{err}");
                return;
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli, &mut store, &config_load.config, false) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
