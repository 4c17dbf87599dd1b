use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;
use tasklist::{Config, FileStorage, IdGenerator, Task, TaskFilter, TaskList};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "TaskList CLI - add, edit, complete and delete to-do items")]
#[command(version)]
#[command(after_help = "If the stored tasks cannot be read, the list starts empty and the next add, toggle, edit or delete replaces the stored file.")]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the task slot (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Storage key of the task slot (overrides config)
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text, joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List tasks
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: TaskFilter,
    },

    /// Toggle a task between active and completed
    Toggle { id: i64 },

    /// Replace the text of a task
    Edit {
        id: i64,
        /// New text, stored exactly as given
        text: String,
    },

    /// Delete a task
    Delete { id: i64 },

    /// Print the effective configuration
    ShowConfig,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(key) = cli.key {
        config.key = key;
    }
    config.validate()?;

    if let Commands::ShowConfig = cli.command {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Open list
    let storage = FileStorage::open(&config.data_dir)?;
    let slot = storage.slot_path(&config.key)?;
    let mut list = TaskList::open_with_key(storage, config.ids.generator(), config.key.clone());

    if list.load_failed() && cli.command.mutates() {
        eprintln!(
            "{} could not read {}; it will be replaced by this change",
            "warning:".yellow(),
            slot.display()
        );
    }

    match cli.command {
        Commands::Add { text } => match list.add_task(&text.join(" ")) {
            Some(id) => println!("Added task {}", id),
            None => eprintln!("Task not added: text is blank or no ids are left"),
        },
        Commands::List { filter } => print_list(&list, filter),
        Commands::Toggle { id } => {
            if list.toggle_complete(id) {
                let state = if list.get(id).is_some_and(|t| t.completed) {
                    "completed"
                } else {
                    "active"
                };
                println!("Task {} is now {}", id, state);
            } else {
                eprintln!("No task with id {}", id);
            }
        }
        Commands::Edit { id, text } => {
            let current = list.get(id).map(|t| t.text.clone());
            match current {
                Some(current) => {
                    list.begin_edit(id, current);
                    list.update_draft(text);
                    list.save_edit(id);
                    println!("Updated task {}", id);
                }
                None => eprintln!("No task with id {}", id),
            }
        }
        Commands::Delete { id } => {
            if list.delete_task(id) {
                println!("Deleted task {}", id);
            } else {
                eprintln!("No task with id {}", id);
            }
        }
        Commands::ShowConfig => {}
    }

    Ok(())
}

impl Commands {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::Add { .. } | Commands::Toggle { .. } | Commands::Edit { .. } | Commands::Delete { .. }
        )
    }
}

fn print_list<G: IdGenerator>(list: &TaskList<FileStorage, G>, filter: TaskFilter) {
    if list.load_failed() {
        eprintln!("{} could not read the stored tasks; showing an empty list", "warning:".yellow());
    }

    if list.is_empty() {
        println!("No tasks yet. Start adding some!");
        return;
    }

    for task in list.filtered(filter) {
        println!("{}", format_task(task));
    }

    let counts = list.counts();
    println!(
        "{}",
        format!("{} total, {} active, {} completed", counts.total, counts.active, counts.completed).dimmed()
    );
}

fn format_task(task: &Task) -> String {
    if task.completed {
        format!("{:>14}  [x] {}", task.id, task.text.strikethrough().dimmed())
    } else {
        format!("{:>14}  [ ] {}", task.id, task.text)
    }
}
