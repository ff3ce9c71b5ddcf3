mod list;
mod logging;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use termitask_core::git::{summary, GithubClient};
use termitask_core::{Config, SqliteBucketStore, TaskListService, TaskStore};

#[derive(Parser)]
#[command(name = "termitask")]
#[command(about = "A terminal dashboard for a to-do list and your git repositories", long_about = None)]
struct Cli {
    /// Config file to use instead of the default termitask.toml lookup
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Task list to work on
    #[arg(long, global = true)]
    list: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the dashboard (default)
    Tui,
    /// Print the task list
    List,
    /// Add a task (usage: add buy milk)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Mark the task at INDEX done, or pending again
    Toggle { index: usize },
    /// Remove every done task
    Clear,
}

fn open_list(config: &Config, name: &str) -> Result<TaskListService<SqliteBucketStore>> {
    let store = SqliteBucketStore::open(config.db_path()?)?;
    TaskListService::open(TaskStore::new(store), name)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.log_file()?)?;

    let name = cli
        .list
        .clone()
        .unwrap_or_else(|| config.list_name().to_string());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let token = config.require_token()?;
            let tasks = open_list(&config, &name)?;
            let client = GithubClient::new(token)?;
            let panels = config
                .repos
                .iter()
                .map(|path| summary::load(path, &client))
                .collect();
            tui::run(tui::app::App::new(tasks, panels))?;
        }
        Commands::List => {
            let tasks = open_list(&config, &name)?;
            list::show_tasks(tasks.name(), tasks.tasks());
        }
        Commands::Add { text } => {
            let mut tasks = open_list(&config, &name)?;
            if tasks.add(&text.join(" "))? {
                println!("Task added to '{}'.", name);
            } else {
                println!("Nothing to add: task text is empty.");
            }
        }
        Commands::Toggle { index } => {
            let mut tasks = open_list(&config, &name)?;
            if tasks.toggle_at(Some(index))? {
                println!("{}", tasks.lines()[index]);
            } else {
                println!("No task at index {} in '{}'.", index, name);
            }
        }
        Commands::Clear => {
            let mut tasks = open_list(&config, &name)?;
            let removed = tasks.clear_completed()?;
            println!("Removed {} completed task(s) from '{}'.", removed, name);
        }
    }
    Ok(())
}
