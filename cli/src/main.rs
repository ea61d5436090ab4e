mod backend;
mod http;
mod list;
mod tui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use taskboard_core::{
    parse_new_task, Clock, FileTaskRepository, NoticeKind, Status, StatusFilter, SystemClock,
    TaskService, ViewSession, ViewState,
};
use uuid::Uuid;

use crate::backend::Backend;
use crate::http::HttpTaskApi;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A small task tracker with due dates", long_about = None)]
struct Cli {
    /// Base URL of the task board server
    #[arg(long, global = true, env = "TASKBOARD_URL", default_value = "http://localhost:3000")]
    server: String,

    /// Read and write a data file directly instead of talking to a server
    #[arg(long, global = true)]
    local: bool,

    /// Data file used with --local (defaults to ~/.taskboard/tasks.json)
    #[arg(long, global = true, env = "TASKBOARD_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List tasks, pending first and then by due date
    List {
        /// Only show tasks with this status (all, pending, completed)
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Only show tasks whose title contains this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a new task (usage: add Buy milk due:tomorrow)
    Add {
        /// Title words followed by due:<date>
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Mark a task as completed
    Done {
        /// Task id or a unique prefix of it
        id: String,
    },
    /// Mark a completed task as pending again
    Reopen {
        /// Task id or a unique prefix of it
        id: String,
    },
    /// Delete a task permanently
    Delete {
        /// Task id or a unique prefix of it
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn open_backend(cli: &Cli) -> Result<Backend> {
    if cli.local {
        let path = match &cli.data_file {
            Some(path) => path.clone(),
            None => FileTaskRepository::default_path()?,
        };
        let repo = FileTaskRepository::new(path)?;
        Ok(Backend::Local(TaskService::new(repo)))
    } else {
        Ok(Backend::Remote(HttpTaskApi::new(cli.server.clone())))
    }
}

/// Accepts a full id or a prefix that names exactly one cached task.
fn resolve_id(state: &ViewState, raw: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(raw) {
        return Ok(id);
    }

    let matches: Vec<Uuid> = state
        .tasks()
        .iter()
        .filter(|t| t.id.to_string().starts_with(raw))
        .map(|t| t.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow!("No task matches id '{}'", raw)),
        _ => Err(anyhow!("Ambiguous id '{}' matches {} tasks", raw, matches.len())),
    }
}

fn load(session: &mut ViewSession<Backend>) -> Result<()> {
    if session.load() {
        Ok(())
    } else {
        finish(session)
    }
}

/// Prints the notice left by the last action; an error notice becomes the
/// process error.
fn finish(session: &ViewSession<Backend>) -> Result<()> {
    match session.state().notice() {
        Some(notice) if notice.kind == NoticeKind::Error => bail!("{}", notice.message),
        Some(notice) => {
            println!("{}", notice.message);
            Ok(())
        }
        None => Ok(()),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let backend = open_backend(&cli)?;
    let mut session = ViewSession::new(backend);
    let today = SystemClock.today();

    match cli.command {
        Some(Commands::List { status, search }) => {
            load(&mut session)?;
            session.state_mut().set_filter(status);
            session.state_mut().set_search(search.unwrap_or_default());
            let rows = session.state().visible(today);
            list::show_tasks(&rows, session.state().task_count());
        }
        Some(Commands::Add { args }) => {
            let form = parse_new_task(&args, today);
            if !session.add_task(&form, today) {
                if let Some(err) = session.state().form_error() {
                    bail!("{}", err);
                }
            }
            finish(&session)?;
        }
        Some(Commands::Done { id }) => {
            load(&mut session)?;
            let id = resolve_id(session.state(), &id)?;
            session.set_status(&id, Status::Completed);
            finish(&session)?;
        }
        Some(Commands::Reopen { id }) => {
            load(&mut session)?;
            let id = resolve_id(session.state(), &id)?;
            session.set_status(&id, Status::Pending);
            finish(&session)?;
        }
        Some(Commands::Delete { id, yes }) => {
            load(&mut session)?;
            let id = resolve_id(session.state(), &id)?;
            let title = session
                .state()
                .find(&id)
                .map(|t| t.title.clone())
                .unwrap_or_else(|| id.to_string());

            session.request_delete(id);
            if yes || confirm(&format!("Delete '{}'? This cannot be undone.", title))? {
                session.confirm_delete();
                finish(&session)?;
            } else {
                session.cancel_delete();
                println!("Cancelled.");
            }
        }
        Some(Commands::Tui) | None => {
            tui::run(session)?;
        }
    }
    Ok(())
}
