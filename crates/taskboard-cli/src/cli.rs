use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Kanban boards with drag-and-drop task moves", long_about = None)]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")")
)]
pub struct Cli {
    /// Path to the data file (or set TASKBOARD_FILE)
    #[arg(long, global = true, value_name = "FILE", env = "TASKBOARD_FILE")]
    pub file: Option<String>,

    /// Serve the built-in sample board, ignoring any data file
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Task operations
    Task(TaskCommand),
    /// Notification operations
    Notification(NotificationCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create a new board with the given lists
    Create {
        #[arg(long)]
        name: String,
        /// Comma-separated list names
        #[arg(long, value_delimiter = ',', default_value = "To Do,In Progress,Done")]
        lists: Vec<String>,
    },
    /// List all boards
    List,
    /// Show a board with its lists and tasks
    Show {
        #[arg(long)]
        id: String,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task at the end of a list
    Create(TaskCreateArgs),
    /// List the tasks of a list, one page at a time
    List {
        #[arg(long)]
        list_id: String,
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Move a task within its list or to another list
    Move(TaskMoveArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub list_id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// low, medium, high or critical
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long = "label")]
    pub labels: Vec<String>,
}

#[derive(Args)]
pub struct TaskMoveArgs {
    #[arg(long)]
    pub board_id: String,
    #[arg(long)]
    pub task_id: String,
    /// Source list; looked up from the board when omitted
    #[arg(long)]
    pub from_list: Option<String>,
    /// Source index; looked up from the board when omitted
    #[arg(long)]
    pub from_index: Option<usize>,
    /// Destination list; omit to drop the task outside any list
    #[arg(long)]
    pub to_list: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub to_index: usize,
}

// Notification commands
#[derive(Args)]
pub struct NotificationCommand {
    #[command(subcommand)]
    pub action: NotificationAction,
}

#[derive(Subcommand)]
pub enum NotificationAction {
    /// List notifications
    List {
        #[arg(long)]
        unread: bool,
    },
    /// Mark one or all notifications as read
    Read {
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        id: Option<String>,
        #[arg(long)]
        all: bool,
    },
}
