use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use taskboard_domain::{Board, Move, NewTask, TaskList, TaskPriority};
use taskboard_persistence::{MoveSettlement, TaskStore};

use crate::cli::{TaskAction, TaskCreateArgs, TaskMoveArgs};
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct MoveReport<'a> {
    outcome: &'static str,
    task_id: &'a str,
    lists: &'a [TaskList],
}

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create(args) => {
            let list_id = args.list_id.clone();
            let new = build_new_task(args).map_err(|e| anyhow::anyhow!(e))?;
            let task = ctx.tasks().create_task(&list_id, new).await?;
            output::output_success(&task);
        }
        TaskAction::List {
            list_id,
            page,
            per_page,
        } => {
            let request = ctx.page_request(page, per_page)?;
            let tasks = ctx.tasks().get_tasks(&list_id, request).await?;
            output::output_success(&tasks);
        }
        TaskAction::Move(args) => {
            let mut session = ctx.open_session(&args.board_id).await?;
            let mv = build_move(session.board(), &args).map_err(|e| anyhow::anyhow!(e))?;
            let settlement = session.move_task(&mv).await?;

            if let Some(error) = settlement.error() {
                let reverted = matches!(settlement, MoveSettlement::RolledBack { .. });
                output::output_error(&format!(
                    "Failed to save move of task {}: {}{}",
                    mv.task_id,
                    error,
                    if reverted { " (change reverted)" } else { "" }
                ));
            }

            output::output_success(MoveReport {
                outcome: outcome_label(&settlement),
                task_id: &mv.task_id,
                lists: session.lists(),
            });
        }
        TaskAction::Delete { id } => {
            ctx.tasks().delete_task(&id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
    }
    Ok(())
}

fn outcome_label(settlement: &MoveSettlement) -> &'static str {
    match settlement {
        MoveSettlement::LocalOnly => "applied",
        MoveSettlement::Confirmed => "saved",
        MoveSettlement::Superseded => "superseded",
        MoveSettlement::RolledBack { .. } => "reverted",
        MoveSettlement::Diverged { .. } => "diverged",
    }
}

fn build_new_task(args: TaskCreateArgs) -> Result<NewTask, String> {
    let priority = match args.priority.as_deref() {
        Some(p) => p.parse::<TaskPriority>()?,
        None => TaskPriority::default(),
    };
    let due_date = args.due_date.as_deref().map(parse_due_date).transpose()?;

    Ok(NewTask {
        title: args.title,
        description: args.description,
        priority,
        due_date,
        assignee: args.assignee,
        labels: args.labels.into_iter().collect(),
    })
}

fn parse_due_date(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("Invalid due date '{}': {}", s, e))?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("Invalid due date '{}'", s))
}

/// Fill in the source position from the board when the caller did not
/// give one, the way a drop handler knows where the drag started.
fn build_move(board: &Board, args: &TaskMoveArgs) -> Result<Move, String> {
    let (source_list_id, source_index) = match (&args.from_list, args.from_index) {
        (Some(list), Some(index)) => (list.clone(), index),
        (None, None) => {
            let (li, ti) = board
                .locate_task(&args.task_id)
                .ok_or_else(|| format!("Task {} is not on board {}", args.task_id, board.id))?;
            (board.lists[li].id.clone(), ti)
        }
        _ => return Err("--from-list and --from-index must be given together".to_string()),
    };

    Ok(Move {
        source_list_id,
        dest_list_id: args.to_list.clone(),
        source_index,
        dest_index: args.to_index,
        task_id: args.task_id.clone(),
    })
}
