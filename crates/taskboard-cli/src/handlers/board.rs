use taskboard_persistence::TaskStore;

use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    let store = ctx.tasks();
    match action {
        BoardAction::Create { name, lists } => {
            let board = store.create_board(name, lists).await?;
            output::output_success(&board);
        }
        BoardAction::List => {
            let boards = store.list_boards().await?;
            output::output_list(boards);
        }
        BoardAction::Show { id } => {
            let board = store.get_board(&id).await?;
            output::output_success(&board);
        }
    }
    Ok(())
}
