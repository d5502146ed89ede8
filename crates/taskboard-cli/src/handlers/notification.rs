use taskboard_persistence::NotificationStore;

use crate::cli::NotificationAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: NotificationAction) -> anyhow::Result<()> {
    let store = ctx.notifications();
    match action {
        NotificationAction::List { unread } => {
            let notifications = store
                .list_notifications()
                .await?
                .into_iter()
                .filter(|n| !unread || !n.read)
                .collect::<Vec<_>>();
            output::output_list(notifications);
        }
        NotificationAction::Read { id: Some(id), .. } => {
            store.mark_read(&id).await?;
            output::output_success(serde_json::json!({ "read": id }));
        }
        NotificationAction::Read { id: None, .. } => {
            let changed = store.mark_all_read().await?;
            output::output_success(serde_json::json!({ "marked_read": changed }));
        }
    }
    Ok(())
}
