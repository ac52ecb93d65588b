use crate::analytics::ProgressAnalytics;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(analytics: &ProgressAnalytics, user_id: &str) -> Result<CmdResult> {
    let summary = analytics.summary_for_user(user_id);

    let mut result = CmdResult::default();
    if summary.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No scores recorded for {} yet.",
            user_id
        )));
    }
    Ok(result.with_summary(summary))
}
