use chrono::{TimeZone, Utc};

use crate::state::HandlerResult;

/// Print the build metadata embedded by build.rs.
pub fn handle_version() -> HandlerResult {
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");
    let git_branch = option_env!("GIT_BRANCH").unwrap_or("unknown");
    let git_tag = option_env!("GIT_TAG").unwrap_or("unknown");
    let build_time = format_build_time(option_env!("BUILD_TIME").unwrap_or("unknown"));

    println!(
        "currency-vault {}\n\
        Branch:     {}\n\
        Tag:        {}\n\
        Commit:     {}\n\
        Build Time: {}\n\
        OS:         {}",
        env!("CARGO_PKG_VERSION"),
        git_branch,
        git_tag,
        git_hash,
        build_time,
        option_env!("CARGO_CFG_TARGET_OS").unwrap_or("unknown")
    );
    Ok(())
}

/// Epoch seconds to a readable UTC timestamp; anything else is shown as is.
fn format_build_time(raw: &str) -> String {
    raw.parse::<i64>()
        .ok()
        .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| raw.to_string())
}
