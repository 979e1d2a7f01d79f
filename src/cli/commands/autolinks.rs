//! autolinks command - Show issue autolinks for the current remote

use anyhow::Result;

use super::load_target;
use crate::cli::Context;
use crate::remote::ISSUE_NUMBER_TOKEN;
use crate::ui::output;

/// Print how issue references link on the selected remote.
pub fn autolinks(ctx: &Context, json: bool) -> Result<()> {
    let target = load_target(ctx)?;
    let autolinks = target.provider.autolinks();

    if json {
        output::print_json(&autolinks)?;
        return Ok(());
    }

    output::debug(
        format!("{} autolink(s) for {}", autolinks.len(), target.provider.remote_key()),
        ctx.verbosity(),
    );
    for autolink in &autolinks {
        println!("{}{}  {}", autolink.prefix, ISSUE_NUMBER_TOKEN, autolink.pattern);
        output::print(format!("  {}", autolink.title), ctx.verbosity());
    }

    Ok(())
}
