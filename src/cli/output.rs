use anyhow::Result;
use cder::CwdChange;

/// Print the chosen directory so a shell wrapper can `cd "$(cder)"`.
pub(crate) fn print_plain(change: &CwdChange) {
    println!("{}", change.path.display());
}

pub(crate) fn format_change_json(change: &CwdChange) -> Result<String> {
    Ok(serde_json::to_string_pretty(change)?)
}

pub(crate) fn print_json(change: &CwdChange) -> Result<()> {
    println!("{}", format_change_json(change)?);
    Ok(())
}
