//! providers command - List supported hosting services

use anyhow::Result;
use serde::Serialize;

use crate::remote::ProviderKind;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct ProviderInfo {
    id: &'static str,
    name: &'static str,
    hosts: &'static [&'static str],
}

/// List the provider kinds, with the hosts each is detected on.
///
/// Kinds without well-known hosts are used through `[[remotes]]` entries in
/// the config or `--provider`.
pub fn providers(json: bool) -> Result<()> {
    let infos: Vec<ProviderInfo> = ProviderKind::all()
        .iter()
        .map(|kind| ProviderInfo {
            id: kind.name(),
            name: kind.display_name(),
            hosts: kind.well_known_hosts(),
        })
        .collect();

    if json {
        output::print_json(&infos)?;
        return Ok(());
    }

    let rows: Vec<(&str, String)> = infos
        .iter()
        .map(|info| {
            let hosts = if info.hosts.is_empty() {
                "(configured)".to_string()
            } else {
                info.hosts.join(", ")
            };
            (info.id, format!("{:<17} {}", info.name, hosts))
        })
        .collect();
    println!("{}", output::format_rows(&rows));

    Ok(())
}
