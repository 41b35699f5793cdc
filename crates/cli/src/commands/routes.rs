//! Route table commands.

use travel_planner_core::RouteTable;

use super::emit;
use crate::config::CliConfig;

/// Print the view a path resolves to.
///
/// # Errors
///
/// Returns an error if no route matches.
pub fn resolve(config: &CliConfig, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = RouteTable::with_base(&config.base_url);
    let view = table
        .resolve(path)
        .ok_or_else(|| format!("no route matches {path} (base {})", table.base()))?;
    emit(view)?;
    Ok(())
}

/// Print every route as `path<TAB>view`.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let table = RouteTable::with_base(&config.base_url);
    for route in table.routes() {
        emit(format_args!("{}\t{}", table.path_for(route.view), route.view))?;
    }
    Ok(())
}
