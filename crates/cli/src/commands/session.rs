//! Session commands.

use serde_json::Value;
use tracing::info;
use travel_planner_core::SessionStore;

use super::emit;
use crate::config::CliConfig;

/// Log in with a JSON identity record.
///
/// # Errors
///
/// Returns an error if the identity is not valid JSON or cannot be stored.
pub fn login(config: &CliConfig, identity: &str) -> Result<(), Box<dyn std::error::Error>> {
    let identity: Value =
        serde_json::from_str(identity).map_err(|e| format!("identity must be JSON: {e}"))?;

    let storage = config.storage();
    let mut session: SessionStore<_> = SessionStore::new(&storage);
    session.login(identity)?;

    info!("Logged in");
    Ok(())
}

/// Log out the current user.
///
/// # Errors
///
/// Returns an error if the stored identity cannot be removed.
pub fn logout(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.storage();
    let mut session: SessionStore<_> = SessionStore::new(&storage);
    let was_authenticated = session.is_authenticated();
    session.logout()?;

    if was_authenticated {
        info!("Logged out");
    } else {
        info!("No user was logged in");
    }
    Ok(())
}

/// Print the current identity, or `anonymous`.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn whoami(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.storage();
    let session: SessionStore<_> = SessionStore::new(&storage);

    match session.current_user() {
        Some(user) => emit(serde_json::to_string_pretty(user)?)?,
        None => emit("anonymous")?,
    }
    Ok(())
}
