use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

// Query logging from sqlx is noisy at info level.
const QUIET_TARGETS: &str = "sqlx=warn";

pub(crate) fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains("sqlx") {
        level.to_string()
    } else {
        format!("{level},{QUIET_TARGETS}")
    }
}

#[cfg(test)]
mod tests {
    use super::default_directives;

    #[test]
    fn default_directives_quiet_sqlx_unless_configured() {
        assert_eq!(default_directives("info"), "info,sqlx=warn");
        assert_eq!(default_directives("debug,sqlx=debug"), "debug,sqlx=debug");
    }
}
