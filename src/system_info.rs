use git_version::git_version;

const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// One-line description of the running build, logged at startup.
pub fn get_system_info() -> String {
    let profile = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    let version = match (
        option_env!("RELEASE_VERSION").unwrap_or(""),
        option_env!("LATEST_TAG").unwrap_or(""),
        option_env!("COMMITS_AHEAD").unwrap_or(""),
    ) {
        (tag, _, _) if !tag.is_empty() => tag.to_string(),
        (_, latest, ahead) if !latest.is_empty() && !ahead.is_empty() => {
            format!("{latest}+{ahead}")
        }
        (_, latest, _) if !latest.is_empty() => format!("{latest}+dev"),
        _ => env!("CARGO_PKG_VERSION").to_string(),
    };

    format!(
        "{} {} (commit {}, {} build)",
        env!("CARGO_PKG_NAME"),
        version,
        COMMIT,
        profile
    )
}
