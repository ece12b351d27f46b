use std::process::Command;

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default()
}

fn main() {
    // Tag of HEAD when building a release commit.
    println!(
        "cargo:rustc-env=RELEASE_VERSION={}",
        git(&["describe", "--tags", "--exact-match"])
    );

    let latest = git(&["describe", "--tags", "--abbrev=0"]);
    println!("cargo:rustc-env=LATEST_TAG={}", latest);

    let ahead = if latest.is_empty() {
        String::new()
    } else {
        git(&["rev-list", "--count", &format!("{}..HEAD", latest)])
    };
    println!("cargo:rustc-env=COMMITS_AHEAD={}", ahead);
}
