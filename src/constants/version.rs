use semver::Version;

/// vergen emits this placeholder when no git metadata is available.
const IDEMPOTENT_SHA: &str = "VERGEN_IDEMPOTENT_OUTPUT";

pub fn get_version() -> String {
    match env!("CARGO_PKG_VERSION").parse::<Version>() {
        Ok(semver) => format_version(&semver, env!("VERGEN_GIT_SHA")),
        Err(e) => {
            tracing::warn!(err = ?e, "couldn't parse a semver out of Cargo.toml? defaulting to 0.0.0-unknown.");
            String::from("0.0.0-unknown")
        }
    }
}

fn format_version(semver: &Version, sha: &str) -> String {
    if sha.is_empty() || sha == IDEMPOTENT_SHA || sha == "unknown" {
        semver.to_string()
    } else {
        format!("{semver} ({sha})")
    }
}
