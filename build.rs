use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> anyhow::Result<()> {
    // sqlx::migrate! embeds these files at compile time
    println!("cargo:rerun-if-changed=migrations");

    // release builds outside a git checkout pass the sha in directly
    match std::env::var("VERGEN_GIT_SHA") {
        Ok(sha) if !sha.is_empty() && sha != "unknown" => {
            println!("cargo:rustc-env=VERGEN_GIT_SHA={sha}");
        }
        _ => {
            let gitcl = GitclBuilder::default().sha(true).build()?;
            Emitter::default().add_instructions(&gitcl)?.emit()?;
        }
    }

    Ok(())
}
