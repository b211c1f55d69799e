// Shared build script helpers for turning a crate README into its rustdoc front page.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Render a crate's README.md into `$OUT_DIR/README_GENERATED.md`.
///
/// Links are rewritten so rustdoc can resolve them:
/// 1. `](src/` prefixes are dropped so module links resolve
/// 2. `.rs)` suffixes are dropped so links target modules, not files
/// 3. `](../../README.md` becomes the workspace repository URL
///
/// A crate without a README still gets a one-line page built from its
/// package description, so `include_str!` never points at a missing file.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let readme_path = Path::new(crate_dir).join("README.md");
    let rendered = match fs::read_to_string(&readme_path) {
        Ok(content) => rewrite_readme_links(&content, workspace_repo_url(crate_dir).as_deref()),
        Err(_) => env::var("CARGO_PKG_DESCRIPTION").unwrap_or_default(),
    };

    let Ok(out_dir) = env::var("OUT_DIR") else {
        panic!("OUT_DIR is not set; build scripts always run with it");
    };
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    if let Err(e) = fs::write(&dest_path, rendered) {
        panic!("failed to write {}: {e}", dest_path.display());
    }
}

fn rewrite_readme_links(content: &str, repo_url: Option<&str>) -> String {
    let mut rendered = content.replace("](src/", "](").replace(".rs)", ")");
    if let Some(url) = repo_url {
        rendered = rendered.replace("](../../README.md", &format!("]({url}"));
    }
    rendered
}

/// Read `repository = "..."` from the workspace Cargo.toml, two levels up.
fn workspace_repo_url(crate_dir: &str) -> Option<String> {
    let workspace_toml = Path::new(crate_dir)
        .parent()? // crates/
        .parent()? // workspace root
        .join("Cargo.toml");

    let content = fs::read_to_string(workspace_toml).ok()?;

    content.lines().map(str::trim).find_map(|line| {
        if !line.starts_with("repository") || !line.contains('=') {
            return None;
        }
        let start = line.find('"')?;
        let end = line.rfind('"')?;
        (start < end).then(|| line[start + 1..end].to_string())
    })
}
