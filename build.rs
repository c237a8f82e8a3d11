use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// File types that end up in the binary (templates) or are cache-busted by the build id (assets).
const WATCHED_EXTENSIONS: [&str; 3] = ["html", "css", "js"];

fn main() {
    // askama embeds templates at compile time; cargo does not track them on its own
    watch_tree(Path::new("templates"));
    watch_tree(Path::new("assets"));

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    println!("cargo:rustc-env=HYKING_BUILD_ID={:x}", stamp);
}

fn watch_tree(root: &Path) {
    let Ok(entries) = fs::read_dir(root) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            watch_tree(&path);
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext))
        {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}
