use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A source file packaging may replace, and the defaults it starts from.
struct Generated {
    target: &'static str,
    defaults: &'static str,
}

const GENERATED: &[Generated] = &[
    Generated {
        target: "config.rs",
        defaults: "config.defaults.rs",
    },
    Generated {
        target: "strings_config.rs",
        defaults: "strings_config.defaults.rs",
    },
];

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Copies the defaults over the target when the target is missing or older.
/// A target written after its defaults (by packaging) is left alone.
fn refresh(src_dir: &Path, file: &Generated) -> io::Result<bool> {
    let target = src_dir.join(file.target);
    let defaults = src_dir.join(file.defaults);

    let stale = match (modified(&target), modified(&defaults)) {
        (None, _) => true,
        (Some(t), Some(d)) => t < d,
        (Some(_), None) => false,
    };
    if stale {
        fs::copy(&defaults, &target)?;
    }
    Ok(stale)
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR missing");
    let src_dir = PathBuf::from(manifest_dir).join("src");

    println!("cargo:rerun-if-changed=build.rs");
    for file in GENERATED {
        let defaults = src_dir.join(file.defaults);
        assert!(
            defaults.exists(),
            "{} has no defaults at {}",
            file.target,
            defaults.display()
        );
        println!("cargo:rerun-if-changed={}", defaults.display());
        println!("cargo:rerun-if-changed={}", src_dir.join(file.target).display());

        match refresh(&src_dir, file) {
            Ok(true) => println!(
                "cargo:warning=Wrote {} from {}",
                file.target, file.defaults
            ),
            Ok(false) => {}
            Err(e) => panic!("Cannot write src/{}: {}", file.target, e),
        }
    }
}
