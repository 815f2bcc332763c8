use std::env;
use std::path::Path;
use std::process::Command;

/// Directory, relative to the workspace root, the UI bundle is written to.
/// Point `server.staticDir` at it to serve the UI from the proxy.
const UI_DIST_DIR: &str = "ui-dist";

fn main() {
    println!("cargo:rerun-if-changed=yew-ui/src");
    println!("cargo:rerun-if-changed=yew-ui/index.html");
    println!("cargo:rerun-if-changed=yew-ui/style.css");
    println!("cargo:rerun-if-changed=yew-ui/Cargo.toml");
    println!("cargo:rerun-if-changed=crates/paraph-shared/src");
    println!("cargo:rerun-if-env-changed=BUILD_UI");

    // Only build in release mode or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    let force_build = env::var("BUILD_UI").unwrap_or_default();

    if profile == "release" || force_build == "1" {
        build_ui();
    } else {
        println!("cargo:warning=Skipping UI build in debug mode. Set BUILD_UI=1 to force build.");
    }
}

fn build_ui() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR is not set, skipping UI build.");
        return;
    };
    let ui_dir = Path::new(&manifest_dir).join("yew-ui");
    let dist_dir = Path::new(&manifest_dir).join(UI_DIST_DIR);

    if Command::new("trunk").arg("--version").output().is_err() {
        println!("cargo:warning=Trunk is not installed, skipping UI build.");
        println!("cargo:warning=Install it with: cargo install --locked trunk");
        return;
    }

    println!("cargo:warning=Building UI into {}...", dist_dir.display());

    let output = Command::new("trunk")
        .current_dir(&ui_dir)
        .arg("build")
        .arg("--release")
        .arg("--dist")
        .arg(&dist_dir)
        .output();

    match output {
        Ok(result) if result.status.success() => {
            println!("cargo:warning=UI build completed successfully");
        }
        Ok(result) => {
            println!("cargo:warning=UI build failed:");
            for line in String::from_utf8_lossy(&result.stderr).lines() {
                println!("cargo:warning={}", line);
            }
        }
        Err(e) => {
            println!("cargo:warning=Failed to execute trunk build: {}", e);
        }
    }
}
