//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves `static/` locally for previewing the page.

use std::process::{self, Command, Stdio};
use std::{env, io};

const ADDR: &str = "127.0.0.1";
const PORT: &str = "8000";

fn main() -> io::Result<()> {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return Ok(());
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Serving static/ at http://{ADDR}:{PORT} (Ctrl-C to stop) …");
    let status = Command::new("python3")
        .args(["-m", "http.server", PORT, "--bind", ADDR, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()?;
    if !status.success() {
        eprintln!("http server exited with {status}");
        process::exit(1);
    }
    Ok(())
}
