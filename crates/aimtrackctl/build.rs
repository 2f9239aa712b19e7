// Exposes AIMTRACK_VERSION to the binary for `aimtrackctl --version`

fn main() {
    let version = match std::env::var("AIMTRACK_VERSION") {
        Ok(v) if !v.trim().is_empty() => v,
        _ => env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("cargo:rustc-env=AIMTRACK_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=AIMTRACK_VERSION");
}
