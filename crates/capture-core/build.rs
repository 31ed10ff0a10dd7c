// File: crates/capture-core/build.rs
// Summary: Build script to link required Windows system libraries for the Skia device.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Needed for RegOpenKeyExW, RegQueryInfoKeyW, etc.
        if std::env::var_os("CARGO_FEATURE_SKIA").is_some() {
            println!("cargo:rustc-link-lib=advapi32");
        }
    }
}
