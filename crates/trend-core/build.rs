// File: crates/trend-core/build.rs
// Summary: Links the Windows system libraries the Skia raster backend pulls in.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    #[cfg(target_os = "windows")]
    {
        // skia-safe's font manager calls RegOpenKeyExW and friends.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
