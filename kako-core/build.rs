// kako-core/build.rs
//
// Bundles the platform ffmpeg binary when one is present under
// `ffmpeg/<platform>/`. Builds without a binary still succeed; the
// decoder locator then reports the platform as unsupported.

use std::env;
use std::path::PathBuf;

fn platform_dir(os: &str, arch: &str) -> Option<(&'static str, &'static str)> {
    match (os, arch) {
        ("linux", "x86_64") => Some(("linux-amd64", "ffmpeg")),
        ("macos", "aarch64") => Some(("darwin-arm64", "ffmpeg")),
        ("windows", "x86_64") => Some(("windows-amd64", "ffmpeg.exe")),
        _ => None,
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=ffmpeg");
    println!("cargo:rustc-check-cfg=cfg(kako_bundled_ffmpeg)");

    let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let Some((dir, name)) = platform_dir(&os, &arch) else {
        println!("cargo:warning=no ffmpeg bundle layout for {os}/{arch}");
        return;
    };

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let payload = manifest_dir.join("ffmpeg").join(dir).join(name);

    if payload.is_file() {
        println!("cargo:rerun-if-changed={}", payload.display());
        println!("cargo:rustc-cfg=kako_bundled_ffmpeg");
        println!("cargo:rustc-env=KAKO_FFMPEG_PAYLOAD={}", payload.display());
        println!("cargo:rustc-env=KAKO_FFMPEG_NAME={name}");
        println!("cargo:rustc-env=KAKO_FFMPEG_PLATFORM={dir}");
    }
}
