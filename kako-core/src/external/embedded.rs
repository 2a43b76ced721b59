//! Bundled ffmpeg payload lookup.
//!
//! The build script embeds `ffmpeg/<platform>/ffmpeg[.exe]` when it exists
//! for the target being compiled. The lookup is keyed by (OS, architecture)
//! so callers get either the payload or an explicit "unsupported" answer.

/// An ffmpeg binary embedded in the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderPayload {
    /// File name the binary is installed under (`ffmpeg` or `ffmpeg.exe`).
    pub name: &'static str,
    pub bytes: &'static [u8],
}

#[cfg(kako_bundled_ffmpeg)]
const BUNDLED: Option<(&str, DecoderPayload)> = Some((
    env!("KAKO_FFMPEG_PLATFORM"),
    DecoderPayload {
        name: env!("KAKO_FFMPEG_NAME"),
        bytes: include_bytes!(env!("KAKO_FFMPEG_PAYLOAD")),
    },
));

#[cfg(not(kako_bundled_ffmpeg))]
const BUNDLED: Option<(&str, DecoderPayload)> = None;

/// Bundle directory name for a Rust (OS, architecture) pair.
pub fn platform_key(os: &str, arch: &str) -> Option<&'static str> {
    match (os, arch) {
        ("linux", "x86_64") => Some("linux-amd64"),
        ("macos", "aarch64") => Some("darwin-arm64"),
        ("windows", "x86_64") => Some("windows-amd64"),
        _ => None,
    }
}

/// Returns the bundled payload for `os`/`arch`, if this build carries one.
pub fn payload_for(os: &str, arch: &str) -> Option<DecoderPayload> {
    let key = platform_key(os, arch)?;
    BUNDLED
        .filter(|(bundled_key, payload)| *bundled_key == key && !payload.bytes.is_empty())
        .map(|(_, payload)| payload)
}

/// Payload for the platform this binary runs on.
pub fn current_payload() -> Option<DecoderPayload> {
    payload_for(std::env::consts::OS, std::env::consts::ARCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_platforms_map_to_bundle_dirs() {
        assert_eq!(platform_key("linux", "x86_64"), Some("linux-amd64"));
        assert_eq!(platform_key("macos", "aarch64"), Some("darwin-arm64"));
        assert_eq!(platform_key("windows", "x86_64"), Some("windows-amd64"));
    }

    #[test]
    fn unknown_platforms_are_unsupported() {
        assert_eq!(platform_key("freebsd", "x86_64"), None);
        assert_eq!(payload_for("linux", "riscv64"), None);
        assert_eq!(payload_for("plan9", "mips"), None);
    }
}
