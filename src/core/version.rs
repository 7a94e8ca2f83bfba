//! Build metadata and extension API version accessors.
//! Includes the generated version.rs from the build script, providing a
//! single source of truth for the version the host exposes to extensions.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the extension API version string from the build script into u32.
/// Falls back to a stable default if parsing fails.
pub fn get_extension_api_version() -> u32 {
    EXTENSION_API_VERSION.parse().unwrap_or(20260801)
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}
