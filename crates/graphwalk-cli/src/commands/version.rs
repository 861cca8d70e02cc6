//! `graphwalk version` command implementation.

use graphwalk_core::error::GraphResult;
use serde::Serialize;

use super::{CommandContext, Status};

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    built: &'static str,
    target: String,
    rustc: &'static str,
}

fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        built: env!("GRAPHWALK_BUILD_DATE"),
        target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
        rustc: env!("GRAPHWALK_RUSTC_VERSION"),
    }
}

/// Execute the `graphwalk version` command
pub async fn execute(ctx: &CommandContext) -> GraphResult<Status> {
    let info = version_info();

    if ctx.output.is_json() {
        ctx.output.json(&info)?;
    } else {
        ctx.output.line(&format!("graphwalk v{}", info.version));
        ctx.output.info(&format!("Built: {}", info.built));
        ctx.output.info(&format!("Target: {}", info.target));
        ctx.output.info(&format!("Rust: {}", info.rustc));
        ctx.output.info(&format!("Output: {}", ctx.settings.format));
    }

    Ok(Status::Success)
}
