//! Static file copying stage.

use std::path::Path;

use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};

/// Stage that copies the static directory into the output directory,
/// keeping its layout. A missing static directory is skipped.
pub struct StaticStage;

impl FinalizeStage for StaticStage {
    fn name(&self) -> &'static str {
        "static"
    }

    fn finalize(&self, ctx: &PipelineContext) -> Result<(), PipelineError> {
        if !ctx.static_dir.is_dir() {
            println!("No static directory found, skipping...");
            return Ok(());
        }

        let copied = copy_dir_recursive(ctx.static_dir, ctx.output_dir).map_err(|e| {
            PipelineError::stage(
                "static",
                format!("failed to copy {}: {e}", ctx.static_dir.display()),
            )
        })?;
        println!("Copied {copied} static file(s)");
        Ok(())
    }
}

/// Copy the contents of `src` into `dst`, returning the number of files.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    std::fs::create_dir_all(dst)?;

    let mut copied = 0;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
