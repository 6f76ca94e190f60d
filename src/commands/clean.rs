use crate::{CleanArgs, build::Builder, commands::load_config};

pub async fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let loaded = load_config(args.config_file.as_deref())?;

    // Delete the generated site folder
    let site_path = Builder::new(loaded.config, loaded.base_path).output_dir();
    if !site_path.exists() {
        println!("Nothing to clean at {}", site_path.display());
        return Ok(());
    }

    let site_path = site_path.canonicalize().unwrap_or(site_path);
    if args.dry_run {
        println!("Would delete {}", site_path.display());
    } else {
        tokio::fs::remove_dir_all(&site_path).await?;
        println!("Deleted {}", site_path.display());
    }

    Ok(())
}
