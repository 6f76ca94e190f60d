use crate::{BuildArgs, build::Builder, commands::load_config};

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let loaded = load_config(args.config_file.as_deref())?;

    let builder = Builder::new(loaded.config, loaded.base_path);
    let result = builder.build()?;

    println!("Site generation complete!");
    println!(
        "Built site to {} ({} articles, {} authors, {} games, {} pages)",
        result.output_dir.display(),
        result.articles,
        result.authors,
        result.games,
        result.pages
    );

    Ok(())
}
