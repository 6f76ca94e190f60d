use std::path::Path;

use crate::{
    InitArgs,
    config::{CONFIG_FILE, Config},
};

/// Starter templates, relative to the templates directory.
const STARTER_TEMPLATES: [(&str, &str); 11] = [
    (
        "layouts/default.html",
        include_str!("../../starter/templates/layouts/default.html"),
    ),
    (
        "partials/header.html",
        include_str!("../../starter/templates/partials/header.html"),
    ),
    (
        "partials/hero.html",
        include_str!("../../starter/templates/partials/hero.html"),
    ),
    ("index.html", include_str!("../../starter/templates/index.html")),
    ("article.html", include_str!("../../starter/templates/article.html")),
    ("author.html", include_str!("../../starter/templates/author.html")),
    ("news.html", include_str!("../../starter/templates/news.html")),
    ("guides.html", include_str!("../../starter/templates/guides.html")),
    ("games.html", include_str!("../../starter/templates/games.html")),
    ("about.html", include_str!("../../starter/templates/about.html")),
    ("category.html", include_str!("../../starter/templates/category.html")),
];

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(CONFIG_FILE);
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "{config_file} already exists",
            config_file = config_file.display()
        ));
    }

    println!("Initializing project in {}", path.display());

    let default_config = Config::default();
    let config_text = serde_yaml::to_string(&default_config)?;
    tokio::fs::write(&config_file, config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    let paths = &default_config.paths;
    for dir in ["articles", "authors", "games"] {
        tokio::fs::create_dir_all(path.join(&paths.content).join(dir)).await?;
    }
    tokio::fs::create_dir_all(path.join(&paths.static_dir)).await?;

    let written = write_starter_templates(&path.join(&paths.templates)).await?;
    println!("Created {written} starter template(s)");

    Ok(())
}

/// Write the starter templates that do not exist yet.
async fn write_starter_templates(templates_dir: &Path) -> Result<usize, anyhow::Error> {
    let mut written = 0;
    for (name, body) in STARTER_TEMPLATES {
        let target = templates_dir.join(name);
        if target.exists() {
            continue;
        }
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, body).await?;
        written += 1;
    }
    Ok(written)
}
