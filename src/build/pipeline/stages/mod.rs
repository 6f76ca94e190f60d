//! Default pipeline stages.
//!
//! Page stages, in order:
//!
//! 1. **IndexStage** - Home page with featured and recent articles
//! 2. **ArticlesStage** - One page per article
//! 3. **AuthorsStage** - One page per author with their articles
//! 4. **NewsStage**, **GuidesStage** - Articles filtered by tag
//! 5. **GamesStage**, **AboutStage** - Games list and author roster
//! 6. **CategoriesStage** - One page per category
//!
//! Finalize stages: **StaticStage** copies static files and **DataStage**
//! writes `data.json`.

mod articles;
mod authors;
mod categories;
mod data;
mod index;
mod listings;
mod static_files;

pub use articles::ArticlesStage;
pub use authors::AuthorsStage;
pub use categories::CategoriesStage;
pub use data::DataStage;
pub use index::IndexStage;
pub use listings::{AboutStage, GamesStage, GuidesStage, NewsStage};
pub use static_files::StaticStage;

use serde_json::{Value as JsonValue, json};

/// The banner block of a page.
fn hero(image: &str, title: &str, subtitle: &str) -> JsonValue {
    json!({
        "image": image,
        "title": title,
        "subtitle": subtitle,
    })
}
