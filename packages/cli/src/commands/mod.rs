pub mod formatters;
pub mod grid;
pub mod inspect;
pub mod render;
pub mod replay;

pub use formatters::{formatters, FormattersArgs};
pub use grid::{grid, GridArgs};
pub use inspect::{inspect, InspectArgs};
pub use render::{render, RenderArgs};
pub use replay::{replay, ReplayArgs};

use anyhow::{Context, Result};
use pagecraft_document::Page;
use serde::Deserialize;
use std::path::Path;

/// A page file holds either one page or an array of pages
#[derive(Deserialize)]
#[serde(untagged)]
enum PageFile {
    Many(Vec<Page>),
    One(Page),
}

pub(crate) fn load_pages(path: &Path) -> Result<Vec<Page>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;

    let pages = match serde_json::from_str::<PageFile>(&content)
        .with_context(|| format!("{} is not a page file", path.display()))?
    {
        PageFile::Many(pages) => pages,
        PageFile::One(page) => vec![page],
    };
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_single_page_and_array() {
        let dir = tempfile::tempdir().unwrap();
        let page = r#"{"id":"home","label":"Home","route":"/","content":{"id":"root","type":"stack","children":[]}}"#;

        let single = dir.path().join("single.json");
        std::fs::write(&single, page).unwrap();
        assert_eq!(load_pages(&single).unwrap().len(), 1);

        let many = dir.path().join("many.json");
        std::fs::write(&many, format!("[{page}, {}]", page.replace("home", "about"))).unwrap();
        let pages = load_pages(&many).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].id, "about");
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();

        assert!(load_pages(&path).is_err());
        assert!(load_pages(&dir.path().join("missing.json")).is_err());
    }
}
