// Writes a selected article to disk instead of the terminal.

use crate::model::ArticlePage;
use crate::render::RULE;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name the file is created under; the article title is appended to it
/// once the write has finished.
pub const DEFAULT_FILE_PREFIX: &str = "wiki_search_";

/// Final file name for an article titled `title`.
pub fn file_name_for(title: &str) -> String {
    format!("{DEFAULT_FILE_PREFIX}{}", title.replace('/', "_"))
}

/// Write the title banner and the raw extract to `dir`, then rename the
/// file to carry the article title. Returns the final path.
///
/// Any filesystem error is returned as is; a partially written file is
/// left in place.
pub fn write_article_to_file(dir: &Path, page: &ArticlePage) -> Result<PathBuf> {
    let draft = dir.join(DEFAULT_FILE_PREFIX);
    let file = File::create(&draft)
        .with_context(|| format!("Failed to create {}", draft.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{RULE}")?;
    writeln!(writer, "= {}", page.title)?;
    writeln!(writer, "{RULE}")?;
    writeln!(writer, "{}", page.extract)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", draft.display()))?;
    drop(writer);

    let target = dir.join(file_name_for(&page.title));
    fs::rename(&draft, &target)
        .with_context(|| format!("Failed to rename {} to {}", draft.display(), target.display()))?;
    log::debug!("article written to {}", target.display());
    Ok(target)
}
