//! `sx page` command implementation.

use clap::Args;
use sx_site::Page;

use crate::commands::GlobalArgs;
use crate::commands::tree::page_label;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Page id.
    id: i64,

    /// Print the page subtree as JSON.
    #[arg(long)]
    json: bool,
}

impl PageArgs {
    /// Execute the page command.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be loaded or the page does not exist.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let site = global.open_site()?;
        let model = site.load_tree()?;

        let page = model
            .find_page_by_id(self.id)
            .ok_or_else(|| CliError::NotFound(format!("page {} not found", self.id)))?;

        if self.json {
            output.result(&serde_json::to_string_pretty(page)?);
        } else {
            output.highlight(&page_label(page));
            output.result_raw(&describe(page));
        }
        Ok(())
    }
}

/// Page details: theme reference, content blocks, metas and children.
fn describe(page: &Page) -> String {
    let mut lines = Vec::new();

    if let Some(theme) = page.theme_ref {
        lines.push(format!("theme: {theme}"));
    }
    for content in &page.content {
        lines.push(format!(
            "content [{}] {}{}",
            content.id.map_or_else(|| "-".to_owned(), |id| id.to_string()),
            content.name.as_deref().unwrap_or("(unnamed)"),
            content
                .content_type
                .as_deref()
                .map(|t| format!(" ({t})"))
                .unwrap_or_default(),
        ));
    }
    for meta in &page.metas {
        let key = meta
            .name
            .as_deref()
            .or(meta.http_equiv.as_deref())
            .unwrap_or("meta");
        lines.push(format!(
            "meta {key} = {}",
            meta.content.as_deref().unwrap_or(&meta.text)
        ));
    }
    for child in page.subpages() {
        lines.push(format!("page {}", page_label(child)));
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}
