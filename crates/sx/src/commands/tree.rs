//! `sx tree` command implementation.

use std::fmt::Write;

use clap::Args;
use sx_site::{Page, SiteModel};

use crate::commands::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Print the whole model as JSON.
    #[arg(long)]
    json: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site description cannot be loaded.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let site = global.open_site()?;
        let model = site.load_tree()?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&*model)?);
            return Ok(());
        }

        output.highlight(model.name.as_deref().unwrap_or("(unnamed site)"));
        output.result_raw(&render_outline(&model));
        output.info(&format!(
            "\n{} pages, {} themes",
            model.page_count(),
            model.themes.len()
        ));
        Ok(())
    }
}

/// Indented page outline, one page per line.
pub(crate) fn render_outline(model: &SiteModel) -> String {
    fn walk(out: &mut String, pages: &[Page], depth: usize) {
        for page in pages {
            let _ = writeln!(out, "{:indent$}{}", "", page_label(page), indent = depth * 2);
            walk(out, page.subpages(), depth + 1);
        }
    }

    let mut out = String::new();
    walk(&mut out, &model.pages, 0);
    out
}

/// One-line page description: `[id] name (alias)` plus flags.
pub(crate) fn page_label(page: &Page) -> String {
    let mut label = match page.id {
        Some(id) => format!("[{id}]"),
        None => "[-]".to_owned(),
    };
    if let Some(name) = &page.name {
        label.push(' ');
        label.push_str(name);
    }
    if let Some(alias) = &page.alias {
        let _ = write!(label, " ({alias})");
    }
    if page.start_page.is_some() {
        label.push_str(" *start");
    }
    if page.hides_navigation() {
        label.push_str(" *hidden");
    }
    label
}
