//! `sx theme` command implementation.

use clap::Args;
use sx_site::Theme;

use crate::commands::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the theme command.
#[derive(Args)]
pub(crate) struct ThemeArgs {
    /// Page id.
    page_id: i64,
}

impl ThemeArgs {
    /// Execute the theme command: print the page's effective theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be loaded or the site has no themes.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let site = global.open_site()?;
        let model = site.load_tree()?;

        if model.find_page_by_id(self.page_id).is_none() {
            output.warning(&format!(
                "Page {} not found, showing the site default theme",
                self.page_id
            ));
        }

        let theme = model
            .resolve_theme_for_page(self.page_id)
            .ok_or_else(|| CliError::NotFound("site has no themes".to_owned()))?;
        output.result(&describe(theme));
        Ok(())
    }
}

/// One-line theme description.
fn describe(theme: &Theme) -> String {
    let mut parts = vec![match theme.id {
        Some(id) => format!("[{id}]"),
        None => "[-]".to_owned(),
    }];
    if let Some(name) = &theme.name {
        parts.push(name.clone());
    }
    let location = match (&theme.dir, &theme.file) {
        (Some(dir), Some(file)) => Some(format!("{}/{file}", dir.trim_end_matches('/'))),
        (None, Some(file)) => Some(file.clone()),
        (Some(dir), None) => Some(dir.clone()),
        (None, None) => None,
    };
    if let Some(location) = location {
        parts.push(location);
    }
    if theme.is_default {
        parts.push("*default".to_owned());
    }
    parts.join(" ")
}
