//! `sx content` and `sx content-id` command implementations.

use clap::Args;
use sx_site::ContentKey;

use crate::commands::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the content command.
#[derive(Args)]
pub(crate) struct ContentArgs {
    /// Content id, or a path relative to the site root.
    key: String,
}

impl ContentArgs {
    /// Execute the content command: fetch and print raw content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be fetched.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.open_site()?;
        let key = ContentKey::parse(&self.key);
        tracing::info!(%key, "Fetching content");

        let body = site.load_content(&key)?;
        Output::new().result(&body);
        Ok(())
    }
}

/// Arguments for the content-id command.
#[derive(Args)]
pub(crate) struct ContentIdArgs {
    /// Page id.
    page_id: i64,

    /// Content name (case-sensitive).
    name: String,
}

impl ContentIdArgs {
    /// Execute the content-id command: print the id of a page's named content.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be loaded or nothing matches.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.open_site()?;
        let model = site.load_tree()?;

        let id = model
            .content_id_by_page_and_name(self.page_id, &self.name)
            .ok_or_else(|| {
                CliError::NotFound(format!(
                    "no content named \"{}\" on page {}",
                    self.name, self.page_id
                ))
            })?;
        Output::new().result(&id.to_string());
        Ok(())
    }
}
