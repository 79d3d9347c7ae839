//! `sx save-content` and `sx save-tree` command implementations.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;

use crate::commands::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the save-content command.
#[derive(Args)]
pub(crate) struct SaveContentArgs {
    /// Content id.
    id: i64,

    /// File with the new content (default: read stdin).
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl SaveContentArgs {
    /// Execute the save-content command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the server refuses the save.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let content = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let site = global.open_site()?;
        site.save_content(self.id, &content)
            .map_err(|e| CliError::from_save(e, &format!("content {}", self.id)))?;

        output.success(&format!("Saved content {}", self.id));
        Ok(())
    }
}

/// Arguments for the save-tree command.
#[derive(Args)]
pub(crate) struct SaveTreeArgs {
    /// Site description file to upload.
    file: PathBuf,
}

impl SaveTreeArgs {
    /// Execute the save-tree command.
    ///
    /// The document is checked locally first so a broken file is never sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or invalid, or the server
    /// refuses the save.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let xml = std::fs::read_to_string(&self.file)?;

        let site = global.open_site()?;
        let model = site.load_tree_from_str(&xml)?;
        output.info(&format!(
            "Uploading {} ({} pages)...",
            self.file.display(),
            model.page_count()
        ));

        site.save_tree(&xml)
            .map_err(|e| CliError::from_save(e, "site description"))?;

        output.success("Saved site description");
        Ok(())
    }
}
