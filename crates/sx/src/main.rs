//! SX CLI - SiteXML client.
//!
//! Provides commands for:
//! - `tree`: Show the site page tree
//! - `page`: Show one page
//! - `content` / `content-id`: Fetch content, look up content ids
//! - `theme`: Show a page's effective theme
//! - `save-content` / `save-tree`: Upload edits

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    ContentArgs, ContentIdArgs, GlobalArgs, PageArgs, SaveContentArgs, SaveTreeArgs, ThemeArgs,
    TreeArgs,
};
use output::Output;

/// SX - SiteXML client.
#[derive(Parser)]
#[command(name = "sx", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the site page tree.
    Tree(TreeArgs),
    /// Show a page by id.
    Page(PageArgs),
    /// Fetch a content block by id or path.
    Content(ContentArgs),
    /// Print the id of a page's content block by name.
    ContentId(ContentIdArgs),
    /// Show the effective theme of a page.
    Theme(ThemeArgs),
    /// Upload new markup for a content block.
    SaveContent(SaveContentArgs),
    /// Upload a complete site description.
    SaveTree(SaveTreeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = &cli.global;
    let result = match cli.command {
        Commands::Tree(args) => args.execute(global),
        Commands::Page(args) => args.execute(global),
        Commands::Content(args) => args.execute(global),
        Commands::ContentId(args) => args.execute(global),
        Commands::Theme(args) => args.execute(global),
        Commands::SaveContent(args) => args.execute(global),
        Commands::SaveTree(args) => args.execute(global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sx",
            "page",
            "3",
            "--base-url",
            "http://example.com",
            "-v",
        ])
        .unwrap();

        assert!(cli.global.verbose);
        assert!(matches!(cli.command, Commands::Page(_)));
    }

    #[test]
    fn test_save_content_file_is_optional() {
        assert!(Cli::try_parse_from(["sx", "save-content", "12"]).is_ok());
        assert!(Cli::try_parse_from(["sx", "save-content", "12", "--file", "a.html"]).is_ok());
        assert!(Cli::try_parse_from(["sx", "save-content", "abc"]).is_err());
    }
}
