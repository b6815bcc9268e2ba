use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "quire",
    bin_name = "quire",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Notes with attachments, as flat text or structured blocks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides QUIRE_DATA and configuration)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print JSON instead of styled text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Content(ContentCommands),

    #[command(flatten)]
    Attachment(AttachmentCommands),

    #[command(flatten)]
    Data(DataCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Create a new note
    #[command(alias = "n")]
    Create {
        /// Title of the note
        title: String,

        /// Initial content, attachment markers allowed
        #[arg(default_value = "")]
        content: String,
    },

    /// List notes, newest first
    #[command(alias = "ls")]
    List,

    /// Show a note with its attachments resolved
    #[command(alias = "v")]
    View {
        /// Note index or id prefix
        note: String,
    },

    /// Permanently delete notes
    #[command(alias = "rm")]
    Delete {
        /// Note indexes or id prefixes
        #[arg(required = true, num_args = 1..)]
        notes: Vec<String>,
    },

    /// Print the storage path of notes
    Path {
        /// Note indexes or id prefixes (all notes when omitted)
        notes: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// List a note's editable units with their positions
    #[command(alias = "seg")]
    Segments {
        note: String,
    },

    /// Replace the text of one unit
    Edit {
        note: String,
        /// Unit position, as printed by `segments`
        index: usize,
        content: String,
    },

    /// Append a text unit
    Append {
        note: String,
        content: String,
    },

    /// Move a unit to another position
    #[command(alias = "mv")]
    Move {
        note: String,
        from: usize,
        to: usize,
    },

    /// Remove one unit; referenced attachments stay in the catalog
    Remove {
        note: String,
        index: usize,
    },

    /// Convert a flat note to structured blocks
    Upgrade {
        note: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttachmentCommands {
    /// Attach files to a note
    Attach {
        note: String,
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Attach a URL to a note
    Link {
        note: String,
        url: String,
        /// Display name (defaults to the URL's host)
        #[arg(long, short)]
        name: Option<String>,
    },

    /// Remove an attachment record from a note's catalog
    Detach {
        note: String,
        attachment: String,
    },

    /// Set an image's display width; omit the width to reset it
    Resize {
        note: String,
        attachment: String,
        width: Option<u32>,
    },

    /// Rename an attachment
    Rename {
        note: String,
        attachment: String,
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export notes to a .tar.gz archive, or one note as Markdown
    Export {
        /// Note indexes or id prefixes (all notes when omitted)
        notes: Vec<String>,

        /// Archive path (defaults to a timestamped name in the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print a single note as Markdown instead of writing an archive
        #[arg(long, conflicts_with = "output")]
        markdown: bool,
    },

    /// Import notes from archives, JSON snapshots, Markdown or text files
    Import {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Report dangling references and unreferenced attachments
    Doctor,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quire").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn naked_invocation_has_no_command() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn create_content_defaults_to_empty() {
        match parse(&["create", "Title"]).command {
            Some(Commands::Core(CoreCommands::Create { title, content })) => {
                assert_eq!(title, "Title");
                assert_eq!(content, "");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn resize_width_is_optional() {
        match parse(&["resize", "1", "att-x"]).command {
            Some(Commands::Attachment(AttachmentCommands::Resize { width, .. })) => {
                assert_eq!(width, None)
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse(&["resize", "1", "att-x", "320"]).command {
            Some(Commands::Attachment(AttachmentCommands::Resize { width, .. })) => {
                assert_eq!(width, Some(320))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["list", "-vv", "--json"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
    }

    #[test]
    fn markdown_conflicts_with_output() {
        let err = Cli::try_parse_from(["quire", "export", "1", "--markdown", "-o", "x.tgz"]);
        assert!(err.is_err());
    }

    #[test]
    fn attach_requires_files() {
        assert!(Cli::try_parse_from(["quire", "attach", "1"]).is_err());
    }
}
