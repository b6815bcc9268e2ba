//! # CLI Layer
//!
//! This module is **one possible UI client** for quire; it is not the application
//! itself. It is the only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Sets up logging and the async runtime
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, via [`super::setup`]
//! 2. **Context Setup**: logging, then `quireapp::init::initialize`
//! 3. **Dispatch**: one handler per subcommand, each a single API call
//! 4. **Output Formatting**: [`super::render`], or JSON with `--json`

use super::render::{
    render_findings, render_messages, render_note_list, render_note_views, render_paths,
    render_units,
};
use super::setup::{
    AttachmentCommands, Cli, Commands, ContentCommands, CoreCommands, DataCommands,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use quireapp::api::{CmdResult, QuireApi};
use quireapp::commands::export::archive_name;
use quireapp::init::initialize;
use quireapp::store::fs::FileStore;
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: QuireApi<FileStore>,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.data.clone())?;
    let mut app = AppContext {
        api: ctx.api,
        json: cli.json,
    };

    match cli.command {
        None => handle_list(&app),
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Create { title, content } => {
                print_result(&app.api.create_note(title, content)?);
                Ok(())
            }
            CoreCommands::List => handle_list(&app),
            CoreCommands::View { note } => handle_view(&app, &note),
            CoreCommands::Delete { notes } => {
                print_result(&app.api.delete_notes(&notes)?);
                Ok(())
            }
            CoreCommands::Path { notes } => {
                let result = app.api.note_paths(&notes)?;
                print!("{}", render_paths(&result.note_paths));
                Ok(())
            }
        },
        Some(Commands::Content(cmd)) => handle_content(&mut app, cmd),
        Some(Commands::Attachment(cmd)) => handle_attachment(&mut app, cmd),
        Some(Commands::Data(cmd)) => handle_data(&mut app, cmd),
    }
}

/// Logs go to stderr: warnings by default, more with each `-v`. `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quireapp={level},quire={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_list(app: &AppContext) -> Result<()> {
    let result = app.api.list_notes()?;
    if app.json {
        let notes: Vec<_> = result
            .listed_notes
            .iter()
            .map(|dn| {
                json!({
                    "index": dn.index,
                    "id": dn.note.id,
                    "title": dn.note.title,
                    "structured": dn.note.is_structured(),
                    "attachments": dn.note.attachments.len(),
                    "createdAt": dn.note.created_at,
                    "updatedAt": dn.note.updated_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }
    print!("{}", render_note_list(&result.listed_notes));
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_view(app: &AppContext, note: &str) -> Result<()> {
    let result = app.api.view_note(note)?;
    if app.json {
        println!("{}", serde_json::to_string_pretty(&result.views)?);
        return Ok(());
    }
    print!("{}", render_note_views(&result.views));
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_content(app: &mut AppContext, cmd: ContentCommands) -> Result<()> {
    let result = match cmd {
        ContentCommands::Segments { note } => {
            let result = app.api.list_segments(&note)?;
            if app.json {
                println!("{}", serde_json::to_string_pretty(&result.units)?);
            } else {
                print!("{}", render_units(&result.units));
            }
            return Ok(());
        }
        ContentCommands::Edit {
            note,
            index,
            content,
        } => app.api.edit_segment(&note, index, content)?,
        ContentCommands::Append { note, content } => app.api.append_text(&note, content)?,
        ContentCommands::Move { note, from, to } => app.api.move_segment(&note, from, to)?,
        ContentCommands::Remove { note, index } => app.api.remove_segment(&note, index)?,
        ContentCommands::Upgrade { note } => app.api.upgrade_note(&note)?,
    };
    print_result(&result);
    Ok(())
}

fn handle_attachment(app: &mut AppContext, cmd: AttachmentCommands) -> Result<()> {
    let result = match cmd {
        AttachmentCommands::Attach { note, files } => {
            // Ingestion is the only async path; a current-thread runtime is all it needs.
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(app.api.attach_files(&note, &files))?
        }
        AttachmentCommands::Link { note, url, name } => app.api.link_url(&note, &url, name)?,
        AttachmentCommands::Detach { note, attachment } => {
            app.api.detach_attachment(&note, &attachment)?
        }
        AttachmentCommands::Resize {
            note,
            attachment,
            width,
        } => app.api.resize_attachment(&note, &attachment, width)?,
        AttachmentCommands::Rename {
            note,
            attachment,
            name,
        } => app.api.rename_attachment(&note, &attachment, name)?,
    };
    print_result(&result);
    Ok(())
}

fn handle_data(app: &mut AppContext, cmd: DataCommands) -> Result<()> {
    match cmd {
        DataCommands::Export {
            notes,
            output,
            markdown,
        } => {
            if markdown {
                let [note] = notes.as_slice() else {
                    bail!("--markdown exports exactly one note");
                };
                let result = app.api.export_markdown(note)?;
                if let Some(document) = &result.output {
                    print!("{}", document);
                }
                return Ok(());
            }
            let dest = output.unwrap_or_else(|| PathBuf::from(archive_name()));
            print_result(&app.api.export_archive(&notes, &dest)?);
        }
        DataCommands::Import { paths } => print_result(&app.api.import_paths(paths)?),
        DataCommands::Doctor => {
            let result = app.api.doctor()?;
            if app.json {
                println!("{}", serde_json::to_string_pretty(&result.findings)?);
                return Ok(());
            }
            print!("{}", render_findings(&result.findings));
            print!("{}", render_messages(&result.messages));
        }
    }
    Ok(())
}

fn print_result(result: &CmdResult) {
    print!("{}", render_messages(&result.messages));
}
