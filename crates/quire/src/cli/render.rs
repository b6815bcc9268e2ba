//! # Rendering
//!
//! Every function here turns library result types into a finished string; the
//! command handlers only print. Layout math (widths, truncation, padding) is
//! Unicode-aware via `unicode-width`.

use super::styles;
use chrono::{DateTime, Utc};
use quireapp::api::{CmdMessage, DoctorFinding, MessageLevel, NoteView, UnitLine, ViewUnit};
use quireapp::catalog::AttachmentCatalog;
use quireapp::embed::RenderVariant;
use quireapp::index::DisplayNote;
use quireapp::markdown::to_markdown;
use quireapp::marker::MARKER_RE;
use quireapp::model::Attachment;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const INDEX_WIDTH: usize = 4;
const SEPARATOR: &str = "--------------------------------";

/// One line per note: index, title with a content preview, attachment count, age.
pub fn render_note_list(notes: &[DisplayNote]) -> String {
    let mut out = String::new();
    for dn in notes {
        let idx = format!("{:>width$}. ", dn.index, width = INDEX_WIDTH - 1);

        let preview = one_line(&MARKER_RE.replace_all(&dn.note.content, "[$2]"));
        let title_content = if preview.is_empty() {
            dn.note.title.clone()
        } else {
            format!("{} {}", dn.note.title, preview)
        };

        let suffix = match dn.note.attachments.len() {
            0 => String::new(),
            n => format!(" +{}", n),
        };

        let fixed = idx.width() + suffix.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let shown = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(shown.width());

        out.push_str(&format!(
            "{}{}{}{}{}\n",
            styles::INDEX.apply_to(idx),
            shown,
            " ".repeat(padding),
            styles::MUTED.apply_to(suffix),
            styles::TIME.apply_to(format_time_ago(dn.note.created_at)),
        ));
    }
    out
}

pub fn render_note_views(views: &[NoteView]) -> String {
    let mut out = String::new();
    for (i, view) in views.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {}",
            styles::INDEX.apply_to(view.index),
            styles::TITLE.apply_to(&view.title)
        ));
        if view.structured {
            out.push_str(&format!(" {}", styles::MUTED.apply_to("(structured)")));
        }
        out.push('\n');
        out.push_str(&format!("{}\n", styles::MUTED.apply_to(SEPARATOR)));

        let units: Vec<String> = view.units.iter().map(render_unit).collect();
        // Flat segments are inline pieces of one string; blocks stand on their own lines.
        let body = if view.structured {
            units.join("\n")
        } else {
            units.concat()
        };
        out.push_str(&body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

fn render_unit(unit: &ViewUnit) -> String {
    match unit {
        ViewUnit::Text { content } => content.clone(),
        ViewUnit::Block { block } => to_markdown(std::slice::from_ref(block), &AttachmentCatalog::new())
            .trim_end()
            .to_string(),
        ViewUnit::Attachment {
            attachment,
            variant,
        } => styles::ATTACHMENT
            .apply_to(attachment_label(attachment, variant))
            .to_string(),
        ViewUnit::Missing { attachment_id } => styles::MISSING
            .apply_to(format!("[missing attachment {}]", attachment_id))
            .to_string(),
    }
}

fn attachment_label(attachment: &Attachment, variant: &RenderVariant) -> String {
    let mut label = format!("[{}: {}", variant.label(), attachment.name);
    match variant {
        RenderVariant::Image { width: Some(w) } => label.push_str(&format!(" {}px", w)),
        RenderVariant::VideoEmbed { video_id } => label.push_str(&format!(" #{}", video_id)),
        RenderVariant::SocialEmbed { status_id } => label.push_str(&format!(" #{}", status_id)),
        _ => {}
    }
    label.push(']');
    // Uploaded payloads are inline data; only external locators are worth printing.
    if !attachment.is_data_uri() {
        label.push_str(&format!(" <{}>", attachment.url));
    }
    label
}

pub fn render_units(units: &[UnitLine]) -> String {
    let mut out = String::new();
    for unit in units {
        let head = format!("{:>3}  {:<12} ", unit.index, unit.kind);
        let available = LINE_WIDTH.saturating_sub(head.width());
        out.push_str(&format!(
            "{}{}\n",
            styles::INDEX.apply_to(head),
            truncate_to_width(&one_line(&unit.preview), available)
        ));
    }
    out
}

pub fn render_findings(findings: &[DoctorFinding]) -> String {
    let mut out = String::new();
    for finding in findings {
        out.push_str(&format!(
            "{} {}\n",
            styles::INDEX.apply_to(finding.index),
            styles::TITLE.apply_to(&finding.title)
        ));
        for id in &finding.dangling {
            out.push_str(&format!(
                "    {} {}\n",
                styles::MISSING.apply_to("dangling"),
                id
            ));
        }
        for id in &finding.unreferenced {
            out.push_str(&format!(
                "    {} {}\n",
                styles::MUTED.apply_to("unreferenced"),
                id
            ));
        }
    }
    out
}

pub fn render_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let styled = match message.level {
            MessageLevel::Info => styles::MUTED.apply_to(&message.content),
            MessageLevel::Success => styles::SUCCESS.apply_to(&message.content),
            MessageLevel::Warning => styles::WARNING.apply_to(&message.content),
            MessageLevel::Error => styles::ERROR.apply_to(&message.content),
        };
        out.push_str(&format!("{}\n", styled));
    }
    out
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let text = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", text, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;
    use quireapp::blocks::Block;
    use quireapp::index::index_notes;
    use quireapp::model::{AttachmentId, AttachmentKind, Note};

    fn plain(s: String) -> String {
        strip_ansi_codes(&s).into_owned()
    }

    #[test]
    fn list_line_shows_marker_names_not_ids() {
        let mut note = Note::new("Trip", "see [File: photo.png](att-1) here");
        note.attachments.push(Attachment::new(
            "photo.png",
            AttachmentKind::Image,
            "data:image/png;base64,AA",
        ));
        let out = plain(render_note_list(&index_notes(vec![note])));

        assert!(out.starts_with("  1. Trip see [photo.png] here"));
        assert!(out.contains(" +1"));
        assert!(!out.contains("att-1"));
    }

    #[test]
    fn long_titles_are_truncated_to_line_width() {
        let note = Note::new("x".repeat(200), "");
        let out = plain(render_note_list(&index_notes(vec![note])));
        let line = out.lines().next().unwrap();
        assert!(line.contains('…'));
        assert!(line.width() <= LINE_WIDTH);
    }

    #[test]
    fn flat_view_renders_inline_and_placeholders() {
        let view = NoteView {
            index: 2,
            id: Note::new("", "").id,
            title: "N".into(),
            structured: false,
            units: vec![
                ViewUnit::Text {
                    content: "look ".into(),
                },
                ViewUnit::Attachment {
                    attachment: Attachment::new(
                        "clip",
                        AttachmentKind::Url,
                        "https://youtu.be/dQw4w9WgXcQ",
                    ),
                    variant: RenderVariant::VideoEmbed {
                        video_id: "dQw4w9WgXcQ".into(),
                    },
                },
                ViewUnit::Text {
                    content: " and ".into(),
                },
                ViewUnit::Missing {
                    attachment_id: AttachmentId::from("att-9"),
                },
            ],
            missing: 1,
        };
        let out = plain(render_note_views(&[view]));
        assert!(out.starts_with("2 N\n"));
        assert!(out.contains(
            "look [video-embed: clip #dQw4w9WgXcQ] <https://youtu.be/dQw4w9WgXcQ> and [missing attachment att-9]\n"
        ));
    }

    #[test]
    fn structured_view_puts_blocks_on_lines() {
        let view = NoteView {
            index: 1,
            id: Note::new("", "").id,
            title: "S".into(),
            structured: true,
            units: vec![
                ViewUnit::Block {
                    block: Block::Heading {
                        level: 2,
                        text: "Plan".into(),
                    },
                },
                ViewUnit::Block {
                    block: Block::paragraph("go"),
                },
            ],
            missing: 0,
        };
        let out = plain(render_note_views(&[view]));
        assert!(out.contains("(structured)"));
        assert!(out.ends_with("## Plan\ngo\n"));
    }

    #[test]
    fn data_uri_payloads_are_not_printed() {
        let img = Attachment::new("p.png", AttachmentKind::Image, "data:image/png;base64,AAAA");
        let label = attachment_label(&img, &RenderVariant::Image { width: Some(120) });
        assert_eq!(label, "[image: p.png 120px]");
    }

    #[test]
    fn units_are_listed_one_per_line() {
        let units = vec![
            UnitLine {
                index: 0,
                kind: "text",
                preview: "multi\nline".into(),
            },
            UnitLine {
                index: 1,
                kind: "attachment",
                preview: "[File: a](att-1)".into(),
            },
        ];
        let out = plain(render_units(&units));
        assert_eq!(
            out,
            "  0  text         multi line\n  1  attachment   [File: a](att-1)\n"
        );
    }

    #[test]
    fn findings_list_both_kinds() {
        let findings = vec![DoctorFinding {
            index: 1,
            title: "T".into(),
            dangling: vec![AttachmentId::from("att-9")],
            unreferenced: vec![AttachmentId::from("att-2")],
        }];
        let out = plain(render_findings(&findings));
        assert_eq!(out, "1 T\n    dangling att-9\n    unreferenced att-2\n");
    }

    #[test]
    fn messages_one_per_line() {
        let out = plain(render_messages(&[
            CmdMessage::success("done"),
            CmdMessage::warning("careful"),
        ]));
        assert_eq!(out, "done\ncareful\n");
    }
}
