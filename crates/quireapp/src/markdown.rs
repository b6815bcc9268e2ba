//! # Markdown Import and Export
//!
//! Markdown is an exchange format only; notes never store it.
//!
//! **Import** ([`parse_markdown`]) runs pulldown-cmark over a document and maps each
//! top-level construct to one block: headings, paragraphs, bullet/numbered lists,
//! task lists (→ checklists), block quotes, code blocks and tables. Inline
//! formatting is flattened to plain text. Links whose destination is an attachment
//! id are kept as literal markers, so a paragraph holding a marker comes back as
//! an attachment block.
//!
//! **Export** ([`to_markdown`]) writes blocks back out, resolving attachments
//! through the catalog: images become `![name](locator)`, everything else a link,
//! and dangling references a visible placeholder line.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::blocks::{self, Block, ChecklistItem};
use crate::catalog::AttachmentLookup;
use crate::model::{AttachmentKind, ATTACHMENT_ID_PREFIX};

pub fn parse_markdown(source: &str) -> Vec<Block> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS | Options::ENABLE_STRIKETHROUGH;
    let mut events = Parser::new_ext(source, options);
    let mut out = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::Start(tag) => {
                let inner = take_container(&mut events);
                convert(tag, &inner, &mut out);
            }
            Event::Text(text) if !text.trim().is_empty() => {
                out.push(Block::paragraph(text.trim().to_string()));
            }
            _ => {}
        }
    }

    if out.is_empty() {
        out.push(Block::paragraph(""));
    }
    out
}

/// Collect the events of the container whose `Start` was just consumed, up to
/// (not including) its matching `End`.
fn take_container<'a, I: Iterator<Item = Event<'a>>>(events: &mut I) -> Vec<Event<'a>> {
    let mut depth = 0usize;
    let mut inner = Vec::new();
    for event in events.by_ref() {
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return inner,
            Event::End(_) => depth -= 1,
            _ => {}
        }
        inner.push(event);
    }
    inner
}

fn convert(tag: Tag<'_>, inner: &[Event<'_>], out: &mut Vec<Block>) {
    match tag {
        Tag::Paragraph => {
            let text = inline_text(inner, "\n");
            if !text.trim().is_empty() {
                // Splits out attachment markers into their own blocks.
                out.extend(blocks::from_flat(&text));
            }
        }
        Tag::Heading { level, .. } => out.push(Block::Heading {
            level: heading_level(level),
            text: inline_text(inner, " ").trim().to_string(),
        }),
        Tag::BlockQuote(_) => out.push(Block::Quote {
            text: inline_text(inner, "\n").trim().to_string(),
        }),
        Tag::CodeBlock(kind) => {
            let language = match kind {
                CodeBlockKind::Fenced(info) => info
                    .split_whitespace()
                    .next()
                    .filter(|lang| !lang.is_empty())
                    .map(str::to_string),
                CodeBlockKind::Indented => None,
            };
            let mut code = inline_text(inner, "\n");
            if code.ends_with('\n') {
                code.pop();
            }
            out.push(Block::Code { language, code });
        }
        Tag::List(start) => out.push(list_block(start.is_some(), inner)),
        Tag::Table(_) => out.push(Block::Table {
            rows: table_rows(inner),
        }),
        Tag::HtmlBlock => {}
        _ => {
            let text = inline_text(inner, "\n");
            if !text.trim().is_empty() {
                out.push(Block::paragraph(text.trim().to_string()));
            }
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Flatten inline content to text. `line_break` separates soft/hard breaks and
/// consecutive paragraphs.
fn inline_text(events: &[Event<'_>], line_break: &str) -> String {
    let mut out = String::new();
    let mut marker_links: Vec<String> = Vec::new();

    for event in events {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(text),
            Event::SoftBreak | Event::HardBreak => out.push_str(line_break),
            Event::Start(Tag::Link { dest_url, .. })
                if dest_url.starts_with(ATTACHMENT_ID_PREFIX) =>
            {
                out.push('[');
                marker_links.push(dest_url.to_string());
            }
            Event::End(TagEnd::Link) => {
                if let Some(dest) = marker_links.pop() {
                    out.push_str("](");
                    out.push_str(&dest);
                    out.push(')');
                }
            }
            Event::End(TagEnd::Paragraph) => out.push_str(line_break),
            _ => {}
        }
    }

    while out.ends_with(line_break) && !line_break.is_empty() && line_break != " " {
        out.truncate(out.len() - line_break.len());
    }
    out
}

fn list_block(ordered: bool, inner: &[Event<'_>]) -> Block {
    let mut items: Vec<(String, Option<bool>)> = Vec::new();

    for event in inner {
        match event {
            Event::Start(Tag::Item) => items.push((String::new(), None)),
            Event::TaskListMarker(checked) => {
                if let Some(item) = items.last_mut() {
                    item.1 = Some(*checked);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(item) = items.last_mut() {
                    append_word(&mut item.0, text);
                }
            }
            _ => {}
        }
    }

    if items.iter().any(|(_, check)| check.is_some()) {
        Block::Checklist {
            items: items
                .into_iter()
                .map(|(text, check)| ChecklistItem::new(text, check.unwrap_or(false)))
                .collect(),
        }
    } else {
        let items = items.into_iter().map(|(text, _)| text).collect();
        if ordered {
            Block::NumberedList { items }
        } else {
            Block::BulletList { items }
        }
    }
}

fn table_rows(inner: &[Event<'_>]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for event in inner {
        match event {
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => rows.push(Vec::new()),
            Event::Start(Tag::TableCell) => {
                if let Some(row) = rows.last_mut() {
                    row.push(String::new());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(cell) = rows.last_mut().and_then(|row| row.last_mut()) {
                    append_word(cell, text);
                }
            }
            _ => {}
        }
    }
    rows
}

fn append_word(target: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

/// Render blocks as a Markdown document.
pub fn to_markdown<L: AttachmentLookup + ?Sized>(blocks: &[Block], lookup: &L) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(blocks.len());

    for block in blocks {
        let part = match block {
            Block::Paragraph { text } => text.clone(),
            Block::Heading { level, text } => {
                format!("{} {}", "#".repeat((*level).clamp(1, 6) as usize), text)
            }
            Block::BulletList { items } => items
                .iter()
                .map(|item| format!("- {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::NumberedList { items } => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Checklist { items } => items
                .iter()
                .map(|item| format!("- [{}] {}", if item.checked { "x" } else { " " }, item.text))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Quote { text } => text
                .lines()
                .map(|line| format!("> {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Code { language, code } => format!(
                "```{}\n{}\n```",
                language.as_deref().unwrap_or(""),
                code
            ),
            Block::Table { rows } => table_markdown(rows),
            Block::Attachment { attachment_id } => match lookup.lookup(attachment_id.as_str()) {
                Some(att) if att.kind == AttachmentKind::Image => {
                    format!("![{}]({})", att.name, att.url)
                }
                Some(att) => format!("[{}]({})", att.name, att.url),
                None => format!("> missing attachment `{}`", attachment_id),
            },
        };
        if !part.is_empty() {
            parts.push(part);
        }
    }

    let mut doc = parts.join("\n\n");
    doc.push('\n');
    doc
}

fn table_markdown(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };
    let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let line = |row: &Vec<String>| {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).map(|c| c.replace('|', "\\|")).unwrap_or_default())
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = vec![line(header), format!("|{}", " --- |".repeat(width))];
    lines.extend(rows.iter().skip(1).map(line));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AttachmentCatalog;
    use crate::model::AttachmentId;
    use crate::test_utils::{attachment, image};

    #[test]
    fn imports_headings_and_paragraphs() {
        let blocks = parse_markdown("# Title\n\nSome *emphasis* here.\n\n## Sub\n");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".into()
                },
                Block::paragraph("Some emphasis here."),
                Block::Heading {
                    level: 2,
                    text: "Sub".into()
                },
            ]
        );
    }

    #[test]
    fn imports_lists() {
        let blocks = parse_markdown("- eggs\n- milk\n\n1. one\n2. two\n");
        assert_eq!(
            blocks,
            vec![
                Block::BulletList {
                    items: vec!["eggs".into(), "milk".into()]
                },
                Block::NumberedList {
                    items: vec!["one".into(), "two".into()]
                },
            ]
        );
    }

    #[test]
    fn imports_task_lists_as_checklists() {
        let blocks = parse_markdown("- [x] done\n- [ ] todo\n");
        assert_eq!(
            blocks,
            vec![Block::Checklist {
                items: vec![ChecklistItem::new("done", true), ChecklistItem::new("todo", false)]
            }]
        );
    }

    #[test]
    fn imports_code_quote_and_table() {
        let source = "```rust\nfn main() {}\n```\n\n> quoted\n> text\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        let blocks = parse_markdown(source);
        assert_eq!(
            blocks[0],
            Block::Code {
                language: Some("rust".into()),
                code: "fn main() {}".into()
            }
        );
        assert_eq!(
            blocks[1],
            Block::Quote {
                text: "quoted\ntext".into()
            }
        );
        assert_eq!(
            blocks[2],
            Block::Table {
                rows: vec![
                    vec!["a".into(), "b".into()],
                    vec!["1".into(), "2".into()]
                ]
            }
        );
    }

    #[test]
    fn markers_become_attachment_blocks() {
        let blocks = parse_markdown("Intro\n\n[File: photo.png](att-1)\n");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph("Intro"),
                Block::Attachment {
                    attachment_id: AttachmentId::from("att-1")
                }
            ]
        );
    }

    #[test]
    fn ordinary_links_keep_their_text() {
        let blocks = parse_markdown("See [the docs](https://docs.rs).");
        assert_eq!(blocks, vec![Block::paragraph("See the docs.")]);
    }

    #[test]
    fn empty_document_has_one_paragraph() {
        assert_eq!(parse_markdown(""), vec![Block::paragraph("")]);
    }

    #[test]
    fn exports_every_block_kind() {
        let mut link = attachment("att-2", "Rust", AttachmentKind::Url);
        link.url = "https://rust-lang.org".into();
        let mut img = image("att-1", "photo.png");
        img.url = "data:image/png;base64,AA==".into();
        let catalog: AttachmentCatalog = vec![img, link].into_iter().collect();

        let blocks = vec![
            Block::Heading {
                level: 2,
                text: "Plan".into(),
            },
            Block::Checklist {
                items: vec![ChecklistItem::new("a", true), ChecklistItem::new("b", false)],
            },
            Block::NumberedList {
                items: vec!["x".into(), "y".into()],
            },
            Block::Quote {
                text: "l1\nl2".into(),
            },
            Block::Code {
                language: None,
                code: "echo".into(),
            },
            Block::Table {
                rows: vec![vec!["h|1".into(), "h2".into()], vec!["c".into()]],
            },
            Block::Attachment {
                attachment_id: AttachmentId::from("att-1"),
            },
            Block::Attachment {
                attachment_id: AttachmentId::from("att-2"),
            },
            Block::Attachment {
                attachment_id: AttachmentId::from("att-9"),
            },
        ];

        let md = to_markdown(&blocks, &catalog);
        let expected = "## Plan\n\n\
            - [x] a\n- [ ] b\n\n\
            1. x\n2. y\n\n\
            > l1\n> l2\n\n\
            ```\necho\n```\n\n\
            | h\\|1 | h2 |\n| --- | --- |\n| c |  |\n\n\
            ![photo.png](data:image/png;base64,AA==)\n\n\
            [Rust](https://rust-lang.org)\n\n\
            > missing attachment `att-9`\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn exported_markdown_reimports_structure() {
        let blocks = vec![
            Block::Heading {
                level: 1,
                text: "T".into(),
            },
            Block::BulletList {
                items: vec!["a".into(), "b".into()],
            },
            Block::paragraph("end"),
        ];
        let md = to_markdown(&blocks, &AttachmentCatalog::new());
        assert_eq!(parse_markdown(&md), blocks);
    }
}
