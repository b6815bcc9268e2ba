//! Seeded randomized checks over the content model.

use quireapp::blocks;
use quireapp::codec::{self, Segment};
use quireapp::embed::{classify_url, RenderVariant};
use quireapp::marker;
use quireapp::model::{Attachment, AttachmentKind, Note};
use quireapp::mutation::{self, NoteEditor, Units};
use quireapp::render::{render, ParsedNote, Rendered, RenderedSegment, Resolution};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x5eed_cafe;

const PIECES: &[&str] = &[
    "a",
    "word ",
    "\n",
    "é",
    "[",
    "]",
    "(",
    ")",
    "[File: ",
    "[Link: ",
    "](att-",
    "[File: photo.png](att-1)",
    "[Link: example.org](att-2)",
    "[File: ](att-empty)",
    "[Note: x](att-3)",
    "[File: x](other-4)",
    "[File: broken](att-",
];

fn random_flat(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..24);
    (0..len)
        .map(|_| *PIECES.choose(rng).unwrap())
        .collect::<String>()
}

#[test]
fn flat_round_trip_is_exact() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..500 {
        let text = random_flat(&mut rng);
        let segments = codec::decode(&text);
        assert!(!segments.is_empty());
        assert_eq!(codec::encode(&segments), text, "round trip of {:?}", text);
    }
}

#[test]
fn decoded_references_match_marker_scan() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0..200 {
        let text = random_flat(&mut rng);
        let from_segments: Vec<_> = codec::decode(&text)
            .iter()
            .filter_map(Segment::attachment_id)
            .cloned()
            .collect();
        assert_eq!(from_segments, marker::referenced_ids(&text));
    }
}

#[test]
fn reorder_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for _ in 0..200 {
        let original = codec::decode(&random_flat(&mut rng));
        let len = original.len();
        let mut units = original.clone();
        let from = rng.gen_range(0..len + 2);
        let to = rng.gen_range(0..len + 2);

        let moved = mutation::reorder(&mut units, from, to);

        assert_eq!(units.len(), len);
        let mut literals: Vec<&str> = units.iter().map(Segment::literal).collect();
        let mut expected: Vec<&str> = original.iter().map(Segment::literal).collect();
        literals.sort_unstable();
        expected.sort_unstable();
        assert_eq!(literals, expected);

        assert_eq!(codec::encode(&units).len(), codec::encode(&original).len());

        if moved {
            assert_eq!(units[to], original[from]);
        } else {
            assert_eq!(units, original);
        }
    }
}

#[test]
fn removal_never_empties_the_list() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let mut note = Note::new("N", random_flat(&mut rng));
    let mut editor = NoteEditor::open(&mut note);
    for _ in 0..200 {
        let len = editor.units().len();
        editor.remove(rng.gen_range(0..len + 1));
        assert!(!editor.units().is_empty());
    }
    assert_eq!(editor.units(), &Units::Flat(vec![Segment::empty()]));
}

#[test]
fn classifier_is_total() {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    let schemes = ["https://", "http://", "", "ftp://", "::"];
    let hosts = [
        "youtube.com/watch?v=",
        "youtu.be/",
        "x.com/someone/status/",
        "twitter.com/i/web/status/",
        "example.org/",
        "",
        " ",
    ];
    let tails = ["dQw4w9WgXcQ", "123456789", "abc", "", "%%", "short"];

    for _ in 0..100 {
        let url = format!(
            "{}{}{}",
            schemes.choose(&mut rng).unwrap(),
            hosts.choose(&mut rng).unwrap(),
            tails.choose(&mut rng).unwrap()
        );
        let variant = classify_url(&url);
        assert!(
            matches!(
                variant,
                RenderVariant::VideoEmbed { .. }
                    | RenderVariant::SocialEmbed { .. }
                    | RenderVariant::GenericLink { .. }
                    | RenderVariant::BrokenLink
            ),
            "{:?} classified as {:?}",
            url,
            variant
        );
        assert_eq!(variant, classify_url(&url));
    }
}

#[test]
fn dangling_references_render_placeholders_in_place() {
    let kept = Attachment::new("kept.pdf", AttachmentKind::Document, "data:application/pdf;base64,AA");
    let gone = Attachment::new("gone.png", AttachmentKind::Image, "data:image/png;base64,AA");

    let mut note = Note::new("N", "intro ");
    note.attachments.extend([kept.clone(), gone.clone()]);
    {
        let mut editor = NoteEditor::open(&mut note);
        editor.insert_attachments(&[kept.clone(), gone.clone()]);
    }
    note.attachments.remove(gone.id.as_str());

    let parsed = ParsedNote::of(&note);
    let rendered = render(&parsed, &note.attachments);
    assert_eq!(rendered.missing_count(), 1);

    let Rendered::Flat(units) = rendered else {
        panic!("flat note rendered as structured");
    };
    assert_eq!(units.len(), 3);
    assert_eq!(units[0], RenderedSegment::Text { content: "intro " });
    assert!(matches!(
        &units[1],
        RenderedSegment::Attachment(Resolution::Found { attachment, .. }) if attachment.id == kept.id
    ));
    assert!(matches!(
        &units[2],
        RenderedSegment::Attachment(Resolution::Missing { attachment_id }) if **attachment_id == gone.id
    ));
}

#[test]
fn structured_projection_tracks_renames() {
    let photo = Attachment::new("before.png", AttachmentKind::Image, "data:image/png;base64,AA");
    let mut note = Note::new("N", "caption");
    note.attachments.push(photo.clone());
    {
        let mut editor = NoteEditor::open_structured(&mut note);
        editor.insert_attachments(&[photo.clone()]);
    }
    assert_eq!(note.content, format!("caption\n[File: before.png]({})\n", photo.id));

    note.attachments.rename(photo.id.as_str(), "after.png").unwrap();
    let list = note.structured_content.clone().unwrap();
    assert_eq!(
        blocks::to_flat(&list, &note.attachments),
        format!("caption\n[File: after.png]({})\n", photo.id)
    );
}
