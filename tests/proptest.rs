//! Property-based tests for chatmd.
//!
//! These tests generate random exports to check the pipeline invariants.

use proptest::prelude::*;

use chatmd::core::hash::{message_id, short_id};
use chatmd::core::output::human_readable_size;
use chatmd::prelude::*;

const NOISE: &[&str] = &["Lol sounds good", "lol", "xD", ":)", "+1", "thanks!!"];

fn noise() -> NoiseTerms {
    NoiseTerms::new(NOISE.iter().copied())
}

/// Generate a random Message using fast strategies (no regex!)
fn arb_message() -> impl Strategy<Value = Message> {
    (
        prop::sample::select(vec!["1", "2", "3", "4", "5", "6"]),
        prop::sample::select(vec![
            "Hello".to_string(),
            "lol".to_string(),
            "Lol sounds good to me".to_string(),
            "thanks!! :)".to_string(),
            "Привет мир".to_string(),
            String::new(),
            "   ".to_string(),
            "two  spaces\n\n\n\nand lines".to_string(),
            "🎉🔥 emoji xD".to_string(),
            "pipe | in text".to_string(),
        ]),
        prop::option::of(prop::sample::select(vec![
            "2024-01-01T00:00:00+00:00",
            "2024-01-01T00:01:00+00:00",
            "2024-01-01T00:02:00+00:00",
            "2024-01-02T12:00:00+00:00",
        ])),
        any::<bool>(),
        prop::option::of(prop::sample::select(vec!["1", "2", "3", "9"])),
        any::<bool>(),
    )
        .prop_map(|(id, content, ts, bot, reply_to, attached)| {
            let author = if bot { Author::new("robot").bot() } else { Author::new("human") };
            let mut message = Message::new(id, content).with_author(author);
            message.timestamp = ts.map(str::to_string);
            if let Some(target) = reply_to {
                message = message.with_reply_to(target);
            }
            if attached {
                message = message.with_attachment(Attachment::new("notes.txt", 100));
            }
            message
        })
}

/// Generate a random export with a bounded number of messages
fn arb_export(max_len: usize) -> impl Strategy<Value = Export> {
    prop::collection::vec(arb_message(), 0..max_len)
        .prop_map(|messages| Export::new("general").with_messages(messages))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// Bot messages never survive filtering and never count as references
    #[test]
    fn bots_are_excluded(export in arb_export(20)) {
        let normalizer = Normalizer::new(&noise()).unwrap();
        let filtered = FilteredMessages::new(&export.messages, &normalizer);

        prop_assert!(filtered.sorted().all(|m| !m.is_bot()));

        let human_targets: Vec<&str> = export
            .messages
            .iter()
            .filter(|m| !m.is_bot())
            .filter_map(|m| m.reply_target())
            .collect();
        for id in filtered.referenced_ids() {
            prop_assert!(human_targets.contains(id));
        }
    }

    /// Equal timestamps keep their input order
    #[test]
    fn sort_is_stable(export in arb_export(20)) {
        let filtered = FilteredMessages::new(&export.messages, &Normalizer::default());
        let sorted: Vec<&Message> = filtered.sorted().collect();

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match (a.timestamp(), b.timestamp()) {
                (Some(x), Some(y)) => prop_assert!(x <= y),
                (None, Some(_)) => prop_assert!(false, "missing timestamp sorted first"),
                _ => {}
            }
            if a.timestamp() == b.timestamp() {
                let pos = |m: &Message| export.messages.iter().position(|o| std::ptr::eq(o, m)).unwrap();
                prop_assert!(pos(a) < pos(b));
            }
        }
    }

    /// Visible means content, attachment or an inbound reference
    #[test]
    fn visibility_rule_holds(export in arb_export(20)) {
        let normalizer = Normalizer::new(&noise()).unwrap();
        let filtered = FilteredMessages::new(&export.messages, &normalizer);
        for entry in filtered.visible() {
            let m = entry.message;
            prop_assert!(
                entry.has_content()
                    || m.has_attachments()
                    || m.id().is_some_and(|id| filtered.is_referenced(id))
            );
        }
    }

    // ============================================
    // NORMALIZATION PROPERTIES
    // ============================================

    /// Normalizing twice changes nothing
    #[test]
    fn normalization_is_idempotent(
        words in prop::collection::vec(
            prop::sample::select(vec!["lol", "xD", ":)", "hello", "world", "  ", "\n", "\t", "+1", "Lol sounds good"]),
            0..12,
        )
    ) {
        let normalizer = Normalizer::new(&noise()).unwrap();
        let text = words.join(" ");
        let once = normalizer.normalize(&text);
        prop_assert_eq!(normalizer.normalize(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
        prop_assert!(!once.contains("  "));
        prop_assert!(!once.contains("\n\n\n"));
    }

    // ============================================
    // RENDERING PROPERTIES
    // ============================================

    /// Rendering is deterministic and never shows bot-only content
    #[test]
    fn render_is_deterministic(export in arb_export(15)) {
        let renderer = Renderer::new(&noise(), RenderConfig::default()).unwrap();
        let first = renderer.render(&export);
        prop_assert_eq!(&first, &renderer.render(&export));
        prop_assert!(first.starts_with("---\nschema: chatlog-md-v1\n"));
        prop_assert!(!first.contains("|user=robot"));
    }

    /// One heading per visible message
    #[test]
    fn one_heading_per_visible_message(export in arb_export(15)) {
        let normalizer = Normalizer::new(&noise()).unwrap();
        let filtered = FilteredMessages::new(&export.messages, &normalizer);
        let renderer = Renderer::with_normalizer(normalizer.clone(), RenderConfig::default());
        let out = renderer.render(&export);
        let headings = out.lines().filter(|l| l.starts_with("### m:")).count();
        prop_assert_eq!(headings, filtered.visible_count());
    }

    // ============================================
    // HASH AND SIZE PROPERTIES
    // ============================================

    /// Short ids are stable lowercase hex without sign or padding
    #[test]
    fn short_id_is_lowercase_hex(input in ".{0,40}") {
        let id = short_id(&input);
        prop_assert_eq!(&id, &short_id(&input));
        prop_assert!(!id.is_empty() && id.len() <= 8);
        prop_assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert!(id == "0" || !id.starts_with('0'));
        prop_assert_eq!(message_id(Some(input.as_str())), format!("m:{id}"));
    }

    /// Sizes always carry a unit and at most one decimal
    #[test]
    fn size_format_shape(bytes in any::<u64>()) {
        let size = human_readable_size(bytes);
        prop_assert!(size.ends_with('B'));
        if bytes < 1024 {
            prop_assert_eq!(size, format!("{bytes}B"));
        } else {
            let number = &size[..size.len() - 2];
            let (_, decimals) = number.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 1);
        }
    }
}
