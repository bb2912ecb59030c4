// src/parser/mod.rs

pub mod classifier;

use std::sync::LazyLock;

use regex::Regex;

use crate::models::segment::{MessageSegment, Role};

pub use classifier::{AlwaysUser, KeywordClassifier, SpeakerClassifier};

/// A speaker label followed by a colon (ASCII or full-width).
/// ASCII labels must start on a word boundary so "Name:" is not read as "me:".
static SPEAKER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:user|me|you|human|chatgpt|claude|assistant|bot|gpt|ai)|我|用户|人|助手|机器人)[:：]",
    )
    .expect("speaker label pattern")
});

/// Date-like prefix such as `2024-01-01 10:00:00` or `[2024/01/01 10:00]`,
/// or a bare clock time such as `[10:32]`.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?(?:\d{4}[-/]\d{2}[-/]\d{2}|\d{1,2}:\d{2}(?::\d{2})?\]?$)")
        .expect("timestamp pattern")
});

fn role_for_label(label: &str) -> Role {
    let name = label.trim_end_matches([':', '：']).to_lowercase();
    match name.as_str() {
        "user" | "me" | "you" | "human" | "我" | "用户" | "人" => Role::User,
        _ => Role::Assistant,
    }
}

/// Lead text worth keeping: not a timestamp and not bare punctuation such as
/// the `**` of a markdown `**User:**` label.
fn is_meaningful_lead(lead: &str) -> bool {
    lead.chars().any(char::is_alphanumeric) && !TIMESTAMP.is_match(lead)
}

/// Turns a pasted chat log into speaker-attributed segments.
///
/// Parsing is best effort: any input yields some segmentation and nothing
/// here returns an error. Authors fix mistakes in the preview step.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser<C = KeywordClassifier> {
    classifier: C,
}

impl TranscriptParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: SpeakerClassifier> TranscriptParser<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn parse(&self, input: &str) -> Vec<MessageSegment> {
        let mut turns = TurnBuilder::default();

        let input = input.trim_start_matches('\u{feff}');

        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let labels: Vec<_> = SPEAKER_LABEL.find_iter(line).collect();

            let Some(first) = labels.first() else {
                self.push_plain(&mut turns, line);
                continue;
            };

            // Text before the first label is either noise to drop or
            // ordinary text belonging to whoever is speaking.
            let lead = line[..first.start()].trim();
            if is_meaningful_lead(lead) {
                self.push_plain(&mut turns, lead);
            }

            for (i, label) in labels.iter().enumerate() {
                let next = labels.get(i + 1);
                let mut text = line[label.end()..next.map_or(line.len(), |n| n.start())]
                    .trim()
                    .trim_start_matches('*')
                    .trim_start();
                // Closing emphasis of the next markdown label.
                if next.is_some() {
                    text = text.trim_end_matches('*').trim_end();
                }
                turns.start(role_for_label(label.as_str()), text);
            }
        }

        let segments = turns.finish();
        tracing::debug!("Parsed transcript into {} segments", segments.len());
        segments
    }

    fn push_plain(&self, turns: &mut TurnBuilder, text: &str) {
        if turns.is_active() {
            turns.append(text);
        } else {
            turns.start(self.classifier.classify(text), text);
        }
    }
}

/// Accumulates the current turn and emits segments on each flush.
#[derive(Default)]
struct TurnBuilder {
    current: Option<(Role, String)>,
    segments: Vec<MessageSegment>,
}

impl TurnBuilder {
    fn is_active(&self) -> bool {
        self.current.is_some()
    }

    fn start(&mut self, role: Role, content: &str) {
        self.flush();
        self.current = Some((role, content.to_string()));
    }

    fn append(&mut self, text: &str) {
        if let Some((_, buf)) = self.current.as_mut() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(text);
        }
    }

    /// Empty turns (a bare "User:" line) are dropped.
    fn flush(&mut self) {
        if let Some((role, buf)) = self.current.take() {
            let content = buf.trim();
            if !content.is_empty() {
                let order = self.segments.len();
                self.segments.push(MessageSegment {
                    id: format!("segment-{}", order),
                    role,
                    content: content.to_string(),
                    order,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<MessageSegment> {
        self.flush();
        self.segments
    }
}

/// Parses with the default keyword classifier.
pub fn parse_transcript(input: &str) -> Vec<MessageSegment> {
    TranscriptParser::new().parse(input)
}

/// Renders segments back to canonical `User:` / `AI:` blocks.
pub fn format_transcript(segments: &[MessageSegment]) -> String {
    segments
        .iter()
        .map(|s| format!("{}: {}", s.role.label(), s.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(segments: &[MessageSegment]) -> Vec<(Role, &str)> {
        segments.iter().map(|s| (s.role, s.content.as_str())).collect()
    }

    #[test]
    fn one_segment_per_labeled_line() {
        let segments = parse_transcript("User: hi\nAI: hello\nUser: bye");
        assert_eq!(
            turns(&segments),
            vec![
                (Role::User, "hi"),
                (Role::Assistant, "hello"),
                (Role::User, "bye")
            ]
        );
        assert_eq!(segments[2].id, "segment-2");
        assert_eq!(segments[2].order, 2);
    }

    #[test]
    fn several_speakers_on_one_line() {
        let segments = parse_transcript("User: 1 GPT: 2");
        assert_eq!(turns(&segments), vec![(Role::User, "1"), (Role::Assistant, "2")]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_transcript("").is_empty());
        assert!(parse_transcript("  \n\n \t\n").is_empty());
    }

    #[test]
    fn timestamps_are_stripped() {
        let segments = parse_transcript(
            "2024-01-01 10:00:00 User: what is rust\n2024-01-01 10:00:05 Assistant: a language",
        );
        assert_eq!(
            turns(&segments),
            vec![(Role::User, "what is rust"), (Role::Assistant, "a language")]
        );
    }

    #[test]
    fn clock_times_and_bom_are_stripped() {
        let segments = parse_transcript("\u{feff}[10:32] User: hi\n10:33:05 AI: hello");
        assert_eq!(turns(&segments), vec![(Role::User, "hi"), (Role::Assistant, "hello")]);
    }

    #[test]
    fn unlabeled_lines_continue_current_turn() {
        let segments = parse_transcript("AI: step one\nstep two\n\nstep three");
        assert_eq!(turns(&segments), vec![(Role::Assistant, "step one step two step three")]);
    }

    #[test]
    fn text_before_inline_label_joins_current_turn() {
        let segments = parse_transcript("AI: first\nthanks! User: next");
        assert_eq!(
            turns(&segments),
            vec![(Role::Assistant, "first thanks!"), (Role::User, "next")]
        );
    }

    #[test]
    fn localized_labels() {
        let segments = parse_transcript("我：怎么学习 Rust\n助手: 先读官方书");
        assert_eq!(
            turns(&segments),
            vec![(Role::User, "怎么学习 Rust"), (Role::Assistant, "先读官方书")]
        );
    }

    #[test]
    fn labels_inside_words_are_ignored() {
        let segments = parse_transcript("User: fill the form\nName: Bob");
        assert_eq!(turns(&segments), vec![(Role::User, "fill the form Name: Bob")]);
    }

    #[test]
    fn bare_label_turns_are_dropped() {
        let segments = parse_transcript("User:\nAI: hello");
        assert_eq!(turns(&segments), vec![(Role::Assistant, "hello")]);
        assert_eq!(segments[0].order, 0);
    }

    #[test]
    fn unlabeled_opening_uses_classifier() {
        let segments = parse_transcript("According to the docs, run it twice.\nUser: ok");
        assert_eq!(
            turns(&segments),
            vec![
                (Role::Assistant, "According to the docs, run it twice."),
                (Role::User, "ok")
            ]
        );

        let parser = TranscriptParser::with_classifier(AlwaysUser);
        let segments = parser.parse("According to the docs, run it twice.");
        assert_eq!(segments[0].role, Role::User);
    }

    #[test]
    fn format_uses_canonical_labels() {
        let segments = parse_transcript("Human: a\nClaude: b");
        assert_eq!(format_transcript(&segments), "User: a\n\nAI: b");
    }
}
