use std::sync::LazyLock;

use regex::Regex;

use crate::models::segment::Role;

/// Guesses the speaker of a line that carries no speaker label.
///
/// Only consulted while no speaker is active; once any turn has started,
/// unlabeled lines are treated as continuations.
pub trait SpeakerClassifier {
    fn classify(&self, line: &str) -> Role;
}

impl<F> SpeakerClassifier for F
where
    F: Fn(&str) -> Role,
{
    fn classify(&self, line: &str) -> Role {
        self(line)
    }
}

static QUESTION_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[?？]|请问|如何|怎么|什么|为什么|哪里|什么时候|\b(?:how|what|why|where|when|which|who|can you|could you)\b",
    )
    .expect("question marker pattern")
});

static EXPLANATORY_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)根据|建议|可以|应该|需要|首先|然后|最后|总结|\b(?:according to|suggest|recommend|should|first|then|finally|in summary)\b",
    )
    .expect("explanatory marker pattern")
});

/// Keyword sniffing over English and Chinese markers.
///
/// Questions win over explanations when a line has both; anything
/// matching neither is attributed to the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl SpeakerClassifier for KeywordClassifier {
    fn classify(&self, line: &str) -> Role {
        if QUESTION_MARKERS.is_match(line) {
            Role::User
        } else if EXPLANATORY_MARKERS.is_match(line) {
            Role::Assistant
        } else {
            Role::User
        }
    }
}

/// Attributes every unlabeled opening line to the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysUser;

impl SpeakerClassifier for AlwaysUser {
    fn classify(&self, _line: &str) -> Role {
        Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_are_user_turns() {
        let c = KeywordClassifier;
        assert_eq!(c.classify("Is this right?"), Role::User);
        assert_eq!(c.classify("请问这个怎么用"), Role::User);
        assert_eq!(c.classify("How do I sort a vec"), Role::User);
    }

    #[test]
    fn explanations_are_assistant_turns() {
        let c = KeywordClassifier;
        assert_eq!(c.classify("First, install the toolchain."), Role::Assistant);
        assert_eq!(c.classify("根据你的描述，建议先备份"), Role::Assistant);
        assert_eq!(c.classify("You should restart the service"), Role::Assistant);
    }

    #[test]
    fn question_beats_explanation() {
        assert_eq!(
            KeywordClassifier.classify("Should I first run the tests?"),
            Role::User
        );
    }

    #[test]
    fn unmarked_lines_default_to_user() {
        assert_eq!(KeywordClassifier.classify("hello there"), Role::User);
        assert_eq!(AlwaysUser.classify("First, do this."), Role::User);
    }

    #[test]
    fn closures_are_classifiers() {
        let c = |_: &str| Role::Assistant;
        assert_eq!(c.classify("anything"), Role::Assistant);
    }
}
