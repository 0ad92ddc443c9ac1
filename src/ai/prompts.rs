//! Prompt construction for pull request descriptions.

use std::fmt;

use clap::ValueEnum;

use crate::ai::{ChatMessage, CompletionRequest};

/// System prompt shared by every detail level.
pub const SYSTEM_PROMPT: &str = "You are an expert software engineer writing pull request descriptions. \
You will receive the unified diff between the base branch and the work to be merged. \
Describe what the code changes actually do, based only on the diff.";

/// How much detail the generated description should carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum DetailLevel {
    /// A very brief description.
    Low,
    /// A concise description.
    #[default]
    Medium,
    /// A comprehensive description.
    High,
}

impl DetailLevel {
    /// Maximum response size, in tokens.
    pub fn max_tokens(self) -> u32 {
        self.profile().max_tokens
    }

    /// Instructions describing the expected length and depth.
    pub fn instructions(self) -> &'static str {
        self.profile().instructions
    }

    fn profile(self) -> DetailProfile {
        match self {
            Self::Low => DetailProfile {
                max_tokens: 256,
                instructions: "Write a very brief pull request description. \
                    The Summary section is a single sentence. \
                    The Changes section lists only the most important changes, at most three bullets.",
            },
            Self::Medium => DetailProfile {
                max_tokens: 1024,
                instructions: "Write a concise pull request description. \
                    The Summary section is a short paragraph. \
                    The Changes section is a bullet list of the notable changes.",
            },
            Self::High => DetailProfile {
                max_tokens: 2048,
                instructions: "Write a comprehensive pull request description. \
                    The Summary section explains the purpose and impact of the change. \
                    The Changes section is a detailed bullet list covering every file touched, \
                    including behaviour changes, new interfaces and removed code.",
            },
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

struct DetailProfile {
    max_tokens: u32,
    instructions: &'static str,
}

/// Builds the user prompt embedding `diff` verbatim.
pub fn generate_user_prompt(diff: &str, detail: DetailLevel) -> String {
    let mut prompt = String::new();
    prompt.push_str(detail.instructions());
    prompt.push_str("\n\n");
    prompt.push_str(
        "Respond in Markdown with exactly two sections, \"Summary\" and \"Changes\", and nothing else. \
         Do not wrap the response in code fences.\n\n",
    );
    prompt.push_str("=== GIT DIFF ===\n");
    prompt.push_str(diff);
    if !diff.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("=== END GIT DIFF ===\n");
    prompt
}

/// Builds the completion request for `diff` at `detail` against `model`.
pub fn build_request(diff: &str, detail: DetailLevel, model: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(generate_user_prompt(diff, detail)),
        ],
        max_tokens: detail.max_tokens(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ChatRole, DEFAULT_MODEL};

    const DIFF: &str = "diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt\n@@ -1 +1,2 @@\n 1\n+2\n";

    #[test]
    fn budgets_grow_with_detail() {
        let low = build_request(DIFF, DetailLevel::Low, DEFAULT_MODEL).max_tokens;
        let medium = build_request(DIFF, DetailLevel::Medium, DEFAULT_MODEL).max_tokens;
        let high = build_request(DIFF, DetailLevel::High, DEFAULT_MODEL).max_tokens;

        assert!(low < medium);
        assert!(medium < high);
        assert_eq!((low, medium, high), (256, 1024, 2048));
    }

    #[test]
    fn medium_is_default() {
        assert_eq!(DetailLevel::default(), DetailLevel::Medium);
    }

    #[test]
    fn prompt_embeds_diff_verbatim() {
        for detail in [DetailLevel::Low, DetailLevel::Medium, DetailLevel::High] {
            let request = build_request(DIFF, detail, DEFAULT_MODEL);
            assert!(request.prompt().contains(DIFF));
            assert!(request.prompt().starts_with(detail.instructions()));
        }
    }

    #[test]
    fn prompt_requests_summary_and_changes_without_fences() {
        let prompt = generate_user_prompt(DIFF, DetailLevel::Medium);
        assert!(prompt.contains("\"Summary\" and \"Changes\""));
        assert!(prompt.contains("Do not wrap the response in code fences"));
    }

    #[test]
    fn request_sends_system_then_user_message() {
        let request = build_request(DIFF, DetailLevel::High, "gpt-4.1");
        let roles: Vec<ChatRole> = request.messages.iter().map(|m| m.role).collect();

        assert_eq!(roles, vec![ChatRole::System, ChatRole::User]);
        assert_eq!(request.model, "gpt-4.1");
    }

    #[test]
    fn instructions_differ_per_level() {
        assert!(DetailLevel::Low.instructions().contains("very brief"));
        assert!(DetailLevel::Medium.instructions().contains("concise"));
        assert!(DetailLevel::High.instructions().contains("comprehensive"));
    }

    #[test]
    fn diff_without_trailing_newline_is_terminated() {
        let prompt = generate_user_prompt("+x", DetailLevel::Low);
        assert!(prompt.ends_with("+x\n=== END GIT DIFF ===\n"));
    }
}
