//! Markdown-Stripping Normalizer
//!
//! Roadmap free text arrives from an LLM and is peppered with markdown
//! markers. Before display every field goes through [`clean`], which strips
//! markers through a fixed, order-dependent substitution sequence:
//!
//! code fences → inline code → headings → bold(`**`) → italic(`*`) →
//! bold(`__`) → italic(`_`) → leading bullet → leading ordinal → trim
//!
//! Reordering changes output for nested-emphasis text, so the sequence is
//! fixed. The sequence runs to a fixpoint, which makes `clean` idempotent;
//! termination is guaranteed because every changed pass strictly shortens
//! the string (every substitution only deletes characters).

use std::sync::LazyLock;

use regex::Regex;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9]*\n?").expect("fence pattern"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6} ").expect("heading pattern"));
static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern"));
static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern"));
static BOLD_UNDERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").expect("bold underscore pattern"));
static ITALIC_UNDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.*?)_").expect("italic underscore pattern"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[-*] ").expect("bullet pattern"));
static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\. ").expect("ordinal pattern"));

/// Strip markdown markers from roadmap free text.
///
/// Idempotent: `clean(clean(x)) == clean(x)` for every input.
pub fn clean(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        let next = clean_pass(&text);
        if next == text {
            return next;
        }
        text = next;
    }
}

/// One application of the ordered substitution sequence.
fn clean_pass(text: &str) -> String {
    let text = FENCE.replace_all(text, "");
    let text = text.replace('`', "");
    let text = HEADING.replace_all(&text, "");
    let text = BOLD_STARS.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let text = BOLD_UNDERS.replace_all(&text, "$1");
    let text = ITALIC_UNDER.replace_all(&text, "$1");
    let text = BULLET.replace_all(&text, "");
    let text = ORDINAL.replace_all(&text, "");
    text.trim().to_string()
}
