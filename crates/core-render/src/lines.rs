//! Line accounting for the prompt column.
//!
//! The repetition count is `lines - 1`, where a final trailing newline does not
//! open a new line and empty content has zero lines. Content without a trailing
//! newline therefore gets one prompt fewer than it has visible lines, and empty
//! content yields `-1`, which renders as an empty column.

/// Number of prompt repetitions for `content`. Signed: empty content is `-1`.
pub fn prompt_repetitions(content: &str) -> isize {
    content.lines().count() as isize - 1
}

/// Repeat `prompt` `repetitions` times joined by a single `\n`. Non-positive
/// counts produce an empty column.
pub fn prompt_column(prompt: &str, repetitions: isize) -> String {
    let Ok(n) = usize::try_from(repetitions) else {
        return String::new();
    };
    std::iter::repeat_n(prompt, n).collect::<Vec<_>>().join("\n")
}
