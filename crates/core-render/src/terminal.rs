//! Terminal-window markup for a rendered block.
//!
//! Output shape (prompt present):
//!
//! ```text
//! <div class="terminal">
//!   [<div class="terminal-header">{header}</div>]
//!   <div class="terminal-body flex-container flex-row">
//!     <div class="pad-right"><pre>{prompt column}</pre></div>
//!     <div><pre>{content}</pre></div>
//!   </div>
//! </div>
//! ```
//!
//! emitted without whitespace between elements. With an empty prompt the
//! `pad-right` column is omitted. The header is absent unless configured.
//!
//! Inputs are interpolated verbatim unless `RenderOptions::escape` is set.
//! Content containing markup is trusted to come from the site author.

use std::borrow::Cow;

use tracing::trace;

use crate::escape::escape_html;
use crate::lines::{prompt_column, prompt_repetitions};

/// One tag occurrence: the rendered block body plus the tag's markup token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub inner_content: String,
    pub prompt: String,
}

impl RenderRequest {
    pub fn new(inner_content: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            inner_content: inner_content.into(),
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Title bar text. `None` keeps the headerless layout.
    pub header: Option<String>,
    /// HTML-escape prompt, content and header before interpolation.
    pub escape: bool,
}

/// Stateless renderer; cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    options: RenderOptions,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render_request(&self, request: &RenderRequest) -> String {
        self.render(&request.inner_content, &request.prompt)
    }

    /// Wrap `inner_content` in terminal markup, prefixed by a prompt column when
    /// `prompt` is non-empty. Never fails.
    pub fn render(&self, inner_content: &str, prompt: &str) -> String {
        let repetitions = prompt_repetitions(inner_content);
        let content = self.interpolate(inner_content);

        let body = if prompt.is_empty() {
            format!("<div><pre>{content}</pre></div>")
        } else {
            let column = prompt_column(&self.interpolate(prompt), repetitions);
            format!(
                "<div class=\"pad-right\"><pre>{column}</pre></div><div><pre>{content}</pre></div>"
            )
        };

        let header = match self.options.header.as_deref() {
            Some(title) => format!(
                "<div class=\"terminal-header\">{}</div>",
                self.interpolate(title)
            ),
            None => String::new(),
        };

        trace!(
            target: "render.terminal",
            repetitions,
            prompt_len = prompt.len(),
            content_len = inner_content.len(),
            escape = self.options.escape,
            "terminal_block_rendered"
        );

        format!(
            "<div class=\"terminal\">{header}<div class=\"terminal-body flex-container flex-row\">{body}</div></div>"
        )
    }

    fn interpolate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.options.escape {
            Cow::Owned(escape_html(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Render with default options (no header, no escaping).
pub fn render(inner_content: &str, prompt: &str) -> String {
    TerminalRenderer::new().render(inner_content, prompt)
}
