//! Block tag host seam.
//!
//! A site generator registers block tags through `TagRegistry::builder()` once
//! at startup and then dispatches each tag occurrence through
//! `TagRegistry::render`. There is no process-wide registry: the host owns the
//! built value and may share it behind `Arc` across rendering threads.
//!
//! Tags never render their enclosed region themselves. The host hands them a
//! `BlockBody` capability that produces the region's rendered text; a failure
//! there belongs to the host and is propagated unchanged.
//!
//! Built-in tags:
//! - `TerminalTag` (registered as `terminal` by default): terminal-window markup
//!   with an optional prompt column, see `core_render::terminal`.

use std::collections::BTreeMap;
use std::sync::Arc;

use core_render::{RenderOptions, TerminalRenderer};
use thiserror::Error;
use tracing::{debug, trace};

/// Default tag name for the terminal block.
pub const TERMINAL_TAG: &str = "terminal";

/// Host capability rendering the enclosed region of a block on demand.
pub trait BlockBody {
    fn render_body(&self) -> anyhow::Result<String>;
}

impl BlockBody for &str {
    fn render_body(&self) -> anyhow::Result<String> {
        Ok((*self).to_owned())
    }
}

impl BlockBody for String {
    fn render_body(&self) -> anyhow::Result<String> {
        Ok(self.clone())
    }
}

/// Adapter for hosts whose body rendering is a closure over their own context.
pub struct BodyFn<F>(pub F);

impl<F> BlockBody for BodyFn<F>
where
    F: Fn() -> anyhow::Result<String>,
{
    fn render_body(&self) -> anyhow::Result<String> {
        (self.0)()
    }
}

/// A block tag handler. `markup` is the raw text following the tag name at the
/// call site, passed through untouched.
pub trait BlockTag: Send + Sync {
    /// Stable identifier for logs / diagnostics (not the registered name).
    fn kind(&self) -> &'static str;
    fn render(&self, markup: &str, body: &dyn BlockBody) -> anyhow::Result<String>;
}

/// Terminal-window block: prompt token from `markup`, content from the body.
#[derive(Debug, Clone, Default)]
pub struct TerminalTag {
    renderer: TerminalRenderer,
}

impl TerminalTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            renderer: TerminalRenderer::with_options(options),
        }
    }
}

impl BlockTag for TerminalTag {
    fn kind(&self) -> &'static str {
        "terminal"
    }

    fn render(&self, markup: &str, body: &dyn BlockBody) -> anyhow::Result<String> {
        let content = body.render_body()?;
        Ok(self.renderer.render(&content, markup))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tag name must not be empty")]
    EmptyTagName,
    #[error("tag `{0}` registered more than once")]
    DuplicateTag(String),
    #[error("no block tag registered as `{0}`")]
    UnknownTag(String),
}

/// Collects tag registrations; validation happens in `build`.
#[derive(Default)]
pub struct TagRegistryBuilder {
    entries: Vec<(String, Arc<dyn BlockTag>)>,
}

impl TagRegistryBuilder {
    pub fn register(mut self, name: impl Into<String>, tag: impl BlockTag + 'static) -> Self {
        self.entries.push((name.into(), Arc::new(tag)));
        self
    }

    pub fn build(self) -> Result<TagRegistry, RegistryError> {
        let mut tags: BTreeMap<String, Arc<dyn BlockTag>> = BTreeMap::new();
        for (name, tag) in self.entries {
            if name.trim().is_empty() {
                return Err(RegistryError::EmptyTagName);
            }
            if tags.contains_key(&name) {
                return Err(RegistryError::DuplicateTag(name));
            }
            debug!(target: "plugin.registry", tag = name.as_str(), kind = tag.kind(), "tag_registered");
            tags.insert(name, tag);
        }
        Ok(TagRegistry { tags })
    }
}

/// Immutable tag name -> handler mapping.
pub struct TagRegistry {
    tags: BTreeMap<String, Arc<dyn BlockTag>>,
}

impl TagRegistry {
    pub fn builder() -> TagRegistryBuilder {
        TagRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&dyn BlockTag> {
        self.tags.get(name).map(|t| &**t)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Dispatch one tag occurrence.
    pub fn render(&self, name: &str, markup: &str, body: &dyn BlockBody) -> anyhow::Result<String> {
        let tag = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTag(name.to_owned()))?;
        trace!(target: "plugin.registry", tag = name, kind = tag.kind(), "tag_dispatch");
        tag.render(markup, body)
    }
}
