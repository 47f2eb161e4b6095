//! Theme-parameterized HTML rendering.
//!
//! A render call is a pure function of schema and [`RenderContext`]: no
//! randomness, no clock, no shared state, so output is snapshot-testable
//! and calls can run concurrently. Each field kind maps to exactly one
//! markup template; the theme changes classing, icon placement and asset
//! payloads, never which control element a kind produces.

mod assets;
mod context;
mod escape;
mod render;

pub use context::{AssetMode, RenderContext, Theme};
pub use escape::escape_html;
pub use render::render;
