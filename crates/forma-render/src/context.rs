use forma_value::{ErrorMap, Value};

/// Visual styling system. Themes change markup classing and asset
/// payloads, never control semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Bootstrap,
    Material,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Theme> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bootstrap" => Some(Theme::Bootstrap),
            "material" => Some(Theme::Material),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Bootstrap => "bootstrap",
            Theme::Material => "material",
        }
    }
}

/// How a render call ships the theme's CSS/JS payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetMode {
    /// Inline the payload; the fragment is self-contained.
    #[default]
    Vendored,
    /// Reference pinned versions from a CDN.
    Cdn,
    /// Emit nothing; the caller supplies assets.
    None,
}

impl AssetMode {
    /// Parse a mode name, accepting the aliases older callers used for
    /// the vendored mode.
    pub fn from_name(name: &str) -> Option<AssetMode> {
        match name.trim().to_ascii_lowercase().as_str() {
            "vendored" | "vendor" | "embedded" | "inline" => Some(AssetMode::Vendored),
            "cdn" => Some(AssetMode::Cdn),
            "none" => Some(AssetMode::None),
            _ => None,
        }
    }
}

/// Everything one render call needs besides the schema. Constructed fresh
/// per call and never persisted.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: Theme,
    pub asset_mode: AssetMode,
    /// When false, the asset prologue/epilogue is suppressed entirely,
    /// regardless of `asset_mode`.
    pub include_assets: bool,
    /// Prior values for re-population after a failed submission.
    pub values: Option<&'a Value>,
    /// Violations to display inline next to their controls.
    pub errors: Option<&'a ErrorMap>,
    /// When set, controls are wrapped in a `<form>` posting here.
    pub submit_url: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            asset_mode: AssetMode::default(),
            include_assets: true,
            values: None,
            errors: None,
            submit_url: None,
        }
    }

    pub fn asset_mode(mut self, mode: AssetMode) -> Self {
        self.asset_mode = mode;
        self
    }

    pub fn without_assets(mut self) -> Self {
        self.include_assets = false;
        self
    }

    pub fn values(mut self, values: &'a Value) -> Self {
        self.values = Some(values);
        self
    }

    pub fn errors(mut self, errors: &'a ErrorMap) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn submit_url(mut self, url: impl Into<String>) -> Self {
        self.submit_url = Some(url.into());
        self
    }
}
