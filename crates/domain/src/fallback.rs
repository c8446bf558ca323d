use std::fmt;

/// Which target a fallback response should point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackMode {
    /// The process-wide fallback URL, or a 404 when none is configured.
    Global,
    /// The `to=` target of the most recent record that carries one.
    To,
    /// The `website=` target of the most recent record that carries one.
    Website,
}

impl FallbackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackMode::Global => "global",
            FallbackMode::To => "to",
            FallbackMode::Website => "website",
        }
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackDirective {
    pub mode: FallbackMode,
    pub code: u16,
}

impl FallbackDirective {
    pub fn new(mode: FallbackMode, code: u16) -> Self {
        Self { mode, code }
    }
}
