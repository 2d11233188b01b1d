// device.rs - Device capability gate
//
// Evaluated once at startup, before any permission is requested.
// Desktops and AR-less phones get the fallback screen.

const MOBILE_KEYWORDS: &[&str] = &[
    "android", "webos", "iphone", "ipad", "ipod", "blackberry", "iemobile", "opera mini", "windows phone",
];

/// Result of the host's `navigator.xr.isSessionSupported("immersive-ar")` query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArSupport {
    Supported,
    Unsupported,
    /// Query not resolved yet
    Pending,
}

impl From<Option<bool>> for ArSupport {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Supported,
            Some(false) => Self::Unsupported,
            None => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Not a phone or tablet; show a QR code to open on mobile
    Desktop,
    /// Mobile browser without immersive AR
    ArUnsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Ar,
    Pending,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub mobile: bool,
    pub ar: ArSupport,
}

impl DeviceCapabilities {
    pub fn from_user_agent(user_agent: &str, ar: ArSupport) -> Self {
        Self { mobile: is_mobile(user_agent), ar }
    }

    pub fn gate(&self) -> GateOutcome {
        if !self.mobile {
            return GateOutcome::Fallback(FallbackReason::Desktop);
        }
        match self.ar {
            ArSupport::Supported => GateOutcome::Ar,
            ArSupport::Unsupported => GateOutcome::Fallback(FallbackReason::ArUnsupported),
            ArSupport::Pending => GateOutcome::Pending,
        }
    }
}

pub fn is_mobile(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_KEYWORDS.iter().any(|keyword| ua.contains(keyword))
}

/// Browser user agent, empty when unavailable
#[cfg(target_arch = "wasm32")]
pub fn browser_user_agent() -> String {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default()
}
