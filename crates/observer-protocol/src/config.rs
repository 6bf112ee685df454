//! Bridge configuration and platform selection

use serde::{Deserialize, Serialize};

/// Options forwarded to the native start call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Watch the media store for new screenshot files instead of using the
    /// Android 14+ screen-capture callback. Ignored outside Android.
    pub use_legacy_detection: bool,
}

impl BridgeConfig {
    pub fn legacy() -> Self {
        Self {
            use_legacy_detection: true,
        }
    }

    pub fn screen_capture_callback() -> Self {
        Self {
            use_legacy_detection: false,
        }
    }

    /// Flag for the Android observer, which asks for the inverse: true
    /// selects the Android 14+ screen-capture callback
    pub fn detect_screen_capture(&self) -> bool {
        !self.use_legacy_detection
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::legacy()
    }
}

/// Target platform the bridge talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Android,
    Ios,
    /// Desktop, editor and simulation builds
    Unsupported,
}

impl Platform {
    /// Platform this binary was compiled for
    pub const fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Unsupported
        }
    }

    pub fn has_native_support(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Whether `BridgeConfig::use_legacy_detection` changes behavior here
    pub fn honors_detection_strategy(&self) -> bool {
        matches!(self, Self::Android)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_legacy_detection() {
        assert!(BridgeConfig::default().use_legacy_detection);
        assert!(!BridgeConfig::screen_capture_callback().use_legacy_detection);
    }

    #[test]
    fn test_detect_screen_capture_inverts_legacy_flag() {
        assert!(!BridgeConfig::default().detect_screen_capture());
        assert!(!BridgeConfig::legacy().detect_screen_capture());
        assert!(BridgeConfig::screen_capture_callback().detect_screen_capture());
    }

    #[test]
    fn test_platform_capabilities() {
        assert!(Platform::Android.honors_detection_strategy());
        assert!(!Platform::Ios.honors_detection_strategy());
        assert!(Platform::Ios.has_native_support());
        assert!(!Platform::Unsupported.has_native_support());
    }

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    #[test]
    fn test_current_platform_on_desktop() {
        assert_eq!(Platform::current(), Platform::Unsupported);
    }
}
