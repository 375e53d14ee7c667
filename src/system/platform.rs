// Host platform detection
//
// 키맵 모드(windowsOnly/macintoshOnly) 판정을 위한 OS 계열 분류

/// 호스트 OS 계열
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Macintosh,
    Windows,
    #[default]
    Other,
}

impl Platform {
    pub fn is_macintosh(&self) -> bool {
        matches!(self, Platform::Macintosh)
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// `navigator.platform` 스타일 문자열 분류 ("MacIntel", "Win32", ...)
    pub fn from_platform_string(platform: &str) -> Platform {
        if platform.contains("Mac") {
            Platform::Macintosh
        } else if platform.contains("Win") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// 상태바 표시용 문자열
    pub fn display_label(&self) -> &'static str {
        match self {
            Platform::Macintosh => "macOS",
            Platform::Windows => "Windows",
            Platform::Other => "Other",
        }
    }
}

/// 현재 빌드 대상 플랫폼
pub fn current_platform() -> Platform {
    #[cfg(target_os = "macos")]
    {
        Platform::Macintosh
    }
    #[cfg(windows)]
    {
        Platform::Windows
    }
    #[cfg(not(any(target_os = "macos", windows)))]
    {
        Platform::Other
    }
}
