//! Viewport classification used to pick the shell layout.

/// Screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Taller than wide
    #[default]
    Portrait,
    /// Wider than tall (or square)
    Landscape,
}

/// What the shell knows about the device it runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    /// Narrower than the mobile breakpoint
    pub is_mobile: bool,
    /// Current orientation
    pub orientation: Orientation,
}

impl DeviceProfile {
    /// Classifies a viewport of `width` x `height` logical points.
    pub fn from_size(width: f32, height: f32, breakpoint: f32) -> Self {
        Self {
            is_mobile: width < breakpoint,
            orientation: if height > width {
                Orientation::Portrait
            } else {
                Orientation::Landscape
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_tall_viewport_is_mobile_portrait() {
        let profile = DeviceProfile::from_size(390.0, 844.0, 768.0);
        assert!(profile.is_mobile);
        assert_eq!(profile.orientation, Orientation::Portrait);
    }

    #[test]
    fn breakpoint_width_is_desktop() {
        let profile = DeviceProfile::from_size(768.0, 600.0, 768.0);
        assert!(!profile.is_mobile);
        assert_eq!(profile.orientation, Orientation::Landscape);
    }
}
