//! Device classes derived from the window width.

use serde::{Deserialize, Serialize};

/// Breakpoint widths in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoints {
    /// Tablet and up - 768px
    pub md: f32,
    /// Desktop and up - 1024px
    pub lg: f32,
}

impl Breakpoints {
    pub const DEFAULT: Self = Self {
        md: 768.0,
        lg: 1024.0,
    };
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Device-class abstraction derived from breakpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Width < `md` (768px)
    Mobile,
    /// `md` <= width < `lg` (1024px)
    Tablet,
    /// width >= `lg` (1024px)
    #[default]
    Desktop,
}

/// Classify a window width into mobile/tablet/desktop.
///
/// Unknown widths (zero, negative, NaN) classify as `Desktop`.
pub fn device_class_for_width(width: f32) -> DeviceClass {
    let bp = Breakpoints::DEFAULT;
    match width {
        w if w.is_nan() || w <= 0.0 => DeviceClass::Desktop,
        w if w < bp.md => DeviceClass::Mobile,
        w if w < bp.lg => DeviceClass::Tablet,
        _ => DeviceClass::Desktop,
    }
}

#[cfg(test)]
mod tests {
    use super::{device_class_for_width, DeviceClass};

    #[test]
    fn test_device_class_breakpoints() {
        assert_eq!(device_class_for_width(375.0), DeviceClass::Mobile);
        assert_eq!(device_class_for_width(767.0), DeviceClass::Mobile);
        assert_eq!(device_class_for_width(768.0), DeviceClass::Tablet);
        assert_eq!(device_class_for_width(1023.0), DeviceClass::Tablet);
        assert_eq!(device_class_for_width(1024.0), DeviceClass::Desktop);
        assert_eq!(device_class_for_width(1440.0), DeviceClass::Desktop);
    }

    #[test]
    fn test_unknown_width_is_desktop() {
        assert_eq!(device_class_for_width(0.0), DeviceClass::Desktop);
        assert_eq!(device_class_for_width(f32::NAN), DeviceClass::Desktop);
    }
}
