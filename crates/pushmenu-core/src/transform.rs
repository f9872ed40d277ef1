#![forbid(unsafe_code)]

//! Inline transforms and the wrapper translation formula.

use crate::config::MenuType;

/// An inline CSS transform applied by the menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Clear the inline transform so the stylesheet applies again.
    Identity,
    /// `translate3d(Xpx,0,0)`.
    TranslateX(f64),
    /// Park a panel off-screen to the left, shifted by a further `offset` px:
    /// `translate3d(-100%,0,0) translate3d(-offset px,0,0)`.
    Offscreen { offset: f64 },
}

impl Transform {
    /// Explicit zero translation used when the menu resets.
    pub const ZERO: Self = Self::TranslateX(0.0);

    /// CSS `transform` value. Identity renders as the empty string.
    #[must_use]
    pub fn to_css(&self) -> String {
        match *self {
            Self::Identity => String::new(),
            Self::TranslateX(px) => format!("translate3d({},0,0)", px_value(px)),
            Self::Offscreen { offset } => format!(
                "translate3d(-100%,0,0) translate3d({},0,0)",
                px_value(-offset)
            ),
        }
    }
}

impl core::fmt::Display for Transform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Bare `0` for zero, `<n>px` otherwise, matching hand-written CSS.
fn px_value(px: f64) -> String {
    if px == 0.0 {
        "0".to_owned()
    } else {
        format!("{px}px")
    }
}

/// Extra offset for `level`: `(level - 1) * spacing`, 0 at level 0 and 1.
#[inline]
#[must_use]
pub fn level_offset(level: u32, spacing: f64) -> f64 {
    f64::from(level.saturating_sub(1)) * spacing
}

/// Wrapper translation with `level` levels open.
///
/// Overlap mode adds `level_offset` to the container width; cover mode
/// always slides by exactly the container width.
#[must_use]
pub fn wrapper_translation(menu_type: MenuType, container_width: f64, level: u32, spacing: f64) -> f64 {
    match menu_type {
        MenuType::Overlap => container_width + level_offset(level, spacing),
        MenuType::Cover => container_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn css_forms() {
        assert_eq!(Transform::Identity.to_css(), "");
        assert_eq!(Transform::ZERO.to_css(), "translate3d(0,0,0)");
        assert_eq!(Transform::TranslateX(300.0).to_css(), "translate3d(300px,0,0)");
        assert_eq!(
            Transform::TranslateX(262.5).to_css(),
            "translate3d(262.5px,0,0)"
        );
        assert_eq!(
            Transform::Offscreen { offset: 40.0 }.to_css(),
            "translate3d(-100%,0,0) translate3d(-40px,0,0)"
        );
        assert_eq!(
            Transform::Offscreen { offset: 0.0 }.to_css(),
            "translate3d(-100%,0,0) translate3d(0,0,0)"
        );
    }

    #[test]
    fn overlap_adds_spacing_per_level() {
        assert_eq!(wrapper_translation(MenuType::Overlap, 300.0, 1, 40.0), 300.0);
        assert_eq!(wrapper_translation(MenuType::Overlap, 300.0, 2, 40.0), 340.0);
        assert_eq!(wrapper_translation(MenuType::Overlap, 300.0, 4, 40.0), 420.0);
    }

    #[test]
    fn cover_ignores_level() {
        for level in 0..12 {
            assert_eq!(wrapper_translation(MenuType::Cover, 300.0, level, 40.0), 300.0);
        }
    }

    #[test]
    fn offset_saturates_at_level_zero() {
        assert_eq!(level_offset(0, 40.0), 0.0);
        assert_eq!(level_offset(1, 40.0), 0.0);
        assert_eq!(level_offset(11, 40.0), 400.0);
    }
}
