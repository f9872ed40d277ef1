#![forbid(unsafe_code)]

//! Menu configuration: required elements, menu type, spacing, class names,
//! and selectors.
//!
//! Defaults match the stock `ts-pushmenu-mp-*` stylesheet. Every class name
//! and selector can be overridden with the `with_*` builders.

use crate::error::MenuError;

/// How open levels stack on top of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuType {
    /// Each deeper level leaves a `level_spacing` gap showing the previous one.
    #[default]
    Overlap,
    /// Deeper levels cover the previous level entirely.
    Cover,
}

impl MenuType {
    /// Lenient name lookup: `"cover"` selects [`MenuType::Cover`], anything
    /// else falls back to [`MenuType::Overlap`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == "cover" {
            Self::Cover
        } else {
            Self::Overlap
        }
    }

    /// Name used in the root element's mode class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overlap => "overlap",
            Self::Cover => "cover",
        }
    }
}

/// Marker class names toggled or matched by the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    /// Elements that close the current level when clicked.
    pub back: String,
    /// Added to the wrapper while any level is open.
    pub pushed: String,
    /// Carried by every level panel; counted by the depth walk.
    pub level: String,
    /// Added to a panel while it is open.
    pub menu_open: String,
    /// Added to a panel while a deeper level covers it.
    pub menu_overlay: String,
    /// Prefix of the mode class added to the root (`<prefix>overlap`).
    pub mode_prefix: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            back: "ts-pushmenu-mp-back".into(),
            pushed: "ts-pushmenu-mp-pushed".into(),
            level: "ts-pushmenu-mp-level".into(),
            menu_open: "ts-pushmenu-mp-level-open".into(),
            menu_overlay: "ts-pushmenu-mp-level-overlay".into(),
            mode_prefix: "ts-pushmenu-mp-".into(),
        }
    }
}

/// Selector strings used to discover the menu structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Matches level panels beneath the root.
    pub level: String,
    /// Matches the moving wrapper (queried document-wide).
    pub wrapper: String,
    /// Matches menu items beneath the root.
    pub item: String,
    /// Matches the clickable link inside a menu item.
    pub link: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            level: "div.ts-pushmenu-mp-level".into(),
            wrapper: "#ts-pushmenu-mp-pusher".into(),
            item: "li".into(),
            link: "a".into(),
        }
    }
}

/// Construction options for a [`LevelMenu`](crate::LevelMenu).
///
/// `N` is the host's element handle type.
#[derive(Debug, Clone)]
pub struct PushMenuConfig<N> {
    pub el: Option<N>,
    pub trigger: Option<N>,
    pub menu_type: MenuType,
    /// Pixels between overlapped levels.
    pub level_spacing: f64,
    pub classes: ClassNames,
    pub selectors: Selectors,
}

impl<N> Default for PushMenuConfig<N> {
    fn default() -> Self {
        Self {
            el: None,
            trigger: None,
            menu_type: MenuType::Overlap,
            level_spacing: 40.0,
            classes: ClassNames::default(),
            selectors: Selectors::default(),
        }
    }
}

impl<N> PushMenuConfig<N> {
    /// Config with the two required elements set and everything else default.
    #[must_use]
    pub fn new(el: N, trigger: N) -> Self {
        Self {
            el: Some(el),
            trigger: Some(trigger),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_el(mut self, el: N) -> Self {
        self.el = Some(el);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: N) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn with_menu_type(mut self, menu_type: MenuType) -> Self {
        self.menu_type = menu_type;
        self
    }

    #[must_use]
    pub fn with_level_spacing(mut self, px: f64) -> Self {
        self.level_spacing = px;
        self
    }

    #[must_use]
    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    #[must_use]
    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Mode class added to the root element, e.g. `ts-pushmenu-mp-overlap`.
    #[must_use]
    pub fn mode_class(&self) -> String {
        format!("{}{}", self.classes.mode_prefix, self.menu_type.as_str())
    }

    /// Check required options, returning the root and trigger handles.
    pub(crate) fn validate(&self) -> Result<(N, N), MenuError>
    where
        N: Clone,
    {
        let el = self.el.clone().ok_or(MenuError::MissingOption("el"))?;
        let trigger = self
            .trigger
            .clone()
            .ok_or(MenuError::MissingOption("trigger"))?;
        if !self.level_spacing.is_finite() || self.level_spacing < 0.0 {
            return Err(MenuError::InvalidLevelSpacing(self.level_spacing));
        }
        Ok((el, trigger))
    }
}
