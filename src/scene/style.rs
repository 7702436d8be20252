use crate::foundation::core::Rgba;
use crate::foundation::math::non_negative;

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", from = "String")]
/// How a box arranges its children.
pub enum LayoutMode {
    /// Every child gets the same interior rectangle; no distribution.
    #[default]
    Stack,
    /// Children flow top to bottom.
    Vertical,
    /// Children flow left to right.
    Horizontal,
    /// Children overlap, each aligned independently on both axes.
    ZStack,
}

impl LayoutMode {
    /// Parse a mode name; unknown names fall back to [`LayoutMode::Stack`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "stack" | "default" => Self::Stack,
            "vertical" | "vstack" | "column" => Self::Vertical,
            "horizontal" | "hstack" | "row" => Self::Horizontal,
            "z-stack" | "zstack" | "z_stack" | "overlay" => Self::ZStack,
            other => {
                tracing::warn!(value = other, "unknown layout mode, using stack");
                Self::Stack
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", from = "String")]
/// Main-axis distribution of free space in vertical/horizontal boxes.
pub enum Justify {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Justify {
    /// Parse a justify name; unknown names fall back to [`Justify::Start`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "flex-start" | "left" | "top" => Self::Start,
            "end" | "flex-end" | "right" | "bottom" => Self::End,
            "center" => Self::Center,
            "space-between" | "space_between" => Self::SpaceBetween,
            "space-around" | "space_around" => Self::SpaceAround,
            "space-evenly" | "space_evenly" => Self::SpaceEvenly,
            other => {
                tracing::warn!(value = other, "unknown justify mode, using start");
                Self::Start
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", from = "String")]
/// Cross-axis (and z-stack per-axis) placement.
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Placeholder: placed like `Start`; the offered cross extent is the interior extent anyway.
    Stretch,
}

impl Align {
    /// Parse an alignment name; `left`/`top` and `right`/`bottom` alias start and end.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "left" | "top" | "leading" => Self::Start,
            "center" | "middle" => Self::Center,
            "end" | "right" | "bottom" | "trailing" => Self::End,
            "stretch" => Self::Stretch,
            other => {
                tracing::warn!(value = other, "unknown alignment, using start");
                Self::Start
            }
        }
    }

    /// Offset of an item of extent `item` inside a slot of extent `slot`.
    pub(crate) fn offset(self, slot: f64, item: f64) -> f64 {
        match self {
            Self::Start | Self::Stretch => 0.0,
            Self::Center => (slot - item) / 2.0,
            Self::End => slot - item,
        }
    }
}

macro_rules! lenient_from_string {
    ($($ty:ty),*) => {
        $(
            impl From<String> for $ty {
                fn from(value: String) -> Self {
                    Self::parse_lenient(&value)
                }
            }

            impl From<&str> for $ty {
                fn from(value: &str) -> Self {
                    Self::parse_lenient(value)
                }
            }
        )*
    };
}

lenient_from_string!(LayoutMode, Justify, Align);

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(from = "MaxExtentRepr", into = "MaxExtentRepr")]
/// Upper bound on a resolved extent.
pub enum MaxExtent {
    /// No cap beyond the offered space.
    #[default]
    Auto,
    /// Cap at a fixed number of logical pixels.
    Px(f64),
    /// Fill the offered space regardless of the measured size.
    Unbounded,
}

impl MaxExtent {
    pub fn px(v: f64) -> Self {
        if v == f64::INFINITY {
            Self::Unbounded
        } else {
            Self::Px(non_negative(v))
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    pub(crate) fn limit(self) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Auto | Self::Unbounded => f64::INFINITY,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum MaxExtentRepr {
    Px(f64),
    Word(String),
}

impl From<MaxExtentRepr> for MaxExtent {
    fn from(value: MaxExtentRepr) -> Self {
        match value {
            MaxExtentRepr::Px(v) => Self::px(v),
            MaxExtentRepr::Word(w) => match w.trim().to_ascii_lowercase().as_str() {
                "unbounded" | "infinity" | "inf" | "fill" => Self::Unbounded,
                "auto" | "none" | "" => Self::Auto,
                other => {
                    tracing::warn!(value = other, "unknown max extent, using auto");
                    Self::Auto
                }
            },
        }
    }
}

impl From<MaxExtent> for MaxExtentRepr {
    fn from(value: MaxExtent) -> Self {
        match value {
            MaxExtent::Px(v) => Self::Px(v),
            MaxExtent::Auto => Self::Word("auto".to_owned()),
            MaxExtent::Unbounded => Self::Word("unbounded".to_owned()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
/// Explicit size overrides and caps, applied together by `NodeMut::frame_with`.
pub struct Frame {
    /// Explicit width; replaces the measured width unsnapped.
    #[serde(default)]
    pub width: Option<f64>,
    /// Explicit height; replaces the measured height unsnapped.
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub max_width: MaxExtent,
    #[serde(default)]
    pub max_height: MaxExtent,
}

impl Frame {
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn with_max(mut self, max_width: MaxExtent, max_height: MaxExtent) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Box style. Mutated through `NodeMut`, which keeps dirty bits in sync.
pub struct Style {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub max_width: MaxExtent,
    pub max_height: MaxExtent,
    /// Uniform padding on all four sides.
    pub padding: f64,
    pub background: Rgba,
    pub corner_radius: f64,
    pub mode: LayoutMode,
    /// Gap between consecutive children in vertical/horizontal mode.
    pub spacing: f64,
    pub justify: Justify,
    pub align_x: Align,
    pub align_y: Align,
    pub pixel_snap: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            max_width: MaxExtent::Auto,
            max_height: MaxExtent::Auto,
            padding: 0.0,
            background: Rgba::TRANSPARENT_WHITE,
            corner_radius: 0.0,
            mode: LayoutMode::Stack,
            spacing: 0.0,
            justify: Justify::Start,
            align_x: Align::Start,
            align_y: Align::Start,
            pixel_snap: true,
        }
    }
}

impl Style {
    pub(crate) fn set_frame(&mut self, frame: Frame) {
        self.width = frame.width.map(non_negative);
        self.height = frame.height.map(non_negative);
        self.max_width = sanitize_max(frame.max_width);
        self.max_height = sanitize_max(frame.max_height);
    }
}

fn sanitize_max(m: MaxExtent) -> MaxExtent {
    match m {
        MaxExtent::Px(v) => MaxExtent::px(v),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/style.rs"]
mod tests;
