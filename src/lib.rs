//! Strata is a retained-mode box scene graph with an incremental layout engine.
//!
//! A [`SceneTree`] owns boxes and text leaves. Mutations through [`NodeMut`] raise dirty bits
//! that escalate toward the root, and a [`Renderer`] turns each batch of mutations into exactly
//! one frame:
//!
//! - measure bottom-up (only MEASURE-dirty nodes)
//! - layout top-down with pixel snapping ([`PixelConfig`])
//! - paint in tree order, regenerating vertex data only for PAINT-dirty nodes
//!
//! Text is sized and rasterized by an external [`TextOracle`]; results are memoized in a
//! [`TextCache`]. Frames are handed to a [`PaintBackend`].
#![forbid(unsafe_code)]

mod foundation;

pub mod layout;
pub mod pixel;
pub mod render;
pub mod scene;
pub mod text;

pub use crate::foundation::core::{Point, Rect, Rgba, Size, Viewport};
pub use crate::foundation::error::{StrataError, StrataResult};

pub use crate::layout::{PassCtx, PassStats};
pub use crate::pixel::policy::{PixelConfig, PixelPolicy};
pub use crate::render::backend::{PaintBackend, RecordedFrame, RecordingBackend};
pub use crate::render::renderer::{FrameStats, Renderer, RendererSettings};
pub use crate::scene::desc::{BuiltScene, SceneDesc};
pub use crate::scene::dirty::Dirty;
pub use crate::scene::node::{Node, NodeId, NodeKind, TextLeaf};
pub use crate::scene::style::{Align, Frame, Justify, LayoutMode, MaxExtent, Style};
pub use crate::scene::tree::{NodeMut, SceneTree};
pub use crate::text::cache::{TextCache, TextCacheStats};
pub use crate::text::monospace::MonospaceOracle;
pub use crate::text::oracle::{ShapedText, TextMetrics, TextOracle, TextRequest, TextureHandle};
pub use crate::text::parley_oracle::ParleyTextOracle;
