//! Antagonist sprites for a small 2D scene graph.
//!
//! [`Antagonist`] is a game character composed over a [`SpriteNode`]. It
//! carries four independent state flags and the position it was spawned at.
//! The [`scene`] module owns and draws nodes, and [`demo`] wires a scene up
//! from a [`DemoConfig`] for the windowed binary.

pub mod antagonist;
pub mod config;
pub mod demo;
pub mod logging;
pub mod scene;
pub mod texture;

pub use antagonist::Antagonist;
pub use config::{AntagonistConfig, ConfigError, DemoConfig, WindowConfig};
pub use demo::Demo;
pub use logging::init as init_logging;
pub use scene::{NodeKey, Rect, Scene, SceneError, SpriteNode};
pub use texture::{Texture, TextureError};
