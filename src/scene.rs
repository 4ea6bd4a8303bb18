//! Sprite nodes and the flat scene graph that owns and draws them.
//!
//! Scene coordinates follow the usual 2D game convention: the origin is
//! the bottom-left corner of the frame and `y` grows upwards. A node's
//! `position` is its centre.

use std::sync::Arc;

use glam::Vec2;
use slotmap::{new_key_type, SlotMap};

use crate::texture::Texture;

new_key_type! {
    /// Handle to a node attached to a [`Scene`].
    pub struct NodeKey;
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("frame holds {actual} bytes, expected {expected} for {width}x{height}")]
    FrameSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }
}

/// A positioned, renderable element of a scene.
#[derive(Debug, Clone)]
pub struct SpriteNode {
    pub position: Vec2,
    pub size: Vec2,
    pub texture: Option<Arc<Texture>>,
    /// Fill used when there is no texture.
    pub color: [u8; 4],
    pub hidden: bool,
    pub z_position: f32,
    pub name: Option<String>,
}

impl SpriteNode {
    pub fn new(size: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            size,
            texture: None,
            color: [255, 255, 255, 255],
            hidden: false,
            z_position: 0.0,
            name: None,
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn frame(&self) -> Rect {
        let half = self.size * 0.5;
        Rect {
            min: self.position - half,
            max: self.position + half,
        }
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.frame().contains(point)
    }
}

impl AsRef<SpriteNode> for SpriteNode {
    fn as_ref(&self) -> &SpriteNode {
        self
    }
}

impl AsMut<SpriteNode> for SpriteNode {
    fn as_mut(&mut self) -> &mut SpriteNode {
        self
    }
}

/// Owns the nodes attached to it and renders them into an RGBA frame.
///
/// Any type exposing a [`SpriteNode`] through `AsRef` can be attached, so
/// game entities keep their own state while the scene handles drawing.
pub struct Scene<N> {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 4],
    nodes: SlotMap<NodeKey, N>,
    order: Vec<NodeKey>,
}

impl<N: AsRef<SpriteNode>> Scene<N> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: [0, 0, 0, 255],
            nodes: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: [u8; 4]) -> Self {
        self.background = color;
        self
    }

    pub fn add_child(&mut self, node: N) -> NodeKey {
        let pos = node.as_ref().position;
        let key = self.nodes.insert(node);
        self.order.push(key);
        log::debug!("Attached node {:?} at {:?}", key, pos);
        key
    }

    pub fn remove_child(&mut self, key: NodeKey) -> Option<N> {
        let node = self.nodes.remove(key)?;
        self.order.retain(|k| *k != key);
        log::debug!("Detached node {:?}", key);
        Some(node)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.nodes.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attached nodes in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (NodeKey, &N)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.nodes.get(*key).map(|n| (*key, n)))
    }

    /// Attached nodes, mutably. Order is unspecified.
    pub fn children_mut(&mut self) -> impl Iterator<Item = (NodeKey, &mut N)> + '_ {
        self.nodes.iter_mut()
    }

    pub fn child_named(&self, name: &str) -> Option<(NodeKey, &N)> {
        self.children()
            .find(|(_, n)| n.as_ref().name.as_deref() == Some(name))
    }

    /// Keys of visible nodes under `point`, topmost first.
    pub fn nodes_at(&self, point: Vec2) -> Vec<NodeKey> {
        let mut hits: Vec<NodeKey> = self
            .draw_order()
            .into_iter()
            .filter(|key| {
                self.nodes
                    .get(*key)
                    .map(|n| {
                        let node = n.as_ref();
                        !node.hidden && node.contains_point(point)
                    })
                    .unwrap_or(false)
            })
            .collect();
        hits.reverse();
        hits
    }

    /// Insertion order, stably sorted by `z_position`.
    fn draw_order(&self) -> Vec<NodeKey> {
        let mut keys = self.order.clone();
        keys.sort_by(|a, b| {
            let za = self.nodes.get(*a).map_or(0.0, |n| n.as_ref().z_position);
            let zb = self.nodes.get(*b).map_or(0.0, |n| n.as_ref().z_position);
            za.total_cmp(&zb)
        });
        keys
    }

    pub fn render(&self, frame: &mut [u8]) -> Result<(), SceneError> {
        let expected = self.width as usize * self.height as usize * 4;
        if frame.len() != expected {
            return Err(SceneError::FrameSize {
                width: self.width,
                height: self.height,
                expected,
                actual: frame.len(),
            });
        }

        for px in frame.chunks_exact_mut(4) {
            px.copy_from_slice(&self.background);
        }

        for key in self.draw_order() {
            if let Some(node) = self.nodes.get(key) {
                let node = node.as_ref();
                if !node.hidden {
                    self.draw_node(frame, node);
                }
            }
        }
        Ok(())
    }

    fn draw_node(&self, frame: &mut [u8], node: &SpriteNode) {
        let rect = node.frame();
        if !(rect.min.is_finite() && rect.max.is_finite()) {
            return;
        }
        // Edges stay in f64 so huge nodes cannot overflow the span arithmetic.
        let x0 = f64::from(rect.min.x).round();
        let x1 = f64::from(rect.max.x).round();
        let y0 = f64::from(rect.min.y).round();
        let y1 = f64::from(rect.max.y).round();
        let (span_x, span_y) = (x1 - x0, y1 - y0);
        if span_x <= 0.0 || span_y <= 0.0 {
            return;
        }

        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let (col_start, col_end) = (x0.clamp(0.0, w) as u32, x1.clamp(0.0, w) as u32);
        let (row_start, row_end) = (y0.clamp(0.0, h) as u32, y1.clamp(0.0, h) as u32);

        for sy in row_start..row_end {
            // Frame rows run top to bottom.
            let row = self.height - 1 - sy;
            for sx in col_start..col_end {
                let color = match &node.texture {
                    Some(tex) => {
                        let u = (f64::from(sx) - x0) / span_x;
                        let v = (y1 - 1.0 - f64::from(sy)) / span_y;
                        let tx = (u * f64::from(tex.width)) as u32;
                        let ty = (v * f64::from(tex.height)) as u32;
                        match tex.pixel(tx, ty) {
                            Some(c) => c,
                            None => continue,
                        }
                    }
                    None => node.color,
                };
                let idx = (row as usize * self.width as usize + sx as usize) * 4;
                if let Some(dst) = frame.get_mut(idx..idx + 4) {
                    blend(dst, color);
                }
            }
        }
    }
}

fn blend(dst: &mut [u8], src: [u8; 4]) {
    let a = src[3] as u16;
    if a == 255 {
        dst.copy_from_slice(&src);
        return;
    }
    for i in 0..3 {
        dst[i] = ((src[i] as u16 * a + dst[i] as u16 * (255 - a)) / 255) as u8;
    }
    dst[3] = 255;
}
