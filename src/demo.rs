use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use winit::event::VirtualKeyCode;

use crate::antagonist::Antagonist;
use crate::config::{AntagonistConfig, DemoConfig};
use crate::scene::{NodeKey, Scene, SceneError, SpriteNode};
use crate::texture::Texture;

pub struct Demo {
    scene: Scene<Antagonist>,
    pub fps: f32,
    fps_acc: f32,
    fps_count: u32,
}

impl Demo {
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::from_config_with_rng(config, &mut rand::thread_rng())
    }

    pub fn from_config_with_rng<R: Rng>(config: &DemoConfig, rng: &mut R) -> Self {
        let mut scene = Scene::new(config.window.width, config.window.height)
            .with_background(config.background);
        let mut textures: HashMap<PathBuf, Arc<Texture>> = HashMap::new();

        for spawn in &config.antagonists {
            let antagonist = build_antagonist(spawn, &scene, &mut textures, rng);
            log::info!(
                "Spawning antagonist {} at {:?}",
                spawn.name.as_deref().unwrap_or("<unnamed>"),
                antagonist.initial_position()
            );
            scene.add_child(antagonist);
        }

        Self {
            scene,
            fps: 0.0,
            fps_acc: 0.0,
            fps_count: 0,
        }
    }

    pub fn scene(&self) -> &Scene<Antagonist> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene<Antagonist> {
        &mut self.scene
    }

    pub fn on_key(&mut self, key: VirtualKeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        match key {
            VirtualKeyCode::R => self.reset_positions(),
            VirtualKeyCode::Space => self.scatter(&mut rand::thread_rng()),
            _ => {}
        }
    }

    /// Logs and returns the topmost antagonist under `point` (scene coordinates).
    pub fn on_click(&self, point: Vec2) -> Option<NodeKey> {
        let key = self.scene.nodes_at(point).into_iter().next();
        match key.and_then(|k| self.scene.get(k)) {
            Some(a) => log::info!(
                "Clicked {} (spawned at {:?})",
                a.node().name.as_deref().unwrap_or("<unnamed>"),
                a.initial_position()
            ),
            None => log::debug!("Click at {:?} hit nothing", point),
        }
        key
    }

    /// Moves every node back to where it was spawned.
    pub fn reset_positions(&mut self) {
        for (_, a) in self.scene.children_mut() {
            let home = a.initial_position();
            a.node_mut().position = home;
        }
        log::debug!("Reset {} antagonists", self.scene.len());
    }

    /// Moves every node to a new random spot; spawn positions are kept.
    pub fn scatter<R: Rng>(&mut self, rng: &mut R) {
        let (w, h) = (self.scene.width, self.scene.height);
        for (_, a) in self.scene.children_mut() {
            let size = a.node().size;
            a.node_mut().position = random_position(rng, size, w, h);
        }
        log::debug!("Scattered {} antagonists", self.scene.len());
    }

    pub fn update(&mut self, dt: f32) {
        self.fps_count += 1;
        self.fps_acc += dt;
        if self.fps_acc >= 1.0 {
            self.fps = self.fps_count as f32 / self.fps_acc;
            self.fps_acc = 0.0;
            self.fps_count = 0;
            log::debug!("FPS: {:.0}", self.fps);
        }
    }

    pub fn render(&self, frame: &mut [u8]) -> Result<(), SceneError> {
        self.scene.render(frame)
    }
}

fn build_antagonist<R: Rng>(
    spawn: &AntagonistConfig,
    scene: &Scene<Antagonist>,
    textures: &mut HashMap<PathBuf, Arc<Texture>>,
    rng: &mut R,
) -> Antagonist {
    let size = Vec2::from(spawn.size);
    let position = match spawn.position {
        Some(p) => Vec2::from(p),
        None => random_position(rng, size, scene.width, scene.height),
    };

    let mut node = SpriteNode::new(size)
        .with_color(spawn.color)
        .with_position(position);
    node.z_position = spawn.z_position;
    if let Some(name) = &spawn.name {
        node = node.with_name(name.clone());
    }
    if let Some(path) = &spawn.texture {
        if let Some(tex) = load_texture(path, textures) {
            node = node.with_texture(tex);
        }
    }

    let mut antagonist = Antagonist::new(node);
    antagonist.set_initial_position(position);
    antagonist.set_intern(spawn.intern);
    antagonist.set_faster(spawn.faster);
    antagonist
}

fn load_texture(path: &Path, cache: &mut HashMap<PathBuf, Arc<Texture>>) -> Option<Arc<Texture>> {
    if let Some(tex) = cache.get(path) {
        return Some(Arc::clone(tex));
    }
    match Texture::from_file(path) {
        Ok(tex) => {
            let tex = Arc::new(tex);
            cache.insert(path.to_path_buf(), Arc::clone(&tex));
            Some(tex)
        }
        Err(e) => {
            log::warn!("{e}; drawing a solid colour instead");
            None
        }
    }
}

/// A centre that keeps a node of `size` fully inside a `w`x`h` frame, or the
/// frame centre along any axis where it cannot fit.
fn random_position<R: Rng>(rng: &mut R, size: Vec2, w: u32, h: u32) -> Vec2 {
    let x = random_axis(rng, size.x, w);
    let y = random_axis(rng, size.y, h);
    Vec2::new(x, y)
}

fn random_axis<R: Rng>(rng: &mut R, extent: f32, span: u32) -> f32 {
    let lo = extent * 0.5;
    let hi = span as f32 - extent * 0.5;
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        span as f32 * 0.5
    }
}
