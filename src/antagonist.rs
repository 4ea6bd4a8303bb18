//! The antagonist character: a sprite node plus a handful of state flags
//! and the position it was spawned at.
//!
//! The flags are plain data. Game logic elsewhere decides what they mean
//! and when they change; nothing here reacts to them.

use glam::Vec2;

use crate::scene::SpriteNode;

#[derive(Debug, Clone)]
pub struct Antagonist {
    node: SpriteNode,
    is_intern: bool,
    is_animating: bool,
    is_faster: bool,
    is_dead_or_hiding: bool,
    initial_position: Vec2,
}

impl Antagonist {
    /// Wraps `node` with every flag cleared and a zero initial position.
    pub fn new(node: SpriteNode) -> Self {
        Self {
            node,
            is_intern: false,
            is_animating: false,
            is_faster: false,
            is_dead_or_hiding: false,
            initial_position: Vec2::ZERO,
        }
    }

    pub fn node(&self) -> &SpriteNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut SpriteNode {
        &mut self.node
    }

    pub fn into_node(self) -> SpriteNode {
        self.node
    }

    pub fn is_intern(&self) -> bool {
        self.is_intern
    }

    pub fn set_intern(&mut self, value: bool) {
        self.is_intern = value;
    }

    /// Whether an animation is currently running on this instance.
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn set_animating(&mut self, value: bool) {
        self.is_animating = value;
    }

    pub fn is_faster(&self) -> bool {
        self.is_faster
    }

    pub fn set_faster(&mut self, value: bool) {
        self.is_faster = value;
    }

    /// Whether the character should currently be treated as inactive.
    pub fn is_dead_or_hiding(&self) -> bool {
        self.is_dead_or_hiding
    }

    pub fn set_dead_or_hiding(&mut self, value: bool) {
        self.is_dead_or_hiding = value;
    }

    /// Reference position, normally recorded once at spawn.
    pub fn initial_position(&self) -> Vec2 {
        self.initial_position
    }

    pub fn set_initial_position(&mut self, position: Vec2) {
        self.initial_position = position;
    }
}

impl From<SpriteNode> for Antagonist {
    fn from(node: SpriteNode) -> Self {
        Self::new(node)
    }
}

impl AsRef<SpriteNode> for Antagonist {
    fn as_ref(&self) -> &SpriteNode {
        &self.node
    }
}

impl AsMut<SpriteNode> for Antagonist {
    fn as_mut(&mut self) -> &mut SpriteNode {
        &mut self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn antagonist() -> Antagonist {
        Antagonist::new(SpriteNode::new(Vec2::splat(32.0)))
    }

    #[test]
    fn new_clears_flags_and_position() {
        let a = antagonist();
        assert!(!a.is_intern());
        assert!(!a.is_animating());
        assert!(!a.is_faster());
        assert!(!a.is_dead_or_hiding());
        assert_eq!(a.initial_position(), Vec2::ZERO);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn flags_read_back_what_was_set(#[case] value: bool) {
        let mut a = antagonist();
        // Start from the opposite value so the setter has to do something.
        a.set_intern(!value);
        a.set_animating(!value);
        a.set_faster(!value);
        a.set_dead_or_hiding(!value);

        a.set_intern(value);
        assert_eq!(a.is_intern(), value);
        a.set_animating(value);
        assert_eq!(a.is_animating(), value);
        a.set_faster(value);
        assert_eq!(a.is_faster(), value);
        a.set_dead_or_hiding(value);
        assert_eq!(a.is_dead_or_hiding(), value);
    }

    #[test]
    fn flags_are_independent() {
        let mut a = antagonist();
        a.set_faster(true);
        assert!(a.is_faster());
        assert!(!a.is_intern());
        assert!(!a.is_animating());
        assert!(!a.is_dead_or_hiding());

        a.set_dead_or_hiding(true);
        a.set_faster(false);
        assert!(a.is_dead_or_hiding());
        assert!(!a.is_faster());
    }

    #[rstest]
    #[case(Vec2::new(0.0, 0.0))]
    #[case(Vec2::new(120.5, 48.25))]
    #[case(Vec2::new(-3.0, 7.75))]
    #[case(Vec2::new(1.0e6, -1.0e-3))]
    fn initial_position_is_stored_verbatim(#[case] position: Vec2) {
        let mut a = antagonist();
        a.set_initial_position(position);
        assert_eq!(a.initial_position(), position);
        assert_eq!(a.initial_position().x, position.x);
        assert_eq!(a.initial_position().y, position.y);
    }

    #[test]
    fn initial_position_does_not_follow_the_node() {
        let mut a = antagonist();
        a.set_initial_position(Vec2::new(10.0, 20.0));
        a.node_mut().position = Vec2::new(99.0, 99.0);
        assert_eq!(a.initial_position(), Vec2::new(10.0, 20.0));
        assert_eq!(a.node().position, Vec2::new(99.0, 99.0));
    }

    #[test]
    fn node_is_reachable_through_as_ref() {
        let node = SpriteNode::new(Vec2::splat(8.0)).with_name("intern-1");
        let mut a = Antagonist::from(node);
        a.as_mut().hidden = true;
        let node: &SpriteNode = a.as_ref();
        assert!(node.hidden);
        assert_eq!(a.into_node().name.as_deref(), Some("intern-1"));
    }
}
