use std::cell::RefCell;
use std::rc::Rc;

use ultraviolet::Vec3;

use crate::math::Aabb;

/// Line segment to be drawn over the scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineDraw {
    pub from: Vec3,
    pub to: Vec3,
    pub thickness: f32,
}

/// Shared queue of line draw commands.
///
/// Renderers push commands into it, the backend drains them once per frame.
///
#[derive(Debug, Clone, Default)]
pub struct DrawList(Rc<RefCell<Vec<LineDraw>>>);

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: LineDraw) {
        self.0.borrow_mut().push(line)
    }

    /// Takes all commands recorded so far.
    pub fn drain(&self) -> Vec<LineDraw> {
        self.0.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Renderer of the highlight over the block or the object.
pub trait OverlayRenderer {
    fn set_aabb(&mut self, aabb: Aabb);

    fn render(&mut self, line_thickness: f32);
}

/// Renders bounding box as its twelve edges.
#[derive(Debug, Clone)]
pub struct AabbRenderer {
    aabb: Option<Aabb>,
    draws: DrawList,
}

impl AabbRenderer {
    pub fn new(draws: DrawList) -> Self {
        Self { aabb: None, draws }
    }

    pub fn aabb(&self) -> Option<&Aabb> {
        self.aabb.as_ref()
    }
}

impl OverlayRenderer for AabbRenderer {
    fn set_aabb(&mut self, aabb: Aabb) {
        self.aabb = Some(aabb);
    }

    fn render(&mut self, line_thickness: f32) {
        let aabb = match &self.aabb {
            Some(aabb) => aabb,
            None => return,
        };
        for (from, to) in aabb.edges() {
            self.draws.push(LineDraw {
                from,
                to,
                thickness: line_thickness,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_edges() {
        let draws = DrawList::new();
        let mut renderer = AabbRenderer::new(draws.clone());
        renderer.render(2.0);
        assert!(draws.is_empty());

        renderer.set_aabb(Aabb::block(Vec3::zero()));
        renderer.render(2.0);
        assert_eq!(draws.len(), 12);
        assert!(draws.drain().iter().all(|line| line.thickness == 2.0));
        assert!(draws.is_empty());
    }
}
