//! The closed set of scene objects and their owning collection.

use std::time::Duration;

use crate::object::{BorderObject, LabeledBoxObject, SnakeTrailObject, StyledObject};
use crate::term::OutputSink;
use crate::types::Color;

/// One drawable, stateful scene object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneObject {
    Styled(StyledObject),
    Border(BorderObject),
    LabeledBox(LabeledBoxObject),
    SnakeTrail(SnakeTrailObject),
}

impl SceneObject {
    /// Consume pending dirty flags and rebuild derived state.
    ///
    /// Returns whether anything visible changed. A second call with no
    /// mutation in between returns false.
    pub fn think(&mut self, elapsed: Duration) -> bool {
        match self {
            SceneObject::Styled(o) => o.think(elapsed),
            SceneObject::Border(o) => o.think(elapsed),
            SceneObject::LabeledBox(o) => o.think(elapsed),
            SceneObject::SnakeTrail(o) => o.think(elapsed),
        }
    }

    /// Emit the current visual state. Leaves the sink's colors reset.
    pub fn draw(&self, sink: &mut dyn OutputSink, elapsed: Duration) {
        match self {
            SceneObject::Styled(o) => o.draw(sink, elapsed),
            SceneObject::Border(o) => o.draw(sink, elapsed),
            SceneObject::LabeledBox(o) => o.draw(sink, elapsed),
            SceneObject::SnakeTrail(o) => o.draw(sink, elapsed),
        }
    }

    pub fn fore_color(&self) -> Color {
        match self {
            SceneObject::Styled(o) => o.fore_color(),
            SceneObject::Border(o) => o.fore_color(),
            SceneObject::LabeledBox(o) => o.fore_color(),
            SceneObject::SnakeTrail(o) => o.fore_color(),
        }
    }

    pub fn back_color(&self) -> Color {
        match self {
            SceneObject::Styled(o) => o.back_color(),
            SceneObject::Border(o) => o.back_color(),
            SceneObject::LabeledBox(o) => o.back_color(),
            SceneObject::SnakeTrail(o) => o.back_color(),
        }
    }

    pub fn set_fore_color(&mut self, color: Color) {
        match self {
            SceneObject::Styled(o) => o.set_fore_color(color),
            SceneObject::Border(o) => o.set_fore_color(color),
            SceneObject::LabeledBox(o) => o.set_fore_color(color),
            SceneObject::SnakeTrail(o) => o.set_fore_color(color),
        }
    }

    pub fn set_back_color(&mut self, color: Color) {
        match self {
            SceneObject::Styled(o) => o.set_back_color(color),
            SceneObject::Border(o) => o.set_back_color(color),
            SceneObject::LabeledBox(o) => o.set_back_color(color),
            SceneObject::SnakeTrail(o) => o.set_back_color(color),
        }
    }
}

impl From<StyledObject> for SceneObject {
    fn from(o: StyledObject) -> Self {
        SceneObject::Styled(o)
    }
}

impl From<BorderObject> for SceneObject {
    fn from(o: BorderObject) -> Self {
        SceneObject::Border(o)
    }
}

impl From<LabeledBoxObject> for SceneObject {
    fn from(o: LabeledBoxObject) -> Self {
        SceneObject::LabeledBox(o)
    }
}

impl From<SnakeTrailObject> for SceneObject {
    fn from(o: SnakeTrailObject) -> Self {
        SceneObject::SnakeTrail(o)
    }
}

/// Handle to an object owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Ordered scene objects. Insertion order is draw order (back to front).
///
/// Objects are never removed individually; the whole scene is dropped at
/// once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Into<SceneObject>) -> ObjectId {
        self.objects.push(object.into());
        ObjectId(self.objects.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn border_mut(&mut self, id: ObjectId) -> Option<&mut BorderObject> {
        match self.get_mut(id)? {
            SceneObject::Border(o) => Some(o),
            _ => None,
        }
    }

    pub fn labeled_box_mut(&mut self, id: ObjectId) -> Option<&mut LabeledBoxObject> {
        match self.get_mut(id)? {
            SceneObject::LabeledBox(o) => Some(o),
            _ => None,
        }
    }

    pub fn trail(&self, id: ObjectId) -> Option<&SnakeTrailObject> {
        match self.get(id)? {
            SceneObject::SnakeTrail(o) => Some(o),
            _ => None,
        }
    }

    pub fn trail_mut(&mut self, id: ObjectId) -> Option<&mut SnakeTrailObject> {
        match self.get_mut(id)? {
            SceneObject::SnakeTrail(o) => Some(o),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Think every object. Returns true if any of them changed.
    pub fn think(&mut self, elapsed: Duration) -> bool {
        // No short-circuit: every object must consume its own flags.
        self.objects
            .iter_mut()
            .fold(false, |changed, o| o.think(elapsed) | changed)
    }

    /// Draw every object in insertion order.
    pub fn draw(&self, sink: &mut dyn OutputSink, elapsed: Duration) {
        for o in &self.objects {
            o.draw(sink, elapsed);
        }
    }
}
