use crate::core::models::chain::Chain;
use crate::core::models::residue::Color;
use nalgebra::{Point3, Vector3};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

pub const BOND_RADIUS: f64 = 0.1;
pub const BOND_COLOR: Color = Color::WHITE;

new_key_type! {
    pub struct ShapeId;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("Unknown shape handle: {0:?}")]
    UnknownShape(ShapeId),

    #[error("Shape {0:?} is not a cylinder and has no axis")]
    NotACylinder(ShapeId),
}

/// Drawing surface the relaxation loop mirrors its state into.
///
/// Implementations only hold display state; the [`Chain`] stays the source of
/// truth and is pushed into the scene after every tick.
pub trait Scene {
    fn create_sphere(&mut self, pos: Point3<f64>, radius: f64, color: Color) -> ShapeId;

    fn create_cylinder(
        &mut self,
        pos: Point3<f64>,
        axis: Vector3<f64>,
        radius: f64,
        color: Color,
    ) -> ShapeId;

    fn set_position(&mut self, id: ShapeId, pos: Point3<f64>) -> Result<(), SceneError>;

    fn set_axis(&mut self, id: ShapeId, axis: Vector3<f64>) -> Result<(), SceneError>;

    fn position(&self, id: ShapeId) -> Option<Point3<f64>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere {
        pos: Point3<f64>,
        radius: f64,
        color: Color,
    },
    Cylinder {
        pos: Point3<f64>,
        axis: Vector3<f64>,
        radius: f64,
        color: Color,
    },
}

/// In-memory scene with no display attached.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    shapes: SlotMap<ShapeId, Shape>,
    updates: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Shapes in creation order.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of successful position/axis updates since creation.
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl Scene for HeadlessScene {
    fn create_sphere(&mut self, pos: Point3<f64>, radius: f64, color: Color) -> ShapeId {
        self.shapes.insert(Shape::Sphere { pos, radius, color })
    }

    fn create_cylinder(
        &mut self,
        pos: Point3<f64>,
        axis: Vector3<f64>,
        radius: f64,
        color: Color,
    ) -> ShapeId {
        self.shapes.insert(Shape::Cylinder {
            pos,
            axis,
            radius,
            color,
        })
    }

    fn set_position(&mut self, id: ShapeId, new_pos: Point3<f64>) -> Result<(), SceneError> {
        match self.shapes.get_mut(id) {
            Some(Shape::Sphere { pos, .. }) | Some(Shape::Cylinder { pos, .. }) => {
                *pos = new_pos;
                self.updates += 1;
                Ok(())
            }
            None => Err(SceneError::UnknownShape(id)),
        }
    }

    fn set_axis(&mut self, id: ShapeId, new_axis: Vector3<f64>) -> Result<(), SceneError> {
        match self.shapes.get_mut(id) {
            Some(Shape::Cylinder { axis, .. }) => {
                *axis = new_axis;
                self.updates += 1;
                Ok(())
            }
            Some(Shape::Sphere { .. }) => Err(SceneError::NotACylinder(id)),
            None => Err(SceneError::UnknownShape(id)),
        }
    }

    fn position(&self, id: ShapeId) -> Option<Point3<f64>> {
        match self.shapes.get(id)? {
            Shape::Sphere { pos, .. } | Shape::Cylinder { pos, .. } => Some(*pos),
        }
    }
}

/// Display handles for one chain: a sphere per residue and a cylinder per bond.
#[derive(Debug, Clone)]
pub struct SceneBinding {
    spheres: Vec<ShapeId>,
    cylinders: Vec<ShapeId>,
}

impl SceneBinding {
    pub fn attach<S: Scene + ?Sized>(chain: &Chain, scene: &mut S) -> Self {
        let spheres = chain
            .residues()
            .iter()
            .map(|r| scene.create_sphere(r.position, r.radius, r.color))
            .collect();
        let cylinders = chain
            .bonds()
            .iter()
            .map(|b| scene.create_cylinder(b.pos, b.axis, BOND_RADIUS, BOND_COLOR))
            .collect();
        Self { spheres, cylinders }
    }

    pub fn spheres(&self) -> &[ShapeId] {
        &self.spheres
    }

    pub fn cylinders(&self) -> &[ShapeId] {
        &self.cylinders
    }

    /// Pushes the chain's current positions and bond axes into the scene.
    pub fn sync<S: Scene + ?Sized>(&self, chain: &Chain, scene: &mut S) -> Result<(), SceneError> {
        for (&id, residue) in self.spheres.iter().zip(chain.residues()) {
            scene.set_position(id, residue.position)?;
        }
        for (&id, bond) in self.cylinders.iter().zip(chain.bonds()) {
            scene.set_position(id, bond.pos)?;
            scene.set_axis(id, bond.axis)?;
        }
        Ok(())
    }
}
