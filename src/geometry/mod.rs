//! Building shapes: the geometric capability producing bounded-quantity
//! measurements (volumes, finish areas) on request.

use crate::quantity::{ArithmeticError, BaseUnit, BoundedQuantity, Quantity, Unit};
use std::f64::consts::PI;

fn zero_meters() -> BoundedQuantity {
    BoundedQuantity::new(Quantity::new(0.0, Unit::base(BaseUnit::Meter)))
}

/// The closed set of building shapes.
///
/// Every variant carries `finish_thickness`, the depth of the outer finish
/// layer used to derive the finish volume from the walls area.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A symmetric truncated pyramid with rectangular base.
    TruncatedPyramid {
        finish_thickness: BoundedQuantity,
        bottom_length: BoundedQuantity,
        bottom_width: BoundedQuantity,
        top_length: BoundedQuantity,
        top_width: BoundedQuantity,
        height: BoundedQuantity,
    },
    Cuboid {
        finish_thickness: BoundedQuantity,
        length: BoundedQuantity,
        width: BoundedQuantity,
        height: BoundedQuantity,
    },
    /// A prism like a roof top. The top edge runs along the width.
    Prism {
        finish_thickness: BoundedQuantity,
        width: BoundedQuantity,
        depth: BoundedQuantity,
        height: BoundedQuantity,
    },
    /// Stairs: a frustum whose finish covers the side faces, the
    /// countersteps and the treads, but not a top platform.
    Stairs {
        finish_thickness: BoundedQuantity,
        bottom_length: BoundedQuantity,
        bottom_width: BoundedQuantity,
        top_length: BoundedQuantity,
        top_width: BoundedQuantity,
        height: BoundedQuantity,
        depth: BoundedQuantity,
    },
    Cylinder {
        finish_thickness: BoundedQuantity,
        diameter: BoundedQuantity,
        height: BoundedQuantity,
    },
    /// A roomed superstructure like the ones on top of pyramids.
    Superstructure {
        finish_thickness: BoundedQuantity,
        number_of_rooms: u32,
        depth: BoundedQuantity,
        width: BoundedQuantity,
        walls_thickness: BoundedQuantity,
        door_width: BoundedQuantity,
        door_height: BoundedQuantity,
        ceiling_height: BoundedQuantity,
        outer_height: BoundedQuantity,
    },
}

/// The frustum parameter set shared by the pyramid-family shapes.
struct Frustum {
    bottom_length: BoundedQuantity,
    bottom_width: BoundedQuantity,
    top_length: BoundedQuantity,
    top_width: BoundedQuantity,
    height: BoundedQuantity,
}

impl Frustum {
    fn volume(&self) -> Result<BoundedQuantity, ArithmeticError> {
        let dl = self.bottom_length.sub(&self.top_length)?;
        let dw = self.bottom_width.sub(&self.top_width)?;
        // w*l + ((W-w)*l + (L-l)*w)/2 + (L-l)*(W-w)/3, times the height
        let mut vol = self.top_width.mul(&self.top_length)?;
        let mid = dw
            .mul(&self.top_length)?
            .add(&dl.mul(&self.top_width)?)?
            .div(2.0)?;
        vol.add_assign(&mid)?;
        vol.add_assign(&dl.mul(&dw)?.div(3.0)?)?;
        vol.mul_assign(&self.height)?;
        Ok(vol)
    }

    /// Area of one trapezoidal face along the length.
    fn length_face_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        let foot = self.bottom_width.sub(&self.top_width)?.abs().mul(0.5)?;
        let slant = self
            .height
            .mul(&self.height)?
            .add(&foot.mul(&foot)?)?
            .powf(0.5)?;
        self.bottom_length
            .add(&self.top_length)?
            .mul(0.5)?
            .mul(&slant)
    }

    /// Area of one trapezoidal face along the width.
    fn width_face_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        let foot = self.bottom_length.sub(&self.top_length)?.abs().mul(0.5)?;
        let slant = self
            .height
            .mul(&self.height)?
            .add(&foot.mul(&foot)?)?
            .powf(0.5)?;
        self.bottom_width
            .add(&self.top_width)?
            .mul(0.5)?
            .mul(&slant)
    }

    /// The four trapezoidal faces.
    fn walls_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        self.length_face_area()?
            .add(&self.width_face_area()?)?
            .mul(2.0)
    }

    fn top_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        self.top_length.mul(&self.top_width)
    }
}

impl Shape {
    pub fn finish_thickness(&self) -> &BoundedQuantity {
        match self {
            Shape::TruncatedPyramid {
                finish_thickness, ..
            }
            | Shape::Cuboid {
                finish_thickness, ..
            }
            | Shape::Prism {
                finish_thickness, ..
            }
            | Shape::Stairs {
                finish_thickness, ..
            }
            | Shape::Cylinder {
                finish_thickness, ..
            }
            | Shape::Superstructure {
                finish_thickness, ..
            } => finish_thickness,
        }
    }

    /// Frustum parameters for the pyramid-family shapes.
    fn frustum(&self) -> Option<Frustum> {
        match self {
            Shape::TruncatedPyramid {
                bottom_length,
                bottom_width,
                top_length,
                top_width,
                height,
                ..
            }
            | Shape::Stairs {
                bottom_length,
                bottom_width,
                top_length,
                top_width,
                height,
                ..
            } => Some(Frustum {
                bottom_length: bottom_length.clone(),
                bottom_width: bottom_width.clone(),
                top_length: top_length.clone(),
                top_width: top_width.clone(),
                height: height.clone(),
            }),
            Shape::Cuboid {
                length,
                width,
                height,
                ..
            } => Some(Frustum {
                bottom_length: length.clone(),
                bottom_width: width.clone(),
                top_length: length.clone(),
                top_width: width.clone(),
                height: height.clone(),
            }),
            Shape::Prism {
                width,
                depth,
                height,
                ..
            } => Some(Frustum {
                bottom_length: width.clone(),
                bottom_width: depth.clone(),
                top_length: width.clone(),
                top_width: zero_meters(),
                height: height.clone(),
            }),
            Shape::Cylinder { .. } | Shape::Superstructure { .. } => None,
        }
    }

    pub fn total_volume(&self) -> Result<BoundedQuantity, ArithmeticError> {
        if let Some(frustum) = self.frustum() {
            return frustum.volume();
        }
        match self {
            Shape::Cylinder {
                diameter, height, ..
            } => {
                let radius = diameter.div(2.0)?;
                height.mul(PI)?.mul(&radius)?.mul(&radius)
            }
            Shape::Superstructure {
                number_of_rooms,
                depth,
                width,
                door_width,
                door_height,
                ceiling_height,
                outer_height,
                walls_thickness,
                ..
            } => {
                let room_width = self.room_width()?;
                let room_depth = self.room_depth()?;
                let roof = Shape::Prism {
                    finish_thickness: zero_meters(),
                    width: room_width.clone(),
                    depth: room_depth.clone(),
                    height: ceiling_height.sub(door_height)?,
                }
                .total_volume()?;
                let room = Shape::Cuboid {
                    finish_thickness: zero_meters(),
                    length: room_width,
                    width: room_depth,
                    height: door_height.clone(),
                }
                .total_volume()?;
                let door = Shape::Cuboid {
                    finish_thickness: zero_meters(),
                    length: door_width.clone(),
                    width: walls_thickness.clone(),
                    height: door_height.clone(),
                }
                .total_volume()?;
                let hollow = roof
                    .add(&room)?
                    .add(&door)?
                    .mul(f64::from(*number_of_rooms))?;
                outer_height.mul(width)?.mul(depth)?.sub(&hollow)
            }
            _ => unreachable!("frustum shapes handled above"),
        }
    }

    pub fn walls_finish_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        match self {
            Shape::Stairs {
                bottom_length,
                top_length,
                depth,
                ..
            } => {
                // Side faces and countersteps, plus the horizontal treads.
                let treads = bottom_length.add(top_length)?.mul(0.5)?.mul(depth)?;
                self.stairs_finish_base_area()?.add(&treads)
            }
            Shape::Cylinder {
                diameter, height, ..
            } => diameter.div(2.0)?.mul(2.0 * PI)?.mul(height),
            Shape::Superstructure {
                number_of_rooms,
                depth,
                width,
                walls_thickness,
                door_width,
                door_height,
                ceiling_height,
                outer_height,
                ..
            } => {
                let outer = width
                    .add(depth)?
                    .mul(2.0)?
                    .sub(door_width)?
                    .mul(outer_height)?;

                let mut inner = depth.sub(walls_thickness)?.mul(2.0)?;
                inner.add_assign(&width.sub(&walls_thickness.mul(2.0)?)?)?;
                let free_span = width
                    .sub(&walls_thickness.mul(2.0)?)?
                    .sub(door_width)?;
                // Kept in f64 so a degenerate room count of zero does
                // not underflow the counter.
                let span_count = 2.0 * f64::from(*number_of_rooms) - 1.0;
                inner.add_assign(&free_span.mul(span_count)?)?;
                inner.mul_assign(door_height)?;

                let ceiling = Shape::Prism {
                    finish_thickness: zero_meters(),
                    width: self.room_width()?,
                    depth: self.room_depth()?,
                    height: ceiling_height.sub(door_height)?,
                }
                .walls_finish_area()?
                .mul(f64::from(*number_of_rooms))?;

                outer.add(&inner)?.add(&ceiling)
            }
            _ => self
                .frustum()
                .expect("non-frustum shapes handled above")
                .walls_area(),
        }
    }

    pub fn top_finish_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        match self {
            Shape::Cylinder { diameter, .. } => {
                let radius = diameter.div(2.0)?;
                radius.mul(&radius)?.mul(PI)
            }
            Shape::Superstructure { width, depth, .. } => width.mul(depth),
            _ => self
                .frustum()
                .expect("non-frustum shapes handled above")
                .top_area(),
        }
    }

    /// Finish volume, the walls area times the finish thickness. Stairs
    /// exclude the treads from the finished volume.
    pub fn finish_volume(&self) -> Result<BoundedQuantity, ArithmeticError> {
        match self {
            Shape::Stairs { .. } => self
                .stairs_finish_base_area()?
                .mul(self.finish_thickness()),
            _ => self.walls_finish_area()?.mul(self.finish_thickness()),
        }
    }

    /// Fill volume of the bare shape: total volume minus the finish layer.
    pub fn fill_volume(&self) -> Result<BoundedQuantity, ArithmeticError> {
        self.total_volume()?.sub(&self.finish_volume()?)
    }

    pub fn total_finish_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        self.top_finish_area()?.add(&self.walls_finish_area()?)
    }

    /// The two side faces of the stairs plus the countersteps.
    fn stairs_finish_base_area(&self) -> Result<BoundedQuantity, ArithmeticError> {
        match self {
            Shape::Stairs {
                bottom_length,
                top_length,
                height,
                ..
            } => {
                let frustum = self.frustum().expect("stairs are a frustum");
                let mut area = frustum.width_face_area()?.mul(2.0)?;
                let countersteps = bottom_length.add(top_length)?.mul(0.5)?.mul(height)?;
                area.add_assign(&countersteps)?;
                Ok(area)
            }
            _ => unreachable!("only stairs have a finish base area"),
        }
    }

    fn room_width(&self) -> Result<BoundedQuantity, ArithmeticError> {
        match self {
            Shape::Superstructure {
                width,
                walls_thickness,
                ..
            } => width.sub(&walls_thickness.mul(2.0)?),
            _ => unreachable!("only superstructures have rooms"),
        }
    }

    fn room_depth(&self) -> Result<BoundedQuantity, ArithmeticError> {
        match self {
            Shape::Superstructure {
                number_of_rooms,
                depth,
                walls_thickness,
                ..
            } => {
                let n = f64::from(*number_of_rooms);
                depth
                    .sub(&walls_thickness.mul(2.0)?)?
                    .sub(&walls_thickness.mul(n - 1.0)?)?
                    .div(n)
            }
            _ => unreachable!("only superstructures have rooms"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters(v: f64) -> BoundedQuantity {
        BoundedQuantity::new(Quantity::new(v, Unit::base(BaseUnit::Meter)))
    }

    fn mag(q: &BoundedQuantity) -> f64 {
        q.mean().magnitude
    }

    #[test]
    fn pointy_pyramid() {
        // Top degenerates to 0x0: an ordinary pyramid.
        let pyr = Shape::TruncatedPyramid {
            finish_thickness: zero_meters(),
            bottom_length: meters(6.0),
            bottom_width: meters(6.0),
            top_length: meters(0.0),
            top_width: meters(0.0),
            height: meters(4.0),
        };
        assert_eq!(mag(&pyr.walls_finish_area().unwrap()), 60.0);
        assert_eq!(mag(&pyr.top_finish_area().unwrap()), 0.0);
        assert_eq!(mag(&pyr.total_volume().unwrap()), 48.0);
    }

    #[test]
    fn cuboid() {
        let cub = Shape::Cuboid {
            finish_thickness: zero_meters(),
            length: meters(2.0),
            width: meters(3.0),
            height: meters(5.0),
        };
        assert_eq!(mag(&cub.walls_finish_area().unwrap()), 50.0);
        assert_eq!(mag(&cub.top_finish_area().unwrap()), 6.0);
        assert_eq!(mag(&cub.total_volume().unwrap()), 30.0);
        // No finish layer: everything is fill.
        assert_eq!(mag(&cub.fill_volume().unwrap()), 30.0);
    }

    #[test]
    fn unit_cube_from_bounded_quantities() {
        let one = meters(1.0);
        let pyr = Shape::TruncatedPyramid {
            finish_thickness: zero_meters(),
            bottom_length: one.clone(),
            bottom_width: one.clone(),
            top_length: one.clone(),
            top_width: one.clone(),
            height: one,
        };
        let walls = pyr.walls_finish_area().unwrap();
        assert_eq!(mag(&walls), 4.0);
        assert_eq!(walls.unit().to_string(), "m^2");
        let vol = pyr.total_volume().unwrap();
        assert_eq!(mag(&vol), 1.0);
        assert_eq!(vol.unit().to_string(), "m^3");
    }

    #[test]
    fn stairs() {
        let stairs = Shape::Stairs {
            finish_thickness: meters(0.5),
            bottom_length: meters(3.0),
            bottom_width: meters(3.0),
            top_length: meters(2.0),
            top_width: meters(0.5),
            height: meters(9.0),
            depth: meters(4.0),
        };
        let slant = (81.0f64 + 0.25).sqrt();
        let side_faces = 2.0 * (0.5 * 3.5 * slant);
        let countersteps = 0.5 * 5.0 * 9.0;
        let base_area = side_faces + countersteps;

        let walls = mag(&stairs.walls_finish_area().unwrap());
        assert!((walls - (base_area + 0.5 * 5.0 * 4.0)).abs() < 1e-9);

        let finish = mag(&stairs.finish_volume().unwrap());
        assert!((finish - base_area * 0.5).abs() < 1e-9);

        assert_eq!(mag(&stairs.total_volume().unwrap()), 41.25);
    }

    #[test]
    fn cylinder() {
        let cyl = Shape::Cylinder {
            finish_thickness: zero_meters(),
            diameter: meters(2.0),
            height: meters(5.0),
        };
        assert!((mag(&cyl.total_volume().unwrap()) - 5.0 * PI).abs() < 1e-9);
        assert!((mag(&cyl.walls_finish_area().unwrap()) - 10.0 * PI).abs() < 1e-9);
        assert!((mag(&cyl.top_finish_area().unwrap()) - PI).abs() < 1e-9);
    }

    #[test]
    fn superstructure() {
        let sup = Shape::Superstructure {
            finish_thickness: meters(0.25),
            number_of_rooms: 2,
            depth: meters(4.0),
            width: meters(7.0),
            walls_thickness: meters(0.6),
            door_width: meters(0.8),
            door_height: meters(1.5),
            ceiling_height: meters(3.0),
            outer_height: meters(4.5),
        };
        assert!((mag(&sup.total_volume().unwrap()) - 95.85).abs() < 1e-9);
        assert_eq!(mag(&sup.top_finish_area().unwrap()), 28.0);

        // Fill, finish and total volumes stay consistent.
        let total = mag(&sup.total_volume().unwrap());
        let fill = mag(&sup.fill_volume().unwrap());
        let finish = mag(&sup.finish_volume().unwrap());
        assert!((fill + finish - total).abs() < 1e-9);
    }

    #[test]
    fn zero_rooms_degrades_without_panicking() {
        // Unreachable from a stored model, but a programmatic zero must
        // yield a degenerate measurement rather than crash.
        let sup = Shape::Superstructure {
            finish_thickness: meters(0.25),
            number_of_rooms: 0,
            depth: meters(4.0),
            width: meters(7.0),
            walls_thickness: meters(0.6),
            door_width: meters(0.8),
            door_height: meters(1.5),
            ceiling_height: meters(3.0),
            outer_height: meters(4.5),
        };
        assert!(sup.walls_finish_area().is_ok());
        assert!(sup.total_volume().is_ok());
    }

    #[test]
    fn bounds_propagate_through_formulas() {
        let side = BoundedQuantity::with_bounds(
            Quantity::new(2.0, Unit::base(BaseUnit::Meter)),
            (1.8, 2.2),
        );
        let cub = Shape::Cuboid {
            finish_thickness: zero_meters(),
            length: side.clone(),
            width: side.clone(),
            height: side,
        };
        let vol = cub.total_volume().unwrap();
        let [lo, mean, hi] = vol.magnitudes();
        assert_eq!(mean, 8.0);
        assert!(lo <= 1.8f64.powi(3) && hi >= 2.2f64.powi(3));
        assert!(lo <= mean && mean <= hi);
    }
}
