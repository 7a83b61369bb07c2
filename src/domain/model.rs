use serde::{Deserialize, Serialize};
use std::fmt;

/// The π approximation used for circular plots.
pub const PI_APPROX: f64 = 3.14159;

/// On-disk values are `rectangle`/`circle`; the Portuguese spellings are
/// accepted when reading older files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    #[serde(rename = "rectangle", alias = "retangular")]
    Rectangle,
    #[serde(rename = "circle", alias = "circular")]
    Circle,
}

impl Shape {
    /// Name shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Rectangle => "retangular",
            Shape::Circle => "circular",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plot dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Rectangle { width: f64, length: f64 },
    Circle { radius: f64 },
}

impl Geometry {
    pub fn shape(&self) -> Shape {
        match self {
            Geometry::Rectangle { .. } => Shape::Rectangle,
            Geometry::Circle { .. } => Shape::Circle,
        }
    }

    pub fn area(&self) -> f64 {
        match *self {
            Geometry::Rectangle { width, length } => width * length,
            Geometry::Circle { radius } => PI_APPROX * radius * radius,
        }
    }
}

/// A registered crop plot.
///
/// `area_per_subdivision` is derived and kept equal to
/// `total_area / subdivision_count` (or `0` when there are no subdivisions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Culture {
    #[serde(alias = "nome")]
    name: String,
    #[serde(alias = "formato")]
    shape: Shape,
    #[serde(alias = "area")]
    total_area: f64,
    #[serde(alias = "ruas")]
    subdivision_count: u32,
    #[serde(default)]
    area_per_subdivision: f64,
}

impl Culture {
    pub fn new(name: impl Into<String>, geometry: Geometry, subdivision_count: u32) -> Self {
        let mut culture = Self {
            name: name.into(),
            shape: geometry.shape(),
            total_area: geometry.area(),
            subdivision_count,
            area_per_subdivision: 0.0,
        };
        culture.recompute();
        culture
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    pub fn subdivision_count(&self) -> u32 {
        self.subdivision_count
    }

    pub fn area_per_subdivision(&self) -> f64 {
        self.area_per_subdivision
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.shape = geometry.shape();
        self.total_area = geometry.area();
        self.recompute();
    }

    pub fn set_subdivision_count(&mut self, subdivision_count: u32) {
        self.subdivision_count = subdivision_count;
        self.recompute();
    }

    /// Restores the derived field, e.g. after reading a row from disk.
    pub(crate) fn recompute(&mut self) {
        self.area_per_subdivision = if self.subdivision_count > 0 {
            self.total_area / f64::from(self.subdivision_count)
        } else {
            0.0
        };
    }
}

/// A registered agricultural product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    #[serde(alias = "nome")]
    pub name: String,
    /// Liters per square meter.
    #[serde(alias = "dose_m2")]
    pub dose_per_area: f64,
}

impl Input {
    pub fn new(name: impl Into<String>, dose_per_area: f64) -> Self {
        Self {
            name: name.into(),
            dose_per_area,
        }
    }
}

/// Volume of an input needed for one culture, in liters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Application {
    pub total: f64,
    pub per_subdivision: f64,
}
