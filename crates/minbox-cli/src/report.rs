//! Human- and machine-readable output for a measured box.

use minbox_kernel::minbox_math::Vec3;
use minbox_kernel::MinimumBox;
use serde::{Deserialize, Serialize};

/// Linear unit for reading input and showing values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum LengthUnit {
    /// Millimeters.
    #[default]
    #[serde(rename = "mm")]
    #[value(name = "mm")]
    Millimeter,
    /// Centimeters.
    #[serde(rename = "cm")]
    #[value(name = "cm")]
    Centimeter,
    /// Meters.
    #[serde(rename = "m")]
    #[value(name = "m")]
    Meter,
    /// Inches.
    #[serde(rename = "in")]
    #[value(name = "in")]
    Inch,
}

impl LengthUnit {
    /// Size of one unit in millimeters.
    pub fn millimeters(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => 10.0,
            Self::Meter => 1000.0,
            Self::Inch => 25.4,
        }
    }

    /// Short suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Inch => "in",
        }
    }
}

/// How model values become displayed values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitsFormat {
    /// Unit the geometry was authored in.
    pub model: LengthUnit,
    /// Unit to display.
    pub display: LengthUnit,
}

impl UnitsFormat {
    /// Convert a model length to the display unit.
    pub fn convert(&self, value: f64) -> f64 {
        value * self.model.millimeters() / self.display.millimeters()
    }

    /// Format a model length, e.g. `12.500 mm`.
    pub fn format(&self, value: f64) -> String {
        format!("{:.3} {}", self.convert(value), self.display.suffix())
    }
}

/// One `name: value` line.
pub fn value_row(name: &str, value: f64, units: &UnitsFormat) -> String {
    format!("{name}: {}\n", units.format(value))
}

/// One `name - Vector: x, y, z` line, normalized, four decimals.
pub fn vector_row(name: &str, vector: &Vec3) -> String {
    let v = vector.try_normalize(0.0).unwrap_or(*vector);
    // Keep "-0.0000" out of the output
    let c = |x: f64| if x.abs() < 5e-5 { 0.0 } else { x };
    format!("{name} - Vector: {:.4}, {:.4}, {:.4}\n", c(v.x), c(v.y), c(v.z))
}

/// The full text report.
pub fn message(result: &MinimumBox, units: &UnitsFormat) -> String {
    let mut msg = value_row("Length", result.length, units);
    msg += &value_row("Width", result.width, units);
    msg += &value_row("Height", result.height, units);
    msg += &vector_row("X Axis", &result.x_axis);
    msg += &vector_row("Y Axis", &result.y_axis);
    msg += &vector_row("Z Axis", &result.z_axis);
    msg
}

/// Serializable form of a result, in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Display unit suffix.
    pub units: &'static str,
    /// Extent along `x_axis`.
    pub length: f64,
    /// Extent along `y_axis`.
    pub width: f64,
    /// Extent along `z_axis`.
    pub height: f64,
    /// First principal axis.
    pub x_axis: [f64; 3],
    /// Second principal axis.
    pub y_axis: [f64; 3],
    /// Third principal axis.
    pub z_axis: [f64; 3],
    /// Box center.
    pub center: [f64; 3],
    /// Body center of mass.
    pub center_of_mass: [f64; 3],
}

impl Report {
    /// Build from a kernel result.
    pub fn new(result: &MinimumBox, units: &UnitsFormat) -> Self {
        let arr = |v: &Vec3| [v.x, v.y, v.z];
        let pos = |v: &Vec3| [units.convert(v.x), units.convert(v.y), units.convert(v.z)];
        Self {
            units: units.display.suffix(),
            length: units.convert(result.length),
            width: units.convert(result.width),
            height: units.convert(result.height),
            x_axis: arr(&result.x_axis),
            y_axis: arr(&result.y_axis),
            z_axis: arr(&result.z_axis),
            center: pos(&result.oriented_box.center.coords),
            center_of_mass: pos(&result.center_of_mass.coords),
        }
    }
}
