//! Typed keys for the reference tables: conductor sizes, conduit trade sizes,
//! conductor material, insulation temperature rating, and conduit material.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conductor size, AWG through kcmil, in ascending order.
///
/// The derived `Ord` follows declaration order, so comparisons and sorted
/// collections walk sizes from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WireSize {
    Awg14,
    Awg12,
    Awg10,
    Awg8,
    Awg6,
    Awg4,
    Awg3,
    Awg2,
    Awg1,
    Awg1_0,
    Awg2_0,
    Awg3_0,
    Awg4_0,
    Kcmil250,
    Kcmil300,
    Kcmil350,
    Kcmil400,
    Kcmil500,
    Kcmil600,
    Kcmil700,
    Kcmil750,
    Kcmil800,
    Kcmil900,
    Kcmil1000,
    Kcmil1250,
    Kcmil1500,
    Kcmil1750,
    Kcmil2000,
}

impl WireSize {
    /// Every size, smallest first.
    pub const ALL: [WireSize; 28] = [
        WireSize::Awg14,
        WireSize::Awg12,
        WireSize::Awg10,
        WireSize::Awg8,
        WireSize::Awg6,
        WireSize::Awg4,
        WireSize::Awg3,
        WireSize::Awg2,
        WireSize::Awg1,
        WireSize::Awg1_0,
        WireSize::Awg2_0,
        WireSize::Awg3_0,
        WireSize::Awg4_0,
        WireSize::Kcmil250,
        WireSize::Kcmil300,
        WireSize::Kcmil350,
        WireSize::Kcmil400,
        WireSize::Kcmil500,
        WireSize::Kcmil600,
        WireSize::Kcmil700,
        WireSize::Kcmil750,
        WireSize::Kcmil800,
        WireSize::Kcmil900,
        WireSize::Kcmil1000,
        WireSize::Kcmil1250,
        WireSize::Kcmil1500,
        WireSize::Kcmil1750,
        WireSize::Kcmil2000,
    ];

    /// Normalized label with no prefix, e.g. `"12"`, `"1/0"`, `"500"`.
    pub fn as_str(self) -> &'static str {
        match self {
            WireSize::Awg14 => "14",
            WireSize::Awg12 => "12",
            WireSize::Awg10 => "10",
            WireSize::Awg8 => "8",
            WireSize::Awg6 => "6",
            WireSize::Awg4 => "4",
            WireSize::Awg3 => "3",
            WireSize::Awg2 => "2",
            WireSize::Awg1 => "1",
            WireSize::Awg1_0 => "1/0",
            WireSize::Awg2_0 => "2/0",
            WireSize::Awg3_0 => "3/0",
            WireSize::Awg4_0 => "4/0",
            WireSize::Kcmil250 => "250",
            WireSize::Kcmil300 => "300",
            WireSize::Kcmil350 => "350",
            WireSize::Kcmil400 => "400",
            WireSize::Kcmil500 => "500",
            WireSize::Kcmil600 => "600",
            WireSize::Kcmil700 => "700",
            WireSize::Kcmil750 => "750",
            WireSize::Kcmil800 => "800",
            WireSize::Kcmil900 => "900",
            WireSize::Kcmil1000 => "1000",
            WireSize::Kcmil1250 => "1250",
            WireSize::Kcmil1500 => "1500",
            WireSize::Kcmil1750 => "1750",
            WireSize::Kcmil2000 => "2000",
        }
    }

    /// Parses a normalized label (prefix already stripped).
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for WireSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for WireSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown wire size \"{value}\""))
    }
}

impl From<WireSize> for String {
    fn from(value: WireSize) -> Self {
        value.as_str().to_string()
    }
}

/// Conduit trade size in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConduitSize {
    Half,
    ThreeQuarter,
    One,
    OneAndQuarter,
    OneAndHalf,
    Two,
    TwoAndHalf,
    Three,
    ThreeAndHalf,
    Four,
    Five,
    Six,
}

impl ConduitSize {
    pub const ALL: [ConduitSize; 12] = [
        ConduitSize::Half,
        ConduitSize::ThreeQuarter,
        ConduitSize::One,
        ConduitSize::OneAndQuarter,
        ConduitSize::OneAndHalf,
        ConduitSize::Two,
        ConduitSize::TwoAndHalf,
        ConduitSize::Three,
        ConduitSize::ThreeAndHalf,
        ConduitSize::Four,
        ConduitSize::Five,
        ConduitSize::Six,
    ];

    /// Normalized label with no suffix, e.g. `3/4"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ConduitSize::Half => "1/2\"",
            ConduitSize::ThreeQuarter => "3/4\"",
            ConduitSize::One => "1\"",
            ConduitSize::OneAndQuarter => "1-1/4\"",
            ConduitSize::OneAndHalf => "1-1/2\"",
            ConduitSize::Two => "2\"",
            ConduitSize::TwoAndHalf => "2-1/2\"",
            ConduitSize::Three => "3\"",
            ConduitSize::ThreeAndHalf => "3-1/2\"",
            ConduitSize::Four => "4\"",
            ConduitSize::Five => "5\"",
            ConduitSize::Six => "6\"",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for ConduitSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ConduitSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown conduit size \"{value}\""))
    }
}

impl From<ConduitSize> for String {
    fn from(value: ConduitSize) -> Self {
        value.as_str().to_string()
    }
}

/// Conductor material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    #[serde(rename = "CU")]
    Copper,
    #[serde(rename = "AL")]
    Aluminum,
}

impl Material {
    pub fn as_str(self) -> &'static str {
        match self {
            Material::Copper => "CU",
            Material::Aluminum => "AL",
        }
    }

    /// Accepts `CU`/`AL` in any case with surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "CU" => Some(Material::Copper),
            "AL" => Some(Material::Aluminum),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Material::Copper => 0,
            Material::Aluminum => 1,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insulation temperature rating column of the ampacity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TempRating {
    C60,
    C75,
    C90,
}

impl TempRating {
    pub fn celsius(self) -> u32 {
        match self {
            TempRating::C60 => 60,
            TempRating::C75 => 75,
            TempRating::C90 => 90,
        }
    }

    pub fn from_celsius(c: u32) -> Option<Self> {
        match c {
            60 => Some(TempRating::C60),
            75 => Some(TempRating::C75),
            90 => Some(TempRating::C90),
            _ => None,
        }
    }

    /// Parses `"75"`, `"75 C"`, or `"75C"`.
    pub fn parse(label: &str) -> Option<Self> {
        let digits = label.replace(['C', 'c'], "");
        digits.trim().parse::<u32>().ok().and_then(Self::from_celsius)
    }

    fn index(self) -> usize {
        match self {
            TempRating::C60 => 0,
            TempRating::C75 => 1,
            TempRating::C90 => 2,
        }
    }
}

impl fmt::Display for TempRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} C", self.celsius())
    }
}

impl TryFrom<u32> for TempRating {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_celsius(value).ok_or_else(|| format!("unsupported temperature rating {value}"))
    }
}

impl From<TempRating> for u32 {
    fn from(value: TempRating) -> Self {
        value.celsius()
    }
}

/// Top-level key of the conduit area table; also selects the impedance column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConduitMaterial {
    #[serde(rename = "Magnetic")]
    Magnetic,
    #[serde(rename = "Non-Magnetic")]
    NonMagnetic,
}

impl ConduitMaterial {
    pub fn as_str(self) -> &'static str {
        match self {
            ConduitMaterial::Magnetic => "Magnetic",
            ConduitMaterial::NonMagnetic => "Non-Magnetic",
        }
    }

    fn index(self) -> usize {
        match self {
            ConduitMaterial::Magnetic => 0,
            ConduitMaterial::NonMagnetic => 1,
        }
    }
}

impl fmt::Display for ConduitMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ampacity rows indexed by material and temperature rating.
#[derive(Debug, Clone, Default)]
pub struct AmpacityGrid {
    rows: [[Vec<(WireSize, f64)>; 3]; 2],
}

impl AmpacityGrid {
    pub fn set_row(&mut self, material: Material, temp: TempRating, row: Vec<(WireSize, f64)>) {
        self.rows[material.index()][temp.index()] = row;
    }

    /// Ascending `(size, ampacity)` row; empty when the table has no column.
    pub fn row(&self, material: Material, temp: TempRating) -> &[(WireSize, f64)] {
        &self.rows[material.index()][temp.index()]
    }
}

/// Per-size resistance and reactance in ohms per 1000 ft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impedance {
    /// Resistance by `[material][conduit material]`.
    r: [[f64; 2]; 2],
    /// Reactance by conduit material.
    x: [f64; 2],
}

impl Impedance {
    /// Builds an entry from `(cu_magnetic, cu_non_magnetic)`,
    /// `(al_magnetic, al_non_magnetic)` and `(x_magnetic, x_non_magnetic)`.
    pub fn new(cu: (f64, f64), al: (f64, f64), x: (f64, f64)) -> Self {
        Self {
            r: [[cu.0, cu.1], [al.0, al.1]],
            x: [x.0, x.1],
        }
    }

    pub fn resistance(&self, material: Material, conduit: ConduitMaterial) -> f64 {
        self.r[material.index()][conduit.index()]
    }

    pub fn reactance(&self, conduit: ConduitMaterial) -> f64 {
        self.x[conduit.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_sizes_are_ascending() {
        for pair in WireSize::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn wire_size_labels_round_trip() {
        for size in WireSize::ALL {
            assert_eq!(WireSize::parse(size.as_str()), Some(size));
        }
        assert_eq!(WireSize::parse(" 1/0 "), Some(WireSize::Awg1_0));
        assert_eq!(WireSize::parse("5"), None);
    }

    #[test]
    fn conduit_size_parse() {
        assert_eq!(ConduitSize::parse("3/4\""), Some(ConduitSize::ThreeQuarter));
        assert_eq!(ConduitSize::parse("7\""), None);
    }

    #[test]
    fn temp_rating_parse_accepts_suffix() {
        assert_eq!(TempRating::parse("75 C"), Some(TempRating::C75));
        assert_eq!(TempRating::parse("90C"), Some(TempRating::C90));
        assert_eq!(TempRating::parse("60"), Some(TempRating::C60));
        assert_eq!(TempRating::parse("105"), None);
        assert_eq!(TempRating::parse("hot"), None);
        assert_eq!(TempRating::C75.to_string(), "75 C");
    }

    #[test]
    fn material_parse_is_case_insensitive() {
        assert_eq!(Material::parse(" cu "), Some(Material::Copper));
        assert_eq!(Material::parse("Al"), Some(Material::Aluminum));
        assert_eq!(Material::parse("Copper"), None);
    }
}
