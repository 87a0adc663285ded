//! Built-in example compositions.

/// Named example composition in mole percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    /// (species key, mole percent) pairs summing to 100.
    pub components: &'static [(&'static str, f64)],
}

const PRESETS: [Preset; 3] = [
    Preset {
        id: "pipeline",
        name: "Pipeline Natural Gas",
        components: &[
            ("CH4", 95.0),
            ("C2H6", 2.5),
            ("C3H8", 0.5),
            ("nC4H10", 0.2),
            ("CO2", 1.0),
            ("N2", 0.8),
        ],
    },
    Preset {
        id: "rich",
        name: "Rich Associated Gas",
        components: &[
            ("CH4", 85.0),
            ("C2H6", 8.0),
            ("C3H8", 4.0),
            ("nC4H10", 1.5),
            ("CO2", 0.5),
            ("N2", 1.0),
        ],
    },
    Preset {
        id: "lean",
        name: "Lean LNG Send-out",
        components: &[
            ("CH4", 98.0),
            ("C2H6", 0.5),
            ("CO2", 1.0),
            ("N2", 0.5),
        ],
    },
];

pub fn all_presets() -> &'static [Preset] {
    &PRESETS
}

pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}
