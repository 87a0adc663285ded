//! Fuel-gas species definitions.

/// Species relevant for natural-gas turbine fuel analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Methane (CH₄)
    Methane,
    /// Ethane (C₂H₆)
    Ethane,
    /// Propane (C₃H₈)
    Propane,
    /// n-Butane
    NButane,
    /// Isobutane
    Isobutane,
    /// n-Pentane
    NPentane,
    /// Isopentane
    Isopentane,
    /// n-Hexane
    NHexane,
    /// n-Heptane
    NHeptane,
    /// Hydrogen (H₂)
    Hydrogen,
    /// Carbon monoxide (CO)
    CarbonMonoxide,
    /// Carbon dioxide (CO₂)
    CarbonDioxide,
    /// Nitrogen (N₂)
    Nitrogen,
    /// Hydrogen sulfide (H₂S)
    HydrogenSulfide,
}

impl Species {
    pub const ALL: [Species; 14] = [
        Species::Methane,
        Species::Ethane,
        Species::Propane,
        Species::NButane,
        Species::Isobutane,
        Species::NPentane,
        Species::Isopentane,
        Species::NHexane,
        Species::NHeptane,
        Species::Hydrogen,
        Species::CarbonMonoxide,
        Species::CarbonDioxide,
        Species::Nitrogen,
        Species::HydrogenSulfide,
    ];

    /// Canonical key used in input files and stored records.
    pub fn key(&self) -> &'static str {
        match self {
            Species::Methane => "CH4",
            Species::Ethane => "C2H6",
            Species::Propane => "C3H8",
            Species::NButane => "nC4H10",
            Species::Isobutane => "iC4H10",
            Species::NPentane => "nC5H12",
            Species::Isopentane => "iC5H12",
            Species::NHexane => "nC6H14",
            Species::NHeptane => "nC7H16",
            Species::Hydrogen => "H2",
            Species::CarbonMonoxide => "CO",
            Species::CarbonDioxide => "CO2",
            Species::Nitrogen => "N2",
            Species::HydrogenSulfide => "H2S",
        }
    }

    /// Chemical formula (isomers share one).
    pub fn formula(&self) -> &'static str {
        match self {
            Species::Methane => "CH4",
            Species::Ethane => "C2H6",
            Species::Propane => "C3H8",
            Species::NButane | Species::Isobutane => "C4H10",
            Species::NPentane | Species::Isopentane => "C5H12",
            Species::NHexane => "C6H14",
            Species::NHeptane => "C7H16",
            Species::Hydrogen => "H2",
            Species::CarbonMonoxide => "CO",
            Species::CarbonDioxide => "CO2",
            Species::Nitrogen => "N2",
            Species::HydrogenSulfide => "H2S",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Methane => "Methane",
            Species::Ethane => "Ethane",
            Species::Propane => "Propane",
            Species::NButane => "n-Butane",
            Species::Isobutane => "i-Butane",
            Species::NPentane => "n-Pentane",
            Species::Isopentane => "i-Pentane",
            Species::NHexane => "n-Hexane",
            Species::NHeptane => "n-Heptane",
            Species::Hydrogen => "Hydrogen",
            Species::CarbonMonoxide => "Carbon Monoxide",
            Species::CarbonDioxide => "Carbon Dioxide",
            Species::Nitrogen => "Nitrogen",
            Species::HydrogenSulfide => "Hydrogen Sulfide",
        }
    }

    /// Carbon atoms per molecule (0 for non-hydrocarbons).
    pub fn carbon_number(&self) -> u32 {
        match self {
            Species::Methane => 1,
            Species::Ethane => 2,
            Species::Propane => 3,
            Species::NButane | Species::Isobutane => 4,
            Species::NPentane | Species::Isopentane => 5,
            Species::NHexane => 6,
            Species::NHeptane => 7,
            Species::Hydrogen
            | Species::CarbonMonoxide
            | Species::CarbonDioxide
            | Species::Nitrogen
            | Species::HydrogenSulfide => 0,
        }
    }

    /// Non-combustible diluents (CO₂, N₂).
    pub fn is_inert(&self) -> bool {
        matches!(self, Species::CarbonDioxide | Species::Nitrogen)
    }

    /// Heavy hydrocarbons (C4+) that raise dew point and knock risk.
    pub fn is_heavy_hydrocarbon(&self) -> bool {
        self.carbon_number() >= 4
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CH4" | "METHANE" => Ok(Species::Methane),
            "C2H6" | "ETHANE" => Ok(Species::Ethane),
            "C3H8" | "PROPANE" => Ok(Species::Propane),
            "NC4H10" | "NBUTANE" | "N-BUTANE" | "BUTANE" => Ok(Species::NButane),
            "IC4H10" | "IBUTANE" | "I-BUTANE" | "ISOBUTANE" => Ok(Species::Isobutane),
            "NC5H12" | "NPENTANE" | "N-PENTANE" | "PENTANE" => Ok(Species::NPentane),
            "IC5H12" | "IPENTANE" | "I-PENTANE" | "ISOPENTANE" => Ok(Species::Isopentane),
            "NC6H14" | "C6H14" | "NHEXANE" | "N-HEXANE" | "HEXANE" => Ok(Species::NHexane),
            "NC7H16" | "C7H16" | "NHEPTANE" | "N-HEPTANE" | "HEPTANE" => Ok(Species::NHeptane),
            "H2" | "HYDROGEN" => Ok(Species::Hydrogen),
            "CO" | "CARBONMONOXIDE" | "CARBON MONOXIDE" => Ok(Species::CarbonMonoxide),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CarbonDioxide),
            "N2" | "NITROGEN" => Ok(Species::Nitrogen),
            "H2S" | "HYDROGENSULFIDE" | "HYDROGEN SULFIDE" => Ok(Species::HydrogenSulfide),
            _ => Err("unknown species"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("methane".parse::<Species>().unwrap(), Species::Methane);
        assert_eq!("n-Butane".parse::<Species>().unwrap(), Species::NButane);
        assert_eq!("iC4H10".parse::<Species>().unwrap(), Species::Isobutane);
        assert_eq!(
            "Hydrogen Sulfide".parse::<Species>().unwrap(),
            Species::HydrogenSulfide
        );
        assert!("Xenon".parse::<Species>().is_err());
    }

    #[test]
    fn canonical_keys_roundtrip() {
        for species in Species::ALL {
            let parsed = species
                .key()
                .parse::<Species>()
                .expect("canonical key should parse");
            assert_eq!(parsed, species);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Species::CarbonDioxide.display_name(), "Carbon Dioxide");
        assert_eq!(Species::Isopentane.display_name(), "i-Pentane");
    }

    #[test]
    fn isomers_share_formula() {
        assert_eq!(Species::NButane.formula(), Species::Isobutane.formula());
        assert_ne!(Species::NButane.key(), Species::Isobutane.key());
    }

    #[test]
    fn inert_and_heavy_classification() {
        assert!(Species::CarbonDioxide.is_inert());
        assert!(Species::Nitrogen.is_inert());
        assert!(!Species::HydrogenSulfide.is_inert());

        assert!(Species::NButane.is_heavy_hydrocarbon());
        assert!(Species::NHeptane.is_heavy_hydrocarbon());
        assert!(!Species::Propane.is_heavy_hydrocarbon());
        assert!(!Species::Hydrogen.is_heavy_hydrocarbon());
    }
}
