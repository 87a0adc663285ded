// gq-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

pub mod constants {
    /// Universal gas constant [J/(mol*K)], CODATA 2018.
    pub const R_J_PER_MOL_K: f64 = 8.314_462_618;

    /// Normal reference temperature [K] (0 degC).
    pub const NORMAL_TEMPERATURE_K: f64 = 273.15;

    /// Normal reference pressure [kPa] (1 atm).
    pub const NORMAL_PRESSURE_KPA: f64 = 101.325;
}
