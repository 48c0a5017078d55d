//! Filament mass estimation from consumed length.
//!
//! Used when a dialect reports how much filament a print consumes but not how
//! much it weighs. The strand is modelled as a solid cylinder of the given
//! diameter; its volume times the material density is the mass.

use std::f64::consts::PI;

/// Physical properties of a filament spool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Nominal strand diameter in millimetres.
    pub diameter_mm: f64,
    /// Density in g/cm³.
    pub density_g_per_cm3: f64,
}

impl Material {
    /// 1.75 mm PLA, the assumption applied when nothing else is configured.
    pub const PLA_175: Material = Material { diameter_mm: 1.75, density_g_per_cm3: 1.24 };

    pub const fn new(diameter_mm: f64, density_g_per_cm3: f64) -> Self {
        Self { diameter_mm, density_g_per_cm3 }
    }

    /// Grams per metre of strand.
    pub fn grams_per_meter(&self) -> f64 {
        estimate_weight(1.0, self)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::PLA_175
    }
}

/// Estimate the mass in grams of `length_m` metres of `material`.
///
/// ```
/// use slicemeta::{Material, estimate_weight};
///
/// let grams = estimate_weight(1.0, &Material::PLA_175);
/// assert!((grams - 2.98).abs() < 0.01);
/// ```
pub fn estimate_weight(length_m: f64, material: &Material) -> f64 {
    let radius_cm = (material.diameter_mm / 10.0) / 2.0;
    let length_cm = length_m * 100.0;
    let volume_cm3 = PI * radius_cm * radius_cm * length_cm;
    volume_cm3 * material.density_g_per_cm3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pla_reference_values() {
        assert!((estimate_weight(1.23, &Material::PLA_175) - 3.66).abs() < 0.1);
        assert!((estimate_weight(1.0, &Material::PLA_175) - 2.98).abs() < 0.1);
        assert_eq!(estimate_weight(0.0, &Material::PLA_175), 0.0);
    }

    #[test]
    fn default_material_is_pla() {
        assert_eq!(Material::default(), Material::PLA_175);
        assert!((Material::default().grams_per_meter() - 2.982).abs() < 0.001);
    }

    #[test]
    fn increases_with_length() {
        let lengths = [0.0, 0.01, 0.5, 1.0, 2.5, 10.0, 250.0];
        for pair in lengths.windows(2) {
            let (shorter, longer) = (pair[0], pair[1]);
            assert!(estimate_weight(shorter, &Material::PLA_175) < estimate_weight(longer, &Material::PLA_175));
        }
    }

    #[test]
    fn increases_with_diameter_squared() {
        let thin = estimate_weight(3.0, &Material::new(1.75, 1.24));
        let thick = estimate_weight(3.0, &Material::new(2.85, 1.24));
        assert!(thin < thick);

        let ratio = thick / thin;
        let expected = (2.85f64 / 1.75).powi(2);
        assert!((ratio - expected).abs() < 1e-9);
    }

    #[test]
    fn custom_density_scales_linearly() {
        let pla = estimate_weight(2.0, &Material::new(1.75, 1.24));
        let petg = estimate_weight(2.0, &Material::new(1.75, 1.27));
        assert!((petg / pla - 1.27 / 1.24).abs() < 1e-9);
    }
}
