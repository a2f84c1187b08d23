use super::model::{Excitation, Spectrum, WavelengthGrid};

/// Gaussian line shape evaluated at every point of `xs`:
/// `amplitude * exp(-(x - center)^2 / (2 * width^2))`.
///
/// `width` must be positive; this is not checked here.
pub fn gaussian_broadening(center: f64, amplitude: f64, xs: &[f64], width: f64) -> Vec<f64> {
    let mut out = vec![0.0; xs.len()];
    add_gaussian(&mut out, center, amplitude, xs, width);
    out
}

/// Same line shape as [`gaussian_broadening`], summed into `acc`.
pub fn add_gaussian(acc: &mut [f64], center: f64, amplitude: f64, xs: &[f64], width: f64) {
    debug_assert_eq!(acc.len(), xs.len());
    let denom = 2.0 * width * width;
    for (a, &x) in acc.iter_mut().zip(xs) {
        let d = x - center;
        *a += amplitude * (-d * d / denom).exp();
    }
}

/// Sum the broadened contributions of every excitation onto `grid`.
///
/// An empty set gives a flat zero spectrum.
pub fn broadened_spectrum(excitations: &[Excitation], grid: &WavelengthGrid, width: f64) -> Spectrum {
    let mut spectrum = Spectrum::zeros(grid);
    for ex in excitations {
        add_gaussian(
            &mut spectrum.values,
            ex.wavelength_nm,
            ex.oscillator_strength,
            grid.points(),
            width,
        );
    }
    spectrum
}
