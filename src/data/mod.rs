/// Data layer: core types, extraction and broadening.
///
/// Architecture:
/// ```text
///  TDDFT .log / .out
///        │
///        ▼
///   ┌──────────┐
///   │ extract  │  regex per line → ExcitationSet  (λ = 1240 / E)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ broaden  │  Σ Gaussians on the WavelengthGrid → Spectrum
///   └──────────┘
/// ```

pub mod broaden;
pub mod extract;
pub mod model;
