use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Text of one synthetic TDDFT log: filler, then `n_states` excited states
/// with energies starting near `first_ev`. Every third state is a triplet.
fn synthetic_log(
    name: &str,
    first_ev: f64,
    n_states: usize,
    rng: &mut SimpleRng,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, " Entering Link 1 = synthetic TDDFT run for {name}")?;
    writeln!(out, " SCF Done:  E(RB3LYP) =  -{:.6}     A.U. after   14 cycles", rng.uniform(200.0, 900.0))?;
    writeln!(out, " ")?;
    writeln!(out, " Excitation energies and oscillator strengths:")?;
    writeln!(out, " ")?;

    let mut energy = first_ev;
    for state in 1..=n_states {
        energy += rng.uniform(0.05, 0.45);
        let triplet = state % 3 == 0;
        let (multiplicity, f, s2) = if triplet {
            ("Triplet-A", 0.0, 2.0)
        } else {
            ("Singlet-A", rng.uniform(0.0, 0.8), 0.0)
        };
        writeln!(
            out,
            " Excited State {state:>3}:      {multiplicity}    {energy:>8.4} eV  {:>7.2} nm  f={f:.4}  <S**2>={s2:.3}",
            1239.84 / energy
        )?;
        writeln!(out, "      {:>3} -> {:>3}         {:.5}", 40, 41 + state, rng.uniform(0.3, 0.7))?;
        writeln!(out, " ")?;
    }
    writeln!(out, " Normal termination of Gaussian.")?;
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let samples = [("chromophore_A", 2.2, 8), ("chromophore_B", 2.9, 10), ("chromophore_C", 3.6, 6)];

    for (name, first_ev, n_states) in samples {
        let path = out_dir.join(format!("{name}.log"));
        let text = synthetic_log(name, first_ev, n_states, &mut rng)
            .with_context(|| format!("formatting {name}"))?;
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {n_states} excited states to {}", path.display());
    }

    println!("Wrote {} sample logs to {}", samples.len(), out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_log_has_only_singlets_extracted() {
        let mut rng = SimpleRng::new(7);
        let text = synthetic_log("t", 2.0, 9, &mut rng).unwrap();
        let set = tddft_uvvis::data::extract::extract_str(&text).unwrap();
        // states 3, 6 and 9 are triplets
        assert_eq!(set.len(), 6);
        assert!(set.windows(2).all(|w| w[0].energy_ev < w[1].energy_ev));
    }
}
