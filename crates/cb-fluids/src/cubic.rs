//! Compressibility-factor roots of the Peng-Robinson cubic.
//!
//! In dimensionless form the equation of state reads
//!
//! ```text
//! f(Z) = Z³ − (1 − B)·Z² + (A − 3B² − 2B)·Z − (AB − B² − B³) = 0
//! ```
//!
//! Two strategies are offered. [`RootStrategy::NewtonVaporGuess`] iterates
//! Newton-Raphson from Z₀ = 1 and lands on the vapor-like root for gas-phase
//! conditions. [`RootStrategy::LargestRealRoot`] enumerates every real root in
//! closed form and picks the largest one above B.

use crate::error::{FluidError, FluidResult};
use std::f64::consts::PI;
use tracing::{debug, trace, warn};

/// Coefficients of the monic cubic `Z³ + c2·Z² + c1·Z + c0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCoefficients {
    pub c2: f64,
    pub c1: f64,
    pub c0: f64,
}

impl CubicCoefficients {
    /// Peng-Robinson coefficients for dimensionless parameters A and B.
    pub fn peng_robinson(a: f64, b: f64) -> Self {
        Self {
            c2: -(1.0 - b),
            c1: a - 3.0 * b * b - 2.0 * b,
            c0: -(a * b - b * b - b * b * b),
        }
    }

    #[inline]
    pub fn value(&self, z: f64) -> f64 {
        ((z + self.c2) * z + self.c1) * z + self.c0
    }

    #[inline]
    pub fn derivative(&self, z: f64) -> f64 {
        (3.0 * z + 2.0 * self.c2) * z + self.c1
    }
}

/// Newton iteration limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonSettings {
    /// Starting estimate
    pub initial_guess: f64,
    /// Maximum iterations
    pub max_iterations: usize,
    /// Converged once successive iterates differ by less than this
    pub step_tolerance: f64,
    /// Stop early when |f'(Z)| falls below this
    pub min_derivative: f64,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            initial_guess: 1.0,
            max_iterations: 20,
            step_tolerance: 1e-7,
            min_derivative: 1e-9,
        }
    }
}

/// How the compressibility root is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RootStrategy {
    /// Newton-Raphson from the vapor-side guess; reproduces reference outputs.
    #[default]
    NewtonVaporGuess,
    /// Closed-form enumeration, largest real root greater than B.
    LargestRealRoot,
}

/// Why the Newton loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewtonExit {
    /// Step fell below the tolerance.
    Converged,
    /// Derivative too flat to take a step.
    FlatDerivative,
    /// Iteration budget spent.
    Exhausted,
    /// Closed-form solution; no iteration.
    ClosedForm,
}

/// Outcome of a root solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    /// Selected compressibility factor
    pub z: f64,
    /// Newton steps taken (0 for closed form)
    pub iterations: usize,
    pub exit: NewtonExit,
    /// Number of distinct real roots of the cubic, when enumerated
    pub root_count: Option<usize>,
}

impl RootSolution {
    /// True unless the solver gave up, either on a flat derivative or by running
    /// out of iterations.
    pub fn converged(&self) -> bool {
        matches!(self.exit, NewtonExit::Converged | NewtonExit::ClosedForm)
    }
}

/// Newton-Raphson on the cubic.
///
/// Never fails: a flat derivative or an exhausted budget returns the current
/// estimate, with [`RootSolution::exit`] recording which case occurred.
pub fn solve_newton(a: f64, b: f64, settings: &NewtonSettings) -> RootSolution {
    let cubic = CubicCoefficients::peng_robinson(a, b);
    let mut z = settings.initial_guess;

    for iter in 0..settings.max_iterations {
        let f = cubic.value(z);
        let df = cubic.derivative(z);
        if df.abs() < settings.min_derivative {
            debug!(a, b, z, iter, "cubic derivative vanished, keeping current estimate");
            return RootSolution {
                z,
                iterations: iter,
                exit: NewtonExit::FlatDerivative,
                root_count: None,
            };
        }
        let z_new = z - f / df;
        trace!(iter, z, z_new, f, df, "newton step");
        if (z_new - z).abs() < settings.step_tolerance {
            return RootSolution {
                z: z_new,
                iterations: iter + 1,
                exit: NewtonExit::Converged,
                root_count: None,
            };
        }
        z = z_new;
    }

    warn!(
        a,
        b,
        z,
        max_iterations = settings.max_iterations,
        "compressibility root not converged, returning last estimate"
    );
    RootSolution {
        z,
        iterations: settings.max_iterations,
        exit: NewtonExit::Exhausted,
        root_count: None,
    }
}

/// Reference-parity entry point: Newton from Z₀ = 1 with the default limits.
pub fn solve_compressibility_factor(a: f64, b: f64) -> f64 {
    solve_newton(a, b, &NewtonSettings::default()).z
}

/// All real roots of a cubic, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicRoots {
    roots: Vec<f64>,
}

impl CubicRoots {
    /// Closed-form real roots (Cardano for one root, trigonometric for three).
    pub fn of(cubic: &CubicCoefficients) -> Self {
        let CubicCoefficients { c2, c1, c0 } = *cubic;
        let shift = -c2 / 3.0;
        // depressed cubic t³ + p·t + q
        let p = c1 - c2 * c2 / 3.0;
        let q = 2.0 * c2 * c2 * c2 / 27.0 - c2 * c1 / 3.0 + c0;
        let disc = (q / 2.0).powi(2) + (p / 3.0).powi(3);

        let mut roots = if p.abs() < 1e-14 && q.abs() < 1e-14 {
            vec![shift]
        } else if disc > 0.0 {
            // take the larger-magnitude branch to avoid cancellation, |w| >= s > 0
            let s = disc.sqrt();
            let w = if q >= 0.0 { -q / 2.0 - s } else { -q / 2.0 + s };
            let u = w.cbrt();
            let v = -p / (3.0 * u);
            vec![u + v + shift]
        } else {
            let m = 2.0 * (-p / 3.0).sqrt();
            let arg = (3.0 * q / (p * m)).clamp(-1.0, 1.0);
            let theta = arg.acos() / 3.0;
            (0..3)
                .map(|k| m * (theta - 2.0 * PI * k as f64 / 3.0).cos() + shift)
                .collect()
        };

        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|x, y| (*x - *y).abs() < 1e-12);
        Self { roots }
    }

    pub fn peng_robinson(a: f64, b: f64) -> Self {
        Self::of(&CubicCoefficients::peng_robinson(a, b))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.roots
    }

    pub fn count(&self) -> usize {
        self.roots.len()
    }

    pub fn is_multi_root(&self) -> bool {
        self.roots.len() > 1
    }

    /// Largest root strictly above `b`, the physical lower bound on Z.
    pub fn vapor_root(&self, b: f64) -> Option<f64> {
        self.roots.iter().rev().copied().find(|&z| z > b)
    }

    /// Smallest root strictly above `b`.
    pub fn liquid_root(&self, b: f64) -> Option<f64> {
        self.roots.iter().copied().find(|&z| z > b)
    }
}

/// Root-solver configuration shared by the enthalpy evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverSettings {
    pub strategy: RootStrategy,
    pub newton: NewtonSettings,
    /// Turn a Newton result that ran out of iterations or hit a flat derivative
    /// into [`FluidError::NonConvergentRoot`].
    pub strict_convergence: bool,
}

impl SolverSettings {
    pub fn solve(&self, a: f64, b: f64) -> FluidResult<RootSolution> {
        let solution = match self.strategy {
            RootStrategy::NewtonVaporGuess => solve_newton(a, b, &self.newton),
            RootStrategy::LargestRealRoot => {
                let roots = CubicRoots::peng_robinson(a, b);
                let z = roots.vapor_root(b).ok_or(FluidError::NonPhysical {
                    what: "cubic has no real root above B",
                })?;
                RootSolution {
                    z,
                    iterations: 0,
                    exit: NewtonExit::ClosedForm,
                    root_count: Some(roots.count()),
                }
            }
        };

        debug!(
            a,
            b,
            z = solution.z,
            iterations = solution.iterations,
            converged = solution.converged(),
            "compressibility factor"
        );

        if self.strict_convergence && !solution.converged() {
            return Err(FluidError::NonConvergentRoot {
                iterations: solution.iterations,
                last_z: solution.z,
            });
        }
        Ok(solution)
    }
}
