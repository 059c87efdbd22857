//! # 🧭 Backend de barreira logarítmica
//!
//! Path-following interior point method on the dual of the exclusion program:
//!
//! ```text
//! maximize    Re tr(R Y)
//! subject to  C_i - Y ⪰ 0      (i = 1..n)
//! ```
//!
//! For a barrier weight `t` the centering problem is
//!
//! ```text
//! maximize  f_t(Y) = t·Re tr(R Y) + Σ_i log det(C_i - Y)
//! ```
//!
//! solved by damped Newton steps over a real basis of the d² dimensional
//! space of Hermitian matrices. Once the Newton decrement is inside the
//! quadratic region the full step is taken without backtracking. At the center `X_i = (C_i - Y)^{-1} / t` is
//! primal feasible and the duality gap is exactly `n·d / t`, so `t` grows by
//! `barrier_growth` until that bound drops below `gap_tolerance`.
//!
//! ```text
//! ┌──────────┐   Newton    ┌──────────┐   t ← μ·t   ┌──────────┐
//! │ Y₀ = -sI │ ──────────▶ │ centered │ ──────────▶ │ gap ≤ ε? │──▶ report
//! └──────────┘             └──────────┘ ◀────────── └──────────┘
//! ```

use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use qex_core::linalg::{self, c, CMatrix, C64};

use crate::backend::{BackendReport, ConicBackend, Termination};
use crate::cancel::CancelToken;
use crate::config::BarrierSettings;
use crate::program::ConicProgram;

/// Newton decrement λ² below which the full step stays in the Dikin
/// ellipsoid (λ < 1/4) and needs no line search.
const NEWTON_REGION: f64 = 1.0 / 16.0;

/// Largest |Im| / Re tolerated on a Cholesky pivot.
const PIVOT_IMAGINARY: f64 = 1e-10;

/// Backend embutido: barreira log-det + Newton
#[derive(Debug, Clone, Default)]
pub struct BarrierBackend {
    settings: BarrierSettings,
}

impl BarrierBackend {
    pub fn new(settings: BarrierSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BarrierSettings {
        &self.settings
    }
}

impl ConicBackend for BarrierBackend {
    fn name(&self) -> &str {
        "barrier"
    }

    fn submit(&self, program: &ConicProgram, cancel: &CancelToken) -> BackendReport {
        if program.block_count() == 0 {
            // Σ X_i = R with no variables
            let zero_rhs = program.rhs().iter().all(|z| z.norm() == 0.0);
            return if zero_rhs {
                BackendReport {
                    termination: Termination::Converged,
                    primal_objective: 0.0,
                    dual_objective: 0.0,
                    residual: 0.0,
                    iterations: 0,
                    operators: Vec::new(),
                }
            } else {
                BackendReport::terminated(Termination::Infeasible, 0)
            };
        }
        if !program.is_well_formed() {
            return BackendReport::terminated(
                Termination::NumericalFailure(format!(
                    "blocks are not all {0}×{0}",
                    program.dim()
                )),
                0,
            );
        }
        if !program.costs().iter().all(linalg::is_finite) || !linalg::is_finite(program.rhs()) {
            return BackendReport::terminated(
                Termination::NumericalFailure("program data is not finite".to_string()),
                0,
            );
        }

        PathFollowing::new(self.settings, program).run(cancel)
    }
}

/// Direção elementar da base Hermitiana
#[derive(Debug, Clone, Copy)]
enum Direction {
    /// E_jj
    Diagonal(usize),
    /// E_jl + E_lj
    Symmetric(usize, usize),
    /// i·E_jl - i·E_lj
    Antisymmetric(usize, usize),
}

impl Direction {
    /// Re tr(A B)
    fn trace_with(self, a: &CMatrix) -> f64 {
        match self {
            Self::Diagonal(j) => a[(j, j)].re,
            Self::Symmetric(j, l) => (a[(l, j)] + a[(j, l)]).re,
            Self::Antisymmetric(j, l) => (a[(j, l)] - a[(l, j)]).im,
        }
    }

    /// M += x·B
    fn accumulate(self, m: &mut CMatrix, x: f64) {
        match self {
            Self::Diagonal(j) => m[(j, j)] += c(x, 0.0),
            Self::Symmetric(j, l) => {
                m[(j, l)] += c(x, 0.0);
                m[(l, j)] += c(x, 0.0);
            }
            Self::Antisymmetric(j, l) => {
                m[(j, l)] += c(0.0, x);
                m[(l, j)] -= c(0.0, x);
            }
        }
    }

    /// W B W
    fn sandwich(self, w: &CMatrix) -> CMatrix {
        let cross = |j: usize, l: usize| -> CMatrix { w.column(j) * w.row(l) };
        match self {
            Self::Diagonal(j) => cross(j, j),
            Self::Symmetric(j, l) => cross(j, l) + cross(l, j),
            Self::Antisymmetric(j, l) => (cross(j, l) - cross(l, j)) * c(0.0, 1.0),
        }
    }
}

/// Base real do espaço das matrizes Hermitianas d×d
#[derive(Debug, Clone)]
struct HermitianBasis {
    dim: usize,
    directions: Vec<Direction>,
}

impl HermitianBasis {
    fn new(dim: usize) -> Self {
        let mut directions: Vec<Direction> = (0..dim).map(Direction::Diagonal).collect();
        for j in 0..dim {
            for l in (j + 1)..dim {
                directions.push(Direction::Symmetric(j, l));
                directions.push(Direction::Antisymmetric(j, l));
            }
        }
        Self { dim, directions }
    }

    fn len(&self) -> usize {
        self.directions.len()
    }

    /// Σ_k x_k B_k
    fn combine(&self, coefficients: &DVector<f64>) -> CMatrix {
        let mut m = CMatrix::zeros(self.dim, self.dim);
        for (direction, &x) in self.directions.iter().zip(coefficients.iter()) {
            direction.accumulate(&mut m, x);
        }
        m
    }
}

/// Fator de folga C_i - Y
struct Slack {
    logdet: f64,
    inverse: CMatrix,
}

enum Centering {
    Centered,
    Halted(Termination),
}

struct PathFollowing<'a> {
    settings: BarrierSettings,
    program: &'a ConicProgram,
    basis: HermitianBasis,
    y: CMatrix,
    t: f64,
    iterations: usize,
}

impl<'a> PathFollowing<'a> {
    fn new(settings: BarrierSettings, program: &'a ConicProgram) -> Self {
        let d = program.dim();
        let shift = 1.0
            + program
                .costs()
                .iter()
                .map(|cost| cost.norm())
                .fold(0.0, f64::max);
        Self {
            settings,
            program,
            basis: HermitianBasis::new(d),
            y: CMatrix::identity(d, d) * c(-shift, 0.0),
            t: settings.initial_barrier,
            iterations: 0,
        }
    }

    fn run(mut self, cancel: &CancelToken) -> BackendReport {
        let blocks = self.program.block_count() as f64;
        let d = self.program.dim() as f64;

        loop {
            if let Centering::Halted(termination) = self.center(cancel) {
                return self.report(termination);
            }

            let gap_bound = blocks * d / self.t;
            tracing::debug!(
                t = self.t,
                gap_bound,
                iterations = self.iterations,
                "barrier centered"
            );
            if gap_bound <= self.settings.gap_tolerance {
                return self.report(Termination::Converged);
            }
            self.t *= self.settings.barrier_growth;
        }
    }

    fn center(&mut self, cancel: &CancelToken) -> Centering {
        for _ in 0..self.settings.max_centering_steps {
            if cancel.is_cancelled() {
                return Centering::Halted(Termination::Interrupted);
            }
            if self.iterations >= self.settings.max_iterations {
                return Centering::Halted(Termination::IterationLimit);
            }
            self.iterations += 1;

            let Some(slacks) = self.slacks(&self.y) else {
                return Centering::Halted(Termination::NumericalFailure(
                    "iterate left the feasible cone".to_string(),
                ));
            };
            let (gradient, hessian) = self.newton_system(&slacks);
            let Some(delta) = solve_scaled(hessian, &gradient) else {
                return Centering::Halted(Termination::NumericalFailure(
                    "singular Newton system".to_string(),
                ));
            };

            let decrement = gradient.dot(&delta);
            if !decrement.is_finite() {
                return Centering::Halted(Termination::NumericalFailure(
                    "non-finite Newton decrement".to_string(),
                ));
            }
            if decrement / 2.0 <= self.settings.centering_tolerance {
                return Centering::Centered;
            }

            let direction = self.basis.combine(&delta);
            if decrement < NEWTON_REGION {
                let trial = &self.y + &direction;
                if self.logdets(&trial).is_some() {
                    self.y = trial;
                    continue;
                }
            }
            match self.line_search(&slacks, &direction, decrement) {
                Some(step) => self.y += direction * c(step, 0.0),
                None => {
                    tracing::debug!(t = self.t, decrement, "line search failed");
                    return Centering::Halted(Termination::Stalled);
                }
            }
        }

        tracing::debug!(t = self.t, "centering step cap reached");
        Centering::Halted(Termination::IterationLimit)
    }

    /// Gradiente e Hessiana (negada) de f_t na base Hermitiana
    fn newton_system(&self, slacks: &[Slack]) -> (DVector<f64>, DMatrix<f64>) {
        let m = self.basis.len();
        let rhs = self.program.rhs();
        let mut gradient = DVector::from_iterator(
            m,
            self.basis.directions.iter().map(|b| self.t * b.trace_with(rhs)),
        );
        let mut hessian = DMatrix::<f64>::zeros(m, m);

        for slack in slacks {
            let w = &slack.inverse;
            let sandwiches: Vec<CMatrix> = self
                .basis
                .directions
                .iter()
                .map(|b| b.sandwich(w))
                .collect();
            for (k, b) in self.basis.directions.iter().enumerate() {
                gradient[k] -= b.trace_with(w);
                for l in k..m {
                    let v = self.basis.directions[l].trace_with(&sandwiches[k]);
                    hessian[(k, l)] += v;
                    if l != k {
                        hessian[(l, k)] += v;
                    }
                }
            }
        }
        (gradient, hessian)
    }

    /// Backtracking de Armijo mantendo todo C_i - Y ≻ 0.
    ///
    /// The objective change is accumulated term by term so that the large
    /// `t·tr(RY)` part never cancels against the log-determinants.
    fn line_search(&self, slacks: &[Slack], direction: &CMatrix, decrement: f64) -> Option<f64> {
        let ascent = self.t * linalg::trace_product(self.program.rhs(), direction).re;
        let mut step = 1.0;
        while step >= self.settings.min_step {
            let trial = &self.y + direction * c(step, 0.0);
            if let Some(logdets) = self.logdets(&trial) {
                let barrier_change: f64 = logdets
                    .iter()
                    .zip(slacks)
                    .map(|(new, old)| new - old.logdet)
                    .sum();
                let gain = step * ascent + barrier_change;
                if gain >= self.settings.armijo * step * decrement {
                    return Some(step);
                }
            }
            step *= self.settings.backtrack;
        }
        None
    }

    fn slacks(&self, y: &CMatrix) -> Option<Vec<Slack>> {
        self.program
            .costs()
            .iter()
            .map(|cost| {
                let chol = interior_factor(cost - y)?;
                Some(Slack {
                    logdet: logdet(&chol),
                    inverse: chol.inverse(),
                })
            })
            .collect()
    }

    fn logdets(&self, y: &CMatrix) -> Option<Vec<f64>> {
        self.program
            .costs()
            .iter()
            .map(|cost| interior_factor(cost - y).map(|chol| logdet(&chol)))
            .collect()
    }

    fn report(&self, termination: Termination) -> BackendReport {
        if matches!(
            termination,
            Termination::Interrupted | Termination::NumericalFailure(_)
        ) {
            return BackendReport::terminated(termination, self.iterations);
        }
        let Some(slacks) = self.slacks(&self.y) else {
            return BackendReport::terminated(
                Termination::NumericalFailure("final iterate is not interior".to_string()),
                self.iterations,
            );
        };

        let scale = c(1.0 / self.t, 0.0);
        let operators: Vec<CMatrix> = slacks
            .iter()
            .map(|s| linalg::hermitian_part(&s.inverse) * scale)
            .collect();
        let primal_objective = self.program.objective(&operators);
        let dual_objective = linalg::trace_product(self.program.rhs(), &self.y).re;
        let residual = self.program.completeness_residual(&operators);

        tracing::debug!(
            %termination,
            primal_objective,
            dual_objective,
            residual,
            iterations = self.iterations,
            "barrier finished"
        );
        BackendReport {
            termination,
            primal_objective,
            dual_objective,
            residual,
            iterations: self.iterations,
            operators,
        }
    }
}

/// Cholesky de uma folga, só se ela for definida positiva.
///
/// Complex Cholesky never fails outright: a negative pivot comes back as a
/// purely imaginary square root, so every pivot must be real and positive.
fn interior_factor(slack: CMatrix) -> Option<Cholesky<C64, Dyn>> {
    let chol = slack.cholesky()?;
    let interior = chol
        .l_dirty()
        .diagonal()
        .iter()
        .all(|z| z.re.is_finite() && z.re > 0.0 && z.im.abs() <= PIVOT_IMAGINARY * z.re);
    interior.then_some(chol)
}

/// log det a partir do fator
fn logdet(chol: &Cholesky<C64, Dyn>) -> f64 {
    2.0 * chol.l_dirty().diagonal().iter().map(|z| z.re.ln()).sum::<f64>()
}

/// Resolve H Δ = g com escala de Jacobi; Cholesky, com LU como reserva.
fn solve_scaled(hessian: DMatrix<f64>, gradient: &DVector<f64>) -> Option<DVector<f64>> {
    let m = gradient.len();
    let scale = DVector::from_iterator(
        m,
        hessian.diagonal().iter().map(|&h| {
            if h.is_finite() && h > 0.0 {
                1.0 / h.sqrt()
            } else {
                1.0
            }
        }),
    );
    let scaled = DMatrix::from_fn(m, m, |k, l| hessian[(k, l)] * scale[k] * scale[l]);
    let rhs = gradient.component_mul(&scale);

    let solution = match scaled.clone().cholesky() {
        Some(chol) => chol.solve(&rhs),
        None => scaled.lu().solve(&rhs)?,
    };
    let delta = solution.component_mul(&scale);
    delta.iter().all(|x| x.is_finite()).then_some(delta)
}
