//! Genetic algorithm execution loop.
//!
//! [`GeneticSolver`] runs generational replacement: every generation is
//! bred entirely from the previous one by tournament selection,
//! single-point crossover and random-reset mutation. No individual is
//! carried over unchanged, so the best board of a generation can be lost if
//! tournaments never pick it.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{info, trace};

use super::calibration::MutationRateModel;
use super::config::GeneticConfig;
use super::operators::{
    random_placement, random_reset_mutation, single_point_crossover, tournament,
};
use super::types::Candidate;
use crate::board::{max_fitness, Placement};
use crate::error::{Error, Result};
use crate::random::rng_from_seed;
use crate::report::{Progress, SolverReport};
use crate::solver::NQueensSolver;

/// Genetic-algorithm solver over permutation-form boards.
///
/// # Usage
///
/// ```
/// use u_nqueens::genetic::{FixedMutationRate, GeneticConfig, GeneticSolver};
/// use u_nqueens::NQueensSolver;
///
/// let config = GeneticConfig::for_board(5, 0.9).with_seed(42);
/// let mut solver = GeneticSolver::with_config(5, config).unwrap();
/// if solver.solve() {
///     assert_eq!(solver.best().unwrap().fitness(), 10);
/// }
///
/// // Or let a calibration model choose the mutation rate.
/// let model = FixedMutationRate::new(0.9).unwrap();
/// let solver = GeneticSolver::new(5, &model).unwrap();
/// assert_eq!(solver.config().mutation_rate, 0.9);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticSolver<R = StdRng> {
    n: usize,
    config: GeneticConfig,
    rng: R,
    population: Vec<Candidate>,
    best: Option<Candidate>,
    generations: usize,
    fitness_history: Vec<usize>,
}

impl GeneticSolver<StdRng> {
    /// Creates a solver with the standard parameters for `n`, asking `model`
    /// once for the mutation rate.
    ///
    /// A calibration failure is returned as [`Error::Calibration`]; no
    /// fallback rate is substituted.
    pub fn new<M: MutationRateModel + ?Sized>(n: usize, model: &M) -> Result<Self> {
        Self::with_model(n, model, None)
    }

    /// Like [`new`](Self::new), with an optional seed for reproducibility.
    pub fn with_model<M: MutationRateModel + ?Sized>(
        n: usize,
        model: &M,
        seed: Option<u64>,
    ) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidBoardSize(n));
        }
        let rate = model.best_mutation_rate(n)?;
        let config = GeneticConfig {
            seed,
            ..GeneticConfig::for_board(n, rate)
        };
        Self::with_config(n, config)
    }

    /// Creates a solver from an explicit configuration, seeded from
    /// [`GeneticConfig::seed`].
    pub fn with_config(n: usize, config: GeneticConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(n, config, rng)
    }
}

impl<R: Rng> GeneticSolver<R> {
    /// Strategy identifier.
    pub const NAME: &'static str = "genetic";

    /// Creates a solver drawing from `rng`. The config seed is ignored.
    pub fn with_rng(n: usize, config: GeneticConfig, rng: R) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidBoardSize(n));
        }
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self {
            n,
            population: Vec::with_capacity(config.population_size),
            config,
            rng,
            best: None,
            generations: 0,
            fitness_history: Vec::new(),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// The current population.
    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// The reported candidate: the first perfect one, or the fittest of the
    /// final generation.
    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Generations evolved by the last run (1-based index of the solving
    /// generation on success).
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Best fitness of each generation, in order.
    ///
    /// Without elitism this sequence can go down as well as up.
    pub fn fitness_history(&self) -> &[usize] {
        &self.fitness_history
    }

    fn initial_population(&mut self) -> Vec<Candidate> {
        (0..self.config.population_size)
            .map(|_| Candidate::new(random_placement(self.n, &mut self.rng)))
            .collect()
    }

    /// Breeds a full replacement generation from the current one.
    fn breed(&mut self) -> Vec<Candidate> {
        let population = &self.population;
        let rng = &mut self.rng;
        let k = self.config.tournament_size;

        (0..self.config.population_size)
            .map(|_| {
                let parent1 = tournament(population, k, rng);
                let parent2 = tournament(population, k, rng);
                let mut genes = single_point_crossover(
                    parent1.placement().columns(),
                    parent2.placement().columns(),
                    rng,
                );
                random_reset_mutation(&mut genes, self.config.mutation_rate, rng);
                Candidate::new(Placement::new(genes))
            })
            .collect()
    }
}

impl<R: Rng> NQueensSolver for GeneticSolver<R> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn board_size(&self) -> usize {
        self.n
    }

    fn solve(&mut self) -> bool {
        info!(
            event = "solve_start",
            strategy = Self::NAME,
            n = self.n,
            population_size = self.config.population_size,
            max_generations = self.config.max_generations,
            mutation_rate = self.config.mutation_rate,
        );

        let target = max_fitness(self.n);
        self.best = None;
        self.generations = 0;
        self.fitness_history.clear();
        self.population = self.initial_population();

        for generation in 1..=self.config.max_generations {
            self.population = self.breed();

            let leader = fittest(&self.population);
            self.fitness_history.push(leader.fitness());
            trace!(
                event = "generation",
                generation,
                best_fitness = leader.fitness(),
            );

            if leader.fitness() == target {
                self.best = Some(leader.clone());
                self.generations = generation;
                info!(
                    event = "solve_end",
                    strategy = Self::NAME,
                    solved = true,
                    generations = generation,
                );
                return true;
            }
        }

        self.best = Some(fittest(&self.population).clone());
        self.generations = self.config.max_generations;
        info!(
            event = "solve_end",
            strategy = Self::NAME,
            solved = false,
            generations = self.generations,
            best_fitness = self.best.as_ref().map(Candidate::fitness),
            target_fitness = target,
        );
        false
    }

    fn report(&self) -> SolverReport {
        SolverReport::from_placement(
            Self::NAME,
            self.n,
            self.best.as_ref().map(Candidate::placement),
            Progress::Generations {
                taken: self.generations,
            },
        )
    }
}

/// The first candidate with the highest fitness.
fn fittest(population: &[Candidate]) -> &Candidate {
    population
        .iter()
        .reduce(|best, c| if c.fitness() > best.fitness() { c } else { best })
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================
