use rand::distributions::Distribution;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::Deserialize;
use serde::Serialize;

use crate::tables::IndividualRow;
use crate::tables::NodeRow;
use crate::tables::RowSink;
use crate::tables::TableBuffer;
use crate::tables::NODE_IS_SAMPLE;
use crate::translate::NULL_INDEX;
use crate::PedigreeError;

/// Parameters of a forward-time pedigree simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Number of generations before the present at which the founder
    /// generation is born.  The run emits `end_time + 1` generations,
    /// from time `end_time` down to time `0`.
    pub end_time: u32,
    /// Seed for the run's random stream.  `None` seeds from entropy.
    pub random_seed: Option<u64>,
    /// Sequence-length metadata, passed through untouched.
    pub sequence_length: Option<f64>,
}

impl SimulationParameters {
    /// Reject parameter combinations the simulator cannot run with.
    pub fn validate(&self) -> Result<(), PedigreeError> {
        if self.population_size == 0 {
            return Err(PedigreeError::Configuration(
                "population_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a complete random-mating genealogy, appending rows to `sink`.
///
/// Generations are produced oldest first, because each generation's
/// individuals reference the previous generation's rows as parents and
/// the sink is append-only.  Within a generation, each new individual
/// draws both parents independently and *with* replacement from the
/// previous generation, so selfing occurs with probability `1/N` per
/// draw, matching discrete Wright-Fisher dynamics.  Founders (time
/// `end_time`) have both parent slots set to [`NULL_INDEX`]; only the
/// final generation's node rows carry [`NODE_IS_SAMPLE`].  Two node rows
/// are emitted per individual, one per genome copy.
///
/// The random stream is consumed in a fixed order (both draws for
/// individual `i` precede those for `i + 1`), so a given `rng` state
/// yields a reproducible genealogy.
pub fn simulate_pedigree<R: Rng, S: RowSink>(
    parameters: &SimulationParameters,
    rng: &mut R,
    sink: &mut S,
) -> Result<(), PedigreeError> {
    parameters.validate()?;
    let population_size = parameters.population_size;

    // Founder draws come from a single-entry null pool, so every
    // generation is produced by the same bulk path.
    let mut population: Vec<i32> = vec![NULL_INDEX];

    for time in (0..=parameters.end_time).rev() {
        let pool = Uniform::from(0..population.len());
        let parent_draws: Vec<[i32; 2]> = (0..population_size)
            .map(|_| {
                [
                    population[pool.sample(rng)],
                    population[pool.sample(rng)],
                ]
            })
            .collect();

        // The sink assigns row position as the index, so the progeny
        // indices are whatever the appends return.  The sink may hold
        // rows from before this run.
        let progeny: Vec<i32> = parent_draws
            .into_iter()
            .map(|parents| {
                sink.append_individual(IndividualRow {
                    flags: 0,
                    parents,
                    metadata: None,
                })
            })
            .collect();

        let node_flags = if time > 0 { 0 } else { NODE_IS_SAMPLE };
        for &individual in &progeny {
            for _ in 0..2 {
                sink.append_node(NodeRow {
                    flags: node_flags,
                    time: time as f64,
                    population: 0,
                    individual,
                });
            }
        }

        population = progeny;
    }

    Ok(())
}

/// Run [`simulate_pedigree`] into a fresh [`TableBuffer`] with a single
/// population row, seeding the random stream from
/// [`SimulationParameters::random_seed`].
pub fn sim_pedigree(parameters: &SimulationParameters) -> Result<TableBuffer, PedigreeError> {
    parameters.validate()?;
    let mut rng = match parameters.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut tables = TableBuffer::new(parameters.sequence_length);
    tables.add_population();
    simulate_pedigree(parameters, &mut rng, &mut tables)?;
    Ok(tables)
}
