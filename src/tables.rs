use serde::Deserialize;
use serde::Serialize;

/// Flag marking a node row as eligible for sampling.
pub const NODE_IS_SAMPLE: u32 = 1;

/// One individual: a pair of parent row indices plus optional metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualRow {
    /// Bitwise flags; no individual flags are currently defined.
    pub flags: u32,
    /// Row indices of the individual's parents,
    /// [`NULL_INDEX`](crate::NULL_INDEX) when a parent is unknown or
    /// outside the genealogy.
    pub parents: [i32; 2],
    /// Opaque metadata payload, passed through untouched.
    pub metadata: Option<Vec<u8>>,
}

/// One node: a single genome copy belonging to an individual.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    /// Bitwise flags; see [`NODE_IS_SAMPLE`].
    pub flags: u32,
    /// Birth time in generations before the present.
    pub time: f64,
    /// Row index of the owning population.
    pub population: i32,
    /// Row index of the owning individual.
    pub individual: i32,
}

/// An append-only, two-stream row destination.
///
/// The sink assigns row position as the de-facto index, so rows must be
/// appended in exactly the order their indices are assumed elsewhere.
pub trait RowSink {
    /// Append an individual row, returning its row index.
    fn append_individual(&mut self, row: IndividualRow) -> i32;
    /// Append a node row, returning its row index.
    fn append_node(&mut self, row: NodeRow) -> i32;
}

/// In-memory [`RowSink`] used by [`sim_pedigree`](crate::sim_pedigree)
/// and by tests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBuffer {
    individuals: Vec<IndividualRow>,
    nodes: Vec<NodeRow>,
    num_populations: usize,
    sequence_length: Option<f64>,
}

impl TableBuffer {
    /// An empty buffer.  `sequence_length` is carried as metadata only.
    pub fn new(sequence_length: Option<f64>) -> Self {
        Self {
            sequence_length,
            ..Default::default()
        }
    }

    /// Add a population row, returning its row index.
    pub fn add_population(&mut self) -> i32 {
        self.num_populations += 1;
        (self.num_populations - 1) as i32
    }

    /// The individual rows appended so far, in append order.
    pub fn individuals(&self) -> &[IndividualRow] {
        &self.individuals
    }

    /// The node rows appended so far, in append order.
    pub fn nodes(&self) -> &[NodeRow] {
        &self.nodes
    }

    /// Number of population rows.
    pub fn num_populations(&self) -> usize {
        self.num_populations
    }

    /// Sequence-length metadata, if any.
    pub fn sequence_length(&self) -> Option<f64> {
        self.sequence_length
    }
}

impl RowSink for TableBuffer {
    fn append_individual(&mut self, row: IndividualRow) -> i32 {
        self.individuals.push(row);
        (self.individuals.len() - 1) as i32
    }

    fn append_node(&mut self, row: NodeRow) -> i32 {
        self.nodes.push(row);
        (self.nodes.len() - 1) as i32
    }
}
