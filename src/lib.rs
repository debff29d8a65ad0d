//! Genealogical pedigrees for genetic simulation.
//!
//! A [`Pedigree`] is a directed acyclic graph of individuals connected
//! by parent-of-child relationships across discrete generations.  This
//! crate models the pedigree itself (identifiers, parent indices,
//! generation times, sample flags), infers missing generation times
//! from topology, generates whole random-mating genealogies forward in
//! time, and converts to and from array, text, and exchange (`.fam`)
//! representations.
//!
//! ```
//! use ndarray::array;
//!
//! // A child of two founders, times inferred from topology.
//! let individual = array![1, 2, 3];
//! let parent_ids = array![[2, 3], [0, 0], [0, 0]];
//! let parents = pedigrees::parent_id_to_index(&individual, &parent_ids).unwrap();
//! let time = pedigrees::assign_times(&parents);
//! let pedigree = pedigrees::Pedigree::new(individual, parents, time, None, 2).unwrap();
//! assert_eq!(pedigree.proband_indices(), vec![0]);
//! ```

mod climb;
mod error;
mod fam;
mod format;
mod pedigree;
mod simulate;
mod tables;
mod translate;

pub use climb::assign_times;
pub use climb::proband_indices;
pub use climb::validate_times;
pub use error::PedigreeError;
pub use fam::append_fam_rows;
pub use fam::parse_fam;
pub use fam::FamRow;
pub use fam::Sex;
pub use format::ColumnLayout;
pub use format::TEXT_HEADER;
pub use pedigree::Pedigree;
pub use pedigree::SUPPORTED_PLOIDY;
pub use simulate::sim_pedigree;
pub use simulate::simulate_pedigree;
pub use simulate::SimulationParameters;
pub use tables::IndividualRow;
pub use tables::NodeRow;
pub use tables::RowSink;
pub use tables::TableBuffer;
pub use tables::NODE_IS_SAMPLE;
pub use translate::parent_id_to_index;
pub use translate::parent_index_to_id;
pub use translate::NULL_ID;
pub use translate::NULL_INDEX;
