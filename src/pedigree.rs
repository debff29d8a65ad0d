use ndarray::Array1;
use ndarray::Array2;
use rand::Rng;

use crate::climb;
use crate::PedigreeError;

/// The only ploidy currently supported.
pub const SUPPORTED_PLOIDY: u32 = 2;

/// A genealogical pedigree: individuals connected by parent-of-child
/// relationships across discrete generations.
///
/// Internally, individuals live at fixed array positions.  `individual`
/// holds each position's externally-visible identifier (strictly
/// positive, unique), `parents` holds one row of internal indices per
/// individual (`-1` for an unknown parent) and `time` holds generations
/// before the present.  Every individual is strictly younger than each
/// of its present parents.
///
/// A pedigree is immutable once constructed, except for
/// [`set_samples`](Pedigree::set_samples) which recomputes the
/// sample-flag vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Pedigree {
    individual: Array1<i32>,
    parents: Array2<i32>,
    time: Array1<f64>,
    is_sample: Option<Array1<u32>>,
    ploidy: u32,
}

impl Pedigree {
    /// Build a pedigree from raw arrays, validating every invariant.
    ///
    /// # Errors
    ///
    /// * [`PedigreeError::Configuration`] if `ploidy != 2`.
    /// * [`PedigreeError::Validation`] if the parent matrix column count
    ///   disagrees with `ploidy`, if any array length disagrees with the
    ///   number of individuals, if any identifier is `<= 0` or repeated,
    ///   if any parent index is out of range, or if the supplied times
    ///   violate the child-younger-than-parent ordering.
    pub fn new(
        individual: Array1<i32>,
        parents: Array2<i32>,
        time: Array1<f64>,
        is_sample: Option<Array1<u32>>,
        ploidy: u32,
    ) -> Result<Self, PedigreeError> {
        if ploidy != SUPPORTED_PLOIDY {
            return Err(PedigreeError::Configuration(format!(
                "ploidy {ploidy} not currently supported; only diploid pedigrees may be built"
            )));
        }
        if parents.ncols() != ploidy as usize {
            return Err(PedigreeError::Validation(format!(
                "ploidy {} conflicts with number of parents {}",
                ploidy,
                parents.ncols()
            )));
        }
        let num_individuals = individual.len();
        if parents.nrows() != num_individuals || time.len() != num_individuals {
            return Err(PedigreeError::Validation(format!(
                "array length mismatch: {} individuals, {} parent rows, {} times",
                num_individuals,
                parents.nrows(),
                time.len()
            )));
        }
        if let Some(flags) = &is_sample {
            if flags.len() != num_individuals {
                return Err(PedigreeError::Validation(format!(
                    "array length mismatch: {} individuals, {} sample flags",
                    num_individuals,
                    flags.len()
                )));
            }
        }

        let mut seen = std::collections::HashSet::with_capacity(num_individuals);
        for &id in &individual {
            if id <= 0 {
                return Err(PedigreeError::Validation(format!(
                    "individual IDs must be > 0, got {id}"
                )));
            }
            if !seen.insert(id) {
                return Err(PedigreeError::Validation(format!(
                    "duplicate individual ID {id}"
                )));
            }
        }

        for &parent in parents.iter() {
            if parent < -1 || parent >= num_individuals as i32 {
                return Err(PedigreeError::Validation(format!(
                    "parent index {parent} out of range for {num_individuals} individuals"
                )));
            }
        }

        climb::validate_times(&individual, &parents, &time)?;

        Ok(Self {
            individual,
            parents,
            time,
            is_sample,
            ploidy,
        })
    }

    /// Number of individuals in the pedigree.
    pub fn num_individuals(&self) -> usize {
        self.individual.len()
    }

    /// Number of individuals currently flagged as samples.
    pub fn num_samples(&self) -> usize {
        match &self.is_sample {
            Some(flags) => flags.iter().filter(|&&flag| flag == 1).count(),
            None => 0,
        }
    }

    /// Individual identifiers, one per array position.
    pub fn individual(&self) -> &Array1<i32> {
        &self.individual
    }

    /// Parent-index matrix, one row of internal indices per individual.
    pub fn parents(&self) -> &Array2<i32> {
        &self.parents
    }

    /// Time of each individual, in generations before the present.
    pub fn time(&self) -> &Array1<f64> {
        &self.time
    }

    /// Sample flags, if samples have been assigned.
    pub fn is_sample(&self) -> Option<&Array1<u32>> {
        self.is_sample.as_ref()
    }

    /// The pedigree's ploidy (always 2).
    pub fn ploidy(&self) -> u32 {
        self.ploidy
    }

    /// Indices of individuals never referenced as a parent, sorted
    /// ascending.  These are the structurally youngest individuals and
    /// the pool that [`set_samples`](Pedigree::set_samples) draws from.
    pub fn proband_indices(&self) -> Vec<usize> {
        climb::proband_indices(&self.parents)
    }

    /// Overwrite the sample-flag vector.
    ///
    /// Exactly one of `num_samples` or `sample_ids` must be supplied.
    /// Only probands are eligible.  A count draws uniformly at random
    /// without replacement from the probands; an identifier list must
    /// resolve to exactly as many distinct probands as it names.
    ///
    /// # Errors
    ///
    /// * [`PedigreeError::Configuration`] if both or neither selector is
    ///   supplied, or if `num_samples` exceeds the number of probands.
    /// * [`PedigreeError::Lookup`] if `sample_ids` contains a duplicate,
    ///   an identifier absent from the pedigree, or a non-proband.
    pub fn set_samples<R: Rng>(
        &mut self,
        rng: &mut R,
        num_samples: Option<usize>,
        sample_ids: Option<&[i32]>,
    ) -> Result<(), PedigreeError> {
        let probands = self.proband_indices();
        let mut flags = Array1::<u32>::zeros(self.num_individuals());

        match (num_samples, sample_ids) {
            (None, None) => {
                return Err(PedigreeError::Configuration(
                    "must specify one of num_samples or sample_ids".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(PedigreeError::Configuration(
                    "cannot specify both num_samples and sample_ids".to_string(),
                ))
            }
            (Some(count), None) => {
                if count > probands.len() {
                    return Err(PedigreeError::Configuration(format!(
                        "cannot specify more samples ({count}) than there are probands in the pedigree ({})",
                        probands.len()
                    )));
                }
                for chosen in rand::seq::index::sample(rng, probands.len(), count) {
                    flags[probands[chosen]] = 1;
                }
            }
            (None, Some(ids)) => {
                let wanted: std::collections::HashSet<i32> = ids.iter().copied().collect();
                let chosen: Vec<usize> = probands
                    .iter()
                    .copied()
                    .filter(|&index| wanted.contains(&self.individual[index]))
                    .collect();
                if chosen.len() != ids.len() {
                    return Err(PedigreeError::Lookup(format!(
                        "sample size mismatch: requested {} IDs but {} resolved to probands \
                         (duplicate IDs, unknown IDs, or non-probands)",
                        ids.len(),
                        chosen.len()
                    )));
                }
                for index in chosen {
                    flags[index] = 1;
                }
            }
        }

        self.is_sample = Some(flags);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn trio() -> Pedigree {
        // Child (index 0) of two founders.
        Pedigree::new(
            array![1, 2, 3],
            array![[1, 2], [-1, -1], [-1, -1]],
            array![0.0, 1.0, 1.0],
            None,
            2,
        )
        .unwrap()
    }

    #[test]
    fn trio_probands() {
        assert_eq!(trio().proband_indices(), vec![0]);
    }

    #[test]
    fn rejects_unsupported_ploidy() {
        let err = Pedigree::new(
            array![1],
            array![[-1, -1, -1]],
            array![0.0],
            None,
            3,
        )
        .unwrap_err();
        assert!(matches!(err, PedigreeError::Configuration(_)));
    }

    #[test]
    fn rejects_parent_column_mismatch() {
        let err = Pedigree::new(array![1], array![[-1, -1, -1]], array![0.0], None, 2).unwrap_err();
        assert!(matches!(err, PedigreeError::Validation(_)));
    }

    #[test]
    fn rejects_nonpositive_ids() {
        let err = Pedigree::new(
            array![1, -2],
            array![[-1, -1], [-1, -1]],
            array![0.0, 0.0],
            None,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, PedigreeError::Validation(_)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Pedigree::new(
            array![5, 5],
            array![[-1, -1], [-1, -1]],
            array![0.0, 0.0],
            None,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, PedigreeError::Validation(_)));
    }

    #[test]
    fn rejects_time_order_violation() {
        let err = Pedigree::new(
            array![1, 2, 3],
            array![[1, 2], [-1, -1], [-1, -1]],
            array![1.0, 1.0, 2.0],
            None,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, PedigreeError::Validation(_)));
    }

    #[test]
    fn rejects_out_of_range_parent_index() {
        let err = Pedigree::new(
            array![1, 2],
            array![[5, -1], [-1, -1]],
            array![0.0, 1.0],
            None,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, PedigreeError::Validation(_)));
    }
}
