use ndarray::Array1;
use ndarray::Array2;

use crate::PedigreeError;

/// Indices of individuals that never appear as a parent of any other
/// individual, sorted ascending.
pub fn proband_indices(parents: &Array2<i32>) -> Vec<usize> {
    let num_individuals = parents.nrows();
    let mut referenced = vec![false; num_individuals];
    for &parent in parents.iter() {
        if parent >= 0 {
            referenced[parent as usize] = true;
        }
    }
    (0..num_individuals).filter(|&i| !referenced[i]).collect()
}

/// Assign a generation time to every individual from topology alone.
///
/// A wavefront climb starting at the probands (`t = 0`): each individual
/// in the frontier has its time raised to `max(current, t)`, then the
/// frontier is replaced by the set of present parents and `t` is
/// incremented.  An individual reachable along several paths of unequal
/// length receives the time of its longest path, so the resulting times
/// satisfy `time[child] < time[parent]` on every present edge globally.
///
/// Termination requires the parent relationship to be acyclic; cycles
/// must be rejected by construction, not here.
pub fn assign_times(parents: &Array2<i32>) -> Array1<f64> {
    let mut time = Array1::<f64>::zeros(parents.nrows());
    let mut frontier = proband_indices(parents);

    let mut t = 0.0;
    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for &climber in &frontier {
            if time[climber] < t {
                time[climber] = t;
            }
            for &parent in parents.row(climber) {
                if parent >= 0 {
                    next_frontier.push(parent as usize);
                }
            }
        }
        next_frontier.sort_unstable();
        next_frontier.dedup();
        frontier = next_frontier;
        t += 1.0;
    }

    time
}

/// Check that every individual is strictly younger than each of its
/// present parents.
///
/// The first violation found is reported with the offending child and
/// parent identifiers; no repair is attempted.
pub fn validate_times(
    individual: &Array1<i32>,
    parents: &Array2<i32>,
    time: &Array1<f64>,
) -> Result<(), PedigreeError> {
    for (i, row) in parents.rows().into_iter().enumerate() {
        for &parent in row {
            if parent >= 0 && time[i] >= time[parent as usize] {
                return Err(PedigreeError::Validation(format!(
                    "individual {} has time >= its parent {}",
                    individual[i],
                    individual[parent as usize]
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn probands_are_the_unreferenced_indices() {
        // 0 and 1 are children of 2 and 3; 4 is isolated.
        let parents = array![[2, 3], [2, 3], [-1, -1], [-1, -1], [-1, -1]];
        assert_eq!(proband_indices(&parents), vec![0, 1, 4]);
    }

    #[test]
    fn all_probands_when_no_edges() {
        let parents = array![[-1, -1], [-1, -1]];
        assert_eq!(proband_indices(&parents), vec![0, 1]);
    }

    #[test]
    fn validate_reports_offending_pair() {
        let individual = array![7, 8];
        let parents = array![[1, -1], [-1, -1]];
        let time = array![1.0, 1.0];
        let err = validate_times(&individual, &parents, &time).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains('7'));
        assert!(message.contains('8'));
    }
}
