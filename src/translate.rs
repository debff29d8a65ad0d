use std::collections::HashMap;

use ndarray::Array1;
use ndarray::Array2;

use crate::PedigreeError;

/// Reserved identifier meaning "individual not present in this genealogy".
///
/// Only ever valid inside parent-reference fields.
pub const NULL_ID: i32 = 0;

/// Internal array index meaning "parent unknown/outside genealogy".
pub const NULL_INDEX: i32 = -1;

/// Translate a matrix of parent identifiers into internal array indices.
///
/// Identifier [`NULL_ID`] maps to [`NULL_INDEX`].
/// Any identifier in `individual` equal to [`NULL_ID`] is rejected,
/// as is any parent identifier that does not resolve to an individual.
///
/// ```
/// use ndarray::array;
/// let individual = array![1, 2, 3];
/// let parent_ids = array![[2, 3], [0, 0], [0, 0]];
/// let parents = pedigrees::parent_id_to_index(&individual, &parent_ids).unwrap();
/// assert_eq!(parents, array![[1, 2], [-1, -1], [-1, -1]]);
/// ```
pub fn parent_id_to_index(
    individual: &Array1<i32>,
    parent_ids: &Array2<i32>,
) -> Result<Array2<i32>, PedigreeError> {
    let mut id_to_index = HashMap::with_capacity(individual.len() + 1);
    for (index, &id) in individual.iter().enumerate() {
        if id == NULL_ID {
            return Err(PedigreeError::Validation(format!(
                "invalid ID: {NULL_ID} is reserved to denote an individual not in the genealogy"
            )));
        }
        id_to_index.insert(id, index as i32);
    }
    id_to_index.insert(NULL_ID, NULL_INDEX);

    let mut parents = Array2::zeros(parent_ids.raw_dim());
    for ((i, j), &parent_id) in parent_ids.indexed_iter() {
        match id_to_index.get(&parent_id) {
            Some(&index) => parents[[i, j]] = index,
            None => {
                return Err(PedigreeError::Lookup(format!(
                    "parent ID {parent_id} does not match any individual"
                )))
            }
        }
    }

    Ok(parents)
}

/// Translate a matrix of internal parent indices back into identifiers.
///
/// The exact inverse of [`parent_id_to_index`]:
/// [`NULL_INDEX`] maps back to [`NULL_ID`].
pub fn parent_index_to_id(individual: &Array1<i32>, parents: &Array2<i32>) -> Array2<i32> {
    let mut parent_ids = Array2::zeros(parents.raw_dim());
    for ((i, j), &parent) in parents.indexed_iter() {
        parent_ids[[i, j]] = if parent >= 0 {
            individual[parent as usize]
        } else {
            NULL_ID
        };
    }
    parent_ids
}
