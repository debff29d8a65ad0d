use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;

use ndarray::Array1;
use ndarray::Array2;

use crate::climb;
use crate::pedigree::Pedigree;
use crate::pedigree::SUPPORTED_PLOIDY;
use crate::translate;
use crate::PedigreeError;

/// Header line written by [`Pedigree::write_text`] and skipped by
/// [`Pedigree::from_text_reader`].
pub const TEXT_HEADER: &str = "ind\tfather\tmother\ttime";

/// Column positions of the single-matrix pedigree representation.
///
/// Columns must be contiguous and ascending; anything else is rejected
/// once, at load or save time.
///
/// ```
/// let layout = pedigrees::ColumnLayout::default();
/// assert_eq!(layout.individual, 0);
/// assert_eq!(layout.parents, [1, 2]);
/// assert_eq!(layout.time, 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnLayout {
    /// Identifier column.
    pub individual: usize,
    /// The two parent columns.
    pub parents: [usize; 2],
    /// Time column.
    pub time: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            individual: 0,
            parents: [1, 2],
            time: 3,
        }
    }
}

impl ColumnLayout {
    /// Check that the columns are contiguous and ascending.
    pub fn validate(&self) -> Result<(), PedigreeError> {
        let columns = [self.individual, self.parents[0], self.parents[1], self.time];
        for pair in columns.windows(2) {
            if pair[1] != pair[0] + 1 {
                return Err(PedigreeError::Format(format!(
                    "non-sequential columns in pedigree layout: {columns:?}"
                )));
            }
        }
        Ok(())
    }

    /// Number of columns an array using this layout must have.
    pub fn num_columns(&self) -> usize {
        self.time + 1
    }
}

impl Pedigree {
    /// Represent the pedigree as a single numeric matrix in the default
    /// [`ColumnLayout`]: identifier, both parent indices, time.
    pub fn build_array(&self) -> Array2<f64> {
        let layout = ColumnLayout::default();
        let mut array = Array2::<f64>::zeros((self.num_individuals(), layout.num_columns()));
        for i in 0..self.num_individuals() {
            array[[i, layout.individual]] = self.individual()[i] as f64;
            array[[i, layout.parents[0]]] = self.parents()[[i, 0]] as f64;
            array[[i, layout.parents[1]]] = self.parents()[[i, 1]] as f64;
            array[[i, layout.time]] = self.time()[i];
        }
        array
    }

    /// Write the pedigree as a binary array file.
    ///
    /// The payload is the [`Pedigree::build_array`] matrix; reading it
    /// back with [`Pedigree::from_array_reader`] and the default layout
    /// reproduces the identifier, parent, and time vectors exactly.
    pub fn write_array<W: Write>(&self, writer: W) -> Result<(), PedigreeError> {
        bincode::serialize_into(writer, &self.build_array())?;
        Ok(())
    }

    /// Read a pedigree from a binary array file.
    ///
    /// `layout` describes the column positions in the stored matrix;
    /// pass `ColumnLayout::default()` for files written by
    /// [`Pedigree::write_array`].
    pub fn from_array_reader<R: Read>(
        reader: R,
        layout: ColumnLayout,
    ) -> Result<Self, PedigreeError> {
        layout.validate()?;
        let array: Array2<f64> = bincode::deserialize_from(reader)?;
        if array.ncols() < layout.num_columns() {
            return Err(PedigreeError::Format(format!(
                "pedigree array has {} columns but the layout requires {}",
                array.ncols(),
                layout.num_columns()
            )));
        }

        let individual = array.column(layout.individual).mapv(|value| value as i32);
        let mut parents = Array2::<i32>::zeros((array.nrows(), 2));
        for (slot, &column) in layout.parents.iter().enumerate() {
            parents
                .column_mut(slot)
                .assign(&array.column(column).mapv(|value| value as i32));
        }
        let time = array.column(layout.time).to_owned();

        Pedigree::new(individual, parents, time, None, SUPPORTED_PLOIDY)
    }

    /// Write the pedigree as tab-separated text.
    ///
    /// One header line, then one row per individual.  The parent columns
    /// hold *identifiers*, not internal indices.
    pub fn write_text<W: Write>(&self, mut writer: W) -> Result<(), PedigreeError> {
        let parent_ids = translate::parent_index_to_id(self.individual(), self.parents());
        writeln!(writer, "{TEXT_HEADER}")?;
        for i in 0..self.num_individuals() {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                self.individual()[i],
                parent_ids[[i, 0]],
                parent_ids[[i, 1]],
                self.time()[i]
            )?;
        }
        Ok(())
    }

    /// Read a pedigree from tab-separated text.
    ///
    /// The first line is skipped as a header.  Parent columns are
    /// identifiers and are translated to internal indices.  When
    /// `time_col` is `None`, times are inferred from topology by the
    /// wavefront climb; otherwise they are read from that column and
    /// validated.  Assigning individual sexes via `sex_col` is not
    /// supported.
    pub fn from_text_reader<R: Read>(
        reader: R,
        time_col: Option<usize>,
        sex_col: Option<usize>,
    ) -> Result<Self, PedigreeError> {
        if sex_col.is_some() {
            return Err(PedigreeError::Configuration(
                "specifying sex of individuals is not supported".to_string(),
            ));
        }
        let layout = ColumnLayout::default();

        let mut individual = Vec::new();
        let mut parent_ids = Vec::new();
        let mut time = Vec::new();

        for (line_number, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line_number == 0 || line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            individual.push(parse_field::<i32>(&fields, layout.individual, line_number)?);
            parent_ids.push(parse_field::<i32>(&fields, layout.parents[0], line_number)?);
            parent_ids.push(parse_field::<i32>(&fields, layout.parents[1], line_number)?);
            if let Some(column) = time_col {
                time.push(parse_field::<f64>(&fields, column, line_number)?);
            }
        }

        let num_individuals = individual.len();
        let individual = Array1::from(individual);
        let parent_ids = Array2::from_shape_vec((num_individuals, 2), parent_ids)
            .expect("row-major parent IDs");
        let parents = translate::parent_id_to_index(&individual, &parent_ids)?;

        let time = match time_col {
            Some(_) => Array1::from(time),
            None => climb::assign_times(&parents),
        };

        Pedigree::new(individual, parents, time, None, SUPPORTED_PLOIDY)
    }
}

fn parse_field<T: std::str::FromStr>(
    fields: &[&str],
    column: usize,
    line_number: usize,
) -> Result<T, PedigreeError> {
    let field = fields.get(column).ok_or_else(|| {
        PedigreeError::Format(format!(
            "line {}: expected at least {} columns, found {}",
            line_number + 1,
            column + 1,
            fields.len()
        ))
    })?;
    field.parse().map_err(|_| {
        PedigreeError::Format(format!(
            "line {}: cannot parse column {} from {field:?}",
            line_number + 1,
            column
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        assert!(ColumnLayout::default().validate().is_ok());
    }

    #[test]
    fn shifted_layout_is_valid() {
        let layout = ColumnLayout {
            individual: 1,
            parents: [2, 3],
            time: 4,
        };
        assert!(layout.validate().is_ok());
        assert_eq!(layout.num_columns(), 5);
    }

    #[test]
    fn gapped_layout_is_rejected() {
        let layout = ColumnLayout {
            individual: 0,
            parents: [2, 3],
            time: 4,
        };
        assert!(matches!(layout.validate(), Err(PedigreeError::Format(_))));
    }

    #[test]
    fn descending_layout_is_rejected() {
        let layout = ColumnLayout {
            individual: 3,
            parents: [2, 1],
            time: 0,
        };
        assert!(matches!(layout.validate(), Err(PedigreeError::Format(_))));
    }
}
