use std::collections::HashMap;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use serde::Serialize;

use crate::tables::IndividualRow;
use crate::tables::RowSink;
use crate::translate::NULL_INDEX;
use crate::PedigreeError;

/// Sentinel string in a parent field meaning "no parent".
const NO_PARENT: &str = "0";

/// Number of columns in an exchange-format row.
const NUM_COLUMNS: usize = 5;

/// Sex code of an exchange-format row.
///
/// ```
/// use pedigrees::Sex;
/// assert_eq!(Sex::try_from(2).unwrap(), Sex::Female);
/// assert!(Sex::try_from(3).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sex {
    /// Code 0.
    Unknown,
    /// Code 1.
    Male,
    /// Code 2.
    Female,
}

impl Sex {
    /// The numeric code of this sex.
    pub fn code(&self) -> u8 {
        match self {
            Sex::Unknown => 0,
            Sex::Male => 1,
            Sex::Female => 2,
        }
    }
}

impl TryFrom<i64> for Sex {
    type Error = PedigreeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Sex::Unknown),
            1 => Ok(Sex::Male),
            2 => Ok(Sex::Female),
            other => Err(PedigreeError::Validation(format!(
                "sex must be one of 0 (unknown), 1 (male), 2 (female), got {other}"
            ))),
        }
    }
}

/// One resolved exchange-format individual.
///
/// `parents` holds the row indices of the father and mother within the
/// parsed table ([`NULL_INDEX`] for "no parent"); the raw family and
/// individual identifiers and the sex are carried as descriptive data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FamRow {
    /// Family identifier, unique only together with `individual`.
    pub family: String,
    /// Individual identifier, unique within its family.
    pub individual: String,
    /// Row indices of the father and mother.
    pub parents: [i32; 2],
    /// Sex code.
    pub sex: Sex,
}

#[derive(Serialize)]
struct FamMetadata<'a> {
    plink_fid: &'a str,
    plink_iid: &'a str,
    sex: u8,
}

/// Parse an exchange-format (`.fam`) pedigree table.
///
/// Five whitespace-delimited columns per row: family id, individual id,
/// paternal id, maternal id, sex code.  The first line is skipped as a
/// header.  Individuals are keyed by family id plus individual id, since
/// individual ids are only unique within a family.  Input row order is
/// preserved in the output.
///
/// # Errors
///
/// * [`PedigreeError::Validation`] on a ragged row or an unrecognized
///   sex code.
/// * [`PedigreeError::ReferenceIntegrity`] on a duplicate
///   family+individual key.
/// * [`PedigreeError::Lookup`] on a parent reference that resolves to no
///   row in the table.
pub fn parse_fam<R: Read>(reader: R) -> Result<Vec<FamRow>, PedigreeError> {
    let mut records: Vec<[String; NUM_COLUMNS]> = Vec::new();
    for (line_number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line_number == 0 || line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != NUM_COLUMNS {
            return Err(PedigreeError::Validation(format!(
                "line {}: expected {} columns, found {}",
                line_number + 1,
                NUM_COLUMNS,
                fields.len()
            )));
        }
        records.push([
            fields[0].to_string(),
            fields[1].to_string(),
            fields[2].to_string(),
            fields[3].to_string(),
            fields[4].to_string(),
        ]);
    }

    // The space between family and individual id keeps keys unique.
    let mut id_map: HashMap<String, i32> = HashMap::with_capacity(records.len());
    for (row, [family, individual, _, _, _]) in records.iter().enumerate() {
        let key = format!("{family} {individual}");
        if id_map.insert(key.clone(), row as i32).is_some() {
            return Err(PedigreeError::ReferenceIntegrity(format!(
                "duplicate family+individual ID: {key:?}"
            )));
        }
    }

    let mut rows = Vec::with_capacity(records.len());
    for [family, individual, father, mother, sex] in records {
        let sex = sex
            .parse::<i64>()
            .map_err(|_| {
                PedigreeError::Validation(format!("cannot parse sex code from {sex:?}"))
            })
            .and_then(Sex::try_from)?;
        let father = resolve_parent(&id_map, &family, &father)?;
        let mother = resolve_parent(&id_map, &family, &mother)?;
        rows.push(FamRow {
            family,
            individual,
            parents: [father, mother],
            sex,
        });
    }

    Ok(rows)
}

fn resolve_parent(
    id_map: &HashMap<String, i32>,
    family: &str,
    parent: &str,
) -> Result<i32, PedigreeError> {
    if parent == NO_PARENT {
        return Ok(NULL_INDEX);
    }
    let key = format!("{family} {parent}");
    id_map.get(&key).copied().ok_or_else(|| {
        PedigreeError::Lookup(format!(
            "parent {parent:?} does not match any individual in family {family:?}"
        ))
    })
}

/// Append parsed exchange-format rows to a sink, in input order.
///
/// Each emitted individual row carries the resolved parent pair and a
/// JSON metadata payload `{plink_fid, plink_iid, sex}`.
pub fn append_fam_rows<S: RowSink>(rows: &[FamRow], sink: &mut S) -> Result<(), PedigreeError> {
    for row in rows {
        let metadata = serde_json::to_vec(&FamMetadata {
            plink_fid: &row.family,
            plink_iid: &row.individual,
            sex: row.sex.code(),
        })?;
        sink.append_individual(IndividualRow {
            flags: 0,
            parents: row.parents,
            metadata: Some(metadata),
        });
    }
    Ok(())
}
