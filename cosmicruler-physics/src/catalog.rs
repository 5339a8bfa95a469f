//! Galaxy catalogs and the count-to-redshift adapter behind cumulative count
//! scales.
//!
//! A count scale is labelled in "galaxies per unit area up to this redshift".
//! With the catalog sorted by redshift, the `n`th galaxy sits at the redshift
//! where the cumulative count reaches `n`; `catfactor` converts a count in
//! display units into a number of catalog rows.
use std::io;
use std::path::Path;

use cosmicruler_scales::scale::Scale;
use serde::{Deserialize, Serialize};

use crate::error::RulerPhysicsError;

/// Counts mapping to fewer catalog rows than this are too noisy to place
pub const MIN_RANK: usize = 10;

/// One row of a Flagship mock galaxy catalog. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagshipRecord {
    pub true_redshift_gal: f64,
    /// VIS AB magnitude
    pub euclid_vis: f64,
    /// log10 of the Hα flux (erg/s/cm²), model 1
    pub logf_halpha_model1_ext: f64,
    /// log10 of the Hα flux (erg/s/cm²), model 3
    pub logf_halpha_model3_ext: f64,
}

impl FlagshipRecord {
    /// Mean of the two Hα flux models, in erg/s/cm²
    pub fn avg_halpha_flux(&self) -> f64 {
        0.5 * (10f64.powf(self.logf_halpha_model1_ext) + 10f64.powf(self.logf_halpha_model3_ext))
    }
}

/// Reads every record of a CSV catalog with a header row
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<FlagshipRecord>, RulerPhysicsError> {
    let path = path.as_ref();
    let with_path = |source| RulerPhysicsError::Catalog {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(with_path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<FlagshipRecord>, _>>()
        .map_err(with_path)?;
    log::info!("Read {} galaxies from {}", records.len(), path.display());
    Ok(records)
}

pub fn read_csv_records(reader: impl io::Read) -> Result<Vec<FlagshipRecord>, RulerPhysicsError> {
    let mut reader = csv::Reader::from_reader(reader);
    let records = reader.deserialize().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Redshifts of a selected galaxy sample, sorted ascending
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    redshifts: Vec<f64>,
}

impl Catalog {
    /// Non-finite redshifts are dropped with a warning
    pub fn from_redshifts(redshifts: impl IntoIterator<Item = f64>) -> Self {
        let (mut redshifts, dropped): (Vec<f64>, Vec<f64>) =
            redshifts.into_iter().partition(|z| z.is_finite());
        if !dropped.is_empty() {
            log::warn!("Dropped {} galaxies without a finite redshift", dropped.len());
        }
        redshifts.sort_by(f64::total_cmp);
        Self { redshifts }
    }

    /// Keeps the records accepted by `select`
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a FlagshipRecord>,
        select: impl Fn(&FlagshipRecord) -> bool,
    ) -> Self {
        Self::from_redshifts(
            records
                .into_iter()
                .filter(|record| select(record))
                .map(|record| record.true_redshift_gal),
        )
    }

    pub fn len(&self) -> usize {
        self.redshifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redshifts.is_empty()
    }

    pub fn redshifts(&self) -> &[f64] {
        &self.redshifts
    }

    /// Redshift at which the cumulative count reaches `count`.
    ///
    /// The row index is `rank = trunc(count * catfactor)`; the result is the
    /// mean redshift of rows `rank - 1` and `rank + 1` (0-based).
    pub fn redshift_for_count(&self, count: f64, catfactor: f64) -> Result<f64, RulerPhysicsError> {
        let scaled = (count * catfactor).trunc();
        let len = self.redshifts.len();
        let out_of_range = || RulerPhysicsError::CountOutOfRange {
            count,
            rank: scaled as i64,
            min_rank: MIN_RANK,
            len,
        };
        if scaled.is_nan() || scaled < MIN_RANK as f64 {
            return Err(out_of_range());
        }
        let rank = scaled as usize;
        if rank > len || rank + 1 >= len {
            return Err(out_of_range());
        }
        Ok(0.5 * (self.redshifts[rank - 1] + self.redshifts[rank + 1]))
    }

    fn redshifts_for_counts(
        &self,
        counts: &[f64],
        catfactor: f64,
    ) -> Result<Vec<f64>, RulerPhysicsError> {
        counts
            .iter()
            .map(|&count| self.redshift_for_count(count, catfactor))
            .collect()
    }
}

/// Ticks and labels of a count scale, in display count units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountTicks {
    pub major: Vec<f64>,
    pub medium: Vec<f64>,
    pub minor: Vec<f64>,
    pub labels: Vec<(f64, String)>,
}

/// Builds a scale in redshift units from ticks and labels given as counts.
///
/// Every count must map into the catalog; the first one that does not aborts
/// the whole scale.
pub fn scale_counts_to_z(
    catalog: &Catalog,
    catfactor: f64,
    name: &str,
    title: &str,
    ticks: &CountTicks,
) -> Result<Scale, RulerPhysicsError> {
    let major = catalog.redshifts_for_counts(&ticks.major, catfactor)?;
    let medium = catalog.redshifts_for_counts(&ticks.medium, catfactor)?;
    let minor = catalog.redshifts_for_counts(&ticks.minor, catfactor)?;

    let mut scale = Scale::new(name).with_title(title);
    scale
        .add_major_ticks(major)
        .add_medium_ticks(medium)
        .add_minor_ticks(minor);
    for (count, text) in &ticks.labels {
        scale.add_label(catalog.redshift_for_count(*count, catfactor)?, text.as_str());
    }
    log::debug!(
        "Count scale {name:?} spans z in [{:?}, {:?}] over {} galaxies",
        catalog.redshifts().first(),
        catalog.redshifts().last(),
        catalog.len()
    );
    Ok(scale)
}
