//! The scales printed on the cosmic ruler, built in redshift units.
//!
//! Derived quantities (lookback time, distance modulus, ...) are placed by
//! solving for the redshift at which they take each tick value. Ticks that
//! cannot be solved for, like a zero distance, are skipped with a warning and
//! added back by hand where they matter.
use cosmicruler_physics::catalog::{scale_counts_to_z, Catalog, CountTicks, FlagshipRecord};
use cosmicruler_physics::cosmology::FlatLambdaCdm;
use cosmicruler_physics::solver::{find_maximum, find_value_for_target, SearchBounds};
use cosmicruler_scales::scale::Scale;
use cosmicruler_scales::ticks::{subdivide, TickPolicy};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::RulerAppError;

/// Redshift bracket searched for the turnover of angular sizes
const PEAK_SEARCH: (f64, f64) = (0.1, 10.0);

/// kpc per arcmin subtended by a 0.1 arcsec VIS pixel measuring 1 kpc
const ARCMIN_PER_VIS_PIXEL: f64 = 600.0;

/// VIS magnitude limit of the galaxy count scale
pub const VIS_LIMIT: f64 = 24.5;

/// Hα flux limit (erg/s/cm²) of the spectroscopic count scale
pub const HALPHA_FLUX_LIMIT: f64 = 2e-16;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
pub enum ScaleKind {
    #[serde(rename = "redshift")]
    #[strum(serialize = "redshift")]
    Redshift,
    #[serde(rename = "lbt")]
    #[strum(serialize = "lbt")]
    LookbackTime,
    #[serde(rename = "distmod")]
    #[strum(serialize = "distmod")]
    DistanceModulus,
    #[serde(rename = "angdiam")]
    #[strum(serialize = "angdiam")]
    AngularDiameterDistance,
    #[serde(rename = "size")]
    #[strum(serialize = "size")]
    PixelScale,
    #[serde(rename = "visgals")]
    #[strum(serialize = "visgals")]
    VisCounts,
    #[serde(rename = "nispsgals")]
    #[strum(serialize = "nispsgals")]
    HalphaCounts,
}

impl ScaleKind {
    /// Every scale of the glass ruler, top to bottom before reversal
    pub const ALL: [ScaleKind; 7] = [
        ScaleKind::Redshift,
        ScaleKind::LookbackTime,
        ScaleKind::DistanceModulus,
        ScaleKind::AngularDiameterDistance,
        ScaleKind::PixelScale,
        ScaleKind::VisCounts,
        ScaleKind::HalphaCounts,
    ];

    pub fn needs_catalog(&self) -> bool {
        matches!(self, ScaleKind::VisCounts | ScaleKind::HalphaCounts)
    }

    /// Builds the scale, or `None` for a count scale when no catalog is given
    pub fn build(&self, inputs: &ScaleInputs<'_>) -> Result<Option<Scale>, RulerAppError> {
        let cosmo = &inputs.cosmology;
        let scale = match (self, inputs.records) {
            (ScaleKind::VisCounts | ScaleKind::HalphaCounts, None) => {
                log::info!("No galaxy catalog, skipping the {self} scale");
                return Ok(None);
            }
            (ScaleKind::VisCounts, Some(records)) => vis_counts(records, inputs.vis_catfactor)?,
            (ScaleKind::HalphaCounts, Some(records)) => {
                halpha_counts(records, inputs.halpha_catfactor)?
            }
            (ScaleKind::Redshift, _) => redshift()?,
            (ScaleKind::LookbackTime, _) => lookback_time(cosmo)?,
            (ScaleKind::DistanceModulus, _) => distance_modulus(cosmo)?,
            (ScaleKind::AngularDiameterDistance, _) => angular_diameter_distance(cosmo)?,
            (ScaleKind::PixelScale, _) => pixel_scale(cosmo)?,
        };
        log::debug!(
            "Built {self}: {} major, {} medium, {} minor ticks, {} labels",
            scale.major_ticks().len(),
            scale.medium_ticks().len(),
            scale.minor_ticks().len(),
            scale.labels().len()
        );
        Ok(Some(scale))
    }
}

/// Everything the scale builders read
#[derive(Debug, Clone, Copy)]
pub struct ScaleInputs<'a> {
    pub cosmology: FlatLambdaCdm,
    pub records: Option<&'a [FlagshipRecord]>,
    /// Catalog rows per galaxy per arcmin²
    pub vis_catfactor: f64,
    /// Catalog rows per galaxy per deg²
    pub halpha_catfactor: f64,
}

fn label_text(value: f64) -> String {
    format!("{value}")
}

pub fn redshift() -> Result<Scale, RulerAppError> {
    let mut scale = Scale::new("redshift").with_title("Redshift");
    for z in [0.0, 0.01, 0.1, 0.2, 0.4, 0.6, 0.8, 1.0, 1.5, 2.0] {
        scale.add_label(z, label_text(z));
    }
    scale
        .add_auto_subticks(&[0.0, 0.01], TickPolicy::LinHalf)?
        .add_auto_subticks(&[0.01, 0.1], TickPolicy::LogDecade)?
        .add_auto_subticks(&[0.1, 0.2, 0.4, 0.6, 0.8, 1.0], TickPolicy::LinHalf)?
        .add_auto_subticks(&[1.0, 1.5, 2.0], TickPolicy::LinFifths)?;
    Ok(scale)
}

/// Lookback time, read as the time the light has been travelling
pub fn lookback_time(cosmo: &FlatLambdaCdm) -> Result<Scale, RulerAppError> {
    let to_z = |gyr: f64| {
        find_value_for_target(|z| cosmo.lookback_time(z), gyr, SearchBounds::default())
    };
    let source = [0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

    let mut scale = Scale::new("lbt").with_title("Time to launch [Gyr]");
    scale.add_labels_with(&source, to_z, label_text).add_label(0.0, "0");
    scale
        .add_auto_subticks_with(&[0.0, 0.5], TickPolicy::LinFifths, to_z)?
        .add_auto_subticks_with(&source, TickPolicy::LinHalf, to_z)?
        .add_major_ticks([0.0]);
    Ok(scale)
}

pub fn distance_modulus(cosmo: &FlatLambdaCdm) -> Result<Scale, RulerAppError> {
    let to_z =
        |mag: f64| find_value_for_target(|z| cosmo.distmod(z), mag, SearchBounds::default());
    let segments: [(&[f64], TickPolicy); 3] = [
        (&[40.0, 41.0, 42.0, 43.0, 44.0, 45.0, 46.0], TickPolicy::LinHalf),
        (&[35.0, 37.0, 39.0], TickPolicy::LinHalf),
        (&[30.0, 35.0], TickPolicy::LinFifths),
    ];

    let mut scale = Scale::new("distmod").with_title("Distance modulus");
    for (source, policy) in segments {
        scale
            .add_labels_with(source, to_z, label_text)
            .add_auto_subticks_with(source, policy, to_z)?;
    }
    Ok(scale)
}

/// Angular diameter distance in Gpc. It peaks near `z = 1.6`, so each tick
/// is solved on the rising or the falling side of the peak.
pub fn angular_diameter_distance(cosmo: &FlatLambdaCdm) -> Result<Scale, RulerAppError> {
    let da = |z: f64| cosmo.angular_diameter_distance(z);
    let (zpeak, peak) = find_maximum(da, PEAK_SEARCH.0, PEAK_SEARCH.1)?;
    let rising =
        |gpc: f64| find_value_for_target(da, gpc * 1000.0, SearchBounds::below(zpeak));
    let falling =
        |gpc: f64| find_value_for_target(da, gpc * 1000.0, SearchBounds::above(zpeak));

    let mut scale = Scale::new("angdiam").with_title("Angular diameter distance [Gpc]");
    scale
        .set_peak(zpeak, format!("{:.3}", peak / 1000.0))
        .add_label(0.0, "0")
        .add_major_ticks([0.0]);
    scale
        .add_auto_subticks_with(&[0.0, 0.1], TickPolicy::LinFifths, rising)?
        .add_labels_with(&[0.1], rising, label_text);

    let source = [0.2, 0.4, 0.6, 0.8, 1.0, 1.2, 1.4, 1.6];
    scale
        .add_labels_with(&source, rising, label_text)
        .add_auto_subticks_with(&source, TickPolicy::LinHalf, rising)?;
    let source = [1.7, 1.75, 1.78];
    scale
        .add_labels_with(&source, rising, label_text)
        .add_auto_subticks_with(&source, TickPolicy::None, rising)?;
    scale
        .add_labels_with(&[1.78], falling, label_text)
        .add_auto_subticks_with(&[1.78], TickPolicy::None, falling)?;
    Ok(scale)
}

/// Proper transverse size, in kpc, of one 0.1 arcsec VIS pixel
pub fn pixel_scale(cosmo: &FlatLambdaCdm) -> Result<Scale, RulerAppError> {
    let kpc_per_arcmin = |z: f64| cosmo.kpc_proper_per_arcmin(z);
    let (zpeak, peak) = find_maximum(kpc_per_arcmin, PEAK_SEARCH.0, PEAK_SEARCH.1)?;
    let rising = |kpc: f64| {
        find_value_for_target(
            kpc_per_arcmin,
            kpc * ARCMIN_PER_VIS_PIXEL,
            SearchBounds::below(zpeak),
        )
    };
    let falling = |kpc: f64| {
        find_value_for_target(
            kpc_per_arcmin,
            kpc * ARCMIN_PER_VIS_PIXEL,
            SearchBounds::above(zpeak),
        )
    };

    let mut scale = Scale::new("size")
        .with_title("VIS pixel scale [kpc] (transverse proper size subtending 0.1 arcsec)");
    scale.set_peak(zpeak, format!("{:.2}", peak / ARCMIN_PER_VIS_PIXEL));
    let segments: [(&[f64], TickPolicy); 3] = [
        (&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8], TickPolicy::LinHalf),
        (&[0.01, 0.1], TickPolicy::LogDecade),
        (&[0.85, 0.86], TickPolicy::None),
    ];
    for (source, policy) in segments {
        scale
            .add_labels_with(source, rising, label_text)
            .add_auto_subticks_with(source, policy, rising)?;
    }
    scale
        .add_labels_with(&[0.86], falling, label_text)
        .add_auto_subticks_with(&[0.86], TickPolicy::None, falling)?;
    Ok(scale)
}

/// Cumulative galaxies per arcmin² brighter than [`VIS_LIMIT`]
pub fn vis_counts(records: &[FlagshipRecord], catfactor: f64) -> Result<Scale, RulerAppError> {
    let catalog = Catalog::from_records(records, |record| record.euclid_vis < VIS_LIMIT);
    let values = [0.01, 0.1, 1.0, 10.0, 15.0, 20.0, 25.0, 30.0];
    let ticks = CountTicks {
        major: values.to_vec(),
        medium: subdivide(&[10.0, 15.0, 20.0, 25.0, 30.0], 2)?,
        minor: subdivide(&[0.1, 1.0, 10.0], 9)?,
        labels: values.iter().map(|&v| (v, label_text(v))).collect(),
    };
    Ok(scale_counts_to_z(
        &catalog,
        catfactor,
        "visgals",
        "Cumulated number of galaxies per arcmin2 with VIS < 24.5",
        &ticks,
    )?)
}

/// Cumulative galaxies per deg² above [`HALPHA_FLUX_LIMIT`]
pub fn halpha_counts(records: &[FlagshipRecord], catfactor: f64) -> Result<Scale, RulerAppError> {
    let catalog = Catalog::from_records(records, |record| {
        record.avg_halpha_flux() > HALPHA_FLUX_LIMIT
    });
    let values = [10.0, 100.0, 1000.0, 2000.0, 4000.0, 6000.0, 8000.0, 8500.0];
    let ticks = CountTicks {
        major: values.to_vec(),
        medium: vec![1500.0, 3000.0, 5000.0, 7000.0],
        minor: subdivide(&[100.0, 1000.0], 9)?,
        labels: values.iter().map(|&v| (v, label_text(v))).collect(),
    };
    Ok(scale_counts_to_z(
        &catalog,
        catfactor,
        "nispsgals",
        "Cumulated number of galaxies per deg2 with Ha > 2 10-16 erg s-1 cm-2",
        &ticks,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_redshift_scale() {
        let mut scale = redshift().unwrap();
        scale.clean();
        assert_eq!(
            scale.major_ticks(),
            &[0.0, 0.01, 0.1, 0.2, 0.4, 0.6, 0.8, 1.0, 1.5, 2.0]
        );
        assert_eq!(scale.labels().len(), 10);
        assert_eq!(scale.labels()[9].text, "2");
        // lin-half between breakpoints plus the four fifths above z = 1
        assert_eq!(scale.medium_ticks().len(), 1 + 5 + 8);
        // 2..9 hundredths
        assert_eq!(scale.minor_ticks().len(), 8);
    }

    #[test]
    fn test_lookback_time_scale() {
        let cosmo = FlatLambdaCdm::planck15();
        let scale = lookback_time(&cosmo).unwrap();
        assert_eq!(scale.labels().len(), 12);
        for label in scale.labels() {
            let gyr: f64 = label.text.parse().unwrap();
            assert_approx_eq!(f64, cosmo.lookback_time(label.position), gyr, epsilon = 1e-6);
        }
        // The zero breakpoint cannot be solved for and is added by hand
        assert_eq!(scale.major_ticks().last(), Some(&0.0));
        assert_eq!(
            scale.major_ticks().iter().filter(|z| **z == 0.0).count(),
            1
        );
    }

    #[test]
    fn test_distance_modulus_scale() {
        let cosmo = FlatLambdaCdm::planck15();
        let mut scale = distance_modulus(&cosmo).unwrap();
        scale.clean();
        // 30, 35, 37, 39, 40..46
        assert_eq!(scale.major_ticks().len(), 11);
        assert_eq!(scale.labels().len(), 11);
        let z44 = scale.labels().iter().find(|l| l.text == "44").unwrap();
        assert_approx_eq!(f64, z44.position, 0.9414, epsilon = 1e-3);
    }

    #[rstest]
    #[case::angular_diameter(angular_diameter_distance, "1.795", "1.78")]
    #[case::pixel_scale(pixel_scale, "0.87", "0.86")]
    fn test_peaked_scales(
        #[case] build: fn(&FlatLambdaCdm) -> Result<Scale, RulerAppError>,
        #[case] peak_text: &str,
        #[case] beyond_peak: &str,
    ) {
        let scale = build(&FlatLambdaCdm::planck15()).unwrap();
        let peak = scale.peak().unwrap();
        assert_eq!(peak.text, peak_text);
        assert_approx_eq!(f64, peak.position, 1.596, epsilon = 0.01);

        // One label on each side of the peak
        let positions = scale
            .labels()
            .iter()
            .filter(|l| l.text == beyond_peak)
            .map(|l| l.position)
            .collect::<Vec<_>>();
        assert_eq!(positions.len(), 2);
        assert!(positions[0] < peak.position && positions[1] > peak.position);
    }

    #[test]
    fn test_count_scales() {
        // 40k galaxies evenly spread over 0 < z < 2, all passing both cuts
        let records = (0..40_000)
            .map(|i| FlagshipRecord {
                true_redshift_gal: (i as f64 + 0.5) / 20_000.0,
                euclid_vis: 23.0,
                logf_halpha_model1_ext: -15.0,
                logf_halpha_model3_ext: -15.0,
            })
            .collect::<Vec<_>>();

        let scale = vis_counts(&records, 1200.0).unwrap();
        assert_eq!(scale.name(), "visgals");
        assert_eq!(scale.major_ticks().len(), 8);
        assert_eq!(scale.medium_ticks().len(), 4);
        assert_eq!(scale.minor_ticks().len(), 16);
        // 1 count is row 1200
        assert_approx_eq!(f64, scale.major_ticks()[2], 1200.5 / 20_000.0, epsilon = 1e-9);

        let scale = halpha_counts(&records, 4.0).unwrap();
        assert_eq!(scale.labels().last().unwrap().text, "8500");

        assert!(matches!(
            vis_counts(&records, 100.0),
            Err(RulerAppError::Physics(_))
        ));
    }

    #[test]
    fn test_build_without_catalog() {
        let inputs = ScaleInputs {
            cosmology: FlatLambdaCdm::planck15(),
            records: None,
            vis_catfactor: 1.0,
            halpha_catfactor: 1.0,
        };
        assert!(ScaleKind::VisCounts.build(&inputs).unwrap().is_none());
        assert!(ScaleKind::Redshift.build(&inputs).unwrap().is_some());
    }

    #[test]
    fn test_scale_kind_names() {
        assert_eq!("lbt".parse::<ScaleKind>().unwrap(), ScaleKind::LookbackTime);
        assert_eq!(ScaleKind::AngularDiameterDistance.to_string(), "angdiam");
        assert_eq!(ScaleKind::VARIANTS.len(), ScaleKind::ALL.len());
        assert!(ScaleKind::ALL.iter().filter(|k| k.needs_catalog()).count() == 2);
    }
}
