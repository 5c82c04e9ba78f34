use ndarray::{Array1, Array2, Axis};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::center::Center;
use crate::config::DatasetLocator;
use crate::encoding::{encode, ENCODED_WIDTH};
use crate::parse::{discover, parse_file};
use crate::split::{Split, SplitAssigner};
use crate::{Result, DATASET_NAME};

/// Indexable, length-queryable collection of samples.
///
/// `get` answers `None` past the end. Implementors also provide an `item` accessor
/// that panics there instead, for callers that treat a bad index as a bug.
pub trait Dataset {
    type Item;

    fn get(&self, index: usize) -> Option<Self::Item>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Numeric type of the emitted features or labels.
pub trait Precision: Copy + Default + PartialOrd + fmt::Debug + Send + Sync + 'static {
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
}

impl Precision for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Precision for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// 0 stays "no disease", any severity above it becomes "disease".
#[allow(clippy::float_cmp)]
pub fn binarize(severity: f64) -> f64 {
    if severity == 0.0 {
        0.0
    } else {
        1.0
    }
}

/// Sample count for one center and split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    pub center: Center,
    pub split: Split,
    pub samples: usize,
    pub positives: usize,
}

/// All heart disease records with their center and split.
///
/// `features`, `labels`, `centers` and `sets` are aligned by row.
#[derive(Debug, Clone)]
pub struct HeartDiseaseRaw<X: Precision = f32, Y: Precision = f32> {
    data_dir: PathBuf,
    debug: bool,
    features: Array2<X>,
    labels: Array1<Y>,
    centers: Vec<Center>,
    sets: Vec<Split>,
}

impl<X: Precision, Y: Precision> HeartDiseaseRaw<X, Y> {
    pub fn new(locator: &dyn DatasetLocator, debug: bool) -> Result<Self> {
        let data_dir = locator.dataset_path(DATASET_NAME, debug)?;
        Self::from_dir(data_dir, debug)
    }

    /// Scans every `*.data` file of `data_dir` in file name order.
    pub fn from_dir(data_dir: impl Into<PathBuf>, debug: bool) -> Result<Self> {
        let data_dir = data_dir.into();
        let mut assigner = SplitAssigner::default();

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut centers = Vec::new();
        let mut sets = Vec::new();

        for path in discover(&data_dir)? {
            let table = parse_file(&path)?;

            sets.extend(assigner.assign(table.rows.len()));
            centers.extend(std::iter::repeat(table.center).take(table.rows.len()));

            for record in table.rows {
                rows.push(encode(&record.features)?);
                labels.push(Y::from_f64(binarize(record.label)));
            }
        }

        let is_debug = debug;
        let features =
            Array2::from_shape_fn((rows.len(), ENCODED_WIDTH), |(i, j)| X::from_f64(rows[i][j]));

        tracing::info!(
            dir = %data_dir.display(),
            debug_mode = is_debug,
            samples = labels.len(),
            width = ENCODED_WIDTH,
            "loaded heart disease dataset"
        );

        Ok(Self {
            data_dir,
            debug,
            features,
            labels: Array1::from(labels),
            centers,
            sets,
        })
    }

    /// Rows whose mask entry is set, in their original order.
    pub(crate) fn select(&self, mask: &[bool]) -> Self {
        debug_assert_eq!(mask.len(), self.len());

        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();

        Self {
            data_dir: self.data_dir.clone(),
            debug: self.debug,
            features: self.features.select(Axis(0), &indices),
            labels: self.labels.select(Axis(0), &indices),
            centers: indices.iter().map(|&i| self.centers[i]).collect(),
            sets: indices.iter().map(|&i| self.sets[i]).collect(),
        }
    }

    /// The sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics with "Index out of range." when `index >= self.len()`.
    pub fn item(&self, index: usize) -> (Array1<X>, Y) {
        assert!(index < self.len(), "Index out of range.");
        (self.features.row(index).to_owned(), self.labels[index])
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn features(&self) -> &Array2<X> {
        &self.features
    }

    pub fn labels(&self) -> &Array1<Y> {
        &self.labels
    }

    pub fn centers(&self) -> &[Center] {
        &self.centers
    }

    pub fn sets(&self) -> &[Split] {
        &self.sets
    }

    pub fn feature_width(&self) -> usize {
        self.features.ncols()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Per center and split sample counts, centers in id order, train first.
    pub fn summary(&self) -> Vec<SummaryRow> {
        let mut summary = Vec::with_capacity(Center::ALL.len() * 2);

        for center in Center::ALL {
            for split in [Split::Train, Split::Test] {
                let mut row = SummaryRow {
                    center,
                    split,
                    samples: 0,
                    positives: 0,
                };

                for i in 0..self.len() {
                    if self.centers[i] == center && self.sets[i] == split {
                        row.samples += 1;
                        if self.labels[i].to_f64() > 0.5 {
                            row.positives += 1;
                        }
                    }
                }

                summary.push(row);
            }
        }

        summary
    }
}

impl<X: Precision, Y: Precision> Dataset for HeartDiseaseRaw<X, Y> {
    type Item = (Array1<X>, Y);

    fn get(&self, index: usize) -> Option<Self::Item> {
        (index < self.len()).then(|| self.item(index))
    }

    fn len(&self) -> usize {
        HeartDiseaseRaw::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CLEVELAND: &str = "\
63,1,1,145,233,1,2,150,0,2.3,3,0,6,0
67,1,4,160,286,0,2,108,1,1.5,2,3,3,2
37,1,3,130,250,0,0,187,0,3.5,3,0,3,0
";

    const VA: &str = "\
63,1,4,140,260,0,1,112,1,3,2,?,?,2
44,1,4,130,209,0,1,127,0,0,?,?,?,0
60,1,4,132,?,0,1,130,1,0,?,?,?,4
";

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("processed.cleveland.data"), CLEVELAND).unwrap();
        fs::write(dir.path().join("processed.va.data"), VA).unwrap();
        dir
    }

    #[test]
    fn test_binarize() {
        assert_eq!(binarize(0.0), 0.0);
        for severity in [1.0, 2.0, 3.0, 4.0] {
            assert_eq!(binarize(severity), 1.0);
        }
    }

    #[test]
    fn test_load_merges_files_in_name_order() {
        let dir = fixture();
        let dataset: HeartDiseaseRaw = HeartDiseaseRaw::from_dir(dir.path(), false).unwrap();

        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.feature_width(), ENCODED_WIDTH);
        assert_eq!(
            dataset.centers(),
            &[
                Center::Cleveland,
                Center::Cleveland,
                Center::Cleveland,
                Center::Va,
                Center::Va
            ]
        );
        assert_eq!(
            dataset.labels().to_vec(),
            vec![0.0_f32, 1.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_split_follows_seeded_stream() {
        let dir = fixture();
        let dataset: HeartDiseaseRaw = HeartDiseaseRaw::from_dir(dir.path(), false).unwrap();

        assert_eq!(dataset.sets(), SplitAssigner::default().assign(5).as_slice());
    }

    #[test]
    fn test_precision() {
        let dir = fixture();
        let dataset: HeartDiseaseRaw<f64, f64> =
            HeartDiseaseRaw::from_dir(dir.path(), false).unwrap();

        let (x, y) = dataset.item(0);
        assert_eq!(x[0], 63.0_f64);
        assert_eq!(y, 0.0_f64);
    }

    #[test]
    fn test_get_out_of_range() {
        let dir = fixture();
        let dataset: HeartDiseaseRaw = HeartDiseaseRaw::from_dir(dir.path(), false).unwrap();

        assert!(dataset.get(4).is_some());
        assert!(dataset.get(5).is_none());
    }

    #[test]
    fn test_debug_flag_recorded() {
        let dir = fixture();
        let dataset: HeartDiseaseRaw = HeartDiseaseRaw::from_dir(dir.path(), true).unwrap();

        assert!(dataset.is_debug());
        assert_eq!(dataset.data_dir(), dir.path());
        assert_eq!(dataset.len(), 5);
    }

    #[test]
    #[should_panic(expected = "Index out of range.")]
    fn test_item_out_of_range_panics() {
        let dir = fixture();
        let dataset: HeartDiseaseRaw = HeartDiseaseRaw::from_dir(dir.path(), false).unwrap();

        let _ = dataset.item(dataset.len());
    }

    #[test]
    fn test_summary_covers_every_row() {
        let dir = fixture();
        let dataset: HeartDiseaseRaw = HeartDiseaseRaw::from_dir(dir.path(), false).unwrap();
        let summary = dataset.summary();

        assert_eq!(summary.len(), 8);
        assert_eq!(summary.iter().map(|r| r.samples).sum::<usize>(), 5);
        assert_eq!(summary.iter().map(|r| r.positives).sum::<usize>(), 2);
    }
}
