//! Per-center train/test views of the heart disease data.

use ndarray::{Array1, Array2};

use crate::center::Center;
use crate::config::DatasetLocator;
use crate::dataset::{Dataset, HeartDiseaseRaw, Precision};
use crate::split::Split;
use crate::Result;

/// Train or test data of one center, or of all centers when pooled.
///
/// The split is fixed: a row is in the same set whichever view it is read from.
#[derive(Debug, Clone)]
pub struct FedHeartDisease<X: Precision = f32, Y: Precision = f32> {
    chosen_centers: Vec<Center>,
    split: Split,
    data: HeartDiseaseRaw<X, Y>,
}

impl<X: Precision, Y: Precision> FedHeartDisease<X, Y> {
    /// `center` must be 0 to 3, even when `pooled` ignores it.
    pub fn new(
        center: usize,
        train: bool,
        pooled: bool,
        locator: &dyn DatasetLocator,
        debug: bool,
    ) -> Result<Self> {
        Center::try_from(center)?;
        let raw = HeartDiseaseRaw::new(locator, debug)?;
        Self::from_raw(&raw, center, train, pooled)
    }

    pub fn from_raw(
        raw: &HeartDiseaseRaw<X, Y>,
        center: usize,
        train: bool,
        pooled: bool,
    ) -> Result<Self> {
        let center = Center::try_from(center)?;
        let chosen_centers = if pooled {
            Center::ALL.to_vec()
        } else {
            vec![center]
        };
        let split = Split::from_train_flag(train);

        let mask: Vec<bool> = raw
            .centers()
            .iter()
            .zip(raw.sets())
            .map(|(c, &s)| s == split && chosen_centers.contains(c))
            .collect();

        let data = raw.select(&mask);

        tracing::debug!(
            centers = ?chosen_centers,
            %split,
            samples = data.len(),
            "selected federated view"
        );

        Ok(Self {
            chosen_centers,
            split,
            data,
        })
    }

    pub fn chosen_centers(&self) -> &[Center] {
        &self.chosen_centers
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn is_pooled(&self) -> bool {
        self.chosen_centers.len() == Center::ALL.len()
    }

    /// # Panics
    ///
    /// Panics with "Index out of range." when `index >= self.len()`.
    pub fn item(&self, index: usize) -> (Array1<X>, Y) {
        self.data.item(index)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn features(&self) -> &Array2<X> {
        self.data.features()
    }

    pub fn labels(&self) -> &Array1<Y> {
        self.data.labels()
    }

    pub fn centers(&self) -> &[Center] {
        self.data.centers()
    }

    pub fn sets(&self) -> &[Split] {
        self.data.sets()
    }

    pub fn feature_width(&self) -> usize {
        self.data.feature_width()
    }
}

impl<X: Precision, Y: Precision> Dataset for FedHeartDisease<X, Y> {
    type Item = (Array1<X>, Y);

    fn get(&self, index: usize) -> Option<Self::Item> {
        self.data.get(index)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
