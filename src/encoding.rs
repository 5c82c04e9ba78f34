use crate::parse::RAW_FEATURES;
use crate::{Error, Result};

/// A categorical feature column and every level it may take.
#[derive(Debug, Clone, Copy)]
pub struct Categorical {
    pub column: usize,
    pub levels: &'static [f64],
}

impl Categorical {
    /// Indicator columns produced, the first level being the implicit baseline.
    pub const fn width(&self) -> usize {
        self.levels.len() - 1
    }

    #[allow(clippy::float_cmp)]
    fn level_index(&self, value: f64) -> Result<usize> {
        self.levels
            .iter()
            .position(|&level| level == value)
            .ok_or(Error::UnknownCategory {
                column: self.column,
                value,
            })
    }
}

/// Chest pain type: typical angina, atypical angina, non-anginal, asymptomatic.
pub const CHEST_PAIN: Categorical = Categorical {
    column: 2,
    levels: &[1.0, 2.0, 3.0, 4.0],
};

/// Resting ECG: normal, ST-T abnormality, left ventricular hypertrophy.
pub const RESTING_ECG: Categorical = Categorical {
    column: 6,
    levels: &[0.0, 1.0, 2.0],
};

pub const CATEGORICAL: [Categorical; 2] = [CHEST_PAIN, RESTING_ECG];

pub const ENCODED_WIDTH: usize =
    RAW_FEATURES - CATEGORICAL.len() + CHEST_PAIN.width() + RESTING_ECG.width();

fn is_categorical(column: usize) -> bool {
    CATEGORICAL.iter().any(|c| c.column == column)
}

/// Numeric columns in their original order, followed by the indicators of each
/// categorical column with its first level dropped.
pub fn encode(features: &[f64]) -> Result<[f64; ENCODED_WIDTH]> {
    debug_assert_eq!(features.len(), RAW_FEATURES);

    let mut encoded = [0.0; ENCODED_WIDTH];
    let mut offset = 0;

    for (column, &value) in features.iter().enumerate() {
        if !is_categorical(column) {
            encoded[offset] = value;
            offset += 1;
        }
    }

    for categorical in &CATEGORICAL {
        let level = categorical.level_index(features[categorical.column])?;
        if level > 0 {
            encoded[offset + level - 1] = 1.0;
        }
        offset += categorical.width();
    }

    Ok(encoded)
}

/// Human readable names of the encoded columns, in output order.
pub fn column_names() -> Vec<String> {
    const NAMES: [&str; RAW_FEATURES] = [
        "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    ];

    let mut names: Vec<String> = NAMES
        .iter()
        .enumerate()
        .filter(|(column, _)| !is_categorical(*column))
        .map(|(_, name)| (*name).to_string())
        .collect();

    for categorical in &CATEGORICAL {
        for level in &categorical.levels[1..] {
            names.push(format!("{}_{level}", NAMES[categorical.column]));
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(ENCODED_WIDTH, 13);
        assert_eq!(column_names().len(), ENCODED_WIDTH);
    }

    #[test]
    fn test_baseline_levels_encode_to_zeros() {
        let row = [63.0, 1.0, 1.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3];
        let encoded = encode(&row).unwrap();

        assert_eq!(
            encoded[..8],
            [63.0, 1.0, 145.0, 233.0, 1.0, 150.0, 0.0, 2.3]
        );
        assert!(encoded[8..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_indicator_positions() {
        let row = [67.0, 1.0, 4.0, 160.0, 286.0, 0.0, 2.0, 108.0, 1.0, 1.5];
        let encoded = encode(&row).unwrap();

        // cp=4 -> third chest pain indicator, restecg=2 -> second ecg indicator
        assert_eq!(encoded[8..], [0.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(column_names()[10], "cp_4");
        assert_eq!(column_names()[12], "restecg_2");
    }

    #[test]
    fn test_unknown_level() {
        let row = [50.0, 0.0, 7.0, 120.0, 200.0, 0.0, 0.0, 140.0, 0.0, 0.0];

        assert!(matches!(
            encode(&row),
            Err(Error::UnknownCategory { column: 2, .. })
        ));
    }
}
