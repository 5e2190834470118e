//! Bundled seed datasets and the helpers that feed points into the demos.
//!
//! Coordinates are already scaled to the `0..10` plane.

use std::fmt;

use rand::Rng;

use crate::common_types::{LabeledPoint2D, Point2D};
use crate::error::{PlaygroundError, Result};

/// Side length of the playground plane.
pub const PLANE_SIZE: f64 = 10.0;

/// Which demo a dataset is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Classification,
    Clustering,
    Anomaly,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Classification => "classification",
            Category::Clustering => "clustering",
            Category::Anomaly => "anomaly",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a seed dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedPoint {
    pub x: f64,
    pub y: f64,
    /// Class, for classification datasets.
    pub label: Option<u8>,
    /// Hand annotation marking a planted outlier.
    pub planted_anomaly: bool,
}

const fn labeled(x: f64, y: f64, label: u8) -> SeedPoint {
    SeedPoint { x, y, label: Some(label), planted_anomaly: false }
}

const fn plain(x: f64, y: f64) -> SeedPoint {
    SeedPoint { x, y, label: None, planted_anomaly: false }
}

const fn planted(x: f64, y: f64) -> SeedPoint {
    SeedPoint { x, y, label: None, planted_anomaly: true }
}

/// A static, read-only seed dataset.
#[derive(Debug)]
pub struct Dataset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub data: &'static [SeedPoint],
}

impl Dataset {
    pub fn points(&self) -> Vec<Point2D> {
        self.data.iter().map(|p| Point2D::new(p.x, p.y)).collect()
    }

    /// Rows that carry a label; unlabeled rows are skipped.
    pub fn labeled_points(&self) -> Vec<LabeledPoint2D> {
        self.data
            .iter()
            .filter_map(|p| p.label.map(|label| LabeledPoint2D::new(p.x, p.y, label)))
            .collect()
    }

    /// Fails unless the dataset belongs to `expected`.
    pub fn expect_category(&self, expected: Category) -> Result<&Self> {
        if self.category != expected {
            return Err(PlaygroundError::WrongCategory {
                id: self.id,
                category: self.category.as_str(),
                expected: expected.as_str(),
            });
        }
        Ok(self)
    }
}

/// Credit approval: monthly income (x) against credit score (y).
pub static CREDIT: Dataset = Dataset {
    id: "credit",
    name: "Credit approval",
    description: "Simulated customers: monthly income (x) vs credit score (y). Class 0 = refused, class 1 = granted.",
    category: Category::Classification,
    data: &[
        // Refused: low income, low score.
        labeled(1.5, 2.0, 0),
        labeled(1.8, 2.2, 0),
        labeled(2.0, 1.8, 0),
        labeled(2.2, 2.5, 0),
        labeled(1.6, 1.5, 0),
        labeled(2.1, 2.0, 0),
        labeled(1.9, 1.9, 0),
        labeled(2.3, 2.1, 0),
        // Granted: high income, high score.
        labeled(6.5, 7.0, 1),
        labeled(7.0, 7.5, 1),
        labeled(6.8, 6.8, 1),
        labeled(7.5, 8.0, 1),
        labeled(6.2, 6.5, 1),
        labeled(7.2, 7.8, 1),
        labeled(6.9, 7.2, 1),
        labeled(7.8, 8.2, 1),
        // Transition zone.
        labeled(4.0, 4.5, 0),
        labeled(4.5, 5.0, 1),
        labeled(3.8, 4.2, 0),
        labeled(5.0, 5.5, 1),
    ],
};

/// E-commerce customers: purchase frequency (x) against average basket (y), three groups.
pub static CUSTOMERS: Dataset = Dataset {
    id: "customers",
    name: "E-commerce customer segments",
    description: "Customers by purchase frequency (x) and average basket (y). Three natural groups.",
    category: Category::Clustering,
    data: &[
        // Occasional buyers.
        plain(1.0, 1.2),
        plain(1.2, 1.0),
        plain(0.8, 1.1),
        plain(1.1, 0.9),
        plain(0.9, 1.3),
        plain(1.3, 1.1),
        plain(1.0, 0.8),
        plain(0.7, 1.0),
        // Regulars.
        plain(4.5, 4.8),
        plain(5.0, 5.0),
        plain(4.8, 4.5),
        plain(5.2, 5.2),
        plain(4.3, 4.7),
        plain(5.1, 4.9),
        plain(4.6, 5.1),
        plain(4.9, 4.6),
        // VIP.
        plain(8.5, 8.8),
        plain(9.0, 9.0),
        plain(8.8, 8.5),
        plain(9.2, 9.2),
        plain(8.3, 8.7),
        plain(9.1, 8.9),
        plain(8.6, 9.1),
        plain(8.9, 8.6),
    ],
};

/// Bank transactions: amount (x) against hour (y), with planted outliers.
pub static TRANSACTIONS: Dataset = Dataset {
    id: "transactions",
    name: "Bank transactions",
    description: "Normal transactions (amount x, hour y) with a few suspicious ones to detect.",
    category: Category::Anomaly,
    data: &[
        plain(4.8, 5.2),
        plain(5.1, 4.9),
        plain(5.0, 5.0),
        plain(4.9, 5.1),
        plain(5.2, 4.8),
        plain(4.7, 5.3),
        plain(5.3, 4.7),
        plain(4.6, 5.4),
        plain(5.4, 4.6),
        plain(4.5, 5.5),
        plain(5.5, 4.5),
        plain(4.4, 5.6),
        plain(5.6, 4.4),
        plain(4.3, 5.7),
        plain(5.7, 4.3),
        plain(4.2, 5.8),
        plain(5.8, 4.2),
        plain(4.1, 5.9),
        plain(5.9, 4.1),
        plain(4.0, 6.0),
        planted(0.5, 0.3),
        planted(9.5, 9.8),
        planted(0.2, 9.5),
        planted(9.8, 0.1),
        planted(1.0, 1.0),
    ],
};

/// Every bundled dataset.
pub fn all() -> [&'static Dataset; 3] {
    [&CREDIT, &CUSTOMERS, &TRANSACTIONS]
}

pub fn by_id(id: &str) -> Result<&'static Dataset> {
    all()
        .into_iter()
        .find(|d| d.id == id)
        .ok_or_else(|| PlaygroundError::UnknownDataset(id.to_string()))
}

pub fn by_category(category: Category) -> Vec<&'static Dataset> {
    all().into_iter().filter(|d| d.category == category).collect()
}

/// Random starting data for the anomaly demo: 50 points in `[4, 6]²` and 5 anywhere on the plane.
pub fn generate_anomaly_sample<R: Rng + ?Sized>(rng: &mut R) -> Vec<Point2D> {
    let normal = (0..50).map(|_| Point2D::new(5.0 + rng.gen_range(-1.0..1.0), 5.0 + rng.gen_range(-1.0..1.0)));
    let mut points: Vec<Point2D> = normal.collect();
    points.extend((0..5).map(|_| Point2D::new(rng.gen_range(0.0..PLANE_SIZE), rng.gen_range(0.0..PLANE_SIZE))));
    points
}

/// Maps a pointer position on a canvas of `width` x `height` pixels to the `0..10` plane.
///
/// Returns `None` for a degenerate canvas.
pub fn canvas_to_plane(px: f64, py: f64, width: f64, height: f64) -> Option<Point2D> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Point2D::new(px / width * PLANE_SIZE, py / height * PLANE_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dataset_sizes() {
        assert_eq!(CREDIT.labeled_points().len(), 20);
        assert_eq!(CUSTOMERS.points().len(), 24);
        assert_eq!(TRANSACTIONS.points().len(), 25);
        assert_eq!(TRANSACTIONS.data.iter().filter(|p| p.planted_anomaly).count(), 5);
        assert!(CUSTOMERS.labeled_points().is_empty());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(by_id("customers").unwrap().category, Category::Clustering);
        assert!(matches!(by_id("nope"), Err(PlaygroundError::UnknownDataset(id)) if id == "nope"));
        assert_eq!(by_category(Category::Anomaly).len(), 1);
        assert!(CREDIT.expect_category(Category::Clustering).is_err());
        assert!(CREDIT.expect_category(Category::Classification).is_ok());
    }

    #[test]
    fn test_anomaly_sample_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        let points = generate_anomaly_sample(&mut rng);
        assert_eq!(points.len(), 55);
        for p in &points[..50] {
            assert!((4.0..=6.0).contains(&p.x) && (4.0..=6.0).contains(&p.y), "{:?} outside the normal blob", p);
        }
        for p in &points[50..] {
            assert!((0.0..=PLANE_SIZE).contains(&p.x) && (0.0..=PLANE_SIZE).contains(&p.y));
        }
    }

    #[test]
    fn test_canvas_to_plane() {
        assert_eq!(canvas_to_plane(400.0, 225.0, 800.0, 450.0), Some(Point2D::new(5.0, 5.0)));
        assert_eq!(canvas_to_plane(1.0, 1.0, 0.0, 450.0), None);
    }
}
