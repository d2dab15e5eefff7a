use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// On-disk shape of the clustering artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansParams {
    /// Cluster centers, one row per cluster.
    pub cluster_centers: Vec<Vec<f64>>,
    /// Redundant with `cluster_centers.len()`; checked when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_clusters: Option<usize>,
}

/// Fitted k-means model: a fixed set of centroids and nearest-centroid assignment.
#[derive(Debug, Clone)]
pub struct KMeansModel {
    centers: Array2<f64>, // centers = (n_clusters, n_features)
}

impl KMeansModel {
    pub fn new(centers: Array2<f64>) -> Result<Self, ModelError> {
        if centers.nrows() == 0 {
            return Err(ModelError::schema("clustering model has no centroids"));
        }
        if centers.ncols() == 0 {
            return Err(ModelError::schema("centroids have zero dimensions"));
        }
        if centers.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::schema("centroids contain non-finite coordinates"));
        }
        Ok(Self { centers })
    }

    pub fn from_params(params: KMeansParams) -> Result<Self, ModelError> {
        let n_clusters = params.cluster_centers.len();
        if let Some(declared) = params.n_clusters {
            if declared != n_clusters {
                return Err(ModelError::schema(format!(
                    "n_clusters {declared} != {n_clusters} centroid rows"
                )));
            }
        }
        let n_features = params.cluster_centers.first().map_or(0, Vec::len);
        if let Some((row, center)) = params
            .cluster_centers
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != n_features)
        {
            return Err(ModelError::schema(format!(
                "centroid {row} has {} dimensions, expected {n_features}",
                center.len()
            )));
        }

        let flat: Vec<f64> = params.cluster_centers.into_iter().flatten().collect();
        let centers = Array2::from_shape_vec((n_clusters, n_features), flat)
            .map_err(|e| ModelError::schema(format!("centroid matrix: {e}")))?;
        Self::new(centers)
    }

    /// Number of clusters (K).
    pub fn n_clusters(&self) -> usize {
        self.centers.nrows()
    }

    /// Centroid dimensionality (F).
    pub fn n_features(&self) -> usize {
        self.centers.ncols()
    }

    /// Row `cluster` of the centroid matrix, or `None` when out of range.
    pub fn centroid(&self, cluster: usize) -> Option<ArrayView1<'_, f64>> {
        (cluster < self.n_clusters()).then(|| self.centers.row(cluster))
    }

    /// Index of the nearest centroid by squared Euclidean distance.
    ///
    /// Ties resolve to the lowest index, so the result is always in
    /// `[0, n_clusters)`.
    pub fn predict(&self, x: &Array1<f64>) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (label, center) in self.centers.rows().into_iter().enumerate() {
            let diff = &center - x;
            let sq_dist = diff.dot(&diff);
            if sq_dist < best_dist {
                best = label;
                best_dist = sq_dist;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn model() -> KMeansModel {
        KMeansModel::new(array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]).unwrap()
    }

    #[test]
    fn predicts_nearest_centroid() {
        let m = model();
        assert_eq!(m.predict(&array![0.9, 0.1, 0.0]), 0);
        assert_eq!(m.predict(&array![0.1, 0.2, 0.8]), 2);
    }

    #[test]
    fn equidistant_input_picks_lowest_index() {
        let m = model();
        assert_eq!(m.predict(&array![0.0, 0.0, 0.0]), 0);
        assert_eq!(m.predict(&array![0.0, 0.5, 0.5]), 1);
    }

    #[test]
    fn centroid_lookup_is_bounded() {
        let m = model();
        assert_eq!(m.centroid(1).unwrap().to_vec(), vec![0.0, 1.0, 0.0]);
        assert!(m.centroid(3).is_none());
    }

    #[test]
    fn from_params_validates_shape() {
        let ok = KMeansParams {
            cluster_centers: vec![vec![0.1, 0.2], vec![0.3, 0.4]],
            n_clusters: Some(2),
        };
        let m = KMeansModel::from_params(ok).unwrap();
        assert_eq!((m.n_clusters(), m.n_features()), (2, 2));

        let ragged = KMeansParams {
            cluster_centers: vec![vec![0.1, 0.2], vec![0.3]],
            n_clusters: None,
        };
        assert!(KMeansModel::from_params(ragged).is_err());

        let miscounted = KMeansParams {
            cluster_centers: vec![vec![0.1]],
            n_clusters: Some(4),
        };
        assert!(KMeansModel::from_params(miscounted).is_err());

        let empty = KMeansParams {
            cluster_centers: vec![],
            n_clusters: None,
        };
        assert!(KMeansModel::from_params(empty).is_err());
    }

    #[test]
    fn rejects_non_finite_centroids() {
        assert!(KMeansModel::new(array![[f64::NAN, 0.0]]).is_err());
    }
}
