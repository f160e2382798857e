/// Default gap (in points or character offsets) that splits two clusters.
pub const DEFAULT_TOLERANCE: f64 = 5.0;

/// Group nearby positions into boundary candidates.
///
/// Positions are sorted and accumulated greedily: a value joins the current
/// cluster when it lies within `tolerance` of the cluster's most recent
/// member. Each cluster is represented by the mean of its members.
///
/// A single cluster is widened to `[min, max]` so callers always receive a
/// usable pair of boundaries. Empty input yields empty output.
pub fn cluster_positions(positions: &[f64], tolerance: f64) -> Vec<f64> {
    if positions.is_empty() {
        return Vec::new();
    }

    let mut sorted = positions.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut clusters = Vec::new();
    let mut current = vec![sorted[0]];

    for &pos in &sorted[1..] {
        let last = current[current.len() - 1];
        if pos - last <= tolerance {
            current.push(pos);
        } else {
            clusters.push(mean(&current));
            current = vec![pos];
        }
    }
    clusters.push(mean(&current));

    if clusters.len() < 2 {
        return vec![sorted[0], sorted[sorted.len() - 1]];
    }

    clusters
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
