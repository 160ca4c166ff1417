use nalgebra::Vector3;

/// Orthogonal periodic simulation cell.
///
/// The cell is enabled iff all three edge lengths are positive. Inverse edge
/// lengths are cached and recomputed on every length change; they are never
/// stored independently of the lengths themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    lengths: Vector3<f64>,
    inv_lengths: Vector3<f64>,
    enabled: bool,
}

impl Default for SimulationBox {
    fn default() -> Self {
        Self::disabled()
    }
}

impl SimulationBox {
    /// Creates a cell with the given edge lengths in Å.
    ///
    /// Non-positive lengths leave the cell disabled, in which case [`wrap`]
    /// and [`delta`] are identity/plain-difference operations.
    ///
    /// [`wrap`]: SimulationBox::wrap
    /// [`delta`]: SimulationBox::delta
    pub fn new(lx: f64, ly: f64, lz: f64) -> Self {
        let mut cell = Self::disabled();
        cell.set_lengths(lx, ly, lz);
        cell
    }

    /// A cell with periodicity turned off.
    pub fn disabled() -> Self {
        Self {
            lengths: Vector3::zeros(),
            inv_lengths: Vector3::zeros(),
            enabled: false,
        }
    }

    /// Replaces the edge lengths, refreshing the cached inverses.
    pub fn set_lengths(&mut self, lx: f64, ly: f64, lz: f64) {
        self.lengths = Vector3::new(lx, ly, lz);
        self.enabled = lx > 0.0 && ly > 0.0 && lz > 0.0;
        self.inv_lengths = if self.enabled {
            Vector3::new(1.0 / lx, 1.0 / ly, 1.0 / lz)
        } else {
            Vector3::zeros()
        };
    }

    pub fn lengths(&self) -> Vector3<f64> {
        self.lengths
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Cell volume in Å³, or `None` when periodicity is disabled.
    pub fn volume(&self) -> Option<f64> {
        self.enabled
            .then(|| self.lengths.x * self.lengths.y * self.lengths.z)
    }

    /// Maps a position into the primary image, `[0, L)` per axis.
    pub fn wrap(&self, r: &Vector3<f64>) -> Vector3<f64> {
        if !self.enabled {
            return *r;
        }
        let mut out = *r;
        for k in 0..3 {
            out[k] -= self.lengths[k] * (out[k] * self.inv_lengths[k]).floor();
        }
        out
    }

    /// Minimum-image displacement `rj - ri`.
    ///
    /// Antisymmetric in its arguments; each component has magnitude at most
    /// `L/2`. Reduces to the plain difference when periodicity is disabled.
    pub fn delta(&self, ri: &Vector3<f64>, rj: &Vector3<f64>) -> Vector3<f64> {
        let mut d = rj - ri;
        if self.enabled {
            for k in 0..3 {
                d[k] -= self.lengths[k] * (d[k] * self.inv_lengths[k]).round();
            }
        }
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn cell_is_enabled_only_with_all_positive_lengths() {
        assert!(SimulationBox::new(10.0, 10.0, 10.0).enabled());
        assert!(!SimulationBox::new(10.0, 0.0, 10.0).enabled());
        assert!(!SimulationBox::new(-5.0, 10.0, 10.0).enabled());
        assert!(!SimulationBox::disabled().enabled());
    }

    #[test]
    fn wrap_maps_into_primary_image() {
        let cell = SimulationBox::new(10.0, 20.0, 30.0);
        let wrapped = cell.wrap(&Vector3::new(12.5, -3.0, 45.0));
        assert!((wrapped.x - 2.5).abs() < TOLERANCE);
        assert!((wrapped.y - 17.0).abs() < TOLERANCE);
        assert!((wrapped.z - 15.0).abs() < TOLERANCE);
    }

    #[test]
    fn wrap_is_idempotent() {
        let cell = SimulationBox::new(7.0, 11.0, 13.0);
        let points = [
            Vector3::new(3.2, -41.7, 100.4),
            Vector3::new(-0.001, 10.999, 13.0),
            Vector3::new(6.9999, 0.0, -13.0),
        ];
        for r in &points {
            let once = cell.wrap(r);
            let twice = cell.wrap(&once);
            assert!((once - twice).norm() < TOLERANCE);
            for k in 0..3 {
                assert!(once[k] >= 0.0 && once[k] < cell.lengths()[k]);
            }
        }
    }

    #[test]
    fn delta_is_antisymmetric_and_bounded_by_half_box() {
        let cell = SimulationBox::new(10.0, 10.0, 10.0);
        let a = Vector3::new(1.0, 9.5, 4.9);
        let b = Vector3::new(9.0, 0.5, 5.1);

        let ab = cell.delta(&a, &b);
        let ba = cell.delta(&b, &a);
        assert!((ab + ba).norm() < TOLERANCE);
        for k in 0..3 {
            assert!(ab[k].abs() <= 5.0 + TOLERANCE);
        }
    }

    #[test]
    fn delta_picks_nearest_periodic_image() {
        let cell = SimulationBox::new(10.0, 10.0, 10.0);
        let a = Vector3::new(0.5, 0.0, 0.0);
        let b = Vector3::new(9.5, 0.0, 0.0);
        let d = cell.delta(&a, &b);
        assert!((d.x - -1.0).abs() < TOLERANCE);
        assert!(d.y.abs() < TOLERANCE);
    }

    #[test]
    fn disabled_cell_leaves_coordinates_untouched() {
        let cell = SimulationBox::disabled();
        let a = Vector3::new(-4.0, 100.0, 3.0);
        let b = Vector3::new(6.0, -2.0, 3.0);
        assert_eq!(cell.wrap(&a), a);
        assert_eq!(cell.delta(&a, &b), b - a);
        assert_eq!(cell.volume(), None);
    }

    #[test]
    fn set_lengths_refreshes_cached_inverses() {
        let mut cell = SimulationBox::new(10.0, 10.0, 10.0);
        cell.set_lengths(4.0, 4.0, 4.0);
        let wrapped = cell.wrap(&Vector3::new(5.0, -1.0, 8.0));
        assert!((wrapped.x - 1.0).abs() < TOLERANCE);
        assert!((wrapped.y - 3.0).abs() < TOLERANCE);
        assert!((wrapped.z - 0.0).abs() < TOLERANCE);
        assert_eq!(cell.volume(), Some(64.0));
    }
}
