/// Per-column standardization to zero mean and unit variance.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler<const N: usize> {
    mean: [f64; N],
    scale: [f64; N],
}

impl<const N: usize> StandardScaler<N> {
    /// Population statistics (ddof = 0). A constant column gets scale 1.0.
    pub fn fit(rows: &[[f64; N]]) -> Self {
        let mut mean = [0.0; N];
        let mut scale = [1.0; N];
        if rows.is_empty() {
            return Self { mean, scale };
        }
        let n = rows.len() as f64;

        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut variance = [0.0; N];
        for row in rows {
            for ((var, v), m) in variance.iter_mut().zip(row).zip(&mean) {
                *var += (v - m) * (v - m);
            }
        }
        for (s, var) in scale.iter_mut().zip(variance) {
            let std = (var / n).sqrt();
            if std > f64::EPSILON * 10.0 {
                *s = std;
            }
        }

        Self { mean, scale }
    }

    pub fn transform(&self, row: &[f64; N]) -> [f64; N] {
        let mut out = [0.0; N];
        for i in 0..N {
            out[i] = (row[i] - self.mean[i]) / self.scale[i];
        }
        out
    }

    pub fn mean(&self) -> &[f64; N] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; N] {
        &self.scale
    }
}
