use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyList;
use rolling_average::{half_window_from_signed, SmoothError, SmoothParams, DEFAULT_HALF_WINDOW};
use thiserror::Error;
use variant_frame::{selection_summary, SmoothingRequest, VariantFrame};
use variants_common::{parse_date, DateRange, VariantError, VariantRecord, VariantSelection};

/// Error wrapper for Python
#[derive(Error, Debug)]
enum PyVariantError {
    #[error(transparent)]
    Smoothing(#[from] SmoothError),
    #[error(transparent)]
    Variant(#[from] VariantError),
    #[error("internal: {0}")]
    Internal(String),
}

impl From<PyVariantError> for PyErr {
    fn from(e: PyVariantError) -> PyErr {
        PyValueError::new_err(e.to_string())
    }
}

/// smooth(series: list[float], half_window: int) -> list[float]
/// Edge-clamped rolling mean; half_window = 0 returns the data unchanged.
#[pyfunction]
fn smooth(series: Vec<f64>, half_window: i64) -> PyResult<Vec<f64>> {
    let k = half_window_from_signed(half_window).map_err(PyVariantError::from)?;
    Ok(rolling_average::smooth(&series, k))
}

#[pyclass(name = "VariantFrame")]
struct PyVariantFrame {
    inner: VariantFrame,
}

#[pymethods]
impl PyVariantFrame {
    /// VariantFrame(records_json: str)
    /// records_json: JSON array of {"date": "YYYY-MM-DD", "variant_name": str, "specimens": float}
    #[new]
    fn new(records_json: &str) -> PyResult<Self> {
        let records: Vec<VariantRecord> = serde_json::from_str(records_json)
            .map_err(|e| PyVariantError::Variant(e.into()))?;
        log::info!("loaded {} variant records", records.len());
        Ok(PyVariantFrame {
            inner: VariantFrame::new(records),
        })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// variants() -> list[str]
    fn variants(&self, py: Python<'_>) -> PyObject {
        PyList::new(py, self.inner.variants()).to_object(py)
    }

    /// smoothed(start_date: str, end_date: str, variants: Optional[list[str]] = None, half_window: int = 3) -> str
    /// Returns a JSON array of {"date", "variant_name", "specimens", "rolling_avg"} rows.
    fn smoothed(
        &self,
        start_date: &str,
        end_date: &str,
        variants: Option<Vec<String>>,
        half_window: Option<i64>,
    ) -> PyResult<String> {
        let range = DateRange::parse(start_date, end_date).map_err(PyVariantError::from)?;
        let k = match half_window {
            Some(k) => half_window_from_signed(k).map_err(PyVariantError::from)?,
            None => DEFAULT_HALF_WINDOW,
        };
        let req = SmoothingRequest::new(range, VariantSelection::from_names(variants), SmoothParams::new(k));
        let rows = self.inner.smoothed(&req);
        let out = serde_json::to_string(&rows).map_err(|e| PyVariantError::Internal(format!("serialize failed: {}", e)))?;
        Ok(out)
    }

    /// summary(start_date: Optional[str] = None, end_date: Optional[str] = None, half_window: Optional[int] = None) -> str
    fn summary(&self, start_date: Option<&str>, end_date: Option<&str>, half_window: Option<i64>) -> PyResult<String> {
        let start = start_date.map(parse_date).transpose().map_err(PyVariantError::from)?;
        let end = end_date.map(parse_date).transpose().map_err(PyVariantError::from)?;
        let k = half_window
            .map(half_window_from_signed)
            .transpose()
            .map_err(PyVariantError::from)?;
        Ok(selection_summary(start, end, k))
    }
}

/// Python module
#[pymodule]
fn variants_py(_py: Python, m: &PyModule) -> PyResult<()> {
    let _ = env_logger::try_init();
    m.add_function(wrap_pyfunction!(smooth, m)?)?;
    m.add_class::<PyVariantFrame>()?;
    Ok(())
}
