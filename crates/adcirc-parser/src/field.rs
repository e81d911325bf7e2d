//! Reader for ADCIRC time-series output files (fort.61/63/64 and friends).
//!
//! # Format
//!
//! ```text
//! <title>
//! <num_times> <num_nodes> <float> <int> <num_columns>
//! repeated num_times times:
//!   <time> [ignored tokens...]
//!   <node_id> <value_1> ... <value_num_columns>     (num_nodes lines)
//! ```
//!
//! The third and fourth header fields (output interval in seconds and in
//! timesteps in ADCIRC's own writer) carry no meaning here. They are parsed to
//! keep `num_columns` aligned and kept verbatim on [`FieldHeader`].
//!
//! # Layout
//!
//! Values are stored as a dense `(nodes, columns, times)` array. Scalar files
//! (`num_columns == 1`) collapse to `(nodes, times)`; see [`FieldShape`].
//!
//! # Dry cells
//!
//! With [`FieldOptions::mask_dry_values`] set, a [`DryMask`] is built from
//! exact equality against the dry sentinel. Raw values are never modified;
//! [`TimeSeriesField::value`] and [`TimeSeriesField::filled`] give the
//! fill-substituted view.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info};

use crate::config::FieldOptions;
use crate::error::{AdcircError, AdcircResult};
use crate::lines::{initial_capacity, LineReader, READER_PATH};

/// Header line of a time-series file.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldHeader {
    pub title: String,
    pub num_times: usize,
    pub num_nodes: usize,
    /// Third header field, preserved as read
    pub opaque_float: f64,
    /// Fourth header field, preserved as read
    pub opaque_int: i64,
    pub num_columns: usize,
}

/// Dimensions of a [`FieldArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Single-column field, shape `(nodes, times)`
    Scalar { nodes: usize, times: usize },
    /// Multi-column field, shape `(nodes, columns, times)`
    Vector {
        nodes: usize,
        columns: usize,
        times: usize,
    },
}

impl FieldShape {
    /// Shape for `columns` values per node; a single column drops the column axis.
    pub fn new(nodes: usize, columns: usize, times: usize) -> Self {
        if columns == 1 {
            Self::Scalar { nodes, times }
        } else {
            Self::Vector {
                nodes,
                columns,
                times,
            }
        }
    }

    pub fn nodes(&self) -> usize {
        match *self {
            Self::Scalar { nodes, .. } | Self::Vector { nodes, .. } => nodes,
        }
    }

    pub fn columns(&self) -> usize {
        match *self {
            Self::Scalar { .. } => 1,
            Self::Vector { columns, .. } => columns,
        }
    }

    pub fn times(&self) -> usize {
        match *self {
            Self::Scalar { times, .. } | Self::Vector { times, .. } => times,
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            Self::Scalar { .. } => 2,
            Self::Vector { .. } => 3,
        }
    }

    /// Axis lengths in storage order.
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            Self::Scalar { nodes, times } => vec![nodes, times],
            Self::Vector {
                nodes,
                columns,
                times,
            } => vec![nodes, columns, times],
        }
    }

    /// Total number of values, or `None` if it does not fit in `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        self.nodes()
            .checked_mul(self.columns())?
            .checked_mul(self.times())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes() == 0 || self.columns() == 0 || self.times() == 0
    }

    fn offset(&self, node: usize, column: usize, time: usize) -> Option<usize> {
        if node >= self.nodes() || column >= self.columns() || time >= self.times() {
            return None;
        }
        Some((node * self.columns() + column) * self.times() + time)
    }
}

/// Dense field values in `(node, column, time)` row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldArray {
    shape: FieldShape,
    data: Vec<f64>,
}

impl FieldArray {
    /// Wrap `data` with the given shape.
    pub fn new(shape: FieldShape, data: Vec<f64>) -> AdcircResult<Self> {
        let expected = shape.checked_len().ok_or_else(|| {
            AdcircError::Shape(format!("shape {:?} has too many values", shape.dims()))
        })?;
        if data.len() != expected {
            return Err(AdcircError::Shape(format!(
                "{} values given, shape {:?} holds {}",
                data.len(),
                shape.dims(),
                expected
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    pub fn dims(&self) -> Vec<usize> {
        self.shape.dims()
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Value at `(node, column, time)`. Scalar fields only have column 0.
    pub fn get(&self, node: usize, column: usize, time: usize) -> Option<f64> {
        self.shape
            .offset(node, column, time)
            .map(|offset| self.data[offset])
    }

    /// Value at `(node, time)` of a scalar field.
    pub fn get2(&self, node: usize, time: usize) -> Option<f64> {
        match self.shape {
            FieldShape::Scalar { .. } => self.get(node, 0, time),
            FieldShape::Vector { .. } => None,
        }
    }

    /// Time series of one node and column.
    pub fn node_series(&self, node: usize, column: usize) -> Option<&[f64]> {
        let start = self.shape.offset(node, column, 0)?;
        Some(&self.data[start..start + self.shape.times()])
    }

    /// Values of one column at every node for a single timestep.
    pub fn snapshot(&self, column: usize, time: usize) -> Option<Vec<f64>> {
        (0..self.shape.nodes())
            .map(|node| self.get(node, column, time))
            .collect()
    }

    fn index(&self, node: usize, column: usize, time: usize) -> Option<usize> {
        self.shape.offset(node, column, time)
    }
}

/// Exact-match dry mask over every value of a field.
pub fn compute_dry_mask(values: &[f64], dry_value: f64) -> Vec<bool> {
    values.iter().map(|&v| v == dry_value).collect()
}

/// Dry-cell mask co-returned with a field, same layout as the field data.
#[derive(Debug, Clone, PartialEq)]
pub struct DryMask {
    pub dry_value: f64,
    pub fill_value: f64,
    mask: Vec<bool>,
}

impl DryMask {
    /// Build the mask for `field`.
    pub fn compute(field: &FieldArray, dry_value: f64, fill_value: f64) -> Self {
        Self {
            dry_value,
            fill_value,
            mask: compute_dry_mask(field.as_slice(), dry_value),
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.mask
    }

    /// Number of dry entries.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&dry| dry).count()
    }
}

/// Time-series field read from a data file.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesField {
    pub header: FieldHeader,
    /// Timestep values, in file order
    pub times: Vec<f64>,
    /// Raw values as read
    pub field: FieldArray,
    /// Present when dry masking was requested
    pub mask: Option<DryMask>,
}

impl TimeSeriesField {
    pub fn num_times(&self) -> usize {
        self.times.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.field.shape().nodes()
    }

    pub fn num_columns(&self) -> usize {
        self.field.shape().columns()
    }

    pub fn raw(&self) -> &FieldArray {
        &self.field
    }

    pub fn mask(&self) -> Option<&DryMask> {
        self.mask.as_ref()
    }

    /// Whether `(node, column, time)` is masked dry. Always false without a mask.
    pub fn is_dry(&self, node: usize, column: usize, time: usize) -> bool {
        match (&self.mask, self.field.index(node, column, time)) {
            (Some(mask), Some(i)) => mask.mask[i],
            _ => false,
        }
    }

    /// Value at `(node, column, time)` with dry entries replaced by the fill value.
    pub fn value(&self, node: usize, column: usize, time: usize) -> Option<f64> {
        let raw = self.field.get(node, column, time)?;
        if self.is_dry(node, column, time) {
            self.mask.as_ref().map(|m| m.fill_value)
        } else {
            Some(raw)
        }
    }

    /// Materialize the fill-substituted field. Equals the raw field without a mask.
    pub fn filled(&self) -> FieldArray {
        let Some(mask) = &self.mask else {
            return self.field.clone();
        };
        let data = self
            .field
            .data
            .iter()
            .zip(&mask.mask)
            .map(|(&v, &dry)| if dry { mask.fill_value } else { v })
            .collect();
        FieldArray {
            shape: self.field.shape,
            data,
        }
    }

    /// Number of dry entries, 0 without a mask.
    pub fn dry_count(&self) -> usize {
        self.mask.as_ref().map_or(0, DryMask::count)
    }
}

/// Read a time-series data file.
pub fn read_field(path: impl AsRef<Path>, options: &FieldOptions) -> AdcircResult<TimeSeriesField> {
    options.validate()?;
    let path = path.as_ref();
    info!(path = %path.display(), mask_dry = options.mask_dry_values, "Reading ADCIRC field");
    let mut reader = LineReader::open(path)?;
    parse_field(&mut reader, options)
}

/// Read a time-series data file from any buffered reader.
pub fn read_field_from<R: BufRead>(input: R, options: &FieldOptions) -> AdcircResult<TimeSeriesField> {
    options.validate()?;
    parse_field(&mut LineReader::new(input, READER_PATH), options)
}

fn parse_header<R: BufRead>(reader: &mut LineReader<R>) -> AdcircResult<FieldHeader> {
    let title = reader.title()?;
    let record = reader.record("field header")?;
    record.require(5, "field header (num_times num_nodes float int num_columns)")?;
    Ok(FieldHeader {
        title,
        num_times: record.parse(0, "timestep count")?,
        num_nodes: record.parse(1, "node count")?,
        opaque_float: record.parse(2, "header float")?,
        opaque_int: record.parse(3, "header integer")?,
        num_columns: record.parse(4, "column count")?,
    })
}

fn parse_field<R: BufRead>(
    reader: &mut LineReader<R>,
    options: &FieldOptions,
) -> AdcircResult<TimeSeriesField> {
    let header = parse_header(reader)?;
    debug!(
        num_times = header.num_times,
        num_nodes = header.num_nodes,
        num_columns = header.num_columns,
        opaque_float = header.opaque_float,
        opaque_int = header.opaque_int,
        "Parsed field header"
    );

    let (num_times, num_nodes, num_columns) =
        (header.num_times, header.num_nodes, header.num_columns);
    // Values are staged in file order (time, node, column) and only
    // reordered once every block the header announced has been read.
    let mut times = Vec::with_capacity(initial_capacity(num_times));
    let mut staged = Vec::new();

    for n in 0..num_times {
        let record = reader.record(&format!("timestep {} of {}", n + 1, num_times))?;
        times.push(record.parse::<f64>(0, "time value")?);

        for i in 0..num_nodes {
            let record = reader.record(&format!(
                "node {} of {} in timestep {}",
                i + 1,
                num_nodes,
                n + 1
            ))?;
            record.extend_f64(1, num_columns, &mut staged, "node values")?;
        }
    }

    let mut data = vec![0.0; staged.len()];
    let mut values = staged.into_iter();
    for n in 0..num_times {
        for i in 0..num_nodes {
            for c in 0..num_columns {
                if let Some(value) = values.next() {
                    data[(i * num_columns + c) * num_times + n] = value;
                }
            }
        }
    }

    let field = FieldArray {
        shape: FieldShape::new(num_nodes, num_columns, num_times),
        data,
    };

    let mask = options
        .mask_dry_values
        .then(|| DryMask::compute(&field, options.dry_value, options.fill_value));
    if let Some(mask) = &mask {
        debug!(dry = mask.count(), dry_value = mask.dry_value, "Masked dry values");
    }

    info!(
        times = num_times,
        nodes = num_nodes,
        columns = num_columns,
        "Finished reading ADCIRC field"
    );

    Ok(TimeSeriesField {
        header,
        times,
        field,
        mask,
    })
}
