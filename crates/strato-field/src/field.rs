//! The [`Field`] handle: identifier, provenance, and a data buffer.

use crate::identifier::{DataType, FieldIdentifier};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Monotonically increasing simulation time, used as field provenance.
///
/// A field's timestamp records when its buffer was last written, letting
/// downstream consumers detect stale inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeStamp(pub u64);

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TimeStamp {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Errors from field construction and elementwise kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Two operands of an elementwise operation have different layouts.
    LayoutMismatch {
        /// Name of the first field.
        field_1: String,
        /// Layout string of the first field.
        layout_1: String,
        /// Name of the second field.
        field_2: String,
        /// Layout string of the second field.
        layout_2: String,
    },
    /// Two operands of an elementwise operation have different datatypes.
    DataTypeMismatch {
        /// Name of the first field.
        field_1: String,
        /// Datatype of the first field.
        type_1: DataType,
        /// Name of the second field.
        field_2: String,
        /// Datatype of the second field.
        type_2: DataType,
    },
    /// A field was accessed through the wrong datatype view.
    WrongDataType {
        /// The field name.
        field: String,
        /// The datatype the access expected.
        expected: DataType,
        /// The field's actual datatype.
        actual: DataType,
    },
    /// A bulk write supplied the wrong number of entries.
    SizeMismatch {
        /// The field name.
        field: String,
        /// The layout size the field requires.
        expected: usize,
        /// The number of entries supplied.
        actual: usize,
    },
    /// An elementwise kernel was invoked on a datatype it does not support.
    UnsupportedDataType {
        /// The field name.
        field: String,
        /// The kernel name.
        operation: &'static str,
        /// The field's datatype.
        data_type: DataType,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayoutMismatch {
                field_1,
                layout_1,
                field_2,
                layout_2,
            } => write!(
                f,
                "layout mismatch: field '{field_1}' has layout {layout_1}, \
                 field '{field_2}' has layout {layout_2}"
            ),
            Self::DataTypeMismatch {
                field_1,
                type_1,
                field_2,
                type_2,
            } => write!(
                f,
                "datatype mismatch: field '{field_1}' is {type_1}, \
                 field '{field_2}' is {type_2}"
            ),
            Self::WrongDataType {
                field,
                expected,
                actual,
            } => write!(
                f,
                "field '{field}' accessed as {expected} but stores {actual}"
            ),
            Self::SizeMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "field '{field}' requires {expected} entries, got {actual}"
            ),
            Self::UnsupportedDataType {
                field,
                operation,
                data_type,
            } => write!(
                f,
                "kernel '{operation}' does not support {data_type} field '{field}'"
            ),
        }
    }
}

impl std::error::Error for FieldError {}

/// Backing storage for one field, matching its [`DataType`].
#[derive(Clone, Debug)]
enum FieldBuffer {
    Real(Vec<f64>),
    Int(Vec<i64>),
}

impl FieldBuffer {
    fn as_real(&self) -> Option<&[f64]> {
        match self {
            Self::Real(v) => Some(v),
            Self::Int(_) => None,
        }
    }

    fn as_real_mut(&mut self) -> Option<&mut [f64]> {
        match self {
            Self::Real(v) => Some(v),
            Self::Int(_) => None,
        }
    }
}

#[derive(Debug)]
struct FieldData {
    buffer: FieldBuffer,
    last_update: Option<TimeStamp>,
}

/// A named physical quantity backed by numeric storage.
///
/// `Field` is a cheap-to-clone handle: clones share the same buffer.
/// This is how ownership splits in the framework: a diagnostic holds
/// its input fields as shared handles (the upstream producer owns the
/// data and rewrites it between computes), while the output field it
/// materializes is held only by the diagnostic and its ledger.
///
/// Storage is allocated at construction, sized by the identifier's
/// layout, zero-initialized. Two fields compare equal iff their
/// identifiers are equal.
///
/// The elementwise kernels (`update`, `scale`, `scale_inv`, and their
/// field-operand variants) require both operands to share the same
/// layout and datatype and operate in place on `self`. They are defined
/// for [`DataType::Real`] storage; invoking one on an `Int` field yields
/// a descriptive [`FieldError::UnsupportedDataType`].
#[derive(Clone, Debug)]
pub struct Field {
    id: FieldIdentifier,
    data_type: DataType,
    data: Arc<RwLock<FieldData>>,
}

impl Field {
    /// Allocate a `Real` field for the given identifier.
    pub fn new(id: FieldIdentifier) -> Self {
        Self::with_data_type(id, DataType::Real)
    }

    /// Allocate a field with an explicit datatype.
    pub fn with_data_type(id: FieldIdentifier, data_type: DataType) -> Self {
        let size = id.layout().size();
        let buffer = match data_type {
            DataType::Real => FieldBuffer::Real(vec![0.0; size]),
            DataType::Int => FieldBuffer::Int(vec![0; size]),
        };
        Self {
            id,
            data_type,
            data: Arc::new(RwLock::new(FieldData {
                buffer,
                last_update: None,
            })),
        }
    }

    /// The field's identifier.
    pub fn identifier(&self) -> &FieldIdentifier {
        &self.id
    }

    /// The field's name (shorthand for `identifier().name()`).
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// The field's storage datatype.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// When the buffer was last written, if ever.
    pub fn last_update(&self) -> Option<TimeStamp> {
        self.read_data().last_update
    }

    /// Record that the buffer was written at `timestamp`.
    pub fn stamp(&self, timestamp: TimeStamp) {
        self.write_data().last_update = Some(timestamp);
    }

    /// Snapshot of the `Real` buffer.
    pub fn values(&self) -> Result<Vec<f64>, FieldError> {
        self.read_data()
            .buffer
            .as_real()
            .map(<[f64]>::to_vec)
            .ok_or_else(|| self.wrong_data_type(DataType::Real))
    }

    /// Snapshot of the `Int` buffer.
    pub fn int_values(&self) -> Result<Vec<i64>, FieldError> {
        match &self.read_data().buffer {
            FieldBuffer::Int(v) => Ok(v.clone()),
            FieldBuffer::Real(_) => Err(self.wrong_data_type(DataType::Int)),
        }
    }

    /// Overwrite the `Real` buffer with the given entries.
    pub fn set_values(&self, values: &[f64]) -> Result<(), FieldError> {
        let expected = self.id.layout().size();
        if values.len() != expected {
            return Err(FieldError::SizeMismatch {
                field: self.name().to_string(),
                expected,
                actual: values.len(),
            });
        }
        let mut data = self.write_data();
        let buf = buffer_as_real_mut(&mut data.buffer, self, "set_values")?;
        buf.copy_from_slice(values);
        Ok(())
    }

    /// Set every entry of the `Real` buffer to `value`.
    pub fn fill(&self, value: f64) -> Result<(), FieldError> {
        let mut data = self.write_data();
        let buf = buffer_as_real_mut(&mut data.buffer, self, "fill")?;
        buf.fill(value);
        Ok(())
    }

    /// Copy another field's buffer into this one.
    ///
    /// Both fields must have equal layouts and datatypes. The copy goes
    /// into this field's own allocation; the two buffers never alias.
    pub fn deep_copy_from(&self, src: &Field) -> Result<(), FieldError> {
        self.check_operand(src)?;
        if Arc::ptr_eq(&self.data, &src.data) {
            return Ok(());
        }
        let src_data = src.read_data();
        let mut dst_data = self.write_data();
        match (&mut dst_data.buffer, &src_data.buffer) {
            (FieldBuffer::Real(dst), FieldBuffer::Real(src)) => dst.copy_from_slice(src),
            (FieldBuffer::Int(dst), FieldBuffer::Int(src)) => dst.copy_from_slice(src),
            // check_operand has already rejected mixed datatypes.
            _ => {}
        }
        Ok(())
    }

    /// Scaled elementwise add: `self[i] = alpha * x[i] + beta * self[i]`.
    ///
    /// With `alpha = ±1, beta = 1` this is elementwise add/subtract.
    pub fn update(&self, x: &Field, alpha: f64, beta: f64) -> Result<(), FieldError> {
        self.check_operand(x)?;
        if Arc::ptr_eq(&self.data, &x.data) {
            let mut data = self.write_data();
            let buf = buffer_as_real_mut(&mut data.buffer, self, "update")?;
            for y in buf.iter_mut() {
                *y = (alpha + beta) * *y;
            }
            return Ok(());
        }
        let x_data = x.read_data();
        let x_buf = buffer_as_real(&x_data.buffer, x, "update")?;
        let mut data = self.write_data();
        let buf = buffer_as_real_mut(&mut data.buffer, self, "update")?;
        for (y, &xv) in buf.iter_mut().zip(x_buf.iter()) {
            *y = alpha * xv + beta * *y;
        }
        Ok(())
    }

    /// Multiply every entry by a scalar factor.
    pub fn scale(&self, factor: f64) -> Result<(), FieldError> {
        let mut data = self.write_data();
        let buf = buffer_as_real_mut(&mut data.buffer, self, "scale")?;
        for y in buf.iter_mut() {
            *y *= factor;
        }
        Ok(())
    }

    /// Divide every entry by a scalar factor.
    pub fn scale_inv(&self, factor: f64) -> Result<(), FieldError> {
        let mut data = self.write_data();
        let buf = buffer_as_real_mut(&mut data.buffer, self, "scale_inv")?;
        for y in buf.iter_mut() {
            *y /= factor;
        }
        Ok(())
    }

    /// Elementwise multiply: `self[i] *= x[i]`.
    pub fn scale_by(&self, x: &Field) -> Result<(), FieldError> {
        self.check_operand(x)?;
        if Arc::ptr_eq(&self.data, &x.data) {
            let mut data = self.write_data();
            let buf = buffer_as_real_mut(&mut data.buffer, self, "scale_by")?;
            for y in buf.iter_mut() {
                *y *= *y;
            }
            return Ok(());
        }
        let x_data = x.read_data();
        let x_buf = buffer_as_real(&x_data.buffer, x, "scale_by")?;
        let mut data = self.write_data();
        let buf = buffer_as_real_mut(&mut data.buffer, self, "scale_by")?;
        for (y, &xv) in buf.iter_mut().zip(x_buf.iter()) {
            *y *= xv;
        }
        Ok(())
    }

    /// Elementwise divide: `self[i] /= x[i]`.
    pub fn scale_inv_by(&self, x: &Field) -> Result<(), FieldError> {
        self.check_operand(x)?;
        if Arc::ptr_eq(&self.data, &x.data) {
            let mut data = self.write_data();
            let buf = buffer_as_real_mut(&mut data.buffer, self, "scale_inv_by")?;
            for y in buf.iter_mut() {
                *y /= *y;
            }
            return Ok(());
        }
        let x_data = x.read_data();
        let x_buf = buffer_as_real(&x_data.buffer, x, "scale_inv_by")?;
        let mut data = self.write_data();
        let buf = buffer_as_real_mut(&mut data.buffer, self, "scale_inv_by")?;
        for (y, &xv) in buf.iter_mut().zip(x_buf.iter()) {
            *y /= xv;
        }
        Ok(())
    }

    /// Validate that `other` lines up with `self` for an elementwise
    /// operation: equal layout, equal datatype.
    fn check_operand(&self, other: &Field) -> Result<(), FieldError> {
        if self.id.layout() != other.id.layout() {
            return Err(FieldError::LayoutMismatch {
                field_1: self.name().to_string(),
                layout_1: self.id.layout().to_string(),
                field_2: other.name().to_string(),
                layout_2: other.id.layout().to_string(),
            });
        }
        if self.data_type != other.data_type {
            return Err(FieldError::DataTypeMismatch {
                field_1: self.name().to_string(),
                type_1: self.data_type,
                field_2: other.name().to_string(),
                type_2: other.data_type,
            });
        }
        Ok(())
    }

    fn wrong_data_type(&self, expected: DataType) -> FieldError {
        FieldError::WrongDataType {
            field: self.name().to_string(),
            expected,
            actual: self.data_type,
        }
    }

    fn read_data(&self) -> RwLockReadGuard<'_, FieldData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_data(&self) -> RwLockWriteGuard<'_, FieldData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn buffer_as_real<'a>(
    buffer: &'a FieldBuffer,
    field: &Field,
    operation: &'static str,
) -> Result<&'a [f64], FieldError> {
    buffer
        .as_real()
        .ok_or_else(|| FieldError::UnsupportedDataType {
            field: field.name().to_string(),
            operation,
            data_type: field.data_type(),
        })
}

fn buffer_as_real_mut<'a>(
    buffer: &'a mut FieldBuffer,
    field: &Field,
    operation: &'static str,
) -> Result<&'a mut [f64], FieldError> {
    buffer
        .as_real_mut()
        .ok_or_else(|| FieldError::UnsupportedDataType {
            field: field.name().to_string(),
            operation,
            data_type: field.data_type(),
        })
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Field {}
