#![forbid(unsafe_code)]

use crate::value::{ArrayData, ScalarType, Value};
use std::sync::Arc;

/// A typed, read-only, randomly addressable sequence of scalar values.
///
/// A column is an immutable value object: cloning is cheap (storage is
/// `Arc`-shared) and all derived columns — [`Column::window`] sub-ranges and
/// [`Column::view`] permutations — alias the parent's storage rather than
/// copying it. The parent storage stays alive for as long as any derived
/// column does.
///
/// The declared [`ScalarType`] may differ from the storage kind; reads then
/// coerce lazily (numeric columns parse string storage on access, string
/// columns render numeric storage). See [`Value`] for the coercion rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    ty: ScalarType,
    row_count: usize,
    repr: Repr,
}

/// Closed set of storage strategies. Dispatch is a plain `match`; the set is
/// exhaustive-checked rather than open-ended.
#[derive(Debug, Clone, PartialEq)]
enum Repr {
    /// One logical value repeated `row_count` times; O(1) space.
    Const { value: Value, defined: bool },
    /// Directly indexed backing storage (packed numeric buffers or a string
    /// indirection array).
    Array(ArrayData),
    /// Contiguous sub-range `[start, start + row_count)` of a parent column.
    Window { parent: Arc<Column>, start: usize },
    /// Explicit index gather over a parent column; indices may repeat and
    /// need not be monotonic.
    View {
        parent: Arc<Column>,
        index_map: Arc<Vec<u32>>,
    },
}

impl Column {
    /// A column whose every row is `value`, coerced once to `ty`.
    pub fn of_const(value: impl Into<Value>, row_count: usize, ty: ScalarType) -> Column {
        let value = value.into().coerce(ty);
        let defined = !value.is_null();
        Column {
            ty,
            row_count,
            repr: Repr::Const { value, defined },
        }
    }

    /// A constant column whose rows are all undefined.
    pub fn undefined(row_count: usize, ty: ScalarType) -> Column {
        Column {
            ty,
            row_count,
            repr: Repr::Const {
                value: Value::Null,
                defined: false,
            },
        }
    }

    /// Wrap backing storage directly; `row_count` is the storage length.
    ///
    /// If the storage kind differs from `ty`, values are coerced on every
    /// read rather than up front.
    pub fn of_array(data: impl Into<ArrayData>, ty: ScalarType) -> Column {
        let data = data.into();
        Column {
            ty,
            row_count: data.len(),
            repr: Repr::Array(data),
        }
    }

    pub fn of_int_array(values: Vec<i64>) -> Column {
        Column::of_array(values, ScalarType::Int)
    }

    pub fn of_float_array(values: Vec<f64>) -> Column {
        Column::of_array(values, ScalarType::Float)
    }

    pub fn of_str_array(values: Vec<Arc<str>>) -> Column {
        Column::of_array(values, ScalarType::Str)
    }

    /// Contiguous sub-range view `[start, end)` sharing the parent's storage.
    ///
    /// Panics if `start > end` or `end > column.row_count()` — out-of-range
    /// windows are contract violations, never clamped.
    pub fn window(column: &Column, start: usize, end: usize) -> Column {
        assert!(
            start <= end && end <= column.row_count,
            "column window [{start}, {end}) out of range for {} rows",
            column.row_count
        );
        let row_count = end - start;
        let repr = match &column.repr {
            // A window of a constant is just a shorter constant.
            Repr::Const { value, defined } => Repr::Const {
                value: value.clone(),
                defined: *defined,
            },
            // Collapse nested windows so deep slicing stays one hop per read.
            Repr::Window {
                parent,
                start: parent_start,
            } => Repr::Window {
                parent: parent.clone(),
                start: parent_start + start,
            },
            _ => Repr::Window {
                parent: Arc::new(column.clone()),
                start,
            },
        };
        Column {
            ty: column.ty,
            row_count,
            repr,
        }
    }

    /// Gather-style reordering/selection via an explicit index mapping.
    ///
    /// `value(i)` reads `column.value(index_map[i])`; indices may repeat or
    /// skip rows arbitrarily. The mapping itself is shared, so sorting a
    /// table reuses one permutation across all of its columns.
    pub fn view(column: &Column, index_map: impl Into<Arc<Vec<u32>>>) -> Column {
        let index_map = index_map.into();
        debug_assert!(
            index_map
                .iter()
                .all(|&i| (i as usize) < column.row_count),
            "view index map references rows outside the parent column"
        );
        Column {
            ty: column.ty,
            row_count: index_map.len(),
            repr: Repr::View {
                parent: Arc::new(column.clone()),
                index_map,
            },
        }
    }

    pub fn ty(&self) -> ScalarType {
        self.ty
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// The value at `row`, coerced to this column's declared type.
    pub fn value(&self, row: usize) -> Value {
        debug_assert!(row < self.row_count, "column row {row} out of range");
        match &self.repr {
            Repr::Const { value, .. } => value.clone(),
            Repr::Array(data) => {
                let raw = data.get(row);
                if data.kind() == self.ty {
                    raw
                } else {
                    raw.coerce(self.ty)
                }
            }
            Repr::Window { parent, start } => parent.value(start + row),
            Repr::View { parent, index_map } => parent.value(index_map[row] as usize),
        }
    }

    /// Integer read with a fast path for packed int storage.
    pub fn int(&self, row: usize) -> i64 {
        match &self.repr {
            Repr::Array(ArrayData::Int(buf)) => buf[row],
            Repr::Window { parent, start } => parent.int(start + row),
            Repr::View { parent, index_map } => parent.int(index_map[row] as usize),
            _ => self.value(row).as_int(),
        }
    }

    /// Float read with a fast path for packed numeric storage.
    pub fn float(&self, row: usize) -> f64 {
        match &self.repr {
            Repr::Array(ArrayData::Float(buf)) => buf[row],
            Repr::Array(ArrayData::Int(buf)) => buf[row] as f64,
            Repr::Window { parent, start } => parent.float(start + row),
            Repr::View { parent, index_map } => parent.float(index_map[row] as usize),
            _ => self.value(row).as_float(),
        }
    }

    /// String read; numeric storage renders with default formatting.
    pub fn str(&self, row: usize) -> Arc<str> {
        match &self.repr {
            Repr::Array(ArrayData::Str(buf)) => buf[row].clone(),
            Repr::Window { parent, start } => parent.str(start + row),
            Repr::View { parent, index_map } => parent.str(index_map[row] as usize),
            _ => self.value(row).as_str(),
        }
    }

    /// Whether the row holds a defined value.
    ///
    /// Array-backed storage has no undefined slots, so this is only `false`
    /// for columns built via [`Column::undefined`] (and derived views of
    /// them).
    pub fn is_defined(&self, row: usize) -> bool {
        match &self.repr {
            Repr::Const { defined, .. } => *defined,
            Repr::Array(_) => true,
            Repr::Window { parent, start } => parent.is_defined(start + row),
            Repr::View { parent, index_map } => parent.is_defined(index_map[row] as usize),
        }
    }

    /// Materialize every row, in order, through `f`.
    ///
    /// This is the generic reduction primitive the other materializers build
    /// on.
    pub fn map_to_array<T>(&self, mut f: impl FnMut(Value) -> T) -> Vec<T> {
        (0..self.row_count).map(|row| f(self.value(row))).collect()
    }

    /// All rows as coerced [`Value`]s.
    pub fn to_values(&self) -> Vec<Value> {
        self.map_to_array(|v| v)
    }

    /// All rows as a packed int buffer.
    ///
    /// When this column is directly backed by packed int storage (no window,
    /// no coercion pending) the shared buffer itself is returned — an
    /// explicit no-copy branch, observable via `Arc::ptr_eq`. Every other
    /// variant materializes a fresh buffer.
    pub fn to_int_array(&self) -> Arc<Vec<i64>> {
        if self.ty == ScalarType::Int {
            if let Repr::Array(ArrayData::Int(buf)) = &self.repr {
                return buf.clone();
            }
        }
        Arc::new((0..self.row_count).map(|row| self.int(row)).collect())
    }

    /// All rows as a packed float buffer; same no-copy fast path as
    /// [`Column::to_int_array`].
    pub fn to_float_array(&self) -> Arc<Vec<f64>> {
        if self.ty == ScalarType::Float {
            if let Repr::Array(ArrayData::Float(buf)) = &self.repr {
                return buf.clone();
            }
        }
        Arc::new((0..self.row_count).map(|row| self.float(row)).collect())
    }

    /// All rows as a shared string array; same no-copy fast path as
    /// [`Column::to_int_array`].
    pub fn to_str_array(&self) -> Arc<Vec<Arc<str>>> {
        if self.ty == ScalarType::Str {
            if let Repr::Array(ArrayData::Str(buf)) = &self.repr {
                return buf.clone();
            }
        }
        Arc::new((0..self.row_count).map(|row| self.str(row)).collect())
    }

    /// Element-wise equality of two columns (type, length, every row).
    ///
    /// Float comparison follows IEEE semantics, so columns containing `NaN`
    /// never compare equal.
    pub fn are_equal(a: &Column, b: &Column) -> bool {
        a.ty == b.ty
            && a.row_count == b.row_count
            && (0..a.row_count).all(|row| a.value(row) == b.value(row))
    }

    /// Row indices whose value satisfies `predicate`, in row order.
    pub fn indices_of(column: &Column, mut predicate: impl FnMut(&Value) -> bool) -> Vec<u32> {
        (0..column.row_count)
            .filter(|&row| predicate(&column.value(row)))
            .map(|row| row as u32)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_windows_collapse_to_one_hop() {
        let col = Column::of_int_array(vec![1, 2, 3, 4, 5, 6]);
        let w1 = Column::window(&col, 1, 6);
        let w2 = Column::window(&w1, 1, 4);
        match &w2.repr {
            Repr::Window { parent, start } => {
                assert_eq!(*start, 2);
                assert!(matches!(parent.repr, Repr::Array(_)));
            }
            other => panic!("expected a window repr, got {other:?}"),
        }
        assert_eq!(
            w2.to_values(),
            vec![Value::Int(3), Value::Int(4), Value::Int(5)]
        );
    }

    #[test]
    fn window_of_const_stays_const() {
        let col = Column::of_const(7i64, 10, ScalarType::Int);
        let w = Column::window(&col, 2, 5);
        assert!(matches!(w.repr, Repr::Const { .. }));
        assert_eq!(w.row_count(), 3);
        assert_eq!(w.value(0), Value::Int(7));
    }

    #[test]
    fn to_int_array_fast_path_shares_the_buffer() {
        let col = Column::of_int_array(vec![1, 2, 3]);
        let a = col.to_int_array();
        let b = col.to_int_array();
        assert!(Arc::ptr_eq(&a, &b));

        // A window must materialize: it covers a sub-range of the buffer.
        let w = Column::window(&col, 0, 2);
        let c = w.to_int_array();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(*c, vec![1, 2]);
    }

    #[test]
    fn coerced_column_never_returns_the_raw_buffer() {
        // Str-typed column over int storage: the fast path must not fire.
        let col = Column::of_array(vec![1i64, 2], ScalarType::Str);
        assert_eq!(col.value(0), Value::from("1"));
        let strs = col.to_str_array();
        assert_eq!(&*strs[1], "2");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn window_bounds_are_enforced() {
        let col = Column::of_int_array(vec![1, 2, 3]);
        let _ = Column::window(&col, 2, 4);
    }

    #[test]
    fn undefined_const_reads_as_null() {
        let col = Column::undefined(3, ScalarType::Float);
        assert!(!col.is_defined(1));
        assert!(col.float(1).is_nan());
        assert_eq!(col.value(2), Value::Null);
    }
}
