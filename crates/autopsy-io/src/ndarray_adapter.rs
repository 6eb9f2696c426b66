//! `ArrayAdapter` for ndarray arrays and views
//!
//! Any `ArrayBase` with a supported element type is accepted. Contiguous
//! one-dimensional arrays are borrowed directly; strided or reversed views
//! are gathered into an owned buffer in logical order.

use crate::adapter::{validate_one_dimensional, AdapterError, AdapterResult, ArrayAdapter, FloatView};
use crate::schema::ElementType;
use ndarray::{ArrayBase, Data, Dimension};
use std::borrow::Cow;

/// Element types an ndarray array may carry at the boundary
///
/// Only the float widths convert to a view; the rest exist so that integer
/// and boolean arrays are rejected with a type error instead of failing to
/// compile.
pub trait AdapterElement: Clone + 'static {
    /// Element type tag
    const ELEMENT_TYPE: ElementType;

    /// Wrap the values in a float view, if this is a float width
    fn into_view(values: Cow<'_, [Self]>) -> Option<FloatView<'_>>;
}

impl AdapterElement for f32 {
    const ELEMENT_TYPE: ElementType = ElementType::Float32;

    fn into_view(values: Cow<'_, [Self]>) -> Option<FloatView<'_>> {
        Some(FloatView::F32(values))
    }
}

impl AdapterElement for f64 {
    const ELEMENT_TYPE: ElementType = ElementType::Float64;

    fn into_view(values: Cow<'_, [Self]>) -> Option<FloatView<'_>> {
        Some(FloatView::F64(values))
    }
}

macro_rules! non_float_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl AdapterElement for $ty {
                const ELEMENT_TYPE: ElementType = ElementType::$tag;

                fn into_view(_values: Cow<'_, [Self]>) -> Option<FloatView<'_>> {
                    None
                }
            }
        )*
    };
}

non_float_element! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    bool => Bool,
}

impl<A, S, D> ArrayAdapter for ArrayBase<S, D>
where
    A: AdapterElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn shape(&self) -> &[usize] {
        ArrayBase::shape(self)
    }

    fn element_type(&self) -> ElementType {
        A::ELEMENT_TYPE
    }

    fn float_view(&self) -> AdapterResult<FloatView<'_>> {
        validate_one_dimensional(ArrayBase::shape(self))?;

        let values = match self.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().cloned().collect()),
        };

        A::into_view(values).ok_or_else(|| AdapterError::UnsupportedDtype {
            dtype: A::ELEMENT_TYPE.name().to_string(),
        })
    }
}
