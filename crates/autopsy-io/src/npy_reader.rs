//! NumPy `.npy` reader
//!
//! Reads a single array into a `HostArray`, keeping its shape and dtype so
//! that the usual shape and type checks apply when it is analyzed. Element
//! order is the file's order; the statistics do not depend on it.

use crate::adapter::{AdapterError, AdapterResult};
use crate::schema::{ElementType, HostArray, HostData};
use npyz::{DType, NpyFile, TypeChar};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Map an npy dtype descriptor onto an element type
pub fn element_type_of(dtype: &DType) -> ElementType {
    let DType::Plain(type_str) = dtype else {
        return ElementType::Unknown;
    };

    match (type_str.type_char(), type_str.size_field()) {
        (TypeChar::Float, 2) => ElementType::Float16,
        (TypeChar::Float, 4) => ElementType::Float32,
        (TypeChar::Float, 8) => ElementType::Float64,
        (TypeChar::Int, 1) => ElementType::Int8,
        (TypeChar::Int, 2) => ElementType::Int16,
        (TypeChar::Int, 4) => ElementType::Int32,
        (TypeChar::Int, 8) => ElementType::Int64,
        (TypeChar::Uint, 1) => ElementType::UInt8,
        (TypeChar::Uint, 2) => ElementType::UInt16,
        (TypeChar::Uint, 4) => ElementType::UInt32,
        (TypeChar::Uint, 8) => ElementType::UInt64,
        (TypeChar::Bool, 1) => ElementType::Bool,
        _ => ElementType::Unknown,
    }
}

/// Read an `.npy` stream into a host array
pub fn read_npy<R: Read>(reader: R) -> AdapterResult<HostArray> {
    let npy = NpyFile::new(reader).map_err(|e| AdapterError::InvalidFormat(e.to_string()))?;

    let shape = npy
        .shape()
        .iter()
        .map(|&dim| {
            usize::try_from(dim).map_err(|_| {
                AdapterError::InvalidFormat(format!("Dimension {} does not fit in memory", dim))
            })
        })
        .collect::<AdapterResult<Vec<usize>>>()?;

    let element_type = element_type_of(&npy.dtype());
    let data = match element_type {
        ElementType::Float32 => HostData::Float32(npy.into_vec().map_err(read_failed)?),
        ElementType::Float64 => HostData::Float64(npy.into_vec().map_err(read_failed)?),
        ElementType::Int32 => HostData::Int32(npy.into_vec().map_err(read_failed)?),
        ElementType::Int64 => HostData::Int64(npy.into_vec().map_err(read_failed)?),
        ElementType::UInt8 => HostData::UInt8(npy.into_vec().map_err(read_failed)?),
        ElementType::Bool => HostData::Bool(npy.into_vec().map_err(read_failed)?),
        other => {
            return Err(AdapterError::UnsupportedDtype {
                dtype: other.name().to_string(),
            })
        }
    };

    HostArray::new(shape, data)
}

/// Open an `.npy` file
pub fn open_npy(path: impl AsRef<Path>) -> AdapterResult<HostArray> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AdapterError::Io(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path).map_err(|e| AdapterError::Io(e.to_string()))?;
    read_npy(BufReader::new(file))
}

fn read_failed(e: std::io::Error) -> AdapterError {
    AdapterError::Io(e.to_string())
}
