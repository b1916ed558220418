use crate::{Block, Matrix, Permutation, Vector};

use serde::ser::SerializeStruct;
use serde::Deserialize;

// Vectors and matrices are serialized densely; strides and offsets into a
// shared block are not preserved.

impl<T> serde::Serialize for Block<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Block", 1)?;
        state.serialize_field("data", self.as_slice())?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for Block<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BlockData<T> {
            data: Vec<T>,
        }

        let BlockData { data } = BlockData::deserialize(deserializer)?;
        Block::from_vec(data).map_err(serde::de::Error::custom)
    }
}

impl<T> serde::Serialize for Vector<T>
where
    T: serde::Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Vector", 1)?;
        state.serialize_field("data", &self.to_vec())?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for Vector<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct VectorData<T> {
            data: Vec<T>,
        }

        let VectorData { data } = VectorData::deserialize(deserializer)?;
        Vector::from_vec(data).map_err(serde::de::Error::custom)
    }
}

impl<T> serde::Serialize for Matrix<T>
where
    T: serde::Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Matrix", 3)?;
        state.serialize_field("data", &self.to_vec())?;
        state.serialize_field("rows", &self.size1())?;
        state.serialize_field("cols", &self.size2())?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for Matrix<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MatrixData<T> {
            data: Vec<T>,
            rows: usize,
            cols: usize,
        }

        let MatrixData { data, rows, cols } = MatrixData::deserialize(deserializer)?;
        Matrix::from_vec(rows, cols, data).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Permutation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Permutation", 1)?;
        state.serialize_field("data", self.as_slice())?;
        state.end()
    }
}

impl<'de> serde::Deserialize<'de> for Permutation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PermutationData {
            data: Vec<usize>,
        }

        let PermutationData { data } = PermutationData::deserialize(deserializer)?;
        Permutation::from_vec(data).map_err(serde::de::Error::custom)
    }
}
