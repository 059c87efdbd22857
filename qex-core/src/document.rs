//! Documentos de ensemble (JSON / TOML)
//!
//! File format consumed by the `qex` CLI. Complex entries are written either
//! as a plain real number or as a `[re, im]` pair.
//!
//! ```toml
//! probabilities = [0.5, 0.5]
//!
//! [[states]]
//! bell = 0
//!
//! [[states]]
//! vector = [[0.6, 0.0], [0.0, 0.8]]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StateDefect, StateError, StateResult};
use crate::linalg::{c, C64, CMatrix, CVector};
use crate::state::StateInput;
use crate::states::{basis, BellState};

/// Entrada complexa serializada
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Real(f64),
    Complex(C64),
}

impl From<Entry> for C64 {
    fn from(e: Entry) -> Self {
        match e {
            Entry::Real(re) => c(re, 0.0),
            Entry::Complex(z) => z,
        }
    }
}

/// Um estado no documento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateRecord {
    /// Vetor de estado
    Vector(Vec<Entry>),
    /// Matriz densidade, linha por linha
    Matrix(Vec<Vec<Entry>>),
    /// Estado de Bell pelo índice 0..=3
    Bell(usize),
    /// |index⟩ em dimensão dim
    Basis { dim: usize, index: usize },
}

impl StateRecord {
    /// Converte para entrada de estado (sem validar as propriedades físicas)
    pub fn to_input(&self) -> StateResult<StateInput> {
        match self {
            StateRecord::Vector(entries) => Ok(StateInput::FromVector(to_vector(entries))),
            StateRecord::Matrix(rows) => {
                let n = rows.len();
                if let Some(row) = rows.iter().find(|r| r.len() != n) {
                    return Err(StateError::state(StateDefect::NotSquare {
                        rows: n,
                        cols: row.len(),
                    }));
                }
                let flat: Vec<C64> = rows.iter().flatten().map(|&e| e.into()).collect();
                Ok(StateInput::FromMatrix(CMatrix::from_row_slice(n, n, &flat)))
            }
            StateRecord::Bell(index) => BellState::from_index(*index)
                .map(|b| StateInput::FromVector(b.vector()))
                .ok_or_else(|| StateError::Document(format!("bell index {index} out of range 0..=3"))),
            StateRecord::Basis { dim, index } => {
                if index >= dim {
                    return Err(StateError::Document(format!(
                        "basis index {index} out of range for dimension {dim}"
                    )));
                }
                Ok(StateInput::FromVector(basis(*dim, *index)))
            }
        }
    }
}

fn to_vector(entries: &[Entry]) -> CVector {
    CVector::from_iterator(entries.len(), entries.iter().map(|&e| e.into()))
}

/// Ensemble serializado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleDocument {
    pub states: Vec<StateRecord>,
    /// Omitted ⇒ uniform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<f64>>,
    /// Dimensões locais (d_A, d_B) para o rank de Schmidt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dims: Option<[usize; 2]>,
}

impl EnsembleDocument {
    pub fn from_json_str(content: &str) -> StateResult<Self> {
        serde_json::from_str(content).map_err(|e| StateError::Document(e.to_string()))
    }

    pub fn from_toml_str(content: &str) -> StateResult<Self> {
        toml::from_str(content).map_err(|e| StateError::Document(e.to_string()))
    }

    /// Lê `.toml` ou JSON (qualquer outra extensão)
    pub fn load(path: &Path) -> StateResult<Self> {
        let content = read(path)?;
        if is_toml(path) {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Entradas na ordem do documento, com o índice em caso de erro
    pub fn inputs(&self) -> StateResult<Vec<StateInput>> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, record)| record.to_input().map_err(|e| e.at(i)))
            .collect()
    }
}

/// Bases serializadas para a checagem de MUB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasesDocument {
    pub bases: Vec<Vec<Vec<Entry>>>,
}

impl BasesDocument {
    pub fn from_json_str(content: &str) -> StateResult<Self> {
        serde_json::from_str(content).map_err(|e| StateError::Document(e.to_string()))
    }

    pub fn from_toml_str(content: &str) -> StateResult<Self> {
        toml::from_str(content).map_err(|e| StateError::Document(e.to_string()))
    }

    pub fn load(path: &Path) -> StateResult<Self> {
        let content = read(path)?;
        if is_toml(path) {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn vectors(&self) -> Vec<Vec<CVector>> {
        self.bases
            .iter()
            .map(|group| group.iter().map(|v| to_vector(v)).collect())
            .collect()
    }
}

fn read(path: &Path) -> StateResult<String> {
    fs::read_to_string(path)
        .map_err(|e| StateError::Document(format!("cannot read {}: {e}", path.display())))
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
