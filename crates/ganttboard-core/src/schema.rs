//! Column alias resolution.
//!
//! Input spreadsheets name their columns freely ("Fecha Inicio", "start
//! date", "Etapa", ...). This module maps those names onto the fixed
//! canonical schema with a priority-ordered exact-match scan over the alias
//! table carried by [`CanonicalField`].
//!
//! Resolution is all-or-nothing: a mapping with any unresolved field is a
//! terminal configuration error ([`SchemaError::Unresolved`]) that names
//! exactly the fields that could not be found. There is no fuzzy matching
//! and no partial recovery.

use serde::Serialize;
use thiserror::Error;

use crate::CanonicalField;

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a raw column name for comparison: trim surrounding whitespace,
/// lowercase, and turn embedded newlines/tabs into single spaces.
pub fn normalize_column(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace('\n', " ")
        .replace('\t', " ")
}

// ============================================================================
// Column Mapping
// ============================================================================

/// A canonical field resolved to a concrete input column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    /// Normalized name of the matched column
    pub column: String,
    /// Position of that column in the header row
    pub index: usize,
}

/// The resolved correspondence from each canonical field to an input column.
///
/// Computed once per loaded table and cached for its lifetime; filtering and
/// re-rendering never need to resolve again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMapping {
    normalized_columns: Vec<String>,
    resolved: [Option<ResolvedColumn>; CanonicalField::ALL.len()],
}

impl ColumnMapping {
    /// Resolve the canonical schema against a raw header row.
    ///
    /// For each canonical field the alias list is scanned in priority order
    /// (the order in the alias table, not the order columns appear in the
    /// file) and the first alias present among the normalized column names
    /// wins. Comparison is exact string equality after normalization.
    pub fn resolve(columns: &[String]) -> Self {
        let normalized_columns: Vec<String> =
            columns.iter().map(|c| normalize_column(c)).collect();

        let resolved = CanonicalField::ALL.map(|field| {
            field.aliases().iter().find_map(|alias| {
                normalized_columns
                    .iter()
                    .position(|col| col == alias)
                    .map(|index| ResolvedColumn {
                        column: normalized_columns[index].clone(),
                        index,
                    })
            })
        });

        for (field, slot) in CanonicalField::ALL.iter().zip(&resolved) {
            match slot {
                Some(r) => tracing::debug!(field = field.as_str(), column = %r.column, "column resolved"),
                None => tracing::debug!(field = field.as_str(), "column unresolved"),
            }
        }

        Self {
            normalized_columns,
            resolved,
        }
    }

    /// The full normalized header row, for the debug view.
    pub fn normalized_columns(&self) -> &[String] {
        &self.normalized_columns
    }

    /// The resolved column for a field, if any.
    pub fn get(&self, field: CanonicalField) -> Option<&ResolvedColumn> {
        let slot = CanonicalField::ALL.iter().position(|f| *f == field);
        slot.and_then(|i| self.resolved[i].as_ref())
    }

    /// Canonical fields that no input column satisfies, in schema order.
    pub fn missing(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .zip(&self.resolved)
            .filter(|(_, slot)| slot.is_none())
            .map(|(field, _)| *field)
            .collect()
    }

    /// Fail unless every canonical field resolved.
    ///
    /// The error enumerates exactly the missing fields; callers are expected
    /// to halt the pipeline on it rather than retry.
    pub fn require_complete(&self) -> Result<(), SchemaError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Unresolved(missing))
        }
    }

    /// Diagnostic payload for the optional debug display.
    pub fn diagnostics(&self) -> SchemaDiagnostics {
        SchemaDiagnostics {
            normalized_columns: self.normalized_columns.clone(),
            mapping: CanonicalField::ALL
                .iter()
                .map(|field| MappingEntry {
                    field: field.label(),
                    column: self.get(*field).map(|r| r.column.clone()),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// One row of the debug mapping view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    /// Canonical field label
    pub field: &'static str,
    /// Matched (normalized) column name, or `None` if unresolved
    pub column: Option<String>,
}

/// What the resolver saw and decided, for inspection by the shell.
///
/// Carries no control-flow effect; fatal unresolved fields are reported
/// through [`ColumnMapping::require_complete`] instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SchemaDiagnostics {
    /// Every input column name after normalization
    pub normalized_columns: Vec<String>,
    /// Per-field resolution outcome, in schema order
    pub mapping: Vec<MappingEntry>,
}

// ============================================================================
// Errors
// ============================================================================

/// Schema resolution error
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("could not find these columns in the input: {}",
        .0.iter().map(|f| f.label()).collect::<Vec<_>>().join(", "))]
    Unresolved(Vec<CanonicalField>),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn normalize_trims_lowercases_and_flattens() {
        assert_eq!(normalize_column("  Fecha Inicio  "), "fecha inicio");
        assert_eq!(normalize_column("Fecha\nFin"), "fecha fin");
        assert_eq!(normalize_column("Estado\t"), "estado");
    }

    #[test]
    fn resolves_spanish_variant_headers() {
        // Alternate spellings for every field, none of them the primary alias.
        let mapping = ColumnMapping::resolve(&cols(&[
            "Etapa",
            "Tarea",
            "Fecha Inicio",
            "Fecha Fin",
            "Encargado",
            "Situación",
        ]));

        assert!(mapping.missing().is_empty());
        assert_eq!(mapping.get(CanonicalField::Phase).unwrap().column, "etapa");
        assert_eq!(mapping.get(CanonicalField::Activity).unwrap().column, "tarea");
        assert_eq!(
            mapping.get(CanonicalField::Start).unwrap().column,
            "fecha inicio"
        );
        assert_eq!(mapping.get(CanonicalField::End).unwrap().column, "fecha fin");
        assert_eq!(
            mapping.get(CanonicalField::Owner).unwrap().column,
            "encargado"
        );
        assert_eq!(
            mapping.get(CanonicalField::Status).unwrap().column,
            "situación"
        );
    }

    #[test]
    fn alias_priority_beats_column_order() {
        // "etapa" appears first in the file but "fase" is the higher-priority
        // alias, so Phase must map to "fase".
        let mapping = ColumnMapping::resolve(&cols(&[
            "Etapa", "Fase", "Tarea", "Inicio", "Fin", "Owner", "Estado",
        ]));
        let phase = mapping.get(CanonicalField::Phase).unwrap();
        assert_eq!(phase.column, "fase");
        assert_eq!(phase.index, 1);
    }

    #[test]
    fn no_fuzzy_matching() {
        // "fases" is not an alias; a near-miss must stay unresolved.
        let mapping = ColumnMapping::resolve(&cols(&[
            "Fases", "Tarea", "Inicio", "Fin", "Responsable", "Estado",
        ]));
        assert_eq!(mapping.missing(), vec![CanonicalField::Phase]);
    }

    #[test]
    fn missing_owner_is_named_responsable() {
        let mapping = ColumnMapping::resolve(&cols(&[
            "Fase", "Tarea", "Inicio", "Fin", "Estado",
        ]));
        let err = mapping.require_complete().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Responsable"), "got: {message}");
        assert!(!message.contains("Fase,"), "only missing fields: {message}");
    }

    #[test]
    fn require_complete_passes_on_full_mapping() {
        let mapping = ColumnMapping::resolve(&cols(&[
            "fase", "actividad", "inicio", "fin", "responsable", "estado",
        ]));
        assert!(mapping.require_complete().is_ok());
    }

    #[test]
    fn diagnostics_expose_columns_and_mapping() {
        let mapping =
            ColumnMapping::resolve(&cols(&["Fase ", "Tarea", "Inicio", "Fin", "Estado"]));
        let diag = mapping.diagnostics();

        assert_eq!(
            diag.normalized_columns,
            vec!["fase", "tarea", "inicio", "fin", "estado"]
        );
        assert_eq!(diag.mapping.len(), 6);
        let owner = diag.mapping.iter().find(|e| e.field == "Responsable").unwrap();
        assert_eq!(owner.column, None);
        let phase = diag.mapping.iter().find(|e| e.field == "Fase").unwrap();
        assert_eq!(phase.column.as_deref(), Some("fase"));
    }

    #[test]
    fn empty_header_resolves_nothing() {
        let mapping = ColumnMapping::resolve(&[]);
        assert_eq!(mapping.missing().len(), 6);
        assert!(mapping.require_complete().is_err());
    }
}
