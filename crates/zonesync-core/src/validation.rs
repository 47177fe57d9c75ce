//! Read-only declaration checks
//!
//! The validator never talks to a backend. It is run on its own by the dry
//! mapper and before any backend call by the reconciling mappers. SOA
//! completeness is not checked here; the reconcilers enforce it per domain.

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::document::{Record, Root};
use crate::error::SyncError;
use crate::record_type::RecordType;

/// Largest TTL a record may carry (2^31 - 1, RFC 2181 section 8)
pub const MAX_TTL: u32 = i32::MAX as u32;

/// Largest MX/SRV priority (16-bit field)
pub const MAX_PRIORITY: u32 = u16::MAX as u32;

/// Non-fatal finding reported by the validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// An MX record declared without a priority
    MissingMxPriority { name: String },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::MissingMxPriority { name } => write!(
                f,
                "MX record with name {} does not have a priority configured",
                name
            ),
        }
    }
}

/// Outcome of a successful validation
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub records_checked: usize,
    pub warnings: Vec<ValidationWarning>,
}

/// Checks a declaration for type validity, name containment and empty values
#[derive(Debug, Clone)]
pub struct Validator {
    directory: PathBuf,
}

impl Validator {
    /// `directory` is the base for relative `file` contents
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Validate every record of every domain, stopping at the first error
    pub fn validate(&self, root: &Root) -> Result<ValidationReport, SyncError> {
        let mut report = ValidationReport::default();

        for (domain_name, domain) in &root.domains {
            debug!("Validating {} records of {}", domain.records.len(), domain_name);

            for record in &domain.records {
                if let Some(warning) = self.validate_record(domain_name, record, root)? {
                    warn!("Warning: {}", warning);
                    report.warnings.push(warning);
                }
                report.records_checked += 1;
            }
        }

        Ok(report)
    }

    fn validate_record(
        &self,
        domain_name: &str,
        record: &Record,
        root: &Root,
    ) -> Result<Option<ValidationWarning>, SyncError> {
        let record_type = RecordType::from_str(&record.record_type).map_err(|_| {
            SyncError::Validation(format!(
                "Invalid record type \"{}\" used for record with name \"{}\"",
                record.record_type, record.name
            ))
        })?;

        if !is_within_domain(&record.name, domain_name) {
            return Err(SyncError::Validation(format!(
                "Record name {} is not a subdomain of root {}",
                record.name, domain_name
            )));
        }

        if record.ttl > MAX_TTL {
            return Err(SyncError::Validation(format!(
                "TTL {} of {} record {} exceeds the maximum of {}",
                record.ttl, record.record_type, record.name, MAX_TTL
            )));
        }

        if record.priority > MAX_PRIORITY {
            return Err(SyncError::Validation(format!(
                "Priority {} of {} record {} exceeds the maximum of {}",
                record.priority, record.record_type, record.name, MAX_PRIORITY
            )));
        }

        let warning = if record_type == RecordType::MX && record.priority == 0 {
            Some(ValidationWarning::MissingMxPriority {
                name: record.name.clone(),
            })
        } else {
            None
        };

        let values = record
            .content
            .resolve_values(&self.directory, &root.round_robins)?;
        if values.iter().any(|value| value.is_empty()) {
            return Err(SyncError::Validation(format!(
                "{} record for {} is empty",
                record.record_type, record.name
            )));
        }

        Ok(warning)
    }
}

/// Whether `name` equals `domain` or is a subdomain of it
pub fn is_within_domain(name: &str, domain: &str) -> bool {
    match name.strip_suffix(domain) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}
