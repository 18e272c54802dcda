// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::service::ServiceError;
use crate::synthesizer::PendingLink;
use contract_line_domain::DomainError;

/// Errors that abort a workflow invocation.
///
/// Per-bid problems (missing fields, unparsable amounts, lookup misses) are
/// outcomes, not errors; only failures of the data service and impossible
/// date arithmetic end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A query or write against the data service failed.
    Service(ServiceError),
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A two-phase contract line was created but its back-links were not
    /// written. The pending link can be retried.
    LinkingIncomplete {
        pending: Box<PendingLink>,
        source: ServiceError,
    },
    /// No lien deadline row exists for the jurisdiction.
    LienDeadlineNotFound { location_state: String },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "Data service error: {err}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::LinkingIncomplete { pending, source } => write!(
                f,
                "Contract line {} was created but not linked: {source}",
                pending.contract_line.id
            ),
            Self::LienDeadlineNotFound { location_state } => {
                write!(f, "No lien deadline configured for state '{location_state}'")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<ServiceError> for CoreError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
