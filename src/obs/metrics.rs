// self
use crate::obs::{OperationKind, OperationSpan, Outcome};

/// Increments `bca_client_operation_total{operation, outcome}` on the installed recorder.
pub fn record_operation_outcome(kind: OperationKind, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"bca_client_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the settled outcome on both the span and the counter.
pub fn record_settled(span: &OperationSpan, kind: OperationKind, outcome: Outcome) {
	span.record_outcome(outcome);
	record_operation_outcome(kind, outcome);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_operation_outcome_without_recorder_is_silent() {
		record_operation_outcome(OperationKind::TokenIssuance, Outcome::Rejected);
		record_operation_outcome(OperationKind::SignedRequest, Outcome::Failure);
	}

	#[test]
	fn settled_outcomes_reach_span_and_counter() {
		let span = OperationSpan::new(OperationKind::SignedRequest, "settled_outcomes");

		record_settled(&span, OperationKind::SignedRequest, Outcome::Rejected);
	}
}
