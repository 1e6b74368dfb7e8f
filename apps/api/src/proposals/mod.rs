// Candidate-role proposal workflow.
// States: proposed -> accepted | declined, accepted -> submitted -> closed.
// Transitions are one-directional; a re-proposal is a new row, never an edit.

pub mod handlers;
pub mod lifecycle;
pub mod store;
