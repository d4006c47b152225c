use crate::models::{InvestmentInput, InvestmentResult, StateTransitionLog};

use super::StateName;

/// Values produced while the run moves through its states.
#[derive(Debug, Default)]
pub struct StateContext {
    pub input: Option<InvestmentInput>,
    pub result: Option<InvestmentResult>,
    pub analysis: Option<String>,
}

/// What a finished run did, for the caller and for tests.
#[derive(Debug)]
pub struct SessionReport {
    pub final_state: StateName,
    pub input: Option<InvestmentInput>,
    pub result: Option<InvestmentResult>,
    pub analysis: Option<String>,
    pub transitions: Vec<StateTransitionLog>,
}

impl SessionReport {
    /// State names visited, starting with the initial state.
    pub fn path(&self) -> Vec<String> {
        let mut path: Vec<String> = self.transitions.iter().take(1).map(|t| t.from.clone()).collect();
        path.extend(self.transitions.iter().map(|t| t.to.clone()));
        path
    }
}
