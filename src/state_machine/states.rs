use serde::{Deserialize, Serialize};

/// States of one interactive run.
///
/// `CollectingInput → LookupPending → {NoDataTerminal | ResultsComputed →
/// AnalysisPending → {AnalysisShown | AnalysisFailedShown}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateName {
    CollectingInput,
    LookupPending,
    NoDataTerminal,
    ResultsComputed,
    AnalysisPending,
    AnalysisShown,
    AnalysisFailedShown,
}

impl StateName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateName::CollectingInput => "COLLECTING_INPUT",
            StateName::LookupPending => "LOOKUP_PENDING",
            StateName::NoDataTerminal => "NO_DATA",
            StateName::ResultsComputed => "RESULTS_COMPUTED",
            StateName::AnalysisPending => "ANALYSIS_PENDING",
            StateName::AnalysisShown => "ANALYSIS_SHOWN",
            StateName::AnalysisFailedShown => "ANALYSIS_FAILED_SHOWN",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StateName::NoDataTerminal | StateName::AnalysisShown | StateName::AnalysisFailedShown
        )
    }

    /// Whether the run may move from `self` to `next`. There is no loop-back.
    pub fn can_transition_to(&self, next: StateName) -> bool {
        use StateName::*;
        matches!(
            (self, next),
            (CollectingInput, LookupPending)
                | (LookupPending, NoDataTerminal)
                | (LookupPending, ResultsComputed)
                | (ResultsComputed, AnalysisPending)
                | (AnalysisPending, AnalysisShown)
                | (AnalysisPending, AnalysisFailedShown)
        )
    }
}

impl std::fmt::Display for StateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
