//! Ordered pattern table mapping question text to answer topics
//!
//! Dispatch is first-match-wins over this table: overlapping patterns are
//! intentional and resolved purely by declaration order (the general
//! Porter's entry precedes the per-force entries, so "five forces for
//! suppliers" routes to the full analysis). Sub-topics carry their document
//! key explicitly instead of capturing it in a closure.

use regex::Regex;

/// One of Porter's five competitive forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Force {
    NewEntrants,
    Suppliers,
    Buyers,
    Substitutes,
    Rivalry,
}

impl Force {
    /// Key of this force inside `porter_five_forces_analysis`.
    pub fn key(self) -> &'static str {
        match self {
            Force::NewEntrants => "threat_of_new_entrants",
            Force::Suppliers => "bargaining_power_of_suppliers",
            Force::Buyers => "bargaining_power_of_buyers",
            Force::Substitutes => "threat_of_substitutes",
            Force::Rivalry => "industry_rivalry",
        }
    }
}

/// One of the four Balanced Scorecard perspectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Financial,
    Customer,
    InternalProcess,
    LearningGrowth,
}

impl Perspective {
    /// Key of this perspective inside `balanced_scorecard_analysis`.
    pub fn key(self) -> &'static str {
        match self {
            Perspective::Financial => "financial_perspective",
            Perspective::Customer => "customer_perspective",
            Perspective::InternalProcess => "internal_process_perspective",
            Perspective::LearningGrowth => "learning_and_growth_perspective",
        }
    }
}

/// Recommendation horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl Horizon {
    /// Key of this horizon in the recommendations accessor output.
    pub fn key(self) -> &'static str {
        match self {
            Horizon::ShortTerm => "short_term",
            Horizon::MediumTerm => "medium_term",
            Horizon::LongTerm => "long_term",
        }
    }

    /// Display heading for this horizon.
    pub fn heading(self) -> &'static str {
        match self {
            Horizon::ShortTerm => "Short-Term Improvements (0-6 months)",
            Horizon::MediumTerm => "Medium-Term Transformations (6-18 months)",
            Horizon::LongTerm => "Long-Term Strategic Innovations (18+ months)",
        }
    }
}

/// Answer topic selected by the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    MarketSize,
    KeyPlayers,
    IndustryChallenges,
    IndustryDrivers,
    PorterFiveForces,
    PorterForce(Force),
    BalancedScorecard,
    ScorecardPerspective(Perspective),
    Recommendations,
    RecommendationHorizon(Horizon),
    ValueChain,
    CorePrinciples,
    Methodologies,
    TechnologyEnablers,
    PerformanceMetrics,
    ImplementationPractices,
    BpmChallenges,
}

/// The fixed dispatch table in priority order. Patterns are matched against
/// the lowercased question; the first matching entry wins.
const TABLE: [(&str, Topic); 26] = [
    // Market size and growth
    (
        r"market size|how big|market value|industry size",
        Topic::MarketSize,
    ),
    // Key players and competition
    (
        r"key players|competitors|leading companies|market leaders|who are the",
        Topic::KeyPlayers,
    ),
    // Challenges and drivers
    (
        r"challenges|difficulties|problems|obstacles",
        Topic::IndustryChallenges,
    ),
    (
        r"drivers|growth factors|what drives|catalysts",
        Topic::IndustryDrivers,
    ),
    // Porter's Five Forces
    (
        r"porter|five forces|competitive forces|industry rivalry",
        Topic::PorterFiveForces,
    ),
    (
        r"threat of new entrants|new entrants|barriers to entry",
        Topic::PorterForce(Force::NewEntrants),
    ),
    (
        r"bargaining power of suppliers|supplier power|suppliers",
        Topic::PorterForce(Force::Suppliers),
    ),
    (
        r"bargaining power of buyers|buyer power|customers",
        Topic::PorterForce(Force::Buyers),
    ),
    (
        r"threat of substitutes|substitutes|alternative products",
        Topic::PorterForce(Force::Substitutes),
    ),
    (
        r"industry rivalry|competition intensity|competitive landscape",
        Topic::PorterForce(Force::Rivalry),
    ),
    // Balanced Scorecard
    (
        r"balanced scorecard|bsc|performance measurement",
        Topic::BalancedScorecard,
    ),
    (
        r"financial perspective|financial metrics|financial performance",
        Topic::ScorecardPerspective(Perspective::Financial),
    ),
    (
        r"customer perspective|customer metrics|customer satisfaction",
        Topic::ScorecardPerspective(Perspective::Customer),
    ),
    (
        r"internal process|process perspective|internal business",
        Topic::ScorecardPerspective(Perspective::InternalProcess),
    ),
    (
        r"learning and growth|innovation perspective|learning perspective",
        Topic::ScorecardPerspective(Perspective::LearningGrowth),
    ),
    // Process optimization
    (
        r"process optimization|improve processes|process improvement|recommendations",
        Topic::Recommendations,
    ),
    (
        r"short term|quick wins|immediate improvements",
        Topic::RecommendationHorizon(Horizon::ShortTerm),
    ),
    (
        r"medium term|mid term|intermediate improvements",
        Topic::RecommendationHorizon(Horizon::MediumTerm),
    ),
    (
        r"long term|strategic improvements|future state",
        Topic::RecommendationHorizon(Horizon::LongTerm),
    ),
    // Value chain
    (
        r"value chain|primary activities|support activities",
        Topic::ValueChain,
    ),
    // BPM reference topics
    (
        r"bpm principles|core principles|process management principles",
        Topic::CorePrinciples,
    ),
    (
        r"methodologies|six sigma|lean|business process reengineering|bpr|tqm",
        Topic::Methodologies,
    ),
    (
        r"technology|software|tools|systems|enablers",
        Topic::TechnologyEnablers,
    ),
    (
        r"metrics|kpis|performance indicators|measurements",
        Topic::PerformanceMetrics,
    ),
    (
        r"implementation|best practices|how to implement|adoption",
        Topic::ImplementationPractices,
    ),
    (
        r"common challenges|difficulties in bpm|problems with bpm",
        Topic::BpmChallenges,
    ),
];

/// Compile the dispatch table. Patterns are static and must compile; a
/// failure here is a defect in the table itself.
pub fn dispatch_table() -> Vec<(Regex, Topic)> {
    TABLE
        .iter()
        .map(|(pattern, topic)| {
            let regex = Regex::new(pattern).expect("dispatch table pattern");
            (regex, *topic)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(dispatch_table().len(), TABLE.len());
    }

    #[test]
    fn force_and_perspective_keys_match_document_schema() {
        assert_eq!(Force::NewEntrants.key(), "threat_of_new_entrants");
        assert_eq!(Perspective::LearningGrowth.key(), "learning_and_growth_perspective");
        assert_eq!(Horizon::MediumTerm.key(), "medium_term");
    }
}
