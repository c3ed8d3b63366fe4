//! Propositional-logic risk engine.
//!
//! Both hazards share the formula `result = P ∧ (Q ∨ R)`; only the meaning
//! of the three variables differs:
//!
//! | Hazard     | P                | Q                    | R                   |
//! |------------|------------------|----------------------|---------------------|
//! | Flood      | high rainfall    | deforestation        | bad drainage        |
//! | Earthquake | seismic activity | poor building quality| landslide-prone area|

use serde::ser::{Serialize, SerializeMap, Serializer};

/// AND gate: true only if every input is true.
pub fn and(inputs: &[bool]) -> bool {
    inputs.iter().all(|&b| b)
}

/// OR gate: true if at least one input is true.
pub fn or(inputs: &[bool]) -> bool {
    inputs.iter().any(|&b| b)
}

/// NOT gate.
pub fn not(input: bool) -> bool {
    !input
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisasterType {
    Flood,
    Earthquake,
}

impl DisasterType {
    /// Wire names of the three factors, most significant first.
    pub fn variable_names(self) -> [&'static str; 3] {
        match self {
            DisasterType::Flood => ["p", "q", "r"],
            DisasterType::Earthquake => ["e", "b", "l"],
        }
    }

    /// Wire name of the OR step.
    pub fn intermediate_name(self) -> &'static str {
        match self {
            DisasterType::Flood => "q_or_r",
            DisasterType::Earthquake => "b_or_l",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisasterType::Flood => "flood",
            DisasterType::Earthquake => "earthquake",
        }
    }
}

/// The three boolean inputs of one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskFactors {
    pub p: bool,
    pub q: bool,
    pub r: bool,
}

impl RiskFactors {
    pub fn new(p: bool, q: bool, r: bool) -> Self {
        Self { p, q, r }
    }

    /// Decodes a 3-bit row index: bit 2 → p, bit 1 → q, bit 0 → r.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            p: bits & 0b100 != 0,
            q: bits & 0b010 != 0,
            r: bits & 0b001 != 0,
        }
    }
}

/// Returns `(q ∨ r, p ∧ (q ∨ r))`.
pub fn evaluate(p: bool, q: bool, r: bool) -> (bool, bool) {
    let q_or_r = or(&[q, r]);
    let result = and(&[p, q_or_r]);
    (q_or_r, result)
}

/// One evaluated row of a hazard formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub disaster: DisasterType,
    pub factors: RiskFactors,
    pub intermediate: bool,
    pub result: bool,
}

impl RiskAssessment {
    pub fn assess(disaster: DisasterType, factors: RiskFactors) -> Self {
        let (intermediate, result) = evaluate(factors.p, factors.q, factors.r);
        Self {
            disaster,
            factors,
            intermediate,
            result,
        }
    }
}

// Rows serialise with the hazard's own variable names,
// e.g. {"e":..,"b":..,"l":..,"b_or_l":..,"result":..}.
impl Serialize for RiskAssessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [a, b, c] = self.disaster.variable_names();
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(a, &self.factors.p)?;
        map.serialize_entry(b, &self.factors.q)?;
        map.serialize_entry(c, &self.factors.r)?;
        map.serialize_entry(self.disaster.intermediate_name(), &self.intermediate)?;
        map.serialize_entry("result", &self.result)?;
        map.end()
    }
}

/// All 8 combinations in binary counting order, p as the most significant bit.
pub fn generate_table(disaster: DisasterType) -> Vec<RiskAssessment> {
    (0u8..8)
        .map(|bits| RiskAssessment::assess(disaster, RiskFactors::from_bits(bits)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
    High,
    Safe,
}

/// Combined flood + earthquake outcome.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CombinedRisk {
    pub level: RiskLevel,
    pub severity: u8,
    pub color: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub fn classify(flood: bool, quake: bool) -> CombinedRisk {
    match (flood, quake) {
        (true, true) => CombinedRisk {
            level: RiskLevel::Critical,
            severity: 5,
            color: "red-900",
            icon: "fa-skull-crossbones",
            title: "🔴 BAHAYA EKSTREM - MULTI BENCANA",
            description: "Risiko banjir DAN gempa terdeteksi bersamaan!",
        },
        (true, false) => CombinedRisk {
            level: RiskLevel::High,
            severity: 4,
            color: "red-600",
            icon: "fa-water",
            title: "🚨 PERINGATAN BANJIR",
            description: "Risiko banjir tinggi terdeteksi",
        },
        (false, true) => CombinedRisk {
            level: RiskLevel::High,
            severity: 4,
            color: "orange-600",
            icon: "fa-house-crack",
            title: "⚠️ PERINGATAN GEMPA",
            description: "Risiko gempa bumi terdeteksi",
        },
        (false, false) => CombinedRisk {
            level: RiskLevel::Safe,
            severity: 1,
            color: "green-600",
            icon: "fa-shield-alt",
            title: "✅ KONDISI AMAN",
            description: "Tidak ada risiko bencana terdeteksi",
        },
    }
}
